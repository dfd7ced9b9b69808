//! Element trait for the scalar types a sparse array can hold

use bytemuck::Pod;
use std::fmt::{Debug, Display};
use std::ops::{Add, Div, Mul, Rem, Sub};

/// Trait for types that can be elements of a sparse array
///
/// # Bounds
/// - `Copy + PartialEq` - values are returned by copy and compared against the default
/// - `Send + Sync + 'static` - kernels may walk slices in parallel
/// - `Pod` - fixed-width byte image used by the persistence codec
/// - `Add + Sub + Mul + Div + Rem` - the arithmetic the operator layer uses
/// - `Debug + Display` - error messages and textual rendering
pub trait Element:
    Copy
    + PartialEq
    + Debug
    + Display
    + Send
    + Sync
    + Pod
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Rem<Output = Self>
{
    /// Additive identity
    fn zero() -> Self;

    /// Multiplicative identity
    fn one() -> Self;

    /// Bit pattern of the value widened to 64 bits.
    ///
    /// Two values with the same bits are interchangeable inputs for a pure
    /// function, which is what memoised transforms rely on.
    fn to_bits(self) -> u64;

    /// `x * zero() == zero()` holds for every value of the type.
    ///
    /// False for floats, where infinities and NaN multiply by zero to NaN.
    const ZERO_ABSORBS: bool;
}

macro_rules! impl_element_int {
    ($($t:ty => $u:ty),* $(,)?) => {
        $(
            impl Element for $t {
                const ZERO_ABSORBS: bool = true;

                #[inline]
                fn zero() -> Self {
                    0
                }

                #[inline]
                fn one() -> Self {
                    1
                }

                #[inline]
                #[allow(clippy::cast_sign_loss, clippy::cast_lossless)]
                fn to_bits(self) -> u64 {
                    (self as $u) as u64
                }
            }
        )*
    };
}

impl_element_int!(
    i8 => u8,
    i16 => u16,
    i32 => u32,
    i64 => u64,
    u8 => u8,
    u16 => u16,
    u32 => u32,
    u64 => u64,
);

impl Element for f32 {
    const ZERO_ABSORBS: bool = false;

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn one() -> Self {
        1.0
    }

    #[inline]
    fn to_bits(self) -> u64 {
        u64::from(f32::to_bits(self))
    }
}

impl Element for f64 {
    const ZERO_ABSORBS: bool = false;

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn one() -> Self {
        1.0
    }

    #[inline]
    fn to_bits(self) -> u64 {
        f64::to_bits(self)
    }
}
