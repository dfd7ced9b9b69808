//! Scalar multiplication.

use super::map_values;
use sparsedim_core::{CsrSlice, Element, SparseNd};

/// Multiplies every element by `alpha`.
///
/// For types where zero absorbs every value (the integers), multiplying by
/// zero builds the result from the new default and empty slices without
/// visiting stored entries. Otherwise each stored value and the default are
/// scaled, and entries that become equal to the new default are pruned, so
/// `inf * 0.0` still yields NaN for floats.
///
/// # Panics
/// Integer overflow in `v * alpha` panics in debug builds.
#[must_use]
pub fn mul_scalar_nd<T: Element>(a: &SparseNd<T>, alpha: T) -> SparseNd<T> {
    if T::ZERO_ABSORBS && alpha == T::zero() {
        a.span()
            .in_scope(|| tracing::debug!(slices = a.slice_count(), "absorbing scalar, clearing slices"));
        let nrows = a.shape().nrows();
        let slices = (0..a.slice_count()).map(|_| CsrSlice::empty(nrows)).collect();
        return SparseNd::from_parts_unchecked(a.shape().clone(), a.default_value() * alpha, slices)
            .with_span(a.span().clone());
    }
    map_values(a, |v| v * alpha)
}
