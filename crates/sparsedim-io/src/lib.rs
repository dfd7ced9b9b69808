//! Binary persistence for sparsedim arrays
//!
//! Layout (little-endian, fixed width):
//!
//! ```text
//! default            size_of::<T>() bytes
//! ndim               i32
//! dims               ndim x i32
//! row pointers       VecOfVec<i32>
//! column indices     VecOfVec<i32>
//! values             VecOfVec<T>
//! ```
//!
//! `VecOfVec<X>` is an `i32` outer count followed, per inner sequence, by an
//! `i32` length and that many raw `X`. Elements are written as their
//! `bytemuck` byte image in little-endian order.
//!
//! Loading distinguishes two failure channels: I/O problems are reported
//! through [`LoadStatus`] next to a placeholder array, while a file that
//! decodes into an impossible array is an [`Error`](sparsedim_core::Error).
#![allow(
    clippy::module_name_repetitions,
    reason = "Loaded/LoadStatus read naturally at call sites as sparsedim_io::LoadStatus"
)]

pub mod codec;

pub use codec::{dump, dump_matrix, load, load_matrix, read_from, write_to, LoadStatus, Loaded};

#[inline]
#[must_use]
pub const fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
