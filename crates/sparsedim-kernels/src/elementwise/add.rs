//! Elementwise addition of two sparse arrays.

use super::combine;
use sparsedim_core::{Element, Result, SparseNd};

/// Adds two arrays of identical shape: A + B.
///
/// The result default is `a.default + b.default`.
///
/// # Algorithm
/// - `b.default == 0`: sparse-patch. Each row of `a` is merged with the same
///   row of `b`; columns stored only in `a` are kept, the rest are summed and
///   dropped when they land on the result default.
/// - otherwise: every coordinate is recomputed and written with `set`.
///
/// # Complexity
/// - sparse-patch: O(nnz_A + nnz_B + slices * rows)
/// - general: O(len * log(row nnz))
///
/// # Errors
/// `InvalidDimensions` if the shapes differ.
///
/// # Panics
/// Integer overflow in `x + y` panics in debug builds.
pub fn add_nd<T: Element>(a: &SparseNd<T>, b: &SparseNd<T>) -> Result<SparseNd<T>> {
    combine(a, b, "add", |x, y| x + y)
}
