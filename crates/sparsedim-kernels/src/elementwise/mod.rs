//! Elementwise arithmetic on sparse arrays.
//!
//! Binary kernels pick between two algorithms:
//! - sparse-patch: when the right operand's default is the operator's
//!   identity, the result is the left operand with the right operand's stored
//!   entries merged in, row by row (cost follows the stored entry counts);
//! - general: otherwise every coordinate may change, so all coordinates are
//!   recomputed through the range iterator (cost follows the array size).
//!
//! Scalar kernels map the default and every stored value, then prune entries
//! that collapsed onto the new default.

pub mod add;
pub mod divide;
pub mod multiply;
pub mod remainder;
pub mod subtract;

use crate::cleanup::prune_default;
use crate::utility::util::SMALL_NNZ_LIMIT;
use core::cmp::Ordering;
use rayon::prelude::*;
use sparsedim_core::{CsrSlice, Element, Error, Result, SparseNd};

pub(crate) fn check_same_shape<T: Element>(a: &SparseNd<T>, b: &SparseNd<T>) -> Result<()> {
    if a.shape() == b.shape() {
        Ok(())
    } else {
        Err(Error::InvalidDimensions(format!(
            "shape mismatch: {} vs {}",
            a.shape(),
            b.shape()
        )))
    }
}

/// Merge one slice of `b` into the matching slice of `a`.
///
/// Entries only in `a` are copied as-is, which is valid because `b`'s default
/// is the identity of `op`.
fn patch_slice<T, F>(a: &CsrSlice<T>, b: &CsrSlice<T>, a_default: T, op: &F) -> CsrSlice<T>
where
    T: Element,
    F: Fn(T, T) -> T,
{
    let nrows = a.nrows();
    let mut indptr = Vec::with_capacity(nrows + 1);
    let mut indices = Vec::with_capacity(a.nnz() + b.nnz());
    let mut data = Vec::with_capacity(a.nnz() + b.nnz());
    indptr.push(0usize);
    for row in 0..nrows {
        let (mut pa, ea) = a.row_bounds(row);
        let (mut pb, eb) = b.row_bounds(row);
        while pa < ea || pb < eb {
            let ja = if pa < ea { a.indices[pa] } else { usize::MAX };
            let jb = if pb < eb { b.indices[pb] } else { usize::MAX };
            let (j, v) = match ja.cmp(&jb) {
                Ordering::Less => {
                    pa += 1;
                    (ja, a.data[pa - 1])
                }
                Ordering::Greater => {
                    pb += 1;
                    (jb, op(a_default, b.data[pb - 1]))
                }
                Ordering::Equal => {
                    pa += 1;
                    pb += 1;
                    (ja, op(a.data[pa - 1], b.data[pb - 1]))
                }
            };
            if v != a_default {
                indices.push(j);
                data.push(v);
            }
        }
        indptr.push(indices.len());
    }
    CsrSlice::from_parts_unchecked(indptr, indices, data)
}

/// Sparse-patch path; caller guarantees `op(x, b.default) == x`.
pub(crate) fn sparse_patch<T, F>(a: &SparseNd<T>, b: &SparseNd<T>, op: F) -> SparseNd<T>
where
    T: Element,
    F: Fn(T, T) -> T + Sync,
{
    let a_default = a.default_value();
    let work = a.nnz() + b.nnz();
    let slices: Vec<CsrSlice<T>> = if work < SMALL_NNZ_LIMIT {
        a.slices()
            .iter()
            .zip(b.slices())
            .map(|(sa, sb)| patch_slice(sa, sb, a_default, &op))
            .collect()
    } else {
        a.slices()
            .par_iter()
            .zip(b.slices().par_iter())
            .map(|(sa, sb)| patch_slice(sa, sb, a_default, &op))
            .collect()
    };
    SparseNd::from_parts_unchecked(a.shape().clone(), a_default, slices)
}

/// General path: recompute every coordinate.
pub(crate) fn dense_combine<T, F>(a: &SparseNd<T>, b: &SparseNd<T>, op: F) -> Result<SparseNd<T>>
where
    T: Element,
    F: Fn(T, T) -> T,
{
    let default = op(a.default_value(), b.default_value());
    let mut out = SparseNd::from_shape(a.shape().clone(), default);
    for c in &a.coords()? {
        out.set(op(a.get(&c)?, b.get(&c)?), &c)?;
    }
    Ok(out)
}

/// Binary kernel driver shared by add and subtract.
pub(crate) fn combine<T, F>(a: &SparseNd<T>, b: &SparseNd<T>, name: &str, op: F) -> Result<SparseNd<T>>
where
    T: Element,
    F: Fn(T, T) -> T + Sync,
{
    check_same_shape(a, b)?;
    let _enter = a.span().enter();
    let out = if b.default_value() == T::zero() {
        tracing::debug!(op = name, nnz_a = a.nnz(), nnz_b = b.nnz(), "sparse-patch path");
        sparse_patch(a, b, op)
    } else {
        tracing::debug!(op = name, len = a.len(), "general path");
        dense_combine(a, b, op)?
    };
    Ok(out.with_span(a.span().clone()))
}

/// Apply `f` to the default and to every stored value, then prune.
pub(crate) fn map_values<T, F>(a: &SparseNd<T>, f: F) -> SparseNd<T>
where
    T: Element,
    F: Fn(T) -> T + Sync,
{
    let default = f(a.default_value());
    let mut slices = a.slices().to_vec();
    if a.nnz() < SMALL_NNZ_LIMIT {
        for s in &mut slices {
            s.data.iter_mut().for_each(|v| *v = f(*v));
        }
    } else {
        for s in &mut slices {
            s.data.par_chunks_mut(1024).for_each(|chunk| {
                chunk.iter_mut().for_each(|v| *v = f(*v));
            });
        }
    }
    let slices = prune_default(slices, default);
    SparseNd::from_parts_unchecked(a.shape().clone(), default, slices).with_span(a.span().clone())
}
