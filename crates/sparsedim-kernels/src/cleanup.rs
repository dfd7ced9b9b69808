//! Drop stored entries that equal the array default
//!
//! Value-mapping kernels may turn distinct stored values into the new
//! default; this pass restores the "no stored default" invariant.

use crate::utility::util::SMALL_NNZ_LIMIT;
use rayon::prelude::*;
use sparsedim_core::{CsrSlice, Element};

fn prune_slice<T: Element>(s: CsrSlice<T>, default: T) -> CsrSlice<T> {
    if !s.data.contains(&default) {
        return s;
    }
    let nrows = s.nrows();
    let mut indptr = Vec::with_capacity(nrows + 1);
    let mut indices = Vec::with_capacity(s.nnz());
    let mut data = Vec::with_capacity(s.nnz());
    indptr.push(0usize);
    for row in 0..nrows {
        for (col, &v) in s.row(row) {
            if v != default {
                indices.push(col);
                data.push(v);
            }
        }
        indptr.push(indices.len());
    }
    CsrSlice::from_parts_unchecked(indptr, indices, data)
}

/// Remove every stored value equal to `default`, rebuilding row pointers of
/// the affected slices. Slices without such values are returned untouched.
#[must_use]
pub fn prune_default<T: Element>(slices: Vec<CsrSlice<T>>, default: T) -> Vec<CsrSlice<T>> {
    let nnz: usize = slices.iter().map(CsrSlice::nnz).sum();
    if nnz < SMALL_NNZ_LIMIT {
        slices.into_iter().map(|s| prune_slice(s, default)).collect()
    } else {
        slices
            .into_par_iter()
            .map(|s| prune_slice(s, default))
            .collect()
    }
}
