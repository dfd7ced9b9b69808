//! Generic unary transform of every element.

use crate::cleanup::prune_default;
use crate::elementwise::map_values;
use crate::utility::util::MemoMap;
use sparsedim_core::{Element, SparseNd};

/// Applies `f` to the default and to every stored value.
///
/// With `memoize`, results are cached by input bit pattern so each distinct
/// input value is transformed once; this is only sound when `f` is a pure
/// function of its argument. Memoised runs are sequential, plain runs may
/// walk large arrays in parallel.
///
/// Entries whose transformed value equals the transformed default are pruned.
#[must_use]
pub fn transform_nd<T, F>(a: &SparseNd<T>, f: F, memoize: bool) -> SparseNd<T>
where
    T: Element,
    F: Fn(T) -> T + Sync,
{
    if !memoize {
        return map_values(a, f);
    }
    let mut memo = MemoMap::with_capacity(a.nnz().min(4096) + 1);
    let default = memo.get_or_insert_with(a.default_value(), &f);
    let mut slices = a.slices().to_vec();
    for s in &mut slices {
        for v in &mut s.data {
            *v = memo.get_or_insert_with(*v, &f);
        }
    }
    a.span().in_scope(|| {
        tracing::debug!(nnz = a.nnz(), distinct = memo.len(), "memoised transform");
    });
    let slices = prune_default(slices, default);
    SparseNd::from_parts_unchecked(a.shape().clone(), default, slices).with_span(a.span().clone())
}
