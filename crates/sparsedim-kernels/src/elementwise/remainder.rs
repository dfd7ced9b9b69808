//! Scalar remainder.

use super::map_values;
use sparsedim_core::{Element, SparseNd};

/// Remainder of every element divided by `alpha` (Rust `%` semantics: the
/// sign follows the dividend). Visits every stored entry, then prunes.
///
/// # Panics
/// For integer element types, if `alpha` is zero.
#[must_use]
pub fn rem_scalar_nd<T: Element>(a: &SparseNd<T>, alpha: T) -> SparseNd<T> {
    map_values(a, |v| v % alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_values_disappear() {
        let mut a = SparseNd::new(vec![2, 3], 0i32).unwrap();
        a.set(4, &[0, 1]).unwrap();
        a.set(7, &[1, 2]).unwrap();
        a.set(-3, &[1, 0]).unwrap();
        let r = rem_scalar_nd(&a, 2);
        assert_eq!(r.get(&[0, 1]).unwrap(), 0);
        assert_eq!(r.get(&[1, 2]).unwrap(), 1);
        assert_eq!(r.get(&[1, 0]).unwrap(), -1);
        assert_eq!(r.nnz(), 2);
        assert_eq!(r.slices()[0].indptr, vec![0, 0, 2]);
    }
}
