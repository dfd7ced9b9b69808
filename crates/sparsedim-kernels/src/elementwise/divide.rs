//! Scalar division.

use super::map_values;
use sparsedim_core::{Element, SparseNd};

/// Divides every element by `alpha`.
///
/// Always visits every stored entry; values that collapse onto the new
/// default (integer truncation, for instance) are pruned.
///
/// # Panics
/// For integer element types, if `alpha` is zero.
#[must_use]
pub fn div_scalar_nd<T: Element>(a: &SparseNd<T>, alpha: T) -> SparseNd<T> {
    map_values(a, |v| v / alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncated_values_are_pruned() {
        let mut a = SparseNd::new(vec![1, 4], 0i32).unwrap();
        a.set(1, &[0, 0]).unwrap();
        a.set(9, &[0, 3]).unwrap();
        let b = div_scalar_nd(&a, 2);
        assert_eq!(b.get(&[0, 0]).unwrap(), 0);
        assert_eq!(b.get(&[0, 3]).unwrap(), 4);
        assert_eq!(b.nnz(), 1);
        assert_eq!(b.slices()[0].indices, vec![3]);
    }

    #[test]
    fn float_division() {
        let mut a = SparseNd::new(vec![2, 2], 2.0f64).unwrap();
        a.set(5.0, &[1, 1]).unwrap();
        let b = div_scalar_nd(&a, 4.0);
        assert_eq!(b.default_value(), 0.5);
        assert_eq!(b.get(&[1, 1]).unwrap(), 1.25);
    }
}
