//! Elementwise subtraction of two sparse arrays.

use super::combine;
use sparsedim_core::{Element, Result, SparseNd};

/// Subtracts two arrays of identical shape: A - B.
///
/// Same path selection as [`add_nd`](super::add::add_nd): a zero default on
/// `b` allows the sparse-patch merge, anything else recomputes every
/// coordinate.
///
/// # Errors
/// `InvalidDimensions` if the shapes differ.
///
/// # Panics
/// Integer overflow in `x - y` panics in debug builds.
pub fn sub_nd<T: Element>(a: &SparseNd<T>, b: &SparseNd<T>) -> Result<SparseNd<T>> {
    combine(a, b, "subtract", |x, y| x - y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_only_in_b_are_negated() {
        let mut a = SparseNd::new(vec![1, 3], 0i32).unwrap();
        a.set(5, &[0, 0]).unwrap();
        let mut b = SparseNd::new(vec![1, 3], 0i32).unwrap();
        b.set(2, &[0, 1]).unwrap();
        b.set(5, &[0, 0]).unwrap();
        let c = sub_nd(&a, &b).unwrap();
        assert_eq!(c.get(&[0, 0]).unwrap(), 0);
        assert_eq!(c.get(&[0, 1]).unwrap(), -2);
        assert_eq!(c.nnz(), 1);
    }

    #[test]
    fn nonzero_default_on_right() {
        let a = SparseNd::new(vec![2, 2], 3.0f64).unwrap();
        let mut b = SparseNd::new(vec![2, 2], 1.0f64).unwrap();
        b.set(3.0, &[0, 1]).unwrap();
        let c = sub_nd(&a, &b).unwrap();
        assert_eq!(c.default_value(), 2.0);
        assert_eq!(c.get(&[0, 1]).unwrap(), 0.0);
        assert_eq!(c.nnz(), 1);
    }
}
