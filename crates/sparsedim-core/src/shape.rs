//! Array shapes and the mixed-radix flattening of leading dimensions into slices

use crate::error::{Error, Result};
use std::fmt;

/// Fixed shape of an N-dimensional sparse array (N >= 2).
///
/// The last two dimensions are the rows and columns of each CSR slice; all
/// leading dimensions are folded into a single slice index, outermost
/// dimension most significant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    dims: Vec<usize>,
    slice_count: usize,
}

impl Shape {
    /// Validate and build a shape.
    ///
    /// # Errors
    /// `InvalidDimensions` if fewer than two dimensions are given, a
    /// dimension is zero, or the element count overflows `usize`.
    pub fn new(dims: impl Into<Vec<usize>>) -> Result<Self> {
        let dims = dims.into();
        if dims.len() < 2 {
            return Err(Error::InvalidDimensions(format!(
                "at least 2 dimensions required, got {}",
                dims.len()
            )));
        }
        if let Some(axis) = dims.iter().position(|&d| d == 0) {
            return Err(Error::InvalidDimensions(format!(
                "dimension {axis} must be positive, shape {dims:?}"
            )));
        }
        let total = dims
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .ok_or_else(|| Error::InvalidDimensions(format!("shape {dims:?} overflows usize")))?;
        let slice_count = dims[..dims.len() - 2].iter().product();
        debug_assert!(slice_count <= total);
        Ok(Self { dims, slice_count })
    }

    /// Shape with every one of `ndim` dimensions equal to 1.
    ///
    /// # Errors
    /// `InvalidDimensions` if `ndim < 2`.
    pub fn ones(ndim: usize) -> Result<Self> {
        Self::new(vec![1usize; ndim])
    }

    #[inline]
    #[must_use]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    #[inline]
    #[must_use]
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Rows per slice (`dims[N-2]`).
    #[inline]
    #[must_use]
    pub fn nrows(&self) -> usize {
        self.dims[self.dims.len() - 2]
    }

    /// Columns per slice (`dims[N-1]`).
    #[inline]
    #[must_use]
    pub fn ncols(&self) -> usize {
        self.dims[self.dims.len() - 1]
    }

    /// Number of CSR slices: the product of all dimensions but the last two.
    #[inline]
    #[must_use]
    pub const fn slice_count(&self) -> usize {
        self.slice_count
    }

    /// Total number of logical elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slice_count * self.nrows() * self.ncols()
    }

    /// Shapes always hold at least one element.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Check that `coords` names an element of this shape.
    ///
    /// # Errors
    /// `InvalidCoordinates` on a component count mismatch or a component
    /// outside `[0, dim)`.
    pub fn check_coords(&self, coords: &[usize]) -> Result<()> {
        if coords.len() != self.dims.len() {
            return Err(Error::InvalidCoordinates(format!(
                "expected {} coordinates, got {}",
                self.dims.len(),
                coords.len()
            )));
        }
        for (axis, (&c, &d)) in coords.iter().zip(&self.dims).enumerate() {
            if c >= d {
                return Err(Error::InvalidCoordinates(format!(
                    "coordinate {c} out of bounds for axis {axis} of size {d}"
                )));
            }
        }
        Ok(())
    }

    /// Validate `coords` and split them into `(slice, row, col)`.
    ///
    /// # Errors
    /// See [`Shape::check_coords`].
    pub fn locate(&self, coords: &[usize]) -> Result<(usize, usize, usize)> {
        self.check_coords(coords)?;
        let n = self.dims.len();
        Ok((self.slice_index(&coords[..n - 2]), coords[n - 2], coords[n - 1]))
    }

    /// Mixed-radix encoding of the leading coordinates into a slice index.
    ///
    /// `leading` must hold exactly `ndim - 2` in-bounds components.
    #[inline]
    #[must_use]
    pub fn slice_index(&self, leading: &[usize]) -> usize {
        debug_assert_eq!(leading.len(), self.dims.len() - 2);
        leading
            .iter()
            .zip(&self.dims)
            .fold(0usize, |acc, (&c, &d)| acc * d + c)
    }

    /// Inverse of [`Shape::slice_index`].
    #[must_use]
    pub fn slice_coords(&self, mut index: usize) -> Vec<usize> {
        debug_assert!(index < self.slice_count);
        let lead = &self.dims[..self.dims.len() - 2];
        let mut out = vec![0usize; lead.len()];
        for (slot, &d) in out.iter_mut().zip(lead).rev() {
            *slot = index % d;
            index /= d;
        }
        out
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.dims)
    }
}

impl TryFrom<Vec<usize>> for Shape {
    type Error = Error;

    fn try_from(dims: Vec<usize>) -> Result<Self> {
        Self::new(dims)
    }
}

impl TryFrom<&[usize]> for Shape {
    type Error = Error;

    fn try_from(dims: &[usize]) -> Result<Self> {
        Self::new(dims.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_index_round_trips() {
        let s = Shape::new(vec![2, 3, 4, 5, 6]).unwrap();
        assert_eq!(s.slice_count(), 24);
        for idx in 0..s.slice_count() {
            let lead = s.slice_coords(idx);
            assert_eq!(s.slice_index(&lead), idx);
        }
        // outermost dimension is most significant
        assert_eq!(s.slice_index(&[1, 0, 0]), 12);
        assert_eq!(s.slice_index(&[0, 1, 0]), 4);
    }

    #[test]
    fn two_dims_have_one_slice() {
        let s = Shape::new(vec![7, 9]).unwrap();
        assert_eq!(s.slice_count(), 1);
        assert_eq!(s.slice_index(&[]), 0);
        assert!(s.slice_coords(0).is_empty());
        assert_eq!(s.len(), 63);
    }

    #[test]
    fn rejects_bad_shapes() {
        assert!(matches!(Shape::new(vec![3]), Err(Error::InvalidDimensions(_))));
        assert!(matches!(Shape::new(vec![3, 0, 2]), Err(Error::InvalidDimensions(_))));
        assert!(matches!(
            Shape::new(vec![usize::MAX, 2]),
            Err(Error::InvalidDimensions(_))
        ));
    }

    #[test]
    fn locate_checks_bounds() {
        let s = Shape::new(vec![2, 3, 4]).unwrap();
        assert_eq!(s.locate(&[1, 2, 3]).unwrap(), (1, 2, 3));
        assert!(matches!(s.locate(&[2, 0, 0]), Err(Error::InvalidCoordinates(_))));
        assert!(matches!(s.locate(&[0, 0]), Err(Error::InvalidCoordinates(_))));
    }
}
