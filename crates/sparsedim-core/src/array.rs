//! `SparseNd`: N-dimensional sparse array stored as an arena of CSR slices

use crate::csr::CsrSlice;
use crate::element::Element;
use crate::error::{Error, Result};
use crate::range::CoordRange;
use crate::shape::Shape;
use tracing::Span;

/// N-dimensional array that stores only the elements differing from its
/// default value.
///
/// Leading dimensions are flattened into a slice index; each slice is a
/// [`CsrSlice`] over the last two dimensions. No stored value ever equals the
/// default, which keeps the representation canonical.
#[derive(Debug, Clone)]
pub struct SparseNd<T> {
    shape: Shape,
    default: T,
    slices: Vec<CsrSlice<T>>,
    span: Span,
}

impl<T: Element> SparseNd<T> {
    /// Empty array of the given dimensions.
    ///
    /// # Errors
    /// `InvalidDimensions` if fewer than two dimensions are given or any is zero.
    pub fn new(dims: impl Into<Vec<usize>>, default: T) -> Result<Self> {
        Ok(Self::from_shape(Shape::new(dims)?, default))
    }

    /// Empty array over an already validated shape.
    #[must_use]
    pub fn from_shape(shape: Shape, default: T) -> Self {
        let nrows = shape.nrows();
        let slices = (0..shape.slice_count())
            .map(|_| CsrSlice::empty(nrows))
            .collect();
        tracing::debug!(shape = %shape, slices = shape.slice_count(), default = %default, "allocated sparse array");
        Self {
            shape,
            default,
            slices,
            span: Span::none(),
        }
    }

    /// Attach a span; mutation and kernel events for this array are
    /// recorded inside it.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    #[inline]
    #[must_use]
    pub const fn span(&self) -> &Span {
        &self.span
    }

    #[inline]
    #[must_use]
    pub const fn shape(&self) -> &Shape {
        &self.shape
    }

    #[inline]
    #[must_use]
    pub fn dims(&self) -> &[usize] {
        self.shape.dims()
    }

    #[inline]
    #[must_use]
    pub fn ndim(&self) -> usize {
        self.shape.ndim()
    }

    #[inline]
    #[must_use]
    pub fn default_value(&self) -> T {
        self.default
    }

    /// Total number of logical elements, stored or not.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.shape.len()
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.shape.is_empty()
    }

    /// Number of stored (non-default) entries.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.slices.iter().map(CsrSlice::nnz).sum()
    }

    /// Stored entries of one slice, `None` if `slice` is out of range.
    #[must_use]
    pub fn slice_nnz(&self, slice: usize) -> Option<usize> {
        self.slices.get(slice).map(CsrSlice::nnz)
    }

    #[inline]
    #[must_use]
    pub fn slice_count(&self) -> usize {
        self.slices.len()
    }

    #[inline]
    #[must_use]
    pub fn slices(&self) -> &[CsrSlice<T>] {
        &self.slices
    }

    /// Every coordinate of the array, in row-major order.
    ///
    /// # Errors
    /// Never fails for a constructed array; the `Result` mirrors
    /// [`CoordRange::new`].
    pub fn coords(&self) -> Result<CoordRange> {
        CoordRange::new(self.shape.dims().to_vec())
    }

    fn check_state(&self) -> Result<()> {
        if self.slices.len() == self.shape.slice_count() {
            Ok(())
        } else {
            Err(Error::InvalidState(format!(
                "{} slices stored for a shape with {} slices",
                self.slices.len(),
                self.shape.slice_count()
            )))
        }
    }

    /// Value at `coords`, the default if nothing is stored there.
    ///
    /// # Errors
    /// `InvalidCoordinates` for a malformed or out-of-bounds coordinate,
    /// `InvalidState` if the slice arena no longer matches the shape.
    pub fn get(&self, coords: &[usize]) -> Result<T> {
        let (slice, row, col) = self.shape.locate(coords)?;
        self.check_state()?;
        let s = &self.slices[slice];
        Ok(s.find(row, col).map_or(self.default, |pos| s.data[pos]))
    }

    /// Store `value` at `coords`. Storing the default removes the entry.
    ///
    /// # Errors
    /// Same as [`SparseNd::get`].
    pub fn set(&mut self, value: T, coords: &[usize]) -> Result<()> {
        let (slice, row, col) = self.shape.locate(coords)?;
        self.check_state()?;
        let is_default = value == self.default;
        let s = &mut self.slices[slice];
        match (s.find(row, col), is_default) {
            (Err(_), true) => {}
            (Err(pos), false) => {
                s.insert_at(row, pos, col, value);
                self.span
                    .in_scope(|| tracing::trace!(slice, row, col, "inserted entry"));
            }
            (Ok(pos), true) => {
                s.remove_at(row, pos);
                self.span
                    .in_scope(|| tracing::trace!(slice, row, col, "removed entry"));
            }
            (Ok(pos), false) => s.data[pos] = value,
        }
        Ok(())
    }

    /// Stored entries as `(coords, value)` in row-major order.
    pub fn iter_stored(&self) -> impl Iterator<Item = (Vec<usize>, T)> + '_ {
        self.slices.iter().enumerate().flat_map(move |(idx, s)| {
            let lead = self.shape.slice_coords(idx);
            (0..s.nrows()).flat_map(move |row| {
                let lead = lead.clone();
                s.row(row).map(move |(col, &v)| {
                    let mut c = lead.clone();
                    c.push(row);
                    c.push(col);
                    (c, v)
                })
            })
        })
    }

    /// Assemble an array from raw slices.
    ///
    /// The slice count and per-slice lengths are always checked; with `check`
    /// the full CSR structure and the "no stored default" rule are verified too.
    ///
    /// # Errors
    /// `InvalidState` describing the first violated invariant.
    pub fn from_parts(shape: Shape, default: T, slices: Vec<CsrSlice<T>>, check: bool) -> Result<Self> {
        if slices.len() != shape.slice_count() {
            return Err(Error::InvalidState(format!(
                "expected {} slices, got {}",
                shape.slice_count(),
                slices.len()
            )));
        }
        let (nrows, ncols) = (shape.nrows(), shape.ncols());
        let mut checked = Vec::with_capacity(slices.len());
        for s in slices {
            let s = CsrSlice::from_parts(nrows, ncols, s.indptr, s.indices, s.data, check)?;
            if check && s.data.iter().any(|&v| v == default) {
                return Err(Error::InvalidState("stored value equals the default".into()));
            }
            checked.push(s);
        }
        Ok(Self::from_parts_unchecked(shape, default, checked))
    }

    /// Assemble an array from slices already known to be canonical.
    #[must_use]
    pub fn from_parts_unchecked(shape: Shape, default: T, slices: Vec<CsrSlice<T>>) -> Self {
        debug_assert_eq!(slices.len(), shape.slice_count());
        Self {
            shape,
            default,
            slices,
            span: Span::none(),
        }
    }

    /// Take the array apart into shape, default and slices.
    #[must_use]
    pub fn into_parts(self) -> (Shape, T, Vec<CsrSlice<T>>) {
        (self.shape, self.default, self.slices)
    }

    /// Whether the raw slice arrays match exactly (same default assumed).
    fn same_storage(&self, other: &Self) -> bool {
        self.slices.len() == other.slices.len()
            && self.slices.iter().zip(&other.slices).all(|(a, b)| {
                a.indptr == b.indptr && a.indices == b.indices && a.data == b.data
            })
    }
}

impl<T: Element> PartialEq for SparseNd<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.shape != other.shape {
            return false;
        }
        if self.default == other.default {
            return self.same_storage(other);
        }
        let Ok(range) = self.coords() else {
            return false;
        };
        range
            .iter()
            .all(|c| matches!((self.get(&c), other.get(&c)), (Ok(a), Ok(b)) if a == b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_default_is_noop_on_absent() {
        let mut a = SparseNd::new(vec![2, 3], 0i32).unwrap();
        a.set(0, &[1, 1]).unwrap();
        assert_eq!(a.nnz(), 0);
        a.set(4, &[1, 1]).unwrap();
        a.set(6, &[1, 1]).unwrap();
        assert_eq!(a.nnz(), 1);
        assert_eq!(a.get(&[1, 1]).unwrap(), 6);
        a.set(0, &[1, 1]).unwrap();
        assert_eq!(a.nnz(), 0);
        assert_eq!(a.slices()[0].indptr, vec![0, 0, 0]);
    }

    #[test]
    fn corrupted_arena_reports_invalid_state() {
        let a = SparseNd::new(vec![2, 2, 2], 0i32).unwrap();
        let (shape, default, mut slices) = a.into_parts();
        slices.pop();
        let broken = SparseNd {
            shape,
            default,
            slices,
            span: Span::none(),
        };
        assert!(matches!(broken.get(&[0, 0, 0]), Err(Error::InvalidState(_))));
    }

    #[test]
    fn from_parts_rejects_stored_default() {
        let shape = Shape::new(vec![1, 2]).unwrap();
        let s = CsrSlice::from_parts_unchecked(vec![0, 1], vec![0], vec![3i32]);
        assert!(matches!(
            SparseNd::from_parts(shape, 3, vec![s], true),
            Err(Error::InvalidState(_))
        ));
    }
}
