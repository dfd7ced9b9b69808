//! 2D convenience wrapper over [`SparseNd`]

use crate::array::SparseNd;
use crate::element::Element;
use crate::error::{Error, Result};
use std::fmt;

/// Sparse matrix addressed by `(row, col)`; a 2-dimensional [`SparseNd`].
#[derive(Debug, Clone)]
pub struct SparseMatrix<T> {
    inner: SparseNd<T>,
}

impl<T: Element> SparseMatrix<T> {
    /// # Errors
    /// `InvalidDimensions` if either dimension is zero.
    pub fn new(nrows: usize, ncols: usize, default: T) -> Result<Self> {
        Ok(Self {
            inner: SparseNd::new(vec![nrows, ncols], default)?,
        })
    }

    #[inline]
    #[must_use]
    pub fn nrows(&self) -> usize {
        self.inner.shape().nrows()
    }

    #[inline]
    #[must_use]
    pub fn ncols(&self) -> usize {
        self.inner.shape().ncols()
    }

    #[inline]
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }

    #[inline]
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.inner.nnz()
    }

    #[inline]
    #[must_use]
    pub fn default_value(&self) -> T {
        self.inner.default_value()
    }

    /// # Errors
    /// `InvalidCoordinates` if `(row, col)` is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.inner.get(&[row, col])
    }

    /// # Errors
    /// `InvalidCoordinates` if `(row, col)` is out of bounds.
    pub fn set(&mut self, value: T, row: usize, col: usize) -> Result<()> {
        self.inner.set(value, &[row, col])
    }

    #[inline]
    #[must_use]
    pub const fn as_nd(&self) -> &SparseNd<T> {
        &self.inner
    }

    #[inline]
    #[must_use]
    pub fn into_nd(self) -> SparseNd<T> {
        self.inner
    }
}

impl<T: Element> TryFrom<SparseNd<T>> for SparseMatrix<T> {
    type Error = Error;

    fn try_from(inner: SparseNd<T>) -> Result<Self> {
        if inner.ndim() != 2 {
            return Err(Error::InvalidDimensions(format!(
                "a matrix needs 2 dimensions, got {}",
                inner.ndim()
            )));
        }
        Ok(Self { inner })
    }
}

impl<T: Element> PartialEq for SparseMatrix<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T: Element> fmt::Display for SparseMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}
