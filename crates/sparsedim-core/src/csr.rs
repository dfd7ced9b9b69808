//! CSR slice: the 2D building block of an N-dimensional sparse array

use crate::error::{Error, Result};

/// One compressed-sparse-row page.
///
/// `indptr` has `nrows + 1` entries, `indices[indptr[r]..indptr[r+1]]` are the
/// strictly increasing columns stored for row `r`, and `data` runs parallel to
/// `indices`.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct CsrSlice<T> {
    pub indptr: Vec<usize>,
    pub indices: Vec<usize>,
    pub data: Vec<T>,
}

impl<T> CsrSlice<T> {
    /// Slice with `nrows` rows and no stored entries.
    #[inline]
    #[must_use]
    pub fn empty(nrows: usize) -> Self {
        Self {
            indptr: vec![0usize; nrows + 1],
            indices: Vec::new(),
            data: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn nrows(&self) -> usize {
        self.indptr.len().saturating_sub(1)
    }

    /// `[start, end)` positions of `row` inside `indices`/`data`.
    #[inline]
    #[must_use]
    pub fn row_bounds(&self, row: usize) -> (usize, usize) {
        (self.indptr[row], self.indptr[row + 1])
    }

    /// Position of `col` in `row`: `Ok(pos)` if stored, `Err(pos)` with the
    /// sorted insertion point otherwise.
    #[inline]
    pub fn find(&self, row: usize, col: usize) -> std::result::Result<usize, usize> {
        let (start, end) = self.row_bounds(row);
        self.indices[start..end]
            .binary_search(&col)
            .map(|p| start + p)
            .map_err(|p| start + p)
    }

    /// Stored `(col, value)` pairs of one row.
    pub fn row(&self, row: usize) -> impl Iterator<Item = (usize, &T)> + '_ {
        let (start, end) = self.row_bounds(row);
        self.indices[start..end]
            .iter()
            .copied()
            .zip(&self.data[start..end])
    }

    /// Insert `(col, value)` at `pos`, which must be the insertion point
    /// returned by [`CsrSlice::find`] for `row`.
    ///
    /// Shifts every later entry and bumps the pointers of all following rows.
    pub fn insert_at(&mut self, row: usize, pos: usize, col: usize, value: T) {
        debug_assert_eq!(self.find(row, col), Err(pos));
        self.indices.insert(pos, col);
        self.data.insert(pos, value);
        for p in &mut self.indptr[row + 1..] {
            *p += 1;
        }
    }

    /// Remove the entry at `pos` of `row` and return its value.
    pub fn remove_at(&mut self, row: usize, pos: usize) -> T {
        debug_assert!(pos >= self.indptr[row] && pos < self.indptr[row + 1]);
        self.indices.remove(pos);
        for p in &mut self.indptr[row + 1..] {
            *p -= 1;
        }
        self.data.remove(pos)
    }

    /// Drop every stored entry, keeping the row count.
    pub fn clear(&mut self) {
        self.indices.clear();
        self.data.clear();
        self.indptr.fill(0);
    }

    /// Assemble a slice without validation.
    #[inline]
    #[must_use]
    pub const fn from_parts_unchecked(indptr: Vec<usize>, indices: Vec<usize>, data: Vec<T>) -> Self {
        Self {
            indptr,
            indices,
            data,
        }
    }

    /// Assemble a slice, checking lengths and (when `check`) full CSR structure.
    ///
    /// # Errors
    /// `InvalidState` describing the first violated invariant.
    pub fn from_parts(
        nrows: usize,
        ncols: usize,
        indptr: Vec<usize>,
        indices: Vec<usize>,
        data: Vec<T>,
        check: bool,
    ) -> Result<Self> {
        if indptr.len() != nrows + 1 {
            return Err(Error::InvalidState("indptr length must be nrows + 1".into()));
        }
        if indices.len() != data.len() {
            return Err(Error::InvalidState(
                "indices and data must have equal length".into(),
            ));
        }
        let nnz = indices.len();
        if indptr.last().copied().unwrap_or(0) != nnz {
            return Err(Error::InvalidState("indptr last element must equal nnz".into()));
        }
        if indptr.first().copied().unwrap_or(0) != 0 {
            return Err(Error::InvalidState("indptr first element must be 0".into()));
        }
        if check {
            if indptr.windows(2).any(|w| w[0] > w[1]) {
                return Err(Error::InvalidState("indptr must be non-decreasing".into()));
            }
            for w in indptr.windows(2) {
                let mut prev: Option<usize> = None;
                for &j in &indices[w[0]..w[1]] {
                    if j >= ncols {
                        return Err(Error::InvalidState("column index out of bounds".into()));
                    }
                    if prev.is_some_and(|p| j <= p) {
                        return Err(Error::InvalidState(
                            "column indices must be strictly increasing within each row".into(),
                        ));
                    }
                    prev = Some(j);
                }
            }
        }
        Ok(Self {
            indptr,
            indices,
            data,
        })
    }
}
