//! Half-open N-dimensional coordinate ranges
//!
//! A [`CoordRange`] only describes the box; every call to [`CoordRange::iter`]
//! hands out an independent [`CoordIter`] cursor, so nested or repeated
//! traversals of the same range never share state.

use crate::error::{Error, Result};
use std::iter::FusedIterator;

/// Box `[start, end)` over N axes, traversed in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoordRange {
    start: Vec<usize>,
    end: Vec<usize>,
    len: usize,
}

impl CoordRange {
    /// Range from the origin to `end` (exclusive).
    ///
    /// # Errors
    /// `InvalidDimensions` if `end` is empty or has a zero component.
    pub fn new(end: impl Into<Vec<usize>>) -> Result<Self> {
        let end = end.into();
        Self::with_start(vec![0usize; end.len()], end)
    }

    /// Range from `start` (inclusive) to `end` (exclusive).
    ///
    /// # Errors
    /// `InvalidDimensions` if the bounds differ in length or are empty, if
    /// any axis has `end <= start`, or if the coordinate count overflows
    /// `usize`.
    pub fn with_start(start: impl Into<Vec<usize>>, end: impl Into<Vec<usize>>) -> Result<Self> {
        let start = start.into();
        let end = end.into();
        if start.len() != end.len() {
            return Err(Error::InvalidDimensions(format!(
                "range bounds differ in length: {} vs {}",
                start.len(),
                end.len()
            )));
        }
        if end.is_empty() {
            return Err(Error::InvalidDimensions("range must have at least one axis".into()));
        }
        if let Some(axis) = start.iter().zip(&end).position(|(s, e)| e <= s) {
            return Err(Error::InvalidDimensions(format!(
                "empty range on axis {axis}: [{}, {})",
                start[axis], end[axis]
            )));
        }
        let len = start
            .iter()
            .zip(&end)
            .try_fold(1usize, |acc, (s, e)| acc.checked_mul(e - s))
            .ok_or_else(|| {
                Error::InvalidDimensions(format!("range [{start:?}, {end:?}) overflows usize"))
            })?;
        Ok(Self { start, end, len })
    }

    #[inline]
    #[must_use]
    pub fn start(&self) -> &[usize] {
        &self.start
    }

    #[inline]
    #[must_use]
    pub fn end(&self) -> &[usize] {
        &self.end
    }

    /// Number of coordinates in the box.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Validated ranges are never empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Fresh cursor positioned at `start`.
    #[must_use]
    pub fn iter(&self) -> CoordIter<'_> {
        CoordIter {
            range: self,
            next: Some(self.start.clone()),
            remaining: self.len,
        }
    }
}

impl<'a> IntoIterator for &'a CoordRange {
    type Item = Vec<usize>;
    type IntoIter = CoordIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Row-major cursor over a [`CoordRange`]; the last axis varies fastest.
#[derive(Debug, Clone)]
pub struct CoordIter<'a> {
    range: &'a CoordRange,
    next: Option<Vec<usize>>,
    remaining: usize,
}

impl CoordIter<'_> {
    /// Odometer step; `None` once every axis has wrapped.
    fn successor(&self, cur: &[usize]) -> Option<Vec<usize>> {
        let mut out = cur.to_vec();
        for axis in (0..out.len()).rev() {
            out[axis] += 1;
            if out[axis] < self.range.end[axis] {
                return Some(out);
            }
            out[axis] = self.range.start[axis];
        }
        None
    }
}

impl Iterator for CoordIter<'_> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.next.take()?;
        self.next = self.successor(&cur);
        self.remaining -= 1;
        Some(cur)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for CoordIter<'_> {}

impl FusedIterator for CoordIter<'_> {}
