//! Textual rendering of sparse arrays

use crate::array::SparseNd;
use crate::element::Element;
use std::fmt;

/// Header line, then one block per slice: the leading coordinates (omitted
/// for 2D arrays) followed by one line of space-separated values per row.
impl<T: Element> fmt::Display for SparseNd<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "SparseNd(shape={}, default={})",
            self.shape(),
            self.default_value()
        )?;
        let range = self.coords().map_err(|_| fmt::Error)?;
        let ncols = self.shape().ncols();
        let nrows = self.shape().nrows();
        for coords in &range {
            let n = coords.len();
            let (row, col) = (coords[n - 2], coords[n - 1]);
            if row == 0 && col == 0 && n > 2 {
                let lead: Vec<String> = coords[..n - 2].iter().map(ToString::to_string).collect();
                writeln!(f, "[{}, :, :]", lead.join(", "))?;
            }
            let value = self.get(&coords).map_err(|_| fmt::Error)?;
            if col + 1 == ncols {
                writeln!(f, "{value}")?;
                if row + 1 == nrows && n > 2 {
                    writeln!(f)?;
                }
            } else {
                write!(f, "{value} ")?;
            }
        }
        Ok(())
    }
}

/// Render only the stored entries, one `coords = value` per line.
pub struct Stored<'a, T>(pub &'a SparseNd<T>);

impl<T: Element> fmt::Display for Stored<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (coords, v) in self.0.iter_stored() {
            writeln!(f, "{coords:?} = {v}")?;
        }
        Ok(())
    }
}
