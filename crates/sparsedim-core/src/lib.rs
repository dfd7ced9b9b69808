//! Core data structures for sparsedim (pure Rust)
//!
//! A [`SparseNd`] stores only the elements that differ from a declared
//! default. The last two dimensions form compressed-sparse-row slices; all
//! leading dimensions are flattened into a slice index.

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod array;
pub mod csr;
pub mod element;
pub mod error;
pub mod fmt;
pub mod matrix;
pub mod range;
pub mod shape;

pub use array::SparseNd;
pub use csr::CsrSlice;
pub use element::Element;
pub use error::{Error, Result};
pub use fmt::Stored;
pub use matrix::SparseMatrix;
pub use range::{CoordIter, CoordRange};
pub use shape::Shape;
