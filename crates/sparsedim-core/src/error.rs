//! Error types for sparsedim

use thiserror::Error;

/// Result type alias using sparsedim's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Contract violations detected by the storage engine and the kernels.
///
/// All variants are raised synchronously at the call that detects them and
/// are never retried internally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A shape component is zero, too few dimensions were given, or the
    /// operands of a binary operation have different shapes.
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// A coordinate component lies outside `[0, dim)` or the coordinate has
    /// the wrong number of components.
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    /// Internal storage no longer matches the shape (slice count or CSR
    /// structure).
    #[error("Invalid state: {0}")]
    InvalidState(String),
}
