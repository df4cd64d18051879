//! Error types for graymorph-core
//!
//! Provides a unified error type for the image container and its
//! arithmetic operations. Each variant captures enough context for
//! diagnostics without exposing internal representation details.

use thiserror::Error;

/// Graymorph core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Invalid sample depth
    #[error("invalid sample depth: {0} bits (only 8-bit grayscale is supported)")]
    InvalidDepth(u32),

    /// Buffer length does not match the image dimensions
    #[error("buffer size mismatch: expected {expected} samples, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Image dimension mismatch between two operands
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
}

/// Result type alias for graymorph-core operations
pub type Result<T> = std::result::Result<T, Error>;
