//! Error types for graymorph-recon

use thiserror::Error;

/// Errors that can occur during grayscale reconstruction
#[derive(Debug, Error)]
pub enum ReconError {
    /// Marker and mask have different dimensions
    #[error("shape mismatch: marker {}x{}, mask {}x{}", .marker.0, .marker.1, .mask.0, .mask.1)]
    ShapeMismatch {
        marker: (u32, u32),
        mask: (u32, u32),
    },

    /// The marker rises above the mask somewhere
    #[error("marker exceeds mask at ({x}, {y}): {marker} > {mask}")]
    MarkerExceedsMask { x: u32, y: u32, marker: u8, mask: u8 },
}

/// Result type for reconstruction operations
pub type ReconResult<T> = Result<T, ReconError>;
