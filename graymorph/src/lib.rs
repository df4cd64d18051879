//! Graymorph - Morphological attribute filters for Rust
//!
//! Graymorph implements the Salembier / Wilkinson-Roerdink family of
//! connected-component attribute operators on 8-bit grayscale images:
//!
//! - Attribute openings and closings over pluggable attributes
//!   (area, bounding-box squareness, fill ratio)
//! - Pattern spectra (granulometries) from the same max-tree build
//! - Grayscale geodesic reconstruction with h-domes and h-basins
//!
//! # Example
//!
//! ```
//! use graymorph::{GrayImage, filter::Area, filter::attribute_open};
//!
//! // Remove bright components smaller than 2 pixels.
//! let src = GrayImage::from_vec(3, 3, vec![0, 0, 0, 0, 255, 0, 0, 0, 0]).unwrap();
//! let out = attribute_open::<Area>(&src, 2, None);
//! assert_eq!(out.data(), &[0; 9]);
//! ```

// Re-export core types
pub use graymorph_core::*;

// The engine crates keep their own namespaces
pub use graymorph_filter as filter;
pub use graymorph_recon as recon;
