//! graymorph-core - Image container for the graymorph workspace
//!
//! This crate provides the 8-bit grayscale image type that the filter
//! and reconstruction engines operate on:
//!
//! - [`GrayImage`] - immutable, `Arc`-shared image
//! - [`GrayImageMut`] - exclusively owned, mutable image
//! - Pixel arithmetic: constant offsets, subtraction, inversion, sums
//!
//! # Examples
//!
//! ```
//! use graymorph_core::GrayImage;
//!
//! let img = GrayImage::from_vec(2, 2, vec![0, 64, 128, 255]).unwrap();
//! let inverted = img.invert();
//! assert_eq!(inverted.data(), &[255, 191, 127, 0]);
//! ```

mod arith;
mod error;
mod image;

pub use error::{Error, Result};
pub use image::{GrayImage, GrayImageMut};
