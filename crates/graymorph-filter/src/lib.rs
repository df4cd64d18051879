//! graymorph-filter - Connected-component attribute filters
//!
//! This crate provides the union-find attribute filter family for 8-bit
//! grayscale images:
//!
//! - **Attribute openings and closings** - remove bright (resp. dark)
//!   flat components whose shape attribute falls below a threshold
//! - **Pattern spectra** - granulometries recording area-weighted gray
//!   variation per attribute value, from the same tree construction
//! - **Segmentation helpers** - ultimate attribute estimation and the
//!   ultimate attribute closing
//!
//! # Examples
//!
//! ```
//! use graymorph_core::GrayImage;
//! use graymorph_filter::{attribute_open, Area};
//!
//! // An isolated bright pixel has area 1 and is removed at lambda 2.
//! let src = GrayImage::from_vec(3, 3, vec![0, 0, 0, 0, 255, 0, 0, 0, 0]).unwrap();
//! let out = attribute_open::<Area>(&src, 2, None);
//! assert_eq!(out.data(), &[0; 9]);
//! ```

pub mod attributes;
pub mod component;
pub mod filter;
pub mod segment;
pub mod spectrum;

// Re-export core types
pub use graymorph_core;

// Re-export attribute types
pub use attributes::{Area, Attribute, AttributeKind, EqualSideLength, FillRatio};

// Re-export component arena
pub use component::ComponentArena;

// Re-export filter entry points
pub use filter::{
    attribute_close, attribute_close_in_place, attribute_open, attribute_open_in_place,
    filter_close, filter_close_in_place, filter_open, filter_open_in_place,
};

// Re-export spectrum entry points and granulometry helpers
pub use spectrum::{
    attribute_spectrum_close, attribute_spectrum_open, fold_by_radius, pattern_spectrum_close,
    pattern_spectrum_open, to_area, to_radius,
};

// Re-export segmentation helpers
pub use segment::{granulometry, ultimate_attribute, ultimate_attribute_closing, DEFAULT_LAMBDA};
