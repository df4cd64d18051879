//! h-domes and h-basins
//!
//! A regional maximum that rises at least `h` gray levels above its
//! surround survives the reconstruction of `src - h` under `src` with
//! its top `h` levels cut off; subtracting the reconstruction from the
//! source leaves exactly those domes. Basins are domes of the negative.

use crate::reconstruct::hybrid_impl;
use graymorph_core::GrayImage;

/// Extract the h-domes (regional maxima of contrast at least `h`).
///
/// Computed as `src - hybrid_reconstruct(src - h, src)` with saturating
/// subtraction. The one-pixel margin inherits the reconstruction's
/// margin convention and reports the raw offset `h`; pad the input if
/// edge pixels matter.
pub fn h_domes(src: &GrayImage, h: u8) -> GrayImage {
    let marker = src.add_constant(-(h as i32));
    let reconstructed = hybrid_impl(&marker, src);
    src.arith_subtract(&reconstructed)
        .expect("reconstruction preserves the image shape")
}

/// Extract the h-basins (regional minima of contrast at least `h`).
pub fn h_basins(src: &GrayImage, h: u8) -> GrayImage {
    h_domes(&src.invert(), h)
}
