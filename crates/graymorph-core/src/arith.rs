//! Pixel-wise arithmetic
//!
//! This module provides the arithmetic the morphological engines are
//! built on: constant offsets, image subtraction, inversion and the
//! sample sum used as a fixed-point witness. All operations saturate
//! at the bounds of the 8-bit range.

use crate::error::{Error, Result};
use crate::image::{GrayImage, GrayImageMut};

impl GrayImage {
    /// Add a constant value to all samples, clamped to `[0, 255]`.
    ///
    /// A negative `val` performs a saturating subtraction, which is how
    /// the marker image `src - h` of the h-dome transform is produced.
    ///
    /// # Examples
    ///
    /// ```
    /// use graymorph_core::GrayImage;
    ///
    /// let img = GrayImage::from_vec(2, 1, vec![10, 250]).unwrap();
    /// assert_eq!(img.add_constant(20).data(), &[30, 255]);
    /// assert_eq!(img.add_constant(-20).data(), &[0, 230]);
    /// ```
    pub fn add_constant(&self, val: i32) -> GrayImage {
        let mut out = self.to_mut();
        out.add_constant_in_place(val);
        out.into()
    }

    /// Subtract another image sample-wise: `self - other`, clamped at 0.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the images differ in shape.
    pub fn arith_subtract(&self, other: &GrayImage) -> Result<GrayImage> {
        if self.width() != other.width() || self.height() != other.height() {
            return Err(Error::DimensionMismatch {
                expected: (self.width(), self.height()),
                actual: (other.width(), other.height()),
            });
        }
        let mut out = self.to_mut();
        for (dst, &src) in out.data_mut().iter_mut().zip(other.data()) {
            *dst = dst.saturating_sub(src);
        }
        Ok(out.into())
    }

    /// Return the negative of this image: every sample becomes `255 - v`.
    pub fn invert(&self) -> GrayImage {
        let mut out = self.to_mut();
        out.invert_in_place();
        out.into()
    }

    /// Sum of all samples.
    ///
    /// Used by the reconstruction engines to detect a fixed point: the
    /// sum grows monotonically under reconstruction, so an unchanged
    /// sum means an unchanged image.
    pub fn sum(&self) -> u64 {
        self.data().iter().map(|&v| v as u64).sum()
    }

    /// Check whether two images have identical shape and samples.
    pub fn equals(&self, other: &GrayImage) -> bool {
        self.width() == other.width()
            && self.height() == other.height()
            && self.data() == other.data()
    }
}

impl GrayImageMut {
    /// Add a constant value to all samples in place, clamped to `[0, 255]`.
    pub fn add_constant_in_place(&mut self, val: i32) {
        for v in self.data_mut() {
            *v = (*v as i32 + val).clamp(0, 255) as u8;
        }
    }

    /// Negate the image in place: every sample becomes `255 - v`.
    pub fn invert_in_place(&mut self) {
        for v in self.data_mut() {
            *v = 255 - *v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_constant_clamps() {
        let img = GrayImage::from_vec(3, 1, vec![0, 100, 240]).unwrap();
        assert_eq!(img.add_constant(30).data(), &[30, 130, 255]);
        assert_eq!(img.add_constant(-120).data(), &[0, 0, 120]);
    }

    #[test]
    fn test_subtract_saturates() {
        let a = GrayImage::from_vec(2, 2, vec![10, 200, 50, 50]).unwrap();
        let b = GrayImage::from_vec(2, 2, vec![20, 60, 50, 0]).unwrap();
        let diff = a.arith_subtract(&b).unwrap();
        assert_eq!(diff.data(), &[0, 140, 0, 50]);
    }

    #[test]
    fn test_subtract_shape_mismatch() {
        let a = GrayImage::new(2, 2).unwrap();
        let b = GrayImage::new(3, 2).unwrap();
        assert!(a.arith_subtract(&b).is_err());
    }

    #[test]
    fn test_invert_involution() {
        let img = GrayImage::from_vec(2, 2, vec![0, 7, 128, 255]).unwrap();
        let inv = img.invert();
        assert_eq!(inv.data(), &[255, 248, 127, 0]);
        assert!(inv.invert().equals(&img));
    }

    #[test]
    fn test_invert_in_place_covers_every_row() {
        let mut img = GrayImageMut::new(3, 3).unwrap();
        img.fill(10);
        img.invert_in_place();
        assert!(img.data().iter().all(|&v| v == 245));
    }

    #[test]
    fn test_sum() {
        let img = GrayImage::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(img.sum(), 10);
    }
}
