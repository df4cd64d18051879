//! The grayscale image container
//!
//! `GrayImage` is the fundamental image type of this workspace: a
//! rectangular array of 8-bit samples, stored row-major with one byte
//! per pixel and no row padding.
//!
//! # Ownership model
//!
//! `GrayImage` uses `Arc` for efficient cloning (shared ownership).
//! To modify pixel data, convert to [`GrayImageMut`] via
//! [`GrayImage::try_into_mut`] or [`GrayImage::to_mut`], then convert
//! back with `Into<GrayImage>`. Exclusive access is thereby enforced
//! at compile time.

use crate::error::{Error, Result};
use std::sync::Arc;

/// Internal image data
#[derive(Debug)]
struct ImageData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Row-major sample buffer, one byte per pixel
    data: Vec<u8>,
}

impl ImageData {
    fn deep_clone(&self) -> Self {
        ImageData {
            width: self.width,
            height: self.height,
            data: self.data.clone(),
        }
    }
}

/// 8-bit single-channel image
///
/// Uses reference counting via `Arc` for cheap cloning; mutation goes
/// through [`GrayImageMut`].
///
/// # Examples
///
/// ```
/// use graymorph_core::GrayImage;
///
/// let img = GrayImage::new(640, 480).unwrap();
/// assert_eq!(img.width(), 640);
/// assert_eq!(img.height(), 480);
/// ```
#[derive(Debug, Clone)]
pub struct GrayImage {
    inner: Arc<ImageData>,
}

impl GrayImage {
    /// Create a new image with all samples set to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `width` or `height` is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let data = vec![0u8; (width as usize) * (height as usize)];
        Ok(GrayImage {
            inner: Arc::new(ImageData {
                width,
                height,
                data,
            }),
        })
    }

    /// Create an image from an existing row-major sample buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] for zero dimensions and
    /// [`Error::SizeMismatch`] if `data.len() != width * height`.
    pub fn from_vec(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let expected = (width as usize) * (height as usize);
        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(GrayImage {
            inner: Arc::new(ImageData {
                width,
                height,
                data,
            }),
        })
    }

    /// Create an image from raw sample data with an explicit depth.
    ///
    /// This is the entry point for untyped buffers. Only 8 bits per
    /// sample are representable by this container.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDepth`] unless `bits_per_sample == 8`,
    /// otherwise validates like [`GrayImage::from_vec`].
    pub fn from_raw(width: u32, height: u32, bits_per_sample: u32, data: Vec<u8>) -> Result<Self> {
        if bits_per_sample != 8 {
            return Err(Error::InvalidDepth(bits_per_sample));
        }
        Self::from_vec(width, height, data)
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get raw access to the sample buffer.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get the number of strong references to this image.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Get a pixel value at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.inner.width || y >= self.inner.height {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the computed index is outside the buffer.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u8 {
        self.inner.data[(y as usize) * (self.inner.width as usize) + x as usize]
    }

    /// Get a slice covering one row of samples.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let w = self.inner.width as usize;
        let start = (y as usize) * w;
        &self.inner.data[start..start + w]
    }

    /// Create a deep copy of this image.
    ///
    /// Unlike `clone()`, which shares data via `Arc`, this creates a
    /// completely independent copy.
    pub fn deep_clone(&self) -> Self {
        GrayImage {
            inner: Arc::new(self.inner.deep_clone()),
        }
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<GrayImageMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(GrayImageMut { inner: data }),
            Err(arc) => Err(GrayImage { inner: arc }),
        }
    }

    /// Create a mutable copy of this image.
    pub fn to_mut(&self) -> GrayImageMut {
        GrayImageMut {
            inner: self.inner.deep_clone(),
        }
    }
}

/// Mutable grayscale image
///
/// Allows modification of sample data. Convert back to an immutable
/// [`GrayImage`] using `Into<GrayImage>`.
#[derive(Debug)]
pub struct GrayImageMut {
    inner: ImageData,
}

impl GrayImageMut {
    /// Create a new zero-filled mutable image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `width` or `height` is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(GrayImage::new(width, height)?
            .try_into_mut()
            .unwrap_or_else(|img| img.to_mut()))
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get raw access to the sample buffer.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get mutable raw access to the sample buffer.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.inner.data
    }

    /// Get a pixel value at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.inner.width || y >= self.inner.height {
            return None;
        }
        Some(self.inner.data[(y as usize) * (self.inner.width as usize) + x as usize])
    }

    /// Set a pixel value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if the coordinates fall
    /// outside the image.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u8) -> Result<()> {
        if x >= self.inner.width {
            return Err(Error::IndexOutOfBounds {
                index: x as usize,
                len: self.inner.width as usize,
            });
        }
        if y >= self.inner.height {
            return Err(Error::IndexOutOfBounds {
                index: y as usize,
                len: self.inner.height as usize,
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the computed index is outside the buffer.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u8) {
        let w = self.inner.width as usize;
        self.inner.data[(y as usize) * w + x as usize] = val;
    }

    /// Get a mutable slice covering one row of samples.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let w = self.inner.width as usize;
        let start = (y as usize) * w;
        &mut self.inner.data[start..start + w]
    }

    /// Set all samples to the given value.
    pub fn fill(&mut self, val: u8) {
        self.inner.data.fill(val);
    }
}

impl From<GrayImageMut> for GrayImage {
    fn from(img: GrayImageMut) -> Self {
        GrayImage {
            inner: Arc::new(img.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creation() {
        let img = GrayImage::new(100, 200).unwrap();
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 200);
        assert_eq!(img.data().len(), 20_000);
        assert!(img.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_creation_invalid() {
        assert!(GrayImage::new(0, 100).is_err());
        assert!(GrayImage::new(100, 0).is_err());
    }

    #[test]
    fn test_from_vec() {
        let img = GrayImage::from_vec(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(img.get_pixel(0, 0), Some(1));
        assert_eq!(img.get_pixel(2, 1), Some(6));
        assert_eq!(img.get_pixel(3, 0), None);

        assert!(GrayImage::from_vec(3, 2, vec![0; 5]).is_err());
    }

    #[test]
    fn test_from_raw_depth() {
        assert!(GrayImage::from_raw(2, 2, 8, vec![0; 4]).is_ok());
        assert!(matches!(
            GrayImage::from_raw(2, 2, 16, vec![0; 4]),
            Err(Error::InvalidDepth(16))
        ));
    }

    #[test]
    fn test_clone_shares_data() {
        let img1 = GrayImage::new(10, 10).unwrap();
        let img2 = img1.clone();

        assert_eq!(img1.ref_count(), 2);
        assert_eq!(img2.ref_count(), 2);
        assert_eq!(img1.data().as_ptr(), img2.data().as_ptr());
    }

    #[test]
    fn test_deep_clone() {
        let img1 = GrayImage::new(10, 10).unwrap();
        let img2 = img1.deep_clone();

        assert_eq!(img1.ref_count(), 1);
        assert_eq!(img2.ref_count(), 1);
        assert_ne!(img1.data().as_ptr(), img2.data().as_ptr());
    }

    #[test]
    fn test_mutation_roundtrip() {
        let img = GrayImage::new(4, 4).unwrap();
        let mut img_mut = img.try_into_mut().unwrap();

        img_mut.set_pixel(1, 2, 200).unwrap();
        assert!(img_mut.set_pixel(4, 0, 1).is_err());
        img_mut.row_mut(0).fill(7);

        let img: GrayImage = img_mut.into();
        assert_eq!(img.get_pixel(1, 2), Some(200));
        assert_eq!(img.row(0), &[7, 7, 7, 7]);
    }

    #[test]
    fn test_try_into_mut_fails_when_shared() {
        let img1 = GrayImage::new(4, 4).unwrap();
        let _img2 = img1.clone();
        assert!(img1.try_into_mut().is_err());
    }
}
