//! graymorph-recon - Grayscale geodesic reconstruction
//!
//! This crate provides the reconstruction family of operators for 8-bit
//! grayscale images:
//!
//! - **Reconstruction by dilation** - a marker image grows under the
//!   pointwise upper bound of a mask until a fixed point is reached,
//!   in sequential, FIFO-queue, hybrid and row-parallel variants
//! - **h-domes / h-basins** - regional maxima (resp. minima) limited to
//!   a contrast `h`, derived from the hybrid reconstruction
//!
//! # Examples
//!
//! ```
//! use graymorph_core::GrayImage;
//! use graymorph_recon::hybrid_reconstruct;
//!
//! let mask = GrayImage::from_vec(3, 3, vec![9; 9]).unwrap();
//! let mut marker = mask.to_mut();
//! marker.data_mut().fill(0);
//! marker.set_pixel(1, 1, 9).unwrap();
//!
//! let out = hybrid_reconstruct(&marker.into(), &mask).unwrap();
//! assert_eq!(out.get_pixel(1, 1), Some(9));
//! ```

mod domes;
mod error;
mod reconstruct;

pub use domes::{h_basins, h_domes};
pub use error::{ReconError, ReconResult};
pub use reconstruct::{
    hybrid_reconstruct, parallel_reconstruct, queue_reconstruct, reconstruct,
    sequential_reconstruct, ReconstructionVariant,
};
