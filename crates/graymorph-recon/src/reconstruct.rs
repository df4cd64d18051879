//! Grayscale geodesic reconstruction
//!
//! Grey-scale reconstruction algorithms implemented after
//!
//! L. Vincent, "Morphological grayscale reconstruction in image
//! analysis: applications and efficient algorithms", IEEE Transactions
//! on Image Processing, 1993.
//!
//! A marker image is iteratively dilated under the pointwise upper
//! bound of a mask image until a fixed point is reached. Four variants
//! share the same result: plain raster sweeps, a FIFO queue, the hybrid
//! of the two, and a row-parallel dilation loop.
//!
//! All variants use centred 3x3 neighbourhoods without a wrap or
//! reflection rule, so the one-pixel margin of the output is never
//! written and keeps its marker values. Callers pad their images when
//! edge pixels matter.

use crate::error::{ReconError, ReconResult};
use graymorph_core::GrayImage;
use rayon::prelude::*;
use std::collections::VecDeque;

/// Which reconstruction algorithm to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconstructionVariant {
    /// Alternating raster / anti-raster sweeps until stable
    Sequential,
    /// FIFO propagation from the marker boundaries
    Queue,
    /// One sweep pair, then FIFO cleanup (recommended default)
    Hybrid,
    /// Row-parallel dilation under the mask until stable
    Parallel,
}

/// Check the reconstruction preconditions.
///
/// Errors are raised before any output is allocated, so a failing call
/// never observes partial writes.
fn validate(marker: &GrayImage, mask: &GrayImage) -> ReconResult<()> {
    if marker.width() != mask.width() || marker.height() != mask.height() {
        return Err(ReconError::ShapeMismatch {
            marker: (marker.width(), marker.height()),
            mask: (mask.width(), mask.height()),
        });
    }

    let w = marker.width();
    for (idx, (&m, &k)) in marker.data().iter().zip(mask.data()).enumerate() {
        if m > k {
            return Err(ReconError::MarkerExceedsMask {
                x: idx as u32 % w,
                y: idx as u32 / w,
                marker: m,
                mask: k,
            });
        }
    }
    Ok(())
}

#[inline]
fn image_sum(data: &[u8]) -> u64 {
    data.iter().map(|&v| v as u64).sum()
}

/// One reconstruction sweep in raster direction.
///
/// The causal neighbours of `(x, y)` are the four pixels already
/// visited in this sweep: `(x-1, y)`, `(x-1, y-1)`, `(x, y-1)` and
/// `(x+1, y-1)`.
fn raster_pass(mask: &[u8], j: &mut [u8], w: usize, h: usize) {
    for y in 1..h.saturating_sub(1) {
        for x in 1..w - 1 {
            let idx = y * w + x;
            let causal = j[idx - 1]
                .max(j[idx - w - 1])
                .max(j[idx - w])
                .max(j[idx - w + 1]);
            j[idx] = j[idx].max(causal).min(mask[idx]);
        }
    }
}

/// One reconstruction sweep in anti-raster direction; mirrors
/// [`raster_pass`].
fn anti_raster_pass(mask: &[u8], j: &mut [u8], w: usize, h: usize) {
    for y in (1..h.saturating_sub(1)).rev() {
        for x in (1..w - 1).rev() {
            let idx = y * w + x;
            let causal = j[idx + 1]
                .max(j[idx + w - 1])
                .max(j[idx + w])
                .max(j[idx + w + 1]);
            j[idx] = j[idx].max(causal).min(mask[idx]);
        }
    }
}

/// True if any 8-neighbour of the interior pixel `idx` is zero.
#[inline]
fn is_boundary(j: &[u8], w: usize, idx: usize) -> bool {
    j[idx - w - 1] == 0
        || j[idx - w] == 0
        || j[idx - w + 1] == 0
        || j[idx - 1] == 0
        || j[idx + 1] == 0
        || j[idx + w - 1] == 0
        || j[idx + w] == 0
        || j[idx + w + 1] == 0
}

/// FIFO propagation phase.
///
/// Seeds the queue with every interior pixel of `j` that is positive
/// and touches a zero 8-neighbour, then propagates values outward until
/// the queue drains. Neighbour updates stay within the interior.
fn queue_phase(mask: &[u8], j: &mut [u8], w: usize, h: usize) {
    if w < 3 || h < 3 {
        return;
    }

    let mut fifo: VecDeque<(usize, usize)> = VecDeque::new();
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let idx = y * w + x;
            if j[idx] > 0 && is_boundary(j, w, idx) {
                fifo.push_back((x, y));
            }
        }
    }

    while let Some((x, y)) = fifo.pop_front() {
        let p = y * w + x;
        let value = j[p];

        for ny in (y - 1).max(1)..=(y + 1).min(h - 2) {
            for nx in (x - 1).max(1)..=(x + 1).min(w - 2) {
                let q = ny * w + nx;
                if q == p {
                    continue;
                }
                if j[q] < value && j[q] != mask[q] {
                    j[q] = value.min(mask[q]);
                    fifo.push_back((nx, ny));
                }
            }
        }
    }
}

/// Sequential grey-scale reconstruction.
///
/// Scans back and forth over the image until an entire sweep pair
/// leaves the sample sum unchanged.
///
/// # Errors
///
/// [`ReconError::ShapeMismatch`] or [`ReconError::MarkerExceedsMask`]
/// when the inputs violate the preconditions.
pub fn sequential_reconstruct(marker: &GrayImage, mask: &GrayImage) -> ReconResult<GrayImage> {
    validate(marker, mask)?;

    let w = marker.width() as usize;
    let h = marker.height() as usize;
    let mask_data = mask.data();
    let mut out = marker.to_mut();

    loop {
        let before = image_sum(out.data());
        raster_pass(mask_data, out.data_mut(), w, h);
        anti_raster_pass(mask_data, out.data_mut(), w, h);
        if image_sum(out.data()) == before {
            break;
        }
    }

    Ok(out.into())
}

/// FIFO-queue grey-scale reconstruction.
///
/// Propagates from the marker boundaries instead of scanning the whole
/// image; terminates when the queue is empty.
///
/// # Errors
///
/// Same preconditions as [`sequential_reconstruct`].
pub fn queue_reconstruct(marker: &GrayImage, mask: &GrayImage) -> ReconResult<GrayImage> {
    validate(marker, mask)?;

    let w = marker.width() as usize;
    let h = marker.height() as usize;
    let mut out = marker.to_mut();
    queue_phase(mask.data(), out.data_mut(), w, h);

    Ok(out.into())
}

/// Hybrid reconstruction without precondition checks. Shared with the
/// h-dome transform, whose marker satisfies the preconditions by
/// construction.
pub(crate) fn hybrid_impl(marker: &GrayImage, mask: &GrayImage) -> GrayImage {
    let w = marker.width() as usize;
    let h = marker.height() as usize;
    let mask_data = mask.data();
    let mut out = marker.to_mut();

    raster_pass(mask_data, out.data_mut(), w, h);
    anti_raster_pass(mask_data, out.data_mut(), w, h);
    queue_phase(mask_data, out.data_mut(), w, h);

    out.into()
}

/// Hybrid grey-scale reconstruction.
///
/// One raster and one anti-raster sweep do the bulk of the work, a FIFO
/// phase cleans up what the sweeps missed. The recommended default.
///
/// # Errors
///
/// Same preconditions as [`sequential_reconstruct`].
pub fn hybrid_reconstruct(marker: &GrayImage, mask: &GrayImage) -> ReconResult<GrayImage> {
    validate(marker, mask)?;
    Ok(hybrid_impl(marker, mask))
}

/// Row-parallel grey-scale reconstruction.
///
/// Each iteration dilates the working image with a full 3x3
/// neighbourhood and clips it under the mask; both substeps run
/// parallel over rows, the outer fixed-point loop stays serial and
/// observes both substeps completed.
///
/// # Errors
///
/// Same preconditions as [`sequential_reconstruct`].
pub fn parallel_reconstruct(marker: &GrayImage, mask: &GrayImage) -> ReconResult<GrayImage> {
    validate(marker, mask)?;

    let w = marker.width() as usize;
    let h = marker.height() as usize;
    let mask_data = mask.data();
    let mut out = marker.to_mut();
    let mut scratch = vec![0u8; w * h];

    loop {
        let before = image_sum(out.data());

        // Dilation step
        let j = out.data();
        scratch.par_chunks_mut(w).enumerate().for_each(|(y, row)| {
            if y == 0 || y + 1 >= h {
                return;
            }
            let above = &j[(y - 1) * w..y * w];
            let mid = &j[y * w..(y + 1) * w];
            let below = &j[(y + 1) * w..(y + 2) * w];
            for x in 1..w - 1 {
                row[x] = mid[x]
                    .max(above[x - 1])
                    .max(above[x])
                    .max(above[x + 1])
                    .max(mid[x - 1])
                    .max(mid[x + 1])
                    .max(below[x - 1])
                    .max(below[x])
                    .max(below[x + 1]);
            }
        });

        // Point-wise minimum with the mask
        let dilated = &scratch;
        out.data_mut()
            .par_chunks_mut(w)
            .enumerate()
            .for_each(|(y, row)| {
                if y == 0 || y + 1 >= h {
                    return;
                }
                let drow = &dilated[y * w..(y + 1) * w];
                let mrow = &mask_data[y * w..(y + 1) * w];
                for x in 1..w - 1 {
                    row[x] = drow[x].min(mrow[x]);
                }
            });

        if image_sum(out.data()) == before {
            break;
        }
    }

    Ok(out.into())
}

/// Run the reconstruction variant chosen at run time.
///
/// # Errors
///
/// Same preconditions as [`sequential_reconstruct`].
pub fn reconstruct(
    marker: &GrayImage,
    mask: &GrayImage,
    variant: ReconstructionVariant,
) -> ReconResult<GrayImage> {
    match variant {
        ReconstructionVariant::Sequential => sequential_reconstruct(marker, mask),
        ReconstructionVariant::Queue => queue_reconstruct(marker, mask),
        ReconstructionVariant::Hybrid => hybrid_reconstruct(marker, mask),
        ReconstructionVariant::Parallel => parallel_reconstruct(marker, mask),
    }
}
