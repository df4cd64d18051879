//! Pattern spectra (granulometries)
//!
//! The pattern spectrum instruments the max-tree construction instead
//! of resolving it: every time a component is united into a darker
//! neighbour, the gray drop times the component size is credited to the
//! spectrum bin addressed by the component's attribute value. The
//! result is the distribution of area-weighted gray variation over
//! attribute values, computed in a single filter build.

use crate::attributes::{Area, Attribute, AttributeKind, EqualSideLength, FillRatio};
use crate::component::ComponentArena;
use crate::filter::{build_tree, sorted_order};
use graymorph_core::GrayImage;

/// Number of spectrum bins for an attribute at a given threshold.
///
/// Credits are only recorded while the component attribute is below
/// `lambda`, so unbounded attributes need exactly `lambda` bins. An
/// attribute with a bounded projection can produce values up to its
/// bound on level unions regardless of `lambda`, so its spectrum covers
/// the full bounded range as well.
fn bin_count<A: Attribute>(lambda: u32) -> usize {
    match A::VALUE_BOUND {
        Some(bound) => lambda.max(bound + 1) as usize,
        None => lambda as usize,
    }
}

/// Pattern spectrum via attribute opening.
///
/// Components larger than `max_size` pixels neither receive credits nor
/// disqualify their ancestors; `max_size` defaults to a fifth of the
/// image area. `lambda == 0` yields an empty spectrum.
pub fn attribute_spectrum_open<A: Attribute>(
    src: &GrayImage,
    lambda: u32,
    max_size: Option<usize>,
) -> Vec<u64> {
    if lambda == 0 {
        return Vec::new();
    }

    let width = src.width();
    let height = src.height();
    let max_size = max_size.unwrap_or((width as usize) * (height as usize) / 5);

    let mut spectrum = vec![0u64; bin_count::<A>(lambda)];
    let data = src.data();

    let mut arena = ComponentArena::<A>::new(width, height);
    let order = sorted_order(data);

    build_tree(data, width, height, &order, |n, c| {
        let root = arena.find_root(n);
        // The current pixel has not been united downward yet.
        debug_assert_eq!(arena.parent(c), c);

        if root == c || arena.size(root) as usize > max_size {
            return;
        }

        // A level union drops zero gray and earns no credit; otherwise
        // the component must still be active. The attribute value is
        // read before the merge.
        let gray_drop = (data[root as usize] - data[c as usize]) as u64;
        if gray_drop > 0 && arena.is_active(root, lambda) {
            let value = arena.attribute(root).value() as usize;
            spectrum[value] += gray_drop * arena.size(root) as u64;
        }

        arena.set_parent(root, c);
    });

    spectrum
}

/// Pattern spectrum via attribute closing: the spectrum of the negative.
pub fn attribute_spectrum_close<A: Attribute>(
    src: &GrayImage,
    lambda: u32,
    max_size: Option<usize>,
) -> Vec<u64> {
    attribute_spectrum_open::<A>(&src.invert(), lambda, max_size)
}

/// Opening pattern spectrum with the attribute chosen at run time.
pub fn pattern_spectrum_open(
    src: &GrayImage,
    lambda: u32,
    kind: AttributeKind,
    max_size: Option<usize>,
) -> Vec<u64> {
    match kind {
        AttributeKind::Area => attribute_spectrum_open::<Area>(src, lambda, max_size),
        AttributeKind::EqualSideLength => {
            attribute_spectrum_open::<EqualSideLength>(src, lambda, max_size)
        }
        AttributeKind::FillRatio => attribute_spectrum_open::<FillRatio>(src, lambda, max_size),
    }
}

/// Closing pattern spectrum with the attribute chosen at run time.
pub fn pattern_spectrum_close(
    src: &GrayImage,
    lambda: u32,
    kind: AttributeKind,
    max_size: Option<usize>,
) -> Vec<u64> {
    pattern_spectrum_open(&src.invert(), lambda, kind, max_size)
}

/// Radius of the disc with the given area, rounded to nearest.
pub fn to_radius(area: u32) -> u32 {
    ((area as f64 / std::f64::consts::PI).sqrt() + 0.5) as u32
}

/// Area of the disc with the given radius, rounded to nearest.
pub fn to_area(radius: u32) -> u32 {
    (std::f64::consts::PI * (radius as f64) * (radius as f64) + 0.5) as u32
}

/// Collapse an area-indexed spectrum into radius bins.
///
/// Consecutive area bins mapping to the same disc radius are summed
/// into one bin, which makes area granulometries comparable across
/// scales when displayed.
pub fn fold_by_radius(spectrum: &[u64]) -> Vec<u64> {
    let mut folded: Vec<u64> = Vec::new();
    let mut last_radius = None;

    for (area, &credit) in spectrum.iter().enumerate() {
        let radius = to_radius(area as u32);
        if last_radius != Some(radius) {
            last_radius = Some(radius);
            folded.push(0);
        }
        *folded
            .last_mut()
            .expect("bin pushed for the current radius") += credit;
    }

    folded
}
