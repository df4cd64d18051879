//! The union-find attribute filter
//!
//! Implemented after
//!
//! M. H. F. Wilkinson & J. B. T. M. Roerdink (2000):
//! "Fast Morphological Attribute Operations Using Tarjan's Union-Find
//! Algorithm". In Proceedings of the ISMM2000, pp. 311-320.
//!
//! A. Meijster & M. H. F. Wilkinson (2002):
//! "A comparison of algorithms for connected set openings and
//! closings". IEEE PAMI, 24(4):484-494.
//!
//! # Algorithm
//!
//! Pixels are visited brightest first (scan-line order within a gray
//! level) and united with their already visited 8-neighbours, building
//! the max-tree of the image with a disjoint-set forest. A component
//! stops being united upward once its attribute reaches the threshold;
//! a reverse scan then demotes every remaining non-root pixel to its
//! parent's gray value. Closing is opening on the negative.

use crate::attributes::{Area, Attribute, AttributeKind, EqualSideLength, FillRatio};
use crate::component::ComponentArena;
use graymorph_core::{GrayImage, GrayImageMut};

/// Permutation of pixel indices: brightest first, ties broken by
/// scan-line order. This fixes the canonical root of every flat zone.
pub(crate) fn sorted_order(data: &[u8]) -> Vec<u32> {
    let mut order: Vec<u32> = (0..data.len() as u32).collect();
    order.sort_unstable_by(|&a, &b| data[b as usize].cmp(&data[a as usize]).then(a.cmp(&b)));
    order
}

/// Drive the max-tree construction, calling `unite(neighbor, current)`
/// for every grid neighbour that was processed before the current
/// pixel under the node ordering.
pub(crate) fn build_tree<F>(data: &[u8], width: u32, height: u32, order: &[u32], mut unite: F)
where
    F: FnMut(u32, u32),
{
    let w = width as usize;
    let h = height as usize;

    for &c in order {
        let cx = (c as usize) % w;
        let cy = (c as usize) / w;
        let gray_c = data[c as usize];

        let x_lower = cx.saturating_sub(1);
        let x_upper = (cx + 1).min(w - 1);
        let y_lower = cy.saturating_sub(1);
        let y_upper = (cy + 1).min(h - 1);

        for y in y_lower..=y_upper {
            for x in x_lower..=x_upper {
                let n = (y * w + x) as u32;
                let gray_n = data[n as usize];

                // Unite if the neighbour is brighter, or level with the
                // current pixel but earlier in scan-line order. Either
                // way the neighbour has been processed already.
                if gray_n > gray_c || (gray_n == gray_c && n < c) {
                    unite(n, c);
                }
            }
        }
    }
}

/// Attribute opening, in place.
///
/// Every bright component whose attribute stays below `lambda` is
/// demoted to the gray value of the enclosing component at which the
/// attribute first reaches `lambda`. `lambda == 0` leaves the image
/// unchanged.
///
/// If a collector is supplied it receives the attribute instance of
/// every root of the final tree.
pub fn attribute_open_in_place<A: Attribute>(
    img: &mut GrayImageMut,
    lambda: u32,
    mut attributes: Option<&mut Vec<A>>,
) {
    if lambda == 0 {
        return;
    }

    let width = img.width();
    let height = img.height();
    let data = img.data_mut();

    let mut arena = ComponentArena::<A>::new(width, height);
    let order = sorted_order(data);

    build_tree(data, width, height, &order, |n, c| {
        let root = arena.find_root(n);
        // Same root means neighbour and current are already one set.
        if root == c {
            return;
        }

        if data[root as usize] == data[c as usize] || arena.is_active(root, lambda) {
            arena.set_parent(root, c);
        } else {
            // The neighbouring component sealed at a brighter level;
            // the current pixel adopts its parent's gray on resolve.
            arena.deactivate(c);
        }
    });

    // Resolve: walk darkest first so that demotions cascade from each
    // root down through its descendants.
    for &n in order.iter().rev() {
        let parent = arena.parent(n);
        if parent != n {
            data[n as usize] = data[parent as usize];
        } else if let Some(collector) = attributes.as_deref_mut() {
            collector.push(arena.attribute(n));
        }
    }
}

/// Attribute opening, returning a new image.
pub fn attribute_open<A: Attribute>(
    src: &GrayImage,
    lambda: u32,
    attributes: Option<&mut Vec<A>>,
) -> GrayImage {
    let mut dst = src.to_mut();
    attribute_open_in_place(&mut dst, lambda, attributes);
    dst.into()
}

/// Attribute closing, in place: the dual of the opening via negation.
///
/// Dark components whose attribute stays below `lambda` are filled to
/// the gray value of the enclosing component.
pub fn attribute_close_in_place<A: Attribute>(
    img: &mut GrayImageMut,
    lambda: u32,
    attributes: Option<&mut Vec<A>>,
) {
    img.invert_in_place();
    attribute_open_in_place(img, lambda, attributes);
    img.invert_in_place();
}

/// Attribute closing, returning a new image.
pub fn attribute_close<A: Attribute>(
    src: &GrayImage,
    lambda: u32,
    attributes: Option<&mut Vec<A>>,
) -> GrayImage {
    let mut dst = src.to_mut();
    attribute_close_in_place(&mut dst, lambda, attributes);
    dst.into()
}

/// Attribute opening with the attribute chosen at run time.
pub fn filter_open(src: &GrayImage, lambda: u32, kind: AttributeKind) -> GrayImage {
    match kind {
        AttributeKind::Area => attribute_open::<Area>(src, lambda, None),
        AttributeKind::EqualSideLength => attribute_open::<EqualSideLength>(src, lambda, None),
        AttributeKind::FillRatio => attribute_open::<FillRatio>(src, lambda, None),
    }
}

/// In-place sibling of [`filter_open`].
pub fn filter_open_in_place(img: &mut GrayImageMut, lambda: u32, kind: AttributeKind) {
    match kind {
        AttributeKind::Area => attribute_open_in_place::<Area>(img, lambda, None),
        AttributeKind::EqualSideLength => {
            attribute_open_in_place::<EqualSideLength>(img, lambda, None)
        }
        AttributeKind::FillRatio => attribute_open_in_place::<FillRatio>(img, lambda, None),
    }
}

/// Attribute closing with the attribute chosen at run time.
pub fn filter_close(src: &GrayImage, lambda: u32, kind: AttributeKind) -> GrayImage {
    match kind {
        AttributeKind::Area => attribute_close::<Area>(src, lambda, None),
        AttributeKind::EqualSideLength => attribute_close::<EqualSideLength>(src, lambda, None),
        AttributeKind::FillRatio => attribute_close::<FillRatio>(src, lambda, None),
    }
}

/// In-place sibling of [`filter_close`].
pub fn filter_close_in_place(img: &mut GrayImageMut, lambda: u32, kind: AttributeKind) {
    match kind {
        AttributeKind::Area => attribute_close_in_place::<Area>(img, lambda, None),
        AttributeKind::EqualSideLength => {
            attribute_close_in_place::<EqualSideLength>(img, lambda, None)
        }
        AttributeKind::FillRatio => attribute_close_in_place::<FillRatio>(img, lambda, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::Area;
    use crate::component::ComponentArena;

    fn image(width: u32, height: u32, data: &[u8]) -> GrayImage {
        GrayImage::from_vec(width, height, data.to_vec()).unwrap()
    }

    #[test]
    fn test_sorted_order_brightest_first_scanline_ties() {
        // b at index 0 (gray 2), a at index 1 and c at index 2 (gray 1).
        let order = sorted_order(&[2, 1, 1]);
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_union_into_later_pixel_keeps_darker_root() {
        // Uniting a into c, then b into the result: the root stays the
        // level pixel c with gray 1, carrying the full area.
        let data = [2u8, 1, 1];
        let mut arena = ComponentArena::<Area>::new(3, 1);

        arena.set_parent(1, 2); // a into c
        arena.set_parent(0, 2); // b into c

        let root = arena.find_root(0);
        assert_eq!(root, 2);
        assert_eq!(data[root as usize], 1);
        assert_eq!(arena.size(root), 3);
        assert_eq!(arena.attribute(root).value(), 3);
    }

    #[test]
    fn test_area_opening_removes_isolated_peak() {
        let src = image(3, 3, &[0, 0, 0, 0, 255, 0, 0, 0, 0]);
        let out = attribute_open::<Area>(&src, 2, None);
        assert_eq!(out.data(), &[0; 9]);
    }

    #[test]
    fn test_area_opening_preserves_large_peak() {
        let mut src = GrayImageMut::new(5, 5).unwrap();
        for y in 1..4 {
            for x in 1..4 {
                src.set_pixel(x, y, 255).unwrap();
            }
        }
        let src: GrayImage = src.into();

        // Peak area 9 >= 5: untouched.
        let out = attribute_open::<Area>(&src, 5, None);
        assert!(out.equals(&src));

        // Peak area 9 < 10: leveled into the background.
        let out = attribute_open::<Area>(&src, 10, None);
        assert_eq!(out.data(), &[0; 25]);
    }

    #[test]
    fn test_closing_dual_scenarios() {
        // Nothing to fill: a bright peak is not a dark component.
        let src = image(3, 3, &[0, 0, 0, 0, 255, 0, 0, 0, 0]);
        let out = attribute_close::<Area>(&src, 2, None);
        assert!(out.equals(&src));

        // A one-pixel hole in a bright field gets filled.
        let src = image(3, 3, &[255, 255, 255, 255, 0, 255, 255, 255, 255]);
        let out = attribute_close::<Area>(&src, 2, None);
        assert_eq!(out.data(), &[255; 9]);
    }

    #[test]
    fn test_lambda_zero_is_noop() {
        let src = image(3, 3, &[9, 1, 4, 7, 200, 3, 0, 5, 6]);
        assert!(attribute_open::<Area>(&src, 0, None).equals(&src));
        assert!(attribute_close::<Area>(&src, 0, None).equals(&src));
    }

    #[test]
    fn test_collector_receives_root_attributes() {
        let mut src = GrayImageMut::new(5, 5).unwrap();
        for y in 1..4 {
            for x in 1..4 {
                src.set_pixel(x, y, 255).unwrap();
            }
        }
        let src: GrayImage = src.into();

        // The surviving peak and the background are separate roots.
        let mut roots: Vec<Area> = Vec::new();
        attribute_open::<Area>(&src, 5, Some(&mut roots));
        let mut areas: Vec<u32> = roots.iter().map(|a| a.value()).collect();
        areas.sort_unstable();
        assert_eq!(areas, vec![9, 16]);

        // Once the peak is filtered away there is a single root.
        let mut roots: Vec<Area> = Vec::new();
        attribute_open::<Area>(&src, 10, Some(&mut roots));
        let areas: Vec<u32> = roots.iter().map(|a| a.value()).collect();
        assert_eq!(areas, vec![25]);
    }

    #[test]
    fn test_dispatch_matches_generic() {
        let src = image(4, 4, &[3, 3, 9, 9, 3, 12, 9, 9, 3, 3, 2, 2, 1, 1, 2, 60]);
        let by_kind = filter_open(&src, 3, AttributeKind::Area);
        let generic = attribute_open::<Area>(&src, 3, None);
        assert!(by_kind.equals(&generic));
    }
}
