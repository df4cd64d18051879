//! Component attributes
//!
//! An attribute is a scalar aggregate over a connected component: it is
//! seeded from a single pixel, merged when two components unite, and
//! projected to a discrete value that the filter compares against its
//! threshold and the pattern spectrum uses as a bin index.
//!
//! Merging is the only mutator and happens exactly once per union, at
//! the roots of the two components. The final root value depends only
//! on the set of pixels, not on the merge order.

/// Scalar aggregate over a connected component.
///
/// Implementors are small `Copy` types stored in the component arena;
/// the filter engine is monomorphized over the attribute type.
pub trait Attribute: Copy {
    /// Upper bound of [`Attribute::value`], if the projection has one.
    ///
    /// Shape attributes project into `[0, 100]` and report
    /// `Some(100)`; the area attribute is unbounded and reports
    /// `None`. The pattern spectrum sizes its bin vector from this.
    const VALUE_BOUND: Option<u32>;

    /// Initial state for a singleton component at `(x, y)`.
    fn seed(x: u32, y: u32) -> Self;

    /// Combine another component's aggregate into this one.
    fn merge(&mut self, other: Self);

    /// Discrete projection of the aggregate.
    fn value(&self) -> u32;
}

/// Which attribute a dynamically-dispatched filter call should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// Pixel count of the component
    Area,
    /// Side-length equality of the bounding box, in `[0, 100]`
    EqualSideLength,
    /// Component area over bounding-box area, in `[0, 100]`
    FillRatio,
}

/// The area attribute: the number of pixels in the component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Area {
    area: u32,
}

impl Attribute for Area {
    const VALUE_BOUND: Option<u32> = None;

    fn seed(_x: u32, _y: u32) -> Self {
        Area { area: 1 }
    }

    fn merge(&mut self, other: Self) {
        self.area += other.area;
    }

    fn value(&self) -> u32 {
        self.area
    }
}

/// Axis-aligned bounding box of a component.
///
/// Not an attribute by itself; the shape attributes compose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    x_min: u32,
    x_max: u32,
    y_min: u32,
    y_max: u32,
}

impl BoundingBox {
    fn seed(x: u32, y: u32) -> Self {
        BoundingBox {
            x_min: x,
            x_max: x,
            y_min: y,
            y_max: y,
        }
    }

    fn merge(&mut self, other: Self) {
        self.x_min = self.x_min.min(other.x_min);
        self.x_max = self.x_max.max(other.x_max);
        self.y_min = self.y_min.min(other.y_min);
        self.y_max = self.y_max.max(other.y_max);
    }

    /// Box width in pixels (at least 1).
    fn width(&self) -> u32 {
        self.x_max - self.x_min + 1
    }

    /// Box height in pixels (at least 1).
    fn height(&self) -> u32 {
        self.y_max - self.y_min + 1
    }
}

/// Side-length equality of the component's bounding box.
///
/// Projects to `100 * min(w, h) / max(w, h)`, a squareness measure in
/// `[0, 100]`. The division rounds down; equal sides give exactly 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EqualSideLength {
    bbox: BoundingBox,
}

impl Attribute for EqualSideLength {
    const VALUE_BOUND: Option<u32> = Some(100);

    fn seed(x: u32, y: u32) -> Self {
        EqualSideLength {
            bbox: BoundingBox::seed(x, y),
        }
    }

    fn merge(&mut self, other: Self) {
        self.bbox.merge(other.bbox);
    }

    fn value(&self) -> u32 {
        let w = self.bbox.width();
        let h = self.bbox.height();
        100 * w.min(h) / w.max(h)
    }
}

/// Fill ratio of the component relative to its bounding box.
///
/// Projects to `100 * area / (w * h)` in `[0, 100]`, rounding down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillRatio {
    bbox: BoundingBox,
    area: u32,
}

impl Attribute for FillRatio {
    const VALUE_BOUND: Option<u32> = Some(100);

    fn seed(x: u32, y: u32) -> Self {
        FillRatio {
            bbox: BoundingBox::seed(x, y),
            area: 1,
        }
    }

    fn merge(&mut self, other: Self) {
        self.bbox.merge(other.bbox);
        self.area += other.area;
    }

    fn value(&self) -> u32 {
        100 * self.area / (self.bbox.width() * self.bbox.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_merge() {
        let mut a = Area::seed(1, 1);
        let b = Area::seed(2, 1);
        assert_eq!(a.value(), 1);
        assert_eq!(b.value(), 1);

        a.merge(b);
        assert_eq!(a.value(), 2);
        assert_eq!(b.value(), 1);
    }

    #[test]
    fn test_equal_side_length_merge() {
        // Singletons are square.
        let a = EqualSideLength::seed(2, 1);
        let mut b = EqualSideLength::seed(1, 1);
        let c = EqualSideLength::seed(1, 2);
        assert_eq!(a.value(), 100);
        assert_eq!(b.value(), 100);
        assert_eq!(c.value(), 100);

        // 2x1 box: sides are half-equal.
        b.merge(a);
        assert_eq!(b.value(), 50);

        // 2x2 box: sides equal again.
        b.merge(c);
        assert_eq!(b.value(), 100);
    }

    #[test]
    fn test_equal_side_length_rounds_down() {
        // 3x2 box: 100 * 2 / 3 = 66, never 67.
        let mut a = EqualSideLength::seed(0, 0);
        a.merge(EqualSideLength::seed(2, 1));
        assert_eq!(a.value(), 66);
    }

    #[test]
    fn test_fill_ratio() {
        // Three pixels of an L shape inside a 2x2 box.
        let mut a = FillRatio::seed(0, 0);
        a.merge(FillRatio::seed(0, 1));
        a.merge(FillRatio::seed(1, 1));
        assert_eq!(a.value(), 75);

        // Completing the square fills the box.
        a.merge(FillRatio::seed(1, 0));
        assert_eq!(a.value(), 100);
    }

    #[test]
    fn test_merge_order_independence() {
        let pixels = [(3u32, 0u32), (0, 2), (1, 1), (4, 4)];

        let mut forward = FillRatio::seed(2, 2);
        for &(x, y) in &pixels {
            forward.merge(FillRatio::seed(x, y));
        }

        let mut backward = FillRatio::seed(2, 2);
        for &(x, y) in pixels.iter().rev() {
            backward.merge(FillRatio::seed(x, y));
        }

        assert_eq!(forward.value(), backward.value());
    }
}
