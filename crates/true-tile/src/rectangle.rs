//! Axis-aligned canvas rectangles.

use crate::CanvasPoint;

/// An axis-aligned rectangle on the canvas, spanning `min` to `max`.
///
/// The rectangle covers the half-open area `[min.x, max.x) × [min.y, max.y)`,
/// so a box whose `max` equals its `min` on either axis is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasRect {
    min: CanvasPoint,
    max: CanvasPoint,
}

impl CanvasRect {
    /// Creates a rectangle from two opposite corners, in any order.
    pub fn new(a: CanvasPoint, b: CanvasPoint) -> Self {
        Self {
            min: CanvasPoint::new(a.x.min(b.x), a.y.min(b.y)),
            max: CanvasPoint::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Creates a rectangle from an origin corner and a size.
    pub fn from_origin_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(
            CanvasPoint::new(x, y),
            CanvasPoint::new(x.saturating_add(width), y.saturating_add(height)),
        )
    }

    /// Computes the bounding box of a set of points.
    ///
    /// Returns `None` for an empty point set.
    pub fn bounding(points: &[CanvasPoint]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut min = *first;
        let mut max = *first;
        for p in rest {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Self { min, max })
    }

    /// Returns the top-left corner.
    #[inline]
    pub fn min(&self) -> CanvasPoint {
        self.min
    }

    /// Returns the bottom-right corner.
    #[inline]
    pub fn max(&self) -> CanvasPoint {
        self.max
    }

    #[inline]
    pub fn width(&self) -> i64 {
        i64::from(self.max.x) - i64::from(self.min.x)
    }

    #[inline]
    pub fn height(&self) -> i64 {
        i64::from(self.max.y) - i64::from(self.min.y)
    }

    /// Returns true if the rectangle covers no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Checks whether a point lies inside the half-open area of the rectangle.
    pub fn contains(&self, point: CanvasPoint) -> bool {
        point.x >= self.min.x
            && point.x < self.max.x
            && point.y >= self.min.y
            && point.y < self.max.y
    }

    /// Checks whether two rectangles share any area.
    ///
    /// Empty rectangles never intersect anything, and rectangles that only
    /// touch along an edge do not intersect.
    pub fn intersects(&self, other: &CanvasRect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_rect(x: i32, y: i32, w: i32, h: i32) -> CanvasRect {
        CanvasRect::from_origin_size(x, y, w, h)
    }

    #[test]
    fn new_orders_corners() {
        let rect = CanvasRect::new(CanvasPoint::new(10, -2), CanvasPoint::new(-4, 8));
        assert_eq!(rect.min(), CanvasPoint::new(-4, -2));
        assert_eq!(rect.max(), CanvasPoint::new(10, 8));
        assert_eq!(rect.width(), 14);
        assert_eq!(rect.height(), 10);
    }

    #[test]
    fn bounding_of_points() {
        let points = [
            CanvasPoint::new(3, 9),
            CanvasPoint::new(-1, 4),
            CanvasPoint::new(7, 5),
        ];
        let rect = CanvasRect::bounding(&points).unwrap();
        assert_eq!(rect, CanvasRect::new(CanvasPoint::new(-1, 4), CanvasPoint::new(7, 9)));

        assert!(CanvasRect::bounding(&[]).is_none());
    }

    #[test]
    fn contains_is_half_open() {
        let rect = make_rect(0, 0, 10, 10);
        assert!(rect.contains(CanvasPoint::new(0, 0)));
        assert!(rect.contains(CanvasPoint::new(9, 9)));
        assert!(!rect.contains(CanvasPoint::new(10, 5)));
        assert!(!rect.contains(CanvasPoint::new(5, 10)));
    }

    #[test]
    fn overlapping_rectangles_intersect() {
        let a = make_rect(0, 0, 10, 10);
        let b = make_rect(5, 5, 10, 10);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn touching_rectangles_do_not_intersect() {
        let a = make_rect(0, 0, 10, 10);
        let b = make_rect(10, 0, 10, 10);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn extents_spanning_the_whole_axis() {
        let wide = CanvasRect::new(
            CanvasPoint::new(-2_000_000_000, 0),
            CanvasPoint::new(2_000_000_000, 10),
        );
        assert_eq!(wide.width(), 4_000_000_000);
        assert_eq!(wide.height(), 10);
        assert!(!wide.is_empty());
        assert!(wide.intersects(&make_rect(0, 0, 5, 5)));

        let full = CanvasRect::new(
            CanvasPoint::new(i32::MIN, i32::MIN),
            CanvasPoint::new(i32::MAX, i32::MAX),
        );
        assert_eq!(full.width(), u32::MAX as i64);
        assert!(full.intersects(&wide));
    }

    #[test]
    fn empty_rectangle_never_intersects() {
        let a = make_rect(0, 0, 10, 10);
        let flat = make_rect(2, 2, 0, 5);
        assert!(flat.is_empty());
        assert!(!a.intersects(&flat));
        assert!(!flat.intersects(&a));
    }
}
