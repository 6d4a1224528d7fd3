//! Canvas polygon representation.

use crate::{CanvasPoint, CanvasRect, CanvasTriangle};

/// A closed polygon on the canvas, defined by an ordered list of points.
///
/// The last point connects back to the first. Point order is significant: it
/// defines the winding and the order the outline is drawn in. Consecutive
/// duplicate points are not checked for.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CanvasPolygon {
    points: Vec<CanvasPoint>,
}

impl CanvasPolygon {
    /// Creates a new polygon from a list of points.
    pub fn new(points: Vec<CanvasPoint>) -> Self {
        Self { points }
    }

    /// Returns the points of the polygon.
    #[inline]
    pub fn points(&self) -> &[CanvasPoint] {
        &self.points
    }

    /// Returns the number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the polygon has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consumes the polygon, returning its points.
    pub fn into_points(self) -> Vec<CanvasPoint> {
        self.points
    }

    /// Returns the bounding box of the polygon, or `None` if it has no points.
    pub fn bounds(&self) -> Option<CanvasRect> {
        CanvasRect::bounding(&self.points)
    }

    /// Iterates over the closed outline as `(from, to)` point pairs.
    pub fn segments(&self) -> impl Iterator<Item = (CanvasPoint, CanvasPoint)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Checks whether a point lies inside the polygon using the even-odd rule.
    ///
    /// A point exactly on a boundary counts as inside when the interior lies
    /// to its right or below it, so neighbouring polygons sharing an edge
    /// never both claim the same point.
    pub fn contains(&self, point: CanvasPoint) -> bool {
        if self.points.len() < 3 {
            return false;
        }
        match self.bounds() {
            Some(bounds) if bounds.contains(point) => {}
            _ => return false,
        }

        let px = f64::from(point.x);
        let py = f64::from(point.y);
        let mut inside = false;

        for (from, to) in self.segments() {
            // Half-open span on y: exactly one endpoint strictly below the point
            if (from.y > point.y) == (to.y > point.y) {
                continue;
            }
            let (fx, fy) = (f64::from(from.x), f64::from(from.y));
            let (tx, ty) = (f64::from(to.x), f64::from(to.y));
            let crossing = fx + (py - fy) * (tx - fx) / (ty - fy);
            if px < crossing {
                inside = !inside;
            }
        }

        inside
    }

    /// Twice the signed area of the polygon (shoelace formula).
    ///
    /// The sign follows the canvas axes: with y growing downwards, a negative
    /// value means the points run counter-clockwise on screen.
    pub fn signed_area2(&self) -> i128 {
        self.segments()
            .map(|(a, b)| {
                i128::from(a.x) * i128::from(b.y) - i128::from(b.x) * i128::from(a.y)
            })
            .sum()
    }
}

impl From<Vec<CanvasPoint>> for CanvasPolygon {
    fn from(points: Vec<CanvasPoint>) -> Self {
        Self::new(points)
    }
}

impl From<CanvasTriangle> for CanvasPolygon {
    fn from(triangle: CanvasTriangle) -> Self {
        Self {
            points: triangle.vertices().to_vec(),
        }
    }
}

impl From<&CanvasTriangle> for CanvasPolygon {
    fn from(triangle: &CanvasTriangle) -> Self {
        Self {
            points: triangle.vertices().to_vec(),
        }
    }
}
