//! Projected triangle representation and facing tests.

use crate::{CanvasPoint, CanvasRect, Edge};

/// Which way a projected triangle faces the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    /// Signed area is negative: the triangle faces the camera
    Front,
    /// Signed area is positive: the triangle faces away
    Back,
    /// All three points are collinear (zero area)
    Degenerate,
}

/// A triangle on the canvas, defined by three projected vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasTriangle {
    vertices: [CanvasPoint; 3],
}

impl CanvasTriangle {
    /// Creates a new triangle from three points.
    ///
    /// The winding order determines the facing via the sign of
    /// `(b - a) × (c - a)`.
    pub fn new(a: CanvasPoint, b: CanvasPoint, c: CanvasPoint) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Returns the three vertices of the triangle.
    #[inline]
    pub fn vertices(&self) -> &[CanvasPoint; 3] {
        &self.vertices
    }

    /// Computes the 2D cross product of the edge vectors `a -> b` and `a -> c`.
    ///
    /// This is twice the signed area of the triangle. Computed in `i128` so
    /// that any pair of `i32` points is exact.
    pub fn signed_area(&self) -> i128 {
        let [a, b, c] = self.vertices.map(|p| (i128::from(p.x), i128::from(p.y)));
        let ab = (b.0 - a.0, b.1 - a.1);
        let ac = (c.0 - a.0, c.1 - a.1);
        ab.0 * ac.1 - ab.1 * ac.0
    }

    /// Classifies the triangle by the sign of its signed area.
    pub fn facing(&self) -> Facing {
        match self.signed_area() {
            area if area < 0 => Facing::Front,
            area if area > 0 => Facing::Back,
            _ => Facing::Degenerate,
        }
    }

    /// Returns true if the triangle faces the camera.
    ///
    /// Back-facing and degenerate triangles are both rejected.
    #[inline]
    pub fn is_front_facing(&self) -> bool {
        self.facing() == Facing::Front
    }

    /// Returns the three edges in winding order: `a -> b`, `b -> c`, `c -> a`.
    pub fn edges(&self) -> [Edge; 3] {
        let [a, b, c] = self.vertices;
        [Edge::new(a, b), Edge::new(b, c), Edge::new(c, a)]
    }

    /// Returns the axis-aligned bounding box of the triangle.
    pub fn bounds(&self) -> CanvasRect {
        let [a, b, c] = self.vertices;
        CanvasRect::new(
            CanvasPoint::new(a.x.min(b.x).min(c.x), a.y.min(b.y).min(c.y)),
            CanvasPoint::new(a.x.max(b.x).max(c.x), a.y.max(b.y).max(c.y)),
        )
    }
}
