//! Undirected canvas edges used as silhouette lookup keys.

use std::hash::{Hash, Hasher};

use crate::CanvasPoint;

/// A line segment between two canvas points.
///
/// The segment remembers the direction it was created with (`start` to `end`),
/// which is what the silhouette builder walks when it turns edges back into a
/// polygon. Equality and hashing ignore that direction: `a -> b` and `b -> a`
/// are the same edge, so two adjacent triangles wound the same way recognise
/// their shared side.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    start: CanvasPoint,
    end: CanvasPoint,
}

impl Edge {
    /// Creates a new edge running from `start` to `end`.
    pub fn new(start: CanvasPoint, end: CanvasPoint) -> Self {
        Self { start, end }
    }

    /// Returns the point this edge was created from.
    #[inline]
    pub fn start(&self) -> CanvasPoint {
        self.start
    }

    /// Returns the point this edge was created towards.
    #[inline]
    pub fn end(&self) -> CanvasPoint {
        self.end
    }

    /// Returns the same edge traversed in the opposite direction.
    #[cfg(test)]
    fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }

    /// Endpoints in a direction-independent order.
    fn key(&self) -> ((i32, i32), (i32, i32)) {
        let a = (self.start.x, self.start.y);
        let b = (self.end.x, self.end.y);
        if a <= b { (a, b) } else { (b, a) }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}
