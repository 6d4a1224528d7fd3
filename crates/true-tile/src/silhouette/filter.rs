//! Regions a silhouette may be extracted from.

use crate::{CanvasPolygon, CanvasRect, CanvasTriangle};

/// A set of canvas polygons used as an inclusion test for triangles.
///
/// Bounding boxes are computed once when the filter is built. An empty
/// filter admits nothing.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    polygons: Vec<CanvasPolygon>,
    bounds: Vec<Option<CanvasRect>>,
}

impl FilterSet {
    /// Creates an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a polygon to the filter.
    pub fn push(&mut self, polygon: CanvasPolygon) {
        self.bounds.push(polygon.bounds());
        self.polygons.push(polygon);
    }

    /// Returns the polygons in the filter.
    #[inline]
    pub fn polygons(&self) -> &[CanvasPolygon] {
        &self.polygons
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Checks whether a triangle touches any polygon of the filter.
    ///
    /// This is a fast, approximate test. A triangle passes when one of its
    /// vertices lies inside a filter polygon, or when its bounding box
    /// intersects a filter polygon's bounding box. False positives near a
    /// polygon are accepted.
    pub fn admits(&self, triangle: &CanvasTriangle) -> bool {
        let tri_bounds = triangle.bounds();

        self.polygons.iter().zip(&self.bounds).any(|(polygon, bounds)| {
            triangle.vertices().iter().any(|&v| polygon.contains(v))
                || bounds.is_some_and(|b| b.intersects(&tri_bounds))
        })
    }
}

impl FromIterator<CanvasPolygon> for FilterSet {
    fn from_iter<I: IntoIterator<Item = CanvasPolygon>>(iter: I) -> Self {
        let mut filter = Self::new();
        for polygon in iter {
            filter.push(polygon);
        }
        filter
    }
}

impl From<Vec<CanvasPolygon>> for FilterSet {
    fn from(polygons: Vec<CanvasPolygon>) -> Self {
        polygons.into_iter().collect()
    }
}
