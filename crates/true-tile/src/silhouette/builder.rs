//! Boundary tracing by edge collapse.

use log::trace;
use rustc_hash::FxHashMap;

use crate::{CanvasPoint, CanvasPolygon, CanvasTriangle, Edge};

/// One edge in a prototype's outline, linked to the edge after it.
#[derive(Debug, Clone, Copy)]
struct EdgeNode {
    edge: Edge,
    next: Option<usize>,
}

/// An outline under construction: a chain of edge nodes.
#[derive(Debug, Clone, Copy)]
struct Prototype {
    head: usize,
    len: usize,
}

/// Where an exposed edge lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ExposedEdge {
    prototype: usize,
    node: usize,
}

/// Merges triangles into outline polygons by removing shared edges.
///
/// Every added triangle either starts a new outline or is glued onto an
/// existing one along the first of its edges (in winding order) that the
/// outline still exposes. Gluing replaces the shared edge with the triangle's
/// two other edges at the same position in the outline, which keeps the
/// outline a connected path.
///
/// Outlines live in arenas: each is a singly linked chain of edge nodes, and
/// the exposed-edge map stores arena indices. A builder is meant for a single
/// mesh in a single frame.
///
/// ```
/// use true_tile::{CanvasPoint, SilhouetteBuilder};
///
/// let p = |x, y| CanvasPoint::new(x, y);
/// let mut builder = SilhouetteBuilder::new();
/// builder.add_triangle(p(0, 0), p(0, 10), p(10, 10));
/// builder.add_triangle(p(0, 0), p(10, 10), p(10, 0));
///
/// let polygons = builder.build_polygons();
/// assert_eq!(polygons.len(), 1);
/// assert_eq!(polygons[0].points(), &[p(0, 0), p(0, 10), p(10, 10), p(10, 0)]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SilhouetteBuilder {
    prototypes: Vec<Prototype>,
    nodes: Vec<EdgeNode>,
    exposed: FxHashMap<Edge, ExposedEdge>,
}

impl SilhouetteBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of outlines started so far.
    #[inline]
    pub fn prototype_count(&self) -> usize {
        self.prototypes.len()
    }

    /// Returns the number of edges currently exposed on some outline.
    #[inline]
    pub fn exposed_count(&self) -> usize {
        self.exposed.len()
    }

    /// Returns true if no triangle has been added.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }

    /// Adds a triangle given by its three corners.
    ///
    /// Callers are expected to pass only front-facing triangles; the builder
    /// itself does not cull.
    pub fn add_triangle(&mut self, p1: CanvasPoint, p2: CanvasPoint, p3: CanvasPoint) {
        self.add(&CanvasTriangle::new(p1, p2, p3));
    }

    /// Adds a triangle.
    pub fn add(&mut self, triangle: &CanvasTriangle) {
        let edges = triangle.edges();

        for i in 0..3 {
            if let Some(slot) = self.exposed.remove(&edges[i]) {
                let replacement = edges[(i + 1) % 3];
                let inserted = edges[(i + 2) % 3];
                self.splice(slot, replacement, inserted);
                return;
            }
        }

        self.start_prototype(edges);
    }

    /// Replaces the edge at `slot` with `replacement` followed by `inserted`.
    fn splice(&mut self, slot: ExposedEdge, replacement: Edge, inserted: Edge) {
        let new_node = self.nodes.len();
        let node = &mut self.nodes[slot.node];
        let after = node.next;
        node.edge = replacement;
        node.next = Some(new_node);
        self.nodes.push(EdgeNode {
            edge: inserted,
            next: after,
        });
        self.prototypes[slot.prototype].len += 1;

        self.exposed.insert(replacement, slot);
        self.exposed.insert(
            inserted,
            ExposedEdge {
                prototype: slot.prototype,
                node: new_node,
            },
        );
        trace!("merged triangle into outline {}", slot.prototype);
    }

    fn start_prototype(&mut self, edges: [Edge; 3]) {
        let prototype = self.prototypes.len();
        let head = self.nodes.len();

        for (i, edge) in edges.into_iter().enumerate() {
            let node = head + i;
            self.nodes.push(EdgeNode {
                edge,
                next: (i < 2).then_some(node + 1),
            });
            self.exposed.insert(edge, ExposedEdge { prototype, node });
        }
        self.prototypes.push(Prototype { head, len: 3 });
    }

    /// Walks an outline's edges in order.
    fn edges_of(&self, prototype: &Prototype) -> impl Iterator<Item = Edge> + '_ {
        let mut cursor = Some(prototype.head);
        std::iter::from_fn(move || {
            let node = self.nodes[cursor?];
            cursor = node.next;
            Some(node.edge)
        })
    }

    /// Returns the finished outlines, one per connected group of triangles,
    /// in the order they were started.
    ///
    /// Each outline lists the start point of each of its edges in path order.
    pub fn build_polygons(&self) -> Vec<CanvasPolygon> {
        self.prototypes
            .iter()
            .map(|prototype| {
                let mut points = Vec::with_capacity(prototype.len);
                points.extend(self.edges_of(prototype).map(|edge| edge.start()));
                CanvasPolygon::new(points)
            })
            .collect()
    }
}
