//! Mesh silhouette extraction.
//!
//! Turns the projected triangles of an actor's mesh into the outline(s) of
//! the part of the actor that covers a set of filter regions. Filling these
//! outlines with a "clear" composite removes the actor from an overlay layer,
//! so a tile marker drawn there appears beneath the actor.
//!
//! # Example
//!
//! ```
//! use true_tile::{extract_silhouette, CanvasPoint, CanvasPolygon, FilterSet, TriangleMesh};
//!
//! let mesh = TriangleMesh::new(
//!     vec![[0, 0, 0], [0, 10, 0], [10, 10, 0], [10, 0, 0]],
//!     vec![[0, 1, 2], [0, 2, 3]],
//! );
//! // Canvas position of every vertex, from whatever camera is in use
//! let projected: Vec<_> = [(0, 0), (0, 10), (10, 10), (10, 0)]
//!     .iter()
//!     .map(|&(x, y)| Some(CanvasPoint::new(x, y)))
//!     .collect();
//!
//! let tile = CanvasPolygon::new(vec![
//!     CanvasPoint::new(5, 5),
//!     CanvasPoint::new(30, 5),
//!     CanvasPoint::new(30, 30),
//! ]);
//! let filter = FilterSet::from(vec![tile]);
//!
//! let outlines = extract_silhouette(&mesh, &projected, &filter);
//! assert_eq!(outlines.len(), 1);
//! assert_eq!(outlines[0].len(), 4);
//! ```
//!
//! # Architecture
//!
//! - [`SilhouetteBuilder`]: merges triangles into outlines by collapsing shared edges
//! - [`FilterSet`]: the approximate region test a triangle must pass
//! - [`MeshView`]: read-only mesh access, implemented by [`TriangleMesh`]
//! - [`extract_silhouette`]: culling, filtering and building in one pass

mod builder;
mod filter;
mod mesh;

pub use builder::SilhouetteBuilder;
pub use filter::FilterSet;
pub use mesh::{extract_silhouette, MeshView, TriangleMesh, TRANSPARENCY_CUTOFF};
