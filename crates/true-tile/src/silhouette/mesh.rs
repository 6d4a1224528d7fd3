//! Triangle meshes and silhouette extraction.

use log::debug;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::{CanvasPoint, CanvasPolygon, CanvasTriangle};

use super::builder::SilhouetteBuilder;
use super::filter::FilterSet;

/// Faces at or above this transparency are invisible and never erased.
pub const TRANSPARENCY_CUTOFF: u8 = 254;

/// Read-only access to an actor's triangle mesh.
///
/// Vertex positions are in model space: `x` and `y` along the ground, `z`
/// as height (growing downwards like terrain heights).
pub trait MeshView {
    fn vertex_count(&self) -> usize;

    /// Position of a vertex. Only called with `index < vertex_count()`.
    fn vertex(&self, index: usize) -> Point3<i32>;

    fn face_count(&self) -> usize;

    /// Vertex indices of a face. Only called with `index < face_count()`.
    fn face(&self, index: usize) -> [usize; 3];

    /// Transparency of a face (0 opaque, 255 invisible). `None` if the mesh
    /// carries no transparency data.
    fn face_transparency(&self, index: usize) -> Option<u8>;
}

/// An owned triangle mesh.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TriangleMesh {
    vertices: Vec<[i32; 3]>,
    faces: Vec<[usize; 3]>,
    #[serde(default)]
    transparencies: Option<Vec<u8>>,
}

impl TriangleMesh {
    /// Creates a mesh from vertex positions and faces.
    ///
    /// Faces referencing missing vertices are dropped.
    pub fn new(vertices: Vec<[i32; 3]>, faces: Vec<[usize; 3]>) -> Self {
        let vertex_count = vertices.len();
        let faces = faces
            .into_iter()
            .filter(|face| face.iter().all(|&i| i < vertex_count))
            .collect();
        Self {
            vertices,
            faces,
            transparencies: None,
        }
    }

    /// Attaches per-face transparency. Missing entries count as opaque.
    pub fn with_transparencies(mut self, transparencies: Vec<u8>) -> Self {
        self.transparencies = Some(transparencies);
        self
    }
}

impl MeshView for TriangleMesh {
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn vertex(&self, index: usize) -> Point3<i32> {
        let [x, y, z] = self.vertices[index];
        Point3::new(x, y, z)
    }

    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn face(&self, index: usize) -> [usize; 3] {
        self.faces[index]
    }

    fn face_transparency(&self, index: usize) -> Option<u8> {
        self.transparencies
            .as_ref()
            .map(|t| t.get(index).copied().unwrap_or(0))
    }
}

/// Returns the projected triangle of a face, or `None` if any of its
/// vertices has no canvas position.
fn projected_face<M: MeshView + ?Sized>(
    mesh: &M,
    projected: &[Option<CanvasPoint>],
    face: usize,
) -> Option<CanvasTriangle> {
    let [a, b, c] = mesh.face(face);
    Some(CanvasTriangle::new(
        *projected.get(a)?.as_ref()?,
        *projected.get(b)?.as_ref()?,
        *projected.get(c)?.as_ref()?,
    ))
}

/// Extracts the outline of the visible part of a mesh inside a filter.
///
/// `projected` holds the canvas position of every mesh vertex. A face
/// contributes to the outline when it
/// 1. has all three vertices projected,
/// 2. faces the camera,
/// 3. is admitted by `filter`,
/// 4. is less than [`TRANSPARENCY_CUTOFF`] transparent.
///
/// The result is suitable as an erase mask. It is empty when the filter is
/// empty or no face qualifies.
pub fn extract_silhouette<M: MeshView + ?Sized>(
    mesh: &M,
    projected: &[Option<CanvasPoint>],
    filter: &FilterSet,
) -> Vec<CanvasPolygon> {
    if filter.is_empty() {
        return Vec::new();
    }

    let mut builder = SilhouetteBuilder::new();
    let mut accepted = 0usize;

    for face in 0..mesh.face_count() {
        let Some(triangle) = projected_face(mesh, projected, face) else {
            continue;
        };
        if !triangle.is_front_facing() || !filter.admits(&triangle) {
            continue;
        }
        if mesh
            .face_transparency(face)
            .is_some_and(|alpha| alpha >= TRANSPARENCY_CUTOFF)
        {
            continue;
        }
        builder.add(&triangle);
        accepted += 1;
    }

    let polygons = builder.build_polygons();
    debug!(
        "silhouette: {} of {} faces in {} outline(s)",
        accepted,
        mesh.face_count(),
        polygons.len()
    );
    polygons
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_polygon(points: &[[i32; 2]]) -> CanvasPolygon {
        CanvasPolygon::new(points.iter().map(|p| CanvasPoint::new(p[0], p[1])).collect())
    }

    /// A flat square on the canvas split along its diagonal, both faces front-facing.
    fn square_mesh() -> (TriangleMesh, Vec<Option<CanvasPoint>>) {
        let mesh = TriangleMesh::new(
            vec![[0, 0, 0], [0, 10, 0], [10, 10, 0], [10, 0, 0]],
            vec![[0, 1, 2], [0, 2, 3]],
        );
        // Identity projection of x/y
        let projected = (0..mesh.vertex_count())
            .map(|i| {
                let v = mesh.vertex(i);
                Some(CanvasPoint::new(v.x, v.y))
            })
            .collect();
        (mesh, projected)
    }

    fn covering_filter() -> FilterSet {
        FilterSet::from(vec![make_polygon(&[[-5, -5], [20, -5], [20, 20], [-5, 20]])])
    }

    #[test]
    fn square_yields_single_quad() {
        let (mesh, projected) = square_mesh();
        let polygons = extract_silhouette(&mesh, &projected, &covering_filter());

        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons[0], make_polygon(&[[0, 0], [0, 10], [10, 10], [10, 0]]));
    }

    #[test]
    fn empty_filter_yields_nothing() {
        let (mesh, projected) = square_mesh();
        assert!(extract_silhouette(&mesh, &projected, &FilterSet::new()).is_empty());
    }

    #[test]
    fn faces_outside_filter_are_dropped() {
        let (mesh, projected) = square_mesh();
        let far = FilterSet::from(vec![make_polygon(&[[500, 500], [600, 500], [600, 600]])]);
        assert!(extract_silhouette(&mesh, &projected, &far).is_empty());
    }

    #[test]
    fn back_faces_are_dropped_even_inside_filter() {
        let mesh = TriangleMesh::new(
            vec![[0, 0, 0], [10, 0, 0], [0, 10, 0]],
            vec![[0, 1, 2]],
        );
        let projected = vec![
            Some(CanvasPoint::new(0, 0)),
            Some(CanvasPoint::new(10, 0)),
            Some(CanvasPoint::new(0, 10)),
        ];
        assert!(extract_silhouette(&mesh, &projected, &covering_filter()).is_empty());
    }

    #[test]
    fn transparent_faces_are_dropped() {
        let (mesh, projected) = square_mesh();
        let mesh = mesh.with_transparencies(vec![254, 253]);

        let polygons = extract_silhouette(&mesh, &projected, &covering_filter());
        assert_eq!(polygons, vec![make_polygon(&[[0, 0], [10, 10], [10, 0]])]);

        let invisible = mesh.with_transparencies(vec![255, 254]);
        assert!(extract_silhouette(&invisible, &projected, &covering_filter()).is_empty());
    }

    #[test]
    fn short_transparency_table_counts_as_opaque() {
        let (mesh, projected) = square_mesh();
        let mesh = mesh.with_transparencies(vec![255]);

        assert_eq!(mesh.face_transparency(1), Some(0));
        let polygons = extract_silhouette(&mesh, &projected, &covering_filter());
        assert_eq!(polygons, vec![make_polygon(&[[0, 0], [10, 10], [10, 0]])]);
    }

    #[test]
    fn unprojected_vertices_skip_their_faces() {
        let (mesh, mut projected) = square_mesh();
        projected[1] = None;

        let polygons = extract_silhouette(&mesh, &projected, &covering_filter());
        assert_eq!(polygons, vec![make_polygon(&[[0, 0], [10, 10], [10, 0]])]);

        // Too few projected points behaves the same as unprojected ones
        assert!(extract_silhouette(&mesh, &projected[..2], &covering_filter()).is_empty());
    }

    #[test]
    fn faces_with_missing_vertices_are_discarded() {
        let mesh =
            TriangleMesh::new(vec![[0, 0, 0], [1, 0, 0], [0, 1, 0]], vec![[0, 1, 2], [0, 1, 7]]);
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn mesh_round_trips_through_json() {
        let json = r#"{"vertices":[[0,0,0],[0,10,0],[10,0,0]],"faces":[[0,1,2]]}"#;
        let mesh: TriangleMesh = serde_json::from_str(json).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face(0), [0, 1, 2]);
        assert_eq!(mesh.face_transparency(0), None);
    }
}
