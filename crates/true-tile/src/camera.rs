//! A perspective camera implementing [`Projector`].

use nalgebra::{Isometry3, Perspective3, Point3, Vector3};

use crate::{CanvasPoint, CanvasRect, Projector};

/// Converts a scene point (x east, y north, z height growing downwards) into
/// a right-handed, y-up world point with south along +z.
#[inline]
pub fn scene_to_world(x: f32, y: f32, z: f32) -> Point3<f32> {
    Point3::new(x, -z, -y)
}

/// A pinhole camera that projects scene points into a viewport.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    view: Isometry3<f32>,
    projection: Perspective3<f32>,
    viewport: CanvasRect,
}

impl PerspectiveCamera {
    /// Vertical field of view used by [`PerspectiveCamera::look_at`].
    pub const DEFAULT_FOVY: f32 = std::f32::consts::FRAC_PI_3;

    /// Creates a camera at `eye` looking at `target`, both in scene space.
    ///
    /// # Panics
    /// Panics if the viewport is empty.
    pub fn look_at(eye: Point3<f32>, target: Point3<f32>, viewport: CanvasRect) -> Self {
        assert!(!viewport.is_empty(), "Camera viewport cannot be empty");
        let aspect = viewport.width() as f32 / viewport.height() as f32;
        Self {
            view: Isometry3::look_at_rh(
                &scene_to_world(eye.x, eye.y, eye.z),
                &scene_to_world(target.x, target.y, target.z),
                &Vector3::y(),
            ),
            projection: Perspective3::new(aspect, Self::DEFAULT_FOVY, 1.0, 100_000.0),
            viewport,
        }
    }

    /// Sets the vertical field of view in radians.
    pub fn with_fovy(mut self, fovy: f32) -> Self {
        self.projection.set_fovy(fovy);
        self
    }

    /// Returns the canvas area the camera renders into.
    #[inline]
    pub fn viewport(&self) -> CanvasRect {
        self.viewport
    }
}

impl Projector for PerspectiveCamera {
    fn project(&self, x: i32, y: i32, z: i32) -> Option<CanvasPoint> {
        let eye_space = self
            .view
            .transform_point(&scene_to_world(x as f32, y as f32, z as f32));

        // Looking down -z: anything closer than the near plane has no image
        if -eye_space.z < self.projection.znear() {
            return None;
        }

        let ndc = self.projection.project_point(&eye_space);
        if !ndc.x.is_finite() || !ndc.y.is_finite() {
            return None;
        }

        let min = self.viewport.min();
        let cx = min.x as f32 + (ndc.x + 1.0) * 0.5 * self.viewport.width() as f32;
        let cy = min.y as f32 + (1.0 - ndc.y) * 0.5 * self.viewport.height() as f32;
        Some(CanvasPoint::new(cx.round() as i32, cy.round() as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CanvasTriangle;

    fn make_camera() -> PerspectiveCamera {
        // High above and south of the origin, looking north-down at it
        PerspectiveCamera::look_at(
            Point3::new(0.0, -1000.0, -1000.0),
            Point3::new(0.0, 0.0, 0.0),
            CanvasRect::from_origin_size(0, 0, 800, 600),
        )
    }

    #[test]
    fn target_projects_to_viewport_centre() {
        let camera = make_camera();
        assert_eq!(camera.project(0, 0, 0), Some(CanvasPoint::new(400, 300)));
    }

    #[test]
    fn east_is_right_and_north_is_up() {
        let camera = make_camera();
        let centre = camera.project(0, 0, 0).unwrap();
        let east = camera.project(100, 0, 0).unwrap();
        let north = camera.project(0, 100, 0).unwrap();
        let raised = camera.project(0, 0, -100).unwrap();

        assert!(east.x > centre.x);
        assert!(north.y < centre.y);
        assert!(raised.y < centre.y);
    }

    #[test]
    fn points_behind_the_camera_do_not_project() {
        let camera = make_camera();
        assert!(camera.project(0, -3000, -3000).is_none());
    }

    #[test]
    fn upward_facing_ground_triangle_faces_front() {
        let camera = make_camera();
        // Counter-clockwise when seen from above: east, then north
        let up = CanvasTriangle::new(
            camera.project(0, 0, 0).unwrap(),
            camera.project(100, 0, 0).unwrap(),
            camera.project(0, 100, 0).unwrap(),
        );
        assert!(up.is_front_facing());

        let down = CanvasTriangle::new(
            camera.project(0, 0, 0).unwrap(),
            camera.project(0, 100, 0).unwrap(),
            camera.project(100, 0, 0).unwrap(),
        );
        assert!(!down.is_front_facing());
    }
}
