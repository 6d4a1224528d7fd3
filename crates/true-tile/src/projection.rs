//! Projection of ground footprints onto the canvas.
//!
//! A footprint is the square (or rectangular) patch of ground an actor stands
//! on. Its corners are lifted onto the terrain with [`tile_height`] and then
//! handed to a [`Projector`] to obtain canvas coordinates. Any corner that
//! cannot be projected discards the whole polygon.

use log::trace;

use crate::terrain::{height_plane, tile_height, LOCAL_TILE_SIZE};
use crate::{CanvasPoint, CanvasPolygon, LocalPoint, TerrainView};

/// Maps scene-space points to the canvas.
///
/// `x` and `y` are local scene units, `z` is a terrain height (growing
/// downwards). Returns `None` when the point has no canvas position, for
/// example when it lies behind the camera.
pub trait Projector {
    fn project(&self, x: i32, y: i32, z: i32) -> Option<CanvasPoint>;
}

impl<P: Projector + ?Sized> Projector for &P {
    fn project(&self, x: i32, y: i32, z: i32) -> Option<CanvasPoint> {
        (**self).project(x, y, z)
    }
}

/// A projector that calls a closure.
pub struct FnProjector<F>
where
    F: Fn(i32, i32, i32) -> Option<CanvasPoint>,
{
    func: F,
}

impl<F> FnProjector<F>
where
    F: Fn(i32, i32, i32) -> Option<CanvasPoint>,
{
    /// Creates a new projector from a closure.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> Projector for FnProjector<F>
where
    F: Fn(i32, i32, i32) -> Option<CanvasPoint>,
{
    fn project(&self, x: i32, y: i32, z: i32) -> Option<CanvasPoint> {
        (self.func)(x, y, z)
    }
}

/// The ground area covered by an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footprint {
    /// Centre of the footprint in local units
    pub origin: LocalPoint,
    /// Width in tiles
    pub size_x: i32,
    /// Depth in tiles
    pub size_y: i32,
    /// Plane the actor stands on
    pub plane: usize,
    /// Height subtracted from every sampled corner
    pub z_offset: i32,
}

impl Footprint {
    /// Creates a square footprint of `size` tiles on plane 0.
    pub fn new(origin: LocalPoint, size: i32) -> Self {
        Self {
            origin,
            size_x: size,
            size_y: size,
            plane: 0,
            z_offset: 0,
        }
    }

    /// Sets a rectangular size in tiles.
    pub fn with_size(mut self, size_x: i32, size_y: i32) -> Self {
        self.size_x = size_x;
        self.size_y = size_y;
        self
    }

    /// Sets the plane the footprint lies on.
    pub fn with_plane(mut self, plane: usize) -> Self {
        self.plane = plane;
        self
    }

    /// Sets the height offset subtracted from every corner.
    pub fn with_z_offset(mut self, z_offset: i32) -> Self {
        self.z_offset = z_offset;
        self
    }

    /// Returns the south-west and north-east corners in local units.
    pub fn extent(&self) -> (LocalPoint, LocalPoint) {
        let half_x = self.size_x * LOCAL_TILE_SIZE / 2;
        let half_y = self.size_y * LOCAL_TILE_SIZE / 2;
        (
            self.origin.offset(-half_x, -half_y),
            self.origin.offset(half_x, half_y),
        )
    }

    /// Resolves the plane whose heights apply to this footprint.
    ///
    /// Returns `None` if the origin lies outside the terrain grid.
    fn sampling_plane<T: TerrainView + ?Sized>(&self, terrain: &T) -> Option<usize> {
        let (sx, sy) = self.origin.scene_cell()?;
        Some(height_plane(terrain, sx, sy, self.plane))
    }

    /// Terrain height at a local point, less the footprint's offset.
    fn height_at<T: TerrainView + ?Sized>(&self, terrain: &T, at: LocalPoint, plane: usize) -> i32 {
        tile_height(terrain, at.x, at.y, plane) - self.z_offset
    }
}

/// Linearly interpolates from `a` towards `b` by `t_128 / 128`.
///
/// The step is computed in floating point and truncated toward zero.
pub fn lerp_128(a: i32, b: i32, t_128: i32) -> i32 {
    let t = t_128 as f32 / LOCAL_TILE_SIZE as f32;
    a + ((b - a) as f32 * t) as i32
}

/// Projects a wedge marking the south-west corner of a footprint.
///
/// The marker is a triangle with its right angle on the south-west corner
/// and legs `length_units` long running east and north. The heights of the
/// leg ends follow the terrain slope between the south-west corner and the
/// far corners of the footprint, so the marker hugs sloped ground.
///
/// Returns `None` if the footprint lies outside the terrain grid, has a
/// non-positive size, or if any point fails to project.
pub fn project_footprint_marker<P, T>(
    projector: &P,
    terrain: &T,
    footprint: &Footprint,
    length_units: i32,
) -> Option<CanvasPolygon>
where
    P: Projector + ?Sized,
    T: TerrainView + ?Sized,
{
    if footprint.size_x <= 0 || footprint.size_y <= 0 {
        return None;
    }
    let plane = footprint.sampling_plane(terrain)?;
    let (sw, ne) = footprint.extent();

    let sw_height = footprint.height_at(terrain, sw, plane);
    let east_height = footprint.height_at(terrain, LocalPoint::new(ne.x, sw.y), plane);
    let north_height = footprint.height_at(terrain, LocalPoint::new(sw.x, ne.y), plane);

    // Each leg is scaled by the footprint size along its own axis
    let marker_east_height = lerp_128(sw_height, east_height, length_units / footprint.size_x);
    let marker_north_height = lerp_128(sw_height, north_height, length_units / footprint.size_y);

    let p1 = projector.project(sw.x, sw.y, sw_height)?;
    let p2 = projector.project(sw.x + length_units, sw.y, marker_east_height)?;
    let p3 = projector.project(sw.x, sw.y + length_units, marker_north_height)?;

    trace!("footprint marker at {:?}: {:?} {:?} {:?}", footprint.origin, p1, p2, p3);
    Some(CanvasPolygon::new(vec![p1, p2, p3]))
}

/// Projects the full outline of a footprint.
///
/// The outline runs south-west, south-east, north-east, north-west, with each
/// corner lifted onto the terrain. Absence rules match
/// [`project_footprint_marker`].
pub fn project_tile_area<P, T>(
    projector: &P,
    terrain: &T,
    footprint: &Footprint,
) -> Option<CanvasPolygon>
where
    P: Projector + ?Sized,
    T: TerrainView + ?Sized,
{
    if footprint.size_x <= 0 || footprint.size_y <= 0 {
        return None;
    }
    let plane = footprint.sampling_plane(terrain)?;
    let (sw, ne) = footprint.extent();

    let corners = [
        sw,
        LocalPoint::new(ne.x, sw.y),
        ne,
        LocalPoint::new(sw.x, ne.y),
    ];

    let points = corners
        .iter()
        .map(|&corner| {
            projector.project(corner.x, corner.y, footprint.height_at(terrain, corner, plane))
        })
        .collect::<Option<Vec<_>>>()?;

    Some(CanvasPolygon::new(points))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::{SceneTerrain, TILE_FLAG_BRIDGE};

    /// Oblique projection: height shifts points up the canvas.
    fn make_projector() -> FnProjector<impl Fn(i32, i32, i32) -> Option<CanvasPoint>> {
        FnProjector::new(|x, y, z| Some(CanvasPoint::new(x + 1000, 1000 - y + z)))
    }

    fn sloped_terrain() -> SceneTerrain {
        // Height drops 16 per grid step east and 8 per step north on every plane,
        // with plane p offset by -100 * p
        SceneTerrain::from_fn(|plane, x, y| -(x as i32 * 16) - (y as i32 * 8) - plane as i32 * 100)
    }

    #[test]
    fn lerp_truncates_toward_zero() {
        assert_eq!(lerp_128(0, 100, 64), 50);
        assert_eq!(lerp_128(0, 100, 0), 0);
        assert_eq!(lerp_128(0, 100, 128), 100);
        // -3 * 0.25 = -0.75 truncates to 0
        assert_eq!(lerp_128(10, 7, 32), 10);
        assert_eq!(lerp_128(-10, -21, 64), -15);
    }

    #[test]
    fn footprint_extent() {
        let fp = Footprint::new(LocalPoint::new(1000, 2000), 3);
        let (sw, ne) = fp.extent();
        assert_eq!(sw, LocalPoint::new(1000 - 192, 2000 - 192));
        assert_eq!(ne, LocalPoint::new(1000 + 192, 2000 + 192));
    }

    #[test]
    fn marker_matches_analytic_corners() {
        let terrain = sloped_terrain();
        let projector = make_projector();
        let fp = Footprint::new(LocalPoint::new(64, 64), 1).with_z_offset(5);

        let poly = project_footprint_marker(&projector, &terrain, &fp, 32).unwrap();

        // sw = (0, 0), grid corner (40, 40)
        let sw_h = tile_height(&terrain, 0, 0, 0) - 5;
        let east_h = tile_height(&terrain, 128, 0, 0) - 5;
        let north_h = tile_height(&terrain, 0, 128, 0) - 5;
        assert_eq!(sw_h, -(40 * 16) - (40 * 8) - 5);
        assert_eq!(east_h, sw_h - 16);
        assert_eq!(north_h, sw_h - 8);

        let expected = vec![
            projector.project(0, 0, sw_h).unwrap(),
            projector.project(32, 0, lerp_128(sw_h, east_h, 32)).unwrap(),
            projector.project(0, 32, lerp_128(sw_h, north_h, 32)).unwrap(),
        ];
        assert_eq!(poly.points(), expected.as_slice());
        assert_eq!(poly.len(), 3);
    }

    #[test]
    fn marker_scales_with_footprint_size() {
        let terrain = sloped_terrain();
        let projector = make_projector();
        // Two-tile footprint centred on a grid corner
        let fp = Footprint::new(LocalPoint::new(256, 256), 2);

        let poly = project_footprint_marker(&projector, &terrain, &fp, 64).unwrap();

        let sw_h = tile_height(&terrain, 128, 128, 0);
        let east_h = tile_height(&terrain, 384, 128, 0);
        // t = 64 / 2 = 32 of 128
        let expected_east = projector.project(192, 128, lerp_128(sw_h, east_h, 32)).unwrap();
        assert_eq!(poly.points()[1], expected_east);
    }

    #[test]
    fn non_square_marker_scales_each_leg_by_its_own_axis() {
        let terrain = sloped_terrain();
        let projector = make_projector();
        // One tile east-west, three tiles north-south
        let fp = Footprint::new(LocalPoint::new(64, 192), 1).with_size(1, 3);
        assert_eq!(fp.extent(), (LocalPoint::new(0, 0), LocalPoint::new(128, 384)));

        let poly = project_footprint_marker(&projector, &terrain, &fp, 96).unwrap();

        let sw_h = tile_height(&terrain, 0, 0, 0);
        let east_h = tile_height(&terrain, 128, 0, 0);
        let north_h = tile_height(&terrain, 0, 384, 0);
        assert_eq!(east_h, sw_h - 16);
        assert_eq!(north_h, sw_h - 24);

        // East leg: t = 96 / 1, north leg: t = 96 / 3
        let expected = vec![
            projector.project(0, 0, sw_h).unwrap(),
            projector.project(96, 0, lerp_128(sw_h, east_h, 96)).unwrap(),
            projector.project(0, 96, lerp_128(sw_h, north_h, 32)).unwrap(),
        ];
        assert_eq!(poly.points(), expected.as_slice());
        // Swapping the axes would move both legs
        assert_ne!(lerp_128(sw_h, east_h, 96), lerp_128(sw_h, east_h, 32));
        assert_ne!(lerp_128(sw_h, north_h, 32), lerp_128(sw_h, north_h, 96));
    }

    #[test]
    fn marker_outside_grid_is_none() {
        let terrain = sloped_terrain();
        let projector = make_projector();
        let fp = Footprint::new(LocalPoint::new(-41 * 128, 64), 1);

        assert!(project_footprint_marker(&projector, &terrain, &fp, 32).is_none());
        assert!(project_tile_area(&projector, &terrain, &fp).is_none());
    }

    #[test]
    fn marker_with_any_failed_projection_is_none() {
        let terrain = sloped_terrain();
        // Only points west of x = 20 project
        let projector = FnProjector::new(|x, y, _| (x < 20).then(|| CanvasPoint::new(x, y)));
        let fp = Footprint::new(LocalPoint::new(64, 64), 1);

        assert!(project_footprint_marker(&projector, &terrain, &fp, 32).is_none());
        assert!(project_footprint_marker(&projector, &terrain, &fp, 16).is_some());
    }

    #[test]
    fn non_positive_size_is_none() {
        let terrain = SceneTerrain::new();
        let projector = make_projector();
        let fp = Footprint::new(LocalPoint::new(64, 64), 0);

        assert!(project_footprint_marker(&projector, &terrain, &fp, 32).is_none());
        assert!(project_tile_area(&projector, &terrain, &fp.with_size(1, -1)).is_none());
    }

    #[test]
    fn bridge_cells_sample_the_plane_above() {
        let mut terrain = sloped_terrain();
        let projector = make_projector();
        let fp = Footprint::new(LocalPoint::new(64, 64), 1);

        let ground = project_footprint_marker(&projector, &terrain, &fp, 32).unwrap();

        terrain.set_settings(1, 40, 40, TILE_FLAG_BRIDGE);
        let bridge = project_footprint_marker(&projector, &terrain, &fp, 32).unwrap();

        // Plane 1 sits 100 units higher, which moves every point 100 pixels up
        for (g, b) in ground.points().iter().zip(bridge.points()) {
            assert_eq!(b.x, g.x);
            assert_eq!(b.y, g.y - 100);
        }
    }

    #[test]
    fn tile_area_has_four_lifted_corners() {
        let terrain = sloped_terrain();
        let projector = make_projector();
        let fp = Footprint::new(LocalPoint::new(64, 64), 1).with_plane(2);

        let poly = project_tile_area(&projector, &terrain, &fp).unwrap();

        let corners = [(0, 0), (128, 0), (128, 128), (0, 128)];
        let expected: Vec<_> = corners
            .iter()
            .map(|&(x, y)| projector.project(x, y, tile_height(&terrain, x, y, 2)).unwrap())
            .collect();
        assert_eq!(poly.points(), expected.as_slice());
    }

    #[test]
    fn footprint_at_grid_edge_reads_zero_outside() {
        let terrain = SceneTerrain::from_fn(|_, _, _| -300);
        let projector = make_projector();
        // Centre on the last column: the east corners fall off the grid
        let fp = Footprint::new(LocalPoint::new(143 * 128 + 64, 64), 1);

        let poly = project_tile_area(&projector, &terrain, &fp).unwrap();
        assert_eq!(poly.points()[0], projector.project(143 * 128, 0, -300).unwrap());
        assert_eq!(poly.points()[1], projector.project(144 * 128, 0, 0).unwrap());
    }
}
