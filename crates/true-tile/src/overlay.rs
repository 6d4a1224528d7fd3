//! The per-frame geometry pass of the true tile overlay.
//!
//! For every target actor the pass projects the tile area it truly occupies
//! (and optionally a corner marker), then cuts the silhouettes of the
//! targets and any extra actors out of those areas. Drawing is left to the
//! caller: fill and stroke the markers, then clear the erase masks.

use log::debug;
use nalgebra::Point3;

use crate::terrain::{height_plane, tile_height, LOCAL_TILE_SIZE};
use crate::{
    extract_silhouette, project_footprint_marker, project_tile_area, CanvasPoint, CanvasPolygon,
    CanvasRect, FilterSet, Footprint, LocalPoint, MeshView, OverlayConfig, Projector, TerrainView,
};

/// Orientation units per full turn.
const ORIENTATION_STEPS: i32 = 2048;

/// Fixed-point scale of the rotation factors.
const ROTATION_BITS: u32 = 16;

/// Returns the centre of a footprint of `size` tiles whose south-west tile
/// is centred on `location`.
pub fn footprint_anchor(location: LocalPoint, size: i32) -> LocalPoint {
    let shift = LOCAL_TILE_SIZE * size / 2 - LOCAL_TILE_SIZE / 2;
    location.offset(shift, shift)
}

/// Returns the corner strokes of a polygon.
///
/// Each vertex gets two segments, running `fraction` of the way towards the
/// previous and the next vertex.
pub fn corner_segments(polygon: &CanvasPolygon, fraction: f32) -> Vec<(CanvasPoint, CanvasPoint)> {
    let points = polygon.points();
    let n = points.len();
    let mut segments = Vec::with_capacity(n * 2);

    for (i, &point) in points.iter().enumerate() {
        let prev = points[(i + n - 1) % n];
        let next = points[(i + 1) % n];
        segments.push((point, partial_toward(point, prev, fraction)));
        segments.push((point, partial_toward(point, next, fraction)));
    }
    segments
}

fn partial_toward(from: CanvasPoint, to: CanvasPoint, fraction: f32) -> CanvasPoint {
    // Half-way cases round up, not away from zero
    let step = |from: i32, to: i32| {
        let delta = (f64::from(to) - f64::from(from)) * f64::from(fraction);
        (f64::from(from) + (delta + 0.5).floor()) as i32
    };
    CanvasPoint::new(step(from.x, to.x), step(from.y, to.y))
}

/// Projects every vertex of a mesh placed at `origin`.
///
/// The mesh is first turned around its vertical axis by `orientation`
/// (2048 units per turn, clockwise seen from above). Vertices that
/// cannot be projected map to `None`.
pub fn project_mesh<P, M>(
    projector: &P,
    mesh: &M,
    origin: Point3<i32>,
    orientation: i32,
) -> Vec<Option<CanvasPoint>>
where
    P: Projector + ?Sized,
    M: MeshView + ?Sized,
{
    let turn = orientation.rem_euclid(ORIENTATION_STEPS) as f64 / ORIENTATION_STEPS as f64;
    let angle = turn * std::f64::consts::TAU;
    let scale = (1i64 << ROTATION_BITS) as f64;
    let sin = (angle.sin() * scale) as i64;
    let cos = (angle.cos() * scale) as i64;

    (0..mesh.vertex_count())
        .map(|i| {
            let v = mesh.vertex(i);
            let (x, y) = (i64::from(v.x), i64::from(v.y));
            let rx = ((x * cos + y * sin) >> ROTATION_BITS) as i32;
            let ry = ((y * cos - x * sin) >> ROTATION_BITS) as i32;
            projector.project(origin.x + rx, origin.y + ry, origin.z + v.z)
        })
        .collect()
}

/// The area of the canvas the scene is drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    bounds: CanvasRect,
}

impl Viewport {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            bounds: CanvasRect::from_origin_size(x, y, width, height),
        }
    }

    #[inline]
    pub fn bounds(&self) -> CanvasRect {
        self.bounds
    }

    /// Checks whether any projected point lies inside the viewport.
    pub fn any_visible(&self, points: &[Option<CanvasPoint>]) -> bool {
        points.iter().flatten().any(|&p| self.bounds.contains(p))
    }
}

impl From<CanvasRect> for Viewport {
    fn from(bounds: CanvasRect) -> Self {
        Self { bounds }
    }
}

/// An actor in the scene.
#[derive(Clone, Copy)]
pub struct Actor<'a> {
    /// Centre of the south-west tile the actor truly occupies
    pub tile: LocalPoint,
    /// Footprint size in tiles
    pub size: i32,
    /// Where the model is drawn, which lags behind `tile` while moving
    pub position: LocalPoint,
    pub orientation: i32,
    pub mesh: Option<&'a dyn MeshView>,
}

impl<'a> Actor<'a> {
    /// Creates an actor standing still on its tile, without a mesh.
    pub fn new(tile: LocalPoint, size: i32) -> Self {
        Self {
            tile,
            size,
            position: footprint_anchor(tile, size),
            orientation: 0,
            mesh: None,
        }
    }

    pub fn with_mesh(mut self, mesh: &'a dyn MeshView) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn with_position(mut self, position: LocalPoint) -> Self {
        self.position = position;
        self
    }

    pub fn with_orientation(mut self, orientation: i32) -> Self {
        self.orientation = orientation;
        self
    }

    /// Returns the footprint of the tiles the actor occupies.
    pub fn footprint(&self, plane: usize) -> Footprint {
        Footprint::new(footprint_anchor(self.tile, self.size), self.size).with_plane(plane)
    }

    /// Returns where the model is placed: its position, at the height of
    /// the ground under its north-east tile.
    pub fn model_origin<T: TerrainView + ?Sized>(&self, terrain: &T, plane: usize) -> Point3<i32> {
        let shift = LOCAL_TILE_SIZE * (self.size - 1) / 2;
        let at = self.position.offset(shift, shift);
        let plane = at
            .scene_cell()
            .map_or(plane, |(sx, sy)| height_plane(terrain, sx, sy, plane));
        Point3::new(self.position.x, self.position.y, tile_height(terrain, at.x, at.y, plane))
    }
}

/// The projected markers of one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMarker {
    /// Outline of the occupied tiles
    pub area: Option<CanvasPolygon>,
    /// Wedge on the south-west corner
    pub corner: Option<CanvasPolygon>,
}

/// Everything the overlay draws in one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameGeometry {
    pub markers: Vec<TileMarker>,
    /// Outlines to clear after the markers are drawn
    pub erase_masks: Vec<CanvasPolygon>,
}

/// Computes marker and erase geometry for a set of target actors.
#[derive(Debug, Clone, Default)]
pub struct TrueTileOverlay {
    config: OverlayConfig,
}

impl TrueTileOverlay {
    pub fn new(config: OverlayConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    fn marker_for<P, T>(
        &self,
        projector: &P,
        terrain: &T,
        plane: usize,
        actor: &Actor<'_>,
    ) -> TileMarker
    where
        P: Projector + ?Sized,
        T: TerrainView + ?Sized,
    {
        let footprint = actor.footprint(plane);

        let wants_corner = !self.config.show_corner_only_large || actor.size > 1;
        let corner = if self.config.show_corner && wants_corner {
            let length = self.config.corner_length * actor.size;
            project_footprint_marker(projector, terrain, &footprint, length)
        } else {
            None
        };

        TileMarker {
            area: project_tile_area(projector, terrain, &footprint),
            corner,
        }
    }

    fn erase_mask<P, T>(
        &self,
        projector: &P,
        terrain: &T,
        plane: usize,
        actor: &Actor<'_>,
        filter: &FilterSet,
        viewport: &Viewport,
    ) -> Vec<CanvasPolygon>
    where
        P: Projector + ?Sized,
        T: TerrainView + ?Sized,
    {
        let Some(mesh) = actor.mesh else {
            return Vec::new();
        };

        let origin = actor.model_origin(terrain, plane);
        let projected = project_mesh(projector, mesh, origin, actor.orientation);
        if !viewport.any_visible(&projected) {
            return Vec::new();
        }

        extract_silhouette(mesh, &projected, filter)
    }

    /// Runs the geometry pass for one frame.
    ///
    /// `targets` get markers. When silhouette erasing is enabled, both
    /// `targets` and `erase_also` (typically the local player) are cut out of
    /// the projected tile areas.
    pub fn render_frame<P, T>(
        &self,
        projector: &P,
        terrain: &T,
        plane: usize,
        targets: &[Actor<'_>],
        erase_also: &[Actor<'_>],
        viewport: &Viewport,
    ) -> FrameGeometry
    where
        P: Projector + ?Sized,
        T: TerrainView + ?Sized,
    {
        let markers: Vec<TileMarker> = targets
            .iter()
            .map(|actor| self.marker_for(projector, terrain, plane, actor))
            .collect();

        let filter: FilterSet = markers.iter().filter_map(|m| m.area.clone()).collect();

        let mut erase_masks = Vec::new();
        if self.config.improved_tile_rendering && !filter.is_empty() {
            for actor in targets.iter().chain(erase_also) {
                let mask = self.erase_mask(projector, terrain, plane, actor, &filter, viewport);
                erase_masks.extend(mask);
            }
        }

        debug!(
            "frame: {} markers, {} tile areas, {} erase masks",
            markers.len(),
            filter.len(),
            erase_masks.len()
        );

        FrameGeometry { markers, erase_masks }
    }
}
