//! Shared drawing and scene utilities for the true tile demos.

use std::hash::{Hash, Hasher};

use macroquad::prelude::*;
use nalgebra::Point3;
use true_tile::{
    corner_segments, project_tile_area, BorderStyle, CanvasPoint, CanvasPolygon, CanvasRect,
    CanvasTriangle, FrameGeometry, Footprint, LocalPoint, MeshView, OverlayConfig,
    PerspectiveCamera, Projector, Rgba, SceneTerrain, TerrainView, TriangleMesh,
};

/// Converts a configured colour to a macroquad colour.
pub fn to_color(rgba: Rgba) -> Color {
    let [r, g, b, a] = rgba;
    Color::from_rgba(r, g, b, a)
}

/// Generates a deterministic colour from a polygon's points.
/// The same outline keeps its colour across frames.
pub fn polygon_color(polygon: &CanvasPolygon) -> Color {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    for p in polygon.points() {
        p.x.hash(&mut hasher);
        p.y.hash(&mut hasher);
    }
    let hash = hasher.finish();

    let r = ((hash >> 16) & 0xFF) as u8;
    let g = ((hash >> 8) & 0xFF) as u8;
    let b = (hash & 0xFF) as u8;

    Color::from_rgba(r.max(40), g.max(40), b.max(40), 255)
}

fn to_vec2(p: CanvasPoint) -> Vec2 {
    vec2(p.x as f32, p.y as f32)
}

fn draw_segment(a: CanvasPoint, b: CanvasPoint, thickness: f32, color: Color) {
    draw_line(a.x as f32, a.y as f32, b.x as f32, b.y as f32, thickness, color);
}

/// Fills a convex polygon by fan triangulation.
pub fn fill_convex(polygon: &CanvasPolygon, color: Color) {
    let points = polygon.points();
    if points.len() < 3 {
        return;
    }
    for i in 1..points.len() - 1 {
        draw_triangle(to_vec2(points[0]), to_vec2(points[i]), to_vec2(points[i + 1]), color);
    }
}

/// Fills any polygon with the even-odd rule, one scanline per canvas row.
pub fn fill_polygon(polygon: &CanvasPolygon, color: Color) {
    let Some(bounds) = polygon.bounds() else {
        return;
    };

    let mut crossings = Vec::new();
    for row in bounds.min().y..bounds.max().y {
        let y = row as f32 + 0.5;
        crossings.clear();
        crossings.extend(polygon.segments().filter_map(|(a, b)| {
            let (ay, by) = (a.y as f32, b.y as f32);
            let (ax, bx) = (a.x as f32, b.x as f32);
            ((ay <= y) != (by <= y)).then(|| ax + (y - ay) / (by - ay) * (bx - ax))
        }));
        crossings.sort_by(f32::total_cmp);

        for pair in crossings.chunks_exact(2) {
            draw_line(pair[0], y, pair[1], y, 1.0, color);
        }
    }
}

/// Strokes the closed outline of a polygon.
pub fn draw_outline(polygon: &CanvasPolygon, thickness: f32, color: Color) {
    for (a, b) in polygon.segments() {
        draw_segment(a, b, thickness, color);
    }
}

/// Draws the markers of a frame the way the overlay configures them.
pub fn draw_markers(frame: &FrameGeometry, config: &OverlayConfig) {
    let border = to_color(config.tile_color);
    let fill = to_color(config.fill_color);
    let corner_color = to_color(config.corner_color);

    for marker in &frame.markers {
        if let Some(corner) = &marker.corner {
            fill_convex(corner, corner_color);
            draw_outline(corner, config.border_size, corner_color);
        }

        let Some(area) = &marker.area else {
            continue;
        };
        fill_convex(area, fill);
        match config.border_style {
            BorderStyle::Outline => draw_outline(area, config.border_size, border),
            BorderStyle::Corners => {
                for (a, b) in corner_segments(area, config.border_fraction()) {
                    draw_segment(a, b, config.border_size, border);
                }
            }
        }
    }
}

/// Draws the front-facing triangles of a projected mesh.
pub fn draw_mesh_faces<M>(mesh: &M, projected: &[Option<CanvasPoint>], color: Color)
where
    M: MeshView + ?Sized,
{
    let vertex = |i: usize| projected.get(i).copied().flatten();
    for face in 0..mesh.face_count() {
        let [a, b, c] = mesh.face(face);
        let (Some(a), Some(b), Some(c)) = (vertex(a), vertex(b), vertex(c)) else {
            continue;
        };
        if CanvasTriangle::new(a, b, c).is_front_facing() {
            draw_triangle(to_vec2(a), to_vec2(b), to_vec2(c), color);
        }
    }
}

/// Draws the outlines of the tiles within `radius` tiles of `centre`.
pub fn draw_tile_grid<P, T>(
    projector: &P,
    terrain: &T,
    centre: LocalPoint,
    radius: i32,
    color: Color,
) where
    P: Projector + ?Sized,
    T: TerrainView + ?Sized,
{
    for tx in centre.tile_x() - radius..=centre.tile_x() + radius {
        for ty in centre.tile_y() - radius..=centre.tile_y() + radius {
            let footprint = Footprint::new(LocalPoint::from_tile(tx, ty), 1);
            if let Some(tile) = project_tile_area(projector, terrain, &footprint) {
                draw_outline(&tile, 1.0, color);
            }
        }
    }
}

/// Generates a box standing on its origin, `half` units out on every side
/// and `height` tall, with faces wound counter-clockwise seen from outside.
pub fn generate_box_mesh(half: i32, height: i32) -> TriangleMesh {
    let top = -height;
    let corners = vec![
        [-half, -half, 0],   // 0: south-west bottom
        [half, -half, 0],    // 1: south-east bottom
        [half, half, 0],     // 2: north-east bottom
        [-half, half, 0],    // 3: north-west bottom
        [-half, -half, top], // 4: south-west top
        [half, -half, top],  // 5: south-east top
        [half, half, top],   // 6: north-east top
        [-half, half, top],  // 7: north-west top
    ];

    let quads: [[usize; 4]; 6] = [
        [4, 5, 6, 7], // top
        [0, 3, 2, 1], // bottom
        [0, 1, 5, 4], // south
        [2, 3, 7, 6], // north
        [1, 2, 6, 5], // east
        [3, 0, 4, 7], // west
    ];

    let faces = quads
        .iter()
        .flat_map(|&[a, b, c, d]| [[a, b, c], [a, c, d]])
        .collect();
    TriangleMesh::new(corners, faces)
}

/// Generates rolling terrain: heights follow two crossing sine waves.
pub fn generate_hills(amplitude: f32, wavelength_tiles: f32) -> SceneTerrain {
    SceneTerrain::from_fn(|plane, x, y| {
        let phase = std::f32::consts::TAU / wavelength_tiles;
        let wave = (x as f32 * phase).sin() + (y as f32 * phase * 0.7).cos();
        (wave * amplitude) as i32 - plane as i32 * 240
    })
}

/// Simple orbit camera around a point of the scene.
pub struct OrbitCamera {
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    /// Scene point the camera looks at
    pub target: Point3<f32>,
    /// Multiplier for scroll wheel zoom
    pub zoom_speed: f32,
    /// Minimum distance from target
    pub min_distance: f32,
    /// Maximum distance from target
    pub max_distance: f32,
}

impl OrbitCamera {
    /// Creates a new orbit camera with the given configuration.
    pub fn new(distance: f32, yaw: f32, pitch: f32) -> Self {
        Self {
            distance,
            yaw,
            pitch,
            target: Point3::origin(),
            zoom_speed: 60.0,
            min_distance: 300.0,
            max_distance: 6000.0,
        }
    }

    /// Sets the zoom configuration (speed and distance limits).
    pub fn with_zoom(mut self, speed: f32, min: f32, max: f32) -> Self {
        self.zoom_speed = speed;
        self.min_distance = min;
        self.max_distance = max;
        self
    }

    /// Centres the camera on the middle of a tile.
    pub fn with_target(mut self, target: LocalPoint) -> Self {
        self.target = Point3::new(target.x as f32, target.y as f32, 0.0);
        self
    }

    /// Updates camera state from user input (mouse drag, scroll, arrow keys).
    pub fn update(&mut self) {
        if is_mouse_button_down(MouseButton::Left) {
            let delta = mouse_delta_position();
            self.yaw -= delta.x * 2.0;
            self.pitch -= delta.y * 2.0;
        }

        // Stay above the ground and short of straight down
        self.pitch = self.pitch.clamp(0.05, 1.5);

        let scroll = mouse_wheel().1;
        self.distance -= scroll * self.zoom_speed;
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);

        if is_key_down(KeyCode::Left) {
            self.yaw += 0.02;
        }
        if is_key_down(KeyCode::Right) {
            self.yaw -= 0.02;
        }
        if is_key_down(KeyCode::Up) {
            self.pitch += 0.02;
        }
        if is_key_down(KeyCode::Down) {
            self.pitch -= 0.02;
        }
    }

    /// Returns the camera position in scene space. Yaw 0 looks north.
    pub fn position(&self) -> Point3<f32> {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = -self.distance * self.pitch.cos() * self.yaw.cos();
        let z = -self.distance * self.pitch.sin();
        self.target + nalgebra::Vector3::new(x, y, z)
    }

    /// Builds a projector for the current window.
    pub fn projector(&self) -> PerspectiveCamera {
        let width = screen_width().max(1.0) as i32;
        let height = screen_height().max(1.0) as i32;
        let viewport = CanvasRect::from_origin_size(0, 0, width, height);
        PerspectiveCamera::look_at(self.position(), self.target, viewport)
    }
}
