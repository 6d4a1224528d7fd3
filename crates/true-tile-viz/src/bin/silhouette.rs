use log::debug;
use macroquad::prelude::*;
use true_tile::{
    extract_silhouette, project_mesh, project_tile_area, Actor, FilterSet, LocalPoint, SceneTerrain,
};
use true_tile_viz::{
    draw_mesh_faces, draw_outline, draw_tile_grid, fill_convex, generate_box_mesh, polygon_color,
    OrbitCamera,
};

/// Orientation units turned per second.
const SPIN_SPEED: f32 = 256.0;

#[macroquad::main("True Tile Silhouette")]
async fn main() {
    env_logger::init();

    let terrain = SceneTerrain::new();
    let mesh = generate_box_mesh(110, 260);
    let tile = LocalPoint::from_tile(30, 30);

    let mut camera = OrbitCamera::new(1400.0, 0.5, 0.6)
        .with_zoom(40.0, 400.0, 4000.0)
        .with_target(tile);
    let mut orientation = 0.0f32;
    let mut paused = false;

    loop {
        camera.update();
        if is_key_pressed(KeyCode::Space) {
            paused = !paused;
        }
        if !paused {
            orientation += get_frame_time() * SPIN_SPEED;
        }

        let actor = Actor::new(tile, 2).with_mesh(&mesh).with_orientation(orientation as i32);
        let projector = camera.projector();

        let area = project_tile_area(&projector, &terrain, &actor.footprint(0));
        let filter: FilterSet = area.iter().cloned().collect();
        let origin = actor.model_origin(&terrain, 0);
        let projected = project_mesh(&projector, &mesh, origin, actor.orientation);
        let outlines = extract_silhouette(&mesh, &projected, &filter);
        debug!("orientation {}: {} outlines", actor.orientation, outlines.len());

        clear_background(Color::from_rgba(18, 18, 28, 255));
        draw_tile_grid(&projector, &terrain, tile, 6, Color::from_rgba(50, 50, 70, 255));
        draw_mesh_faces(&mesh, &projected, Color::from_rgba(90, 90, 110, 255));

        if let Some(area) = &area {
            fill_convex(area, Color::from_rgba(255, 192, 0, 60));
            draw_outline(area, 2.0, Color::from_rgba(255, 192, 0, 200));
        }
        for outline in &outlines {
            draw_outline(outline, 2.0, polygon_color(outline));
        }

        draw_text("Silhouette over a 2x2 footprint", 10.0, 25.0, 20.0, WHITE);
        draw_text(
            &format!(
                "Orientation: {} | Outlines: {} | Points: {}",
                actor.orientation.rem_euclid(2048),
                outlines.len(),
                outlines.iter().map(|o| o.len()).sum::<usize>()
            ),
            10.0,
            45.0,
            18.0,
            GRAY,
        );
        draw_text("[Space] pause | drag to rotate, scroll to zoom", 10.0, 65.0, 16.0, DARKGRAY);
        draw_text(&format!("FPS: {}", get_fps()), 10.0, 85.0, 16.0, DARKGRAY);

        next_frame().await
    }
}
