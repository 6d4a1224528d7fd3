use log::{info, warn};
use macroquad::prelude::*;
use true_tile::{
    project_mesh, Actor, BorderStyle, LocalPoint, OverlayConfig, TrueTileOverlay, Viewport,
};
use true_tile_viz::{
    draw_markers, draw_mesh_faces, draw_outline, draw_tile_grid, fill_polygon, generate_box_mesh,
    generate_hills, polygon_color, OrbitCamera,
};

const BODY_COLOR: Color = Color::new(0.55, 0.55, 0.6, 1.0);

fn load_config() -> OverlayConfig {
    let Some(path) = std::env::args().nth(1) else {
        return OverlayConfig::default();
    };
    match OverlayConfig::load(&path) {
        Ok(config) => {
            info!("loaded config from {}", path);
            config
        }
        Err(e) => {
            warn!("using default config: {}", e);
            OverlayConfig::default()
        }
    }
}

#[macroquad::main("True Tile")]
async fn main() {
    env_logger::init();

    let mut config = load_config();
    let terrain = generate_hills(60.0, 9.0);

    let small = generate_box_mesh(40, 220);
    let large = generate_box_mesh(150, 300);
    let player_mesh = generate_box_mesh(35, 200);

    let centre = LocalPoint::from_tile(20, 20);
    let mut camera = OrbitCamera::new(2200.0, 0.3, 0.7).with_target(centre);
    let mut show_masks = false;
    let mut walk = 0.0f32;

    loop {
        camera.update();
        if is_key_pressed(KeyCode::C) {
            config.border_style = match config.border_style {
                BorderStyle::Outline => BorderStyle::Corners,
                BorderStyle::Corners => BorderStyle::Outline,
            };
        }
        if is_key_pressed(KeyCode::I) {
            config.improved_tile_rendering = !config.improved_tile_rendering;
        }
        if is_key_pressed(KeyCode::M) {
            show_masks = !show_masks;
        }
        let overlay = TrueTileOverlay::new(config.clone());

        // The small target walks back and forth; its model trails its true tile
        walk += get_frame_time();
        let step = (walk.sin() * 192.0) as i32;
        let small_tile = LocalPoint::from_tile(19, 21);
        let targets = [
            Actor::new(small_tile, 1)
                .with_mesh(&small)
                .with_position(small_tile.offset(step, 0))
                .with_orientation(512),
            Actor::new(LocalPoint::from_tile(21, 19), 3).with_mesh(&large),
        ];
        let player = [Actor::new(LocalPoint::from_tile(19, 19), 1).with_mesh(&player_mesh)];

        let projector = camera.projector();
        let viewport = Viewport::from(projector.viewport());
        let frame = overlay.render_frame(&projector, &terrain, 0, &targets, &player, &viewport);

        clear_background(Color::from_rgba(20, 24, 20, 255));
        draw_tile_grid(&projector, &terrain, centre, 8, Color::from_rgba(60, 80, 60, 255));

        for actor in targets.iter().chain(&player) {
            if let Some(mesh) = actor.mesh {
                let origin = actor.model_origin(&terrain, 0);
                let projected = project_mesh(&projector, mesh, origin, actor.orientation);
                draw_mesh_faces(mesh, &projected, BODY_COLOR);
            }
        }

        draw_markers(&frame, &config);

        // Clearing the overlay reveals the actor below, so paint the body back
        for mask in &frame.erase_masks {
            fill_polygon(mask, BODY_COLOR);
            if show_masks {
                draw_outline(mask, 1.0, polygon_color(mask));
            }
        }

        draw_text("True Tile", 10.0, 25.0, 22.0, WHITE);
        draw_text(
            &format!(
                "[C] border: {:?} | [I]mproved rendering: {} | [M]asks: {}",
                config.border_style, config.improved_tile_rendering, show_masks
            ),
            10.0,
            45.0,
            18.0,
            YELLOW,
        );
        draw_text(
            &format!("{} markers, {} erase masks", frame.markers.len(), frame.erase_masks.len()),
            10.0,
            65.0,
            18.0,
            GRAY,
        );
        draw_text("Drag mouse to rotate, scroll to zoom", 10.0, 85.0, 16.0, DARKGRAY);
        draw_text(&format!("FPS: {}", get_fps()), 10.0, 105.0, 16.0, DARKGRAY);

        next_frame().await
    }
}
