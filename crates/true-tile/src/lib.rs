//! True tile markers and actor silhouettes.
//!
//! Projects the ground footprint of an actor onto the canvas, following the
//! terrain under it, and extracts the outline of an actor's mesh where it
//! covers such markers so that the markers can be drawn beneath the actor.

mod camera;
mod config;
mod edge;
mod overlay;
mod polygon;
mod projection;
mod rectangle;
mod silhouette;
mod terrain;
mod triangle;

/// A point on the canvas, in pixels. `y` grows downwards.
pub type CanvasPoint = nalgebra::Point2<i32>;

pub use camera::{scene_to_world, PerspectiveCamera};
pub use config::{BorderStyle, ConfigError, OverlayConfig, Rgba};
pub use edge::Edge;
pub use overlay::{
    corner_segments, footprint_anchor, project_mesh, Actor, FrameGeometry, TileMarker,
    TrueTileOverlay, Viewport,
};
pub use polygon::CanvasPolygon;
pub use projection::{
    lerp_128, project_footprint_marker, project_tile_area, FnProjector, Footprint, Projector,
};
pub use rectangle::CanvasRect;
pub use silhouette::{
    extract_silhouette, FilterSet, MeshView, SilhouetteBuilder, TriangleMesh, TRANSPARENCY_CUTOFF,
};
pub use terrain::{
    height_plane, scene_cell, tile_height, LocalPoint, SceneTerrain, TerrainView, LOCAL_COORD_BITS,
    LOCAL_TILE_SIZE, MAX_PLANES, SCENE_OFFSET, SCENE_SIZE, TILE_FLAG_BRIDGE,
};
pub use triangle::{CanvasTriangle, Facing};
