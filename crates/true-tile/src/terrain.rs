//! Scene coordinates and terrain height sampling.
//!
//! Local coordinates are fixed-point scene units where [`LOCAL_TILE_SIZE`]
//! units make one tile edge. The terrain is a bounded grid of
//! [`SCENE_SIZE`]×[`SCENE_SIZE`] cells whose first cell sits [`SCENE_OFFSET`]
//! tiles before local origin. Heights grow downwards, so subtracting from a
//! height raises a point.

/// Scene units per tile edge.
pub const LOCAL_TILE_SIZE: i32 = 128;

/// log2 of [`LOCAL_TILE_SIZE`].
pub const LOCAL_COORD_BITS: i32 = 7;

/// Number of cells along each axis of the extended scene grid.
pub const SCENE_SIZE: usize = 184;

/// Cells between the extended grid origin and local origin.
pub const SCENE_OFFSET: i32 = 40;

/// Number of height planes.
pub const MAX_PLANES: usize = 4;

/// Extended tile settings bit marking a cell whose geometry belongs to the
/// plane above (bridges and similar overlays).
pub const TILE_FLAG_BRIDGE: u8 = 2;

/// The height grid has one more sample than cells along each axis.
const HEIGHT_GRID_SIZE: usize = SCENE_SIZE + 1;

/// A point in local scene space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LocalPoint {
    pub x: i32,
    pub y: i32,
}

impl LocalPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Creates the local point at the centre of a scene tile.
    pub fn from_tile(tile_x: i32, tile_y: i32) -> Self {
        Self {
            x: (tile_x << LOCAL_COORD_BITS) + LOCAL_TILE_SIZE / 2,
            y: (tile_y << LOCAL_COORD_BITS) + LOCAL_TILE_SIZE / 2,
        }
    }

    /// Returns the point moved by the given number of scene units.
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns the tile column this point lies in.
    #[inline]
    pub fn tile_x(&self) -> i32 {
        self.x >> LOCAL_COORD_BITS
    }

    /// Returns the tile row this point lies in.
    #[inline]
    pub fn tile_y(&self) -> i32 {
        self.y >> LOCAL_COORD_BITS
    }

    /// Returns the extended grid cell of this point, or `None` if it lies
    /// outside the grid.
    pub fn scene_cell(&self) -> Option<(usize, usize)> {
        scene_cell(self.x, self.y)
    }
}

/// Converts local coordinates to an extended grid cell, if in bounds.
pub fn scene_cell(local_x: i32, local_y: i32) -> Option<(usize, usize)> {
    let sx = (local_x >> LOCAL_COORD_BITS) + SCENE_OFFSET;
    let sy = (local_y >> LOCAL_COORD_BITS) + SCENE_OFFSET;
    let sx = usize::try_from(sx).ok().filter(|&v| v < SCENE_SIZE)?;
    let sy = usize::try_from(sy).ok().filter(|&v| v < SCENE_SIZE)?;
    Some((sx, sy))
}

/// Read-only access to the scene's terrain grid.
///
/// Implementations must return 0 for any index they do not store rather
/// than panicking.
pub trait TerrainView {
    /// Height sample at a grid corner. Valid corners are `0..=SCENE_SIZE`.
    fn tile_height(&self, plane: usize, scene_x: usize, scene_y: usize) -> i32;

    /// Extended settings flags of a grid cell. Valid cells are `0..SCENE_SIZE`.
    fn tile_settings(&self, plane: usize, scene_x: usize, scene_y: usize) -> u8;
}

/// Picks the plane whose heights should be used for a cell.
///
/// Cells flagged with [`TILE_FLAG_BRIDGE`] on plane 1 draw their ground one
/// plane higher than their nominal plane.
pub fn height_plane<T: TerrainView + ?Sized>(
    terrain: &T,
    scene_x: usize,
    scene_y: usize,
    plane: usize,
) -> usize {
    if plane < MAX_PLANES - 1
        && terrain.tile_settings(1, scene_x, scene_y) & TILE_FLAG_BRIDGE == TILE_FLAG_BRIDGE
    {
        plane + 1
    } else {
        plane
    }
}

/// Samples the terrain height at a local point by bilinear interpolation of
/// the four surrounding grid heights.
///
/// Uses the same fixed-point arithmetic as the terrain source: products are
/// divided by 128 with an arithmetic shift, which floors negative sums.
/// Points outside the grid have height 0.
pub fn tile_height<T: TerrainView + ?Sized>(
    terrain: &T,
    local_x: i32,
    local_y: i32,
    plane: usize,
) -> i32 {
    let Some((sx, sy)) = scene_cell(local_x, local_y) else {
        return 0;
    };

    let x = local_x & (LOCAL_TILE_SIZE - 1);
    let y = local_y & (LOCAL_TILE_SIZE - 1);

    let h00 = terrain.tile_height(plane, sx, sy);
    let h10 = terrain.tile_height(plane, sx + 1, sy);
    let h01 = terrain.tile_height(plane, sx, sy + 1);
    let h11 = terrain.tile_height(plane, sx + 1, sy + 1);

    let south = (x * h10 + (LOCAL_TILE_SIZE - x) * h00) >> LOCAL_COORD_BITS;
    let north = (h01 * (LOCAL_TILE_SIZE - x) + x * h11) >> LOCAL_COORD_BITS;
    ((LOCAL_TILE_SIZE - y) * south + y * north) >> LOCAL_COORD_BITS
}

/// An owned terrain grid.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneTerrain {
    heights: Vec<i32>,
    settings: Vec<u8>,
}

impl Default for SceneTerrain {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneTerrain {
    /// Creates a flat terrain with every height and flag set to zero.
    pub fn new() -> Self {
        Self {
            heights: vec![0; MAX_PLANES * HEIGHT_GRID_SIZE * HEIGHT_GRID_SIZE],
            settings: vec![0; MAX_PLANES * SCENE_SIZE * SCENE_SIZE],
        }
    }

    /// Creates a terrain whose heights are produced by `height(plane, x, y)`.
    pub fn from_fn<F>(mut height: F) -> Self
    where
        F: FnMut(usize, usize, usize) -> i32,
    {
        let mut terrain = Self::new();
        for plane in 0..MAX_PLANES {
            for x in 0..HEIGHT_GRID_SIZE {
                for y in 0..HEIGHT_GRID_SIZE {
                    terrain.set_height(plane, x, y, height(plane, x, y));
                }
            }
        }
        terrain
    }

    fn height_index(plane: usize, x: usize, y: usize) -> Option<usize> {
        (plane < MAX_PLANES && x < HEIGHT_GRID_SIZE && y < HEIGHT_GRID_SIZE)
            .then(|| (plane * HEIGHT_GRID_SIZE + x) * HEIGHT_GRID_SIZE + y)
    }

    fn settings_index(plane: usize, x: usize, y: usize) -> Option<usize> {
        (plane < MAX_PLANES && x < SCENE_SIZE && y < SCENE_SIZE)
            .then(|| (plane * SCENE_SIZE + x) * SCENE_SIZE + y)
    }

    /// Sets the height of a grid corner. Out-of-range corners are ignored.
    pub fn set_height(&mut self, plane: usize, x: usize, y: usize, height: i32) {
        if let Some(i) = Self::height_index(plane, x, y) {
            self.heights[i] = height;
        }
    }

    /// Sets the settings flags of a cell. Out-of-range cells are ignored.
    pub fn set_settings(&mut self, plane: usize, x: usize, y: usize, flags: u8) {
        if let Some(i) = Self::settings_index(plane, x, y) {
            self.settings[i] = flags;
        }
    }
}

impl TerrainView for SceneTerrain {
    fn tile_height(&self, plane: usize, scene_x: usize, scene_y: usize) -> i32 {
        Self::height_index(plane, scene_x, scene_y).map_or(0, |i| self.heights[i])
    }

    fn tile_settings(&self, plane: usize, scene_x: usize, scene_y: usize) -> u8 {
        Self::settings_index(plane, scene_x, scene_y).map_or(0, |i| self.settings[i])
    }
}
