//! Overlay settings.

use std::fs;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A colour as red, green, blue and alpha bytes.
pub type Rgba = [u8; 4];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// How the border of a tile area is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderStyle {
    /// The whole outline.
    #[default]
    Outline,
    /// Only a stretch of each edge next to every corner.
    Corners,
}

/// Settings of the true tile overlay.
///
/// Every field has a default, so a JSON document only needs to name the
/// settings it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub tile_color: Rgba,
    pub fill_color: Rgba,
    pub corner_color: Rgba,
    pub border_size: f32,
    pub border_style: BorderStyle,
    /// Percent of each edge drawn next to a corner with [`BorderStyle::Corners`]
    pub border_length: u32,
    pub show_corner: bool,
    /// Only draw the corner marker for actors larger than one tile
    pub show_corner_only_large: bool,
    /// Length of the corner marker legs, in local units per tile
    pub corner_length: i32,
    /// Erase actor silhouettes so markers appear beneath actors
    pub improved_tile_rendering: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            tile_color: [255, 192, 0, 96],
            fill_color: [0, 0, 0, 50],
            corner_color: [233, 177, 0, 68],
            border_size: 2.0,
            border_style: BorderStyle::Outline,
            border_length: 25,
            show_corner: true,
            show_corner_only_large: true,
            corner_length: 32,
            improved_tile_rendering: true,
        }
    }
}

impl OverlayConfig {
    pub const MAX_BORDER_LENGTH: u32 = 100;
    pub const CORNER_LENGTH_RANGE: (i32, i32) = (1, 128);

    /// Parses a configuration from JSON and validates it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.validate())
    }

    /// Reads a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Clamps out-of-range values into range.
    pub fn validate(mut self) -> Self {
        if !(self.border_size.is_finite() && self.border_size >= 0.0) {
            warn!("border_size {} is invalid, using 0", self.border_size);
            self.border_size = 0.0;
        }

        if self.border_length > Self::MAX_BORDER_LENGTH {
            warn!(
                "border_length {} exceeds {}, clamping",
                self.border_length,
                Self::MAX_BORDER_LENGTH
            );
            self.border_length = Self::MAX_BORDER_LENGTH;
        }

        let (min, max) = Self::CORNER_LENGTH_RANGE;
        if !(min..=max).contains(&self.corner_length) {
            let clamped = self.corner_length.clamp(min, max);
            warn!("corner_length {} out of range, using {}", self.corner_length, clamped);
            self.corner_length = clamped;
        }

        self
    }

    /// Fraction of each edge drawn per corner with [`BorderStyle::Corners`].
    #[inline]
    pub fn border_fraction(&self) -> f32 {
        self.border_length as f32 / 100.0
    }
}
