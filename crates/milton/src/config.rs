use std::path::{Path, PathBuf};

use model::{
    BACKGROUND_COLOR, BrushShape, INITIAL_VIEW_SCALE, INK_COLOR, MAX_BRUSH_RADIUS,
    MAX_RASTER_HEIGHT, MAX_RASTER_WIDTH, MAX_STORED_STROKES, MAX_STROKE_POINTS,
    is_valid_view_scale,
};
use serde::{Deserialize, Serialize};

/// Document settings. Every field falls back to its default when omitted
/// from a JSON config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MiltonConfig {
    /// Allocated raster size. The visible screen may be smaller.
    pub raster_width: u32,
    pub raster_height: u32,
    pub initial_view_scale: i64,
    pub max_stroke_points: usize,
    pub max_stored_strokes: usize,
    /// Shape painted by pointer input.
    pub brush: BrushShape,
    pub ink_color: u32,
    pub background_color: u32,
}

impl Default for MiltonConfig {
    fn default() -> Self {
        Self {
            raster_width: MAX_RASTER_WIDTH,
            raster_height: MAX_RASTER_HEIGHT,
            initial_view_scale: INITIAL_VIEW_SCALE,
            max_stroke_points: MAX_STROKE_POINTS,
            max_stored_strokes: MAX_STORED_STROKES,
            brush: BrushShape::default(),
            ink_color: INK_COLOR,
            background_color: BACKGROUND_COLOR,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("raster size {width}x{height} must be positive")]
    EmptyRaster { width: u32, height: u32 },
    #[error("initial view scale {0} is not a power of two in [2, 2^61]")]
    InvalidViewScale(i64),
    #[error("{0} must be at least 1")]
    ZeroCapacity(&'static str),
    #[error("brush extent {extent} must be in 1..=500")]
    InvalidBrush { extent: i64 },
    #[error("read config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl MiltonConfig {
    pub fn with_raster_size(mut self, width: u32, height: u32) -> Self {
        self.raster_width = width;
        self.raster_height = height;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.raster_width == 0 || self.raster_height == 0 {
            return Err(ConfigError::EmptyRaster {
                width: self.raster_width,
                height: self.raster_height,
            });
        }
        if !is_valid_view_scale(self.initial_view_scale) {
            return Err(ConfigError::InvalidViewScale(self.initial_view_scale));
        }
        if self.max_stroke_points == 0 {
            return Err(ConfigError::ZeroCapacity("max_stroke_points"));
        }
        if self.max_stored_strokes == 0 {
            return Err(ConfigError::ZeroCapacity("max_stored_strokes"));
        }
        let extent = self.brush.extent();
        if extent <= 0 || extent > MAX_BRUSH_RADIUS {
            return Err(ConfigError::InvalidBrush { extent });
        }
        Ok(())
    }
}
