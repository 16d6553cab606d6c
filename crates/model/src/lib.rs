pub mod arena;
pub mod brush;
pub mod geometry;

use static_assertions::const_assert;

pub use arena::{MaskBits, PointArena, PointSpan, TransientArena};
pub use brush::{Brush, BrushShape, Stroke};
pub use geometry::{Rectl, V2l};

pub const MAX_STROKE_POINTS: usize = 4096;
pub const MAX_STORED_STROKES: usize = 4096;

pub const MIN_VIEW_SCALE: i64 = 2;
pub const MAX_VIEW_SCALE: i64 = 1 << 61;
pub const INITIAL_VIEW_SCALE: i64 = 1 << 10;

// Sized for 8k displays regardless of the actual window.
pub const MAX_RASTER_WIDTH: u32 = 7680;
pub const MAX_RASTER_HEIGHT: u32 = 4320;
pub const BYTES_PER_PIXEL: usize = 4;
pub const RASTER_BUFFER_BYTES_LIMIT: usize = 1 << 27;

pub const DEFAULT_BRUSH_RADIUS: i64 = 10;
/// Brushes whose effective radius exceeds this are not rasterized.
pub const MAX_BRUSH_RADIUS: i64 = 500;

/// ARGB words.
pub const INK_COLOR: u32 = 0xFF00_FFFF;
pub const BACKGROUND_COLOR: u32 = 0xFF00_0000;

const_assert!(
    MAX_RASTER_WIDTH as usize * MAX_RASTER_HEIGHT as usize * BYTES_PER_PIXEL
        <= RASTER_BUFFER_BYTES_LIMIT
);
const_assert!(INITIAL_VIEW_SCALE >= MIN_VIEW_SCALE && INITIAL_VIEW_SCALE <= MAX_VIEW_SCALE);
const_assert!(DEFAULT_BRUSH_RADIUS > 0 && DEFAULT_BRUSH_RADIUS <= MAX_BRUSH_RADIUS);

/// True for powers of two inside the zoom range, the only values zoom stepping reaches.
pub const fn is_valid_view_scale(view_scale: i64) -> bool {
    view_scale >= MIN_VIEW_SCALE
        && view_scale <= MAX_VIEW_SCALE
        && (view_scale & (view_scale - 1)) == 0
}
