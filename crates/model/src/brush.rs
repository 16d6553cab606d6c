use serde::{Deserialize, Serialize};

use crate::DEFAULT_BRUSH_RADIUS;
use crate::arena::PointSpan;

/// Footprint of a brush, measured in raster pixels at the brush's own zoom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BrushShape {
    Disk { radius: i64 },
    Square { half_extent: i64 },
}

impl BrushShape {
    /// Half of the footprint's side length.
    pub fn extent(&self) -> i64 {
        match *self {
            BrushShape::Disk { radius } => radius,
            BrushShape::Square { half_extent } => half_extent,
        }
    }
}

impl Default for BrushShape {
    fn default() -> Self {
        BrushShape::Disk {
            radius: DEFAULT_BRUSH_RADIUS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brush {
    /// Zoom that was active when the brush was used.
    pub view_scale: i64,
    pub shape: BrushShape,
}

impl Brush {
    pub const fn new(view_scale: i64, shape: BrushShape) -> Self {
        Self { view_scale, shape }
    }

    pub const fn disk(view_scale: i64, radius: i64) -> Self {
        Self::new(view_scale, BrushShape::Disk { radius })
    }
}

/// A finalized stroke. Its points live in the document's point arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stroke {
    points: PointSpan,
    brush: Brush,
}

impl Stroke {
    pub fn new(points: PointSpan, brush: Brush) -> Self {
        Self { points, brush }
    }

    pub fn points(&self) -> PointSpan {
        self.points
    }

    pub fn brush(&self) -> Brush {
        self.brush
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brush_shape_json_is_tagged_by_kind() {
        let json = serde_json::to_string(&BrushShape::Square { half_extent: 4 })
            .expect("serialize brush shape");
        assert_eq!(json, r#"{"kind":"square","half_extent":4}"#);
        let parsed: BrushShape =
            serde_json::from_str(r#"{"kind":"disk","radius":7}"#).expect("parse brush shape");
        assert_eq!(parsed, BrushShape::Disk { radius: 7 });
        assert_eq!(parsed.extent(), 7);
    }

    #[test]
    fn default_shape_is_the_ten_pixel_disk() {
        assert_eq!(BrushShape::default(), BrushShape::Disk { radius: 10 });
        assert_eq!(
            Brush::disk(1024, 10),
            Brush::new(1024, BrushShape::default())
        );
    }
}
