//! Brush rasterization and stroke stamping.
//!
//! A brush is rasterized once per stroke into a mask that lives in the
//! transient arena, then stamped at every point of the stroke.

use model::{Brush, BrushShape, MAX_BRUSH_RADIUS, MaskBits, Rectl, TransientArena, V2l};
use renderer::RasterBuffer;
use view::CanvasView;

/// Mask of a brush at the current zoom. Borrowed from the transient arena.
#[derive(Debug, Clone, Copy)]
pub struct RasterBrush<'arena> {
    bounds: Rectl,
    size: V2l,
    mask: &'arena MaskBits,
}

impl<'arena> RasterBrush<'arena> {
    pub fn radius(&self) -> i64 {
        self.size.x / 2
    }

    /// Brush-local bounds, `[-r, r)` on both axes.
    pub fn bounds(&self) -> Rectl {
        self.bounds
    }

    pub fn size(&self) -> V2l {
        self.size
    }

    pub fn mask(&self) -> &'arena MaskBits {
        self.mask
    }

    /// Whether the cell at offset `(i, j)` from the brush center carries ink.
    pub fn is_set(&self, i: i64, j: i64) -> bool {
        if !self.bounds.contains(V2l::new(i, j)) {
            return false;
        }
        let radius = self.radius();
        self.cell(i + radius, j + radius)
    }

    #[inline]
    fn cell(&self, column: i64, row: i64) -> bool {
        self.mask[(row * self.size.x + column) as usize]
    }
}

/// Extent of the brush after rescaling to the current zoom, rounded down.
pub fn effective_radius(brush: &Brush, scale: f64) -> i64 {
    (brush.shape.extent() as f64 * scale).floor() as i64
}

/// Rasterizes `brush` scaled by `scale`.
///
/// Returns `None` when the effective radius is zero or exceeds
/// `MAX_BRUSH_RADIUS`; such brushes are silently not drawn.
pub fn rasterize_brush<'arena>(
    arena: &'arena mut TransientArena,
    brush: &Brush,
    scale: f64,
) -> Option<RasterBrush<'arena>> {
    let radius = effective_radius(brush, scale);
    if radius <= 0 || radius > MAX_BRUSH_RADIUS {
        return None;
    }

    let side = 2 * radius;
    let radius_squared = radius * radius;
    let mask = arena.alloc_mask((side * side) as usize);
    for j in -radius..radius {
        for i in -radius..radius {
            let index = (j + radius) * side + (i + radius);
            let inside = match brush.shape {
                BrushShape::Disk { .. } => i * i + j * j < radius_squared,
                BrushShape::Square { .. } => true,
            };
            mask.set(index as usize, inside);
        }
    }

    Some(RasterBrush {
        bounds: Rectl::new(V2l::new(-radius, -radius), V2l::new(radius, radius)),
        size: V2l::new(side, side),
        mask,
    })
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StampStats {
    pub stamped_points: usize,
    pub skipped_points: usize,
    pub pixels_written: usize,
}

/// Stamps `brush` at every canvas point of a path.
///
/// Points whose center lands at or past the right or bottom screen edge are
/// skipped. Cells left of or above the raster origin are dropped, but cells
/// past the right edge are not clipped and continue on the next row. Pixel
/// indices outside the buffer are skipped.
pub fn rasterize_stroke(
    raster: &mut RasterBuffer,
    arena: &mut TransientArena,
    view: &CanvasView,
    brush: &Brush,
    points: &[V2l],
    ink: u32,
) -> StampStats {
    let relative_scale = brush.view_scale as f64 / view.view_scale() as f64;
    let Some(raster_brush) = rasterize_brush(arena, brush, relative_scale) else {
        return StampStats::default();
    };

    let screen = view.screen_size();
    let radius = raster_brush.radius();
    let rows = raster_brush.size().y.min(screen.y);
    let columns = raster_brush.size().x.min(screen.x);
    let mut stats = StampStats::default();

    for &canvas_point in points {
        let base = view.canvas_to_raster(canvas_point);
        if base.x >= screen.x || base.y >= screen.y {
            stats.skipped_points += 1;
            continue;
        }
        stats.stamped_points += 1;
        for row in 0..rows {
            let y = base.y + row - radius;
            if y < 0 {
                continue;
            }
            for column in 0..columns {
                let x = base.x + column - radius;
                if x < 0 || !raster_brush.cell(column, row) {
                    continue;
                }
                let Some(index) = y
                    .checked_mul(screen.x)
                    .and_then(|row_start| row_start.checked_add(x))
                else {
                    continue;
                };
                if raster.write_pixel(index, ink) {
                    stats.pixels_written += 1;
                }
            }
        }
    }

    tracing::trace!(
        "[brush] stroke points={} stamped={} skipped={} pixels={}",
        points.len(),
        stats.stamped_points,
        stats.skipped_points,
        stats.pixels_written
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::{BACKGROUND_COLOR, INITIAL_VIEW_SCALE, INK_COLOR};

    fn setup(width: u32, height: u32) -> (RasterBuffer, TransientArena, CanvasView) {
        let mut raster = RasterBuffer::new(width, height).expect("create raster");
        let view = CanvasView::new(width, height).expect("create view");
        raster.clear(view.screen_size(), BACKGROUND_COLOR);
        (raster, TransientArena::default(), view)
    }

    fn canvas_at(view: &CanvasView, x: i64, y: i64) -> V2l {
        view.raster_to_canvas(V2l::new(x, y))
            .expect("raster point converts to canvas")
    }

    #[test]
    fn disk_mask_uses_strict_inequality() {
        let mut arena = TransientArena::default();
        let brush = Brush::disk(INITIAL_VIEW_SCALE, 10);
        let raster_brush = rasterize_brush(&mut arena, &brush, 1.0).expect("rasterize brush");

        assert_eq!(raster_brush.radius(), 10);
        assert_eq!(raster_brush.size(), V2l::new(20, 20));
        assert_eq!(raster_brush.mask().len(), 400);
        assert!(raster_brush.is_set(0, 0));
        assert!(raster_brush.is_set(9, 0));
        assert!(!raster_brush.is_set(10, 0));
        assert!(!raster_brush.is_set(-10, 0));
        assert!(!raster_brush.is_set(0, -10));
        assert!(raster_brush.is_set(7, 7));
        assert!(!raster_brush.is_set(8, 6));
        assert!(raster_brush.is_set(-6, -7));
    }

    #[test]
    fn disk_membership_matches_formula_for_every_cell() {
        let mut arena = TransientArena::default();
        let brush = Brush::disk(INITIAL_VIEW_SCALE, 6);
        let raster_brush = rasterize_brush(&mut arena, &brush, 1.0).expect("rasterize brush");
        for j in -6..6 {
            for i in -6..6 {
                assert_eq!(raster_brush.is_set(i, j), i * i + j * j < 36, "cell ({i}, {j})");
            }
        }
    }

    #[test]
    fn scale_rescales_radius() {
        let mut arena = TransientArena::default();
        let brush = Brush::disk(INITIAL_VIEW_SCALE, 10);
        assert_eq!(
            rasterize_brush(&mut arena, &brush, 2.0).map(|b| b.radius()),
            Some(20)
        );
        assert_eq!(
            rasterize_brush(&mut arena, &brush, 0.5).map(|b| b.radius()),
            Some(5)
        );
        assert_eq!(effective_radius(&brush, 0.25), 2);
    }

    #[test]
    fn degenerate_brushes_are_suppressed() {
        let mut arena = TransientArena::default();
        assert!(rasterize_brush(&mut arena, &Brush::disk(INITIAL_VIEW_SCALE, 0), 1.0).is_none());
        assert!(rasterize_brush(&mut arena, &Brush::disk(INITIAL_VIEW_SCALE, 10), 0.05).is_none());
        assert!(rasterize_brush(&mut arena, &Brush::disk(INITIAL_VIEW_SCALE, 10), 64.0).is_none());
        assert!(rasterize_brush(&mut arena, &Brush::disk(INITIAL_VIEW_SCALE, 500), 1.0).is_some());
        assert!(rasterize_brush(&mut arena, &Brush::disk(INITIAL_VIEW_SCALE, 501), 1.0).is_none());
        assert_eq!(arena.allocated(), 1000 * 1000);
    }

    #[test]
    fn square_brush_fills_every_cell() {
        let mut arena = TransientArena::default();
        let brush = Brush::new(INITIAL_VIEW_SCALE, BrushShape::Square { half_extent: 3 });
        let raster_brush = rasterize_brush(&mut arena, &brush, 1.0).expect("rasterize brush");
        assert_eq!(raster_brush.size(), V2l::new(6, 6));
        assert!(raster_brush.mask().all());
        assert!(raster_brush.is_set(-3, 2));
        assert!(!raster_brush.is_set(3, 0));
    }

    #[test]
    fn stamp_is_centered_on_the_raster_point() {
        let (mut raster, mut arena, view) = setup(200, 200);
        let brush = Brush::disk(view.view_scale(), 10);
        let points = [canvas_at(&view, 100, 100)];

        let stats = rasterize_stroke(&mut raster, &mut arena, &view, &brush, &points, INK_COLOR);
        assert_eq!(stats.stamped_points, 1);

        let screen = view.screen_size();
        let pixel = |x, y| raster.pixel_at(screen, V2l::new(x, y));
        assert_eq!(pixel(100, 100), Some(INK_COLOR));
        assert_eq!(pixel(109, 100), Some(INK_COLOR));
        assert_eq!(pixel(91, 100), Some(INK_COLOR));
        assert_eq!(pixel(110, 100), Some(BACKGROUND_COLOR));
        assert_eq!(pixel(90, 100), Some(BACKGROUND_COLOR));
        assert_eq!(pixel(100, 90), Some(BACKGROUND_COLOR));
        assert_eq!(pixel(100, 91), Some(INK_COLOR));

        let inked = raster
            .visible_pixels(screen)
            .iter()
            .filter(|&&p| p == INK_COLOR)
            .count();
        assert_eq!(inked, stats.pixels_written);
    }

    #[test]
    fn degenerate_brush_leaves_raster_unchanged() {
        let (mut raster, mut arena, view) = setup(64, 64);
        let before = raster.pixels().to_vec();
        let points = [canvas_at(&view, 32, 32)];

        let zero = Brush::disk(view.view_scale(), 0);
        let huge = Brush::disk(view.view_scale() * 64, 10);
        for brush in [zero, huge] {
            let stats = rasterize_stroke(&mut raster, &mut arena, &view, &brush, &points, INK_COLOR);
            assert_eq!(stats, StampStats::default());
        }
        assert_eq!(raster.pixels(), &before[..]);
    }

    #[test]
    fn points_past_the_far_edges_are_skipped() {
        let (mut raster, mut arena, view) = setup(64, 64);
        let before = raster.pixels().to_vec();
        let brush = Brush::disk(view.view_scale(), 4);
        let points = [canvas_at(&view, 64, 10), canvas_at(&view, 10, 64)];

        let stats = rasterize_stroke(&mut raster, &mut arena, &view, &brush, &points, INK_COLOR);
        assert_eq!(stats.skipped_points, 2);
        assert_eq!(raster.pixels(), &before[..]);
    }

    #[test]
    fn stamps_near_the_origin_are_clipped() {
        let (mut raster, mut arena, view) = setup(64, 64);
        let brush = Brush::disk(view.view_scale(), 4);
        let points = [canvas_at(&view, 0, 0)];

        let stats = rasterize_stroke(&mut raster, &mut arena, &view, &brush, &points, INK_COLOR);
        // Only the quadrant with non-negative offsets survives.
        let expected = (0..4i64)
            .flat_map(|j| (0..4i64).map(move |i| (i, j)))
            .filter(|(i, j)| i * i + j * j < 16)
            .count();
        assert_eq!(stats.pixels_written, expected);
        assert_eq!(
            raster.pixel_at(view.screen_size(), V2l::new(0, 0)),
            Some(INK_COLOR)
        );
    }

    #[test]
    fn stamps_past_the_right_edge_continue_on_the_next_row() {
        let (mut raster, mut arena, view) = setup(64, 64);
        let brush = Brush::disk(view.view_scale(), 4);
        let points = [canvas_at(&view, 63, 20)];

        rasterize_stroke(&mut raster, &mut arena, &view, &brush, &points, INK_COLOR);
        let screen = view.screen_size();
        assert_eq!(raster.pixel_at(screen, V2l::new(63, 20)), Some(INK_COLOR));
        assert_eq!(raster.pixel_at(screen, V2l::new(0, 21)), Some(INK_COLOR));
        assert_eq!(raster.pixel_at(screen, V2l::new(10, 21)), Some(BACKGROUND_COLOR));
    }

    #[test]
    fn brush_keeps_canvas_size_across_zoom() {
        let (mut raster, mut arena, mut view) = setup(200, 200);
        let brush = Brush::disk(view.view_scale(), 10);
        let points = [canvas_at(&view, 100, 100)];

        view.apply_zoom_delta(1);
        let stats = rasterize_stroke(&mut raster, &mut arena, &view, &brush, &points, INK_COLOR);
        let screen = view.screen_size();
        assert_eq!(raster.pixel_at(screen, V2l::new(119, 100)), Some(INK_COLOR));
        assert_eq!(raster.pixel_at(screen, V2l::new(80, 100)), Some(BACKGROUND_COLOR));
        assert!(stats.pixels_written > 1000);
    }
}
