use model::{INITIAL_VIEW_SCALE, MAX_VIEW_SCALE, MIN_VIEW_SCALE, V2l, is_valid_view_scale};

/// Maps between the infinite canvas and the visible raster.
///
/// `view_scale` is the number of canvas units per raster pixel, so a larger
/// value shows more of the canvas. The canvas origin sits at the screen center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasView {
    screen_size: V2l,
    view_scale: i64,
    home_view_scale: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    #[error("screen size {width}x{height} must be positive")]
    ScreenEmpty { width: i64, height: i64 },
    #[error("view scale {0} is not a power of two in [2, 2^61]")]
    InvalidViewScale(i64),
    #[error("raster point ({x}, {y}) does not fit in canvas space at this zoom")]
    CanvasOverflow { x: i64, y: i64 },
}

impl Default for CanvasView {
    fn default() -> Self {
        Self {
            screen_size: V2l::ZERO,
            view_scale: INITIAL_VIEW_SCALE,
            home_view_scale: INITIAL_VIEW_SCALE,
        }
    }
}

impl CanvasView {
    pub fn new(screen_width: u32, screen_height: u32) -> Result<Self, ViewError> {
        let mut view = Self::default();
        view.set_screen_size(screen_width, screen_height)?;
        Ok(view)
    }

    /// Sets both the current scale and the one `reset_zoom` returns to.
    pub fn with_home_view_scale(mut self, view_scale: i64) -> Result<Self, ViewError> {
        self.set_view_scale(view_scale)?;
        self.home_view_scale = view_scale;
        Ok(self)
    }

    pub fn screen_size(&self) -> V2l {
        self.screen_size
    }

    pub fn view_scale(&self) -> i64 {
        self.view_scale
    }

    pub fn home_view_scale(&self) -> i64 {
        self.home_view_scale
    }

    pub fn screen_center(&self) -> V2l {
        self.screen_size / 2
    }

    pub fn set_screen_size(&mut self, width: u32, height: u32) -> Result<(), ViewError> {
        if width == 0 || height == 0 {
            return Err(ViewError::ScreenEmpty {
                width: i64::from(width),
                height: i64::from(height),
            });
        }
        self.screen_size = V2l::new(i64::from(width), i64::from(height));
        Ok(())
    }

    pub fn set_view_scale(&mut self, view_scale: i64) -> Result<(), ViewError> {
        if !is_valid_view_scale(view_scale) {
            return Err(ViewError::InvalidViewScale(view_scale));
        }
        self.view_scale = view_scale;
        Ok(())
    }

    /// Positive deltas zoom in (halve the scale), negative ones zoom out.
    /// Returns whether the scale changed; steps past either bound are ignored.
    pub fn apply_zoom_delta(&mut self, zoom_delta: i32) -> bool {
        let next = if zoom_delta > 0 && self.view_scale > MIN_VIEW_SCALE {
            self.view_scale / 2
        } else if zoom_delta < 0 && self.view_scale <= MAX_VIEW_SCALE / 2 {
            self.view_scale * 2
        } else {
            return false;
        };
        tracing::trace!(
            "[view] zoom delta={} scale {} -> {}",
            zoom_delta,
            self.view_scale,
            next
        );
        self.view_scale = next;
        true
    }

    pub fn reset_zoom(&mut self) {
        self.view_scale = self.home_view_scale;
    }

    /// No clamping; callers discard points that land off screen.
    pub fn canvas_to_raster(&self, canvas_point: V2l) -> V2l {
        canvas_point / self.view_scale + self.screen_center()
    }

    pub fn raster_to_canvas(&self, raster_point: V2l) -> Result<V2l, ViewError> {
        let centered = raster_point - self.screen_center();
        centered
            .checked_scale(self.view_scale)
            .ok_or(ViewError::CanvasOverflow {
                x: raster_point.x,
                y: raster_point.y,
            })
    }
}
