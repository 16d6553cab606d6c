pub mod config;
pub mod replay;


use brush_execution::rasterize_stroke;
use document::{HistoryError, StrokeHistory};
use model::{Brush, TransientArena, V2l};
use renderer::{RasterBuffer, RasterError};
use serde::{Deserialize, Serialize};
use view::{CanvasView, ViewError};

pub use config::{ConfigError, MiltonConfig};

/// One frame of external input.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiltonInput {
    pub full_refresh: bool,
    pub reset: bool,
    /// Raster position of the pointer while it is down and painting.
    pub brush_sample: Option<V2l>,
    /// Positive zooms in, negative zooms out.
    pub zoom_delta: i32,
}

impl MiltonInput {
    pub fn paint(x: i64, y: i64) -> Self {
        Self {
            brush_sample: Some(V2l::new(x, y)),
            ..Self::default()
        }
    }

    pub fn zoom(zoom_delta: i32) -> Self {
        Self {
            zoom_delta,
            ..Self::default()
        }
    }

    pub fn reset() -> Self {
        Self {
            reset: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MiltonError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Raster(#[from] RasterError),
    #[error(transparent)]
    View(#[from] ViewError),
    #[error(transparent)]
    History(#[from] HistoryError),
}

/// Render context of one open document.
pub struct MiltonState {
    config: MiltonConfig,
    raster: RasterBuffer,
    view: CanvasView,
    history: StrokeHistory,
    transient: TransientArena,
    frame_count: u64,
}

impl MiltonState {
    /// Allocates the raster for the configured maximum resolution. The screen
    /// starts out covering the whole raster.
    pub fn new(config: MiltonConfig) -> Result<Self, MiltonError> {
        config.validate()?;
        let raster = RasterBuffer::new(config.raster_width, config.raster_height)?;
        let view = CanvasView::new(config.raster_width, config.raster_height)?
            .with_home_view_scale(config.initial_view_scale)?;
        let history =
            StrokeHistory::with_capacities(config.max_stroke_points, config.max_stored_strokes);
        Ok(Self {
            config,
            raster,
            view,
            history,
            transient: TransientArena::default(),
            frame_count: 0,
        })
    }

    pub fn config(&self) -> &MiltonConfig {
        &self.config
    }

    pub fn view(&self) -> &CanvasView {
        &self.view
    }

    pub fn history(&self) -> &StrokeHistory {
        &self.history
    }

    pub fn raster(&self) -> &RasterBuffer {
        &self.raster
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn set_screen_size(&mut self, width: u32, height: u32) -> Result<(), MiltonError> {
        self.raster.check_screen(width, height)?;
        self.view.set_screen_size(width, height)?;
        Ok(())
    }

    /// Brush used for pointer input at the current zoom.
    pub fn current_brush(&self) -> Brush {
        Brush::new(self.view.view_scale(), self.config.brush)
    }

    /// Runs one frame and reports whether the raster changed, which is always
    /// the case since every frame is a full redraw.
    ///
    /// A capacity error rejects the sample (or keeps the live stroke
    /// unfinalized) but the frame is still drawn completely before the error
    /// is returned. While a released stroke waits for room in the history,
    /// new samples are rejected with `HistoryFull` instead of extending it.
    pub fn update(&mut self, input: &MiltonInput) -> Result<bool, MiltonError> {
        self.transient.reset();
        self.frame_count += 1;

        if input.zoom_delta != 0 && self.view.apply_zoom_delta(input.zoom_delta) {
            tracing::debug!(
                "[milton] frame={} zoom view_scale={}",
                self.frame_count,
                self.view.view_scale()
            );
        }

        // Full redraw every frame; `full_refresh` does not gate the clear.
        let screen_size = self.view.screen_size();
        self.raster.clear(screen_size, self.config.background_color);

        let live_brush = self.current_brush();
        let ink = self.config.ink_color;
        let mut rejected = None;
        let mut draw_live_stroke = false;
        if let Some(sample) = input.brush_sample {
            match self.view.raster_to_canvas(sample) {
                Ok(canvas_point) => {
                    if let Err(error) = self.history.push_point(canvas_point) {
                        tracing::warn!("[milton] frame={} sample rejected: {}", self.frame_count, error);
                        rejected = Some(error);
                    }
                }
                Err(error) => {
                    tracing::warn!("[milton] frame={} sample dropped: {}", self.frame_count, error);
                }
            }
            draw_live_stroke = true;
        } else if self.history.has_in_progress() {
            if let Err(error) = self.history.finalize(live_brush) {
                tracing::warn!("[milton] frame={} stroke kept live: {}", self.frame_count, error);
                rejected = Some(error);
                draw_live_stroke = true;
            }
        }
        if draw_live_stroke {
            rasterize_stroke(
                &mut self.raster,
                &mut self.transient,
                &self.view,
                &live_brush,
                self.history.in_progress_points(),
                ink,
            );
        }

        if input.reset {
            self.view.reset_zoom();
            let cleared = self.history.clear_strokes();
            tracing::debug!(
                "[milton] frame={} reset cleared={} view_scale={}",
                self.frame_count,
                cleared,
                self.view.view_scale()
            );
        }

        let mut pixels_written = 0;
        for (brush, points) in self.history.iter_strokes() {
            let stats = rasterize_stroke(
                &mut self.raster,
                &mut self.transient,
                &self.view,
                &brush,
                points,
                ink,
            );
            pixels_written += stats.pixels_written;
        }
        tracing::trace!(
            "[milton] frame={} full_refresh={} strokes={} live_points={} history_pixels={}",
            self.frame_count,
            input.full_refresh,
            self.history.num_stored_strokes(),
            self.history.in_progress_points().len(),
            pixels_written
        );

        match rejected {
            Some(error) => Err(error.into()),
            None => Ok(true),
        }
    }
}
