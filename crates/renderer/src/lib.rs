//! CPU raster target.
//!
//! The buffer is allocated once for the largest supported resolution and is
//! addressed row-major by the current screen width, not the allocated one.

use model::{BYTES_PER_PIXEL, RASTER_BUFFER_BYTES_LIMIT, V2l};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RasterError {
    #[error("raster size {width}x{height} must be positive")]
    ZeroSize { width: u32, height: u32 },
    #[error("raster of {bytes} bytes exceeds the {limit} byte limit")]
    TooLarge { bytes: usize, limit: usize },
    #[error("screen {width}x{height} does not fit the {full_width}x{full_height} raster")]
    ScreenTooLarge {
        width: u32,
        height: u32,
        full_width: u32,
        full_height: u32,
    },
}

pub struct RasterBuffer {
    full_width: u32,
    full_height: u32,
    pixels: Vec<u32>,
}

impl RasterBuffer {
    pub fn new(full_width: u32, full_height: u32) -> Result<Self, RasterError> {
        if full_width == 0 || full_height == 0 {
            return Err(RasterError::ZeroSize {
                width: full_width,
                height: full_height,
            });
        }
        let pixel_count = full_width as usize * full_height as usize;
        let bytes = pixel_count * BYTES_PER_PIXEL;
        if bytes > RASTER_BUFFER_BYTES_LIMIT {
            return Err(RasterError::TooLarge {
                bytes,
                limit: RASTER_BUFFER_BYTES_LIMIT,
            });
        }
        tracing::debug!(
            "[renderer] raster allocated {}x{} ({} bytes)",
            full_width,
            full_height,
            bytes
        );
        Ok(Self {
            full_width,
            full_height,
            pixels: vec![0; pixel_count],
        })
    }

    pub fn full_width(&self) -> u32 {
        self.full_width
    }

    pub fn full_height(&self) -> u32 {
        self.full_height
    }

    pub fn check_screen(&self, width: u32, height: u32) -> Result<(), RasterError> {
        if width > self.full_width || height > self.full_height {
            return Err(RasterError::ScreenTooLarge {
                width,
                height,
                full_width: self.full_width,
                full_height: self.full_height,
            });
        }
        Ok(())
    }

    /// Fills the first `width * height` pixels.
    pub fn clear(&mut self, screen_size: V2l, color: u32) {
        let visible = visible_pixel_count(screen_size).min(self.pixels.len());
        self.pixels[..visible].fill(color);
    }

    /// Writes one pixel. Indices outside the buffer are skipped.
    #[inline]
    pub fn write_pixel(&mut self, index: i64, color: u32) -> bool {
        let Ok(index) = usize::try_from(index) else {
            return false;
        };
        match self.pixels.get_mut(index) {
            Some(pixel) => {
                *pixel = color;
                true
            }
            None => false,
        }
    }

    pub fn pixel(&self, index: usize) -> Option<u32> {
        self.pixels.get(index).copied()
    }

    pub fn pixel_at(&self, screen_size: V2l, point: V2l) -> Option<u32> {
        if point.x < 0 || point.y < 0 || point.x >= screen_size.x || point.y >= screen_size.y {
            return None;
        }
        let index = point.y * screen_size.x + point.x;
        self.pixel(usize::try_from(index).ok()?)
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn visible_pixels(&self, screen_size: V2l) -> &[u32] {
        let visible = visible_pixel_count(screen_size).min(self.pixels.len());
        &self.pixels[..visible]
    }

    /// Native-endian byte view for a display layer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Visible region as tightly packed RGBA8.
    pub fn visible_rgba8(&self, screen_size: V2l) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(visible_pixel_count(screen_size) * BYTES_PER_PIXEL);
        for &argb in self.visible_pixels(screen_size) {
            let [alpha, red, green, blue] = argb.to_be_bytes();
            rgba.extend_from_slice(&[red, green, blue, alpha]);
        }
        rgba
    }
}

fn visible_pixel_count(screen_size: V2l) -> usize {
    let width = usize::try_from(screen_size.x).unwrap_or(0);
    let height = usize::try_from(screen_size.y).unwrap_or(0);
    width.saturating_mul(height)
}
