//! Explicit render context passed into the store and renderer constructors

use crate::error::{DaubError, Result};

/// Describes the canvas being painted and the limits of the backing storage.
///
/// There is no process-wide graphics context: every component that needs the
/// canvas size or storage limits receives one of these by reference.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderContext {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Largest number of texels a single backing-storage row may hold
    pub max_row_texels: usize,
}

impl RenderContext {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(DaubError::InvalidConfig(format!(
                "canvas must be non-empty, got {width}x{height}"
            )));
        }
        Ok(Self {
            width,
            height,
            max_row_texels: usize::MAX,
        })
    }

    /// Limit the backing-storage row length (e.g. a texture width cap)
    pub fn with_max_row_texels(mut self, max_row_texels: usize) -> Result<Self> {
        if max_row_texels == 0 {
            return Err(DaubError::InvalidConfig(
                "max_row_texels must be at least 1".to_string(),
            ));
        }
        self.max_row_texels = max_row_texels;
        Ok(self)
    }

    pub fn size(&self) -> [f32; 2] {
        [self.width as f32, self.height as f32]
    }

    pub fn center(&self) -> [f32; 2] {
        [self.width as f32 / 2.0, self.height as f32 / 2.0]
    }

    /// Map a pixel position to normalized device coordinates (y up)
    pub fn to_ndc(&self, x: f32, y: f32) -> [f32; 2] {
        [
            x / self.width as f32 * 2.0 - 1.0,
            1.0 - y / self.height as f32 * 2.0,
        ]
    }

    /// Map normalized device coordinates back to pixels (y down)
    pub fn to_pixels(&self, ndc_x: f32, ndc_y: f32) -> [f32; 2] {
        [
            (ndc_x + 1.0) * 0.5 * self.width as f32,
            (1.0 - ndc_y) * 0.5 * self.height as f32,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_canvas() {
        assert!(RenderContext::new(0, 10).is_err());
        assert!(RenderContext::new(10, 10).unwrap().with_max_row_texels(0).is_err());
    }

    #[test]
    fn ndc_round_trip_corners() {
        let ctx = RenderContext::new(800, 600).unwrap();
        assert_eq!(ctx.to_ndc(0.0, 0.0), [-1.0, 1.0]);
        assert_eq!(ctx.to_ndc(800.0, 600.0), [1.0, -1.0]);
        assert_eq!(ctx.to_ndc(400.0, 300.0), [0.0, 0.0]);
        assert_eq!(ctx.to_pixels(-1.0, 1.0), [0.0, 0.0]);
        assert_eq!(ctx.to_pixels(1.0, -1.0), [800.0, 600.0]);
    }
}
