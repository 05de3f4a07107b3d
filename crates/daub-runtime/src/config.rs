//! Studio configuration loaded from TOML
//!
//! ```toml
//! dim = 128
//! fps_limit = 30
//! shape = "HEX_FILLED"
//!
//! [palette]
//! symmetry = 6
//! flow = 120
//!
//! [presets.calm]
//! flow = 20
//! decay = 0.99
//! shape = "CIRCLE_SHADED"
//! ```

use crate::clock::DEFAULT_FPS_LIMIT;
use daub_core::{DaubError, RenderContext, Result, ShapeKind};
use daub_palette::{parse_presets, Palette, PresetBook};
use daub_particles::store::MAX_DIM;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    /// Particle grid side; each layer holds `dim * dim` slots
    pub dim: usize,
    /// Longest backing row the storage accepts, defaults to `dim`
    pub max_row_texels: Option<usize>,
    pub fps_limit: f64,
    pub seed: u32,
    /// Canvas size in pixels
    pub width: u32,
    pub height: u32,
    pub shape: ShapeKind,
    /// Parameter overrides applied to every new layer's palette
    pub palette: toml::value::Table,
    pub presets: toml::value::Table,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            dim: 256,
            max_row_texels: None,
            fps_limit: DEFAULT_FPS_LIMIT,
            seed: 0x5EED_DA0B,
            width: 800,
            height: 600,
            shape: ShapeKind::default(),
            palette: toml::value::Table::new(),
            presets: toml::value::Table::new(),
        }
    }
}

impl StudioConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        log::debug!("loading studio config from {}", path.as_ref().display());
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every field, including the palette overrides and presets
    pub fn validate(&self) -> Result<()> {
        if self.dim == 0 || self.dim > MAX_DIM {
            return Err(DaubError::ValueOutOfRange {
                field: "dim".to_string(),
                min: 1.0,
                max: MAX_DIM as f64,
                value: self.dim as f64,
            });
        }
        if !self.fps_limit.is_finite() || self.fps_limit <= 0.0 {
            return Err(DaubError::InvalidConfig(format!(
                "fps_limit must be positive, got {}",
                self.fps_limit
            )));
        }
        self.render_context()?;
        self.preset_book(|| 0.0)?;
        Ok(())
    }

    pub fn render_context(&self) -> Result<RenderContext> {
        let ctx = RenderContext::new(self.width, self.height)?;
        ctx.with_max_row_texels(self.max_row_texels.unwrap_or(self.dim))
    }

    /// Stock palette with `hue`, the configured shape and `[palette]` overrides
    pub fn palette_with_hue(&self, hue: f32) -> Result<Palette> {
        let mut palette = Palette::with_hue(hue);
        palette.set_shape(self.shape);
        palette.apply_toml(&self.palette)?;
        Ok(palette)
    }

    /// Presets over the configured palette, each with a starting hue from `hue`
    pub fn preset_book(&self, mut hue: impl FnMut() -> f32) -> Result<PresetBook> {
        parse_presets(&self.presets, || self.palette_with_hue(hue()))
    }
}
