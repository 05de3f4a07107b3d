//! Named palette presets

use crate::palette::Palette;
use daub_core::{DaubError, Result};
use std::collections::BTreeMap;

/// A collection of named palettes
#[derive(Debug, Clone, Default)]
pub struct PresetBook {
    presets: BTreeMap<String, Palette>,
}

impl PresetBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject empty, whitespace-padded or already-taken names
    pub fn check_name(&self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(DaubError::InvalidPresetName(
                "preset name must not be empty".to_string(),
            ));
        }
        if name.trim() != name {
            return Err(DaubError::InvalidPresetName(format!(
                "'{name}' has leading or trailing whitespace"
            )));
        }
        if self.presets.contains_key(name) {
            return Err(DaubError::InvalidPresetName(format!(
                "'{name}' already exists"
            )));
        }
        Ok(())
    }

    pub fn add(&mut self, name: &str, palette: Palette) -> Result<()> {
        self.check_name(name)?;
        log::debug!("adding preset '{name}'");
        self.presets.insert(name.to_string(), palette);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&Palette> {
        self.presets
            .get(name)
            .ok_or_else(|| DaubError::PresetNotFound(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

/// Parse `[name] param = value ...` tables. Each preset is applied on top of
/// its own palette from `base`, called once per preset in name order.
pub fn parse_presets(
    table: &toml::value::Table,
    mut base: impl FnMut() -> Result<Palette>,
) -> Result<PresetBook> {
    let mut book = PresetBook::new();
    for (name, value) in table {
        let overrides = value.as_table().ok_or_else(|| {
            DaubError::InvalidConfig(format!("preset '{name}' must be a table"))
        })?;
        let mut palette = base()?;
        palette
            .apply_toml(overrides)
            .map_err(|e| DaubError::InvalidConfig(format!("preset '{name}': {e}")))?;
        book.add(name, palette)?;
    }
    Ok(book)
}
