//! The palette: a named parameter schema plus the selected draw shape

use crate::param::{out_of_range, ParamEntry};
use daub_core::{DaubError, Result, ShapeKind};
use std::collections::BTreeMap;

/// Every parameter a palette must define, in display order
pub const PARAM_NAMES: [&str; 11] = [
    "symmetry",
    "colorHue",
    "saturation",
    "colorNoise",
    "spray",
    "size",
    "age",
    "pulse",
    "flow",
    "accel",
    "decay",
];

/// Named, bounded, live-overridable painting parameters
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    params: BTreeMap<String, ParamEntry>,
    shape: ShapeKind,
}

/// Effective values of every palette parameter, resolved once per injection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteValues {
    pub symmetry: f32,
    pub color_hue: f32,
    pub saturation: f32,
    pub color_noise: f32,
    /// Jitter radius in normalized device units
    pub spray: f32,
    pub size: f32,
    /// Particle lifetime in milliseconds
    pub age: f32,
    /// Pulses per second
    pub pulse: f32,
    /// Particles per second
    pub flow: f32,
    pub accel: f32,
    pub decay: f32,
}

impl Palette {
    /// Build a palette from explicit entries. Every name in [`PARAM_NAMES`]
    /// must be present and every entry must be internally consistent.
    pub fn new(params: BTreeMap<String, ParamEntry>, shape: ShapeKind) -> Result<Self> {
        for name in PARAM_NAMES {
            if !params.contains_key(name) {
                return Err(DaubError::InvalidConfig(format!(
                    "palette is missing parameter '{name}'"
                )));
            }
        }
        for (name, entry) in &params {
            entry.check(name)?;
        }
        Ok(Self { params, shape })
    }

    /// The stock schema with the given starting hue (degrees)
    pub fn with_hue(hue: f32) -> Self {
        let hue = hue.rem_euclid(360.0);
        let entries = [
            ("symmetry", ParamEntry::new(4.0, 1.0, 16.0)),
            ("colorHue", ParamEntry::new(hue, 0.0, 360.0)),
            ("saturation", ParamEntry::new(1.0, 0.0, 1.0)),
            ("colorNoise", ParamEntry::new(0.1, 0.0, 1.0)),
            ("spray", ParamEntry::new(0.0, 0.0, 0.1)),
            ("size", ParamEntry::new(25.0, 1.0, 100.0)),
            ("age", ParamEntry::new(2500.0, 500.0, 30000.0)),
            ("pulse", ParamEntry::new(0.0, 0.0, 2.0)),
            ("flow", ParamEntry::new(50.0, 10.0, 250.0)),
            ("accel", ParamEntry::new(0.0, -10.0, 10.0)),
            ("decay", ParamEntry::new(0.999, 0.95, 1.0)),
        ];
        Self {
            params: entries
                .into_iter()
                .map(|(name, entry)| (name.to_string(), entry))
                .collect(),
            shape: ShapeKind::default(),
        }
    }

    pub fn get_param(&self, name: &str) -> Result<&ParamEntry> {
        self.params
            .get(name)
            .ok_or_else(|| DaubError::UnknownParam(name.to_string()))
    }

    /// Effective value of `name`
    pub fn get_value(&self, name: &str) -> Result<f32> {
        self.get_param(name).map(ParamEntry::effective)
    }

    /// Override `name`. Values outside the entry's range are rejected, not clamped.
    pub fn set_value(&mut self, name: &str, value: f32) -> Result<()> {
        let entry = self
            .params
            .get_mut(name)
            .ok_or_else(|| DaubError::UnknownParam(name.to_string()))?;
        if !value.is_finite() || !entry.contains(value) {
            return Err(out_of_range(name, entry, value));
        }
        entry.value = Some(value);
        Ok(())
    }

    /// Drop the override on `name`, falling back to its default
    pub fn clear_value(&mut self, name: &str) -> Result<()> {
        let entry = self
            .params
            .get_mut(name)
            .ok_or_else(|| DaubError::UnknownParam(name.to_string()))?;
        entry.value = None;
        Ok(())
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    pub fn set_shape(&mut self, shape: ShapeKind) {
        self.shape = shape;
    }

    /// Iterate `(name, entry)` pairs in name order
    pub fn params(&self) -> impl Iterator<Item = (&str, &ParamEntry)> {
        self.params.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn values(&self) -> PaletteValues {
        let v = |name: &str| self.params.get(name).map(ParamEntry::effective).unwrap_or_default();
        PaletteValues {
            symmetry: v("symmetry"),
            color_hue: v("colorHue"),
            saturation: v("saturation"),
            color_noise: v("colorNoise"),
            spray: v("spray"),
            size: v("size"),
            age: v("age"),
            pulse: v("pulse"),
            flow: v("flow"),
            accel: v("accel"),
            decay: v("decay"),
        }
    }

    /// Apply a `name = value` TOML table. `shape` selects the draw shape;
    /// integers are accepted where floats are expected.
    pub fn apply_toml(&mut self, table: &toml::value::Table) -> Result<()> {
        for (key, value) in table {
            if key == "shape" {
                let s = value.as_str().ok_or_else(|| {
                    DaubError::InvalidConfig("'shape' must be a string".to_string())
                })?;
                self.shape = s.parse()?;
                continue;
            }
            let v = toml_f32(value).ok_or_else(|| {
                DaubError::InvalidConfig(format!("parameter '{key}' must be a number"))
            })?;
            self.set_value(key, v)?;
        }
        Ok(())
    }

    /// Effective values as a `name = value` table, plus the shape
    pub fn to_toml(&self) -> toml::value::Table {
        let mut table = toml::value::Table::new();
        for (name, entry) in &self.params {
            table.insert(name.clone(), toml::Value::Float(entry.effective() as f64));
        }
        table.insert(
            "shape".to_string(),
            toml::Value::String(self.shape.as_str().to_string()),
        );
        table
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::with_hue(0.0)
    }
}

pub(crate) fn toml_f32(v: &toml::Value) -> Option<f32> {
    v.as_float()
        .map(|f| f as f32)
        .or_else(|| v.as_integer().map(|i| i as f32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_schema_is_complete() {
        let palette = Palette::with_hue(120.0);
        for name in PARAM_NAMES {
            assert!(palette.get_param(name).is_ok(), "missing {name}");
        }
        assert_eq!(palette.get_value("colorHue").unwrap(), 120.0);
        assert_eq!(palette.get_value("flow").unwrap(), 50.0);
        assert_eq!(palette.shape(), ShapeKind::SquareFilled);
    }

    #[test]
    fn set_value_overrides_and_clears() {
        let mut palette = Palette::default();
        palette.set_value("flow", 100.0).unwrap();
        assert_eq!(palette.values().flow, 100.0);
        assert_eq!(palette.get_param("flow").unwrap().default, 50.0);
        palette.clear_value("flow").unwrap();
        assert_eq!(palette.values().flow, 50.0);
    }

    #[test]
    fn out_of_range_fails_fast() {
        let mut palette = Palette::default();
        let err = palette.set_value("symmetry", 17.0).unwrap_err();
        assert!(matches!(err, DaubError::ValueOutOfRange { .. }));
        assert!(palette.set_value("symmetry", 0.0).is_err());
        assert!(palette.set_value("decay", f32::NAN).is_err());
        assert_eq!(palette.values().symmetry, 4.0);
    }

    #[test]
    fn unknown_param_is_an_error() {
        let mut palette = Palette::default();
        assert!(matches!(
            palette.set_value("wander", 1.0),
            Err(DaubError::UnknownParam(_))
        ));
        assert!(palette.get_value("wander").is_err());
    }

    #[test]
    fn new_requires_full_schema() {
        let mut params: BTreeMap<String, ParamEntry> = Palette::default()
            .params()
            .map(|(n, e)| (n.to_string(), *e))
            .collect();
        assert!(Palette::new(params.clone(), ShapeKind::Lines).is_ok());
        params.remove("age");
        assert!(Palette::new(params, ShapeKind::Lines).is_err());
    }

    #[test]
    fn apply_toml_with_coercion() {
        let mut palette = Palette::default();
        let table: toml::value::Table =
            toml::from_str("flow = 120\nspray = 0.05\nshape = \"HEX_STROKED\"").unwrap();
        palette.apply_toml(&table).unwrap();
        assert_eq!(palette.values().flow, 120.0);
        assert!((palette.values().spray - 0.05).abs() < 1e-6);
        assert_eq!(palette.shape(), ShapeKind::HexStroked);
    }

    #[test]
    fn apply_toml_rejects_bad_shape() {
        let mut palette = Palette::default();
        let table: toml::value::Table = toml::from_str("shape = \"BLOB\"").unwrap();
        assert!(matches!(
            palette.apply_toml(&table),
            Err(DaubError::InvalidShapeKind { .. })
        ));
    }

    #[test]
    fn to_toml_round_trips_through_apply() {
        let mut source = Palette::with_hue(42.0);
        source.set_value("size", 60.0).unwrap();
        source.set_shape(ShapeKind::CircleShaded);
        let mut target = Palette::default();
        target.apply_toml(&source.to_toml()).unwrap();
        assert_eq!(target.values(), source.values());
        assert_eq!(target.shape(), ShapeKind::CircleShaded);
    }
}
