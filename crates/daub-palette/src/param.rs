//! A single bounded parameter

use daub_core::{DaubError, Result};
use serde::{Deserialize, Serialize};

/// `{ default, min, max, value? }`: the effective value is the override if
/// one is set, otherwise the default
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamEntry {
    pub default: f32,
    pub min: f32,
    pub max: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f32>,
}

impl ParamEntry {
    pub const fn new(default: f32, min: f32, max: f32) -> Self {
        Self {
            default,
            min,
            max,
            value: None,
        }
    }

    pub fn effective(&self) -> f32 {
        self.value.unwrap_or(self.default)
    }

    pub fn contains(&self, v: f32) -> bool {
        v >= self.min && v <= self.max
    }

    /// Position of the effective value within the range, in [0, 1]
    pub fn normalized(&self) -> f32 {
        let span = self.max - self.min;
        if span <= 0.0 {
            0.0
        } else {
            (self.effective() - self.min) / span
        }
    }

    /// Check the entry's own bounds are consistent
    pub(crate) fn check(&self, name: &str) -> Result<()> {
        if !(self.min <= self.max) {
            return Err(DaubError::InvalidConfig(format!(
                "parameter '{name}': min {} exceeds max {}",
                self.min, self.max
            )));
        }
        for v in std::iter::once(self.default).chain(self.value) {
            if !self.contains(v) {
                return Err(out_of_range(name, self, v));
            }
        }
        Ok(())
    }
}

pub(crate) fn out_of_range(name: &str, entry: &ParamEntry, value: f32) -> DaubError {
    DaubError::ValueOutOfRange {
        field: name.to_string(),
        min: entry.min as f64,
        max: entry.max as f64,
        value: value as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_prefers_override() {
        let mut p = ParamEntry::new(4.0, 1.0, 16.0);
        assert_eq!(p.effective(), 4.0);
        p.value = Some(8.0);
        assert_eq!(p.effective(), 8.0);
    }

    #[test]
    fn normalized_spans_range() {
        let mut p = ParamEntry::new(0.0, -10.0, 10.0);
        assert!((p.normalized() - 0.5).abs() < 1e-6);
        p.value = Some(10.0);
        assert!((p.normalized() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn check_rejects_default_outside_range() {
        let p = ParamEntry::new(20.0, 1.0, 16.0);
        assert!(p.check("symmetry").is_err());
        let inverted = ParamEntry::new(1.0, 5.0, 0.0);
        assert!(inverted.check("x").is_err());
    }
}
