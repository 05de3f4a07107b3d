//! Error types for Daub

use thiserror::Error;

/// The main error type for Daub operations
#[derive(Debug, Error)]
pub enum DaubError {
    #[error("Unknown parameter: {0}")]
    UnknownParam(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Invalid draw shape: {value} is not one of {allowed:?}")]
    InvalidShapeKind {
        value: String,
        allowed: Vec<String>,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Layer not found: index {index} (have {count})")]
    LayerNotFound { index: usize, count: usize },

    #[error("Preset not found: {0}")]
    PresetNotFound(String),

    #[error("Invalid preset name: {0}")]
    InvalidPresetName(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),
}

/// Result type alias for Daub operations
pub type Result<T> = std::result::Result<T, DaubError>;

impl From<toml::de::Error> for DaubError {
    fn from(err: toml::de::Error) -> Self {
        DaubError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for DaubError {
    fn from(err: toml::ser::Error) -> Self {
        DaubError::TomlSerError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_message_names_bounds() {
        let err = DaubError::ValueOutOfRange {
            field: "flow".into(),
            min: 10.0,
            max: 250.0,
            value: 300.0,
        };
        assert_eq!(
            err.to_string(),
            "Value out of range: flow must be between 10 and 250, got 300"
        );
    }

    #[test]
    fn toml_errors_convert() {
        let bad: std::result::Result<toml::Value, _> = toml::from_str("flow = ");
        let err: DaubError = bad.unwrap_err().into();
        assert!(matches!(err, DaubError::TomlParseError(_)));
    }
}
