//! The closed set of particle draw shapes

use crate::error::DaubError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How each particle instance is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShapeKind {
    Points,
    Lines,
    TriStroked,
    TriFilled,
    SquareStroked,
    #[default]
    SquareFilled,
    HexStroked,
    HexFilled,
    CircleShaded,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 9] = [
        ShapeKind::Points,
        ShapeKind::Lines,
        ShapeKind::TriStroked,
        ShapeKind::TriFilled,
        ShapeKind::SquareStroked,
        ShapeKind::SquareFilled,
        ShapeKind::HexStroked,
        ShapeKind::HexFilled,
        ShapeKind::CircleShaded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Points => "POINTS",
            ShapeKind::Lines => "LINES",
            ShapeKind::TriStroked => "TRI_STROKED",
            ShapeKind::TriFilled => "TRI_FILLED",
            ShapeKind::SquareStroked => "SQUARE_STROKED",
            ShapeKind::SquareFilled => "SQUARE_FILLED",
            ShapeKind::HexStroked => "HEX_STROKED",
            ShapeKind::HexFilled => "HEX_FILLED",
            ShapeKind::CircleShaded => "CIRCLE_SHADED",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = DaubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DaubError::InvalidShapeKind {
                value: s.to_string(),
                allowed: ShapeKind::ALL.iter().map(|k| k.as_str().to_string()).collect(),
            })
    }
}
