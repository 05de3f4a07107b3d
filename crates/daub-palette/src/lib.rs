//! Daub Palette - the painting parameter set
//!
//! A palette is a fixed schema of named scalar parameters, each with a
//! default, an inclusive range and an optional live override, plus the
//! currently selected draw shape. Presets are plain name→value TOML tables
//! applied on top of a base palette.

mod param;
mod palette;
mod preset;

pub use palette::{Palette, PaletteValues, PARAM_NAMES};
pub use param::ParamEntry;
pub use preset::{parse_presets, PresetBook};
