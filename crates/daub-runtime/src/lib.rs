//! Daub Runtime - frame loop infrastructure
//!
//! Provides the painting loop building blocks:
//! - `FrameClock` - frame limiter producing `FrameTime`s
//! - `PointerEvent` / `KeyEvent` - host input translated for a layer
//! - `Layer` - one palette, particle store, injector, VCR and renderer
//! - `Studio` - ordered layers, active layer selection and presets
//! - `StudioConfig` - TOML configuration

mod clock;
mod config;
mod input;
mod layer;
mod studio;

pub use clock::FrameClock;
pub use config::StudioConfig;
pub use input::{KeyAction, KeyEvent, PointerEvent, PointerKind};
pub use layer::Layer;
pub use studio::Studio;
