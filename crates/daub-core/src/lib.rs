//! Daub Core - Foundational types for the Daub painting engine
//!
//! This crate provides the core types that all other Daub crates depend on:
//! - `Rgb` - Color triples and HSV conversion
//! - `FrameTime` - The `(nowTime, deltaTime)` pair handed to every frame
//! - `RenderContext` - Explicit canvas/backing-storage description
//! - `ShapeKind` - The closed set of particle draw shapes
//! - Error types and Result alias

mod color;
mod context;
mod error;
mod shape;
mod time;

pub use color::Rgb;
pub use context::RenderContext;
pub use error::{DaubError, Result};
pub use shape::ShapeKind;
pub use time::FrameTime;
