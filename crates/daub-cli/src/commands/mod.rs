//! CLI command implementations

pub mod params;
pub mod render;
pub mod session;
pub mod simulate;
pub mod validate;
