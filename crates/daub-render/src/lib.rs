//! Daub Render - shape instancing front-end
//!
//! The renderer hands each frame's current particle generation to a
//! [`FrameTarget`] together with the static geometry of the active
//! [`ShapeKind`](daub_core::ShapeKind). Issuing real draw calls is the
//! target's business; [`Rasterizer`] is a CPU target that paints into an
//! RGBA image for headless output.

mod error;
mod frame;
mod geometry;
mod raster;
mod renderer;

pub use error::RenderError;
pub use frame::{FrameStats, FrameTarget, RenderFrame};
pub use geometry::{geometry, Primitive, ShapeGeometry};
pub use raster::Rasterizer;
pub use renderer::Renderer;
