use crate::frame::{FrameTarget, RenderFrame};
use crate::geometry::{geometry, ShapeGeometry};
use daub_core::{RenderContext, ShapeKind};
use daub_particles::ParticleStore;

/// Draws a store's current generation as instanced shapes
#[derive(Debug, Clone)]
pub struct Renderer {
    ctx: RenderContext,
    shape: ShapeKind,
    geometry: &'static ShapeGeometry,
}

impl Renderer {
    pub fn new(ctx: &RenderContext, shape: ShapeKind) -> Self {
        Self {
            ctx: *ctx,
            shape,
            geometry: geometry(shape),
        }
    }

    pub fn context(&self) -> &RenderContext {
        &self.ctx
    }

    pub fn set_context(&mut self, ctx: &RenderContext) {
        self.ctx = *ctx;
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    pub fn geometry(&self) -> &'static ShapeGeometry {
        self.geometry
    }

    pub fn set_shape(&mut self, shape: ShapeKind) {
        if shape != self.shape {
            log::debug!("shape {} -> {}", self.shape, shape);
            self.shape = shape;
            self.geometry = geometry(shape);
        }
    }

    /// Frame description for the store's current generation
    pub fn frame<'a>(&self, store: &'a ParticleStore, now: f64) -> Option<RenderFrame<'a>> {
        store
            .current()
            .map(|g| RenderFrame::new(g, self.shape, self.geometry, now as f32))
    }

    /// Hand the current generation to `target`. Logs and skips the draw
    /// when the store has not been initialized.
    pub fn draw(&self, store: &ParticleStore, now: f64, target: &mut dyn FrameTarget) {
        match self.frame(store, now) {
            Some(frame) => target.draw(&frame),
            None => log::error!("draw before simulation initialized"),
        }
    }
}
