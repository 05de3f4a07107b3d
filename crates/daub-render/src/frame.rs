//! Per-frame handoff between the renderer and a draw target

use crate::geometry::ShapeGeometry;
use daub_core::ShapeKind;
use daub_particles::integrator::is_dead;
use daub_particles::{ChannelPlane, Generation, Slot, CHANNEL_COUNT};

/// Everything a target needs to issue one instanced draw
#[derive(Debug, Clone, Copy)]
pub struct RenderFrame<'a> {
    generation: &'a Generation,
    pub instance_count: usize,
    pub shape: ShapeKind,
    pub geometry: &'static ShapeGeometry,
    /// Simulation time in milliseconds
    pub now: f32,
}

impl<'a> RenderFrame<'a> {
    pub fn new(
        generation: &'a Generation,
        shape: ShapeKind,
        geometry: &'static ShapeGeometry,
        now: f32,
    ) -> Self {
        Self {
            generation,
            instance_count: generation.len(),
            shape,
            geometry,
            now,
        }
    }

    /// The six channel buffers, one texel per instance
    pub fn planes(&self) -> &'a [ChannelPlane; CHANNEL_COUNT] {
        self.generation.planes()
    }

    pub fn slot(&self, instance: usize) -> Slot {
        self.generation.slot(instance)
    }

    /// Instances still alive at `now`
    pub fn live_slots(&self) -> impl Iterator<Item = Slot> + 'a {
        let now = self.now;
        self.generation.slots().filter(move |s| !is_dead(s, now))
    }
}

/// Receives one frame per layer per simulation step
pub trait FrameTarget {
    /// Called once before any layer draws into a new frame
    fn begin_frame(&mut self) {}

    fn draw(&mut self, frame: &RenderFrame<'_>);
}

/// Target that only counts what it is handed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub frames: usize,
    pub draws: usize,
    pub live_instances: usize,
}

impl FrameTarget for FrameStats {
    fn begin_frame(&mut self) {
        self.frames += 1;
        self.live_instances = 0;
    }

    fn draw(&mut self, frame: &RenderFrame<'_>) {
        self.draws += 1;
        self.live_instances += frame.live_slots().count();
    }
}
