//! Converts pointer stroke segments into batches of particles
//!
//! Emission is rate-limited by a fractional accumulator so the number of
//! particles per second follows the palette's `flow` regardless of how the
//! frame time is sliced. Each emitting call expands the stroke into
//! `ceil(symmetry)` copies rotated about the canvas center.

use crate::rand::ParticleRng;
use crate::slot::{ParticleSpawn, Slot};
use crate::store::ParticleStore;
use daub_core::{FrameTime, RenderContext, Rgb};
use daub_palette::PaletteValues;
use glam::Vec2;
use std::f32::consts::TAU;

/// Drag vectors are divided by the canvas size and scaled by this to give
/// the initial velocity in normalized device units per second
pub const VELOCITY_SCALE: f32 = 10.0;
/// Upper bound of the random amount subtracted from `decay`
pub const DECAY_JITTER: f32 = 0.05;
/// Relative size jitter
pub const SIZE_JITTER: f32 = 0.5;

/// Stroke-to-particle converter for one layer
#[derive(Debug, Clone)]
pub struct Injector {
    ctx: RenderContext,
    rng: ParticleRng,
    accumulator: f64,
    last_loc: Option<Vec2>,
    batch: Vec<Slot>,
}

impl Injector {
    pub fn new(ctx: &RenderContext, seed: u32) -> Self {
        Self {
            ctx: *ctx,
            rng: ParticleRng::new(seed),
            accumulator: 0.0,
            last_loc: None,
            batch: Vec::new(),
        }
    }

    pub fn context(&self) -> &RenderContext {
        &self.ctx
    }

    /// Canvas resized: subsequent strokes map through the new size
    pub fn set_context(&mut self, ctx: &RenderContext) {
        self.ctx = *ctx;
    }

    pub fn last_loc(&self) -> Option<Vec2> {
        self.last_loc
    }

    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Pointer released: the next stroke starts without a drag vector
    pub fn end_stroke(&mut self) {
        self.last_loc = None;
    }

    /// Inject particles along the segment from the previous pointer location
    /// to `loc`. Returns the number of particles written.
    pub fn inject(
        &mut self,
        store: &mut ParticleStore,
        loc: Vec2,
        color: Rgb,
        values: &PaletteValues,
        time: FrameTime,
    ) -> usize {
        let start = self.last_loc;
        let written = self.inject_segment(store, start, loc, color, values, time);
        if written > 0 {
            self.last_loc = Some(loc);
        }
        written
    }

    /// Inject along an explicit segment. `start == None` means the first
    /// event of a stroke (zero drag vector). Does not move the stroke cursor.
    pub fn inject_segment(
        &mut self,
        store: &mut ParticleStore,
        start: Option<Vec2>,
        end: Vec2,
        color: Rgb,
        values: &PaletteValues,
        time: FrameTime,
    ) -> usize {
        let num_to_add = self.take_emission(values.flow, time.delta);
        if num_to_add == 0 {
            return 0;
        }

        let symmetries = values.symmetry.ceil().max(1.0) as usize;
        let step = TAU / symmetries as f32;
        let size = Vec2::from(self.ctx.size());
        let center = Vec2::from(self.ctx.center());

        let p_vec = end - center;
        let p_last_vec = start.unwrap_or(end) - center;
        let mut p_angle = p_vec.y.atan2(p_vec.x);
        let mut p_last_angle = p_last_vec.y.atan2(p_last_vec.x);

        // only the newest `capacity` samples would survive the ring write
        let total = num_to_add * symmetries;
        let skip = total.saturating_sub(store.capacity());

        let now = time.now as f32;
        let mut batch = std::mem::take(&mut self.batch);
        batch.clear();
        batch.reserve(total - skip);

        for s in 0..symmetries {
            let sym_p = center + Vec2::from_angle(p_angle) * p_vec.length();
            let last_sym_p = center + Vec2::from_angle(p_last_angle) * p_last_vec.length();
            let drag = sym_p - last_sym_p;

            let velocity = if start.is_some() {
                [
                    drag.x / size.x * VELOCITY_SCALE,
                    -drag.y / size.y * VELOCITY_SCALE,
                ]
            } else {
                [0.0, 0.0]
            };

            let first = skip.saturating_sub(s * num_to_add).min(num_to_add);
            for p in first..num_to_add {
                let t = p as f32 / num_to_add as f32;
                let pixel = last_sym_p + drag * t;
                let [jx, jy] = self.rng.in_disc(values.spray);
                let ndc = Vec2::from(self.ctx.to_ndc(pixel.x, pixel.y)) + Vec2::new(jx, jy);

                // radial direction of the particle itself, not toward the center
                let accel = ndc.normalize_or_zero() * values.accel;

                let spawn = ParticleSpawn {
                    position: ndc.to_array(),
                    velocity,
                    accel: accel.to_array(),
                    decay: values.decay - self.rng.range(0.0, DECAY_JITTER),
                    birth_color: self.noisy(color.to_array(), values.color_noise),
                    birth_time: now,
                    death_color: self.noisy(color.inverted().to_array(), values.color_noise),
                    death_time: now + values.age,
                    size: values.size + values.size * self.rng.signed() * SIZE_JITTER,
                    pulse: values.pulse,
                    spawn_angle: p_last_angle,
                    jitter: (self.rng.next_f32() - 0.5) / 2.0 * drag.length() / 3.0,
                };
                batch.push(spawn.to_slot());
            }

            p_angle += step;
            p_last_angle += step;
        }

        store.write_batch(&batch);
        let written = batch.len();
        self.batch = batch;
        log::trace!("injected {written} particles ({symmetries} symmetries)");
        written
    }

    /// Add `flow * dt` to the accumulator and take out its whole part
    fn take_emission(&mut self, flow: f32, delta_ms: f64) -> usize {
        self.accumulator += flow as f64 * (delta_ms / 1000.0);
        if self.accumulator < 1.0 {
            return 0;
        }
        let whole = self.accumulator.floor();
        self.accumulator -= whole;
        whole as usize
    }

    fn noisy(&mut self, rgb: [f32; 3], noise: f32) -> [f32; 3] {
        rgb.map(|c| (c + self.rng.signed() * noise).clamp(0.0, 1.0))
    }
}
