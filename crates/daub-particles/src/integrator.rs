//! Per-slot simulation transition and render-time helpers
//!
//! `step` is pure: it reads one slot and returns its successor, with no
//! cross-slot dependencies, so `ParticleStore::integrate` may run it over
//! every slot in any order or in parallel.

use crate::curves::{lerp_rgb, span_fraction};
use crate::slot::Slot;
use daub_core::FrameTime;

/// Relative size swing of a pulsing particle
pub const PULSE_DEPTH: f32 = 0.5;

/// A slot is dead once `now` is past its death time. A slot with an empty
/// lifespan (never written, all zero) is always dead.
pub fn is_dead(slot: &Slot, now: f32) -> bool {
    now > slot.death_time() || slot.death_time() <= slot.birth_time()
}

/// Elapsed fraction of the slot's lifetime, clamped to [0, 1]
pub fn life_fraction(slot: &Slot, now: f32) -> f32 {
    span_fraction(slot.birth_time(), slot.death_time(), now)
}

/// Advance one slot by `time.delta`. Dead slots are carried unchanged.
pub fn step(slot: &Slot, time: FrameTime) -> Slot {
    if is_dead(slot, time.now as f32) {
        return *slot;
    }
    let dt = time.delta_secs();
    let [ax, ay] = slot.accel();
    let decay = slot.decay();
    let [mut vx, mut vy] = slot.velocity();
    vx = (vx + ax * dt) * decay;
    vy = (vy + ay * dt) * decay;
    let [px, py] = slot.position();

    let mut next = *slot;
    next.set_motion([px + vx * dt, py + vy * dt], [vx, vy]);
    next
}

/// Birth→death color blend at `now`, alpha 0 once dead
pub fn color_at(slot: &Slot, now: f32) -> [f32; 4] {
    if is_dead(slot, now) {
        let [r, g, b] = slot.death_color();
        return [r, g, b, 0.0];
    }
    let [r, g, b] = lerp_rgb(slot.birth_color(), slot.death_color(), life_fraction(slot, now));
    [r, g, b, 1.0]
}

/// Size at `now`, swinging by `PULSE_DEPTH` at the slot's pulse frequency (Hz)
pub fn size_at(slot: &Slot, now: f32) -> f32 {
    let pulse = slot.pulse();
    if pulse <= 0.0 {
        return slot.size();
    }
    let age_secs = (now - slot.birth_time()).max(0.0) / 1000.0;
    let phase = std::f32::consts::TAU * pulse * age_secs;
    slot.size() * (1.0 + PULSE_DEPTH * phase.sin())
}
