//! Daub Particles - the simulation core
//!
//! Provides a fixed-capacity particle engine with:
//! - A ring-buffered, six-channel, double-buffered `ParticleStore`
//! - An `Injector` turning pointer stroke segments into particle batches
//!   (symmetry expansion, drag interpolation, stochastic jitter)
//! - A pure per-slot `integrator` transition, optionally run on rayon
//! - Pod slot/texel types ready for instanced GPU upload

pub mod curves;
pub mod injector;
pub mod integrator;
pub mod rand;
pub mod slot;
pub mod store;

pub use injector::Injector;
pub use rand::ParticleRng;
pub use slot::{Channel, ParticleSpawn, Slot, Texel, CHANNEL_COUNT};
pub use store::{ChannelPlane, Generation, ParticleStore};
