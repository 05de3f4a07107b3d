//! Frame timing handed to the simulation by the host driver

/// The `(nowTime, deltaTime)` pair for one animation frame, both in milliseconds
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    /// Milliseconds since the session started
    pub now: f64,
    /// Milliseconds since the previous simulated frame
    pub delta: f64,
}

impl FrameTime {
    pub const fn new(now: f64, delta: f64) -> Self {
        Self { now, delta }
    }

    /// Delta time in seconds
    pub fn delta_secs(&self) -> f32 {
        (self.delta / 1000.0) as f32
    }

    /// The frame that follows this one after `delta` milliseconds
    pub fn advance(&self, delta: f64) -> Self {
        Self {
            now: self.now + delta,
            delta,
        }
    }
}
