//! Frame limiter

use daub_core::FrameTime;

pub const DEFAULT_FPS_LIMIT: f64 = 30.0;

/// Gates host callbacks down to at most `fps_limit` simulation frames per
/// second. Times are milliseconds since the studio started.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Minimum spacing between frames in milliseconds
    frame_interval: f64,
    /// Time of the last frame that ran
    last_time: f64,
    frames: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::with_fps_limit(DEFAULT_FPS_LIMIT)
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fps_limit(fps_limit: f64) -> Self {
        Self {
            frame_interval: 1000.0 / fps_limit,
            last_time: 0.0,
            frames: 0,
        }
    }

    pub fn frame_interval(&self) -> f64 {
        self.frame_interval
    }

    pub fn last_time(&self) -> f64 {
        self.last_time
    }

    /// Number of frames that have run
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Returns the frame's time when more than one frame interval has passed
    /// since the last frame that ran, `None` otherwise.
    pub fn tick(&mut self, now: f64) -> Option<FrameTime> {
        let delta = now - self.last_time;
        if delta <= self.frame_interval {
            return None;
        }
        self.last_time = now;
        self.frames += 1;
        Some(FrameTime::new(now, delta))
    }
}
