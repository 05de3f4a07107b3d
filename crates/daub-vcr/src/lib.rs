//! Daub VCR - stroke recording and looped playback
//!
//! While recording, pointer positions are logged against a session clock.
//! When recording stops the log becomes a loop of `duration` milliseconds
//! that is replayed into a [`StrokeSink`] every frame.

mod vcr;

pub use vcr::{RecordedEvent, StrokeSink, Vcr, VcrState};
