//! Recorder/player state machine

use daub_core::Rgb;
use glam::Vec2;

/// One logged pointer event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordedEvent {
    /// Milliseconds since the recording session started
    pub ts: f64,
    pub pos: Vec2,
    pub color: Rgb,
}

/// Receives replayed strokes. Implementors choose the color to paint with;
/// the recorded color is informational.
pub trait StrokeSink {
    fn replay_stroke(&mut self, event: &RecordedEvent);
}

impl<F: FnMut(&RecordedEvent)> StrokeSink for F {
    fn replay_stroke(&mut self, event: &RecordedEvent) {
        self(event)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VcrState {
    Idle,
    Recording,
    Playing,
}

/// Records pointer events and replays them on a loop
#[derive(Debug, Clone, Default)]
pub struct Vcr {
    recording: bool,
    events: Vec<RecordedEvent>,
    head: usize,
    /// Session clock in milliseconds
    now: f64,
    duration: f64,
}

impl Vcr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> VcrState {
        if self.recording {
            VcrState::Recording
        } else if self.can_play() {
            VcrState::Playing
        } else {
            VcrState::Idle
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Drop the log and reset every clock
    pub fn clear(&mut self) {
        self.head = 0;
        self.events.clear();
        self.now = 0.0;
        self.duration = 0.0;
    }

    /// Start or stop a recording session. Setting the current state is a no-op.
    pub fn set_recording(&mut self, recording: bool) {
        if self.recording == recording {
            return;
        }
        if self.recording {
            // session complete
            self.duration = self.now;
            self.head = 0;
            self.now = 0.0;
            self.recording = false;
            log::info!(
                "recording end, {} events, {} ms",
                self.events.len(),
                self.duration
            );
            if !self.events.is_empty() && self.duration <= 0.0 {
                log::warn!("recording has zero duration; playback disabled");
            }
        } else {
            self.clear();
            self.recording = true;
            log::info!("recording start");
        }
    }

    /// Log a pointer event at the current session time. No-op unless recording.
    pub fn record_event(&mut self, pos: Vec2, color: Rgb) {
        if self.recording {
            log::debug!("record event at {} ms", self.now);
            self.events.push(RecordedEvent {
                ts: self.now,
                pos,
                color,
            });
        }
    }

    /// Advance by `delta` ms. While recording this only runs the session
    /// clock; otherwise every event due in `[now, now + delta)` is replayed
    /// in order, looping over the log as many times as needed.
    pub fn play(&mut self, delta: f64, sink: &mut impl StrokeSink) {
        if self.recording {
            self.now += delta;
            return;
        }
        if !self.can_play() {
            return;
        }

        let mut end_time = self.now + delta;
        while self.events[self.head].ts < end_time {
            sink.replay_stroke(&self.events[self.head]);
            self.head += 1;
            if self.head == self.events.len() {
                self.head = 0;
                end_time -= self.duration;
            }
        }
        self.now = end_time;
    }

    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Index of the next event to replay
    pub fn head(&self) -> usize {
        self.head
    }

    /// Session clock in milliseconds
    pub fn session_time(&self) -> f64 {
        self.now
    }

    /// Loop length in milliseconds, set when recording stops
    pub fn duration(&self) -> f64 {
        self.duration
    }

    fn can_play(&self) -> bool {
        !self.events.is_empty() && self.duration > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a() -> Vec2 {
        Vec2::new(10.0, 20.0)
    }

    fn b() -> Vec2 {
        Vec2::new(30.0, 40.0)
    }

    /// Record A at 0 ms and B at 500 ms in a 1000 ms session
    fn recorded() -> Vcr {
        let mut vcr = Vcr::new();
        let mut ignore = |_: &RecordedEvent| {};
        vcr.set_recording(true);
        vcr.record_event(a(), Rgb::WHITE);
        vcr.play(500.0, &mut ignore);
        vcr.record_event(b(), Rgb::BLACK);
        vcr.play(500.0, &mut ignore);
        vcr.set_recording(false);
        vcr
    }

    #[test]
    fn stop_sets_duration_and_rewinds() {
        let vcr = recorded();
        assert_eq!(vcr.duration(), 1000.0);
        assert_eq!(vcr.head(), 0);
        assert_eq!(vcr.session_time(), 0.0);
        assert_eq!(vcr.events().len(), 2);
        assert_eq!(vcr.events()[1].ts, 500.0);
        assert_eq!(vcr.state(), VcrState::Playing);
    }

    #[test]
    fn replay_loops_without_loss_or_duplication() {
        let mut vcr = recorded();
        let mut seen = Vec::new();
        for tick in 0..10 {
            let before = seen.len();
            vcr.play(1000.0, &mut |e: &RecordedEvent| seen.push(e.pos));
            assert_eq!(seen.len() - before, 2, "tick {tick}");
        }
        assert_eq!(seen.len(), 20);
        for pair in seen.chunks(2) {
            assert_eq!(pair, &[a(), b()]);
        }
    }

    #[test]
    fn slow_frame_catches_up_several_loops() {
        let mut vcr = recorded();
        let mut count = 0;
        vcr.play(3000.0, &mut |_: &RecordedEvent| count += 1);
        assert_eq!(count, 6);
        assert_eq!(vcr.head(), 0);
    }

    #[test]
    fn small_steps_replay_on_schedule() {
        let mut vcr = recorded();
        let mut seen = Vec::new();
        vcr.play(250.0, &mut |e: &RecordedEvent| seen.push(e.pos));
        assert_eq!(seen, vec![a()]);
        vcr.play(250.0, &mut |e: &RecordedEvent| seen.push(e.pos));
        assert_eq!(seen, vec![a()]);
        vcr.play(1.0, &mut |e: &RecordedEvent| seen.push(e.pos));
        assert_eq!(seen, vec![a(), b()]);
        assert_eq!(vcr.head(), 0);
    }

    #[test]
    fn record_only_while_recording() {
        let mut vcr = Vcr::new();
        vcr.record_event(a(), Rgb::WHITE);
        assert!(vcr.events().is_empty());
        assert_eq!(vcr.state(), VcrState::Idle);
    }

    #[test]
    fn empty_or_zero_length_log_is_noop() {
        let mut vcr = Vcr::new();
        let mut count = 0;
        vcr.play(100.0, &mut |_: &RecordedEvent| count += 1);

        vcr.set_recording(true);
        vcr.record_event(a(), Rgb::WHITE);
        vcr.set_recording(false);
        assert_eq!(vcr.duration(), 0.0);
        vcr.play(100.0, &mut |_: &RecordedEvent| count += 1);
        assert_eq!(count, 0);
        assert_eq!(vcr.state(), VcrState::Idle);
    }

    #[test]
    fn new_session_clears_log() {
        let mut vcr = recorded();
        vcr.set_recording(true);
        assert!(vcr.events().is_empty());
        assert_eq!(vcr.session_time(), 0.0);
        // toggling to the same state changes nothing
        vcr.record_event(a(), Rgb::WHITE);
        vcr.set_recording(true);
        assert_eq!(vcr.events().len(), 1);
    }
}
