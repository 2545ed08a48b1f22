use tracing::{debug, info};

use crate::sequencer::CaptionSequencer;
use crate::state::SequenceStep;

/// Handle of the per-frame render callback.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum FrameLoop {
    #[default]
    Idle,
    Running { started_at_ms: f64 },
    Stopped,
}

impl FrameLoop {
    /// Starts the loop once; a stopped loop stays stopped.
    pub fn start(&mut self, now_ms: f64) -> bool {
        if *self != FrameLoop::Idle {
            return false;
        }
        *self = FrameLoop::Running { started_at_ms: now_ms };
        true
    }

    pub fn stop(&mut self) {
        *self = FrameLoop::Stopped;
    }

    pub fn is_running(&self) -> bool {
        matches!(self, FrameLoop::Running { .. })
    }

    /// Time since the loop started, used as the entrance clock.
    pub fn elapsed_ms(&self, now_ms: f64) -> Option<f32> {
        match self {
            FrameLoop::Running { started_at_ms } => Some((now_ms - started_at_ms).max(0.0) as f32),
            _ => None,
        }
    }
}

/// Lifecycle of the landing scene: readiness, the caption timers and the frame loop.
///
/// Everything scheduled here is released together by [`Timeline::teardown`].
#[derive(Debug)]
pub struct Timeline {
    mounted_at_ms: f64,
    ready_at_ms: Option<f64>,
    sequencer: CaptionSequencer,
    frame_loop: FrameLoop,
    torn_down: bool,
}

impl Timeline {
    pub fn new(mounted_at_ms: f64) -> Self {
        Self {
            mounted_at_ms,
            ready_at_ms: None,
            sequencer: CaptionSequencer::new(),
            frame_loop: FrameLoop::default(),
            torn_down: false,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready_at_ms.is_some()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn step(&self) -> SequenceStep {
        self.sequencer.step()
    }

    pub fn frame_loop(&self) -> FrameLoop {
        self.frame_loop
    }

    pub fn mounted_ms(&self, now_ms: f64) -> f64 {
        (now_ms - self.mounted_at_ms).max(0.0)
    }

    /// Flips the ready flag once and arms the caption timers.
    pub fn mark_ready(&mut self, now_ms: f64) -> bool {
        if self.torn_down || self.ready_at_ms.is_some() {
            return false;
        }
        self.ready_at_ms = Some(now_ms);
        self.sequencer.arm(now_ms);
        info!(ready_at_ms = now_ms, "landing ready");
        true
    }

    pub fn start_frame_loop(&mut self, now_ms: f64) -> bool {
        if self.torn_down || !self.is_ready() {
            return false;
        }
        let started = self.frame_loop.start(now_ms);
        if started {
            debug!(now_ms, "render loop started");
        }
        started
    }

    pub fn stop_frame_loop(&mut self) {
        self.frame_loop.stop();
    }

    /// Advances the caption timers; returns the steps entered this tick.
    pub fn tick(&mut self, now_ms: f64) -> Vec<SequenceStep> {
        if self.torn_down {
            return Vec::new();
        }
        self.sequencer.poll(now_ms)
    }

    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.sequencer.cancel();
        self.frame_loop.stop();
        debug!("timeline torn down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_runs_before_readiness() {
        let mut timeline = Timeline::new(0.0);
        assert!(!timeline.start_frame_loop(10.0));
        assert!(timeline.tick(60_000.0).is_empty());
        assert_eq!(timeline.step(), SequenceStep::Intro);
    }

    #[test]
    fn readiness_is_set_once() {
        let mut timeline = Timeline::new(0.0);
        assert!(timeline.mark_ready(100.0));
        assert!(!timeline.mark_ready(200.0));
        // Timers stay anchored to the first readiness
        assert_eq!(timeline.tick(600.0), vec![SequenceStep::Strength]);
    }

    #[test]
    fn captions_advance_at_the_scheduled_offsets() {
        let t0 = 2_000.0;
        let frame = 1000.0 / 60.0;
        let mut timeline = Timeline::new(0.0);
        timeline.mark_ready(t0);

        let mut entered_at = Vec::new();
        let mut now = t0;
        while now < t0 + 12_000.0 {
            for step in timeline.tick(now) {
                entered_at.push((step, now - t0));
            }
            now += frame;
        }

        let expected = [(SequenceStep::Strength, 500.0), (SequenceStep::Precision, 5_500.0), (SequenceStep::Join, 10_500.0)];
        assert_eq!(entered_at.len(), 3);
        for ((step, at), (want_step, want_at)) in entered_at.iter().zip(expected) {
            assert_eq!(*step, want_step);
            assert!(*at >= want_at && *at < want_at + frame, "{step:?} entered at {at}");
        }
    }

    #[test]
    fn teardown_before_any_timer_prevents_transitions() {
        let mut timeline = Timeline::new(0.0);
        timeline.mark_ready(0.0);
        timeline.start_frame_loop(0.0);
        timeline.tick(499.0);
        timeline.teardown();

        assert!(timeline.tick(60_000.0).is_empty());
        assert_eq!(timeline.step(), SequenceStep::Intro);
        assert_eq!(timeline.frame_loop(), FrameLoop::Stopped);
        assert!(!timeline.start_frame_loop(70_000.0));
    }

    #[test]
    fn late_readiness_after_teardown_is_ignored() {
        let mut timeline = Timeline::new(0.0);
        timeline.teardown();
        assert!(!timeline.mark_ready(10.0));
        assert!(!timeline.is_ready());
    }

    #[test]
    fn frame_loop_measures_entrance_from_its_start() {
        let mut timeline = Timeline::new(0.0);
        timeline.mark_ready(100.0);
        timeline.start_frame_loop(250.0);
        assert!(!timeline.start_frame_loop(400.0));
        assert_eq!(timeline.frame_loop().elapsed_ms(1_250.0), Some(1_000.0));
    }

    #[test]
    fn stopped_loop_does_not_restart() {
        let mut frame_loop = FrameLoop::default();
        frame_loop.stop();
        assert!(!frame_loop.start(0.0));
        assert!(!frame_loop.is_running());
        assert_eq!(frame_loop.elapsed_ms(10.0), None);
    }
}
