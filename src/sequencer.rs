use tracing::{debug, warn};

use crate::constants::*;
use crate::state::SequenceStep;
use crate::timers::TimerSet;

/// Drives the caption [`SequenceStep`] from three one-shot timers armed at readiness.
#[derive(Debug, Default)]
pub struct CaptionSequencer {
    step: SequenceStep,
    timers: TimerSet<SequenceStep>,
    armed: bool,
}

impl CaptionSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> SequenceStep {
        self.step
    }

    #[cfg(test)]
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Schedules the whole caption timeline relative to `ready_at_ms`.
    pub fn arm(&mut self, ready_at_ms: f64) {
        if self.armed {
            return;
        }
        self.armed = true;
        self.timers.schedule(ready_at_ms + STRENGTH_AT_MS, SequenceStep::Strength);
        self.timers.schedule(ready_at_ms + PRECISION_AT_MS, SequenceStep::Precision);
        self.timers.schedule(ready_at_ms + JOIN_AT_MS, SequenceStep::Join);
        debug!(ready_at_ms, "caption timers armed");
    }

    /// Fires due timers and returns the steps entered, in order.
    pub fn poll(&mut self, now_ms: f64) -> Vec<SequenceStep> {
        let mut entered = Vec::new();
        for target in self.timers.take_due(now_ms) {
            match self.step.next() {
                Some(next) if next == target => {
                    self.step = next;
                    entered.push(next);
                    debug!(step = next.index(), now_ms, "caption step advanced");
                    if next.is_terminal() {
                        debug!("caption sequence complete");
                    }
                }
                _ => warn!(?target, current = ?self.step, "ignoring out-of-order caption timer"),
            }
        }
        entered
    }

    /// Cancels every pending timer; later polls never transition.
    pub fn cancel(&mut self) {
        let cancelled = self.timers.cancel_all();
        if cancelled > 0 {
            debug!(cancelled, "caption timers cancelled");
        }
    }
}
