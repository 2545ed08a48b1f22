/// Scheduling order of a timer, used to break ties between equal due times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TimerId(u64);

#[derive(Debug)]
struct Pending<E> {
    id: TimerId,
    due_ms: f64,
    event: E,
}

/// One-shot timers polled by the frame loop.
///
/// Every timer stays tracked until it fires or is cancelled, so a teardown can
/// release all of them at once with [`TimerSet::cancel_all`].
#[derive(Debug)]
pub struct TimerSet<E> {
    next_id: u64,
    pending: Vec<Pending<E>>,
}

impl<E> TimerSet<E> {
    pub fn new() -> Self {
        Self { next_id: 0, pending: Vec::new() }
    }

    pub fn schedule(&mut self, due_ms: f64, event: E) {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending { id, due_ms, event });
    }

    pub fn cancel_all(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        count
    }

    /// Removes and returns every timer due at `now_ms`, earliest first.
    /// Timers due at the same instant keep their scheduling order.
    pub fn take_due(&mut self, now_ms: f64) -> Vec<E> {
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due_ms <= now_ms);
        self.pending = rest;
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.id.0.cmp(&b.id.0)));
        due.into_iter().map(|p| p.event).collect()
    }

    #[cfg(test)]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl<E> Default for TimerSet<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_only_due_timers_in_due_order() {
        let mut timers = TimerSet::new();
        timers.schedule(300.0, "c");
        timers.schedule(100.0, "a");
        timers.schedule(200.0, "b");

        assert!(timers.take_due(50.0).is_empty());
        assert_eq!(timers.take_due(250.0), vec!["a", "b"]);
        assert_eq!(timers.pending(), 1);
        assert_eq!(timers.take_due(300.0), vec!["c"]);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn equal_due_times_keep_scheduling_order() {
        let mut timers = TimerSet::new();
        timers.schedule(10.0, 1);
        timers.schedule(10.0, 2);
        assert_eq!(timers.take_due(10.0), vec![1, 2]);
    }

    #[test]
    fn cancel_all_releases_everything() {
        let mut timers = TimerSet::new();
        timers.schedule(1.0, ());
        timers.schedule(2.0, ());
        timers.schedule(3.0, ());

        assert_eq!(timers.cancel_all(), 3);
        assert!(timers.take_due(f64::MAX).is_empty());
        assert_eq!(timers.cancel_all(), 0);
    }
}
