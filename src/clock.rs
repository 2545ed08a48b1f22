use std::time::Instant;

/// Millisecond time source for the frame loop.
pub trait Clock {
    fn now_ms(&self) -> f64;

    /// Called once per rendered frame.
    fn tick(&mut self) {}
}

/// Real time since the clock was created.
pub struct WallClock {
    origin: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Clock for WallClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Deterministic clock advancing one frame per tick, for offline rendering.
pub struct FixedStepClock {
    frame: u64,
    step_ms: f64,
}

impl FixedStepClock {
    pub fn new(fps: u32) -> Self {
        Self { frame: 0, step_ms: 1000.0 / fps.max(1) as f64 }
    }
}

impl Clock for FixedStepClock {
    fn now_ms(&self) -> f64 {
        self.frame as f64 * self.step_ms
    }

    fn tick(&mut self) {
        self.frame += 1;
    }
}
