use raylib::prelude::*;

use crate::constants::*;
use crate::motion::Viewport;
use crate::state::SequenceStep;

/// Text block shown for one sequence step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caption {
    pub heading: &'static [&'static str],
    pub subline: Option<&'static str>,
    pub headline: bool, // Larger type for the first caption
    pub exits: bool,
}

const STRENGTH: Caption = Caption {
    heading: &["Strength Through"],
    subline: Some("Every Break"),
    headline: true,
    exits: true,
};

const PRECISION: Caption = Caption {
    heading: &["Precision Engineered"],
    subline: Some("For the Perfect Form"),
    headline: false,
    exits: true,
};

const JOIN: Caption = Caption {
    heading: &["Join The", "Fitness Club"],
    subline: None,
    headline: false,
    exits: false,
};

pub fn caption_for(step: SequenceStep) -> Option<&'static Caption> {
    match step {
        SequenceStep::Intro => None,
        SequenceStep::Strength => Some(&STRENGTH),
        SequenceStep::Precision => Some(&PRECISION),
        SequenceStep::Join => Some(&JOIN),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Enter,
    // Visibility level (0..1) the exit started from
    Exit { from: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Shown {
    step: SequenceStep,
    phase: Phase,
    since_ms: f64,
}

/// Visual state of the caption for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptionFrame {
    pub step: SequenceStep,
    pub caption: &'static Caption,
    pub opacity: f32,
    pub offset_x: f32,
}

/// Mounts and unmounts captions one at a time: an exiting caption finishes
/// leaving before the next one starts entering.
#[derive(Debug, Default)]
pub struct CaptionTrack {
    target: SequenceStep,
    shown: Option<Shown>,
}

fn enter_level(elapsed_ms: f64) -> f32 {
    let t = (elapsed_ms / CAPTION_ENTER_MS).clamp(0.0, 1.0) as f32;
    ease::cubic_out(t, 0.0, 1.0, 1.0)
}

fn exit_level(from: f32, elapsed_ms: f64) -> f32 {
    let t = (elapsed_ms / CAPTION_EXIT_MS).clamp(0.0, 1.0) as f32;
    from * (1.0 - ease::cubic_in(t, 0.0, 1.0, 1.0))
}

impl CaptionTrack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the track towards `step`, completing any exit that has run its course.
    pub fn sync(&mut self, step: SequenceStep, now_ms: f64) {
        self.target = step;

        // A finished exit unmounts; the next caption enters when the exit ended
        let mut enter_at = now_ms;
        if let Some(Shown { phase: Phase::Exit { .. }, since_ms, .. }) = self.shown {
            let ends_at = since_ms + CAPTION_EXIT_MS;
            if now_ms < ends_at {
                return;
            }
            self.shown = None;
            enter_at = ends_at;
        }

        match self.shown {
            None => {
                if caption_for(self.target).is_some() {
                    self.shown = Some(Shown { step: self.target, phase: Phase::Enter, since_ms: enter_at });
                }
            }
            Some(shown) if shown.step != self.target => {
                let exits = caption_for(shown.step).is_some_and(|c| c.exits);
                if exits {
                    let from = enter_level(now_ms - shown.since_ms);
                    self.shown = Some(Shown { step: shown.step, phase: Phase::Exit { from }, since_ms: now_ms });
                }
            }
            Some(_) => {}
        }
    }

    pub fn frame(&self, now_ms: f64) -> Option<CaptionFrame> {
        let shown = self.shown?;
        let caption = caption_for(shown.step)?;
        let elapsed = now_ms - shown.since_ms;

        let level = match shown.phase {
            Phase::Enter => enter_level(elapsed),
            Phase::Exit { from } => {
                if elapsed >= CAPTION_EXIT_MS {
                    return None;
                }
                exit_level(from, elapsed)
            }
        };

        Some(CaptionFrame {
            step: shown.step,
            caption,
            opacity: level,
            offset_x: -CAPTION_SLIDE * (1.0 - level),
        })
    }

    pub fn draw(&self, d: &mut impl RaylibDraw, viewport: Viewport, now_ms: f64) {
        let Some(frame) = self.frame(now_ms) else {
            return;
        };
        let caption = frame.caption;

        let wide = viewport.width >= 768.0;
        let padding = if wide { 80.0 } else { 32.0 };
        let (heading_size, subline_size) = match (caption.headline, wide) {
            (true, true) => (96, 36),
            (true, false) => (60, 24),
            (false, true) => (72, 30),
            (false, false) => (48, 20),
        };
        let gap = if caption.subline.is_some() { 16 } else { 32 };

        let heading_height = heading_size * caption.heading.len() as i32;
        let block_height = heading_height + caption.subline.map_or(0, |_| gap + subline_size);

        let x = (padding + frame.offset_x) as i32;
        let mut y = ((viewport.height - block_height as f32) / 2.0) as i32;

        let alpha = |share: f32| (255.0 * share * frame.opacity) as u8;

        for line in caption.heading {
            d.draw_text(line, x, y, heading_size, Color::new(255, 255, 255, alpha(0.9)));
            y += heading_size;
        }
        if let Some(subline) = caption.subline {
            y += gap;
            d.draw_text(subline, x, y, subline_size, Color::new(255, 255, 255, alpha(0.6)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn intro_has_no_caption() {
        let mut track = CaptionTrack::new();
        track.sync(SequenceStep::Intro, 0.0);
        assert!(track.frame(0.0).is_none());
    }

    #[test]
    fn caption_enters_from_the_left() {
        let mut track = CaptionTrack::new();
        track.sync(SequenceStep::Strength, 100.0);

        let start = track.frame(100.0).unwrap();
        assert_eq!(start.step, SequenceStep::Strength);
        assert!(close(start.opacity, 0.0));
        assert!(close(start.offset_x, -20.0));

        let settled = track.frame(1_100.0).unwrap();
        assert!(close(settled.opacity, 1.0));
        assert!(close(settled.offset_x, 0.0));
    }

    #[test]
    fn next_caption_waits_for_the_exit() {
        let mut track = CaptionTrack::new();
        track.sync(SequenceStep::Strength, 0.0);
        track.sync(SequenceStep::Strength, 2_000.0);

        track.sync(SequenceStep::Precision, 5_000.0);
        let leaving = track.frame(5_400.0).unwrap();
        assert_eq!(leaving.step, SequenceStep::Strength);
        assert!(leaving.opacity < 1.0 && leaving.opacity > 0.0);

        // Still exiting: the new caption is not mounted yet
        track.sync(SequenceStep::Precision, 5_400.0);
        assert_eq!(track.frame(5_400.0).unwrap().step, SequenceStep::Strength);

        // Exit ended at 5800; the enter is timed from there
        track.sync(SequenceStep::Precision, 5_900.0);
        let entering = track.frame(5_900.0).unwrap();
        assert_eq!(entering.step, SequenceStep::Precision);
        assert!(close(entering.opacity, enter_level(100.0)));
    }

    #[test]
    fn exit_fades_to_nothing() {
        let mut track = CaptionTrack::new();
        track.sync(SequenceStep::Strength, 0.0);
        track.sync(SequenceStep::Precision, 2_000.0);
        assert!(track.frame(2_800.0).is_none());
    }

    #[test]
    fn join_never_exits() {
        let mut track = CaptionTrack::new();
        track.sync(SequenceStep::Join, 0.0);
        track.sync(SequenceStep::Intro, 1_500.0);
        let frame = track.frame(60_000.0).unwrap();
        assert_eq!(frame.step, SequenceStep::Join);
        assert!(close(frame.opacity, 1.0));
    }

    #[test]
    fn captions_match_the_sequence() {
        assert!(caption_for(SequenceStep::Intro).is_none());
        assert_eq!(caption_for(SequenceStep::Strength).unwrap().heading, &["Strength Through"]);
        assert_eq!(caption_for(SequenceStep::Join).unwrap().heading, &["Join The", "Fitness Club"]);
        assert!(!caption_for(SequenceStep::Join).unwrap().exits);
    }
}
