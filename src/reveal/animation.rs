//! Time-based value animation for the reveal cursor.
//!
//! The cursor position is solved analytically from elapsed time rather than
//! integrated frame by frame, so a tick at any instant lands on the exact
//! value for that instant. Repeat handling follows the usual toolkit
//! semantics: the count is the number of extra cycles after the first, and
//! the mode decides whether a new cycle restarts or plays in reverse.

use std::f32::consts::PI;
use std::time::{Duration, Instant};

use super::{RepeatCount, RepeatMode};

/// Lifecycle of the widget's single animation handle.
///
/// `Uncreated -> Running` on the first tick of the first paint cycle.
/// `Running -> Canceled` when the widget is detached; the handle is
/// released but the reveal cursor survives, so a later tick builds a new
/// animation that continues from it.
#[derive(Debug, Clone, Copy)]
pub enum AnimationState {
    Uncreated,
    Running(RevealAnimation),
    Canceled,
}

/// A float animated between two geometry values over a fixed duration.
#[derive(Debug, Clone, Copy)]
pub struct RevealAnimation {
    from: f32,
    to: f32,
    duration: Duration,
    repeat: RepeatCount,
    repeat_mode: RepeatMode,
    started_at: Instant,
}

impl RevealAnimation {
    pub fn new(
        from: f32,
        to: f32,
        duration: Duration,
        repeat: RepeatCount,
        repeat_mode: RepeatMode,
        started_at: Instant,
    ) -> Self {
        Self {
            from,
            to,
            duration: duration.max(Duration::from_millis(1)),
            repeat,
            repeat_mode,
            started_at,
        }
    }

    pub fn start_value(&self) -> f32 {
        self.from
    }

    pub fn end_value(&self) -> f32 {
        self.to
    }

    /// Completed cycles (fractional) at `now`.
    fn cycles(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.started_at);
        elapsed.as_secs_f32() / self.duration.as_secs_f32()
    }

    /// Whether the last allowed cycle has completed. Infinite animations
    /// never finish.
    pub fn is_finished(&self, now: Instant) -> bool {
        match self.repeat {
            RepeatCount::Infinite => false,
            RepeatCount::Times(extra) => self.cycles(now) >= (extra + 1) as f32,
        }
    }

    /// The animated value at `now`.
    pub fn value_at(&self, now: Instant) -> f32 {
        let cycles = self.cycles(now);

        if let RepeatCount::Times(extra) = self.repeat {
            if cycles >= (extra + 1) as f32 {
                // Resting value: restart always ends forward; reverse ends
                // wherever the last cycle's playback direction left it.
                let fraction = match self.repeat_mode {
                    RepeatMode::Restart => 1.0,
                    RepeatMode::Reverse if extra % 2 == 1 => 0.0,
                    RepeatMode::Reverse => 1.0,
                };
                return self.lerp(fraction);
            }
        }

        let iteration = cycles.floor();
        let mut fraction = ease(cycles - iteration);
        if self.repeat_mode == RepeatMode::Reverse && iteration as u64 % 2 == 1 {
            fraction = 1.0 - fraction;
        }
        self.lerp(fraction)
    }

    fn lerp(&self, fraction: f32) -> f32 {
        self.from + (self.to - self.from) * fraction
    }
}

/// Accelerate/decelerate easing: slow at both ends, monotonic throughout.
fn ease(t: f32) -> f32 {
    (1.0 - (PI * t).cos()) / 2.0
}
