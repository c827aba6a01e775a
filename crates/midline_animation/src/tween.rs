//! Tweens - timed interpolation between two values
//!
//! A [`Tween`] knows nothing about schedulers or listeners. It advances by a
//! time delta and reports the lifecycle boundaries it crossed.

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;
use thiserror::Error;

use crate::easing::Easing;
use crate::values::Interpolate;

/// How many extra cycles run after the first one
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RepeatCount {
    /// Play once plus `n` repeats
    Finite(u32),
    /// Repeat until cancelled
    Infinite,
}

impl RepeatCount {
    /// Play exactly once
    pub const NONE: RepeatCount = RepeatCount::Finite(0);

    /// Whether another cycle may start after `completed_repeats` repeats
    pub fn allows(&self, completed_repeats: u32) -> bool {
        match *self {
            RepeatCount::Finite(n) => completed_repeats < n,
            RepeatCount::Infinite => true,
        }
    }
}

impl Default for RepeatCount {
    fn default() -> Self {
        RepeatCount::NONE
    }
}

impl From<u32> for RepeatCount {
    fn from(n: u32) -> Self {
        RepeatCount::Finite(n)
    }
}

impl fmt::Display for RepeatCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepeatCount::Finite(n) => write!(f, "{n}"),
            RepeatCount::Infinite => f.write_str("infinite"),
        }
    }
}

/// Error returned when parsing a [`RepeatCount`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid repeat count `{0}`: expected a non-negative integer, `infinite`, or -1")]
pub struct ParseRepeatCountError(String);

impl FromStr for RepeatCount {
    type Err = ParseRepeatCountError;

    /// Accepts `infinite`, `-1`, or a non-negative integer
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("infinite") || trimmed == "-1" {
            return Ok(RepeatCount::Infinite);
        }
        trimmed
            .parse::<u32>()
            .map(RepeatCount::Finite)
            .map_err(|_| ParseRepeatCountError(s.to_string()))
    }
}

/// Lifecycle state of a tween
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TweenState {
    /// Created, not started
    #[default]
    Idle,
    Running,
    /// Reached the end of its last cycle
    Finished,
    Cancelled,
}

/// A lifecycle boundary crossed by a tween
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenEvent {
    Start,
    /// A new cycle began; carries the 1-based repeat number
    Repeat(u32),
    End,
    Cancel,
}

/// Events produced by a single advance; almost always zero or one
pub type TweenEvents = SmallVec<[TweenEvent; 2]>;

/// A timed interpolation from one `f32` to another
#[derive(Clone, Debug)]
pub struct Tween {
    from: f32,
    to: f32,
    duration_ms: u32,
    easing: Easing,
    repeat: RepeatCount,
    elapsed_ms: f32,
    iteration: u32,
    state: TweenState,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration_ms: u32) -> Self {
        Self {
            from,
            to,
            duration_ms,
            easing: Easing::Linear,
            repeat: RepeatCount::NONE,
            elapsed_ms: 0.0,
            iteration: 0,
            state: TweenState::Idle,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_repeat(mut self, repeat: RepeatCount) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn from_value(&self) -> f32 {
        self.from
    }

    pub fn to_value(&self) -> f32 {
        self.to
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn repeat(&self) -> RepeatCount {
        self.repeat
    }

    pub fn state(&self) -> TweenState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TweenState::Running
    }

    /// Number of repeats started so far
    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    /// Linear time fraction of the current cycle (0.0 to 1.0)
    pub fn fraction(&self) -> f32 {
        if self.duration_ms == 0 || self.state == TweenState::Finished {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    /// Current eased value
    pub fn value(&self) -> f32 {
        self.from.lerp(&self.to, self.easing.apply(self.fraction()))
    }

    /// Start (or restart) from the first cycle
    pub fn start(&mut self) -> TweenEvents {
        self.elapsed_ms = 0.0;
        self.iteration = 0;
        self.state = TweenState::Running;

        let mut events = TweenEvents::new();
        events.push(TweenEvent::Start);
        if self.duration_ms == 0 {
            self.state = TweenState::Finished;
            events.push(TweenEvent::End);
        }
        events
    }

    /// Stop without reaching the end; only a running tween can be cancelled
    pub fn cancel(&mut self) -> TweenEvents {
        let mut events = TweenEvents::new();
        if self.state == TweenState::Running {
            self.state = TweenState::Cancelled;
            events.push(TweenEvent::Cancel);
        }
        events
    }

    /// Advance by `dt_ms` and report the boundaries crossed
    ///
    /// Landing exactly on a cycle boundary reports the end of that cycle
    /// (fraction 1.0); the next cycle begins once time moves past it. A step
    /// spanning several cycles reports a single `Repeat` carrying the latest
    /// repeat number. Negative and non-finite steps are ignored.
    pub fn advance(&mut self, dt_ms: f32) -> TweenEvents {
        let mut events = TweenEvents::new();
        if self.state != TweenState::Running || !dt_ms.is_finite() {
            return events;
        }

        self.elapsed_ms += dt_ms.max(0.0);
        let duration = self.duration_ms as f64;
        let elapsed = self.elapsed_ms as f64;
        if duration <= 0.0 || elapsed < duration {
            return events;
        }

        // Cycles started by this step; the remainder lands in (0, duration]
        let crossed = (elapsed / duration).ceil() - 1.0;
        let available = match self.repeat {
            RepeatCount::Finite(n) => f64::from(n.saturating_sub(self.iteration)),
            RepeatCount::Infinite => f64::from(u32::MAX - self.iteration),
        };

        if crossed > available && self.repeat != RepeatCount::Infinite {
            self.finish_after(available as u32, &mut events);
            return events;
        }

        let crossed = crossed.min(available) as u32;
        if crossed > 0 {
            self.iteration += crossed;
            events.push(TweenEvent::Repeat(self.iteration));
        }
        let remainder = elapsed - f64::from(crossed) * duration;
        self.elapsed_ms = remainder.clamp(0.0, duration) as f32;

        if self.elapsed_ms >= self.duration_ms as f32 && !self.repeat.allows(self.iteration) {
            self.finish_after(0, &mut events);
        }
        events
    }

    /// Run the last `repeats` cycles to completion and stop at the end value
    fn finish_after(&mut self, repeats: u32, events: &mut TweenEvents) {
        if repeats > 0 {
            self.iteration += repeats;
            events.push(TweenEvent::Repeat(self.iteration));
        }
        self.elapsed_ms = self.duration_ms as f32;
        self.state = TweenState::Finished;
        events.push(TweenEvent::End);
    }
}
