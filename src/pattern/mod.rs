//! Animation system with compile-time known pattern variants.
//!
//! All animations are stored in an enum to avoid heap allocations.
//! Each pattern implements the `Pattern` trait and yields [`Step`]s by cursor,
//! so the same animation can be played by the tick driven
//! [`AnimationPlayer`](crate::player::AnimationPlayer) or blocking through
//! [`PatternController::play`](crate::controller::PatternController::play).

mod blink;
mod flicker;
mod hold;
mod progress;
mod replay;
mod sweep;

use embassy_time::Duration;

pub use blink::{Blink, PhaseBlink};
pub use flicker::{DEFAULT_MAX_HOLD, Flicker};
pub use hold::Hold;
pub use progress::ProgressBar;
pub use replay::{MAX_SEGMENTS, MAX_SEQUENCE_LEN, Replay, Segment, Sequence};
pub use sweep::Sweep;

use crate::bank::LedBank;
use crate::config::Timings;
use crate::phase::PhaseUpdate;

/// Number of animations in [`showcase`].
pub const SHOWCASE_LEN: usize = 13;

const SHOWCASE_ROUNDS: u16 = 2;
const SHOWCASE_FLICKER_ROUNDS: u16 = 20;

/// One update of an animation and the time it stays visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub update: PhaseUpdate,
    pub hold: Duration,
}

impl Step {
    pub const fn new(update: PhaseUpdate, hold: Duration) -> Self {
        Self { update, hold }
    }

    /// Switch every LED off without delay.
    pub const fn off() -> Self {
        Self::new(PhaseUpdate::off(), Duration::from_ticks(0))
    }
}

pub trait Pattern {
    /// Step at `cursor`, `None` once the pattern is complete.
    fn step(&mut self, cursor: u32, bank: LedBank) -> Option<Step>;

    /// Total play time, if it is known up front.
    fn duration(&self, _bank: LedBank) -> Option<Duration> {
        None
    }
}

/// Animation slot - enum containing all possible patterns.
#[derive(Debug, Clone)]
pub enum Animation {
    /// Single update held for a while.
    Hold(Hold),
    /// Repeated on/off of a code.
    Blink(Blink),
    /// Base phase with a flashing overlay.
    PhaseBlink(PhaseBlink),
    /// One LED walking across the bank.
    Sweep(Sweep),
    /// Cumulative fill or drain.
    ProgressBar(ProgressBar),
    /// Random subsets for random durations.
    Flicker(Flicker),
    /// Blink LEDs one after another.
    Sequence(Sequence),
    /// Recorded segments played back verbatim.
    Replay(Replay),
}

impl Animation {
    /// Apply `update` and keep it for `hold`.
    pub const fn hold(update: PhaseUpdate, hold: Duration) -> Self {
        Self::Hold(Hold::new(update, hold))
    }

    /// Apply `update`, keep it for `hold` and revert it afterwards.
    pub const fn flash(update: PhaseUpdate, hold: Duration) -> Self {
        Self::Hold(Hold::new(update, hold).with_revert())
    }

    /// Keep the LEDs as they are for `duration`.
    pub const fn pause(duration: Duration) -> Self {
        Self::hold(PhaseUpdate::noop(), duration)
    }

    /// Switch every LED off.
    pub const fn off() -> Self {
        Self::hold(PhaseUpdate::off(), Duration::from_ticks(0))
    }

    /// Step at `cursor`, `None` once the animation is complete.
    pub fn step(&mut self, cursor: u32, bank: LedBank) -> Option<Step> {
        match self {
            Self::Hold(pattern) => pattern.step(cursor, bank),
            Self::Blink(pattern) => pattern.step(cursor, bank),
            Self::PhaseBlink(pattern) => pattern.step(cursor, bank),
            Self::Sweep(pattern) => pattern.step(cursor, bank),
            Self::ProgressBar(pattern) => pattern.step(cursor, bank),
            Self::Flicker(pattern) => pattern.step(cursor, bank),
            Self::Sequence(pattern) => pattern.step(cursor, bank),
            Self::Replay(pattern) => pattern.step(cursor, bank),
        }
    }

    /// Total play time, if it is known up front.
    pub fn duration(&self, bank: LedBank) -> Option<Duration> {
        match self {
            Self::Hold(pattern) => pattern.duration(bank),
            Self::Blink(pattern) => pattern.duration(bank),
            Self::PhaseBlink(pattern) => pattern.duration(bank),
            Self::Sweep(pattern) => pattern.duration(bank),
            Self::ProgressBar(pattern) => pattern.duration(bank),
            Self::Flicker(pattern) => pattern.duration(bank),
            Self::Sequence(pattern) => pattern.duration(bank),
            Self::Replay(pattern) => pattern.duration(bank),
        }
    }
}

impl From<Sequence> for Animation {
    fn from(pattern: Sequence) -> Self {
        Self::Sequence(pattern)
    }
}

impl From<Replay> for Animation {
    fn from(pattern: Replay) -> Self {
        Self::Replay(pattern)
    }
}

impl From<Blink> for Animation {
    fn from(pattern: Blink) -> Self {
        Self::Blink(pattern)
    }
}

impl From<PhaseBlink> for Animation {
    fn from(pattern: PhaseBlink) -> Self {
        Self::PhaseBlink(pattern)
    }
}

impl From<Sweep> for Animation {
    fn from(pattern: Sweep) -> Self {
        Self::Sweep(pattern)
    }
}

impl From<ProgressBar> for Animation {
    fn from(pattern: ProgressBar) -> Self {
        Self::ProgressBar(pattern)
    }
}

impl From<Flicker> for Animation {
    fn from(pattern: Flicker) -> Self {
        Self::Flicker(pattern)
    }
}

/// Multiply a duration by a whole number.
pub(crate) fn times(duration: Duration, factor: u64) -> Duration {
    Duration::from_ticks(duration.as_ticks().saturating_mul(factor))
}

/// Demo reel of every built-in animation, separated by pauses.
pub fn showcase(timings: &Timings, seed: u64) -> [Animation; SHOWCASE_LEN] {
    let step = timings.greeting_step;
    let pause = Animation::pause(timings.pause);
    let progress = ProgressBar::new(step, SHOWCASE_ROUNDS);
    [
        Animation::from(Sweep::new(step, SHOWCASE_ROUNDS)),
        pause.clone(),
        Animation::from(Sweep::new(step, SHOWCASE_ROUNDS).reversed()),
        pause.clone(),
        Animation::from(progress),
        pause.clone(),
        Animation::from(progress.reversed()),
        pause.clone(),
        Animation::from(progress.inverted()),
        pause.clone(),
        Animation::from(progress.reversed().inverted()),
        pause,
        Animation::from(
            Flicker::new(SHOWCASE_FLICKER_ROUNDS, seed).with_max_hold(timings.flicker_step),
        ),
    ]
}
