//! Blinking patterns.

use embassy_time::{Duration, Instant};

use super::{Pattern, Step, times};
use crate::bank::{LedBank, PatternCode};
use crate::phase::PhaseUpdate;

/// Repeats {light `code` for `on`, all off for `off`} `rounds` times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blink {
    code: PatternCode,
    rounds: u16,
    on: Duration,
    off: Duration,
}

impl Blink {
    pub const fn new(code: PatternCode, rounds: u16, on: Duration, off: Duration) -> Self {
        Self {
            code,
            rounds,
            on,
            off,
        }
    }

    /// Blink with equal on and off times.
    pub const fn even(code: PatternCode, rounds: u16, delay: Duration) -> Self {
        Self::new(code, rounds, delay, delay)
    }

    /// Instant at which the blink is over when started at `start`.
    pub fn completes_at(&self, start: Instant) -> Instant {
        start + times(self.on + self.off, u64::from(self.rounds))
    }
}

impl Pattern for Blink {
    fn step(&mut self, cursor: u32, _bank: LedBank) -> Option<Step> {
        if cursor >= u32::from(self.rounds) * 2 {
            return None;
        }
        if cursor % 2 == 0 {
            Some(Step::new(PhaseUpdate::set(self.code), self.on))
        } else {
            Some(Step::new(PhaseUpdate::off(), self.off))
        }
    }

    fn duration(&self, _bank: LedBank) -> Option<Duration> {
        Some(times(self.on + self.off, u64::from(self.rounds)))
    }
}

/// Lights `base`, then flashes `flash` on top of it `rounds` times.
///
/// LEDs outside of `flash` keep the base phase while flashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseBlink {
    base: PatternCode,
    flash: PatternCode,
    rounds: u16,
    on: Duration,
    off: Duration,
}

impl PhaseBlink {
    pub const fn new(
        base: PatternCode,
        flash: PatternCode,
        rounds: u16,
        on: Duration,
        off: Duration,
    ) -> Self {
        Self {
            base,
            flash,
            rounds,
            on,
            off,
        }
    }
}

impl Pattern for PhaseBlink {
    fn step(&mut self, cursor: u32, _bank: LedBank) -> Option<Step> {
        if cursor == 0 {
            return Some(Step::new(PhaseUpdate::set(self.base), Duration::from_ticks(0)));
        }
        let flash_step = cursor - 1;
        if flash_step >= u32::from(self.rounds) * 2 {
            return None;
        }
        let overlay = PhaseUpdate::overlay(self.flash);
        if flash_step % 2 == 0 {
            Some(Step::new(overlay, self.on))
        } else {
            Some(Step::new(overlay.revert(), self.off))
        }
    }

    fn duration(&self, _bank: LedBank) -> Option<Duration> {
        Some(times(self.on + self.off, u64::from(self.rounds)))
    }
}
