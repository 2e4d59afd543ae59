use embassy_time::Duration;

use super::{Pattern, Step, times};
use crate::bank::{LedBank, PatternCode};
use crate::phase::PhaseUpdate;

/// Lights one LED at a time, walking across the whole bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sweep {
    delay: Duration,
    rounds: u16,
    reversed: bool,
}

impl Sweep {
    pub const fn new(delay: Duration, rounds: u16) -> Self {
        Self {
            delay,
            rounds,
            reversed: false,
        }
    }

    /// Walk from right to left.
    pub const fn reversed(mut self) -> Self {
        self.reversed = true;
        self
    }

    const fn total(&self, bank: LedBank) -> u32 {
        self.rounds as u32 * bank.count() as u32
    }
}

impl Pattern for Sweep {
    fn step(&mut self, cursor: u32, bank: LedBank) -> Option<Step> {
        let total = self.total(bank);
        if cursor > total {
            return None;
        }
        if cursor == total {
            return Some(Step::off());
        }

        let count = u32::from(bank.count());
        #[allow(clippy::cast_possible_truncation)]
        let position = (cursor % count) as u8;
        let index = if self.reversed {
            bank.count() - 1 - position
        } else {
            position
        };
        Some(Step::new(
            PhaseUpdate::set(PatternCode::single(index)),
            self.delay,
        ))
    }

    fn duration(&self, bank: LedBank) -> Option<Duration> {
        Some(times(self.delay, u64::from(self.total(bank))))
    }
}
