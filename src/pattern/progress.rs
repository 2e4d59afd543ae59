use embassy_time::Duration;

use super::{Pattern, Step, times};
use crate::bank::LedBank;
use crate::phase::PhaseUpdate;

/// Progress bar: step `k` lights the first `k + 1` LEDs.
///
/// `reversed` fills from the right, `inverted` counts down instead of up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressBar {
    delay: Duration,
    rounds: u16,
    reversed: bool,
    inverted: bool,
}

impl ProgressBar {
    pub const fn new(delay: Duration, rounds: u16) -> Self {
        Self {
            delay,
            rounds,
            reversed: false,
            inverted: false,
        }
    }

    /// Fill from the rightmost LED.
    pub const fn reversed(mut self) -> Self {
        self.reversed = true;
        self
    }

    /// Start full and drain.
    pub const fn inverted(mut self) -> Self {
        self.inverted = true;
        self
    }

    const fn total(&self, bank: LedBank) -> u32 {
        self.rounds as u32 * bank.count() as u32
    }
}

impl Pattern for ProgressBar {
    fn step(&mut self, cursor: u32, bank: LedBank) -> Option<Step> {
        let total = self.total(bank);
        if cursor > total {
            return None;
        }
        if cursor == total {
            return Some(Step::off());
        }

        let count = bank.count();
        #[allow(clippy::cast_possible_truncation)]
        let position = (cursor % u32::from(count)) as u8;
        let amount = if self.inverted {
            count - position
        } else {
            position + 1
        };
        let code = if self.reversed {
            bank.trailing(amount)
        } else {
            bank.leading(amount)
        };
        Some(Step::new(PhaseUpdate::set(code), self.delay))
    }

    fn duration(&self, bank: LedBank) -> Option<Duration> {
        Some(times(self.delay, u64::from(self.total(bank))))
    }
}
