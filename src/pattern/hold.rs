use embassy_time::Duration;

use super::{Pattern, Step};
use crate::bank::LedBank;
use crate::phase::PhaseUpdate;

/// Single update held for a while, optionally reverted afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hold {
    update: PhaseUpdate,
    hold: Duration,
    revert: bool,
}

impl Hold {
    pub const fn new(update: PhaseUpdate, hold: Duration) -> Self {
        Self {
            update,
            hold,
            revert: false,
        }
    }

    /// Undo the update once the hold time is over.
    pub const fn with_revert(mut self) -> Self {
        self.revert = true;
        self
    }
}

impl Pattern for Hold {
    fn step(&mut self, cursor: u32, _bank: LedBank) -> Option<Step> {
        match cursor {
            0 => Some(Step::new(self.update, self.hold)),
            1 if self.revert => Some(Step::new(self.update.revert(), Duration::from_ticks(0))),
            _ => None,
        }
    }

    fn duration(&self, _bank: LedBank) -> Option<Duration> {
        Some(self.hold)
    }
}
