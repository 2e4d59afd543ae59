use embassy_time::Duration;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::{Pattern, Step};
use crate::bank::{LedBank, PatternCode};
use crate::phase::PhaseUpdate;

/// Upper bound (exclusive) of a single flicker step.
pub const DEFAULT_MAX_HOLD: Duration = Duration::from_millis(200);

/// Lights a random non-empty subset of the bank for a random time, `rounds` times.
///
/// The empty subset is never drawn, every round lights at least one LED.
#[derive(Debug, Clone)]
pub struct Flicker {
    rounds: u16,
    max_hold: Duration,
    rng: SmallRng,
}

impl Flicker {
    pub fn new(rounds: u16, seed: u64) -> Self {
        Self {
            rounds,
            max_hold: DEFAULT_MAX_HOLD,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub const fn with_max_hold(mut self, max_hold: Duration) -> Self {
        self.max_hold = max_hold;
        self
    }
}

impl Pattern for Flicker {
    fn step(&mut self, cursor: u32, bank: LedBank) -> Option<Step> {
        let rounds = u32::from(self.rounds);
        if cursor > rounds {
            return None;
        }
        if cursor == rounds {
            return Some(Step::off());
        }

        let bits = self.rng.gen_range(1..=bank.all().bits());
        let max_ticks = self.max_hold.as_ticks();
        let hold = if max_ticks == 0 {
            Duration::from_ticks(0)
        } else {
            Duration::from_ticks(self.rng.gen_range(0..max_ticks))
        };
        Some(Step::new(PhaseUpdate::set(PatternCode::from_bits(bits)), hold))
    }
}
