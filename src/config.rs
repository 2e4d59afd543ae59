//! Arcade configuration.

use embassy_time::Duration;

use crate::bank::LedBank;
use crate::error::Error;

/// Reciprocals of the memory game speed factors, slowest first.
pub const GAME_SPEED_RECIPROCALS: [f32; 4] = [0.75, 1.0, 1.35, 1.8];

/// Reaction window per round, shrinking as the rounds go on.
///
/// Rounds past the end of the table use the last entry.
pub const TIME_BUDGET_TABLE: [Duration; 16] = [
    Duration::from_millis(1250),
    Duration::from_millis(1100),
    Duration::from_millis(900),
    Duration::from_millis(800),
    Duration::from_millis(750),
    Duration::from_millis(700),
    Duration::from_millis(600),
    Duration::from_millis(500),
    Duration::from_millis(450),
    Duration::from_millis(400),
    Duration::from_millis(300),
    Duration::from_millis(200),
    Duration::from_millis(0),
    Duration::from_millis(0),
    Duration::from_millis(0),
    Duration::from_millis(0),
];

/// Reaction window for `round`, clamped to the last table entry.
pub fn time_budget(round: u16) -> Duration {
    let index = usize::from(round).min(TIME_BUDGET_TABLE.len() - 1);
    TIME_BUDGET_TABLE[index]
}

/// Delays used by animations and games.
#[derive(Debug, Clone, Copy)]
pub struct Timings {
    /// Blink time of a shown memory element, before speed scaling.
    pub show: Duration,
    /// Pause between the stages of a round.
    pub pause: Duration,
    /// Step time of standard animations.
    pub step: Duration,
    /// Poll period of the main loop.
    pub input_tick: Duration,
    /// Extra reaction time on top of the time budget.
    pub reaction_grace: Duration,
    /// Base delay between two trigger scroll steps, the trigger depression is subtracted from it.
    pub trigger_base: Duration,
    /// Upper bound of a flicker step.
    pub flicker_step: Duration,
    /// Rounds of flicker played on failure.
    pub flicker_rounds: u16,
    /// Step time of the startup and shutdown sweeps.
    pub greeting_step: Duration,
}

pub const DEFAULT_TIMINGS: Timings = Timings {
    show: Duration::from_millis(500),
    pause: Duration::from_millis(500),
    step: Duration::from_millis(300),
    input_tick: Duration::from_millis(10),
    reaction_grace: Duration::from_millis(250),
    trigger_base: Duration::from_millis(1050),
    flicker_step: Duration::from_millis(200),
    flicker_rounds: 20,
    greeting_step: Duration::from_millis(100),
};

impl Default for Timings {
    fn default() -> Self {
        DEFAULT_TIMINGS
    }
}

/// Speed of the memory game, an index into [`GAME_SPEED_RECIPROCALS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSpeed(u8);

impl Default for GameSpeed {
    fn default() -> Self {
        Self(1)
    }
}

impl GameSpeed {
    pub const fn new(index: u8) -> Self {
        Self(index % GAME_SPEED_RECIPROCALS.len() as u8)
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    /// Next faster speed, wrapping to the slowest.
    pub const fn faster(self) -> Self {
        Self::new(self.0 + 1)
    }

    /// Next slower speed, wrapping to the fastest.
    pub const fn slower(self) -> Self {
        Self::new(self.0 + GAME_SPEED_RECIPROCALS.len() as u8 - 1)
    }

    /// Multiplier applied to show delays.
    pub fn factor(self) -> f32 {
        1.0 / GAME_SPEED_RECIPROCALS[usize::from(self.0)]
    }

    /// Scale a delay by the speed factor.
    pub fn scale(self, duration: Duration) -> Duration {
        scale(duration, self.factor())
    }
}

/// Multiply a duration by a non-negative factor.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn scale(duration: Duration, factor: f32) -> Duration {
    let micros = duration.as_micros() as f32 * factor.max(0.0);
    Duration::from_micros(micros as u64)
}

/// Configuration of the whole arcade.
#[derive(Debug, Clone, Copy)]
pub struct ArcadeConfig {
    pub bank: LedBank,
    pub speed: GameSpeed,
    pub timings: Timings,
    /// Seed of the random generator driving the games.
    pub seed: u64,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            bank: LedBank::default(),
            speed: GameSpeed::default(),
            timings: DEFAULT_TIMINGS,
            seed: 0x5eed,
        }
    }
}

impl ArcadeConfig {
    /// Configuration for a bank of `led_count` LEDs.
    pub fn with_led_count(led_count: u8) -> Result<Self, Error> {
        Ok(Self {
            bank: LedBank::new(led_count)?,
            ..Self::default()
        })
    }
}
