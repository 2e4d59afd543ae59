//! Game system with compile-time known game variants.
//!
//! All games are stored in an enum to avoid heap allocations.
//! Each game implements the `Game` trait and is advanced one tick at a time.

mod calculator;
mod lifecycle;
mod memory;
mod reaction;
mod recorder;
mod session;

use embassy_time::Instant;
use rand::RngCore;

pub use calculator::{ArithmeticCalculator, Operator, calculate};
pub use memory::{MemorySequence, START_LENGTH};
pub use reaction::{ReactionRace, TURNS_PER_ROUND};
pub use recorder::PatternRecorder;
pub use session::{GameSession, Pick, Verdict};

use crate::config::ArcadeConfig;
use crate::controller::PatternController;
use crate::input::InputSnapshot;
use crate::OutputSink;

const GAME_NAME_MEMORY: &str = "memory";
const GAME_NAME_CALCULATOR: &str = "calculator";
const GAME_NAME_REACTION: &str = "reaction";
const GAME_NAME_RECORDER: &str = "recorder";

const GAME_ID_MEMORY: u8 = 0;
const GAME_ID_CALCULATOR: u8 = 1;
const GAME_ID_REACTION: u8 = 2;
const GAME_ID_RECORDER: u8 = 3;

/// What a tick of a game resulted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// The session goes on.
    Running,
    /// The player made a mistake or missed a deadline.
    Failed { score: u16 },
    /// The player left the session.
    Aborted { score: u16 },
    /// The game has nothing left to play.
    Completed { score: u16 },
}

impl GameOutcome {
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::Running)
    }

    pub const fn score(self) -> Option<u16> {
        match self {
            Self::Running => None,
            Self::Failed { score } | Self::Aborted { score } | Self::Completed { score } => {
                Some(score)
            }
        }
    }
}

/// Externally observable state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Not ticked yet.
    Idle,
    /// Playing a non-interactive animation.
    Showing,
    /// Waiting for the player.
    AwaitingInput,
    /// Playing the closing animation of a failure, exit or completion.
    Ending,
    /// Terminal, the outcome has been reported.
    Over(GameOutcome),
}

pub trait Game {
    /// Advance the game by one tick.
    fn tick<O: OutputSink>(
        &mut self,
        now: Instant,
        input: &InputSnapshot,
        leds: &mut PatternController<O>,
    ) -> GameOutcome;

    /// End the session as if the exit input was pressed.
    fn abort<O: OutputSink>(&mut self, now: Instant, leds: &mut PatternController<O>);

    /// Current stage of the session.
    fn stage(&self) -> Stage;
}

/// Game slot - enum containing all possible games.
pub enum GameSlot<R: RngCore> {
    Memory(MemorySequence<R>),
    Calculator(ArithmeticCalculator),
    Reaction(ReactionRace<R>),
    Recorder(PatternRecorder),
}

/// Known game ids, matching the LED used to select them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum GameId {
    Memory = GAME_ID_MEMORY,
    Calculator = GAME_ID_CALCULATOR,
    Reaction = GAME_ID_REACTION,
    Recorder = GAME_ID_RECORDER,
}

impl GameId {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            GAME_ID_MEMORY => Self::Memory,
            GAME_ID_CALCULATOR => Self::Calculator,
            GAME_ID_REACTION => Self::Reaction,
            GAME_ID_RECORDER => Self::Recorder,
            _ => return None,
        })
    }

    /// Start a fresh session of this game.
    pub fn to_slot<R: RngCore>(self, mut rng: R, config: &ArcadeConfig) -> GameSlot<R> {
        match self {
            Self::Memory => GameSlot::Memory(MemorySequence::new(
                rng,
                config.bank,
                config.speed,
                config.timings,
            )),
            Self::Calculator => {
                GameSlot::Calculator(ArithmeticCalculator::new(config.bank, config.timings))
            }
            Self::Reaction => {
                GameSlot::Reaction(ReactionRace::new(rng, config.bank, config.timings))
            }
            Self::Recorder => GameSlot::Recorder(PatternRecorder::new(
                config.bank,
                config.timings,
                rng.next_u64(),
            )),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Memory => GAME_NAME_MEMORY,
            Self::Calculator => GAME_NAME_CALCULATOR,
            Self::Reaction => GAME_NAME_REACTION,
            Self::Recorder => GAME_NAME_RECORDER,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            GAME_NAME_MEMORY => Some(Self::Memory),
            GAME_NAME_CALCULATOR => Some(Self::Calculator),
            GAME_NAME_REACTION => Some(Self::Reaction),
            GAME_NAME_RECORDER => Some(Self::Recorder),
            _ => None,
        }
    }
}

impl<R: RngCore> GameSlot<R> {
    /// Advance the current game.
    pub fn tick<O: OutputSink>(
        &mut self,
        now: Instant,
        input: &InputSnapshot,
        leds: &mut PatternController<O>,
    ) -> GameOutcome {
        match self {
            Self::Memory(game) => game.tick(now, input, leds),
            Self::Calculator(game) => game.tick(now, input, leds),
            Self::Reaction(game) => game.tick(now, input, leds),
            Self::Recorder(game) => game.tick(now, input, leds),
        }
    }

    pub fn abort<O: OutputSink>(&mut self, now: Instant, leds: &mut PatternController<O>) {
        match self {
            Self::Memory(game) => game.abort(now, leds),
            Self::Calculator(game) => game.abort(now, leds),
            Self::Reaction(game) => game.abort(now, leds),
            Self::Recorder(game) => game.abort(now, leds),
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            Self::Memory(game) => game.stage(),
            Self::Calculator(game) => game.stage(),
            Self::Reaction(game) => game.stage(),
            Self::Recorder(game) => game.stage(),
        }
    }

    /// Get the game ID for external observation.
    pub fn id(&self) -> GameId {
        match self {
            Self::Memory(_) => GameId::Memory,
            Self::Calculator(_) => GameId::Calculator,
            Self::Reaction(_) => GameId::Reaction,
            Self::Recorder(_) => GameId::Recorder,
        }
    }
}
