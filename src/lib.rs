#![no_std]

pub mod bank;
pub mod command;
pub mod conductor;
pub mod config;
pub mod controller;
pub mod error;
pub mod game;
pub mod input;
pub mod pattern;
pub mod phase;
pub mod player;
pub mod scheduler;

pub use bank::{LedBank, LedIndex, MAX_LEDS, PatternCode};
pub use command::{Command, CommandQueue, CommandReceiver, CommandSender};
pub use conductor::{Conductor, Surface};
pub use config::{ArcadeConfig, GameSpeed, Timings};
pub use controller::PatternController;
pub use error::Error;
pub use game::{Game, GameId, GameOutcome, GameSlot, Stage};
pub use input::{Button, ButtonSet, InputSnapshot, Polar, polar};
pub use pattern::{Animation, Pattern, Step};
pub use phase::{PhaseTargets, PhaseUpdate};
pub use player::AnimationPlayer;
pub use scheduler::TickScheduler;

pub use embassy_time::{Duration, Instant};

/// Abstract set of binary LED outputs.
///
/// Implement this trait to support different hardware platforms.
/// The pattern controller is generic over this trait and is its only writer.
pub trait OutputSink {
    /// Switch a single output, `index` is always inside the bank.
    fn set_pin(&mut self, index: LedIndex, on: bool);

    /// Release every output.
    fn cleanup_all(&mut self) {}

    /// Commit a whole phase.
    ///
    /// Outputs set to `None` keep their state. Sinks that can latch several
    /// outputs at once should override this.
    fn write_frame(&mut self, targets: &PhaseTargets) {
        for (index, target) in (0..).zip(targets.iter()) {
            if let Some(on) = *target {
                self.set_pin(index, on);
            }
        }
    }
}

/// Abstract gamepad poller.
pub trait InputSource {
    /// State of the gamepad right now.
    fn poll_snapshot(&mut self) -> InputSnapshot;

    /// Whether the device went away, the arcade falls back to text commands.
    fn is_disconnected(&self) -> bool {
        false
    }

    /// Release the device.
    fn close(&mut self) {}
}
