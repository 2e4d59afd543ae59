//! Session skeleton shared by every game.
//!
//! Idle -> Showing -> AwaitingInput -> (RoundAdvance | Failure), with the
//! exit input checked on every tick. Terminal paths play their closing
//! animation and always end with all LEDs off.

use embassy_time::Instant;

use super::{GameOutcome, Stage};
use crate::config::Timings;
use crate::controller::PatternController;
use crate::input::{Button, ButtonSet, InputSnapshot};
use crate::pattern::{Animation, Flicker, ProgressBar};
use crate::player::AnimationPlayer;
use crate::OutputSink;

/// Result of the shared part of a tick.
pub(crate) enum Tick {
    /// The game must not run its own logic, report this outcome.
    Hold(GameOutcome),
    /// Nothing is playing, buttons pressed since the previous tick are attached.
    Ready(ButtonSet),
}

pub(crate) struct Lifecycle {
    name: &'static str,
    timings: Timings,
    player: AnimationPlayer,
    previous: InputSnapshot,
    started: bool,
    settle: bool,
    exit_enabled: bool,
    ending: Option<GameOutcome>,
    over: Option<GameOutcome>,
}

impl Lifecycle {
    pub(crate) const fn new(name: &'static str, timings: Timings) -> Self {
        Self {
            name,
            timings,
            player: AnimationPlayer::new(),
            previous: InputSnapshot::idle(),
            started: false,
            settle: false,
            exit_enabled: true,
            ending: None,
            over: None,
        }
    }

    /// Pause after the opening progress bar.
    pub(crate) const fn with_settle_pause(mut self) -> Self {
        self.settle = true;
        self
    }

    pub(crate) const fn timings(&self) -> &Timings {
        &self.timings
    }

    /// Whether an animation of the game is playing.
    pub(crate) fn is_playing(&self) -> bool {
        self.player.is_busy()
    }

    /// Whether the exit button ends the session.
    pub(crate) fn set_exit_enabled(&mut self, enabled: bool) {
        self.exit_enabled = enabled;
    }

    /// Run the shared states.
    pub(crate) fn advance<O: OutputSink>(
        &mut self,
        now: Instant,
        input: &InputSnapshot,
        leds: &mut PatternController<O>,
        score: u16,
    ) -> Tick {
        let pressed = input.pressed_since(&self.previous);
        self.previous = *input;

        if let Some(outcome) = self.over {
            return Tick::Hold(outcome);
        }

        if !self.started {
            self.started = true;
            log::info!("{}: session started", self.name);
            leds.all_off();
            self.player
                .extend([Animation::from(ProgressBar::new(self.timings.step, 1))]);
            if self.settle {
                self.player.extend([Animation::pause(self.timings.pause)]);
            }
        }

        if let Some(outcome) = self.ending {
            if self.player.tick(now, leds) {
                return Tick::Hold(GameOutcome::Running);
            }
            leds.all_off();
            log::info!("{}: session over, score {}", self.name, score);
            self.over = Some(outcome);
            return Tick::Hold(outcome);
        }

        if self.exit_enabled && pressed.contains(Button::Back) {
            self.abort(now, leds, score);
            return Tick::Hold(GameOutcome::Running);
        }

        if self.player.tick(now, leds) {
            return Tick::Hold(GameOutcome::Running);
        }

        Tick::Ready(pressed)
    }

    /// Queue an animation and start it right away.
    pub(crate) fn play<O: OutputSink>(
        &mut self,
        now: Instant,
        leds: &mut PatternController<O>,
        animations: impl IntoIterator<Item = Animation>,
    ) {
        self.player.extend(animations);
        self.player.tick(now, leds);
    }

    /// Leave the session, unless it is already ending.
    pub(crate) fn abort<O: OutputSink>(
        &mut self,
        now: Instant,
        leds: &mut PatternController<O>,
        score: u16,
    ) {
        if self.ending.is_some() || self.over.is_some() {
            return;
        }
        log::info!("{}: exit requested", self.name);
        self.started = true;
        self.end(
            now,
            leds,
            GameOutcome::Aborted { score },
            [Animation::from(ProgressBar::new(self.timings.step, 1).inverted())],
        );
    }

    /// End the session with a failure, optionally showing `prelude` before the flicker.
    pub(crate) fn fail<O: OutputSink>(
        &mut self,
        now: Instant,
        leds: &mut PatternController<O>,
        score: u16,
        prelude: Option<Animation>,
        seed: u64,
    ) {
        let flicker = Flicker::new(self.timings.flicker_rounds, seed)
            .with_max_hold(self.timings.flicker_step);
        self.end(
            now,
            leds,
            GameOutcome::Failed { score },
            prelude.into_iter().chain([Animation::from(flicker)]),
        );
    }

    /// End the session because there is nothing left to play.
    pub(crate) fn complete<O: OutputSink>(
        &mut self,
        now: Instant,
        leds: &mut PatternController<O>,
        score: u16,
    ) {
        self.end(
            now,
            leds,
            GameOutcome::Completed { score },
            [Animation::from(ProgressBar::new(self.timings.step, 2))],
        );
    }

    fn end<O: OutputSink>(
        &mut self,
        now: Instant,
        leds: &mut PatternController<O>,
        outcome: GameOutcome,
        animations: impl IntoIterator<Item = Animation>,
    ) {
        self.player.clear();
        self.ending = Some(outcome);
        self.play(now, leds, animations);
    }

    /// Stage as seen from outside, `waiting` is reported when nothing plays.
    pub(crate) fn stage(&self, waiting: Stage) -> Stage {
        if let Some(outcome) = self.over {
            return Stage::Over(outcome);
        }
        if !self.started {
            return Stage::Idle;
        }
        if self.ending.is_some() {
            return Stage::Ending;
        }
        if self.player.is_busy() {
            return Stage::Showing;
        }
        waiting
    }
}
