//! Memory sequence game.
//!
//! Every round shows the whole target sequence, then waits for the player to
//! repeat it one LED at a time. A correct run appends one random LED.

use embassy_time::Instant;
use rand::RngCore;

use super::lifecycle::{Lifecycle, Tick};
use super::session::{GameSession, Pick, Verdict};
use super::{Game, GameOutcome, Stage};
use crate::bank::{LedBank, LedIndex};
use crate::config::{GameSpeed, Timings, scale};
use crate::controller::PatternController;
use crate::input::InputSnapshot;
use crate::pattern::{Animation, Blink, Sequence};
use crate::OutputSink;

/// Length of the sequence shown in the first round.
pub const START_LENGTH: usize = 3;

/// Off time of the announcement blink relative to its on time.
const ANNOUNCE_OFF_RATIO: f32 = 0.33;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Preparing,
    Guessing,
}

pub struct MemorySequence<R: RngCore> {
    rng: R,
    bank: LedBank,
    speed: GameSpeed,
    lifecycle: Lifecycle,
    session: GameSession,
    pick: Pick,
    phase: Phase,
}

impl<R: RngCore> MemorySequence<R> {
    pub fn new(rng: R, bank: LedBank, speed: GameSpeed, timings: Timings) -> Self {
        let mut game = Self {
            rng,
            bank,
            speed,
            lifecycle: Lifecycle::new("memory", timings).with_settle_pause(),
            session: GameSession::new(),
            pick: Pick::default(),
            phase: Phase::Preparing,
        };
        for _ in 0..START_LENGTH {
            let led = game.draw();
            let _ = game.session.extend(led);
        }
        game
    }

    pub const fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn sequence(&self) -> &[LedIndex] {
        self.session.sequence()
    }

    /// Score reported when the session ends now.
    pub fn score(&self) -> u16 {
        u16::try_from(self.session.sequence().len().saturating_sub(1)).unwrap_or(u16::MAX)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn draw(&mut self) -> LedIndex {
        (self.rng.next_u32() % u32::from(self.bank.count())) as LedIndex
    }

    fn show_round<O: OutputSink>(&mut self, now: Instant, leds: &mut PatternController<O>) {
        let timings = *self.lifecycle.timings();
        let show = self.speed.scale(timings.show);
        let length = u16::try_from(self.session.sequence().len()).unwrap_or(u16::MAX);
        log::debug!("memory: showing {} leds", length);

        self.session.rewind();
        self.pick.reset();
        self.phase = Phase::Guessing;
        let sequence = Sequence::new(self.session.sequence(), show, show);
        self.lifecycle.play(
            now,
            leds,
            [
                Animation::pause(timings.pause),
                Animation::from(Blink::new(
                    self.bank.all(),
                    length,
                    show,
                    scale(show, ANNOUNCE_OFF_RATIO),
                )),
                Animation::pause(timings.pause),
                Animation::Sequence(sequence),
            ],
        );
    }

    fn guess<O: OutputSink>(
        &mut self,
        now: Instant,
        input: &InputSnapshot,
        leds: &mut PatternController<O>,
    ) {
        let held = input.leds(self.bank);
        if held != leds.state() {
            leds.set_phase(held);
        }
        let Some(pick) = self.pick.update(held) else {
            return;
        };

        match self.session.check(pick) {
            Verdict::Correct => {
                log::debug!("memory: {} of {} right", self.session.cursor(), self.sequence().len());
            }
            Verdict::Complete => {
                self.session.advance_round();
                let led = self.draw();
                if self.session.extend(led).is_err() {
                    log::info!("memory: sequence is full");
                    let score = self.score();
                    self.lifecycle.complete(now, leds, score);
                    return;
                }
                log::info!(
                    "memory: round {} cleared, length {}",
                    self.session.round(),
                    self.sequence().len()
                );
                self.show_round(now, leds);
            }
            Verdict::Wrong => {
                log::info!("memory: wrong pick {:#06b}", pick.bits());
                let score = self.score();
                let seed = self.rng.next_u64();
                self.lifecycle.fail(now, leds, score, None, seed);
            }
        }
    }
}

impl<R: RngCore> Game for MemorySequence<R> {
    fn tick<O: OutputSink>(
        &mut self,
        now: Instant,
        input: &InputSnapshot,
        leds: &mut PatternController<O>,
    ) -> GameOutcome {
        let score = self.score();
        if let Tick::Hold(outcome) = self.lifecycle.advance(now, input, leds, score) {
            return outcome;
        }
        match self.phase {
            Phase::Preparing => self.show_round(now, leds),
            Phase::Guessing => self.guess(now, input, leds),
        }
        GameOutcome::Running
    }

    fn abort<O: OutputSink>(&mut self, now: Instant, leds: &mut PatternController<O>) {
        let score = self.score();
        self.lifecycle.abort(now, leds, score);
    }

    fn stage(&self) -> Stage {
        let waiting = match self.phase {
            Phase::Preparing => Stage::Showing,
            Phase::Guessing => Stage::AwaitingInput,
        };
        self.lifecycle.stage(waiting)
    }
}
