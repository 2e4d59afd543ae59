//! Reaction race.
//!
//! A round is [`TURNS_PER_ROUND`] turns. Each turn lights a random secret LED
//! after a random pause, the matching button has to be pressed and released
//! before the deadline. The reaction window shrinks with every round.

use embassy_time::{Duration, Instant};
use rand::RngCore;

use super::lifecycle::{Lifecycle, Tick};
use super::session::{GameSession, Pick, Verdict};
use super::{Game, GameOutcome, Stage};
use crate::bank::{LedBank, LedIndex, PatternCode};
use crate::config::{Timings, time_budget};
use crate::controller::PatternController;
use crate::input::InputSnapshot;
use crate::pattern::{Animation, Blink, PhaseBlink};
use crate::OutputSink;

pub const TURNS_PER_ROUND: u8 = 4;

const MIN_PAUSE: Duration = Duration::from_millis(300);
const PAUSE_SPREAD_MICROS: u32 = 5_000_000;
const TURN_BLINKS: u16 = 3;
const WRONG_PICK_BLINKS: u16 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Round flourish pending.
    RoundStart,
    /// Turn indicator and pause are playing, the secret comes next.
    Armed,
    /// Secret is lit.
    Awaiting,
}

pub struct ReactionRace<R: RngCore> {
    rng: R,
    bank: LedBank,
    lifecycle: Lifecycle,
    session: GameSession,
    pick: Pick,
    phase: Phase,
    turn: u8,
    secret: Option<LedIndex>,
    lit_at: Option<Instant>,
}

impl<R: RngCore> ReactionRace<R> {
    pub fn new(rng: R, bank: LedBank, timings: Timings) -> Self {
        Self {
            rng,
            bank,
            lifecycle: Lifecycle::new("reaction", timings).with_settle_pause(),
            session: GameSession::new(),
            pick: Pick::default(),
            phase: Phase::RoundStart,
            turn: 0,
            secret: None,
            lit_at: None,
        }
    }

    /// Completed rounds.
    pub const fn round(&self) -> u16 {
        self.session.round()
    }

    /// Turn within the current round.
    pub const fn turn(&self) -> u8 {
        self.turn
    }

    /// LED the current turn expects.
    pub const fn secret(&self) -> Option<LedIndex> {
        self.secret
    }

    /// When the secret was lit.
    pub const fn lit_at(&self) -> Option<Instant> {
        self.lit_at
    }

    /// Last instant at which a pick is accepted.
    pub const fn deadline(&self) -> Option<Instant> {
        self.session.deadline()
    }

    /// Reaction window of the current round, grace included.
    pub fn window(&self) -> Duration {
        time_budget(self.session.round()) + self.lifecycle.timings().reaction_grace
    }

    fn start_round<O: OutputSink>(&mut self, now: Instant, leds: &mut PatternController<O>) {
        let timings = *self.lifecycle.timings();
        let flourish = Blink::even(self.bank.all(), self.session.round(), timings.step);
        log::debug!("reaction: round {} starts", self.session.round());
        self.turn = 0;
        self.lifecycle.play(
            now,
            leds,
            [Animation::from(flourish), Animation::pause(timings.pause)],
        );
        self.start_turn(now, leds);
    }

    fn start_turn<O: OutputSink>(&mut self, now: Instant, leds: &mut PatternController<O>) {
        let step = self.lifecycle.timings().step;
        let pause = MIN_PAUSE
            + Duration::from_micros(u64::from(self.rng.next_u32() % PAUSE_SPREAD_MICROS));
        self.secret = None;
        self.lit_at = None;
        self.pick.reset();
        self.phase = Phase::Armed;
        self.lifecycle.play(
            now,
            leds,
            [
                Animation::from(Blink::even(
                    self.bank.leading(self.turn + 1),
                    TURN_BLINKS,
                    step,
                )),
                Animation::pause(pause),
            ],
        );
    }

    #[allow(clippy::cast_possible_truncation)]
    fn light_secret<O: OutputSink>(&mut self, now: Instant, leds: &mut PatternController<O>) {
        let secret = (self.rng.next_u32() % u32::from(self.bank.count())) as LedIndex;
        let deadline = now + self.window();
        self.session.replace(&[secret]).ok();
        self.session.set_deadline(deadline);
        self.secret = Some(secret);
        self.lit_at = Some(now);
        self.phase = Phase::Awaiting;
        leds.set_phase(PatternCode::single(secret));
        log::debug!("reaction: secret {} lit", secret);
    }

    fn react<O: OutputSink>(
        &mut self,
        now: Instant,
        input: &InputSnapshot,
        leds: &mut PatternController<O>,
    ) {
        let Some(secret) = self.secret else {
            return;
        };
        let secret_code = PatternCode::single(secret);
        if self.session.is_expired(now) {
            log::info!("reaction: time is up");
            self.end_failed(now, leds, None);
            return;
        }

        let held = input.leds(self.bank);
        let shown = secret_code.union(held);
        if shown != leds.state() {
            leds.set_phase(shown);
        }
        let Some(pick) = self.pick.update(held) else {
            return;
        };

        match self.session.check(pick) {
            Verdict::Correct | Verdict::Complete => {
                leds.all_off();
                self.turn += 1;
                if self.turn < TURNS_PER_ROUND {
                    self.start_turn(now, leds);
                    return;
                }
                self.session.advance_round();
                log::info!("reaction: round {} cleared", self.session.round());
                self.phase = Phase::RoundStart;
                self.start_round(now, leds);
            }
            Verdict::Wrong => {
                log::info!("reaction: wrong pick {:#06b}", pick.bits());
                let timings = *self.lifecycle.timings();
                let prelude = PhaseBlink::new(
                    secret_code,
                    pick,
                    WRONG_PICK_BLINKS,
                    timings.step,
                    timings.step,
                );
                self.end_failed(now, leds, Some(Animation::from(prelude)));
            }
        }
    }

    fn end_failed<O: OutputSink>(
        &mut self,
        now: Instant,
        leds: &mut PatternController<O>,
        prelude: Option<Animation>,
    ) {
        let seed = self.rng.next_u64();
        let score = self.session.round();
        self.lifecycle.fail(now, leds, score, prelude, seed);
    }
}

impl<R: RngCore> Game for ReactionRace<R> {
    fn tick<O: OutputSink>(
        &mut self,
        now: Instant,
        input: &InputSnapshot,
        leds: &mut PatternController<O>,
    ) -> GameOutcome {
        let score = self.session.round();
        if let Tick::Hold(outcome) = self.lifecycle.advance(now, input, leds, score) {
            return outcome;
        }
        match self.phase {
            Phase::RoundStart => self.start_round(now, leds),
            Phase::Armed => self.light_secret(now, leds),
            Phase::Awaiting => self.react(now, input, leds),
        }
        GameOutcome::Running
    }

    fn abort<O: OutputSink>(&mut self, now: Instant, leds: &mut PatternController<O>) {
        let score = self.session.round();
        self.lifecycle.abort(now, leds, score);
    }

    fn stage(&self) -> Stage {
        let waiting = match self.phase {
            Phase::RoundStart | Phase::Armed => Stage::Showing,
            Phase::Awaiting => Stage::AwaitingInput,
        };
        self.lifecycle.stage(waiting)
    }
}
