//! LED calculator.
//!
//! The lit LEDs show the current value in binary. Triggers scroll the value,
//! the face buttons pick an operator and the right bumper confirms.

use core::fmt;

use embassy_time::{Duration, Instant};

use super::lifecycle::{Lifecycle, Tick};
use super::{Game, GameOutcome, Stage};
use crate::bank::LedBank;
use crate::config::Timings;
use crate::controller::PatternController;
use crate::error::Error;
use crate::input::{Button, ButtonSet, InputSnapshot, LED_BUTTONS};
use crate::pattern::{Animation, Blink};
use crate::OutputSink;

const OPERATOR_BLINKS: u16 = 2;

/// Arithmetic operator selected by a face button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub const fn from_button(button: Button) -> Option<Self> {
        match button {
            Button::A => Some(Self::Add),
            Button::B => Some(Self::Subtract),
            Button::X => Some(Self::Multiply),
            Button::Y => Some(Self::Divide),
            _ => None,
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// First operator whose button is in `buttons`.
    fn pressed(buttons: ButtonSet) -> Option<Self> {
        LED_BUTTONS
            .iter()
            .find(|button| buttons.contains(**button))
            .and_then(|button| Self::from_button(*button))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Apply `op` to `a` and `b`, wrapping into the range the bank can show.
///
/// Division rounds towards negative infinity. Every result is reduced with
/// the Euclidean remainder, so it always lies in `[0, 2^N)`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn calculate(bank: LedBank, a: u16, b: u16, op: Operator) -> Result<u16, Error> {
    let modulus = i32::from(bank.capacity());
    let (a, b) = (i32::from(a) % modulus, i32::from(b) % modulus);
    let value = match op {
        Operator::Add => a + b,
        Operator::Subtract => a - b,
        Operator::Multiply => a * b,
        Operator::Divide => {
            if b == 0 {
                return Err(Error::DivisionByZero);
            }
            a.div_euclid(b)
        }
    };
    Ok(value.rem_euclid(modulus) as u16)
}

pub struct ArithmeticCalculator {
    bank: LedBank,
    lifecycle: Lifecycle,
    current: u16,
    pending: Option<(u16, Operator)>,
    last_error: Option<Error>,
    next_scroll: Option<Instant>,
}

impl ArithmeticCalculator {
    pub fn new(bank: LedBank, timings: Timings) -> Self {
        Self {
            bank,
            lifecycle: Lifecycle::new("calculator", timings),
            current: 0,
            pending: None,
            last_error: None,
            next_scroll: None,
        }
    }

    /// Value shown on the LEDs.
    pub const fn current(&self) -> u16 {
        self.current
    }

    /// Left operand and operator waiting for the right operand.
    pub const fn pending(&self) -> Option<(u16, Operator)> {
        self.pending
    }

    /// Error of the last rejected operation.
    pub const fn last_error(&self) -> Option<Error> {
        self.last_error
    }

    /// Delay between two scroll steps for the given trigger depression.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn scroll_delay(&self, input: &InputSnapshot) -> Duration {
        let base = self.lifecycle.timings().trigger_base.as_micros() as f32;
        let depression = (input.trigger_left + input.trigger_right) * 1_000_000.0;
        Duration::from_micros((base - depression).max(0.0) as u64)
    }

    fn scroll(&mut self, input: &InputSnapshot) {
        let capacity = self.bank.capacity();
        if input.trigger_right > input.trigger_left {
            self.current = (self.current + 1) % capacity;
        } else if input.trigger_left > input.trigger_right {
            self.current = (self.current + capacity - 1) % capacity;
        }
    }

    /// Scroll while a trigger is held, returns whether it is.
    fn handle_triggers(&mut self, now: Instant, input: &InputSnapshot) -> bool {
        if !input.any_trigger() {
            self.next_scroll = None;
            return false;
        }
        match self.next_scroll {
            None => {
                self.scroll(input);
                self.next_scroll = Some(now + self.scroll_delay(input));
            }
            Some(next) if now >= next => {
                self.scroll(input);
                self.next_scroll = Some(next + self.scroll_delay(input));
            }
            Some(_) => {}
        }
        true
    }

    /// Evaluate the pending operation with the current value as right operand.
    fn evaluate(&mut self) -> Result<Option<u16>, Error> {
        let Some((left, op)) = self.pending else {
            return Ok(None);
        };
        match calculate(self.bank, left, self.current, op) {
            Ok(value) => {
                log::info!("calculator: {} {} {} = {}", left, op, self.current, value);
                self.last_error = None;
                Ok(Some(value))
            }
            Err(err) => {
                log::warn!("calculator: {} {} {} rejected: {}", left, op, self.current, err);
                self.last_error = Some(err);
                Err(err)
            }
        }
    }

    fn select<O: OutputSink>(
        &mut self,
        now: Instant,
        leds: &mut PatternController<O>,
        op: Operator,
    ) {
        let left = match self.evaluate() {
            Ok(Some(value)) => value,
            Ok(None) => self.current,
            Err(_) => return,
        };
        self.current = left;
        self.pending = Some((left, op));
        log::debug!("calculator: {} {} _", left, op);

        let step = self.lifecycle.timings().step;
        self.lifecycle.play(
            now,
            leds,
            [Animation::from(Blink::even(
                self.bank.all(),
                OPERATOR_BLINKS,
                step,
            ))],
        );
    }

    fn confirm(&mut self) {
        if let Ok(Some(value)) = self.evaluate() {
            self.current = value;
            self.pending = None;
        }
    }
}

impl Game for ArithmeticCalculator {
    fn tick<O: OutputSink>(
        &mut self,
        now: Instant,
        input: &InputSnapshot,
        leds: &mut PatternController<O>,
    ) -> GameOutcome {
        let pressed = match self.lifecycle.advance(now, input, leds, self.current) {
            Tick::Hold(outcome) => return outcome,
            Tick::Ready(pressed) => pressed,
        };

        if !self.handle_triggers(now, input) {
            if let Some(op) = Operator::pressed(pressed) {
                self.select(now, leds, op);
            } else if pressed.contains(Button::RightBumper) {
                self.confirm();
            }
        }

        if !self.lifecycle.is_playing() {
            let shown = self.bank.encode(self.current);
            if shown != leds.state() {
                leds.set_phase(shown);
            }
        }
        GameOutcome::Running
    }

    fn abort<O: OutputSink>(&mut self, now: Instant, leds: &mut PatternController<O>) {
        self.lifecycle.abort(now, leds, self.current);
    }

    fn stage(&self) -> Stage {
        self.lifecycle.stage(Stage::AwaitingInput)
    }
}
