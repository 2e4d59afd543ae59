//! Phase update primitive.
//!
//! Every animation in the crate is a list of [`PhaseUpdate`] values with
//! delays in between.

use crate::bank::{LedBank, MAX_LEDS, PatternCode};

/// Target level of each LED for a single update, `None` leaves the LED untouched.
pub type PhaseTargets = [Option<bool>; MAX_LEDS];

/// A single atomic change of the LED bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhaseUpdate {
    /// LEDs addressed by the update.
    pub code: PatternCode,
    /// Only touch the LEDs in `code`, keep the others as they are.
    pub independent: bool,
    /// Switch the addressed LEDs off instead of on.
    pub reversed: bool,
    /// Address the complement of `code`.
    pub inverted: bool,
}

impl PhaseUpdate {
    /// Light exactly the LEDs in `code`.
    pub const fn set(code: PatternCode) -> Self {
        Self {
            code,
            independent: false,
            reversed: false,
            inverted: false,
        }
    }

    /// Switch every LED off.
    pub const fn off() -> Self {
        Self::set(PatternCode::EMPTY)
    }

    /// Update that writes nothing.
    pub const fn noop() -> Self {
        Self::set(PatternCode::EMPTY).independent()
    }

    /// Light the LEDs in `code` on top of the current state.
    pub const fn overlay(code: PatternCode) -> Self {
        Self::set(code).independent()
    }

    pub const fn independent(mut self) -> Self {
        self.independent = true;
        self
    }

    pub const fn reversed(mut self) -> Self {
        self.reversed = true;
        self
    }

    pub const fn inverted(mut self) -> Self {
        self.inverted = true;
        self
    }

    /// The update that undoes this one.
    pub const fn revert(mut self) -> Self {
        self.reversed = !self.reversed;
        self
    }

    /// Compute the full target vector for `bank`.
    ///
    /// The returned vector is complete before any output is written.
    pub fn targets(&self, bank: LedBank) -> PhaseTargets {
        let (lit, unlit) = if self.reversed {
            (false, true)
        } else {
            (true, false)
        };
        let code = if self.inverted {
            self.code.complement(bank)
        } else {
            bank.clamp(self.code)
        };

        let mut targets = [None; MAX_LEDS];
        for index in bank.indices() {
            let addressed = code.contains(index);
            targets[index as usize] = match (addressed, self.independent) {
                (true, _) => Some(lit),
                (false, false) => Some(unlit),
                (false, true) => None,
            };
        }
        targets
    }

    /// Resulting bank state when applied on top of `current`.
    pub fn resolve(&self, bank: LedBank, current: PatternCode) -> PatternCode {
        let targets = self.targets(bank);
        bank.indices().fold(current, |state, index| match targets[index as usize] {
            Some(true) => state.with(index),
            Some(false) => state.without(index),
            None => state,
        })
    }
}
