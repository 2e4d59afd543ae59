use embassy_time::Instant;
use heapless::Vec;

use crate::bank::{LedIndex, PatternCode};
use crate::error::Error;
use crate::pattern::MAX_SEQUENCE_LEN;

/// Result of checking a pick against the target sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Pick matches, more elements follow.
    Correct,
    /// Pick matches the last element.
    Complete,
    /// Wrong LED, or more than one LED.
    Wrong,
}

/// Per-run state of a game.
#[derive(Debug, Clone, Default)]
pub struct GameSession {
    round: u16,
    sequence: Vec<LedIndex, MAX_SEQUENCE_LEN>,
    cursor: usize,
    deadline: Option<Instant>,
}

impl GameSession {
    pub const fn new() -> Self {
        Self {
            round: 0,
            sequence: Vec::new(),
            cursor: 0,
            deadline: None,
        }
    }

    /// Number of completed rounds.
    pub const fn round(&self) -> u16 {
        self.round
    }

    pub fn sequence(&self) -> &[LedIndex] {
        &self.sequence
    }

    /// Position of the next expected element.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn set_deadline(&mut self, deadline: Instant) {
        self.deadline = Some(deadline);
    }

    /// Check if the deadline has passed at `now`.
    pub fn is_expired(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now > deadline)
    }

    /// Expected element at the cursor.
    pub fn expected(&self) -> Option<LedIndex> {
        self.sequence.get(self.cursor).copied()
    }

    /// Append an element to the target sequence.
    pub fn extend(&mut self, led: LedIndex) -> Result<(), Error> {
        self.sequence.push(led).map_err(|_| Error::SequenceFull)
    }

    /// Replace the target sequence.
    pub fn replace(&mut self, leds: &[LedIndex]) -> Result<(), Error> {
        self.sequence = Vec::from_slice(leds).map_err(|()| Error::SequenceFull)?;
        self.cursor = 0;
        Ok(())
    }

    pub fn advance_round(&mut self) {
        self.round = self.round.saturating_add(1);
        self.cursor = 0;
        self.deadline = None;
    }

    pub fn rewind(&mut self) {
        self.cursor = 0;
        self.deadline = None;
    }

    /// Check `pick` against the element at the cursor, advancing on success.
    pub fn check(&mut self, pick: PatternCode) -> Verdict {
        let matches = pick.len() == 1 && pick.first() == self.expected();
        if !matches {
            return Verdict::Wrong;
        }
        self.cursor += 1;
        self.deadline = None;
        if self.cursor >= self.sequence.len() {
            Verdict::Complete
        } else {
            Verdict::Correct
        }
    }
}

/// Collects LED buttons held together until all of them are released.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pick {
    held: PatternCode,
}

impl Pick {
    /// LEDs collected so far.
    pub const fn current(&self) -> PatternCode {
        self.held
    }

    /// Feed the LED buttons held now.
    ///
    /// Returns the collected pick once every button has been released.
    pub fn update(&mut self, held: PatternCode) -> Option<PatternCode> {
        if !held.is_empty() {
            self.held = self.held.union(held);
            return None;
        }
        if self.held.is_empty() {
            return None;
        }
        let pick = self.held;
        self.held = PatternCode::EMPTY;
        Some(pick)
    }

    pub fn reset(&mut self) {
        self.held = PatternCode::EMPTY;
    }
}
