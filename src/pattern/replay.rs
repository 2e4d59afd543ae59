//! Patterns built from recorded data.

use embassy_time::Duration;
use heapless::Vec;

use super::{Pattern, Step, times};
use crate::bank::{LedBank, LedIndex, PatternCode};
use crate::phase::PhaseUpdate;

/// Longest LED sequence a game can build.
pub const MAX_SEQUENCE_LEN: usize = 64;

/// Most segments a recording can hold.
pub const MAX_SEGMENTS: usize = 64;

/// Blinks each LED of a sequence once, in order.
#[derive(Debug, Clone)]
pub struct Sequence {
    leds: Vec<LedIndex, MAX_SEQUENCE_LEN>,
    on: Duration,
    off: Duration,
}

impl Sequence {
    pub fn new(leds: &[LedIndex], on: Duration, off: Duration) -> Self {
        let mut sequence = Vec::new();
        for &led in leds.iter().take(MAX_SEQUENCE_LEN) {
            let _ = sequence.push(led);
        }
        Self {
            leds: sequence,
            on,
            off,
        }
    }
}

impl Pattern for Sequence {
    fn step(&mut self, cursor: u32, _bank: LedBank) -> Option<Step> {
        let led = *self.leds.get(cursor as usize / 2)?;
        if cursor % 2 == 0 {
            Some(Step::new(
                PhaseUpdate::set(PatternCode::single(led)),
                self.on,
            ))
        } else {
            Some(Step::new(PhaseUpdate::off(), self.off))
        }
    }

    fn duration(&self, _bank: LedBank) -> Option<Duration> {
        Some(times(self.on + self.off, self.leds.len() as u64))
    }
}

/// A recorded phase and how long it was held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub code: PatternCode,
    pub duration: Duration,
}

/// Plays recorded segments back verbatim, then switches everything off.
#[derive(Debug, Clone)]
pub struct Replay {
    segments: Vec<Segment, MAX_SEGMENTS>,
}

impl Replay {
    pub fn new(segments: &[Segment]) -> Self {
        let mut recorded = Vec::new();
        for segment in segments.iter().take(MAX_SEGMENTS) {
            let _ = recorded.push(*segment);
        }
        Self { segments: recorded }
    }
}

impl Pattern for Replay {
    fn step(&mut self, cursor: u32, _bank: LedBank) -> Option<Step> {
        let cursor = cursor as usize;
        match self.segments.get(cursor) {
            Some(segment) => Some(Step::new(PhaseUpdate::set(segment.code), segment.duration)),
            None if cursor == self.segments.len() => Some(Step::off()),
            None => None,
        }
    }

    fn duration(&self, _bank: LedBank) -> Option<Duration> {
        Some(
            self.segments
                .iter()
                .fold(Duration::from_ticks(0), |total, segment| {
                    total + segment.duration
                }),
        )
    }
}
