//! Pattern recorder.
//!
//! Records which LED buttons are held over time and plays the recording
//! back verbatim.

use embassy_time::Instant;
use heapless::Vec;

use super::lifecycle::{Lifecycle, Tick};
use super::{Game, GameOutcome, Stage};
use crate::bank::{LedBank, PatternCode};
use crate::config::Timings;
use crate::controller::PatternController;
use crate::error::Error;
use crate::input::{Button, ButtonSet, InputSnapshot};
use crate::pattern::{Animation, MAX_SEGMENTS, ProgressBar, Replay, Segment, showcase};
use crate::OutputSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Menu,
    Recording { code: PatternCode, since: Instant },
}

pub struct PatternRecorder {
    bank: LedBank,
    lifecycle: Lifecycle,
    segments: Vec<Segment, MAX_SEGMENTS>,
    mode: Mode,
    seed: u64,
}

impl PatternRecorder {
    pub fn new(bank: LedBank, timings: Timings, seed: u64) -> Self {
        Self {
            bank,
            lifecycle: Lifecycle::new("recorder", timings).with_settle_pause(),
            segments: Vec::new(),
            mode: Mode::Menu,
            seed,
        }
    }

    /// Recorded segments, oldest first.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub const fn is_recording(&self) -> bool {
        matches!(self.mode, Mode::Recording { .. })
    }

    fn score(&self) -> u16 {
        u16::try_from(self.segments.len()).unwrap_or(u16::MAX)
    }

    fn menu<O: OutputSink>(
        &mut self,
        now: Instant,
        input: &InputSnapshot,
        pressed: ButtonSet,
        leds: &mut PatternController<O>,
    ) {
        if pressed.contains(Button::DPadDown) {
            let code = input.leds(self.bank);
            log::info!("recorder: recording");
            self.segments.clear();
            self.mode = Mode::Recording { code, since: now };
            self.lifecycle.set_exit_enabled(false);
            leds.set_phase(code);
        } else if pressed.contains(Button::DPadUp) {
            if self.segments.is_empty() {
                log::info!("recorder: nothing recorded, playing the showcase");
                self.seed = self.seed.wrapping_add(1);
                let reel = showcase(self.lifecycle.timings(), self.seed);
                self.lifecycle.play(now, leds, reel);
            } else {
                log::info!("recorder: replaying {} segments", self.segments.len());
                let replay = Replay::new(&self.segments);
                self.lifecycle.play(now, leds, [Animation::from(replay)]);
            }
        }
    }

    fn record<O: OutputSink>(
        &mut self,
        now: Instant,
        input: &InputSnapshot,
        pressed: ButtonSet,
        leds: &mut PatternController<O>,
    ) {
        let Mode::Recording { code, since } = self.mode else {
            return;
        };
        if pressed.contains(Button::Back) {
            let closed = self.close_segment(code, since, now);
            self.save(now, leds, closed.err());
            return;
        }

        let held = input.leds(self.bank);
        if held == code {
            return;
        }
        if let Err(err) = self.close_segment(code, since, now) {
            self.save(now, leds, Some(err));
            return;
        }
        self.mode = Mode::Recording {
            code: held,
            since: now,
        };
        leds.set_phase(held);
    }

    /// Store the interval `code` was held for, zero length intervals are dropped.
    fn close_segment(
        &mut self,
        code: PatternCode,
        since: Instant,
        now: Instant,
    ) -> Result<(), Error> {
        let duration = now.saturating_duration_since(since);
        if duration.as_ticks() == 0 {
            return Ok(());
        }
        self.segments
            .push(Segment { code, duration })
            .map_err(|_| Error::RecordingFull)
    }

    fn save<O: OutputSink>(
        &mut self,
        now: Instant,
        leds: &mut PatternController<O>,
        error: Option<Error>,
    ) {
        if let Some(err) = error {
            log::warn!("recorder: {}, saving", err);
        }
        log::info!("recorder: saved {} segments", self.segments.len());
        self.mode = Mode::Menu;
        self.lifecycle.set_exit_enabled(true);
        leds.all_off();
        let step = self.lifecycle.timings().step;
        self.lifecycle
            .play(now, leds, [Animation::from(ProgressBar::new(step, 1))]);
    }
}

impl Game for PatternRecorder {
    fn tick<O: OutputSink>(
        &mut self,
        now: Instant,
        input: &InputSnapshot,
        leds: &mut PatternController<O>,
    ) -> GameOutcome {
        let pressed = match self.lifecycle.advance(now, input, leds, self.score()) {
            Tick::Hold(outcome) => return outcome,
            Tick::Ready(pressed) => pressed,
        };
        match self.mode {
            Mode::Menu => self.menu(now, input, pressed, leds),
            Mode::Recording { .. } => self.record(now, input, pressed, leds),
        }
        GameOutcome::Running
    }

    fn abort<O: OutputSink>(&mut self, now: Instant, leds: &mut PatternController<O>) {
        let score = self.score();
        self.lifecycle.abort(now, leds, score);
    }

    fn stage(&self) -> Stage {
        self.lifecycle.stage(Stage::AwaitingInput)
    }
}
