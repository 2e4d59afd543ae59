//! Pattern controller.
//!
//! Owns the LED bank and is the only writer to the [`OutputSink`].

use embassy_time::{Duration, Instant};

use crate::bank::{LedBank, LedIndex, PatternCode};
use crate::config::Timings;
use crate::pattern::{Animation, Blink, Flicker, PhaseBlink, ProgressBar, Sweep, showcase};
use crate::phase::PhaseUpdate;
use crate::OutputSink;

/// Renders phases to the output sink.
///
/// The controller mirrors the committed LED state, there are no other mode
/// flags kept between calls.
pub struct PatternController<O: OutputSink> {
    output: O,
    bank: LedBank,
    state: PatternCode,
}

impl<O: OutputSink> PatternController<O> {
    pub fn new(output: O, bank: LedBank) -> Self {
        Self {
            output,
            bank,
            state: PatternCode::EMPTY,
        }
    }

    pub const fn bank(&self) -> LedBank {
        self.bank
    }

    /// Currently lit LEDs.
    pub const fn state(&self) -> PatternCode {
        self.state
    }

    pub const fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    pub fn into_output(self) -> O {
        self.output
    }

    /// Apply a single update.
    ///
    /// The complete target vector is computed first and handed to the sink
    /// in one call.
    pub fn apply(&mut self, update: &PhaseUpdate) {
        let clamped = self.bank.clamp(update.code);
        if clamped != update.code && !update.inverted {
            log::warn!(
                "leds: pattern {:#010b} exceeds a bank of {}, clamped",
                update.code.bits(),
                self.bank.count()
            );
        }
        let targets = update.targets(self.bank);
        self.output.write_frame(&targets);
        self.state = update.resolve(self.bank, self.state);
    }

    /// Light exactly the LEDs in `code`.
    pub fn set_phase(&mut self, code: PatternCode) {
        self.apply(&PhaseUpdate::set(code));
    }

    /// Switch every LED off.
    pub fn all_off(&mut self) {
        self.apply(&PhaseUpdate::off());
    }

    /// Light a single LED, leaving the others untouched.
    pub fn light(&mut self, index: LedIndex) {
        self.apply(&PhaseUpdate::overlay(PatternCode::single(index)));
    }

    /// Switch every LED off and release the outputs.
    pub fn shutdown(&mut self) {
        self.all_off();
        self.output.cleanup_all();
    }

    /// Play an animation to its end, blocking through `wait`.
    ///
    /// Every step is committed before `wait` is called with its hold time.
    /// Returns the instant at which the animation completes when started at
    /// `start`.
    pub fn play<W: FnMut(Duration)>(
        &mut self,
        mut animation: Animation,
        start: Instant,
        mut wait: W,
    ) -> Instant {
        let mut now = start;
        let mut cursor = 0;
        while let Some(step) = animation.step(cursor, self.bank) {
            self.apply(&step.update);
            if step.hold.as_ticks() > 0 {
                wait(step.hold);
                now += step.hold;
            }
            cursor += 1;
        }
        now
    }

    /// Set a phase and hold it.
    pub fn set_phase_held<W: FnMut(Duration)>(
        &mut self,
        code: PatternCode,
        hold: Duration,
        start: Instant,
        wait: W,
    ) -> Instant {
        self.play(Animation::hold(PhaseUpdate::set(code), hold), start, wait)
    }

    /// Apply an advanced update, hold it and optionally revert it.
    pub fn set_phase_advanced<W: FnMut(Duration)>(
        &mut self,
        update: PhaseUpdate,
        hold: Duration,
        auto_revert: bool,
        start: Instant,
        wait: W,
    ) -> Instant {
        let animation = if auto_revert {
            Animation::flash(update, hold)
        } else {
            Animation::hold(update, hold)
        };
        self.play(animation, start, wait)
    }

    /// Blink `code` for `rounds` rounds.
    pub fn blink_pattern<W: FnMut(Duration)>(
        &mut self,
        blink: Blink,
        start: Instant,
        wait: W,
    ) -> Instant {
        self.play(Animation::Blink(blink), start, wait)
    }

    /// Set `base`, then flash `flash` on top of it.
    pub fn phase_blink<W: FnMut(Duration)>(
        &mut self,
        phase_blink: PhaseBlink,
        start: Instant,
        wait: W,
    ) -> Instant {
        self.play(Animation::PhaseBlink(phase_blink), start, wait)
    }

    /// Walk a single lit LED across the bank.
    pub fn sweep<W: FnMut(Duration)>(&mut self, sweep: Sweep, start: Instant, wait: W) -> Instant {
        self.play(Animation::Sweep(sweep), start, wait)
    }

    /// Fill or drain the bank like a progress bar.
    pub fn progress_bar<W: FnMut(Duration)>(
        &mut self,
        progress: ProgressBar,
        start: Instant,
        wait: W,
    ) -> Instant {
        self.play(Animation::ProgressBar(progress), start, wait)
    }

    /// Light random subsets for random durations.
    pub fn random_flicker<W: FnMut(Duration)>(
        &mut self,
        flicker: Flicker,
        start: Instant,
        wait: W,
    ) -> Instant {
        self.play(Animation::Flicker(flicker), start, wait)
    }

    /// Keep the LEDs as they are for `duration`.
    pub fn pause<W: FnMut(Duration)>(
        &mut self,
        duration: Duration,
        start: Instant,
        wait: W,
    ) -> Instant {
        self.play(Animation::pause(duration), start, wait)
    }

    /// Play the demo reel.
    pub fn showcase<W: FnMut(Duration)>(
        &mut self,
        timings: &Timings,
        seed: u64,
        start: Instant,
        mut wait: W,
    ) -> Instant {
        showcase(timings, seed)
            .into_iter()
            .fold(start, |at, animation| self.play(animation, at, &mut wait))
    }
}
