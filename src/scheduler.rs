//! Tick scheduling.
//!
//! Provides portable tick pacing without async/await or platform-specific timers.
//! The caller is responsible for sleeping between ticks.

use embassy_time::{Duration, Instant};

use crate::conductor::Conductor;
use crate::{InputSource, OutputSink};

/// Default poll period of the main loop.
pub const DEFAULT_TICK_DURATION: Duration = Duration::from_millis(10);

/// Result of a tick.
#[derive(Debug, Clone, Copy)]
pub struct TickResult {
    /// The deadline for the next tick.
    pub next_deadline: Instant,
    /// How long to wait until the next tick, zero when behind schedule.
    pub sleep_duration: Duration,
    /// `false` once the conductor has stopped and the input is closed.
    pub running: bool,
}

/// Polls the input source and drives the conductor at a fixed period.
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = TickScheduler::new(conductor, gamepad);
///
/// loop {
///     let result = scheduler.tick(Instant::now());
///     if !result.running {
///         break;
///     }
///     sleep(result.sleep_duration);
/// }
/// ```
pub struct TickScheduler<'a, I: InputSource, O: OutputSink, const CMD: usize> {
    input: I,
    conductor: Conductor<'a, O, CMD>,
    next_tick: Option<Instant>,
    tick_duration: Duration,
    closed: bool,
}

impl<'a, I: InputSource, O: OutputSink, const CMD: usize> TickScheduler<'a, I, O, CMD> {
    /// Create a scheduler ticking at the configured input period.
    pub fn new(conductor: Conductor<'a, O, CMD>, input: I) -> Self {
        let tick_duration = conductor.config().timings.input_tick;
        Self::with_tick_duration(conductor, input, tick_duration)
    }

    pub fn with_tick_duration(
        conductor: Conductor<'a, O, CMD>,
        input: I,
        tick_duration: Duration,
    ) -> Self {
        Self {
            input,
            conductor,
            next_tick: None,
            tick_duration,
            closed: false,
        }
    }

    /// Poll the input, tick the conductor and return timing information.
    pub fn tick(&mut self, now: Instant) -> TickResult {
        // Skip the backlog after a stall instead of catching up in a burst
        let max_drift = self.tick_duration + self.tick_duration;
        let next_tick = match self.next_tick {
            Some(next) if now <= next + max_drift => next,
            _ => now,
        };

        let running = if self.closed {
            false
        } else {
            let snapshot = self.input.poll_snapshot();
            let disconnected = self.input.is_disconnected();
            let running = self.conductor.tick(now, &snapshot, disconnected);
            if !running {
                log::info!("scheduler: closing input");
                self.input.close();
                self.closed = true;
            }
            running
        };

        let next_tick = next_tick + self.tick_duration;
        self.next_tick = Some(next_tick);

        TickResult {
            next_deadline: next_tick,
            sleep_duration: next_tick.saturating_duration_since(now),
            running,
        }
    }

    pub const fn conductor(&self) -> &Conductor<'a, O, CMD> {
        &self.conductor
    }

    pub fn conductor_mut(&mut self) -> &mut Conductor<'a, O, CMD> {
        &mut self.conductor
    }

    pub const fn input(&self) -> &I {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }
}
