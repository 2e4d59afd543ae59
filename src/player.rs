//! Tick driven animation playback.
//!
//! Animations are queued and played back to back on a scheduled timeline.
//! The caller ticks the player with the current time; due steps are applied
//! and the player reports whether it is still busy.

use embassy_time::Instant;
use heapless::Deque;

use crate::controller::PatternController;
use crate::pattern::Animation;
use crate::OutputSink;

/// Number of animations that can wait in the queue.
pub const QUEUE_SIZE: usize = 16;

#[derive(Debug, Clone)]
struct Active {
    animation: Animation,
    cursor: u32,
    /// Instant at which the step at `cursor` is due.
    due: Instant,
}

/// Queue of animations played step by step.
#[derive(Debug, Default)]
pub struct AnimationPlayer {
    queue: Deque<Animation, QUEUE_SIZE>,
    active: Option<Active>,
    finished_at: Option<Instant>,
}

impl AnimationPlayer {
    pub const fn new() -> Self {
        Self {
            queue: Deque::new(),
            active: None,
            finished_at: None,
        }
    }

    /// Queue an animation behind the ones already waiting.
    ///
    /// Returns the animation if the queue is full.
    pub fn push(&mut self, animation: Animation) -> Result<(), Animation> {
        self.queue.push_back(animation)
    }

    /// Queue a list of animations.
    ///
    /// Animations that do not fit are dropped.
    pub fn extend<I: IntoIterator<Item = Animation>>(&mut self, animations: I) {
        for animation in animations {
            if self.push(animation).is_err() {
                log::warn!("player: queue is full, animation dropped");
            }
        }
    }

    /// Drop the running and all queued animations.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.active = None;
    }

    /// Check if an animation is running or queued.
    pub fn is_busy(&self) -> bool {
        self.active.is_some() || !self.queue.is_empty()
    }

    /// Scheduled end of the last completed animation.
    pub const fn finished_at(&self) -> Option<Instant> {
        self.finished_at
    }

    /// Apply every step that is due at `now`.
    ///
    /// Returns `true` while there is something left to play.
    pub fn tick<O: OutputSink>(&mut self, now: Instant, leds: &mut PatternController<O>) -> bool {
        loop {
            let Some(active) = self.active.as_mut() else {
                let Some(animation) = self.queue.pop_front() else {
                    return false;
                };
                self.active = Some(Active {
                    animation,
                    cursor: 0,
                    due: now,
                });
                continue;
            };

            if now < active.due {
                return true;
            }

            if let Some(step) = active.animation.step(active.cursor, leds.bank()) {
                leds.apply(&step.update);
                active.cursor += 1;
                active.due += step.hold;
                continue;
            }

            // Chain the next animation on the scheduled timeline
            let finished = active.due;
            self.active = None;
            self.finished_at = Some(finished);
            match self.queue.pop_front() {
                Some(animation) => {
                    self.active = Some(Active {
                        animation,
                        cursor: 0,
                        due: finished,
                    });
                }
                None => return false,
            }
        }
    }
}
