//! Conductor, the glue between inputs, the LED bank and the games.
//!
//! Owns the [`PatternController`] and lends it to the active game on every
//! tick. Without a game the gamepad drives the LEDs directly, or the text
//! commands do when the text menu is active.

use embassy_time::Instant;
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use crate::bank::{LedIndex, PatternCode};
use crate::command::{Command, CommandReceiver, HELP};
use crate::config::{ArcadeConfig, GameSpeed, scale};
use crate::controller::PatternController;
use crate::game::{GameId, GameOutcome, GameSlot};
use crate::input::{Button, ButtonSet, InputSnapshot};
use crate::pattern::{Animation, Blink, Flicker, ProgressBar, Sweep, showcase};
use crate::phase::PhaseUpdate;
use crate::player::AnimationPlayer;
use crate::OutputSink;

const GREETING_ROUNDS: u16 = 2;
const COMMAND_FLICKER_ROUNDS: u16 = 100;
const COMMAND_SWEEP_ROUNDS: u16 = 20;
const COMMAND_PROGRESS_ROUNDS: u16 = 2;
/// Base factor of the manual blink, the trigger depression is subtracted.
const MANUAL_BLINK_BASE: f32 = 1.05;

enum Mode {
    Manual,
    Menu,
    Playing(GameSlot<SmallRng>),
    Stopping,
    Stopped,
}

/// Control surface currently in charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Gamepad drives the LEDs directly.
    Manual,
    /// Text commands drive the LEDs.
    Menu,
    Playing(GameId),
    /// Goodbye animation is playing.
    Stopping,
    Stopped,
}

pub struct Conductor<'a, O: OutputSink, const CMD: usize> {
    leds: PatternController<O>,
    player: AnimationPlayer,
    rng: SmallRng,
    config: ArcadeConfig,
    commands: CommandReceiver<'a, CMD>,
    mode: Mode,
    previous: InputSnapshot,
    selected: LedIndex,
    started: bool,
    last_result: Option<(GameId, GameOutcome)>,
}

impl<'a, O: OutputSink, const CMD: usize> Conductor<'a, O, CMD> {
    pub fn new(output: O, config: ArcadeConfig, commands: CommandReceiver<'a, CMD>) -> Self {
        Self {
            leds: PatternController::new(output, config.bank),
            player: AnimationPlayer::new(),
            rng: SmallRng::seed_from_u64(config.seed),
            config,
            commands,
            mode: Mode::Manual,
            previous: InputSnapshot::idle(),
            selected: 0,
            started: false,
            last_result: None,
        }
    }

    pub const fn leds(&self) -> &PatternController<O> {
        &self.leds
    }

    pub const fn config(&self) -> &ArcadeConfig {
        &self.config
    }

    pub const fn speed(&self) -> GameSpeed {
        self.config.speed
    }

    /// LED picked with the D-pad, it also selects the game to launch.
    pub const fn selected(&self) -> LedIndex {
        self.selected
    }

    /// Game and outcome of the last finished session.
    pub const fn last_result(&self) -> Option<(GameId, GameOutcome)> {
        self.last_result
    }

    pub fn surface(&self) -> Surface {
        match &self.mode {
            Mode::Manual => Surface::Manual,
            Mode::Menu => Surface::Menu,
            Mode::Playing(game) => Surface::Playing(game.id()),
            Mode::Stopping => Surface::Stopping,
            Mode::Stopped => Surface::Stopped,
        }
    }

    pub const fn is_stopped(&self) -> bool {
        matches!(self.mode, Mode::Stopped)
    }

    /// Start a game right away, regardless of the selected LED.
    pub fn launch(&mut self, id: GameId) {
        let rng = SmallRng::seed_from_u64(self.rng.next_u64());
        log::info!("conductor: launching {}", id.as_str());
        self.player.clear();
        self.mode = Mode::Playing(id.to_slot(rng, &self.config));
    }

    /// Play the goodbye sweep, then release the outputs.
    pub fn stop(&mut self) {
        if matches!(self.mode, Mode::Stopping | Mode::Stopped) {
            return;
        }
        log::info!("conductor: stopping");
        self.started = true;
        self.commands.discard();
        self.player.clear();
        self.player.extend([Animation::from(
            Sweep::new(self.config.timings.greeting_step, GREETING_ROUNDS).reversed(),
        )]);
        self.mode = Mode::Stopping;
    }

    /// Advance by one tick.
    ///
    /// Returns `false` once the conductor has stopped.
    pub fn tick(&mut self, now: Instant, input: &InputSnapshot, disconnected: bool) -> bool {
        if !self.started {
            self.started = true;
            log::info!("conductor: {} leds", self.config.bank.count());
            self.leds.all_off();
            self.player.extend([Animation::from(Sweep::new(
                self.config.timings.greeting_step,
                GREETING_ROUNDS,
            ))]);
        }

        let pressed = input.pressed_since(&self.previous);
        self.previous = *input;

        match &mut self.mode {
            Mode::Stopped => return false,
            Mode::Stopping => {
                if !self.player.tick(now, &mut self.leds) {
                    self.leds.shutdown();
                    self.mode = Mode::Stopped;
                    log::info!("conductor: stopped");
                    return false;
                }
            }
            Mode::Playing(game) => {
                let input = if disconnected {
                    game.abort(now, &mut self.leds);
                    InputSnapshot::idle()
                } else {
                    *input
                };
                let outcome = game.tick(now, &input, &mut self.leds);
                if outcome.is_over() {
                    let id = game.id();
                    log::info!("conductor: {} ended with {:?}", id.as_str(), outcome);
                    self.last_result = Some((id, outcome));
                    self.leds.all_off();
                    self.mode = if disconnected { Mode::Menu } else { Mode::Manual };
                }
            }
            Mode::Manual => {
                if disconnected {
                    log::warn!("conductor: gamepad disconnected, text commands only");
                    self.player.clear();
                    self.leds.all_off();
                    self.mode = Mode::Menu;
                } else if !self.player.tick(now, &mut self.leds) {
                    self.manual(now, input, pressed);
                }
            }
            Mode::Menu => {
                if !self.player.tick(now, &mut self.leds) {
                    if let Some(command) = self.commands.pop() {
                        self.run(now, command, disconnected);
                    }
                }
            }
        }
        true
    }

    fn manual(&mut self, now: Instant, input: &InputSnapshot, pressed: ButtonSet) {
        let timings = self.config.timings;
        let bank = self.config.bank;

        if pressed.contains(Button::Back) {
            self.stop();
        } else if pressed.contains(Button::Start) {
            match GameId::from_raw(self.selected) {
                Some(id) => self.launch(id),
                None => log::warn!("conductor: no game on led {}", self.selected),
            }
        } else if pressed.contains(Button::DPadLeft) || pressed.contains(Button::DPadRight) {
            let count = bank.count();
            self.selected = if pressed.contains(Button::DPadRight) {
                (self.selected + 1) % count
            } else {
                (self.selected + count - 1) % count
            };
            let flash = PhaseUpdate::overlay(PatternCode::single(self.selected));
            self.play(now, [Animation::flash(flash, timings.step)]);
        } else if pressed.contains(Button::LeftBumper) || pressed.contains(Button::RightBumper) {
            let speed = if pressed.contains(Button::RightBumper) {
                self.config.speed.faster()
            } else {
                self.config.speed.slower()
            };
            self.config.speed = speed;
            log::info!("conductor: game speed {}", speed.index());
            let shown = bank.leading(speed.index() + 1);
            self.play(
                now,
                [
                    Animation::hold(PhaseUpdate::set(shown), timings.show),
                    Animation::off(),
                ],
            );
        } else if pressed.contains(Button::DPadUp) {
            let seed = self.rng.next_u64();
            self.play(now, showcase(&timings, seed));
        } else if pressed.contains(Button::DPadDown) {
            log::info!("conductor: text commands\n{}", HELP);
            self.leds.all_off();
            self.mode = Mode::Menu;
        } else if input.trigger_left > 0.0 {
            let on = scale(timings.show, MANUAL_BLINK_BASE - input.trigger_left);
            let code = PatternCode::single(self.selected);
            self.play(now, [Animation::from(Blink::even(code, 1, on))]);
        } else {
            let held = input.leds(bank);
            if held != self.leds.state() {
                self.leds.set_phase(held);
            }
        }
    }

    fn run(&mut self, now: Instant, command: Command, disconnected: bool) {
        let timings = self.config.timings;
        log::debug!("conductor: command {}", command.as_char());
        match command {
            Command::Quit => self.stop(),
            Command::Gamepad if disconnected => {
                log::warn!("conductor: no gamepad connected");
            }
            Command::Gamepad => self.mode = Mode::Manual,
            Command::Flicker => {
                let flicker = Flicker::new(COMMAND_FLICKER_ROUNDS, self.rng.next_u64())
                    .with_max_hold(timings.flicker_step);
                self.play(now, [Animation::from(flicker)]);
            }
            Command::Sweep => {
                let sweep = Sweep::new(timings.greeting_step, COMMAND_SWEEP_ROUNDS);
                self.play(now, [Animation::from(sweep)]);
            }
            Command::Showcase => {
                let seed = self.rng.next_u64();
                self.play(now, showcase(&timings, seed));
            }
            Command::Progress => {
                let progress = ProgressBar::new(timings.greeting_step, COMMAND_PROGRESS_ROUNDS);
                self.play(now, [Animation::from(progress)]);
            }
            Command::Help => log::info!("conductor: commands\n{}", HELP),
        }
    }

    fn play(&mut self, now: Instant, animations: impl IntoIterator<Item = Animation>) {
        self.player.extend(animations);
        self.player.tick(now, &mut self.leds);
    }
}
