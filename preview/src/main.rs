//! Desktop preview of the LED arcade.
//!
//! Draws the LED bank in a window, reads a gamepad (or the keyboard) and
//! forwards text commands to the conductor.

mod devices;

use std::time::Instant as StdInstant;

use eframe::egui::{self};
use myrtio_led_arcade::command::HELP;
use myrtio_led_arcade::{
    ArcadeConfig, Command, CommandQueue, CommandSender, Conductor, Instant, Surface,
    TickScheduler,
};

use crate::devices::{Gamepad, WindowSink};

/// Size of each LED circle in pixels.
const LED_RADIUS: f32 = 28.0;

/// Gap between LEDs.
const LED_GAP: f32 = 24.0;

/// Command queue size.
const COMMAND_QUEUE_SIZE: usize = 8;

/// Upper bound of ticks run per repaint, keeps the UI alive after a stall.
const MAX_TICKS_PER_FRAME: usize = 50;

/// Static command queue between the console line and the conductor.
static COMMANDS: CommandQueue<COMMAND_QUEUE_SIZE> = CommandQueue::<COMMAND_QUEUE_SIZE>::new();

type Scheduler = TickScheduler<'static, Gamepad, WindowSink, COMMAND_QUEUE_SIZE>;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([640.0, 420.0])
            .with_title("LED Arcade Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "myrtio-arcade-preview",
        options,
        Box::new(|_cc| Ok(Box::new(PreviewApp::new()))),
    )
}

struct PreviewApp {
    scheduler: Scheduler,
    commands: CommandSender<'static, COMMAND_QUEUE_SIZE>,
    /// Synthetic time in milliseconds.
    t_ms: u64,
    /// Wall-clock reference for delta time.
    last_frame: StdInstant,
    /// Deadline of the next conductor tick.
    next_tick: Instant,
    /// Whether the keyboard stands in for a missing gamepad.
    keyboard: bool,
    /// Console line being typed.
    command_line: String,
    running: bool,
}

impl PreviewApp {
    fn new() -> Self {
        let config = ArcadeConfig {
            seed: rand::random(),
            ..ArcadeConfig::default()
        };
        let conductor = Conductor::new(WindowSink::default(), config, COMMANDS.receiver());
        let scheduler = TickScheduler::new(conductor, Gamepad::new());

        Self {
            scheduler,
            commands: COMMANDS.sender(),
            t_ms: 0,
            last_frame: StdInstant::now(),
            next_tick: Instant::from_millis(0),
            keyboard: true,
            command_line: String::new(),
            running: true,
        }
    }

    fn send(&self, command: Command) {
        if let Err(err) = self.commands.submit(command) {
            log::warn!("preview: {err}");
        }
    }

    /// Update synthetic time based on wall clock.
    fn update_time(&mut self) {
        let now = StdInstant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;
        #[allow(clippy::cast_possible_truncation)]
        let delta_ms = delta.as_millis() as u64;
        self.t_ms = self.t_ms.wrapping_add(delta_ms);
    }

    /// Run every tick that is due.
    fn run_ticks(&mut self, ctx: &egui::Context) {
        let keyboard = self.keyboard;
        let input = self.scheduler.input_mut();
        input.set_keyboard(keyboard.then(|| devices::keyboard_snapshot(ctx)));

        let now = Instant::from_millis(self.t_ms);
        for _ in 0..MAX_TICKS_PER_FRAME {
            if !self.running || self.next_tick > now {
                break;
            }
            let result = self.scheduler.tick(now);
            self.next_tick = result.next_deadline;
            self.running = result.running;
        }
    }

    fn surface_label(&self) -> String {
        let conductor = self.scheduler.conductor();
        match conductor.surface() {
            Surface::Manual => format!("gamepad control, led {} selected", conductor.selected()),
            Surface::Menu => "text commands".to_string(),
            Surface::Playing(id) => format!("playing {}", id.as_str()),
            Surface::Stopping => "stopping".to_string(),
            Surface::Stopped => "stopped".to_string(),
        }
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_time();
        self.run_ticks(ctx);

        if self.running {
            ctx.request_repaint();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                let secs = self.t_ms / 1000;
                let ms = self.t_ms % 1000;
                ui.label(format!("Time: {secs}.{ms:03}s"));
                ui.add_space(16.0);
                ui.label(self.surface_label());
            });

            ui.horizontal(|ui| {
                let conductor = self.scheduler.conductor();
                ui.label(format!("Speed: {}", conductor.speed().index()));
                if let Some((id, outcome)) = conductor.last_result() {
                    ui.add_space(16.0);
                    ui.label(format!("Last game: {} {:?}", id.as_str(), outcome));
                }
            });

            ui.add_space(4.0);

            ui.horizontal(|ui| {
                ui.checkbox(&mut self.keyboard, "Keyboard as gamepad");
                let pad = if self.scheduler.input().has_gamepad() {
                    "gamepad connected"
                } else {
                    "no gamepad"
                };
                ui.label(pad);
            });

            ui.add_space(16.0);

            // === LED Display ===
            let sink = self.scheduler.conductor().leds().output();
            let count = self.scheduler.conductor().config().bank.count();
            let pitch = LED_RADIUS * 2.0 + LED_GAP;
            let width = f32::from(count) * pitch;
            let (response, painter) = ui.allocate_painter(
                egui::vec2(width, pitch),
                egui::Sense::hover(),
            );
            let origin = response.rect.min;
            for index in 0..count {
                let center = egui::pos2(
                    origin.x + f32::from(index) * pitch + LED_RADIUS,
                    origin.y + LED_RADIUS,
                );
                let color = if sink.is_lit(index) {
                    egui::Color32::from_rgb(255, 70, 40)
                } else {
                    egui::Color32::from_rgb(50, 20, 20)
                };
                painter.circle_filled(center, LED_RADIUS, color);
            }

            ui.add_space(16.0);

            ui.horizontal(|ui| {
                for command in [
                    Command::Flicker,
                    Command::Sweep,
                    Command::Showcase,
                    Command::Progress,
                    Command::Gamepad,
                    Command::Quit,
                ] {
                    if ui.button(format!("{command:?}")).clicked() {
                        self.send(command);
                    }
                }
            });

            ui.horizontal(|ui| {
                ui.label("Command:");
                let response = ui.text_edit_singleline(&mut self.command_line);
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    if let Err(err) = self.commands.submit_line(&self.command_line) {
                        log::warn!("preview: {err}: {:?}", self.command_line);
                    }
                    self.command_line.clear();
                }
            });

            ui.add_space(8.0);
            ui.monospace(HELP);
        });
    }
}
