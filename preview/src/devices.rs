//! Window output and gamepad input.

use eframe::egui;
use gilrs::{Axis, Button as PadButton, Event, EventType, GamepadId, Gilrs};
use myrtio_led_arcade::{Button, InputSnapshot, InputSource, LedIndex, MAX_LEDS, OutputSink};

/// LED outputs drawn in the window.
#[derive(Debug, Default)]
pub struct WindowSink {
    pins: [bool; MAX_LEDS],
    released: bool,
}

impl WindowSink {
    pub fn is_lit(&self, index: LedIndex) -> bool {
        !self.released && self.pins[usize::from(index)]
    }
}

impl OutputSink for WindowSink {
    fn set_pin(&mut self, index: LedIndex, on: bool) {
        self.pins[usize::from(index)] = on;
    }

    fn cleanup_all(&mut self) {
        log::info!("preview: outputs released");
        self.released = true;
    }
}

const PAD_BUTTONS: [(PadButton, Button); 12] = [
    (PadButton::South, Button::A),
    (PadButton::East, Button::B),
    (PadButton::West, Button::X),
    (PadButton::North, Button::Y),
    (PadButton::Select, Button::Back),
    (PadButton::Start, Button::Start),
    (PadButton::LeftTrigger, Button::LeftBumper),
    (PadButton::RightTrigger, Button::RightBumper),
    (PadButton::DPadUp, Button::DPadUp),
    (PadButton::DPadDown, Button::DPadDown),
    (PadButton::DPadLeft, Button::DPadLeft),
    (PadButton::DPadRight, Button::DPadRight),
];

const KEYS: [(egui::Key, Button); 12] = [
    (egui::Key::Num1, Button::A),
    (egui::Key::Num2, Button::B),
    (egui::Key::Num3, Button::X),
    (egui::Key::Num4, Button::Y),
    (egui::Key::Escape, Button::Back),
    (egui::Key::Space, Button::Start),
    (egui::Key::Q, Button::LeftBumper),
    (egui::Key::E, Button::RightBumper),
    (egui::Key::ArrowUp, Button::DPadUp),
    (egui::Key::ArrowDown, Button::DPadDown),
    (egui::Key::ArrowLeft, Button::DPadLeft),
    (egui::Key::ArrowRight, Button::DPadRight),
];

/// Keyboard state as a gamepad snapshot, `Z` and `C` act as triggers.
pub fn keyboard_snapshot(ctx: &egui::Context) -> InputSnapshot {
    ctx.input(|input| {
        let snapshot = KEYS
            .iter()
            .filter(|(key, _)| input.key_down(*key))
            .fold(InputSnapshot::idle(), |snapshot, (_, button)| {
                snapshot.with(*button)
            });
        let trigger = |key| -> f32 { if input.key_down(key) { 1.0 } else { 0.0 } };
        snapshot.with_triggers(trigger(egui::Key::Z), trigger(egui::Key::C))
    })
}

/// First connected gamepad, with the keyboard as a fallback.
pub struct Gamepad {
    gilrs: Option<Gilrs>,
    active: Option<GamepadId>,
    keyboard: Option<InputSnapshot>,
}

impl Gamepad {
    pub fn new() -> Self {
        let gilrs = match Gilrs::new() {
            Ok(gilrs) => Some(gilrs),
            Err(err) => {
                log::warn!("preview: gamepad support unavailable: {err}");
                None
            }
        };
        let active = gilrs
            .as_ref()
            .and_then(|gilrs| gilrs.gamepads().next().map(|(id, _)| id));
        Self {
            gilrs,
            active,
            keyboard: None,
        }
    }

    /// Keyboard snapshot merged into the next poll, `None` disables the keyboard.
    pub fn set_keyboard(&mut self, snapshot: Option<InputSnapshot>) {
        self.keyboard = snapshot;
    }

    pub fn has_gamepad(&self) -> bool {
        self.active.is_some()
    }

    fn pump_events(&mut self) {
        let Some(gilrs) = self.gilrs.as_mut() else {
            return;
        };
        while let Some(Event { id, event, .. }) = gilrs.next_event() {
            match event {
                EventType::Connected => {
                    log::info!("preview: gamepad connected");
                    if self.active.is_none() {
                        self.active = Some(id);
                    }
                }
                EventType::Disconnected if self.active == Some(id) => {
                    log::warn!("preview: gamepad disconnected");
                    self.active = None;
                }
                _ => {}
            }
        }
    }

    fn pad_snapshot(&self) -> Option<InputSnapshot> {
        let gamepad = self.gilrs.as_ref()?.connected_gamepad(self.active?)?;
        let snapshot = PAD_BUTTONS
            .iter()
            .filter(|(pad, _)| gamepad.is_pressed(*pad))
            .fold(InputSnapshot::idle(), |snapshot, (_, button)| {
                snapshot.with(*button)
            });
        let trigger = |button| {
            gamepad
                .button_data(button)
                .map_or(0.0, |data| data.value().clamp(0.0, 1.0))
        };
        let mut snapshot = snapshot.with_triggers(
            trigger(PadButton::LeftTrigger2),
            trigger(PadButton::RightTrigger2),
        );
        snapshot.stick = Some((
            gamepad.value(Axis::LeftStickX),
            gamepad.value(Axis::LeftStickY),
        ));
        Some(snapshot)
    }
}

impl Default for Gamepad {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for Gamepad {
    fn poll_snapshot(&mut self) -> InputSnapshot {
        self.pump_events();
        let pad = self.pad_snapshot().unwrap_or_default();
        let Some(keys) = self.keyboard else {
            return pad;
        };
        InputSnapshot {
            buttons: pad.buttons.union(keys.buttons),
            trigger_left: pad.trigger_left.max(keys.trigger_left),
            trigger_right: pad.trigger_right.max(keys.trigger_right),
            stick: pad.stick,
        }
    }

    fn is_disconnected(&self) -> bool {
        self.active.is_none() && self.keyboard.is_none()
    }

    fn close(&mut self) {
        self.gilrs = None;
        self.active = None;
    }
}
