//! Gamepad input snapshots.

use crate::bank::{LedBank, LedIndex, PatternCode};

/// Buttons known to the arcade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Button {
    A = 0,
    B = 1,
    X = 2,
    Y = 3,
    Back = 4,
    Start = 5,
    LeftBumper = 6,
    RightBumper = 7,
    DPadUp = 8,
    DPadDown = 9,
    DPadLeft = 10,
    DPadRight = 11,
}

/// Buttons that select a LED, in LED order.
pub const LED_BUTTONS: [Button; 4] = [Button::A, Button::B, Button::X, Button::Y];

impl Button {
    /// LED selected by this button, if any.
    pub const fn led(self) -> Option<LedIndex> {
        match self {
            Self::A => Some(0),
            Self::B => Some(1),
            Self::X => Some(2),
            Self::Y => Some(3),
            _ => None,
        }
    }

    const fn mask(self) -> u16 {
        1 << self as u8
    }
}

/// Set of held buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonSet(u16);

impl ButtonSet {
    pub const EMPTY: Self = Self(0);

    pub const fn with(self, button: Button) -> Self {
        Self(self.0 | button.mask())
    }

    pub const fn contains(self, button: Button) -> bool {
        self.0 & button.mask() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Buttons present here but not in `other`.
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    pub fn from_buttons(buttons: &[Button]) -> Self {
        buttons.iter().fold(Self::EMPTY, |set, &button| set.with(button))
    }

    /// LEDs selected by the held LED buttons, restricted to `bank`.
    pub fn leds(self, bank: LedBank) -> PatternCode {
        let code = LED_BUTTONS
            .iter()
            .filter(|button| self.contains(**button))
            .filter_map(|button| button.led())
            .fold(PatternCode::EMPTY, PatternCode::with);
        bank.clamp(code)
    }
}

/// State of the gamepad for one poll.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputSnapshot {
    pub buttons: ButtonSet,
    /// Left analog trigger depression in `[0.0, 1.0]`.
    pub trigger_left: f32,
    /// Right analog trigger depression in `[0.0, 1.0]`.
    pub trigger_right: f32,
    /// Left stick position, if the device has one.
    pub stick: Option<(f32, f32)>,
}

impl InputSnapshot {
    /// Snapshot with nothing held.
    pub const fn idle() -> Self {
        Self {
            buttons: ButtonSet::EMPTY,
            trigger_left: 0.0,
            trigger_right: 0.0,
            stick: None,
        }
    }

    /// Snapshot with only the exit button held.
    pub const fn exit() -> Self {
        Self::idle().with(Button::Back)
    }

    pub const fn with(mut self, button: Button) -> Self {
        self.buttons = self.buttons.with(button);
        self
    }

    pub const fn with_triggers(mut self, left: f32, right: f32) -> Self {
        self.trigger_left = left;
        self.trigger_right = right;
        self
    }

    pub const fn is_pressed(&self, button: Button) -> bool {
        self.buttons.contains(button)
    }

    /// The explicit exit input.
    pub const fn is_exit(&self) -> bool {
        self.is_pressed(Button::Back)
    }

    /// LEDs selected by held buttons.
    pub fn leds(&self, bank: LedBank) -> PatternCode {
        self.buttons.leds(bank)
    }

    /// Buttons pressed since the `previous` poll.
    pub const fn pressed_since(&self, previous: &Self) -> ButtonSet {
        self.buttons.difference(previous.buttons)
    }

    pub fn any_trigger(&self) -> bool {
        self.trigger_left > 0.0 || self.trigger_right > 0.0
    }
}

/// Stick position in polar coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polar {
    /// Angle in degrees within `[0, 360)`.
    pub angle: f32,
    pub radius: f32,
}

/// Convert a stick reading to polar coordinates.
///
/// The resting position `(0, 0)` points straight up (90°).
pub fn polar(x: f32, y: f32) -> Polar {
    let radius = libm::sqrtf(x * x + y * y);
    let atan = |x: f32, y: f32| libm::atanf(y / x).to_degrees();
    let angle = if x == 0.0 && y == 0.0 {
        90.0
    } else if x >= 0.0 && y >= 0.0 {
        if x == 0.0 { 90.0 } else { atan(x, y) }
    } else if x < 0.0 {
        atan(x, y) + 180.0
    } else if x == 0.0 {
        270.0
    } else {
        // a tiny negative slope rounds up to a full turn
        let angle = atan(x, y) + 360.0;
        if angle >= 360.0 { angle - 360.0 } else { angle }
    };
    Polar { angle, radius }
}
