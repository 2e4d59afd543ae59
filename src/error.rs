use core::fmt;

/// Errors reported by the arcade core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// LED bank size outside of `1..=MAX_LEDS`.
    InvalidLedCount(u8),
    /// LED index is not part of the bank.
    LedOutOfRange { index: u8, count: u8 },
    /// Calculator was asked to divide by the zero encoding.
    DivisionByZero,
    /// Memory sequence reached its capacity.
    SequenceFull,
    /// Pattern recorder reached its capacity.
    RecordingFull,
    /// Text command queue has no room left.
    CommandQueueFull,
    /// Console line does not name a command.
    UnknownCommand,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLedCount(count) => {
                write!(f, "invalid LED count {count}, expected 1..={}", crate::MAX_LEDS)
            }
            Self::LedOutOfRange { index, count } => {
                write!(f, "LED index {index} is out of range for a bank of {count}")
            }
            Self::DivisionByZero => f.write_str("division by zero"),
            Self::SequenceFull => f.write_str("sequence is full"),
            Self::RecordingFull => f.write_str("recording is full"),
            Self::CommandQueueFull => f.write_str("command queue is full"),
            Self::UnknownCommand => f.write_str("unknown command"),
        }
    }
}

impl core::error::Error for Error {}
