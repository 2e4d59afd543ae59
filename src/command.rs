//! Text command surface.
//!
//! Single character commands typed on a console. They reach the conductor
//! through a [`CommandQueue`], which a console task or an interrupt may feed
//! while the tick loop drains it.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::error::Error;

/// Help text listing every command.
pub const HELP: &str = "\
x  quit
j  back to gamepad control
d  random flicker
r  sweep
t  showcase
p  progress bar
h  this help";

const COMMAND_QUIT: char = 'x';
const COMMAND_GAMEPAD: char = 'j';
const COMMAND_FLICKER: char = 'd';
const COMMAND_SWEEP: char = 'r';
const COMMAND_SHOWCASE: char = 't';
const COMMAND_PROGRESS: char = 'p';
const COMMAND_HELP: char = 'h';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Play the goodbye sweep and stop.
    Quit,
    /// Return to gamepad control.
    Gamepad,
    Flicker,
    Sweep,
    Showcase,
    Progress,
    Help,
}

impl Command {
    pub const fn from_char(c: char) -> Option<Self> {
        Some(match c {
            COMMAND_QUIT => Self::Quit,
            COMMAND_GAMEPAD => Self::Gamepad,
            COMMAND_FLICKER => Self::Flicker,
            COMMAND_SWEEP => Self::Sweep,
            COMMAND_SHOWCASE => Self::Showcase,
            COMMAND_PROGRESS => Self::Progress,
            COMMAND_HELP => Self::Help,
            _ => return None,
        })
    }

    pub const fn as_char(self) -> char {
        match self {
            Self::Quit => COMMAND_QUIT,
            Self::Gamepad => COMMAND_GAMEPAD,
            Self::Flicker => COMMAND_FLICKER,
            Self::Sweep => COMMAND_SWEEP,
            Self::Showcase => COMMAND_SHOWCASE,
            Self::Progress => COMMAND_PROGRESS,
            Self::Help => COMMAND_HELP,
        }
    }

    /// Parse a console line, surrounding whitespace is ignored.
    pub fn parse_from_str(s: &str) -> Option<Self> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
    }
}

/// Commands waiting for the conductor.
///
/// `Quit` preempts: submitting it drops whatever is still pending, so a full
/// queue of demos can never hold the stop request back.
pub struct CommandQueue<const SIZE: usize> {
    pending: Mutex<RefCell<Deque<Command, SIZE>>>,
}

impl<const SIZE: usize> CommandQueue<SIZE> {
    pub const fn new() -> Self {
        Self {
            pending: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Handle for the console side.
    pub const fn sender(&self) -> CommandSender<'_, SIZE> {
        CommandSender { queue: self }
    }

    /// Handle for the conductor side.
    pub const fn receiver(&self) -> CommandReceiver<'_, SIZE> {
        CommandReceiver { queue: self }
    }

    /// Queue a command behind the pending ones.
    pub fn submit(&self, command: Command) -> Result<(), Error> {
        critical_section::with(|cs| {
            let mut pending = self.pending.borrow(cs).borrow_mut();
            if command == Command::Quit {
                pending.clear();
            }
            pending.push_back(command).map_err(|_| Error::CommandQueueFull)
        })
    }

    /// Parse a console line and queue the command it names.
    pub fn submit_line(&self, line: &str) -> Result<Command, Error> {
        let command = Command::parse_from_str(line).ok_or(Error::UnknownCommand)?;
        self.submit(command)?;
        Ok(command)
    }

    /// Oldest pending command.
    pub fn pop(&self) -> Option<Command> {
        critical_section::with(|cs| self.pending.borrow(cs).borrow_mut().pop_front())
    }

    /// Number of commands not yet taken by the conductor.
    pub fn pending(&self) -> usize {
        critical_section::with(|cs| self.pending.borrow(cs).borrow().len())
    }

    fn discard(&self) {
        critical_section::with(|cs| self.pending.borrow(cs).borrow_mut().clear());
    }
}

impl<const SIZE: usize> Default for CommandQueue<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub struct CommandSender<'a, const SIZE: usize> {
    queue: &'a CommandQueue<SIZE>,
}

impl<const SIZE: usize> CommandSender<'_, SIZE> {
    pub fn submit(&self, command: Command) -> Result<(), Error> {
        self.queue.submit(command)
    }

    pub fn submit_line(&self, line: &str) -> Result<Command, Error> {
        self.queue.submit_line(line)
    }
}

#[derive(Clone, Copy)]
pub struct CommandReceiver<'a, const SIZE: usize> {
    queue: &'a CommandQueue<SIZE>,
}

impl<const SIZE: usize> CommandReceiver<'_, SIZE> {
    pub fn pop(&self) -> Option<Command> {
        self.queue.pop()
    }

    /// Drop pending commands once the conductor stops taking them.
    pub fn discard(&self) {
        self.queue.discard();
    }
}
