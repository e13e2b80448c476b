//! Mode-dependent interpretation of finalized gestures.
//!
//! | Mode    | 2 blinks | 3 blinks | 4 blinks      | 5 blinks          |
//! |---------|----------|----------|---------------|-------------------|
//! | Morse   | dot      | dash     | commit letter | switch to Control |
//! | Control | Stop     | Forward  | Backward      | switch to Morse   |
//!
//! Any other count decodes to nothing.

use crate::{command::Command, morse::MorseSymbol};
use std::fmt;

/// Interpretation context for gestures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Gestures spell Morse code
    #[default]
    Morse,
    /// Gestures drive the actuator
    Control,
}

impl Mode {
    /// The other mode
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Morse => Self::Control,
            Self::Control => Self::Morse,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Morse => write!(f, "MORSE"),
            Self::Control => write!(f, "CONTROL"),
        }
    }
}

/// What a gesture asks the decoder to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Append a symbol to the Morse buffer
    AppendSymbol(MorseSymbol),
    /// Decode the Morse buffer into the output word
    CommitLetter,
    /// Send a command to the actuator
    Command(Command),
    /// Switch to the given mode
    SwitchMode(Mode),
}

/// Look up the action for a gesture of `count` blinks in `mode`
#[must_use]
pub const fn decode(mode: Mode, count: u32) -> Option<Action> {
    match (mode, count) {
        (Mode::Morse, 2) => Some(Action::AppendSymbol(MorseSymbol::Dot)),
        (Mode::Morse, 3) => Some(Action::AppendSymbol(MorseSymbol::Dash)),
        (Mode::Morse, 4) => Some(Action::CommitLetter),
        (Mode::Control, 2) => Some(Action::Command(Command::Stop)),
        (Mode::Control, 3) => Some(Action::Command(Command::Forward)),
        (Mode::Control, 4) => Some(Action::Command(Command::Backward)),
        (_, 5) => Some(Action::SwitchMode(mode.toggled())),
        _ => None,
    }
}
