//! Actuator commands and the last-value deduplicating dispatcher.

use crate::Result;
use log::{info, warn};
use std::fmt;

/// Command understood by the actuator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Halt
    Stop,
    /// Drive forward
    Forward,
    /// Drive backward
    Backward,
}

impl Command {
    /// Single ASCII byte sent on the wire
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::Stop => b'S',
            Self::Forward => b'F',
            Self::Backward => b'B',
        }
    }

    /// Parse a wire byte
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'S' => Some(Self::Stop),
            b'F' => Some(Self::Forward),
            b'B' => Some(Self::Backward),
            _ => None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stop => write!(f, "STOP"),
            Self::Forward => write!(f, "FORWARD"),
            Self::Backward => write!(f, "BACKWARD"),
        }
    }
}

/// Fire-and-forget destination for commands
pub trait CommandSink {
    /// Deliver one command, best effort
    ///
    /// # Errors
    ///
    /// Returns an error if the command could not be handed to the transport
    fn send(&mut self, command: Command) -> Result<()>;
}

/// Suppresses repeats of the most recently sent command
#[derive(Debug, Clone, Default)]
pub struct CommandDispatcher {
    last_sent: Option<Command>,
}

impl CommandDispatcher {
    /// Create a dispatcher that has sent nothing yet
    #[must_use]
    pub const fn new() -> Self {
        Self { last_sent: None }
    }

    /// Decide whether `command` should go out, recording it if so
    pub fn filter(&mut self, command: Command) -> Option<Command> {
        if self.last_sent == Some(command) {
            return None;
        }
        self.last_sent = Some(command);
        Some(command)
    }

    /// Filter `command` and hand it to `sink` if it differs from the last one
    ///
    /// Returns whether a transmission was attempted. Sink failures are logged
    /// and swallowed; the command still counts as sent.
    pub fn dispatch<S: CommandSink + ?Sized>(&mut self, command: Command, sink: &mut S) -> bool {
        let Some(command) = self.filter(command) else {
            return false;
        };
        transmit(sink, command);
        true
    }

    /// Most recently sent command
    #[must_use]
    pub const fn last_sent(&self) -> Option<Command> {
        self.last_sent
    }
}

/// Send through `sink`, logging instead of propagating failures
pub fn transmit<S: CommandSink + ?Sized>(sink: &mut S, command: Command) {
    match sink.send(command) {
        Ok(()) => info!("Sent {}", command.as_byte() as char),
        Err(e) => warn!("Error sending {}: {}", command.as_byte() as char, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[derive(Default)]
    struct RecordingSink {
        sent: Vec<Command>,
        fail: bool,
    }

    impl CommandSink for RecordingSink {
        fn send(&mut self, command: Command) -> Result<()> {
            self.sent.push(command);
            if self.fail {
                return Err(Error::Transport("unreachable".to_string()));
            }
            Ok(())
        }
    }

    #[test]
    fn test_wire_bytes() {
        for command in [Command::Stop, Command::Forward, Command::Backward] {
            assert_eq!(Command::from_byte(command.as_byte()), Some(command));
        }
        assert_eq!(Command::Stop.as_byte(), b'S');
        assert_eq!(Command::Forward.as_byte(), b'F');
        assert_eq!(Command::Backward.as_byte(), b'B');
        assert_eq!(Command::from_byte(b'X'), None);
    }

    #[test]
    fn test_repeats_coalesced() {
        let mut dispatcher = CommandDispatcher::new();
        let mut sink = RecordingSink::default();

        assert!(dispatcher.dispatch(Command::Stop, &mut sink));
        assert!(!dispatcher.dispatch(Command::Stop, &mut sink));
        assert!(dispatcher.dispatch(Command::Forward, &mut sink));
        assert!(dispatcher.dispatch(Command::Stop, &mut sink));

        assert_eq!(sink.sent, vec![Command::Stop, Command::Forward, Command::Stop]);
        assert_eq!(dispatcher.last_sent(), Some(Command::Stop));
    }

    #[test]
    fn test_failure_still_recorded() {
        let mut dispatcher = CommandDispatcher::new();
        let mut sink = RecordingSink {
            fail: true,
            ..RecordingSink::default()
        };

        assert!(dispatcher.dispatch(Command::Backward, &mut sink));
        assert!(!dispatcher.dispatch(Command::Backward, &mut sink));
        assert_eq!(sink.sent.len(), 1);
    }
}
