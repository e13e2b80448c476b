//! Command transports.
//!
//! Commands travel as a single ASCII byte in a UDP datagram. Nothing is
//! acknowledged or retried.

use crate::{
    command::{Command, CommandSink},
    Error, Result,
};
use log::{debug, info};
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};

/// Sends each command as a one-byte UDP datagram
pub struct UdpCommandSink {
    socket: UdpSocket,
    target: SocketAddr,
}

impl UdpCommandSink {
    /// Bind an ephemeral local socket aimed at `address:port`
    ///
    /// # Errors
    ///
    /// Returns an error if the address does not resolve or no socket can be bound
    pub fn new(address: &str, port: u16) -> Result<Self> {
        let target = (address, port)
            .to_socket_addrs()
            .map_err(|e| Error::Transport(format!("Failed to resolve {address}:{port}: {e}")))?
            .next()
            .ok_or_else(|| Error::Transport(format!("No address found for {address}:{port}")))?;

        let local = if target.is_ipv4() {
            SocketAddr::from(([0u8; 4], 0))
        } else {
            SocketAddr::from(([0u16; 8], 0))
        };
        let socket = UdpSocket::bind(local)?;

        info!("Sending commands to {target} via UDP");
        Ok(Self { socket, target })
    }

    /// Destination of the datagrams
    #[must_use]
    pub const fn target(&self) -> SocketAddr {
        self.target
    }
}

impl CommandSink for UdpCommandSink {
    fn send(&mut self, command: Command) -> Result<()> {
        let sent = self
            .socket
            .send_to(&[command.as_byte()], self.target)
            .map_err(|e| Error::Transport(format!("send to {} failed: {e}", self.target)))?;
        debug!("{sent} byte datagram sent to {}", self.target);
        Ok(())
    }
}

/// Logs commands instead of sending them
#[derive(Debug, Default)]
pub struct LogCommandSink {
    sent: usize,
}

impl LogCommandSink {
    /// Create a dry-run sink
    #[must_use]
    pub const fn new() -> Self {
        Self { sent: 0 }
    }

    /// Number of commands logged
    #[must_use]
    pub const fn sent(&self) -> usize {
        self.sent
    }
}

impl CommandSink for LogCommandSink {
    fn send(&mut self, command: Command) -> Result<()> {
        self.sent += 1;
        info!("[dry run] would send {}", command.as_byte() as char);
        Ok(())
    }
}
