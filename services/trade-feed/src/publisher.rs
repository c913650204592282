//! Trade publishers
//!
//! A sink receives each trade exactly once, after the matching call
//! that produced it has returned. Publishing never mutates the book
//! and publish failures never propagate back; they are logged and
//! dropped.

use std::io;
use std::net::{SocketAddr, UdpSocket};

use lob_types::Trade;
use tracing::{debug, warn};

use crate::wire;

/// Downstream consumer of executed trades.
pub trait TradeSink {
    /// One-shot delivery; implementations swallow their own failures.
    fn publish(&mut self, trade: &Trade);
}

/// Publishes trade lines as UDP datagrams on a named channel.
///
/// The channel name identifies the stream for subscribers; the
/// datagram payload is the channel followed by the wire line. The
/// socket is non-blocking and a full send buffer drops the datagram,
/// matching the fire-and-forget contract.
pub struct UdpPublisher {
    socket: UdpSocket,
    dest: SocketAddr,
    channel: String,
}

impl UdpPublisher {
    pub fn new(dest: &str, channel: impl Into<String>) -> io::Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        socket.set_nonblocking(true)?;

        let dest: SocketAddr = dest
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        Ok(Self {
            socket,
            dest,
            channel: channel.into(),
        })
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }
}

impl TradeSink for UdpPublisher {
    fn publish(&mut self, trade: &Trade) {
        let payload = format!("{} {}", self.channel, wire::encode(trade));

        match self.socket.send_to(payload.as_bytes(), self.dest) {
            Ok(_) => debug!(channel = %self.channel, trade_id = %trade.id, "trade published"),
            Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => {}
            Err(e) => warn!(channel = %self.channel, error = %e, "trade publish failed"),
        }
    }
}

/// In-memory sink capturing wire lines, for tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub lines: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TradeSink for MemorySink {
    fn publish(&mut self, trade: &Trade) {
        self.lines.push(wire::encode(trade));
    }
}
