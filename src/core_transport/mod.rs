//! Line-oriented socket transport.
//!
//! One transport backs the control channel, and a short-lived one is opened
//! for every data channel. The engine only talks to these traits so the
//! protocol logic can run against a scripted server in tests.

pub mod tcp;

#[cfg(test)]
pub mod fake;

pub use tcp::{TcpConnector, TcpDataListener, TcpLineTransport};

use async_trait::async_trait;
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// A bidirectional text-line channel.
#[async_trait]
pub trait LineTransport: Send {
    /// Writes `line` verbatim and flushes. Callers add the terminator.
    async fn send_line(&mut self, line: &str) -> io::Result<()>;

    /// Reads the next line without its trailing CR/LF, or `None` at end of stream.
    async fn receive_line(&mut self) -> io::Result<Option<String>>;

    async fn close(&mut self) -> io::Result<()>;

    fn local_addr(&self) -> Option<SocketAddr>;
}

/// Accepts exactly one inbound data connection for active mode.
#[async_trait]
pub trait DataListener: Send {
    fn local_port(&self) -> u16;

    async fn accept(&mut self, timeout: Duration) -> io::Result<Box<dyn LineTransport>>;
}

/// Opens transports and listeners.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn open(&self, host: &str, port: u16) -> io::Result<Box<dyn LineTransport>>;

    async fn listen(&self, bind_ip: IpAddr) -> io::Result<Box<dyn DataListener>>;
}
