//! Move Channel: the handshake plus the move record stream over one connection.

use std::io;
use std::sync::Arc;

use tokio::sync::watch;

pub mod channel;
pub mod in_memory;
pub mod tcp;

pub use channel::{MoveChannel, MoveReceiver, MoveSender};
pub use tcp::{connect, ChannelListener};

/// Which side of the connection a channel was set up as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Accepted the connection and sent the board size.
    Listener,
    /// Dialed out and received the board size.
    Connector,
}

#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("failed to listen on port {port}: {source}")]
    Bind { port: u16, source: io::Error },
    #[error("failed to accept a connection: {0}")]
    Accept(io::Error),
    #[error("failed to connect to {addr}: {source}")]
    Connect { addr: String, source: io::Error },
    #[error("peer announced an invalid board size {0}")]
    Handshake(u32),
    #[error("connection closed by peer")]
    PeerClosed,
    #[error("channel was closed locally")]
    ClosedLocally,
    #[error("channel already failed")]
    AlreadyFailed,
    #[error("transport error: {0}")]
    Io(#[source] io::Error),
    #[error("encoding error: {0}")]
    Codec(#[from] bincode::Error),
}

impl ChannelError {
    pub(crate) fn from_io(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::UnexpectedEof | io::ErrorKind::BrokenPipe => ChannelError::PeerClosed,
            _ => ChannelError::Io(e),
        }
    }

    /// `true` when the failure was caused by our own `close()`.
    pub fn is_closed_locally(&self) -> bool {
        matches!(self, ChannelError::ClosedLocally)
    }

    /// Failures that happen before a connection exists.
    pub fn is_setup(&self) -> bool {
        matches!(
            self,
            ChannelError::Bind { .. } | ChannelError::Accept(_) | ChannelError::Connect { .. }
        )
    }
}

/// Shared close flag for both halves of a channel.
///
/// Closing wakes a receiver blocked in [`MoveReceiver::recv`].
#[derive(Debug, Clone)]
pub struct CloseHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl CloseHandle {
    pub(crate) fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    /// Mark the channel closed. Returns `true` only for the first call.
    pub fn close(&self) -> bool {
        !self.tx.send_replace(true)
    }

    pub fn is_closed(&self) -> bool {
        *self.tx.borrow()
    }
}
