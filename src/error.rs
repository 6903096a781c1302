#![cfg(feature = "std")]

use crate::config::ConfigError;
use crate::game::MoveError;
use crate::transport::ChannelError;

/// Errors surfaced by the [`Coordinator`](crate::Coordinator).
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Rejected before any network I/O; the caller may retry.
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigError),
    /// Bind, accept or dial failed; the caller may retry.
    #[error("could not establish a connection: {0}")]
    TransportSetup(#[source] ChannelError),
    /// The established connection failed; the session is over.
    #[error("connection lost: {0}")]
    TransportIo(#[source] ChannelError),
    /// Illegal move. Fatal when it comes from the peer.
    #[error("protocol violation: {0}")]
    ProtocolViolation(#[from] MoveError),
    #[error("no opponent is connected")]
    NotConnected,
    #[error("a session is already running")]
    AlreadyStarted,
    #[error("the current game is still in progress")]
    GameInProgress,
}

impl From<ChannelError> for SessionError {
    fn from(err: ChannelError) -> Self {
        if err.is_setup() {
            SessionError::TransportSetup(err)
        } else {
            SessionError::TransportIo(err)
        }
    }
}
