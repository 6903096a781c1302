//! Commonly used types and utilities for ease of import.

pub use crate::{
    BotPlayer, ChannelObserver, Coordinator, GameEvent, GameObserver, GameSession, GameStatus,
    Move, Outcome, SessionError, Symbol,
};

pub use crate::transport::{in_memory, ChannelListener, MoveChannel};
