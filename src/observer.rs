#![cfg(feature = "std")]

//! Notifications from the coordinator to the presentation layer.

use tokio::sync::mpsc;

use crate::common::Symbol;
use crate::game::Outcome;

/// Receives state changes of a running session.
///
/// Callbacks run while the session state is locked: they must return
/// quickly and must not call back into the coordinator synchronously.
pub trait GameObserver: Send + Sync + 'static {
    /// Connection is up and the board size is known.
    fn on_connection_established(&self, _local: Symbol, _board_size: usize) {}

    fn on_cell_filled(&self, _row: usize, _col: usize, _symbol: Symbol) {}

    /// A new turn started (also fired for turn 1 of every game).
    fn on_turn_changed(&self, _turn: usize, _is_local_turn: bool) {}

    fn on_game_over(&self, _outcome: Outcome) {}

    /// The session was torn down. Fired at most once per session.
    fn on_fatal_error(&self, _message: &str) {}
}

/// Observer that ignores every notification.
pub struct NoopObserver;

impl GameObserver for NoopObserver {}

/// One observer callback, as a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Connected { local: Symbol, board_size: usize },
    CellFilled { row: usize, col: usize, symbol: Symbol },
    TurnChanged { turn: usize, is_local_turn: bool },
    GameOver(Outcome),
    FatalError(String),
}

/// Forwards every callback into an unbounded channel.
pub struct ChannelObserver {
    tx: mpsc::UnboundedSender<GameEvent>,
}

impl ChannelObserver {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<GameEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn forward(&self, event: GameEvent) {
        // receiver gone means nobody is listening anymore
        let _ = self.tx.send(event);
    }
}

impl GameObserver for ChannelObserver {
    fn on_connection_established(&self, local: Symbol, board_size: usize) {
        self.forward(GameEvent::Connected { local, board_size });
    }

    fn on_cell_filled(&self, row: usize, col: usize, symbol: Symbol) {
        self.forward(GameEvent::CellFilled { row, col, symbol });
    }

    fn on_turn_changed(&self, turn: usize, is_local_turn: bool) {
        self.forward(GameEvent::TurnChanged {
            turn,
            is_local_turn,
        });
    }

    fn on_game_over(&self, outcome: Outcome) {
        self.forward(GameEvent::GameOver(outcome));
    }

    fn on_fatal_error(&self, message: &str) {
        self.forward(GameEvent::FatalError(message.to_string()));
    }
}
