#![cfg(feature = "std")]

use std::net::SocketAddr;
use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;

use crate::{
    common::{Move, Symbol},
    config::{validate_port, GameConfig, FIRST_MOVER, WIN_LENGTH},
    error::SessionError,
    game::{GameSession, GameStatus, MoveError},
    observer::GameObserver,
    transport::{self, ChannelError, ChannelListener, MoveChannel, MoveReceiver, MoveSender, Role},
};

/// Drives one connection: applies local and remote moves to the shared
/// [`GameSession`] and reports every change to the observer.
///
/// Cloning yields another handle to the same session.
pub struct Coordinator<O: GameObserver> {
    shared: Arc<Shared<O>>,
}

impl<O: GameObserver> Clone for Coordinator<O> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

struct Shared<O> {
    observer: O,
    win_length: usize,
    slot: Mutex<Slot>,
}

struct Slot {
    phase: Phase,
    /// Bumped for every game so stale receive loops can tell they are stale.
    generation: u64,
}

enum Phase {
    Idle,
    Listening { accept: JoinHandle<()> },
    Active(Active),
}

struct Active {
    game: GameSession,
    generation: u64,
    sender: MoveSender,
    receiver: Arc<Mutex<MoveReceiver>>,
    /// Opening move of the next game, read before the local rematch request.
    pending: Option<Move>,
    stop: Option<oneshot::Sender<()>>,
    reader: Option<JoinHandle<()>>,
}

impl Active {
    fn stop_reader(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }
}

impl<O: GameObserver> Coordinator<O> {
    pub fn new(observer: O) -> Self {
        Self::with_win_length(observer, WIN_LENGTH)
    }

    pub fn with_win_length(observer: O, win_length: usize) -> Self {
        Self {
            shared: Arc::new(Shared {
                observer,
                win_length,
                slot: Mutex::new(Slot {
                    phase: Phase::Idle,
                    generation: 0,
                }),
            }),
        }
    }

    /// Copy of the current game, if a session is running.
    pub async fn game(&self) -> Option<GameSession> {
        match &self.shared.slot.lock().await.phase {
            Phase::Active(active) => Some(active.game.clone()),
            _ => None,
        }
    }

    pub async fn is_connected(&self) -> bool {
        matches!(self.shared.slot.lock().await.phase, Phase::Active(_))
    }

    /// Bind `port` and accept one opponent in the background.
    ///
    /// Returns the bound address once listening. Accept or handshake
    /// failures are reported through `on_fatal_error` and leave the
    /// coordinator idle so a new start can be attempted.
    pub async fn start_as_listener(
        &self,
        port: u16,
        board_size: usize,
    ) -> Result<SocketAddr, SessionError> {
        GameConfig::with_win_length(board_size, self.shared.win_length)?;
        validate_port(port)?;

        let mut guard = self.shared.slot.lock().await;
        if !matches!(guard.phase, Phase::Idle) {
            return Err(SessionError::AlreadyStarted);
        }
        let listener = ChannelListener::bind(port, board_size)
            .await
            .map_err(SessionError::TransportSetup)?;
        let addr = listener
            .local_addr()
            .map_err(|e| SessionError::TransportSetup(ChannelError::Io(e)))?;
        info!("waiting for an opponent on {}", addr);

        let this = self.clone();
        let accept = tokio::spawn(async move {
            let result = match listener.accept().await {
                Ok(channel) => this.install(channel, true).await,
                Err(e) => Err(SessionError::from(e)),
            };
            if let Err(e) = result {
                this.abandon_listen(&e).await;
            }
        });
        guard.phase = Phase::Listening { accept };
        Ok(addr)
    }

    /// Dial `host:port`, receive the board size and start the first game.
    pub async fn start_as_connector(&self, host: &str, port: u16) -> Result<(), SessionError> {
        if !matches!(self.shared.slot.lock().await.phase, Phase::Idle) {
            return Err(SessionError::AlreadyStarted);
        }
        let channel = transport::connect(host, port).await?;
        self.install(channel, false).await
    }

    /// Start a session on a channel that already completed its handshake.
    pub async fn attach(&self, channel: MoveChannel) -> Result<(), SessionError> {
        self.install(channel, false).await
    }

    async fn install(&self, mut channel: MoveChannel, from_listener: bool) -> Result<(), SessionError> {
        let config = match GameConfig::with_win_length(channel.board_size(), self.shared.win_length) {
            Ok(config) => config,
            Err(e) => {
                channel.close().await;
                return Err(e.into());
            }
        };
        let local = match channel.role() {
            Role::Listener => Symbol::X,
            Role::Connector => Symbol::O,
        };

        let mut guard = self.shared.slot.lock().await;
        let slot = &mut *guard;
        let ready = match slot.phase {
            Phase::Idle => !from_listener,
            Phase::Listening { .. } => from_listener,
            Phase::Active(_) => false,
        };
        if !ready {
            drop(guard);
            channel.close().await;
            return Err(SessionError::AlreadyStarted);
        }

        let (sender, receiver) = channel.split();
        slot.generation += 1;
        let mut active = Active {
            game: GameSession::new(config, local, FIRST_MOVER),
            generation: slot.generation,
            sender,
            receiver: Arc::new(Mutex::new(receiver)),
            pending: None,
            stop: None,
            reader: None,
        };
        info!(
            "session started: playing {} on a {}x{} board",
            local, config.board_size, config.board_size
        );
        self.shared
            .observer
            .on_connection_established(local, config.board_size);
        self.begin_game(&mut active);
        slot.phase = Phase::Active(active);
        Ok(())
    }

    /// Spawn the receive loop for the current game and announce turn 1.
    fn begin_game(&self, active: &mut Active) {
        let (stop_tx, stop_rx) = oneshot::channel();
        let this = self.clone();
        let receiver = Arc::clone(&active.receiver);
        let generation = active.generation;
        active.stop = Some(stop_tx);
        active.reader = Some(tokio::spawn(async move {
            this.receive_loop(receiver, stop_rx, generation).await;
        }));
        self.shared
            .observer
            .on_turn_changed(active.game.turn_number(), active.game.is_local_turn());
    }

    /// Play a move for the local player.
    ///
    /// An illegal move is refused with [`SessionError::ProtocolViolation`]
    /// and leaves the session untouched. A send failure ends the session.
    pub async fn submit_local_move(&self, row: usize, col: usize) -> Result<GameStatus, SessionError> {
        let mv = Move::new(row, col);
        let mut guard = self.shared.slot.lock().await;
        let failure = {
            let active = match &mut guard.phase {
                Phase::Active(active) => active,
                _ => return Err(SessionError::NotConnected),
            };
            let symbol = active.game.local_symbol();
            active.game.check(mv, symbol)?;
            match active.sender.send(mv).await {
                Ok(()) => {
                    let status = active.game.apply_local(mv)?;
                    info!("played {} as {}", mv, symbol);
                    self.announce(active, mv, symbol, status);
                    return Ok(status);
                }
                Err(e) => SessionError::TransportIo(e),
            }
        };
        self.teardown(&mut guard, &failure).await;
        Err(failure)
    }

    /// Start the next game on the same connection with the opening move
    /// handed to the other player. Both peers must request it.
    pub async fn request_rematch(&self) -> Result<(), SessionError> {
        let mut guard = self.shared.slot.lock().await;
        let failure = {
            let slot = &mut *guard;
            let active = match &mut slot.phase {
                Phase::Active(active) => active,
                _ => return Err(SessionError::NotConnected),
            };
            if !active.game.status().is_terminal() {
                return Err(SessionError::GameInProgress);
            }
            active.stop_reader();
            slot.generation += 1;
            active.generation = slot.generation;
            active.game = active.game.rematch();
            info!("rematch: {} opens", active.game.first_mover());
            self.begin_game(active);
            match active.pending.take() {
                None => return Ok(()),
                Some(mv) => match self.apply_remote(active, mv) {
                    Ok(_) => return Ok(()),
                    Err(e) => e,
                },
            }
        };
        self.teardown(&mut guard, &failure).await;
        Err(failure)
    }

    /// Close the connection and stop all background work. Idempotent.
    pub async fn shutdown(&self) {
        let phase = {
            let mut guard = self.shared.slot.lock().await;
            std::mem::replace(&mut guard.phase, Phase::Idle)
        };
        match phase {
            Phase::Idle => {}
            Phase::Listening { accept } => {
                info!("no longer waiting for an opponent");
                accept.abort();
            }
            Phase::Active(mut active) => {
                info!("shutting down session");
                active.sender.close().await;
                active.stop_reader();
                if let Some(reader) = active.reader.take() {
                    let _ = reader.await;
                }
            }
        }
    }

    async fn receive_loop(
        self,
        receiver: Arc<Mutex<MoveReceiver>>,
        mut stop: oneshot::Receiver<()>,
        generation: u64,
    ) {
        let mut reader = receiver.lock().await;
        loop {
            let result = tokio::select! {
                biased;
                _ = &mut stop => {
                    debug!("receive loop of game {} stopped", generation);
                    return;
                }
                result = reader.recv() => result,
            };

            // The game may have ended, or a rematch begun, while we waited.
            let mut guard = self.shared.slot.lock().await;
            let failure = {
                let active = match &mut guard.phase {
                    Phase::Active(active) if Arc::ptr_eq(&active.receiver, &receiver) => active,
                    _ => return,
                };
                let current = active.generation == generation;
                match result {
                    Ok(mv) if active.game.status().is_terminal() => {
                        if active.pending.is_some() {
                            SessionError::ProtocolViolation(MoveError::GameOver)
                        } else {
                            debug!("holding {} until the rematch starts", mv);
                            active.pending = Some(mv);
                            return;
                        }
                    }
                    Ok(mv) => match self.apply_remote(active, mv) {
                        Ok(status) if current && !status.is_terminal() => continue,
                        Ok(_) => return,
                        Err(e) => e,
                    },
                    Err(e) if e.is_closed_locally() => return,
                    Err(e) => SessionError::TransportIo(e),
                }
            };
            self.teardown(&mut guard, &failure).await;
            return;
        }
    }

    fn apply_remote(&self, active: &mut Active, mv: Move) -> Result<GameStatus, SessionError> {
        let symbol = active.game.opponent_symbol();
        let status = active.game.apply_remote(mv)?;
        info!("opponent played {} as {}", mv, symbol);
        self.announce(active, mv, symbol, status);
        Ok(status)
    }

    fn announce(&self, active: &mut Active, mv: Move, symbol: Symbol, status: GameStatus) {
        let observer = &self.shared.observer;
        observer.on_cell_filled(mv.row, mv.col, symbol);
        match status.outcome() {
            Some(outcome) => {
                info!(
                    "game over on turn {}: {}",
                    active.game.turn_number(),
                    outcome
                );
                active.stop_reader();
                observer.on_game_over(outcome);
            }
            None => observer.on_turn_changed(active.game.turn_number(), active.game.is_local_turn()),
        }
    }

    /// Close the channel, drop the session and report `err`, once.
    async fn teardown(&self, slot: &mut Slot, err: &SessionError) {
        if let Phase::Active(mut active) = std::mem::replace(&mut slot.phase, Phase::Idle) {
            active.sender.close().await;
            active.stop_reader();
            warn!("session terminated: {}", err);
            self.shared.observer.on_fatal_error(&err.to_string());
        }
    }

    async fn abandon_listen(&self, err: &SessionError) {
        let mut guard = self.shared.slot.lock().await;
        if matches!(guard.phase, Phase::Listening { .. }) {
            guard.phase = Phase::Idle;
            warn!("listening failed: {}", err);
            self.shared.observer.on_fatal_error(&err.to_string());
        }
    }
}
