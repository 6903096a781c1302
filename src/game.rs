use core::fmt;

use crate::{
    board::Board,
    common::{BoardError, Move, Symbol},
    config::GameConfig,
    oracle::{self, Verdict},
};

/// Current status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Symbol),
    Draw,
}

impl GameStatus {
    /// Final result, `None` while the game is still running.
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            GameStatus::InProgress => None,
            GameStatus::Won(s) => Some(Outcome::Won(s)),
            GameStatus::Draw => Some(Outcome::Draw),
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Won(Symbol),
    Draw,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Won(s) => write!(f, "{} wins", s),
            Outcome::Draw => f.write_str("draw"),
        }
    }
}

/// Reasons a move is refused by a [`GameSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// The game already reached a terminal state.
    GameOver,
    /// `mover` tried to play while it was `expected`'s turn.
    OutOfTurn { mover: Symbol, expected: Symbol },
    Board(BoardError),
}

impl From<BoardError> for MoveError {
    fn from(err: BoardError) -> Self {
        MoveError::Board(err)
    }
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::GameOver => f.write_str("game is already over"),
            MoveError::OutOfTurn { mover, expected } => {
                write!(f, "{} moved out of turn, it is {}'s turn", mover, expected)
            }
            MoveError::Board(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MoveError {}

/// State of one game between the local player and its opponent.
///
/// Turn numbers are 1-based. While the game is in progress the number of
/// filled cells is always `turn_number() - 1`; the turn number stays on the
/// deciding move once the game ends.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    board: Board,
    local: Symbol,
    first_mover: Symbol,
    current: Symbol,
    turn: usize,
    status: GameStatus,
}

impl GameSession {
    /// Fresh game on an empty board with `first_mover` to play turn 1.
    pub fn new(config: GameConfig, local: Symbol, first_mover: Symbol) -> Self {
        Self {
            config,
            board: Board::new(config.board_size),
            local,
            first_mover,
            current: first_mover,
            turn: 1,
            status: GameStatus::InProgress,
        }
    }

    /// Next game on the same terms with the opening move handed to the other player.
    pub fn rematch(&self) -> Self {
        Self::new(self.config, self.local, self.first_mover.opponent())
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    /// Read-only board view.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn local_symbol(&self) -> Symbol {
        self.local
    }

    pub fn opponent_symbol(&self) -> Symbol {
        self.local.opponent()
    }

    pub fn first_mover(&self) -> Symbol {
        self.first_mover
    }

    pub fn current_symbol(&self) -> Symbol {
        self.current
    }

    pub fn turn_number(&self) -> usize {
        self.turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_local_turn(&self) -> bool {
        self.status == GameStatus::InProgress && self.current == self.local
    }

    /// Validate a move by `mover` without changing anything.
    pub fn check(&self, mv: Move, mover: Symbol) -> Result<(), MoveError> {
        if self.status.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if mover != self.current {
            return Err(MoveError::OutOfTurn {
                mover,
                expected: self.current,
            });
        }
        self.board.check(mv)?;
        Ok(())
    }

    pub fn apply_local(&mut self, mv: Move) -> Result<GameStatus, MoveError> {
        self.play(mv, self.local)
    }

    pub fn apply_remote(&mut self, mv: Move) -> Result<GameStatus, MoveError> {
        self.play(mv, self.local.opponent())
    }

    /// Apply a move by `mover`, evaluate the board and advance the turn.
    ///
    /// On error the session is left untouched.
    pub fn play(&mut self, mv: Move, mover: Symbol) -> Result<GameStatus, MoveError> {
        self.check(mv, mover)?;
        self.board.apply(mv, mover)?;

        let n = self.config.board_size;
        self.status = match oracle::evaluate(&self.board, self.config.win_length) {
            Verdict::Win(s) => GameStatus::Won(s),
            Verdict::Draw => GameStatus::Draw,
            // only reachable if the board and turn counter disagree
            Verdict::Undecided if self.turn >= n * n => GameStatus::Draw,
            Verdict::Undecided => {
                self.current = self.current.opponent();
                self.turn += 1;
                GameStatus::InProgress
            }
        };
        Ok(self.status)
    }
}
