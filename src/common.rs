//! Common types for the game: player symbols, moves and board errors.

use core::fmt;

/// Marker occupying a board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Symbol {
    /// Played by the listening peer.
    X,
    /// Played by the connecting peer.
    O,
}

impl Symbol {
    /// The other player's symbol.
    pub fn opponent(self) -> Self {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::X => f.write_str("X"),
            Symbol::O => f.write_str("O"),
        }
    }
}

/// A zero-indexed (row, col) placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Row or column lies outside `[0, size)`.
    OutOfBounds { row: usize, col: usize, size: usize },
    /// Cell already holds a symbol.
    Occupied { row: usize, col: usize, by: Symbol },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::OutOfBounds { row, col, size } => {
                write!(f, "cell ({}, {}) is outside a {}x{} board", row, col, size, size)
            }
            BoardError::Occupied { row, col, by } => {
                write!(f, "cell ({}, {}) is already taken by {}", row, col, by)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
