//! Game constants and configuration checks run before any network I/O.

use core::fmt;

use crate::common::Symbol;

/// Contiguous same-symbol cells needed to win.
pub const WIN_LENGTH: usize = 3;
pub const MIN_BOARD_SIZE: usize = 3;
pub const MAX_BOARD_SIZE: usize = 10;
pub const DEFAULT_BOARD_SIZE: usize = 3;

/// Symbol that opens the first game of a connection.
pub const FIRST_MOVER: Symbol = Symbol::X;

/// Port the host listens on when none is given.
pub const DEFAULT_PORT: u16 = 9099;
/// Lowest port a host may listen on; everything below is privileged.
pub const MIN_PORT: u16 = 1024;

/// Rejected configuration values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    BoardSize(usize),
    WinLength { win_length: usize, board_size: usize },
    Port(u16),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::BoardSize(n) => write!(
                f,
                "board size {} is outside {}..={}",
                n, MIN_BOARD_SIZE, MAX_BOARD_SIZE
            ),
            ConfigError::WinLength {
                win_length,
                board_size,
            } => write!(
                f,
                "win length {} does not fit a {}x{} board",
                win_length, board_size, board_size
            ),
            ConfigError::Port(p) => {
                write!(f, "port {} is below {}", p, MIN_PORT)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Parameters fixed for the lifetime of one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub board_size: usize,
    pub win_length: usize,
}

impl GameConfig {
    /// Standard configuration for an `n`×`n` board with the default win length.
    pub fn new(board_size: usize) -> Result<Self, ConfigError> {
        Self::with_win_length(board_size, WIN_LENGTH)
    }

    pub fn with_win_length(board_size: usize, win_length: usize) -> Result<Self, ConfigError> {
        let config = Self {
            board_size,
            win_length,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_board_size(self.board_size)?;
        if self.win_length == 0 || self.win_length > self.board_size {
            return Err(ConfigError::WinLength {
                win_length: self.win_length,
                board_size: self.board_size,
            });
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            win_length: WIN_LENGTH,
        }
    }
}

pub fn validate_board_size(n: usize) -> Result<(), ConfigError> {
    if (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&n) {
        Ok(())
    } else {
        Err(ConfigError::BoardSize(n))
    }
}

/// Port 0 is accepted so callers can ask the OS for an ephemeral port.
pub fn validate_port(port: u16) -> Result<(), ConfigError> {
    if port == 0 || port >= MIN_PORT {
        Ok(())
    } else {
        Err(ConfigError::Port(port))
    }
}
