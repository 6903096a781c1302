//! Square game board holding each cell's symbol.

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use crate::common::{BoardError, Move, Symbol};
use core::fmt;

/// N×N grid of cells, row-major. Filled cells never revert to empty.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Symbol>>,
    filled: usize,
}

impl Board {
    /// Create an empty `size`×`size` board.
    pub fn new(size: usize) -> Self {
        Board {
            size,
            cells: vec![None; size * size],
            filled: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of non-empty cells.
    pub fn filled(&self) -> usize {
        self.filled
    }

    pub fn is_full(&self) -> bool {
        self.filled == self.cells.len()
    }

    /// Row-major view of every cell.
    pub fn cells(&self) -> &[Option<Symbol>] {
        &self.cells
    }

    /// Symbol at (row, col), `None` when empty or out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<Symbol> {
        self.index(row, col).ok().and_then(|i| self.cells[i])
    }

    /// Check that `mv` addresses an empty in-bounds cell without modifying anything.
    pub fn check(&self, mv: Move) -> Result<(), BoardError> {
        let i = self.index(mv.row, mv.col)?;
        match self.cells[i] {
            Some(by) => Err(BoardError::Occupied {
                row: mv.row,
                col: mv.col,
                by,
            }),
            None => Ok(()),
        }
    }

    /// Write `symbol` into the cell addressed by `mv`.
    pub fn apply(&mut self, mv: Move, symbol: Symbol) -> Result<(), BoardError> {
        self.check(mv)?;
        let i = mv.row * self.size + mv.col;
        self.cells[i] = Some(symbol);
        self.filled += 1;
        Ok(())
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, BoardError> {
        if row >= self.size || col >= self.size {
            return Err(BoardError::OutOfBounds {
                row,
                col,
                size: self.size,
            });
        }
        Ok(row * self.size + col)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {}x{} ({} filled)", self.size, self.size, self.filled)?;
        // a 0x0 board has no rows to print
        for row in self.cells.chunks(self.size.max(1)) {
            for cell in row {
                let ch = match cell {
                    Some(Symbol::X) => 'X',
                    Some(Symbol::O) => 'O',
                    None => '.',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
