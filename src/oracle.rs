//! Win and draw detection.
//!
//! Rows and columns are scanned with one run counter per symbol. Diagonals
//! are checked inside every `k`×`k` window so runs that do not touch the
//! board's main diagonals are still found on boards larger than `k`.

use crate::board::Board;
use crate::common::Symbol;

/// Result of evaluating a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Undecided,
    Win(Symbol),
    Draw,
}

/// Decide the board's terminal status for a win length of `k`.
///
/// When several lines are complete at once the first one in scan order
/// (rows, columns, then diagonal windows by anchor) decides the winner.
pub fn evaluate(board: &Board, k: usize) -> Verdict {
    if let Some(winner) = find_winner(board, k) {
        Verdict::Win(winner)
    } else if board.is_full() {
        Verdict::Draw
    } else {
        Verdict::Undecided
    }
}

/// First symbol with `k` contiguous cells, if any.
pub fn find_winner(board: &Board, k: usize) -> Option<Symbol> {
    let n = board.size();
    if k == 0 || k > n {
        return None;
    }
    scan_lines(n, k, |line, step| board.get_line(line, step, true))
        .or_else(|| scan_lines(n, k, |line, step| board.get_line(line, step, false)))
        .or_else(|| scan_windows(board, k))
}

/// Run-counter scan over `n` lines of length `n`.
fn scan_lines<F>(n: usize, k: usize, cell: F) -> Option<Symbol>
where
    F: Fn(usize, usize) -> Option<Symbol>,
{
    for line in 0..n {
        let (mut run_x, mut run_o) = (0usize, 0usize);
        for step in 0..n {
            match cell(line, step) {
                Some(Symbol::X) => {
                    run_x += 1;
                    run_o = 0;
                }
                Some(Symbol::O) => {
                    run_o += 1;
                    run_x = 0;
                }
                None => {
                    run_x = 0;
                    run_o = 0;
                }
            }
            if run_x >= k {
                return Some(Symbol::X);
            }
            if run_o >= k {
                return Some(Symbol::O);
            }
        }
    }
    None
}

fn scan_windows(board: &Board, k: usize) -> Option<Symbol> {
    let last = board.size() - k;
    for i in 0..=last {
        for j in 0..=last {
            let down_right = uniform(k, |d| board.get(i + d, j + d));
            if down_right.is_some() {
                return down_right;
            }
            let down_left = uniform(k, |d| board.get(i + d, j + k - 1 - d));
            if down_left.is_some() {
                return down_left;
            }
        }
    }
    None
}

/// Symbol shared by all `k` cells, `None` if any is empty or they differ.
fn uniform<F>(k: usize, cell: F) -> Option<Symbol>
where
    F: Fn(usize) -> Option<Symbol>,
{
    let first = cell(0)?;
    (1..k).all(|d| cell(d) == Some(first)).then_some(first)
}

impl Board {
    /// Cell `step` of row `line` (`by_row`) or of column `line`.
    fn get_line(&self, line: usize, step: usize, by_row: bool) -> Option<Symbol> {
        if by_row {
            self.get(line, step)
        } else {
            self.get(step, line)
        }
    }
}
