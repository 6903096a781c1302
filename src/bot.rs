//! Automated player.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{
    common::{Move, Symbol},
    game::GameSession,
    oracle,
};

/// Bot that completes its own line when it can, blocks the opponent's
/// otherwise, and falls back to a uniformly random empty cell.
pub struct BotPlayer {
    rng: SmallRng,
}

impl BotPlayer {
    pub fn new(rng: SmallRng) -> Self {
        Self { rng }
    }

    /// Deterministic bot for reproducible games.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    /// Move for the local player of `game`, `None` when no empty cell is left.
    pub fn choose(&mut self, game: &GameSession) -> Option<Move> {
        let empty = empty_cells(game);
        if empty.is_empty() {
            return None;
        }
        let me = game.local_symbol();
        completing_move(game, &empty, me)
            .or_else(|| completing_move(game, &empty, me.opponent()))
            .or_else(|| Some(empty[self.rng.random_range(0..empty.len())]))
    }
}

fn empty_cells(game: &GameSession) -> Vec<Move> {
    let board = game.board();
    let n = board.size();
    (0..n * n)
        .map(|i| Move::new(i / n, i % n))
        .filter(|mv| board.get(mv.row, mv.col).is_none())
        .collect()
}

/// First empty cell that would give `symbol` a winning line.
fn completing_move(game: &GameSession, empty: &[Move], symbol: Symbol) -> Option<Move> {
    let k = game.config().win_length;
    empty.iter().copied().find(|&mv| {
        let mut board = game.board().clone();
        board.apply(mv, symbol).is_ok() && oracle::find_winner(&board, k) == Some(symbol)
    })
}
