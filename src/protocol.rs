#![cfg(feature = "std")]

//! Wire records exchanged between the two peers.
//!
//! A connection carries exactly one [`Handshake`] from listener to connector,
//! followed by any number of [`MoveRecord`]s in either direction. There is no
//! length prefix or type tag; framing relies on the fixed record sizes below.
//! Integers are little-endian, fixed width (bincode's default encoding).

use serde::{Deserialize, Serialize};

use crate::common::Move;

/// Encoded size of a [`Handshake`].
pub const HANDSHAKE_LEN: usize = 4;
/// Encoded size of a [`MoveRecord`].
pub const MOVE_RECORD_LEN: usize = 8;

/// Board size announced by the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Handshake {
    pub board_size: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub row: u32,
    pub col: u32,
}

impl From<Move> for MoveRecord {
    fn from(mv: Move) -> Self {
        MoveRecord {
            row: mv.row as u32,
            col: mv.col as u32,
        }
    }
}

impl From<MoveRecord> for Move {
    fn from(rec: MoveRecord) -> Self {
        Move::new(rec.row as usize, rec.col as usize)
    }
}

pub fn encode_handshake(board_size: usize) -> bincode::Result<[u8; HANDSHAKE_LEN]> {
    let hs = Handshake {
        board_size: board_size as u32,
    };
    let mut out = [0u8; HANDSHAKE_LEN];
    bincode::serialize_into(&mut out[..], &hs)?;
    Ok(out)
}

pub fn decode_handshake(buf: &[u8; HANDSHAKE_LEN]) -> bincode::Result<Handshake> {
    bincode::deserialize(buf)
}

pub fn encode_move(mv: Move) -> bincode::Result<[u8; MOVE_RECORD_LEN]> {
    let mut out = [0u8; MOVE_RECORD_LEN];
    bincode::serialize_into(&mut out[..], &MoveRecord::from(mv))?;
    Ok(out)
}

pub fn decode_move(buf: &[u8; MOVE_RECORD_LEN]) -> bincode::Result<Move> {
    let rec: MoveRecord = bincode::deserialize(buf)?;
    Ok(rec.into())
}
