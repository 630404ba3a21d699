use crate::board::{Color, PieceState};
use crate::moves::MoveRecord;
use crate::square::Square;
use crate::status::GameStatus;
use serde::{Deserialize, Serialize};

/// Serializable image of a whole game: piece placement (row-major, row 0
/// at the top of the board), counters, and the move history. This is
/// internal persistence for save/load, not a chess interchange format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub squares: [[Option<PieceState>; 8]; 8],
    pub en_passant: Option<Square>,
    pub current_player: Color,
    pub status: GameStatus,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    pub draw_offered: bool,
    pub history: Vec<MoveRecord>,
}

impl GameSnapshot {
    pub fn to_bytes(&self) -> bincode::Result<Vec<u8>> {
        bincode::serialize(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> bincode::Result<GameSnapshot> {
        bincode::deserialize(bytes)
    }
}
