use crate::board::{Board, Color, PieceKind};
use crate::moves::MoveRecord;
use crate::square::Square;
use serde::{Deserialize, Serialize};

// Status façade kept free of game imports: everything here is a pure
// function of board, side to move, and counters.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
    Draw,
}

impl GameStatus {
    /// Terminal states accept no further moves (undo stays available).
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            GameStatus::Checkmate | GameStatus::Stalemate | GameStatus::Draw
        )
    }
}

/// Fifty-move rule: one hundred half-moves without a pawn move or capture.
#[inline]
pub fn is_fifty_move_draw(halfmove_clock: u32) -> bool {
    halfmove_clock >= 100
}

/// Threefold repetition is not tracked; this always returns false.
// TODO: record a position key per executed move (piece placement, side to
// move, castling and en-passant rights) and count recurrences here.
pub fn is_threefold_repetition(_history: &[MoveRecord]) -> bool {
    false
}

/// Dead-material draw: both sides at two pieces or fewer, at least one
/// side down to a lone king, and the other side holding at most a king
/// plus one minor piece. A surviving rook, queen, or pawn keeps the game
/// alive.
pub fn is_insufficient_material(board: &Board) -> bool {
    let white = board.all_piece_positions(Color::White);
    let black = board.all_piece_positions(Color::Black);

    if white.len() > 2 || black.len() > 2 {
        return false;
    }

    let king_and_minor = |positions: &[Square]| -> bool {
        positions.iter().all(|&sq| {
            board
                .piece_at(sq)
                .is_some_and(|p| p.kind == PieceKind::King || p.kind.is_minor())
        })
    };

    match (white.len(), black.len()) {
        (1, 1) => true,
        (1, 2) => king_and_minor(&black),
        (2, 1) => king_and_minor(&white),
        _ => false,
    }
}

/// Classify the position for the side about to move.
///
/// Priority: checkmate, stalemate, draw (fifty-move, repetition stub,
/// dead material), check, ongoing. Exactly one status holds at any time.
pub fn position_status(
    board: &Board,
    to_move: Color,
    halfmove_clock: u32,
    history: &[MoveRecord],
) -> GameStatus {
    if board.is_in_checkmate(to_move) {
        GameStatus::Checkmate
    } else if board.is_in_stalemate(to_move) {
        GameStatus::Stalemate
    } else if is_fifty_move_draw(halfmove_clock)
        || is_threefold_repetition(history)
        || is_insufficient_material(board)
    {
        GameStatus::Draw
    } else if board.is_in_check(to_move) {
        GameStatus::Check
    } else {
        GameStatus::Ongoing
    }
}
