use crate::board::{Color, PieceKind, PieceState};
use crate::square::Square;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a move mutates the board, decided by the game from board context
/// before execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    Normal,
    Capture,
    CastleKingside,
    CastleQueenside,
    EnPassant,
    Promotion,
}

/// Immutable record of one executed transition. Constructed by the game
/// during classification; the `captured` slot is the only field written
/// after construction, and it takes ownership of the victim's exact state
/// so undo can put back the same piece, not a freshly built substitute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    pub kind: MoveKind,
    /// State of the moving piece as it stood before the move, so the
    /// record renders on its own without consulting the board.
    pub piece: PieceState,
    /// Promotion target; `Some` only for `MoveKind::Promotion`.
    pub promotion: Option<PieceKind>,
    pub captured: Option<PieceState>,
}

impl MoveRecord {
    pub fn new(from: Square, to: Square, kind: MoveKind, piece: PieceState) -> Self {
        MoveRecord {
            from,
            to,
            kind,
            piece,
            promotion: None,
            captured: None,
        }
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        matches!(self.kind, MoveKind::Capture | MoveKind::EnPassant)
    }

    #[inline]
    pub fn is_castling(&self) -> bool {
        matches!(self.kind, MoveKind::CastleKingside | MoveKind::CastleQueenside)
    }

    #[inline]
    pub fn is_promotion(&self) -> bool {
        self.kind == MoveKind::Promotion
    }

    #[inline]
    pub fn is_en_passant(&self) -> bool {
        self.kind == MoveKind::EnPassant
    }
}

/// Algebraic-style display form: castles as `O-O`/`O-O-O`, piece letter
/// (omitted for pawns) cased by color, captures marked `x` with the
/// source file prefixed for pawns, destination as file+rank, promotions
/// suffixed `=<letter>`, en passant suffixed ` e.p.`.
impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MoveKind::CastleKingside => return write!(f, "O-O"),
            MoveKind::CastleQueenside => return write!(f, "O-O-O"),
            _ => {}
        }

        let mut s = String::new();

        if self.piece.kind != PieceKind::Pawn {
            s.push(self.piece.symbol());
        }

        if self.is_capture() {
            if self.piece.kind == PieceKind::Pawn {
                s.push(self.from.file_char());
            }
            s.push('x');
        }

        s.push(self.to.file_char());
        s.push(self.to.rank_char());

        if let Some(kind) = self.promotion
            && self.is_promotion()
        {
            s.push('=');
            let letter = kind.letter();
            s.push(match self.piece.color {
                Color::White => letter,
                Color::Black => letter.to_ascii_lowercase(),
            });
        }

        if self.is_en_passant() {
            s.push_str(" e.p.");
        }

        write!(f, "{s}")
    }
}
