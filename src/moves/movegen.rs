//! Per-piece movement rules.
//!
//! Everything here is pseudo-legal: blocking and capture rules are
//! respected, but whether the mover's own king ends up in check is the
//! board's concern (`Board::would_be_in_check`). Evaluation is pure and
//! stateless given `(square, board)`; the only history a piece carries is
//! its own `has_moved` flag.

use crate::board::{Board, Color, PieceKind, PieceState};
use crate::square::Square;
use arrayvec::ArrayVec;

/// Upper bound on one piece's pseudo-legal destinations (a centralized
/// queen reaches 27 squares).
pub const MAX_DESTINATIONS: usize = 28;

pub type DestinationList = ArrayVec<Square, MAX_DESTINATIONS>;

const ROOK_DIRS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const QUEEN_DIRS: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// Row delta of a forward pawn step: White moves toward row 0.
#[inline]
const fn pawn_direction(color: Color) -> i8 {
    match color {
        Color::White => -1,
        Color::Black => 1,
    }
}

/// All pseudo-legal destinations for the piece standing on `from`.
/// Empty when `from` is empty.
pub fn pseudo_destinations(board: &Board, from: Square) -> DestinationList {
    let mut out = DestinationList::new();
    let Some(piece) = board.piece_at(from) else {
        return out;
    };
    match piece.kind {
        PieceKind::Pawn => pawn_destinations(board, from, piece, &mut out),
        PieceKind::Rook => slide(board, from, piece.color, &ROOK_DIRS, &mut out),
        PieceKind::Bishop => slide(board, from, piece.color, &BISHOP_DIRS, &mut out),
        PieceKind::Queen => slide(board, from, piece.color, &QUEEN_DIRS, &mut out),
        PieceKind::Knight => step(board, from, piece.color, &KNIGHT_OFFSETS, &mut out),
        PieceKind::King => king_destinations(board, from, piece, &mut out),
    }
    out
}

/// One-destination form of the movement rule. This doubles as the attack
/// predicate: `board.is_position_attacked` asks it whether an attacker
/// could capture on a square.
pub fn is_structurally_valid(board: &Board, from: Square, to: Square) -> bool {
    let Some(piece) = board.piece_at(from) else {
        return false;
    };
    match piece.kind {
        PieceKind::Pawn => pawn_valid(board, from, to, piece),
        PieceKind::Rook => {
            rook_geometry(from, to) && capture_or_empty(board, to, piece.color) && path_clear(board, from, to)
        }
        PieceKind::Bishop => {
            bishop_geometry(from, to) && capture_or_empty(board, to, piece.color) && path_clear(board, from, to)
        }
        PieceKind::Queen => {
            (rook_geometry(from, to) || bishop_geometry(from, to))
                && capture_or_empty(board, to, piece.color)
                && path_clear(board, from, to)
        }
        PieceKind::Knight => {
            let (dr, dc) = deltas(from, to);
            let (dr, dc) = (dr.abs(), dc.abs());
            ((dr == 2 && dc == 1) || (dr == 1 && dc == 2)) && capture_or_empty(board, to, piece.color)
        }
        PieceKind::King => king_valid(board, from, to, piece),
    }
}

#[inline]
fn deltas(from: Square, to: Square) -> (i8, i8) {
    (
        to.row() as i8 - from.row() as i8,
        to.col() as i8 - from.col() as i8,
    )
}

/// Destination may be taken: empty, or held by the enemy.
#[inline]
fn capture_or_empty(board: &Board, to: Square, mover: Color) -> bool {
    board.is_square_empty(to) || board.is_square_occupied_by(to, mover.opposite())
}

#[inline]
fn rook_geometry(from: Square, to: Square) -> bool {
    from.row() == to.row() || from.col() == to.col()
}

#[inline]
fn bishop_geometry(from: Square, to: Square) -> bool {
    let (dr, dc) = deltas(from, to);
    dr.abs() == dc.abs()
}

/// Every square strictly between `from` and `to` is empty. Callers have
/// already established that `to` lies on a straight or diagonal line from
/// `from`.
fn path_clear(board: &Board, from: Square, to: Square) -> bool {
    let (dr, dc) = deltas(from, to);
    let (dr, dc) = (dr.signum(), dc.signum());
    let mut cur = from.offset(dr, dc);
    while let Some(sq) = cur {
        if sq == to {
            return true;
        }
        if !board.is_square_empty(sq) {
            return false;
        }
        cur = sq.offset(dr, dc);
    }
    true
}

/// Walk each direction outward: stop before the edge, include then stop on
/// an enemy occupant, stop before a friendly one.
fn slide(board: &Board, from: Square, mover: Color, dirs: &[(i8, i8)], out: &mut DestinationList) {
    for &(dr, dc) in dirs {
        let mut cur = from.offset(dr, dc);
        while let Some(sq) = cur {
            if board.is_square_empty(sq) {
                out.push(sq);
                cur = sq.offset(dr, dc);
            } else {
                if board.is_square_occupied_by(sq, mover.opposite()) {
                    out.push(sq);
                }
                break;
            }
        }
    }
}

/// Fixed offset set: destination allowed if empty or enemy-occupied.
fn step(board: &Board, from: Square, mover: Color, offsets: &[(i8, i8)], out: &mut DestinationList) {
    for &(dr, dc) in offsets {
        if let Some(sq) = from.offset(dr, dc)
            && capture_or_empty(board, sq, mover)
        {
            out.push(sq);
        }
    }
}

fn pawn_destinations(board: &Board, from: Square, piece: PieceState, out: &mut DestinationList) {
    let dir = pawn_direction(piece.color);

    if let Some(one) = from.offset(dir, 0)
        && board.is_square_empty(one)
    {
        out.push(one);
        // Double push only from the start square, over an empty square.
        if !piece.has_moved
            && let Some(two) = from.offset(2 * dir, 0)
            && board.is_square_empty(two)
        {
            out.push(two);
        }
    }

    for dc in [-1, 1] {
        if let Some(diag) = from.offset(dir, dc)
            && (board.is_square_occupied_by(diag, piece.color.opposite())
                || board.en_passant_target() == Some(diag))
        {
            out.push(diag);
        }
    }
}

fn pawn_valid(board: &Board, from: Square, to: Square, piece: PieceState) -> bool {
    let dir = pawn_direction(piece.color);
    let (dr, dc) = deltas(from, to);

    if dc == 0 {
        if dr == dir {
            return board.is_square_empty(to);
        }
        if dr == 2 * dir && !piece.has_moved {
            let Some(mid) = from.offset(dir, 0) else {
                return false;
            };
            return board.is_square_empty(mid) && board.is_square_empty(to);
        }
        return false;
    }

    dc.abs() == 1
        && dr == dir
        && (board.is_square_occupied_by(to, piece.color.opposite())
            || board.en_passant_target() == Some(to))
}

fn king_destinations(board: &Board, from: Square, piece: PieceState, out: &mut DestinationList) {
    step(board, from, piece.color, &QUEEN_DIRS, out);

    // Castling destinations are offered here; their legality (empty
    // between-squares, unattacked transit) lives in Board alone.
    if !piece.has_moved {
        if board.can_castle_kingside(piece.color)
            && let Some(to) = from.offset(0, 2)
        {
            out.push(to);
        }
        if board.can_castle_queenside(piece.color)
            && let Some(to) = from.offset(0, -2)
        {
            out.push(to);
        }
    }
}

fn king_valid(board: &Board, from: Square, to: Square, piece: PieceState) -> bool {
    let (dr, dc) = deltas(from, to);

    if dr.abs() <= 1 && dc.abs() <= 1 {
        return capture_or_empty(board, to, piece.color);
    }

    if !piece.has_moved && dr == 0 && dc.abs() == 2 {
        return if dc > 0 {
            board.can_castle_kingside(piece.color)
        } else {
            board.can_castle_queenside(piece.color)
        };
    }

    false
}
