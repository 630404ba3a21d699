use rookery::board::{Board, Color, PieceKind, PieceState};
use rookery::square::Square;
use std::str::FromStr;

fn sq(name: &str) -> Square {
    Square::from_str(name).unwrap()
}

fn piece(kind: PieceKind, color: Color) -> PieceState {
    PieceState::new(kind, color)
}

fn moved(kind: PieceKind, color: Color) -> PieceState {
    PieceState {
        kind,
        color,
        has_moved: true,
    }
}

#[test]
fn pinned_piece_may_only_move_along_the_pin() {
    let mut b = Board::new_empty();
    b.place_piece(sq("e1"), moved(PieceKind::King, Color::White));
    b.place_piece(sq("e2"), moved(PieceKind::Rook, Color::White));
    b.place_piece(sq("e8"), moved(PieceKind::Rook, Color::Black));
    b.place_piece(sq("h8"), moved(PieceKind::King, Color::Black));

    // Leaving the e-file exposes the king.
    assert!(b.would_be_in_check(sq("e2"), sq("d2"), Color::White));
    assert!(b.would_be_in_check(sq("e2"), sq("a2"), Color::White));
    // Staying on it, or capturing the attacker, is fine.
    assert!(!b.would_be_in_check(sq("e2"), sq("e5"), Color::White));
    assert!(!b.would_be_in_check(sq("e2"), sq("e8"), Color::White));
}

#[test]
fn king_cannot_step_into_an_attacked_square() {
    let mut b = Board::new_empty();
    b.place_piece(sq("e1"), moved(PieceKind::King, Color::White));
    b.place_piece(sq("a2"), moved(PieceKind::Rook, Color::Black));
    b.place_piece(sq("h8"), moved(PieceKind::King, Color::Black));

    let legal = b.all_valid_moves(Color::White);
    assert!(legal.contains(&sq("d1")));
    assert!(legal.contains(&sq("f1")));
    assert!(!legal.contains(&sq("d2")));
    assert!(!legal.contains(&sq("e2")));
    assert!(!legal.contains(&sq("f2")));
}

#[test]
fn would_be_in_check_fails_closed_on_an_empty_source() {
    let b = Board::new_empty();
    assert!(b.would_be_in_check(sq("e2"), sq("e4"), Color::White));
}

#[test]
fn probing_moves_never_mutates_the_live_board() {
    let b = Board::new();
    let before = b.clone();
    let _ = b.would_be_in_check(sq("e2"), sq("e4"), Color::White);
    let _ = b.all_valid_moves(Color::White);
    assert_eq!(b, before);
}

#[test]
fn back_rank_mate_is_checkmate() {
    let mut b = Board::new_empty();
    b.place_piece(sq("h8"), moved(PieceKind::King, Color::Black));
    b.place_piece(sq("g7"), moved(PieceKind::Queen, Color::White));
    b.place_piece(sq("g6"), moved(PieceKind::King, Color::White));

    assert!(b.is_in_check(Color::Black));
    assert!(b.is_in_checkmate(Color::Black));
    assert!(!b.is_in_stalemate(Color::Black));
}

#[test]
fn cornered_king_with_no_moves_is_stalemate() {
    let mut b = Board::new_empty();
    b.place_piece(sq("h8"), moved(PieceKind::King, Color::Black));
    b.place_piece(sq("f7"), moved(PieceKind::Queen, Color::White));
    b.place_piece(sq("g6"), moved(PieceKind::King, Color::White));

    assert!(!b.is_in_check(Color::Black));
    assert!(b.is_in_stalemate(Color::Black));
    assert!(!b.is_in_checkmate(Color::Black));
}

#[test]
fn check_requires_a_structural_attack_on_the_king() {
    let mut b = Board::new_empty();
    b.place_piece(sq("e1"), moved(PieceKind::King, Color::White));
    b.place_piece(sq("e8"), moved(PieceKind::Rook, Color::Black));
    assert!(b.is_in_check(Color::White));

    // Interpose a pawn: the sliding attack is blocked like any move.
    b.place_piece(sq("e5"), moved(PieceKind::Pawn, Color::Black));
    assert!(!b.is_in_check(Color::White));
}

#[test]
fn castling_is_refused_through_an_attacked_transit_square() {
    let mut b = Board::new_empty();
    b.place_piece(sq("e1"), piece(PieceKind::King, Color::White));
    b.place_piece(sq("h1"), piece(PieceKind::Rook, Color::White));
    b.place_piece(sq("f8"), moved(PieceKind::Rook, Color::Black));
    b.place_piece(sq("a8"), moved(PieceKind::King, Color::Black));

    // f1 is covered by the rook on f8.
    assert!(!b.can_castle_kingside(Color::White));

    let mut quiet = Board::new_empty();
    quiet.place_piece(sq("e1"), piece(PieceKind::King, Color::White));
    quiet.place_piece(sq("h1"), piece(PieceKind::Rook, Color::White));
    quiet.place_piece(sq("a8"), moved(PieceKind::King, Color::Black));
    assert!(quiet.can_castle_kingside(Color::White));
}

#[test]
fn castling_is_refused_while_in_check_or_after_moving() {
    let mut b = Board::new_empty();
    b.place_piece(sq("e1"), piece(PieceKind::King, Color::White));
    b.place_piece(sq("h1"), piece(PieceKind::Rook, Color::White));
    b.place_piece(sq("e8"), moved(PieceKind::Rook, Color::Black));
    b.place_piece(sq("a8"), moved(PieceKind::King, Color::Black));
    assert!(!b.can_castle_kingside(Color::White));

    let mut b = Board::new_empty();
    b.place_piece(sq("e1"), piece(PieceKind::King, Color::White));
    b.place_piece(sq("h1"), moved(PieceKind::Rook, Color::White));
    b.place_piece(sq("a8"), moved(PieceKind::King, Color::Black));
    assert!(!b.can_castle_kingside(Color::White));
}

#[test]
fn queenside_castling_needs_three_empty_squares() {
    let mut b = Board::new_empty();
    b.place_piece(sq("e1"), piece(PieceKind::King, Color::White));
    b.place_piece(sq("a1"), piece(PieceKind::Rook, Color::White));
    b.place_piece(sq("h8"), moved(PieceKind::King, Color::Black));
    assert!(b.can_castle_queenside(Color::White));

    b.place_piece(sq("b1"), piece(PieceKind::Knight, Color::White));
    assert!(!b.can_castle_queenside(Color::White));
}
