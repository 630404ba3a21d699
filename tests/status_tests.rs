use rookery::board::{Board, Color, PieceKind, PieceState};
use rookery::square::Square;
use rookery::status::{
    GameStatus, is_fifty_move_draw, is_insufficient_material, is_threefold_repetition,
    position_status,
};
use std::str::FromStr;

fn sq(name: &str) -> Square {
    Square::from_str(name).unwrap()
}

fn moved(kind: PieceKind, color: Color) -> PieceState {
    PieceState {
        kind,
        color,
        has_moved: true,
    }
}

/// Kings plus one rook per side: enough material, nobody in check.
fn quiet_middlegame() -> Board {
    let mut b = Board::new_empty();
    b.place_piece(sq("e1"), moved(PieceKind::King, Color::White));
    b.place_piece(sq("a1"), moved(PieceKind::Rook, Color::White));
    b.place_piece(sq("e8"), moved(PieceKind::King, Color::Black));
    b.place_piece(sq("h8"), moved(PieceKind::Rook, Color::Black));
    b
}

#[test]
fn start_position_is_ongoing() {
    let b = Board::new();
    assert_eq!(position_status(&b, Color::White, 0, &[]), GameStatus::Ongoing);
}

#[test]
fn checkmate_outranks_everything() {
    let mut b = Board::new_empty();
    b.place_piece(sq("h8"), moved(PieceKind::King, Color::Black));
    b.place_piece(sq("g7"), moved(PieceKind::Queen, Color::White));
    b.place_piece(sq("g6"), moved(PieceKind::King, Color::White));

    // Even with the fifty-move clock expired, mate is mate.
    assert_eq!(position_status(&b, Color::Black, 100, &[]), GameStatus::Checkmate);
}

#[test]
fn stalemate_is_distinct_from_checkmate() {
    let mut b = Board::new_empty();
    b.place_piece(sq("h8"), moved(PieceKind::King, Color::Black));
    b.place_piece(sq("f7"), moved(PieceKind::Queen, Color::White));
    b.place_piece(sq("g6"), moved(PieceKind::King, Color::White));

    assert_eq!(position_status(&b, Color::Black, 0, &[]), GameStatus::Stalemate);
    assert!(!b.is_in_checkmate(Color::Black));
}

#[test]
fn fifty_move_boundary_is_one_hundred_half_moves() {
    assert!(!is_fifty_move_draw(99));
    assert!(is_fifty_move_draw(100));
    assert!(is_fifty_move_draw(101));

    let b = quiet_middlegame();
    assert_eq!(position_status(&b, Color::White, 99, &[]), GameStatus::Ongoing);
    assert_eq!(position_status(&b, Color::White, 100, &[]), GameStatus::Draw);
}

#[test]
fn draw_preempts_check_when_moves_remain() {
    let mut b = Board::new_empty();
    b.place_piece(sq("e1"), moved(PieceKind::King, Color::White));
    b.place_piece(sq("a1"), moved(PieceKind::Rook, Color::White));
    b.place_piece(sq("e8"), moved(PieceKind::Rook, Color::Black));
    b.place_piece(sq("h8"), moved(PieceKind::King, Color::Black));

    assert!(b.is_in_check(Color::White));
    assert_eq!(position_status(&b, Color::White, 0, &[]), GameStatus::Check);
    assert_eq!(position_status(&b, Color::White, 100, &[]), GameStatus::Draw);
}

#[test]
fn bare_kings_are_a_dead_position() {
    let mut b = Board::new_empty();
    b.place_piece(sq("e1"), moved(PieceKind::King, Color::White));
    b.place_piece(sq("e8"), moved(PieceKind::King, Color::Black));

    assert!(is_insufficient_material(&b));
    assert_eq!(position_status(&b, Color::White, 0, &[]), GameStatus::Draw);
}

#[test]
fn king_versus_king_and_one_minor_is_dead() {
    for minor in [PieceKind::Knight, PieceKind::Bishop] {
        let mut b = Board::new_empty();
        b.place_piece(sq("e1"), moved(PieceKind::King, Color::White));
        b.place_piece(sq("e8"), moved(PieceKind::King, Color::Black));
        b.place_piece(sq("c6"), moved(minor, Color::Black));
        assert!(is_insufficient_material(&b), "{minor:?} should be dead");
    }
}

#[test]
fn rook_queen_or_pawn_keeps_the_game_alive() {
    for major in [PieceKind::Rook, PieceKind::Queen, PieceKind::Pawn] {
        let mut b = Board::new_empty();
        b.place_piece(sq("e1"), moved(PieceKind::King, Color::White));
        b.place_piece(sq("e8"), moved(PieceKind::King, Color::Black));
        b.place_piece(sq("a5"), moved(major, Color::Black));
        assert!(!is_insufficient_material(&b), "{major:?} can still mate");
    }
}

#[test]
fn minor_against_minor_is_not_declared_dead() {
    let mut b = Board::new_empty();
    b.place_piece(sq("e1"), moved(PieceKind::King, Color::White));
    b.place_piece(sq("c3"), moved(PieceKind::Knight, Color::White));
    b.place_piece(sq("e8"), moved(PieceKind::King, Color::Black));
    b.place_piece(sq("c6"), moved(PieceKind::Bishop, Color::Black));
    assert!(!is_insufficient_material(&b));
}

#[test]
fn three_pieces_on_a_side_is_never_dead() {
    let mut b = Board::new_empty();
    b.place_piece(sq("e1"), moved(PieceKind::King, Color::White));
    b.place_piece(sq("e8"), moved(PieceKind::King, Color::Black));
    b.place_piece(sq("b4"), moved(PieceKind::Knight, Color::Black));
    b.place_piece(sq("c6"), moved(PieceKind::Knight, Color::Black));
    assert!(!is_insufficient_material(&b));
}

#[test]
fn threefold_repetition_is_never_reported() {
    assert!(!is_threefold_repetition(&[]));
}

#[test]
fn exactly_one_status_holds() {
    let positions = [
        (Board::new(), Color::White),
        (quiet_middlegame(), Color::White),
    ];
    for (board, to_move) in positions {
        let mate = board.is_in_checkmate(to_move);
        let stale = board.is_in_stalemate(to_move);
        assert!(!(mate && stale));
        // One classification, and only one, comes back.
        let status = position_status(&board, to_move, 0, &[]);
        assert!(matches!(
            status,
            GameStatus::Ongoing
                | GameStatus::Check
                | GameStatus::Checkmate
                | GameStatus::Stalemate
                | GameStatus::Draw
        ));
    }
}
