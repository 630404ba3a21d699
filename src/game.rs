use crate::board::{Board, Color, PieceKind, PieceState};
use crate::moves::movegen::{is_structurally_valid, pseudo_destinations};
use crate::moves::{MoveKind, MoveRecord};
use crate::save::GameSnapshot;
use crate::square::Square;
use crate::status::{self, GameStatus};
use tracing::{debug, instrument};

/// Turn-taking state machine over one board: classifies, validates,
/// executes, and records moves, tracks the draw counters, and derives the
/// overall status after every mutation. Control flows one direction;
/// the game drives the board, never the reverse.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    current_player: Color,
    status: GameStatus,
    history: Vec<MoveRecord>,
    halfmove_clock: u32,
    fullmove_number: u32,
    draw_offered: bool,
}

#[inline]
fn at(row: u8, col: u8) -> Square {
    Square::from_index(row << 3 | col)
}

impl Game {
    /// A fresh game from the standard starting position, White to move.
    pub fn new() -> Self {
        let mut game = Game {
            board: Board::new_empty(),
            current_player: Color::White,
            status: GameStatus::Ongoing,
            history: Vec::new(),
            halfmove_clock: 0,
            fullmove_number: 1,
            draw_offered: false,
        };
        game.start_new_game();
        game
    }

    /// Reset the owned board and all bookkeeping in place.
    pub fn start_new_game(&mut self) {
        self.board.set_start_position();
        self.current_player = Color::White;
        self.history.clear();
        self.halfmove_clock = 0;
        self.fullmove_number = 1;
        self.draw_offered = false;
        self.update_status();
    }

    // ---- queries ----

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn current_player(&self) -> Color {
        self.current_player
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn move_history(&self) -> &[MoveRecord] {
        &self.history
    }

    #[inline]
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.status.is_terminal()
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    #[inline]
    pub fn draw_offered(&self) -> bool {
        self.draw_offered
    }

    pub fn status_string(&self) -> String {
        match self.status {
            GameStatus::Ongoing => format!("{} to move", self.current_player),
            GameStatus::Check => format!("{} is in check", self.current_player),
            GameStatus::Checkmate => format!(
                "{} is checkmated. {} wins!",
                self.current_player,
                self.current_player.opposite()
            ),
            GameStatus::Stalemate => "Stalemate - Draw".to_string(),
            GameStatus::Draw => "Draw".to_string(),
        }
    }

    /// Legal destinations for the current player's piece on `from`; empty
    /// when the square holds no piece of theirs.
    pub fn valid_moves(&self, from: Square) -> Vec<Square> {
        let Some(piece) = self.board.piece_at(from) else {
            return Vec::new();
        };
        if piece.color != self.current_player {
            return Vec::new();
        }
        pseudo_destinations(&self.board, from)
            .into_iter()
            .filter(|&to| !self.board.would_be_in_check(from, to, self.current_player))
            .collect()
    }

    /// Structural rule plus the self-check filter, for the current player.
    pub fn is_valid_move(&self, from: Square, to: Square) -> bool {
        let Some(piece) = self.board.piece_at(from) else {
            return false;
        };
        piece.color == self.current_player
            && is_structurally_valid(&self.board, from, to)
            && !self.board.would_be_in_check(from, to, self.current_player)
    }

    // ---- commands ----

    /// Execute a move, inferring any special kind from board context.
    /// Promotions default to a queen; see [`Game::make_move_promoting`].
    pub fn make_move(&mut self, from: Square, to: Square) -> bool {
        self.make_move_promoting(from, to, PieceKind::Queen)
    }

    /// Execute a move with an explicit promotion target, used only when
    /// the move turns out to be a promotion.
    #[instrument(skip(self), level = "debug")]
    pub fn make_move_promoting(&mut self, from: Square, to: Square, promotion: PieceKind) -> bool {
        if self.status.is_terminal() {
            debug!(status = ?self.status, "move rejected: game is over");
            return false;
        }

        let Some(piece) = self.board.piece_at(from) else {
            debug!(%from, "move rejected: no piece on source square");
            return false;
        };
        if piece.color != self.current_player {
            debug!(%from, "move rejected: not this player's piece");
            return false;
        }

        if !self.is_valid_move(from, to) {
            debug!(%from, %to, "move rejected: structurally invalid or self-check");
            return false;
        }

        let kind = self.classify(from, to, piece);
        let mut record = MoveRecord::new(from, to, kind, piece);
        if kind == MoveKind::Promotion {
            record.promotion = Some(promotion);
        }

        // Ordinary captures (including capturing promotions) detach the
        // victim into the record; en passant attaches its victim during
        // execution since the victim is not on the destination square.
        if kind != MoveKind::EnPassant {
            record.captured = self.board.remove_piece(to);
        }

        self.execute(&mut record);

        if piece.kind == PieceKind::Pawn || record.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if self.current_player == Color::Black {
            self.fullmove_number += 1;
        }

        // The en-passant window lasts exactly one ply.
        self.board.en_passant = None;
        if piece.kind == PieceKind::Pawn && (to.row() as i8 - from.row() as i8).abs() == 2 {
            self.board.en_passant = Square::new((to.row() + from.row()) / 2, from.col());
        }

        debug!(mv = %record, "move executed");
        self.history.push(record);
        self.current_player = self.current_player.opposite();
        self.update_status();
        self.draw_offered = false;
        true
    }

    /// Take back the last executed move. Always permitted, including from
    /// terminal states; pops the history tail, relocates the mover (and a
    /// castling rook) back, restores any captured piece from the record's
    /// owned slot, and recomputes status for the restored player.
    pub fn undo_last_move(&mut self) {
        let Some(record) = self.history.pop() else {
            return;
        };

        self.board.move_piece(record.to, record.from);

        match record.kind {
            MoveKind::CastleKingside => {
                let row = record.from.row();
                self.board.move_piece(at(row, 5), at(row, 7));
            }
            MoveKind::CastleQueenside => {
                let row = record.from.row();
                self.board.move_piece(at(row, 3), at(row, 0));
            }
            MoveKind::EnPassant => {
                // The victim pawn stood beside the mover, not on `to`.
                if let Some(victim) = record.captured
                    && let Some(victim_sq) = Square::new(record.from.row(), record.to.col())
                {
                    self.board.place_piece(victim_sq, victim);
                }
            }
            _ => {
                if let Some(victim) = record.captured {
                    self.board.place_piece(record.to, victim);
                }
            }
        }

        self.current_player = self.current_player.opposite();
        self.update_status();
        debug!(mv = %record, "move undone");
    }

    pub fn offer_draw(&mut self) {
        self.draw_offered = true;
    }

    /// Accept a standing draw offer; false if none is on the table.
    pub fn accept_draw(&mut self) -> bool {
        if self.draw_offered {
            self.status = GameStatus::Draw;
            true
        } else {
            false
        }
    }

    /// Resignation ends the game as a checkmate against the resigner;
    /// pointing `current_player` at them makes the status string attribute
    /// the loss correctly.
    pub fn resign(&mut self, color: Color) {
        self.status = GameStatus::Checkmate;
        self.current_player = color;
    }

    // ---- persistence ----

    pub fn snapshot(&self) -> GameSnapshot {
        let mut squares = [[None; 8]; 8];
        for sq in Square::all() {
            squares[sq.row() as usize][sq.col() as usize] = self.board.piece_at(sq);
        }
        GameSnapshot {
            squares,
            en_passant: self.board.en_passant,
            current_player: self.current_player,
            status: self.status,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            draw_offered: self.draw_offered,
            history: self.history.clone(),
        }
    }

    pub fn restore(snapshot: GameSnapshot) -> Game {
        let mut board = Board::new_empty();
        for sq in Square::all() {
            if let Some(piece) = snapshot.squares[sq.row() as usize][sq.col() as usize] {
                board.place_piece(sq, piece);
            }
        }
        board.en_passant = snapshot.en_passant;
        Game {
            board,
            current_player: snapshot.current_player,
            status: snapshot.status,
            history: snapshot.history,
            halfmove_clock: snapshot.halfmove_clock,
            fullmove_number: snapshot.fullmove_number,
            draw_offered: snapshot.draw_offered,
        }
    }

    // ---- internals ----

    /// Decide how `(from, to)` mutates the board, from context alone: a
    /// king crossing two files castles, a pawn landing on the en-passant
    /// target captures en passant, a pawn reaching the far rank promotes,
    /// an occupied destination is a capture, anything else is plain.
    fn classify(&self, from: Square, to: Square, piece: PieceState) -> MoveKind {
        let file_delta = to.col() as i8 - from.col() as i8;
        if piece.kind == PieceKind::King && file_delta.abs() == 2 {
            return if file_delta > 0 {
                MoveKind::CastleKingside
            } else {
                MoveKind::CastleQueenside
            };
        }
        if piece.kind == PieceKind::Pawn {
            if self.board.en_passant_target() == Some(to) {
                return MoveKind::EnPassant;
            }
            if to.row() == piece.color.promotion_rank() {
                return MoveKind::Promotion;
            }
        }
        if !self.board.is_square_empty(to) {
            return MoveKind::Capture;
        }
        MoveKind::Normal
    }

    fn execute(&mut self, record: &mut MoveRecord) {
        match record.kind {
            MoveKind::CastleKingside => {
                let row = record.from.row();
                self.board.move_piece(record.from, record.to);
                self.board.move_piece(at(row, 7), at(row, 5));
            }
            MoveKind::CastleQueenside => {
                let row = record.from.row();
                self.board.move_piece(record.from, record.to);
                self.board.move_piece(at(row, 0), at(row, 3));
            }
            MoveKind::EnPassant => {
                self.board.move_piece(record.from, record.to);
                if let Some(victim_sq) = Square::new(record.from.row(), record.to.col()) {
                    record.captured = self.board.remove_piece(victim_sq);
                }
            }
            MoveKind::Promotion => {
                let target = record.promotion.unwrap_or(PieceKind::Queen);
                self.board.remove_piece(record.from);
                self.board
                    .place_piece(record.to, PieceState::new(target, record.piece.color));
            }
            MoveKind::Normal | MoveKind::Capture => {
                self.board.move_piece(record.from, record.to);
            }
        }
    }

    fn update_status(&mut self) {
        self.status = status::position_status(
            &self.board,
            self.current_player,
            self.halfmove_clock,
            &self.history,
        );
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
