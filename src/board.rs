use std::fmt;

use once_cell::sync::Lazy;
use tracing::trace;

use crate::errors::PieceNotFound;
use crate::movegen;
use crate::types::*;

const SIZE: usize = BOARD_SIZE as usize;

/// Stable handle of a piece on a board. Ids are handed out by `Board::place` and are never
/// reused, so the id of a captured or promoted piece stays off the board for good.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct PieceId(pub usize);

/// The chess position: who stands where, whose move it is and every move applied so far.
///
/// This is a "dumb" board. It does not validate moves on its own, callers are expected to only
/// apply moves taken from `available_moves`.
#[derive(Debug, Clone)]
pub struct Board {
    squares: [[Option<PieceId>; SIZE]; SIZE],
    // records of every piece ever placed, indexed by `PieceId`
    pieces: Vec<Piece>,
    // where each piece currently stands, `None` once it left the board
    locations: Vec<Option<Square>>,
    // who's move it is
    active_player: Player,
    history: Vec<Move>,
    // set on throwaway copies used to try out a move, never changes after construction
    ephemeral: bool,
}

static STARTING_BOARD: Lazy<Board> = Lazy::new(|| {
    let mut board = Board::empty();
    let back_row = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];
    for (col, kind) in (0..BOARD_SIZE).zip(back_row) {
        board.place(Square::at(0, col), Piece::new(Player::White, kind));
        board.place(Square::at(1, col), Piece::pawn(Player::White));
        board.place(Square::at(6, col), Piece::pawn(Player::Black));
        board.place(Square::at(7, col), Piece::new(Player::Black, kind));
    }
    board
});

impl Board {
    pub fn empty() -> Board {
        Board {
            squares: [[None; SIZE]; SIZE],
            pieces: Vec::new(),
            locations: Vec::new(),
            active_player: Player::White,
            history: Vec::new(),
            ephemeral: false,
        }
    }

    /// The standard starting arrangement, white to move
    pub fn standard() -> Board {
        STARTING_BOARD.clone()
    }

    /// A throwaway copy used to try out a move of `mover`. Move generation on the copy skips
    /// the self-check filter.
    pub fn simulation(&self, mover: Player) -> Board {
        Board {
            active_player: mover,
            ephemeral: true,
            ..self.clone()
        }
    }

    pub fn is_ephemeral(&self) -> bool {
        self.ephemeral
    }

    /// Get the player to move
    pub fn active_player(&self) -> Player {
        self.active_player
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.history.last()
    }

    /// Puts `piece` on `square`, replacing whatever stood there. The placement does not have to
    /// be reachable by legal play.
    ///
    /// Panics if `square` is off the board.
    pub fn place(&mut self, square: Square, piece: Piece) -> PieceId {
        assert!(
            square.is_on_board(),
            "Cannot place a piece off the board at {square}"
        );
        self.evict(square);
        let id = PieceId(self.pieces.len());
        self.pieces.push(piece);
        self.locations.push(Some(square));
        self.squares[square.row as usize][square.col as usize] = Some(id);
        id
    }

    /// Clears `square`, returning the piece that stood there
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.evict(square).map(|id| self.pieces[id.0])
    }

    pub fn piece_id_at(&self, square: Square) -> Option<PieceId> {
        if !square.is_on_board() {
            return None;
        }
        self.squares[square.row as usize][square.col as usize]
    }

    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.piece_id_at(square).map(|id| &self.pieces[id.0])
    }

    /// The record of a piece, also available after it left the board
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.0)
    }

    pub fn locate(&self, id: PieceId) -> Result<Square, PieceNotFound> {
        self.locations
            .get(id.0)
            .copied()
            .flatten()
            .ok_or(PieceNotFound(id))
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    pub fn contains_opponent_of(&self, square: Square, player: Player) -> bool {
        self.piece_at(square).is_some_and(|p| p.player != player)
    }

    /// Every piece on the board, row by row starting from row 0
    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, Square, &Piece)> + '_ {
        (0..BOARD_SIZE)
            .flat_map(|row| (0..BOARD_SIZE).map(move |col| Square::at(row, col)))
            .filter_map(move |square| {
                self.piece_id_at(square)
                    .map(|id| (id, square, &self.pieces[id.0]))
            })
    }

    pub fn king_square(&self, player: Player) -> Option<Square> {
        self.pieces()
            .find(|(_, _, p)| p.player == player && p.kind == PieceKind::King)
            .map(|(_, square, _)| square)
    }

    /// Is any king of `player` standing on a square one of the opponent's pieces could move to
    pub fn king_in_check(&self, player: Player) -> bool {
        let kings: Vec<Square> = self
            .pieces()
            .filter(|(_, _, p)| p.player == player && p.kind == PieceKind::King)
            .map(|(_, square, _)| square)
            .collect();
        if kings.is_empty() {
            return false;
        }
        self.pieces()
            .filter(|(_, _, p)| p.player == player.opponent())
            .any(|(_, square, piece)| {
                movegen::pseudo_legal_moves(self, square, piece)
                    .iter()
                    .any(|target| kings.contains(target))
            })
    }

    /// The squares the piece `id` may move to, excluding moves that leave its own king in check
    pub fn available_moves(&self, id: PieceId) -> Result<Vec<Square>, PieceNotFound> {
        let from = self.locate(id)?;
        Ok(movegen::legal_moves(self, from))
    }

    /// All moves of the active player as (from, to) pairs
    pub fn all_legal_moves(&self) -> Vec<(Square, Square)> {
        self.pieces()
            .filter(|(_, _, p)| p.player == self.active_player)
            .flat_map(|(_, from, _)| {
                movegen::legal_moves(self, from)
                    .into_iter()
                    .map(move |to| (from, to))
            })
            .collect()
    }

    /// Moves the piece `id` to `to`. Returns whether the move was applied, see `apply_move`.
    pub fn move_piece(&mut self, id: PieceId, to: Square) -> Result<bool, PieceNotFound> {
        let from = self.locate(id)?;
        Ok(self.apply_move(from, to))
    }

    /// Moves the piece on `from` to `to` and plays out captures, en passant, castling and
    /// promotion before handing the turn to the opponent.
    ///
    /// Does nothing and returns `false` unless `from` holds a piece of the active player and `to`
    /// is a different square on the board.
    pub fn apply_move(&mut self, from: Square, to: Square) -> bool {
        let Some(id) = self.piece_id_at(from) else {
            trace!(%from, "ignoring move from an empty square");
            return false;
        };
        let moving_piece = self.pieces[id.0];
        if moving_piece.player != self.active_player {
            trace!(%from, player = moving_piece.player.to_human(), "ignoring move out of turn");
            return false;
        }
        if from == to || !to.is_on_board() {
            trace!(%from, %to, "ignoring move to an invalid square");
            return false;
        }

        let captured = self.piece_at(to).copied();
        self.relocate(from, to);
        self.pieces[id.0].has_moved = true;

        let applied = Move::new(moving_piece, captured, from, to);
        trace!(ephemeral = self.ephemeral, "{}", applied.to_human());
        self.history.push(applied);

        self.remove_en_passant_pawn();
        self.castle_rook();
        self.promote_pawn();

        self.active_player = self.active_player.opponent();
        true
    }

    fn remove_en_passant_pawn(&mut self) {
        let [.., previous, last] = self.history.as_slice() else {
            return;
        };
        if !last.is_en_passant() || !previous.is_double_pawn_push() {
            return;
        }
        let passed = Square::at(previous.to.row, last.to.col);
        if let Some(pawn) = self.evict(passed) {
            trace!(%passed, ?pawn, "captured en passant");
        }
    }

    fn castle_rook(&mut self) {
        let Some(last) = self.history.last().copied() else {
            return;
        };
        if !last.is_castle() {
            return;
        }
        let row = last.to.row;
        let (rook_from, rook_to) = if last.horizontal_distance() > 0 {
            (Square::at(row, last.to.col + 1), Square::at(row, last.to.col - 1))
        } else {
            (Square::at(row, last.to.col - 2), Square::at(row, last.to.col + 1))
        };
        if let Some(rook) = self.piece_id_at(rook_from) {
            self.relocate(rook_from, rook_to);
            self.pieces[rook.0].has_moved = true;
            trace!(%rook_from, %rook_to, "castled rook");
        }
    }

    fn promote_pawn(&mut self) {
        let Some(last) = self.history.last().copied() else {
            return;
        };
        if last.is_pawn_promotion() {
            let queen = self.place(last.to, Piece::queen(self.active_player));
            trace!(square = %last.to, ?queen, "promoted pawn");
        }
    }

    /// Takes the piece off `square`, keeping its record in the arena
    fn evict(&mut self, square: Square) -> Option<PieceId> {
        if !square.is_on_board() {
            return None;
        }
        let id = self.squares[square.row as usize][square.col as usize].take()?;
        self.locations[id.0] = None;
        Some(id)
    }

    fn relocate(&mut self, from: Square, to: Square) {
        let Some(id) = self.evict(from) else {
            return;
        };
        self.evict(to);
        self.squares[to.row as usize][to.col as usize] = Some(id);
        self.locations[id.0] = Some(to);
    }

    pub fn draw_board(&self) -> String {
        let mut string = String::new();

        for row in (0..BOARD_SIZE).rev() {
            for col in 0..BOARD_SIZE {
                let p = self.piece_at(Square::at(row, col));
                string = format!(
                    "{} {}",
                    string,
                    match p {
                        Some(pp) => pp.to_symbol(),
                        None => ".",
                    }
                );
            }
            string = format!("{}\n", string);
        }
        string
    }

    pub fn draw_to_terminal(&self) {
        println!("{}", self.draw_board());
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.draw_board())
    }
}
