use tracing::debug;

use crate::board::Board;
use crate::types::*;

/// Unlimited steps along a ray, as far as the board allows
pub const UNBOUNDED: u8 = BOARD_SIZE as u8;

// Directions are (row delta, col delta) pairs
pub const STRAIGHT_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub const DIAGONAL_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
    (-2, 1),
    (-2, -1),
];

/// (king col offset, rook col offset) for king side and queen side castling
const CASTLING_SIDES: [(i8, i8); 2] = [(2, 3), (-2, -4)];

/// Potential move, either valid, in which case it carries the piece it would capture
enum PotentialMove {
    Valid(Option<Piece>),
    Invalid,
}

impl PotentialMove {
    fn continue_search_in_direction(&self) -> bool {
        match self {
            PotentialMove::Invalid => false,
            PotentialMove::Valid(Some(_)) => false,
            PotentialMove::Valid(None) => true,
        }
    }
}

// Checks if a piece of `player` can land on `candidate`. Off-board squares and squares held by
// a teammate are invalid, anything else is valid and may be a capture.
fn check_move_target(board: &Board, player: Player, candidate: Square) -> PotentialMove {
    if !candidate.is_on_board() {
        return PotentialMove::Invalid;
    }
    match board.piece_at(candidate) {
        Some(other_piece) if other_piece.player == player => PotentialMove::Invalid,
        Some(other_piece) => PotentialMove::Valid(Some(*other_piece)),
        None => PotentialMove::Valid(None),
    }
}

/// Steps from `from` along `direction` for at most `max_steps` squares, stopping at the edge,
/// before a teammate, or on the first opponent.
pub fn ray_walk(
    board: &Board,
    from: Square,
    player: Player,
    direction: (i8, i8),
    max_steps: u8,
) -> Vec<Square> {
    let (d_row, d_col) = direction;
    let mut moves = vec![];
    let mut candidate = from;
    for _ in 0..max_steps {
        candidate = candidate.offset(d_row, d_col);
        let potential_move = check_move_target(board, player, candidate);
        match potential_move {
            PotentialMove::Invalid => break,
            PotentialMove::Valid(_) => {
                moves.push(candidate);
                if !potential_move.continue_search_in_direction() {
                    break;
                }
            }
        }
    }
    moves
}

pub fn straight_moves(board: &Board, from: Square, player: Player, max_steps: u8) -> Vec<Square> {
    STRAIGHT_DIRECTIONS
        .iter()
        .flat_map(|&direction| ray_walk(board, from, player, direction, max_steps))
        .collect()
}

pub fn diagonal_moves(board: &Board, from: Square, player: Player, max_steps: u8) -> Vec<Square> {
    DIAGONAL_DIRECTIONS
        .iter()
        .flat_map(|&direction| ray_walk(board, from, player, direction, max_steps))
        .collect()
}

/// Single steps to each of `offsets`
pub fn offset_moves(
    board: &Board,
    from: Square,
    player: Player,
    offsets: &[(i8, i8)],
) -> Vec<Square> {
    offsets
        .iter()
        .flat_map(|&offset| ray_walk(board, from, player, offset, 1))
        .collect()
}

/// How a kind of piece moves, ignoring whether the move exposes its own king
pub trait MovementRule {
    fn piece_specific_moves(&self, board: &Board, from: Square, piece: &Piece) -> Vec<Square>;
}

pub struct Pawn;
pub struct Knight;
pub struct Bishop;
pub struct Rook;
pub struct Queen;
pub struct King;

impl MovementRule for Pawn {
    fn piece_specific_moves(&self, board: &Board, from: Square, piece: &Piece) -> Vec<Square> {
        let mut moves = vec![];
        let forward = piece.player.forward();

        let one_step = from.offset(forward, 0);
        if one_step.is_on_board() && board.is_empty(one_step) {
            moves.push(one_step);
            let two_steps = from.offset(2 * forward, 0);
            if !piece.has_moved && two_steps.is_on_board() && board.is_empty(two_steps) {
                moves.push(two_steps);
            }
        }

        for d_col in [1, -1] {
            let diagonal = from.offset(forward, d_col);
            if !diagonal.is_on_board() {
                continue;
            }
            if board.contains_opponent_of(diagonal, piece.player)
                || (board.is_empty(diagonal)
                    && en_passant_available(board, from, diagonal, piece.player))
            {
                moves.push(diagonal);
            }
        }
        moves
    }
}

/// Did an opponent pawn just double step to the square beside `from`, in the column of `diagonal`
fn en_passant_available(board: &Board, from: Square, diagonal: Square, player: Player) -> bool {
    board.last_move().is_some_and(|last| {
        last.is_double_pawn_push()
            && last.piece.player != player
            && last.to.row == from.row
            && last.to.col == diagonal.col
    })
}

impl MovementRule for Knight {
    fn piece_specific_moves(&self, board: &Board, from: Square, piece: &Piece) -> Vec<Square> {
        offset_moves(board, from, piece.player, &KNIGHT_OFFSETS)
    }
}

impl MovementRule for Bishop {
    fn piece_specific_moves(&self, board: &Board, from: Square, piece: &Piece) -> Vec<Square> {
        diagonal_moves(board, from, piece.player, UNBOUNDED)
    }
}

impl MovementRule for Rook {
    fn piece_specific_moves(&self, board: &Board, from: Square, piece: &Piece) -> Vec<Square> {
        straight_moves(board, from, piece.player, UNBOUNDED)
    }
}

impl MovementRule for Queen {
    fn piece_specific_moves(&self, board: &Board, from: Square, piece: &Piece) -> Vec<Square> {
        let mut moves = straight_moves(board, from, piece.player, UNBOUNDED);
        moves.append(&mut diagonal_moves(board, from, piece.player, UNBOUNDED));
        moves
    }
}

impl MovementRule for King {
    fn piece_specific_moves(&self, board: &Board, from: Square, piece: &Piece) -> Vec<Square> {
        let mut moves = straight_moves(board, from, piece.player, 1);
        moves.append(&mut diagonal_moves(board, from, piece.player, 1));
        moves.append(&mut castling_moves(board, from, piece));
        moves
    }
}

// An unmoved king may jump two squares towards an unmoved rook of its own when nothing stands
// between them. Attacked squares on the way are not considered.
fn castling_moves(board: &Board, from: Square, king: &Piece) -> Vec<Square> {
    if king.has_moved {
        return vec![];
    }
    CASTLING_SIDES
        .iter()
        .filter_map(|&(king_offset, rook_offset)| {
            let rook = board.piece_at(from.offset(0, rook_offset))?;
            if rook.kind != PieceKind::Rook || rook.has_moved || rook.player != king.player {
                return None;
            }
            let step = rook_offset.signum();
            let path_clear =
                (1..rook_offset.abs()).all(|i| board.is_empty(from.offset(0, step * i)));
            path_clear.then(|| from.offset(0, king_offset))
        })
        .collect()
}

pub fn rule_for(kind: PieceKind) -> &'static dyn MovementRule {
    match kind {
        PieceKind::Pawn => &Pawn,
        PieceKind::Knight => &Knight,
        PieceKind::Bishop => &Bishop,
        PieceKind::Rook => &Rook,
        PieceKind::Queen => &Queen,
        PieceKind::King => &King,
    }
}

/// Squares `piece` standing on `from` could move to, without the self-check filter.
pub fn pseudo_legal_moves(board: &Board, from: Square, piece: &Piece) -> Vec<Square> {
    rule_for(piece.kind).piece_specific_moves(board, from, piece)
}

/// Squares the piece on `from` may move to. On the real board every candidate is tried out on
/// a simulation and dropped if it leaves the mover's king in check. Simulations skip that step.
pub fn legal_moves(board: &Board, from: Square) -> Vec<Square> {
    let Some(piece) = board.piece_at(from).copied() else {
        return vec![];
    };
    let candidates = pseudo_legal_moves(board, from, &piece);
    if board.is_ephemeral() {
        return candidates;
    }
    candidates
        .into_iter()
        .filter(|&to| {
            let mut simulation = board.simulation(piece.player);
            simulation.apply_move(from, to);
            let exposed = simulation.king_in_check(piece.player);
            if exposed {
                debug!(%from, %to, "move would leave the king in check");
            }
            !exposed
        })
        .collect()
}
