use std::fmt;

pub const BOARD_SIZE: i8 = 8;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Player {
    White,
    Black,
}

impl Player {
    pub fn opponent(&self) -> Player {
        if *self == Player::White {
            Player::Black
        } else {
            Player::White
        }
    }

    /// Row delta of a single pawn step for this player
    pub fn forward(&self) -> i8 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }

    /// The row a pawn of this player promotes on
    pub fn last_row(&self) -> i8 {
        match self {
            Self::White => BOARD_SIZE - 1,
            Self::Black => 0,
        }
    }

    pub fn to_human(&self) -> &str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub fn to_human(&self) -> &str {
        match self {
            Self::Pawn => "pawn",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }
}

/// A square on the board. Coordinates are signed so that stepping off the edge yields a
/// representable square that `is_on_board` rejects.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct Square {
    pub row: i8,
    pub col: i8,
}

impl Square {
    pub const fn at(row: i8, col: i8) -> Square {
        Square { row, col }
    }

    pub fn is_on_board(&self) -> bool {
        (0..BOARD_SIZE).contains(&self.row) && (0..BOARD_SIZE).contains(&self.col)
    }

    pub fn offset(&self, d_row: i8, d_col: i8) -> Square {
        Square {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Piece {
    pub player: Player,
    pub kind: PieceKind,
    pub has_moved: bool,
}

impl Piece {
    pub fn new(player: Player, kind: PieceKind) -> Piece {
        Piece {
            player,
            kind,
            has_moved: false,
        }
    }

    pub fn pawn(player: Player) -> Piece {
        Piece::new(player, PieceKind::Pawn)
    }
    pub fn knight(player: Player) -> Piece {
        Piece::new(player, PieceKind::Knight)
    }
    pub fn bishop(player: Player) -> Piece {
        Piece::new(player, PieceKind::Bishop)
    }
    pub fn rook(player: Player) -> Piece {
        Piece::new(player, PieceKind::Rook)
    }
    pub fn queen(player: Player) -> Piece {
        Piece::new(player, PieceKind::Queen)
    }
    pub fn king(player: Player) -> Piece {
        Piece::new(player, PieceKind::King)
    }

    pub fn to_symbol(&self) -> &str {
        let is_white = self.player == Player::White;
        match self.kind {
            PieceKind::Pawn => {
                if is_white {
                    "♙"
                } else {
                    "♟︎"
                }
            }
            PieceKind::Rook => {
                if is_white {
                    "♖"
                } else {
                    "♜"
                }
            }
            PieceKind::Knight => {
                if is_white {
                    "♘"
                } else {
                    "♞"
                }
            }
            PieceKind::Bishop => {
                if is_white {
                    "♗"
                } else {
                    "♝"
                }
            }
            PieceKind::Queen => {
                if is_white {
                    "♕"
                } else {
                    "♛"
                }
            }
            PieceKind::King => {
                if is_white {
                    "♔"
                } else {
                    "♚"
                }
            }
        }
    }
}

/// A move as recorded in the board history. `piece` and `captured` are snapshots taken
/// before the move was applied.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Move {
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(piece: Piece, captured: Option<Piece>, from: Square, to: Square) -> Self {
        Self {
            piece,
            captured,
            from,
            to,
        }
    }

    pub fn vertical_distance(&self) -> i8 {
        (self.to.row - self.from.row).abs()
    }

    /// Signed: positive towards the king side
    pub fn horizontal_distance(&self) -> i8 {
        self.to.col - self.from.col
    }

    pub fn is_en_passant(&self) -> bool {
        self.piece.kind == PieceKind::Pawn
            && self.captured.is_none()
            && self.horizontal_distance() != 0
    }

    pub fn is_castle(&self) -> bool {
        self.piece.kind == PieceKind::King && self.horizontal_distance().abs() == 2
    }

    pub fn is_pawn_promotion(&self) -> bool {
        self.piece.kind == PieceKind::Pawn && self.to.row == self.piece.player.last_row()
    }

    pub fn is_double_pawn_push(&self) -> bool {
        self.piece.kind == PieceKind::Pawn && self.vertical_distance() == 2
    }

    pub fn to_human(&self) -> String {
        if self.is_castle() {
            let side = if self.horizontal_distance() > 0 {
                "kingside"
            } else {
                "queenside"
            };
            return format!("{} castles {}", self.piece.player.to_human(), side);
        }
        let maybe_capture_str = match self.captured {
            Some(p) => format!(
                " capturing {} {}",
                p.player.to_human(),
                p.kind.to_human()
            ),
            None if self.is_en_passant() => " en passant".to_string(),
            None => "".to_string(),
        };
        let maybe_promotion_str = if self.is_pawn_promotion() {
            " promoting to queen"
        } else {
            ""
        };
        format!(
            "{} moves {} from {} to {}{}{}",
            self.piece.player.to_human(),
            self.piece.kind.to_human(),
            self.from,
            self.to,
            maybe_capture_str,
            maybe_promotion_str,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(Player::White, Player::Black.opponent());
        assert_eq!(Player::Black, Player::White.opponent());
    }

    #[test]
    fn test_is_on_board() {
        assert!(Square::at(0, 0).is_on_board());
        assert!(Square::at(7, 7).is_on_board());
        assert!(!Square::at(-1, 3).is_on_board());
        assert!(!Square::at(3, 8).is_on_board());
        assert!(!Square::at(0, 0).offset(-1, -1).is_on_board());
    }

    #[test]
    fn test_move_patterns() {
        let pawn = Piece::pawn(Player::White);
        let double = Move::new(pawn, None, Square::at(1, 4), Square::at(3, 4));
        assert_eq!(double.vertical_distance(), 2);
        assert!(double.is_double_pawn_push());
        assert!(!double.is_en_passant());

        let diagonal = Move::new(pawn, None, Square::at(4, 4), Square::at(5, 5));
        assert!(diagonal.is_en_passant());

        let capture = Move::new(
            pawn,
            Some(Piece::knight(Player::Black)),
            Square::at(4, 4),
            Square::at(5, 3),
        );
        assert!(!capture.is_en_passant());
        assert_eq!(capture.horizontal_distance(), -1);

        let promotion = Move::new(pawn, None, Square::at(6, 0), Square::at(7, 0));
        assert!(promotion.is_pawn_promotion());
        let black_promotion = Move::new(
            Piece::pawn(Player::Black),
            None,
            Square::at(1, 0),
            Square::at(0, 0),
        );
        assert!(black_promotion.is_pawn_promotion());
    }

    #[test]
    fn test_castle_pattern() {
        let king = Piece::king(Player::White);
        assert!(Move::new(king, None, Square::at(0, 4), Square::at(0, 6)).is_castle());
        assert!(Move::new(king, None, Square::at(0, 4), Square::at(0, 2)).is_castle());
        assert!(!Move::new(king, None, Square::at(0, 4), Square::at(0, 5)).is_castle());
        let rook = Piece::rook(Player::White);
        assert!(!Move::new(rook, None, Square::at(0, 4), Square::at(0, 6)).is_castle());
    }

    #[test]
    fn test_to_human() {
        let m = Move::new(
            Piece::queen(Player::Black),
            Some(Piece::rook(Player::White)),
            Square::at(7, 3),
            Square::at(0, 3),
        );
        assert_eq!(
            m.to_human(),
            "black moves queen from (7, 3) to (0, 3) capturing white rook"
        );
        let castle = Move::new(
            Piece::king(Player::White),
            None,
            Square::at(0, 4),
            Square::at(0, 2),
        );
        assert_eq!(castle.to_human(), "white castles queenside");
    }
}
