use std::error::Error;
use std::fmt;

use crate::board::PieceId;

/// Error when a piece is looked up on a board it is not on, for example because it was
/// captured or promoted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PieceNotFound(pub PieceId);

impl fmt::Display for PieceNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "piece {} is not on the board", self.0 .0)
    }
}

impl Error for PieceNotFound {}
