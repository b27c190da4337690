//! Moves as the players enter them, and the reasons a move gets rejected.

use crate::types::{PieceKind, Square, SquareParseError};

use std::fmt::{self, Display};
use std::str::FromStr;

use thiserror::Error;

/// A move as entered by a player: source and destination square. Whether it
/// is legal is a property of the board, not of the move.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    src: Square,
    dst: Square,
}

impl Move {
    pub const fn new(src: Square, dst: Square) -> Move {
        Move { src, dst }
    }

    pub const fn src(&self) -> Square {
        self.src
    }

    pub const fn dst(&self) -> Square {
        self.dst
    }
}

/// Error parsing a [`Move`] from text
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
pub enum MoveParseError {
    #[error("expected exactly two squares")]
    BadTokenCount,
    #[error("bad source square: {0}")]
    BadSrc(SquareParseError),
    #[error("bad destination square: {0}")]
    BadDst(SquareParseError),
}

impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.src, self.dst)
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Move, Self::Err> {
        let mut tokens = s.split_whitespace().fuse();
        let (src, dst) = match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(src), Some(dst), None) => (src, dst),
            _ => return Err(MoveParseError::BadTokenCount),
        };
        Ok(Move::new(
            Square::from_str(src).map_err(MoveParseError::BadSrc)?,
            Square::from_str(dst).map_err(MoveParseError::BadDst)?,
        ))
    }
}

/// The piece kinds a pawn may promote to. A king is not among them, so
/// promotion can never create a second king.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PromoteKind {
    #[default]
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl PromoteKind {
    pub fn from_char(c: char) -> Option<PromoteKind> {
        match c.to_ascii_lowercase() {
            'q' => Some(PromoteKind::Queen),
            'r' => Some(PromoteKind::Rook),
            'b' => Some(PromoteKind::Bishop),
            'n' => Some(PromoteKind::Knight),
            _ => None,
        }
    }

    pub const fn as_piece_kind(&self) -> PieceKind {
        match *self {
            PromoteKind::Queen => PieceKind::Queen,
            PromoteKind::Rook => PieceKind::Rook,
            PromoteKind::Bishop => PieceKind::Bishop,
            PromoteKind::Knight => PieceKind::Knight,
        }
    }
}

/// Why a move was rejected
///
/// Every rejection leaves the board untouched; the caller reports the
/// reason and asks for another move.
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
pub enum MoveError {
    #[error("no piece on {0}")]
    EmptySource(Square),
    #[error("the piece on the source square belongs to the opponent")]
    WrongSide,
    #[error("the piece cannot move that way")]
    IllegalShape,
    #[error("the move would leave your own king in check")]
    SelfCheck,
    #[error("the game is already over")]
    GameOver,
}
