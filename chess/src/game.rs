//! The turn controller: status tracking and move application over a
//! validated board, plus the snapshot save/restore used for persistence.

use crate::board::{Board, BoardParseError};
use crate::moves::{Move, MoveError, PromoteKind};
use crate::types::Color;

use tracing::info;

/// State of the game as seen by the side to move.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameStatus {
    /// The side to move is free to play.
    InProgress,
    /// The side to move is in check and must address it.
    Check,
    /// Terminal: the side to move has no legal reply.
    Checkmate { winner: Color },
}

/// A running game: the current position plus its status.
///
/// Both players are addressed by their color; White always moves first.
/// Rejected moves leave the game exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    status: GameStatus,
}

impl Game {
    /// Starts a game from the standard initial placement, White to move.
    pub fn new() -> Game {
        Self::with_board(Board::initial())
    }

    /// Restores a game from a snapshot produced by [`Game::snapshot()`].
    /// The status is recomputed from the position, so a saved game resumes
    /// exactly where it stopped.
    pub fn from_snapshot(s: &str) -> Result<Game, BoardParseError> {
        Ok(Self::with_board(Board::from_snapshot(s)?))
    }

    fn with_board(board: Board) -> Game {
        let status = Self::status_of(&board);
        Game { board, status }
    }

    /// The complete game state as a single line of text: piece placement
    /// plus side to move.
    pub fn snapshot(&self) -> String {
        self.board.as_snapshot()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side()
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::Checkmate { .. })
    }

    /// Plays `mv` for the side to move. On success the game advances and
    /// the returned status describes the situation of the *new* side to
    /// move; on rejection the game is unchanged and the error names the
    /// reason.
    pub fn make_move(
        &mut self,
        mv: Move,
        promote: Option<PromoteKind>,
    ) -> Result<GameStatus, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        let next = self.board.make_move(mv, promote)?;
        info!("{:?} played {}", self.board.side(), mv);
        self.board = next;
        self.status = Self::status_of(&self.board);
        if let GameStatus::Checkmate { winner } = self.status {
            info!("checkmate, {:?} wins", winner);
        }
        Ok(self.status)
    }

    fn status_of(board: &Board) -> GameStatus {
        let side = board.side();
        if board.is_checkmate(side) {
            GameStatus::Checkmate {
                winner: side.opposite(),
            }
        } else if board.is_in_check(side) {
            GameStatus::Check
        } else {
            GameStatus::InProgress
        }
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}
