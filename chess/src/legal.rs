//! The legality filter and the check/checkmate evaluation built on it.
//!
//! A move is *legal* when it is pseudo-legal ([`crate::movegen`]) and does
//! not leave the mover's own king in check. The self-check test runs on an
//! independent copy of the board, so a rejected hypothetical can never
//! corrupt the live position.

use crate::board::Board;
use crate::movegen;
use crate::moves::MoveError;
use crate::types::{Color, Square};

use tracing::debug;

/// True iff the king of `color` is attacked by any opposing piece.
pub fn is_in_check(b: &Board, color: Color) -> bool {
    movegen::is_attacked(b, b.king_pos(color), color.opposite())
}

fn leaves_king_exposed(b: &Board, from: Square, to: Square, mover: Color) -> bool {
    let mut hypothetical = b.clone();
    hypothetical.apply_unchecked(from, to);
    is_in_check(&hypothetical, mover)
}

/// The single legality gate: a piece stands on `from`, it belongs to the
/// side to move, the move passes its piece's shape/obstruction rule, and it
/// doesn't leave the mover's own king in check.
pub fn validate_move(b: &Board, from: Square, to: Square) -> Result<(), MoveError> {
    let piece = b.get(from).ok_or(MoveError::EmptySource(from))?;
    if piece.color() != b.side() {
        return Err(MoveError::WrongSide);
    }
    if !movegen::is_pseudo_legal(b, from, to) {
        return Err(MoveError::IllegalShape);
    }
    if leaves_king_exposed(b, from, to, piece.color()) {
        return Err(MoveError::SelfCheck);
    }
    Ok(())
}

/// True iff `color` has at least one move that passes the legality gate.
/// Candidates are pseudo-legal by construction, so only the self-check
/// filter remains to be applied here.
pub fn has_legal_move(b: &Board, color: Color) -> bool {
    for from in Square::iter() {
        if !b.is_occupied_by(from, color) {
            continue;
        }
        for to in movegen::candidates(b, from) {
            if !leaves_king_exposed(b, from, to, color) {
                return true;
            }
        }
    }
    false
}

/// Checkmate: in check, with no legal move left for any piece of `color`.
///
/// The search covers the whole army, not just the king: blocking the line
/// or capturing the checking piece resolves check as well as a king move
/// does.
pub fn is_checkmate(b: &Board, color: Color) -> bool {
    if !is_in_check(b, color) {
        return false;
    }
    debug!("checkmate search for {:?}", color);
    !has_legal_move(b, color)
}
