//! The piece movement model: shape/obstruction rules per piece kind,
//! candidate destination enumeration, and the attack scan built on them.
//!
//! Everything here is *pseudo-legal*: a move satisfying its piece's shape
//! and obstruction rules, ignoring whether it leaves the mover's own king
//! in check. The legality filter on top lives in [`crate::legal`].

use crate::board::Board;
use crate::types::{Color, PieceKind, Square};
use hearthchess_base::geometry;

use std::slice;

use arrayvec::ArrayVec;
use derive_more::{Deref, DerefMut};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const ROOK_DIRS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const BISHOP_DIRS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Candidate destinations of a single piece. 27 is the mobility of a queen
/// in the center of an empty board, the maximum any piece can reach.
#[derive(Default, Debug, Clone, Eq, PartialEq, Deref, DerefMut)]
pub struct CandidateList(ArrayVec<Square, 27>);

impl CandidateList {
    pub fn new() -> CandidateList {
        CandidateList(ArrayVec::new())
    }
}

impl IntoIterator for CandidateList {
    type Item = Square;
    type IntoIter = arrayvec::IntoIter<Square, 27>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a CandidateList {
    type Item = &'a Square;
    type IntoIter = slice::Iter<'a, Square>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// True iff every square strictly between `from` and `to` is empty.
///
/// Only meaningful for straight lines and exact diagonals; any other pair
/// has no path between it and yields `false`. Adjacent squares have an
/// empty in-between, so the check is vacuously true for them.
pub fn clear_path(b: &Board, from: Square, to: Square) -> bool {
    let dr = to.row() - from.row();
    let dc = to.col() - from.col();
    if !(dr == 0 || dc == 0 || dr.abs() == dc.abs()) {
        return false;
    }
    let (step_r, step_c) = (dr.signum(), dc.signum());
    let mut cur = from;
    loop {
        cur = match cur.try_shift(step_r, step_c) {
            Some(sq) => sq,
            None => return false,
        };
        if cur == to {
            return true;
        }
        if b.get(cur).is_some() {
            return false;
        }
    }
}

/// Shape/obstruction rule for the piece standing on `from`, ignoring
/// self-check consequences. `false` if `from` is empty, if the move goes
/// nowhere, or if the destination holds a piece of the mover's own color.
pub fn is_pseudo_legal(b: &Board, from: Square, to: Square) -> bool {
    let piece = match b.get(from) {
        Some(p) => p,
        None => return false,
    };
    if from == to || b.is_occupied_by(to, piece.color()) {
        return false;
    }
    let dr = to.row() - from.row();
    let dc = to.col() - from.col();
    match piece.kind() {
        PieceKind::Rook => (dr == 0 || dc == 0) && clear_path(b, from, to),
        PieceKind::Bishop => dr.abs() == dc.abs() && clear_path(b, from, to),
        PieceKind::Queen => {
            (dr == 0 || dc == 0 || dr.abs() == dc.abs()) && clear_path(b, from, to)
        }
        PieceKind::Knight => matches!((dr.abs(), dc.abs()), (2, 1) | (1, 2)),
        PieceKind::King => dr.abs() <= 1 && dc.abs() <= 1,
        PieceKind::Pawn => pawn_pseudo_legal(b, piece.color(), from, to, dr, dc),
    }
}

fn pawn_pseudo_legal(b: &Board, color: Color, from: Square, to: Square, dr: i8, dc: i8) -> bool {
    let fwd = geometry::pawn_row_delta(color);
    if dc == 0 {
        // Straight advances never capture.
        if b.get(to).is_some() {
            return false;
        }
        dr == fwd
            || (dr == 2 * fwd
                && from.rank() == geometry::pawn_home_rank(color)
                && clear_path(b, from, to))
    } else {
        // Diagonal steps must capture; a pawn never moves diagonally onto
        // an empty square.
        dr == fwd && dc.abs() == 1 && b.is_occupied_by_opponent(to, color)
    }
}

/// All pseudo-legal destinations of the piece standing on `from`. Empty if
/// `from` is empty. The checkmate search walks these for every piece of the
/// mated-looking side.
pub fn candidates(b: &Board, from: Square) -> CandidateList {
    let mut list = CandidateList::new();
    let piece = match b.get(from) {
        Some(p) => p,
        None => return list,
    };
    let color = piece.color();
    match piece.kind() {
        PieceKind::Knight => push_offsets(b, from, color, &KNIGHT_OFFSETS, &mut list),
        PieceKind::King => push_offsets(b, from, color, &KING_OFFSETS, &mut list),
        PieceKind::Rook => push_rays(b, from, color, &ROOK_DIRS, &mut list),
        PieceKind::Bishop => push_rays(b, from, color, &BISHOP_DIRS, &mut list),
        PieceKind::Queen => {
            push_rays(b, from, color, &ROOK_DIRS, &mut list);
            push_rays(b, from, color, &BISHOP_DIRS, &mut list);
        }
        PieceKind::Pawn => push_pawn(b, from, color, &mut list),
    }
    list
}

fn push_offsets(
    b: &Board,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
    out: &mut CandidateList,
) {
    for &(dr, dc) in offsets {
        if let Some(to) = from.try_shift(dr, dc) {
            if !b.is_occupied_by(to, color) {
                out.push(to);
            }
        }
    }
}

fn push_rays(b: &Board, from: Square, color: Color, dirs: &[(i8, i8)], out: &mut CandidateList) {
    for &(dr, dc) in dirs {
        let mut cur = from;
        while let Some(to) = cur.try_shift(dr, dc) {
            match b.get(to) {
                None => {
                    out.push(to);
                    cur = to;
                }
                Some(p) => {
                    if p.color() != color {
                        out.push(to);
                    }
                    break;
                }
            }
        }
    }
}

fn push_pawn(b: &Board, from: Square, color: Color, out: &mut CandidateList) {
    let fwd = geometry::pawn_row_delta(color);
    if let Some(one) = from.try_shift(fwd, 0) {
        if b.get(one).is_none() {
            out.push(one);
            if from.rank() == geometry::pawn_home_rank(color) {
                if let Some(two) = from.try_shift(2 * fwd, 0) {
                    if b.get(two).is_none() {
                        out.push(two);
                    }
                }
            }
        }
    }
    // Capture squares only; occupancy decides, not the offset list.
    for dc in [-1, 1] {
        if let Some(to) = from.try_shift(fwd, dc) {
            if b.is_occupied_by_opponent(to, color) {
                out.push(to);
            }
        }
    }
}

/// True iff any piece of color `by` has a pseudo-legal move onto `target`.
///
/// Deliberately built on pseudo-legality: whether the attacker's own king
/// would be exposed doesn't matter for delivering check, and using the full
/// legality gate here would recurse forever.
pub fn is_attacked(b: &Board, target: Square, by: Color) -> bool {
    Square::iter().any(|from| b.is_occupied_by(from, by) && is_pseudo_legal(b, from, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::str::FromStr;

    fn sq(s: &str) -> Square {
        Square::from_str(s).unwrap()
    }

    fn board(snapshot: &str) -> Board {
        Board::from_snapshot(snapshot).unwrap()
    }

    #[test]
    fn test_clear_path() {
        let b = board("4k3/8/8/8/R2p4/8/8/4K3 w");
        // Straight lines, with and without a blocker.
        assert!(clear_path(&b, sq("a4"), sq("d4")));
        assert!(!clear_path(&b, sq("a4"), sq("e4")));
        assert!(clear_path(&b, sq("a4"), sq("a8")));
        // Adjacent squares are vacuously clear.
        assert!(clear_path(&b, sq("a4"), sq("a5")));
        assert!(clear_path(&b, sq("d4"), sq("e4")));
        // Diagonals. The d4 pawn blocks the long diagonal, but occupancy of
        // an endpoint itself doesn't matter.
        assert!(clear_path(&b, sq("a1"), sq("c3")));
        assert!(!clear_path(&b, sq("a1"), sq("h8")));
        assert!(!clear_path(&b, sq("h8"), sq("a1")));
        assert!(clear_path(&b, sq("a7"), sq("d4")));
        // Not a line at all.
        assert!(!clear_path(&b, sq("a4"), sq("b6")));
    }

    #[test]
    fn test_rook() {
        let b = board("4k3/8/8/8/R2p4/8/8/4K3 w");
        assert!(is_pseudo_legal(&b, sq("a4"), sq("c4")));
        assert!(is_pseudo_legal(&b, sq("a4"), sq("d4"))); // capture
        assert!(!is_pseudo_legal(&b, sq("a4"), sq("e4"))); // beyond the blocker
        assert!(is_pseudo_legal(&b, sq("a4"), sq("a1")));
        assert!(!is_pseudo_legal(&b, sq("a4"), sq("b5"))); // not a rook line
        assert!(!is_pseudo_legal(&b, sq("a4"), sq("a4"))); // going nowhere
    }

    #[test]
    fn test_bishop() {
        let b = board("4k3/8/8/8/8/8/1B6/4K3 w");
        assert!(is_pseudo_legal(&b, sq("b2"), sq("f6")));
        assert!(is_pseudo_legal(&b, sq("b2"), sq("a1")));
        assert!(!is_pseudo_legal(&b, sq("b2"), sq("b4")));
        assert!(!is_pseudo_legal(&b, sq("b2"), sq("c4")));
    }

    #[test]
    fn test_queen() {
        let b = board("4k3/8/8/8/8/2p5/8/Q3K3 w");
        assert!(is_pseudo_legal(&b, sq("a1"), sq("a8")));
        assert!(is_pseudo_legal(&b, sq("a1"), sq("c3"))); // diagonal capture
        assert!(!is_pseudo_legal(&b, sq("a1"), sq("e5"))); // blocked at c3
        assert!(!is_pseudo_legal(&b, sq("a1"), sq("b3"))); // knight-shaped
        assert!(!is_pseudo_legal(&b, sq("a1"), sq("e1"))); // own king there
    }

    #[test]
    fn test_knight() {
        let b = Board::initial();
        assert!(is_pseudo_legal(&b, sq("g1"), sq("f3")));
        assert!(is_pseudo_legal(&b, sq("g1"), sq("h3")));
        assert!(!is_pseudo_legal(&b, sq("g1"), sq("e2"))); // own pawn
        assert!(!is_pseudo_legal(&b, sq("g1"), sq("g3"))); // not a knight shape
        // Jumping over the pawn wall is the whole point.
        assert!(is_pseudo_legal(&b, sq("b8"), sq("c6")));
    }

    #[test]
    fn test_king() {
        let b = board("4k3/8/8/8/4K3/8/8/8 w");
        for to in ["d3", "d4", "d5", "e3", "e5", "f3", "f4", "f5"] {
            assert!(is_pseudo_legal(&b, sq("e4"), sq(to)), "e4 -> {}", to);
        }
        assert!(!is_pseudo_legal(&b, sq("e4"), sq("e4")));
        assert!(!is_pseudo_legal(&b, sq("e4"), sq("e6")));
        assert!(!is_pseudo_legal(&b, sq("e4"), sq("g4")));
    }

    #[test]
    fn test_pawn_advances() {
        let b = Board::initial();
        assert!(is_pseudo_legal(&b, sq("a2"), sq("a3")));
        assert!(is_pseudo_legal(&b, sq("a2"), sq("a4")));
        assert!(!is_pseudo_legal(&b, sq("a2"), sq("a5")));
        assert!(!is_pseudo_legal(&b, sq("a2"), sq("b3"))); // diagonal to empty
        assert!(!is_pseudo_legal(&b, sq("a2"), sq("a1"))); // backwards
        // Black moves the other way.
        assert!(is_pseudo_legal(&b, sq("d7"), sq("d6")));
        assert!(is_pseudo_legal(&b, sq("d7"), sq("d5")));
        assert!(!is_pseudo_legal(&b, sq("d7"), sq("d8")));
    }

    #[test]
    fn test_pawn_blocked() {
        let b = board("4k3/8/8/8/8/p7/P7/4K3 w");
        assert!(!is_pseudo_legal(&b, sq("a2"), sq("a3"))); // occupied
        assert!(!is_pseudo_legal(&b, sq("a2"), sq("a4"))); // blocked path
        let b = board("4k3/8/8/8/p7/8/P7/4K3 w");
        assert!(is_pseudo_legal(&b, sq("a2"), sq("a3")));
        assert!(!is_pseudo_legal(&b, sq("a2"), sq("a4"))); // destination occupied
    }

    #[test]
    fn test_pawn_captures() {
        let b = board("4k3/8/8/3p4/4P3/8/8/4K3 w");
        assert!(is_pseudo_legal(&b, sq("e4"), sq("d5"))); // capture
        assert!(!is_pseudo_legal(&b, sq("e4"), sq("f5"))); // empty diagonal
        assert!(is_pseudo_legal(&b, sq("d5"), sq("e4"))); // black captures back
        assert!(!is_pseudo_legal(&b, sq("d5"), sq("c4")));
        // A pawn cannot advance straight onto an enemy piece.
        let b = board("4k3/8/8/8/4p3/4P3/8/4K3 w");
        assert!(!is_pseudo_legal(&b, sq("e3"), sq("e4")));
        assert!(!is_pseudo_legal(&b, sq("e4"), sq("e3")));
    }

    #[test]
    fn test_candidates_knight() {
        let b = board("4k3/8/8/8/4N3/8/8/4K3 w");
        assert_eq!(candidates(&b, sq("e4")).len(), 8);
        let b = board("N3k3/8/8/8/8/8/8/4K3 w");
        let list: Vec<_> = candidates(&b, sq("a8")).into_iter().collect();
        assert_eq!(list.len(), 2);
        assert!(list.contains(&sq("b6")));
        assert!(list.contains(&sq("c7")));
    }

    #[test]
    fn test_candidates_rook() {
        let b = board("4k3/8/8/8/3R4/8/8/4K3 w");
        assert_eq!(candidates(&b, sq("d4")).len(), 14);
    }

    #[test]
    fn test_candidates_pawn() {
        let b = Board::initial();
        let list: Vec<_> = candidates(&b, sq("e2")).into_iter().collect();
        assert_eq!(list, vec![sq("e3"), sq("e4")]);

        // One advance plus one capture; the other diagonal stays empty.
        let b = board("4k3/8/8/3p4/4P3/8/8/4K3 w");
        let list: Vec<_> = candidates(&b, sq("e4")).into_iter().collect();
        assert_eq!(list, vec![sq("e5"), sq("d5")]);
    }

    #[test]
    fn test_candidates_empty_square() {
        let b = Board::initial();
        assert!(candidates(&b, sq("e4")).is_empty());
    }

    #[test]
    fn test_candidates_match_pseudo_legal() {
        // The enumeration and the predicate must agree on every square pair.
        let b = board("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/R1BQKB1R w");
        for from in Square::iter() {
            let listed: HashSet<Square> = candidates(&b, from).into_iter().collect();
            let checked: HashSet<Square> = Square::iter()
                .filter(|&to| is_pseudo_legal(&b, from, to))
                .collect();
            assert_eq!(listed, checked, "disagreement for {}", from);
        }
    }

    #[test]
    fn test_is_attacked() {
        let b = board("4q2k/8/8/8/8/8/8/4K3 w");
        assert!(is_attacked(&b, sq("e1"), Color::Black));
        // A blocker on the file shields the square.
        let b = board("4q2k/8/8/8/4P3/8/8/4K3 w");
        assert!(!is_attacked(&b, sq("e1"), Color::Black));
        // Knights jump the blocker rule entirely.
        let b = board("4k3/8/8/8/8/5n2/8/4K3 w");
        assert!(is_attacked(&b, sq("e1"), Color::Black));
        assert!(!is_attacked(&b, sq("e1"), Color::White));
    }
}
