use crate::types::{Color, Rank};

pub const fn back_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R1,
        Color::Black => Rank::R8,
    }
}

pub const fn pawn_home_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R2,
        Color::Black => Rank::R7,
    }
}

pub const fn promotion_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R8,
        Color::Black => Rank::R1,
    }
}

/// Row delta of a single pawn step. White pawns march toward row 0.
pub const fn pawn_row_delta(c: Color) -> i8 {
    match c {
        Color::White => -1,
        Color::Black => 1,
    }
}
