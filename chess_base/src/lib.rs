//! # Base types for hearthchess
//!
//! This is an auxiliary crate for `hearthchess`, holding the coordinate,
//! color and piece types shared by the engine and its tools.
//!
//! Normally you don't want to use this crate directly. Use `hearthchess`
//! instead.

pub mod geometry;
pub mod types;
