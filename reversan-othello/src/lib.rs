//! `reversan-othello` is the board layer of the Reversan engine.
//!
//! This package implements three levels of abstraction:
//!
//!  - [`bitboard`] contains the raw, unchecked operations for working with Othello boards:
//!    move generation, move application, positional weights and hashing.
//!  - [`Board`] holds both players' pieces and exposes those operations per [`Player`].
//!    It never tracks whose turn it is, which makes it cheap to copy in search.
//!  - [`Game`] is a high-level, checked interface that also tracks the turn and passes.
//!    It is slower but safer than [`Board`].

pub mod bitboard;
pub mod test_utils;

mod board;
mod game;
mod location;
mod utils;

pub use board::*;
pub use game::*;
pub use location::*;

/// The number of spaces on one edge of an Othello board.
pub const EDGE_LENGTH: usize = 8;

/// The number of spaces on an Othello board.
pub const NUM_SPACES: usize = 64;
