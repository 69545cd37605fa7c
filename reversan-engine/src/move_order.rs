//! Fixed move orderings: the priority in which a search node tries its legal moves.
//!
//! Alpha-beta pruning is only as good as its move ordering, and a fixed
//! ordering by square is the only heuristic these engines use. The order
//! also breaks ties: among moves with equal scores the earlier one is kept.

use derive_more::{Display, Error};
use log::error;
use reversan_othello::{Location, LocationList, NUM_SPACES};

/// Row-major squares, upper-left first. Prunes poorly.
#[rustfmt::skip]
const LINE_BY_LINE: [u8; NUM_SPACES] = [
     0,  1,  2,  3,  4,  5,  6,  7,
     8,  9, 10, 11, 12, 13, 14, 15,
    16, 17, 18, 19, 20, 21, 22, 23,
    24, 25, 26, 27, 28, 29, 30, 31,
    32, 33, 34, 35, 36, 37, 38, 39,
    40, 41, 42, 43, 44, 45, 46, 47,
    48, 49, 50, 51, 52, 53, 54, 55,
    56, 57, 58, 59, 60, 61, 62, 63,
];

/// Corners, then edges, then the interior row by row.
#[rustfmt::skip]
const OPTIMIZED: [u8; NUM_SPACES] = [
     0, 20,  4, 12, 13,  5, 21,  1,
    22, 28, 29, 30, 31, 32, 33, 23,
     6, 34, 35, 36, 37, 38, 39,  7,
    14, 40, 41, 42, 43, 44, 45, 15,
    16, 46, 47, 48, 49, 50, 51, 17,
     8, 52, 53, 54, 55, 56, 57,  9,
    24, 58, 59, 60, 61, 62, 63, 25,
     2, 26, 10, 18, 19, 11, 27,  3,
];

/// Corners and edges first, then the center outward. X and C squares last.
#[rustfmt::skip]
const OPTIMIZED_ALT: [u8; NUM_SPACES] = [
     0, 52,  4, 12, 13,  5, 53,  1,
    54, 60, 36, 37, 38, 39, 61, 55,
     6, 40, 20, 24, 25, 21, 41,  7,
    14, 42, 26, 27, 28, 29, 43, 15,
    16, 44, 30, 31, 32, 33, 45, 17,
     8, 46, 22, 34, 35, 23, 47,  9,
    56, 62, 48, 49, 50, 51, 63, 57,
     2, 58, 10, 18, 19, 11, 59,  3,
];

/// Returned when a rank list is not a permutation of `0..64`.
#[derive(Clone, Copy, Debug, Display, Error, PartialEq, Eq)]
pub enum MoveOrderError {
    #[display(fmt = "expected 64 ranks but got {}", len)]
    WrongLength { len: usize },
    #[display(fmt = "square {} has rank {}, which is out of range", square, rank)]
    RankOutOfRange { square: usize, rank: u8 },
    #[display(fmt = "rank {} is given to more than one square", rank)]
    DuplicateRank { rank: u8 },
}

/// The built-in orderings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OrderPreset {
    LineByLine,
    Optimized,
    OptimizedAlt,
}

impl Default for OrderPreset {
    fn default() -> Self {
        Self::Optimized
    }
}

impl OrderPreset {
    /// The rank of every square, row-major.
    pub fn ranks(self) -> &'static [u8; NUM_SPACES] {
        match self {
            OrderPreset::LineByLine => &LINE_BY_LINE,
            OrderPreset::Optimized => &OPTIMIZED,
            OrderPreset::OptimizedAlt => &OPTIMIZED_ALT,
        }
    }
}

/// All 64 squares, highest priority first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOrder {
    order: [Location; NUM_SPACES],
}

impl MoveOrder {
    /// Build an ordering from `ranks`, where `ranks[square]` is the priority
    /// of the row-major `square` and rank 0 is tried first.
    pub fn try_new(ranks: &[u8]) -> Result<Self, MoveOrderError> {
        if ranks.len() != NUM_SPACES {
            return Err(MoveOrderError::WrongLength { len: ranks.len() });
        }

        let mut seen = [false; NUM_SPACES];
        for (square, &rank) in ranks.iter().enumerate() {
            let slot = seen
                .get_mut(rank as usize)
                .ok_or(MoveOrderError::RankOutOfRange { square, rank })?;
            if *slot {
                return Err(MoveOrderError::DuplicateRank { rank });
            }
            *slot = true;
        }

        Ok(Self::from_valid_ranks(ranks))
    }

    /// Like [`MoveOrder::try_new`], but an invalid list is logged and
    /// replaced by the default order.
    pub fn new(ranks: &[u8]) -> Self {
        Self::try_new(ranks).unwrap_or_else(|err| {
            error!("Invalid move order ({}), falling back to the default order", err);
            Self::default()
        })
    }

    /// `ranks` must already be a permutation of `0..64`.
    fn from_valid_ranks(ranks: &[u8]) -> Self {
        let mut order = [Location::from_square(0); NUM_SPACES];
        for (square, &rank) in ranks.iter().enumerate() {
            order[rank as usize] = Location::from_square(square as u8);
        }
        Self { order }
    }

    /// Iterate over every square by priority.
    pub fn iter(&self) -> impl Iterator<Item = Location> + '_ {
        self.order.iter().copied()
    }

    /// Iterate over the members of `moves` by priority.
    pub fn filter(&self, moves: LocationList) -> impl Iterator<Item = Location> + '_ {
        self.iter().filter(move |&loc| moves.contains(loc))
    }
}

impl From<OrderPreset> for MoveOrder {
    fn from(preset: OrderPreset) -> Self {
        Self::from_valid_ranks(preset.ranks())
    }
}

impl Default for MoveOrder {
    fn default() -> Self {
        OrderPreset::default().into()
    }
}
