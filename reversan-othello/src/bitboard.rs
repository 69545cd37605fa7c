//! Low-level bitboard operations.
//!
//! For efficiency, [`Bitboard`] operations are unchecked and may leave the
//! board in an inconsistent state if invalid data is passed.
//!
//! Under the hood, all these operations work on u64 bitboards. By convention,
//! the MSB is the upper-left of the board, and uses row-major order.

use crate::{utils, NUM_SPACES};
use derive_more::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, From, Into, Not,
};
use std::fmt::{self, Display, Formatter};

/// Holds a single bit per location on an Othello board.
/// Wraps [`u64`] for efficient bit-twiddling, but avoids mixing with numerics.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    PartialOrd,
    Ord,
    Default,
    From,
    Into,
    BitAnd,
    BitAndAssign,
    BitOr,
    BitOrAssign,
    BitXor,
    BitXorAssign,
    Not,
)]
pub struct Bitboard(pub(crate) u64);

/// Starting bitboard for Black.
pub const BLACK_START: Bitboard = Bitboard(0x0000000810000000);

/// Starting bitboard for White.
pub const WHITE_START: Bitboard = Bitboard(0x0000001008000000);

/// Everything except the leftmost column (A).
const NOT_A_FILE: u64 = 0x7f7f7f7f7f7f7f7f;

/// Everything except the rightmost column (H).
const NOT_H_FILE: u64 = 0xfefefefefefefefe;

/// Everything except the two outer columns.
const INNER_FILES: u64 = NOT_A_FILE & NOT_H_FILE;

const FULL_MASK: u64 = 0xffffffffffffffff;

/// Positional weight of every square, row-major from the upper-left.
#[rustfmt::skip]
pub const SQUARE_WEIGHTS: [i8; NUM_SPACES] = [
    100, -15,  10,   5,   5,  10, -15, 100,
    -15, -30,  -2,  -2,  -2,  -2, -30, -15,
     10,  -2,   1,  -1,  -1,   1,  -2,  10,
      5,  -2,  -1,  -1,  -1,  -1,  -2,   5,
      5,  -2,  -1,  -1,  -1,  -1,  -2,   5,
     10,  -2,   1,  -1,  -1,   1,  -2,  10,
    -15, -30,  -2,  -2,  -2,  -2, -30, -15,
    100, -15,  10,   5,   5,  10, -15, 100,
];

impl Display for Bitboard {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        utils::format_grid(
            self.into_iter().map(|bit| match bit {
                false => '.',
                true => '#',
            }),
            f,
        )
    }
}

impl Bitboard {
    /// A bitboard with no locations set.
    pub const EMPTY: Self = Self(0);

    /// Count the number of occupied spaces in the bitboard.
    #[inline]
    pub fn count_occupied(self) -> u8 {
        self.0.count_ones() as u8
    }

    /// Count the number of empty spaces in the bitboard.
    #[inline]
    pub fn count_empty(self) -> u8 {
        self.0.count_zeros() as u8
    }

    /// Return true if this bitboard is empty.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Shift a bitboard by a signed amount: positive shifts toward the LSB
/// (right and down), negative shifts toward the MSB (left and up).
#[inline]
fn step(bits: u64, shift: i8) -> u64 {
    if shift > 0 {
        bits >> shift
    } else {
        bits << -shift
    }
}

/// Compute a mask of the legal moves for the active player from
/// masks of the active player's pieces and the opponent's pieces.
/// Undefined behavior if an invalid Othello board is specified.
#[inline]
pub fn find_moves(active: Bitboard, opponent: Bitboard) -> Bitboard {
    // Axes as (shift, opponent mask): E/W, N/S, NE/SW, NW/SE.
    // Opponent pieces on the outer columns can never be flanked horizontally
    // or diagonally, so clipping them also stops runs from wrapping around.
    let inner_opponent = opponent.0 & INNER_FILES;
    let axes: [(u32, u64); 4] = [
        (1, inner_opponent),
        (8, opponent.0),
        (7, inner_opponent),
        (9, inner_opponent),
    ];

    let mut moves = 0u64;
    for &(shift, mask) in axes.iter() {
        // Smear our pieces along both directions of the axis through opponent runs.
        // A run between two pieces holds at most 6 opponent discs.
        let mut run = ((active.0 << shift) | (active.0 >> shift)) & mask;
        for _ in 0..5 {
            run |= ((run << shift) | (run >> shift)) & mask;
        }
        moves |= (run << shift) | (run >> shift);
    }

    // Moves are the empty squares one step past a run.
    Bitboard(moves & !(active.0 | opponent.0))
}

/// Compute the discs flipped when the active player plays `move_mask`.
/// `move_mask` must be a one-hot bitboard indicating the move location.
#[inline]
pub fn find_flips(active: Bitboard, opponent: Bitboard, move_mask: Bitboard) -> Bitboard {
    // (shift, column mask) for all 8 directions. The mask drops the column a
    // wrapped-around step would land in.
    const DIRECTIONS: [(i8, u64); 8] = [
        (-9, NOT_H_FILE), // up-left
        (-8, FULL_MASK),  // up
        (-7, NOT_A_FILE), // up-right
        (-1, NOT_H_FILE), // left
        (1, NOT_A_FILE),  // right
        (7, NOT_H_FILE),  // down-left
        (8, FULL_MASK),   // down
        (9, NOT_A_FILE),  // down-right
    ];

    let mut flips = 0u64;
    for &(shift, mask) in DIRECTIONS.iter() {
        let active_masked = active.0 & mask;
        let opponent_masked = opponent.0 & mask;

        let mut line = 0u64;
        let mut cursor = step(move_mask.0, shift);
        while cursor & opponent_masked != 0 {
            line |= cursor;
            cursor = step(cursor, shift);
        }

        // The run only flips if it is capped by one of our own pieces.
        if cursor & active_masked != 0 {
            flips |= line;
        }
    }

    Bitboard(flips)
}

/// Compute an updated board after a given move is made, returning new bitboards
/// for the active player and the opponent. `move_mask` must be a one-hot bitboard
/// indicating the move location. Undefined behavior if an invalid Othello board
/// or `move_mask` is provided.
#[inline]
pub fn apply_move(
    active: Bitboard,
    opponent: Bitboard,
    move_mask: Bitboard,
) -> (Bitboard, Bitboard) {
    let flips = find_flips(active, opponent, move_mask);
    (active | flips | move_mask, opponent ^ flips)
}

/// Sum the positional weights of every occupied location.
#[inline]
pub fn weighted_sum(bitboard: Bitboard) -> i32 {
    let mut bits = bitboard.0;
    let mut sum = 0i32;
    while bits != 0 {
        let index = bits.trailing_zeros() as usize;
        sum += SQUARE_WEIGHTS[NUM_SPACES - 1 - index] as i32;
        bits &= bits - 1;
    }
    sum
}

/// Finalization mix of murmur3: three xor-shift rounds around two multiplies.
#[inline]
pub fn mix(bits: u64) -> u64 {
    let mut h = bits;
    h ^= h >> 33;
    h = h.wrapping_mul(0xff51afd7ed558ccd);
    h ^= h >> 33;
    h = h.wrapping_mul(0xc4ceb9fe1a85ec53);
    h ^= h >> 33;
    h
}

/// Hash a (mover, opponent) pair. Not symmetric in its arguments.
#[inline]
pub fn hash_pair(active: Bitboard, opponent: Bitboard) -> u64 {
    // Salting one side keeps `hash_pair(a, b) != hash_pair(b, a)`.
    const OPPONENT_SALT: u64 = 0x9e3779b97f4a7c15;
    mix(active.0) ^ mix(opponent.0 ^ OPPONENT_SALT)
}

/// Iterator for the bits in a [`Bitboard`].
#[derive(Clone, Copy, Debug)]
pub struct Bits {
    remaining: usize,
    bitboard: Bitboard,
}

impl Iterator for Bits {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let bitmask = Bitboard::from(1u64 << (self.remaining - 1));
        let bit = !(self.bitboard & bitmask).is_empty();
        self.remaining -= 1;

        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Bits {}

/// Iterate over the bits in row-major order.
impl IntoIterator for Bitboard {
    type Item = bool;
    type IntoIter = Bits;

    fn into_iter(self) -> Self::IntoIter {
        Bits {
            remaining: NUM_SPACES,
            bitboard: self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_moves() {
        let moves = find_moves(BLACK_START, WHITE_START);
        // D3, C4, F5, E6
        let expected = (1u64 << (63 - 19)) | (1 << (63 - 26)) | (1 << (63 - 37)) | (1 << (63 - 44));
        assert_eq!(moves, Bitboard(expected));
    }

    #[test]
    fn no_horizontal_wraparound() {
        // Black on H1, White on A2: adjacent in bit order but not on the board.
        let black = Bitboard(1 << 56);
        let white = Bitboard(1 << 55);
        assert!(find_moves(black, white).is_empty());
        assert!(find_moves(white, black).is_empty());
    }

    #[test]
    fn flips_stop_at_board_edge() {
        // White run along row 1 ending on the edge is not capped.
        let black = Bitboard(1 << 63); // A1
        let white = Bitboard((1 << 62) | (1 << 61)); // B1, C1
        let move_mask = Bitboard(1 << 60); // D1
        let (new_black, new_white) = apply_move(black, white, move_mask);
        assert_eq!(new_black, Bitboard(0xf000000000000000));
        assert!(new_white.is_empty());

        // Playing H2 next to a White disc on A3 must not flip across rows.
        let black = Bitboard(1 << 46); // B3
        let white = Bitboard(1 << 47); // A3
        let (new_black, new_white) = apply_move(black, white, Bitboard(1 << 48));
        assert_eq!(new_white, white);
        assert_eq!(new_black, black | Bitboard(1 << 48));
    }

    #[test]
    fn weighted_sum_corners() {
        let corners = Bitboard((1 << 63) | (1 << 56) | (1 << 7) | 1);
        assert_eq!(weighted_sum(corners), 400);
        assert_eq!(weighted_sum(Bitboard::EMPTY), 0);
        assert_eq!(weighted_sum(Bitboard(FULL_MASK)), SQUARE_WEIGHTS.iter().map(|&w| w as i32).sum());
    }

    #[test]
    fn weights_are_symmetric() {
        for row in 0..8 {
            for col in 0..8 {
                let w = SQUARE_WEIGHTS[row * 8 + col];
                assert_eq!(w, SQUARE_WEIGHTS[col * 8 + row]);
                assert_eq!(w, SQUARE_WEIGHTS[(7 - row) * 8 + col]);
                assert_eq!(w, SQUARE_WEIGHTS[row * 8 + (7 - col)]);
            }
        }
    }

    #[test]
    fn hash_pair_is_order_sensitive() {
        assert_eq!(
            hash_pair(BLACK_START, WHITE_START),
            hash_pair(BLACK_START, WHITE_START)
        );
        assert_ne!(
            hash_pair(BLACK_START, WHITE_START),
            hash_pair(WHITE_START, BLACK_START)
        );
    }
}
