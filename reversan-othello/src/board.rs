//! The [`Board`]: both players' pieces, with move generation, move application,
//! static evaluation and hashing.
//!
//! A board doesn't know whose turn it is. Every operation takes the acting
//! [`Player`] and works on the (mover, opponent) pair seen from that player.

use crate::bitboard::{self, Bitboard, BLACK_START, WHITE_START};
use crate::{utils, Location, LocationList, Player};
use derive_more::{Display, Error};
use std::fmt::{self, Formatter};

/// Weight of the mobility term in [`Board::rate_board`].
pub const MOBILITY_WEIGHT: i32 = 10;

/// The pieces of both players.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Board {
    pub white: Bitboard,
    pub black: Bitboard,
}

/// Returned when a move is not legal for the player attempting it.
#[derive(Clone, Copy, Debug, Display, Error, PartialEq, Eq)]
pub enum IllegalMoveError {
    #[display(fmt = "{} is not a legal move for {}", location, player)]
    NotLegal { player: Player, location: Location },
    #[display(fmt = "{} cannot pass while it has legal moves", player)]
    PassWithMoves { player: Player },
}

impl Board {
    /// A board with no pieces.
    pub const EMPTY: Self = Self::new(Bitboard::EMPTY, Bitboard::EMPTY);

    /// The standard starting position.
    pub const INITIAL: Self = Self::new(WHITE_START, BLACK_START);

    /// A scattered midgame position used to validate move generation.
    pub const TEST: Self = Self::new(
        Bitboard(0x4040_1008_1400_0000),
        Bitboard(0x0000_e010_0804_0000),
    );

    /// One of the more expensive positions to search, with Black to move.
    pub const BENCHMARK: Self = Self::new(
        Bitboard(0x0112_7e7c_3c14_3010),
        Bitboard(0xfc2c_0000_c0e8_0000),
    );

    /// Build a board from each player's pieces.
    /// Inconsistent if both bitboards share a location.
    pub const fn new(white: Bitboard, black: Bitboard) -> Self {
        Self { white, black }
    }

    /// Build a board from the pieces of `player` and of their opponent.
    #[inline]
    pub fn from_sides(player: Player, mover: Bitboard, opponent: Bitboard) -> Self {
        match player {
            Player::White => Self::new(mover, opponent),
            Player::Black => Self::new(opponent, mover),
        }
    }

    /// Get the (mover, opponent) bitboards as seen by `player`.
    #[inline]
    pub fn sides(self, player: Player) -> (Bitboard, Bitboard) {
        match player {
            Player::White => (self.white, self.black),
            Player::Black => (self.black, self.white),
        }
    }

    /// Get the pieces belonging to `player`.
    #[inline]
    pub fn pieces(self, player: Player) -> Bitboard {
        self.sides(player).0
    }

    /// Get the legal moves for `player`. Empty if `player` must pass.
    #[inline]
    pub fn find_moves(self, player: Player) -> LocationList {
        let (mover, opponent) = self.sides(player);
        bitboard::find_moves(mover, opponent).into()
    }

    /// Play `location` for `player`, flipping every captured disc.
    /// The board is left untouched if the move is not legal.
    pub fn play_move(&mut self, player: Player, location: Location) -> Result<(), IllegalMoveError> {
        if !self.find_moves(player).contains(location) {
            return Err(IllegalMoveError::NotLegal { player, location });
        }

        self.play_move_unchecked(player, location);
        Ok(())
    }

    /// Play `location` for `player` without checking that it is legal.
    ///
    /// `location` must be one of [`Board::find_moves`] for `player`. Otherwise
    /// the disc is still placed, possibly on an occupied square, and the board
    /// no longer describes a reachable position.
    #[inline]
    pub fn play_move_unchecked(&mut self, player: Player, location: Location) {
        debug_assert!(self.find_moves(player).contains(location));

        let (mover, opponent) = self.sides(player);
        let (mover, opponent) = bitboard::apply_move(mover, opponent, location.into());
        *self = Self::from_sides(player, mover, opponent);
    }

    /// Static evaluation from White's point of view: positional weights of
    /// White's discs minus Black's, plus a mobility bonus.
    #[inline]
    pub fn rate_board(self) -> i32 {
        let position = bitboard::weighted_sum(self.white) - bitboard::weighted_sum(self.black);
        let mobility = self.find_moves(Player::White).len() as i32
            - self.find_moves(Player::Black).len() as i32;
        position + MOBILITY_WEIGHT * mobility
    }

    /// Hash the position as seen by `player`, the side to move.
    /// The same discs with the other side to move hash differently.
    #[inline]
    pub fn hash(self, player: Player) -> u64 {
        let (mover, opponent) = self.sides(player);
        bitboard::hash_pair(mover, opponent)
    }

    /// Count the discs belonging to `player`.
    #[inline]
    pub fn count(self, player: Player) -> u8 {
        self.pieces(player).count_occupied()
    }

    /// Count the discs of the player to move.
    #[inline]
    pub fn count_mover(self, player: Player) -> u8 {
        self.count(player)
    }

    /// Count the discs of the player waiting.
    #[inline]
    pub fn count_opponent(self, player: Player) -> u8 {
        self.count(!player)
    }

    /// Get a mask indicating where the occupied spaces are.
    #[inline]
    pub fn occupied(self) -> Bitboard {
        self.white | self.black
    }

    /// Count the empty spaces.
    #[inline]
    pub fn count_empty(self) -> u8 {
        self.occupied().count_empty()
    }

    /// Display the board with the legal moves of `player` marked.
    pub fn display_moves(self, player: Player) -> MovesDisplay {
        MovesDisplay {
            board: self,
            moves: self.find_moves(player),
        }
    }

    fn cells(self, moves: LocationList) -> impl Iterator<Item = char> {
        let moves: Bitboard = moves.into();
        self.white
            .into_iter()
            .zip(self.black.into_iter())
            .zip(moves.into_iter())
            .map(|cell| match cell {
                ((true, _), _) => 'O',
                ((_, true), _) => '#',
                (_, true) => '*',
                _ => '.',
            })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        utils::format_grid(self.cells(LocationList::default()), f)
    }
}

/// A [`Board`] rendered together with a set of moves. See [`Board::display_moves`].
pub struct MovesDisplay {
    board: Board,
    moves: LocationList,
}

impl fmt::Display for MovesDisplay {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        utils::format_grid(self.board.cells(self.moves), f)
    }
}
