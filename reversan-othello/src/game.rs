//! Implements game-level Othello logic: whose turn it is, passing and the end of the game.
//!
//! For correctness, this higher-level interface is preferred, but for
//! performance engines use [`Board`] directly and track the turn themselves.

use crate::board::{Board, IllegalMoveError};
use crate::{Location, LocationList};
use std::fmt;

/// One of the two players in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    Black,
    White,
}

impl Default for Player {
    /// Gets the starting player (black).
    fn default() -> Self {
        Self::Black
    }
}

impl std::ops::Not for Player {
    type Output = Self;

    /// Gets the other player.
    fn not(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => f.write_str("Black"),
            Player::White => f.write_str("White"),
        }
    }
}

/// An action in an Othello game: pass or place a disc.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Play(Location),
    Pass,
}

impl From<Location> for Action {
    fn from(loc: Location) -> Self {
        Self::Play(loc)
    }
}

impl From<Option<Location>> for Action {
    /// `None` is a pass, matching what engines return when there is no move.
    fn from(loc: Option<Location>) -> Self {
        loc.map_or(Self::Pass, Self::Play)
    }
}

/// The complete state of an Othello game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Game {
    pub board: Board,
    pub active_player: Player,
    pub just_passed: bool,
}

impl Default for Game {
    /// Gets the starting position with Black to move.
    fn default() -> Self {
        Self::new(Board::INITIAL, Player::default())
    }
}

impl Game {
    /// Start a game from an arbitrary position.
    pub fn new(board: Board, active_player: Player) -> Self {
        Self {
            board,
            active_player,
            just_passed: false,
        }
    }

    /// Get the legal moves for the active player.
    #[inline]
    pub fn moves(self) -> LocationList {
        self.board.find_moves(self.active_player)
    }

    /// Make an action as the active player, checking that it is legal.
    /// Passing is only legal without any moves.
    pub fn apply(self, action: Action) -> Result<Self, IllegalMoveError> {
        let player = self.active_player;
        match action {
            Action::Pass if self.moves().is_empty() => Ok(Self {
                board: self.board,
                active_player: !player,
                just_passed: true,
            }),
            Action::Pass => Err(IllegalMoveError::PassWithMoves { player }),
            Action::Play(loc) => {
                let mut board = self.board;
                board.play_move(player, loc)?;
                Ok(Self {
                    board,
                    active_player: !player,
                    just_passed: false,
                })
            }
        }
    }

    /// Whether neither player can move.
    pub fn is_finished(self) -> bool {
        self.moves().is_empty() && self.board.find_moves(!self.active_player).is_empty()
    }

    /// The player with more discs, or `None` for a draw.
    pub fn winner(self) -> Option<Player> {
        let black = self.board.count(Player::Black);
        let white = self.board.count(Player::White);

        if black > white {
            Some(Player::Black)
        } else if white > black {
            Some(Player::White)
        } else {
            None
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board.display_moves(self.active_player))?;
        write!(
            f,
            "Black (#): {}  White (O): {}  {} to move",
            self.board.count(Player::Black),
            self.board.count(Player::White),
            self.active_player
        )?;
        if self.just_passed {
            f.write_str(" (last move was a pass)")?;
        }
        Ok(())
    }
}
