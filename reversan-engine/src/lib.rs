//! `reversan-engine` finds the best move in an Othello position by searching
//! the game tree to a fixed depth.
//!
//! Every engine implements [`Engine`]:
//!
//!  - [`Alphabeta`] is plain fail-soft alpha-beta search.
//!  - [`Negascout`] probes all but the first move with a null window first.
//!  - [`ParallelNegascout`] splits the root moves of a negascout search across a [`ThreadPool`].
//!
//! All of them share a fixed [`MoveOrder`] and, optionally, a transposition table.
//! Use [`new_engine`] to pick an implementation from an [`Algorithm`] and [`SearchSettings`].

pub mod alphabeta;
pub mod move_order;
pub mod negascout;
pub mod parallel;
pub mod settings;
pub mod thread_pool;
pub mod transposition;

mod search;

pub use alphabeta::Alphabeta;
pub use move_order::{MoveOrder, MoveOrderError, OrderPreset};
pub use negascout::Negascout;
pub use parallel::ParallelNegascout;
pub use search::{SCORE_BOUND, WIN_SCORE};
pub use settings::{SearchSettings, SettingsError};
pub use thread_pool::ThreadPool;

use derive_more::{Add, AddAssign, Display, Error, From};
use log::warn;
use reversan_othello::{Board, Location, Player};
use std::io;

/// Node counters for a search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Add, AddAssign)]
pub struct SearchStats {
    /// Positions visited, including leaves.
    pub nodes: u64,
    /// Positions scored with the static evaluation.
    pub leaves: u64,
}

/// The result of analyzing a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    /// `None` if the player to move has no legal move.
    pub best_move: Option<Location>,
    /// The score of `best_move` from White's point of view. Without a move,
    /// the static evaluation of the position.
    pub score: i32,
}

/// A fixed-depth Othello search.
pub trait Engine: Send {
    /// Search `board` with `player` to move.
    fn analyze(&mut self, board: Board, player: Player) -> SearchOutcome;

    /// Find the best move for `player`, or `None` if they must pass.
    /// Whether the game is over is up to the caller to check.
    fn search(&mut self, board: Board, player: Player) -> Option<Location> {
        self.analyze(board, player).best_move
    }

    /// Counters from the most recent search.
    fn last_stats(&self) -> SearchStats;

    /// Counters summed over every search this engine has run.
    fn total_stats(&self) -> SearchStats;

    fn settings(&self) -> &SearchSettings;
}

/// The search algorithms to choose between.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Alphabeta,
    Negascout,
}

/// Returned when an engine can't be built.
#[derive(Debug, Display, Error, From)]
pub enum EngineError {
    #[display(fmt = "invalid settings: {}", _0)]
    Settings(SettingsError),
    #[display(fmt = "cannot start search threads: {}", _0)]
    Spawn(io::Error),
}

/// Build an engine for `algorithm`. Negascout with more than one thread
/// becomes a [`ParallelNegascout`]; alpha-beta always runs on one thread.
pub fn new_engine(
    algorithm: Algorithm,
    settings: SearchSettings,
) -> Result<Box<dyn Engine>, EngineError> {
    let settings = settings.validated()?;

    Ok(match algorithm {
        Algorithm::Alphabeta => {
            if settings.threads > 1 {
                warn!(
                    "Alphabeta search is single-threaded, ignoring {} threads",
                    settings.threads
                );
            }
            Box::new(Alphabeta::new(settings))
        }
        Algorithm::Negascout if settings.threads > 1 => Box::new(ParallelNegascout::new(settings)?),
        Algorithm::Negascout => Box::new(Negascout::new(settings)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_accumulate() {
        let mut total = SearchStats::default();
        total += SearchStats { nodes: 10, leaves: 7 };
        total += SearchStats { nodes: 5, leaves: 1 };
        assert_eq!(total, SearchStats { nodes: 15, leaves: 8 });
        assert_eq!(total + total, SearchStats { nodes: 30, leaves: 16 });
    }

    #[test]
    fn new_engine_validates_settings() {
        let err = new_engine(Algorithm::Negascout, SearchSettings::with_depth(0)).err();
        assert!(matches!(
            err,
            Some(EngineError::Settings(SettingsError::DepthOutOfRange { depth: 0 }))
        ));

        let settings = SearchSettings {
            threads: 12,
            ..SearchSettings::default()
        };
        assert!(new_engine(Algorithm::Alphabeta, settings).is_err());
    }

    #[test]
    fn new_engine_keeps_settings() {
        let settings = SearchSettings {
            threads: 2,
            transposition_enabled: false,
            ..SearchSettings::with_depth(4)
        };
        for &algorithm in [Algorithm::Alphabeta, Algorithm::Negascout].iter() {
            let engine = new_engine(algorithm, settings.clone()).unwrap();
            assert_eq!(engine.settings(), &settings);
            assert_eq!(engine.total_stats(), SearchStats::default());
        }
    }

    #[test]
    fn search_reports_pass_as_none() {
        let board = Board::new(
            reversan_othello::bitboard::Bitboard::from(1u64 << 63),
            reversan_othello::bitboard::Bitboard::EMPTY,
        );
        let mut engine = new_engine(Algorithm::Negascout, SearchSettings::with_depth(3)).unwrap();
        assert_eq!(engine.search(board, Player::Black), None);
    }
}
