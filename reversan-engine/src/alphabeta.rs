//! Fail-soft alpha-beta search.
//!
//! Every move is searched with the node's full `(alpha, beta)` window, which
//! shrinks as better moves are found. Once `beta <= alpha` the remaining
//! moves can't change the result and are skipped.

use crate::search::{SequentialSearch, Variant};
use crate::{Engine, SearchOutcome, SearchSettings, SearchStats};
use reversan_othello::{Board, Player};

/// A single-threaded alpha-beta engine.
#[derive(Debug)]
pub struct Alphabeta {
    inner: SequentialSearch,
}

impl Alphabeta {
    /// Settings are used as given; see [`crate::new_engine`] for validation.
    /// The thread count is ignored.
    pub fn new(settings: SearchSettings) -> Self {
        Self {
            inner: SequentialSearch::new(Variant::Alphabeta, settings),
        }
    }
}

impl Engine for Alphabeta {
    fn analyze(&mut self, board: Board, player: Player) -> SearchOutcome {
        self.inner.analyze(board, player)
    }

    fn last_stats(&self) -> SearchStats {
        self.inner.last_stats
    }

    fn total_stats(&self) -> SearchStats {
        self.inner.total_stats
    }

    fn settings(&self) -> &SearchSettings {
        &self.inner.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reversan_othello::bitboard::Bitboard;
    use reversan_othello::Location;
    use std::str::FromStr;

    #[test]
    fn opening_moves_score_equally() {
        let mut engine = Alphabeta::new(SearchSettings::with_depth(1));
        let outcome = engine.analyze(Board::INITIAL, Player::Black);

        // The four openings are symmetric, so the first in move order wins.
        assert_eq!(outcome.best_move, Location::from_str("D3").ok());
        for mv in Board::INITIAL.find_moves(Player::Black) {
            let mut board = Board::INITIAL;
            board.play_move(Player::Black, mv).unwrap();
            assert_eq!(board.rate_board(), outcome.score);
        }
        assert_eq!(engine.last_stats(), SearchStats { nodes: 4, leaves: 4 });
    }

    #[test]
    fn stats_reset_per_search_and_accumulate() {
        let mut engine = Alphabeta::new(SearchSettings::with_depth(3));
        engine.analyze(Board::INITIAL, Player::Black);
        let first = engine.last_stats();
        assert!(first.leaves > 0 && first.nodes > first.leaves);

        engine.analyze(Board::INITIAL, Player::Black);
        assert_eq!(engine.last_stats(), first);
        assert_eq!(engine.total_stats(), first + first);
    }

    #[test]
    fn takes_the_winning_corner() {
        // Black plays A1 to capture B1 and end the game with every disc.
        let board = Board::new(
            Bitboard::from(Location::from_str("B1").unwrap()),
            Bitboard::from(Location::from_str("C1").unwrap()),
        );
        let mut engine = Alphabeta::new(SearchSettings::with_depth(4));
        let outcome = engine.analyze(board, Player::Black);
        assert_eq!(outcome.best_move, Location::from_str("A1").ok());
        assert_eq!(outcome.score, -crate::WIN_SCORE);
    }
}
