//! Negascout (principal variation search).
//!
//! The first move at each node is assumed to be the best and searched with
//! the full window. Every later move only has to prove it is no better, which
//! a null-window probe does cheaply. If the probe says otherwise the move is
//! searched again with a real window.

use crate::search::{SequentialSearch, Variant};
use crate::{Engine, SearchOutcome, SearchSettings, SearchStats};
use reversan_othello::{Board, Player};

/// A single-threaded negascout engine.
#[derive(Debug)]
pub struct Negascout {
    inner: SequentialSearch,
}

impl Negascout {
    pub fn new(settings: SearchSettings) -> Self {
        Self {
            inner: SequentialSearch::new(Variant::Negascout, settings),
        }
    }
}

impl Engine for Negascout {
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
    use crate::Alphabeta;

    #[test]
    fn matches_alphabeta_from_the_opening() {
        for depth in 1..=5 {
            let settings = SearchSettings::with_depth(depth);
            let mut negascout = Negascout::new(settings.clone());
            let mut alphabeta = Alphabeta::new(settings);

            let expected = alphabeta.analyze(Board::INITIAL, Player::Black);
            let outcome = negascout.analyze(Board::INITIAL, Player::Black);
            assert_eq!(outcome, expected, "depth {}", depth);
        }
    }

    #[test]
    fn table_does_not_change_the_result() {
        let with_table = SearchSettings::with_depth(6);
        let without_table = SearchSettings {
            transposition_enabled: false,
            ..with_table.clone()
        };

        for &player in [Player::Black, Player::White].iter() {
            let cached = Negascout::new(with_table.clone()).analyze(Board::TEST, player);
            let uncached = Negascout::new(without_table.clone()).analyze(Board::TEST, player);
            assert_eq!(cached, uncached);
        }
    }

    #[test]
    fn repeated_searches_agree() {
        let mut engine = Negascout::new(SearchSettings::with_depth(5));
        let first = engine.analyze(Board::BENCHMARK, Player::Black);
        let second = engine.analyze(Board::BENCHMARK, Player::Black);
        assert_eq!(first, second);
        assert!(first.best_move.is_some());
    }
}
