//! Negascout with the root moves split across threads.
//!
//! The first root move is searched on the calling thread with the full window,
//! since the bound it sets is what lets every other move be probed cheaply.
//! The remaining root moves become pool tasks. Each task probes its move with
//! the best bound known when it starts, then shares any improvement.
//! Below the root, each task searches on its own thread.

use crate::search::{child, improves, Scouted, Searcher, Variant, Window};
use crate::thread_pool::{lock, ThreadPool};
use crate::transposition::ShardedTranspositionTable;
use crate::{Engine, SearchOutcome, SearchSettings, SearchStats};
use arrayvec::ArrayVec;
use log::debug;
use reversan_othello::{Board, Location, Player, NUM_SPACES};
use std::io;
use std::sync::{Arc, Mutex};

/// State shared by the tasks of one root search.
struct RootSearch {
    board: Board,
    player: Player,
    settings: Arc<SearchSettings>,
    table: Arc<ShardedTranspositionTable>,
    window: Mutex<Window>,
    /// One slot per root move, in move order. Empty if the task never finished.
    results: Mutex<ArrayVec<Option<Scouted>, NUM_SPACES>>,
    stats: Mutex<SearchStats>,
}

impl RootSearch {
    /// Search root move `index` with a snapshot of the shared window.
    fn search_move(&self, index: usize, mv: Location) {
        let snapshot = *lock(&self.window);

        let mut table = Arc::clone(&self.table);
        let mut searcher = Searcher::new(Variant::Negascout, &self.settings, &mut table);
        let next = child(self.board, self.player, mv);
        let result = searcher.scout(next, self.settings.depth.saturating_sub(1), self.player, snapshot);

        lock(&self.window).tighten(self.player, result.eval);
        lock(&self.results)[index] = Some(result);
        *lock(&self.stats) += searcher.stats;
    }

    /// Pick the best finished move. Among equal scores an exact result
    /// beats a bound, then the earlier move wins.
    fn best(&self, candidates: &[Location]) -> Option<(Location, i32)> {
        let results = lock(&self.results);
        let mut best: Option<(Location, Scouted)> = None;

        for (&mv, result) in candidates.iter().zip(results.iter()) {
            let result = match result {
                Some(result) => *result,
                None => continue,
            };

            let better = match best {
                None => true,
                Some((_, current)) => {
                    improves(self.player, result.eval, current.eval)
                        || (result.eval == current.eval && result.exact && !current.exact)
                }
            };
            if better {
                best = Some((mv, result));
            }
        }

        best.map(|(mv, result)| (mv, result.eval))
    }
}

/// A negascout engine searching root moves in parallel.
pub struct ParallelNegascout {
    settings: Arc<SearchSettings>,
    table: Arc<ShardedTranspositionTable>,
    pool: ThreadPool,
    last_stats: SearchStats,
    total_stats: SearchStats,
}

impl ParallelNegascout {
    /// Start a pool of `settings.threads` workers.
    pub fn new(settings: SearchSettings) -> io::Result<Self> {
        let pool = ThreadPool::new(settings.threads)?;
        Ok(Self {
            settings: Arc::new(settings),
            table: Arc::new(ShardedTranspositionTable::new()),
            pool,
            last_stats: SearchStats::default(),
            total_stats: SearchStats::default(),
        })
    }
}

impl Engine for ParallelNegascout {
    fn analyze(&mut self, board: Board, player: Player) -> SearchOutcome {
        self.table.clear();

        let candidates: ArrayVec<Location, NUM_SPACES> = self
            .settings
            .move_order
            .filter(board.find_moves(player))
            .collect();

        let first = match candidates.first() {
            Some(&first) => first,
            None => {
                self.last_stats = SearchStats::default();
                return SearchOutcome {
                    best_move: None,
                    score: board.rate_board(),
                };
            }
        };

        let mut table = Arc::clone(&self.table);
        let mut searcher = Searcher::new(Variant::Negascout, &self.settings, &mut table);
        let eval = searcher.node(
            child(board, player, first),
            self.settings.depth.saturating_sub(1),
            !player,
            Window::FULL,
            false,
        );

        let mut window = Window::FULL;
        window.tighten(player, eval);
        let mut results: ArrayVec<Option<Scouted>, NUM_SPACES> =
            candidates.iter().map(|_| None).collect();
        results[0] = Some(Scouted { eval, exact: true });

        let root = Arc::new(RootSearch {
            board,
            player,
            settings: Arc::clone(&self.settings),
            table: Arc::clone(&self.table),
            window: Mutex::new(window),
            results: Mutex::new(results),
            stats: Mutex::new(searcher.stats),
        });

        for (index, &mv) in candidates.iter().enumerate().skip(1) {
            let root = Arc::clone(&root);
            self.pool.add_task(move || root.search_move(index, mv));
        }
        self.pool.join();

        let stats = *lock(&root.stats);
        self.last_stats = stats;
        self.total_stats += stats;

        // The first move always has a result.
        let (best_move, score) = root.best(&candidates).unwrap_or((first, eval));
        debug!(
            "Parallel search for {} on {} threads: {} nodes, {} leaves, {} table entries, score {}",
            player,
            self.pool.size(),
            stats.nodes,
            stats.leaves,
            self.table.len(),
            score
        );

        SearchOutcome {
            best_move: Some(best_move),
            score,
        }
    }

    fn last_stats(&self) -> SearchStats {
        self.last_stats
    }

    fn total_stats(&self) -> SearchStats {
        self.total_stats
    }

    fn settings(&self) -> &SearchSettings {
        &self.settings
    }
}
