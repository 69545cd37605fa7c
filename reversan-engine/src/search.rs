//! The minimax recursion shared by every engine.
//!
//! Scores are always from White's point of view: White maximizes and Black
//! minimizes. Search is fail-soft, so a node may return a score outside its
//! window, which is then only a bound on the true value.

use crate::transposition::{TranspositionStore, TranspositionTable};
use crate::{SearchOutcome, SearchSettings, SearchStats};
use log::debug;
use reversan_othello::{Board, Location, Player};

/// Score of a finished game won by White. Black wins score the negation.
pub const WIN_SCORE: i32 = 999;

/// Larger in magnitude than any score; the root window is `(-SCORE_BOUND, SCORE_BOUND)`.
pub const SCORE_BOUND: i32 = 1000;

/// An `(alpha, beta)` search window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Window {
    pub alpha: i32,
    pub beta: i32,
}

impl Window {
    pub const FULL: Self = Self {
        alpha: -SCORE_BOUND,
        beta: SCORE_BOUND,
    };

    /// Raise alpha (White) or lower beta (Black) after `player` found `eval`.
    #[inline]
    pub fn tighten(&mut self, player: Player, eval: i32) {
        match player {
            Player::White => self.alpha = self.alpha.max(eval),
            Player::Black => self.beta = self.beta.min(eval),
        }
    }

    /// Whether the window is empty, so the remaining moves can be pruned.
    #[inline]
    pub fn is_closed(self) -> bool {
        self.beta <= self.alpha
    }

    #[inline]
    pub fn contains(self, eval: i32) -> bool {
        self.alpha < eval && eval < self.beta
    }

    /// The null window at the edge `player` is trying to improve.
    #[inline]
    fn null(self, player: Player) -> Self {
        match player {
            Player::White => Self {
                alpha: self.alpha,
                beta: self.alpha + 1,
            },
            Player::Black => Self {
                alpha: self.beta - 1,
                beta: self.beta,
            },
        }
    }

    /// The window to re-search with after a null-window probe returned `probe`.
    #[inline]
    fn research(self, player: Player, probe: i32) -> Self {
        match player {
            Player::White => Self {
                alpha: probe,
                beta: self.beta,
            },
            Player::Black => Self {
                alpha: self.alpha,
                beta: probe,
            },
        }
    }
}

/// Whether `eval` is strictly better than `best` for `player`.
#[inline]
pub(crate) fn improves(player: Player, eval: i32, best: i32) -> bool {
    match player {
        Player::White => eval > best,
        Player::Black => eval < best,
    }
}

/// The score `player` starts from before trying any move.
#[inline]
fn worst_score(player: Player) -> i32 {
    match player {
        Player::White => -SCORE_BOUND,
        Player::Black => SCORE_BOUND,
    }
}

/// Score a position where neither side can move.
#[inline]
pub(crate) fn final_score(board: Board) -> i32 {
    let white = board.count(Player::White);
    let black = board.count(Player::Black);

    if white > black {
        WIN_SCORE
    } else if black > white {
        -WIN_SCORE
    } else {
        0
    }
}

/// The board after `player` plays `mv`, which must be legal.
#[inline]
pub(crate) fn child(mut board: Board, player: Player, mv: Location) -> Board {
    board.play_move_unchecked(player, mv);
    board
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Variant {
    /// Every move is searched with the full window.
    Alphabeta,
    /// Moves after the first are probed with a null window and only
    /// re-searched if the probe shows they might be better.
    Negascout,
}

/// The result of searching one move after the first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Scouted {
    pub eval: i32,
    /// Whether `eval` came from a search whose window it landed inside.
    /// Otherwise it is only a bound.
    pub exact: bool,
}

/// One search: an engine's settings and table, plus node counters.
pub(crate) struct Searcher<'a, T: TranspositionStore> {
    variant: Variant,
    settings: &'a SearchSettings,
    table: &'a mut T,
    pub stats: SearchStats,
}

impl<'a, T: TranspositionStore> Searcher<'a, T> {
    pub fn new(variant: Variant, settings: &'a SearchSettings, table: &'a mut T) -> Self {
        Self {
            variant,
            settings,
            table,
            stats: SearchStats::default(),
        }
    }

    /// Search every legal move of `player` to the configured depth and pick the best.
    /// Ties go to the move that comes first in the move order.
    pub fn root(&mut self, board: Board, player: Player) -> SearchOutcome {
        let settings = self.settings;
        let depth = settings.depth.saturating_sub(1);
        let mut window = Window::FULL;
        let mut best: Option<(Location, i32)> = None;

        for (index, mv) in settings.move_order.filter(board.find_moves(player)).enumerate() {
            let next = child(board, player, mv);
            let eval = if index == 0 {
                self.node(next, depth, !player, window, false)
            } else {
                self.sibling(next, depth, player, window).eval
            };

            match best {
                Some((_, score)) if !improves(player, eval, score) => {}
                _ => best = Some((mv, eval)),
            }
            window.tighten(player, eval);
        }

        match best {
            Some((mv, score)) => SearchOutcome {
                best_move: Some(mv),
                score,
            },
            None => SearchOutcome {
                best_move: None,
                score: board.rate_board(),
            },
        }
    }

    /// Score `board` with `player` to move and `depth` plies left.
    /// `passed` is set when the previous player had to pass.
    pub fn node(
        &mut self,
        board: Board,
        depth: u8,
        player: Player,
        window: Window,
        passed: bool,
    ) -> i32 {
        self.stats.nodes += 1;

        if depth == 0 {
            self.stats.leaves += 1;
            return board.rate_board();
        }

        let hash = if self.uses_table(depth) {
            let hash = board.hash(player);
            if let Some(score) = self.table.get(hash, window.alpha, window.beta) {
                return score;
            }
            Some(hash)
        } else {
            None
        };

        let moves = board.find_moves(player);
        if moves.is_empty() {
            if passed {
                return final_score(board);
            }
            // A pass doesn't use up depth.
            return self.node(board, depth, !player, window, true);
        }

        let settings = self.settings;
        let mut local = window;
        let mut best = worst_score(player);

        for (index, mv) in settings.move_order.filter(moves).enumerate() {
            let next = child(board, player, mv);
            let eval = if index == 0 {
                self.node(next, depth - 1, !player, local, false)
            } else {
                self.sibling(next, depth - 1, player, local).eval
            };

            if improves(player, eval, best) {
                best = eval;
            }
            local.tighten(player, eval);
            if local.is_closed() {
                break;
            }
        }

        if let Some(hash) = hash {
            self.table.insert(hash, best, window.alpha, window.beta);
        }
        best
    }

    /// Search `next`, reached by `player` playing a move other than their first.
    #[inline]
    fn sibling(&mut self, next: Board, depth: u8, player: Player, window: Window) -> Scouted {
        match self.variant {
            Variant::Alphabeta => Scouted {
                eval: self.node(next, depth, !player, window, false),
                exact: false,
            },
            Variant::Negascout => self.scout(next, depth, player, window),
        }
    }

    /// Probe `next` with a null window, re-searching with the narrowed
    /// window only if the probe lands strictly inside `window`.
    pub fn scout(&mut self, next: Board, depth: u8, player: Player, window: Window) -> Scouted {
        let probe = self.node(next, depth, !player, window.null(player), false);
        if !window.contains(probe) {
            return Scouted {
                eval: probe,
                exact: false,
            };
        }

        Scouted {
            eval: self.node(next, depth, !player, window.research(player, probe), false),
            exact: true,
        }
    }

    #[inline]
    fn uses_table(&self, depth: u8) -> bool {
        self.settings.transposition_enabled && depth > self.settings.transposition_min_depth
    }
}

/// The state of a single-threaded engine: its settings, its own table and its counters.
#[derive(Debug)]
pub(crate) struct SequentialSearch {
    variant: Variant,
    pub settings: SearchSettings,
    table: TranspositionTable,
    pub last_stats: SearchStats,
    pub total_stats: SearchStats,
}

impl SequentialSearch {
    pub fn new(variant: Variant, settings: SearchSettings) -> Self {
        Self {
            variant,
            settings,
            table: TranspositionTable::new(),
            last_stats: SearchStats::default(),
            total_stats: SearchStats::default(),
        }
    }

    pub fn analyze(&mut self, board: Board, player: Player) -> SearchOutcome {
        // Scores from an earlier search may have been found at another depth.
        self.table.clear();

        let mut searcher = Searcher::new(self.variant, &self.settings, &mut self.table);
        let outcome = searcher.root(board, player);
        let stats = searcher.stats;

        self.last_stats = stats;
        self.total_stats += stats;
        debug!(
            "{:?} search for {}: {} nodes, {} leaves, {} table entries, score {}",
            self.variant,
            player,
            stats.nodes,
            stats.leaves,
            self.table.len(),
            outcome.score
        );

        outcome
    }
}
