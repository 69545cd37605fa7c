//! Engine configuration.

use crate::move_order::MoveOrder;
use derive_more::{Display, Error};

pub const MIN_DEPTH: u8 = 1;
pub const MAX_DEPTH: u8 = 50;
pub const MIN_THREADS: usize = 1;
pub const MAX_THREADS: usize = 8;

/// Returned when an engine is built from settings outside the supported ranges.
#[derive(Clone, Copy, Debug, Display, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[display(fmt = "search depth {} is outside {}..={}", depth, MIN_DEPTH, MAX_DEPTH)]
    DepthOutOfRange { depth: u8 },
    #[display(fmt = "thread count {} is outside {}..={}", threads, MIN_THREADS, MAX_THREADS)]
    ThreadsOutOfRange { threads: usize },
}

/// How an engine searches. Fixed for the lifetime of the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchSettings {
    /// Plies searched below the root. Passes don't count.
    pub depth: u8,
    /// Worker threads for the root-splitting search.
    pub threads: usize,
    pub transposition_enabled: bool,
    /// The table is only used at nodes with more remaining depth than this.
    /// Closer to the leaves, recomputing is cheaper than a lookup.
    pub transposition_min_depth: u8,
    pub move_order: MoveOrder,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            depth: 10,
            threads: 1,
            transposition_enabled: true,
            transposition_min_depth: 2,
            move_order: MoveOrder::default(),
        }
    }
}

impl SearchSettings {
    /// Default settings searching to `depth`.
    pub fn with_depth(depth: u8) -> Self {
        Self {
            depth,
            ..Self::default()
        }
    }

    /// Check these settings, returning them unchanged if they are usable.
    pub fn validated(self) -> Result<Self, SettingsError> {
        if !(MIN_DEPTH..=MAX_DEPTH).contains(&self.depth) {
            return Err(SettingsError::DepthOutOfRange { depth: self.depth });
        }
        if !(MIN_THREADS..=MAX_THREADS).contains(&self.threads) {
            return Err(SettingsError::ThreadsOutOfRange {
                threads: self.threads,
            });
        }
        Ok(self)
    }
}
