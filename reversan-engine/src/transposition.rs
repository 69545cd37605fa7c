//! Transposition tables: scores of already-searched positions, keyed by hash.
//!
//! A score found under a narrowed window is only a bound on the true value,
//! so each entry records which kind of bound it is and [`TranspositionStore::get`]
//! only answers when the stored bound settles the query window.
//! Hash collisions are not detected.

use crate::thread_pool::lock;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Number of independently locked maps in a [`ShardedTranspositionTable`].
pub const DEFAULT_SHARDS: usize = 64;

/// How a stored score relates to the true value of its position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    /// The score is the true value.
    Exact,
    /// The search failed high: the true value is at least the score.
    Lower,
    /// The search failed low: the true value is at most the score.
    Upper,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Entry {
    pub score: i32,
    pub bound: Bound,
}

impl Entry {
    /// Classify `score` against the window it was searched with.
    pub fn new(score: i32, alpha: i32, beta: i32) -> Self {
        let bound = if score <= alpha {
            Bound::Upper
        } else if score >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        };
        Self { score, bound }
    }

    /// The value a search with window `(alpha, beta)` may return without
    /// searching, if this entry is enough to decide it.
    pub fn probe(self, alpha: i32, beta: i32) -> Option<i32> {
        match self.bound {
            Bound::Exact => Some(self.score),
            Bound::Lower if self.score >= beta => Some(beta),
            Bound::Upper if self.score <= alpha => Some(alpha),
            _ => None,
        }
    }
}

/// The interface a search needs from its transposition table.
pub trait TranspositionStore {
    /// Look up `hash` for a search with window `(alpha, beta)`.
    fn get(&self, hash: u64, alpha: i32, beta: i32) -> Option<i32>;

    /// Store `score`, found with window `(alpha, beta)`, overwriting any previous entry.
    fn insert(&mut self, hash: u64, score: i32, alpha: i32, beta: i32);

    fn clear(&mut self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A single-threaded transposition table.
#[derive(Clone, Debug, Default)]
pub struct TranspositionTable {
    entries: HashMap<u64, Entry>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TranspositionStore for TranspositionTable {
    #[inline]
    fn get(&self, hash: u64, alpha: i32, beta: i32) -> Option<i32> {
        self.entries.get(&hash)?.probe(alpha, beta)
    }

    #[inline]
    fn insert(&mut self, hash: u64, score: i32, alpha: i32, beta: i32) {
        self.entries.insert(hash, Entry::new(score, alpha, beta));
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// A transposition table shared between threads.
///
/// Entries are spread over shards by `hash % shards`, each behind its own
/// [`Mutex`], so threads rarely wait on each other.
#[derive(Debug)]
pub struct ShardedTranspositionTable {
    shards: Vec<Mutex<HashMap<u64, Entry>>>,
}

impl Default for ShardedTranspositionTable {
    fn default() -> Self {
        Self::with_shards(DEFAULT_SHARDS)
    }
}

impl ShardedTranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Panics if `shards` is zero.
    pub fn with_shards(shards: usize) -> Self {
        assert!(shards > 0, "a sharded table needs at least one shard");
        Self {
            shards: (0..shards).map(|_| Mutex::new(HashMap::new())).collect(),
        }
    }

    #[inline]
    fn shard(&self, hash: u64) -> &Mutex<HashMap<u64, Entry>> {
        &self.shards[(hash % self.shards.len() as u64) as usize]
    }

    pub fn get(&self, hash: u64, alpha: i32, beta: i32) -> Option<i32> {
        lock(self.shard(hash)).get(&hash)?.probe(alpha, beta)
    }

    pub fn insert(&self, hash: u64, score: i32, alpha: i32, beta: i32) {
        lock(self.shard(hash)).insert(hash, Entry::new(score, alpha, beta));
    }

    pub fn clear(&self) {
        for shard in self.shards.iter() {
            lock(shard).clear();
        }
    }

    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| lock(shard).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Every clone of the [`Arc`] reads and writes the same table.
impl TranspositionStore for Arc<ShardedTranspositionTable> {
    #[inline]
    fn get(&self, hash: u64, alpha: i32, beta: i32) -> Option<i32> {
        ShardedTranspositionTable::get(self, hash, alpha, beta)
    }

    #[inline]
    fn insert(&mut self, hash: u64, score: i32, alpha: i32, beta: i32) {
        ShardedTranspositionTable::insert(self, hash, score, alpha, beta)
    }

    fn clear(&mut self) {
        ShardedTranspositionTable::clear(self)
    }

    fn len(&self) -> usize {
        ShardedTranspositionTable::len(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn entries_are_classified_by_window() {
        assert_eq!(Entry::new(5, 0, 10).bound, Bound::Exact);
        assert_eq!(Entry::new(0, 0, 10).bound, Bound::Upper);
        assert_eq!(Entry::new(-3, 0, 10).bound, Bound::Upper);
        assert_eq!(Entry::new(10, 0, 10).bound, Bound::Lower);
        assert_eq!(Entry::new(42, 0, 10).bound, Bound::Lower);
    }

    #[test]
    fn exact_entries_always_hit() {
        let mut table = TranspositionTable::new();
        table.insert(7, 5, 0, 10);
        assert_eq!(table.get(7, 0, 10), Some(5));
        assert_eq!(table.get(7, -100, 100), Some(5));
        assert_eq!(table.get(7, 20, 30), Some(5));
        assert_eq!(table.get(8, 0, 10), None);
    }

    #[test]
    fn lower_bounds_hit_at_or_above_beta() {
        let mut table = TranspositionTable::new();
        table.insert(1, 50, 0, 10);
        assert_eq!(table.get(1, 0, 10), Some(10));
        assert_eq!(table.get(1, 20, 50), Some(50));
        assert_eq!(table.get(1, 0, 60), None);
    }

    #[test]
    fn upper_bounds_hit_at_or_below_alpha() {
        let mut table = TranspositionTable::new();
        table.insert(1, -50, 0, 10);
        assert_eq!(table.get(1, 0, 10), Some(0));
        assert_eq!(table.get(1, -50, 0), Some(-50));
        assert_eq!(table.get(1, -60, 0), None);
    }

    #[test]
    fn insert_overwrites_and_clear_empties() {
        let mut table = TranspositionTable::new();
        table.insert(1, -50, 0, 10);
        table.insert(1, 4, 0, 10);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(1, 0, 10), Some(4));

        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.get(1, 0, 10), None);
    }

    #[test]
    fn sharded_table_matches_single_table() {
        let mut single = TranspositionTable::new();
        let mut sharded = Arc::new(ShardedTranspositionTable::with_shards(4));

        for hash in 0..100u64 {
            let score = (hash as i32 % 21) - 10;
            single.insert(hash, score, -5, 5);
            sharded.insert(hash, score, -5, 5);
        }

        assert_eq!(TranspositionStore::len(&sharded), 100);
        for hash in 0..100u64 {
            assert_eq!(single.get(hash, -5, 5), sharded.get(hash, -5, 5));
            assert_eq!(single.get(hash, -2, 2), sharded.get(hash, -2, 2));
        }

        TranspositionStore::clear(&mut sharded);
        assert!(TranspositionStore::is_empty(&sharded));
    }

    #[test]
    fn sharded_table_is_shared_between_threads() {
        let table = Arc::new(ShardedTranspositionTable::new());

        let handles: Vec<_> = (0..4u64)
            .map(|t| {
                let mut table = Arc::clone(&table);
                thread::spawn(move || {
                    for i in 0..250 {
                        table.insert(t * 1000 + i, i as i32, -1000, 1000);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(table.len(), 1000);
        assert_eq!(table.get(3042, -1000, 1000), Some(42));
    }
}
