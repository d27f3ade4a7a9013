//! A fixed-shard concurrent map keyed on document id.
//!
//! Grounded on `original_source/search-server/concurrent_map.h`'s
//! `ConcurrentMap<Key, Value>`: `B` independent mutex-guarded sub-maps,
//! `key % B` picks the shard, `access` returns a guard to a default-on-demand
//! entry, `merge` folds every shard into one ordered map taking locks
//! `0..B` in order. The C++ version is integer-key-only by a `static_assert`;
//! this keeps that restriction (`i64` keys) rather than generalizing it.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// Sharded accumulator for additive per-document contributions.
///
/// `access(k)` and `erase(k)` on different shards proceed in parallel;
/// calls on the same shard serialize behind that shard's mutex. `merge()`
/// is not itself safe against concurrent mutation of the shards it is
/// folding.
pub struct ConcurrentAggregator {
    shards: Vec<Mutex<BTreeMap<i64, f64>>>,
}

/// A locked, mutable handle to one entry. The shard's lock is held for the
/// lifetime of the guard and released on drop.
pub struct Access<'a> {
    guard: MutexGuard<'a, BTreeMap<i64, f64>>,
    key: i64,
}

impl<'a> Access<'a> {
    /// Adds `delta` to the accumulated value for this key.
    pub fn add(&mut self, delta: f64) {
        *self.guard.entry(self.key).or_insert(0.0) += delta;
    }
}

impl ConcurrentAggregator {
    /// Creates an aggregator with `shard_count` independent shards.
    /// `shard_count` must be at least 1.
    pub fn new(shard_count: usize) -> Self {
        assert!(shard_count > 0, "ConcurrentAggregator needs at least one shard");
        Self {
            shards: (0..shard_count).map(|_| Mutex::new(BTreeMap::new())).collect(),
        }
    }

    fn shard_for(&self, key: i64) -> &Mutex<BTreeMap<i64, f64>> {
        let idx = (key as u64 as usize) % self.shards.len();
        &self.shards[idx]
    }

    /// Acquires the shard holding `key` and returns a handle to accumulate
    /// into its (default-on-demand) value.
    pub fn access(&self, key: i64) -> Access<'_> {
        let guard = self.shard_for(key).lock().expect("aggregator shard mutex poisoned");
        Access { guard, key }
    }

    /// Removes `key` from whichever shard holds it.
    pub fn erase(&self, key: i64) {
        let mut guard = self.shard_for(key).lock().expect("aggregator shard mutex poisoned");
        guard.remove(&key);
    }

    /// Folds every shard into a single ordered map, taking shard locks in
    /// order `0..shard_count` to keep lock acquisition order fixed.
    pub fn merge(&self) -> BTreeMap<i64, f64> {
        let mut result = BTreeMap::new();
        for shard in &self.shards {
            let guard = shard.lock().expect("aggregator shard mutex poisoned");
            result.extend(guard.iter().map(|(&k, &v)| (k, v)));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;

    #[test]
    fn accumulates_additively_per_key() {
        let agg = ConcurrentAggregator::new(4);
        agg.access(1).add(0.5);
        agg.access(1).add(0.25);
        agg.access(2).add(1.0);
        let merged = agg.merge();
        assert_eq!(merged.get(&1), Some(&0.75));
        assert_eq!(merged.get(&2), Some(&1.0));
    }

    #[test]
    fn erase_removes_the_key_from_its_shard() {
        let agg = ConcurrentAggregator::new(4);
        agg.access(7).add(1.0);
        agg.erase(7);
        assert!(!agg.merge().contains_key(&7));
    }

    #[test]
    fn concurrent_access_across_shards_is_commutative() {
        let agg = ConcurrentAggregator::new(8);
        (0..1000i64).into_par_iter().for_each(|i| {
            agg.access(i % 8).add(1.0);
        });
        let merged = agg.merge();
        let total: f64 = merged.values().sum();
        assert_eq!(total, 1000.0);
    }
}
