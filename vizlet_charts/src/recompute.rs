// Copyright 2025 the Vizlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyed memoization for widget geometry.
//!
//! Geometry builders are pure functions of their spec and container size. A host keeps one
//! [`Memo`] per widget keyed on exactly the inputs the computation reads (for example
//! `(Size, bin_number)` for a violin plot) and asks it for the output on every frame; the
//! builder only runs when the key changes.

/// Caches the output of the last computation together with its key.
#[derive(Clone, Debug)]
pub struct Memo<K, V> {
    entry: Option<(K, V)>,
    computations: u64,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            entry: None,
            computations: 0,
        }
    }
}

impl<K: PartialEq + Clone, V> Memo<K, V> {
    /// Creates an empty memo.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value for `key`, running `compute` first if the key differs from the
    /// cached one (or nothing is cached).
    pub fn get_or_compute(&mut self, key: &K, compute: impl FnOnce(&K) -> V) -> &V {
        let stale = self.entry.as_ref().is_none_or(|(k, _)| k != key);
        if stale {
            self.entry = None;
            self.computations += 1;
            log::debug!("memo recompute #{}", self.computations);
        }
        let (_, value) = self.entry.get_or_insert_with(|| (key.clone(), compute(key)));
        value
    }

    /// Returns the cached value if its key equals `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entry
            .as_ref()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Drops the cached value so the next lookup recomputes.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// Number of times `compute` has run.
    pub fn computations(&self) -> u64 {
        self.computations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Size;

    #[test]
    fn recomputes_only_on_key_change() {
        let mut memo: Memo<(Size, usize), f64> = Memo::new();
        let key = (Size::new(100.0, 50.0), 30);
        assert_eq!(*memo.get_or_compute(&key, |(s, n)| s.width * *n as f64), 3000.0);
        assert_eq!(*memo.get_or_compute(&key, |_| -1.0), 3000.0);
        assert_eq!(memo.computations(), 1);

        let resized = (Size::new(200.0, 50.0), 30);
        assert_eq!(*memo.get_or_compute(&resized, |(s, n)| s.width * *n as f64), 6000.0);
        assert_eq!(memo.computations(), 2);
        assert_eq!(memo.get(&key), None);
        assert_eq!(memo.get(&resized), Some(&6000.0));
    }

    #[test]
    fn invalidate_forces_recompute() {
        let mut memo = Memo::new();
        memo.get_or_compute(&1_u32, |k| k * 2);
        memo.invalidate();
        assert_eq!(memo.get(&1), None);
        assert_eq!(*memo.get_or_compute(&1, |k| k * 3), 3);
        assert_eq!(memo.computations(), 2);
    }
}
