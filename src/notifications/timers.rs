//! Cancellable deadline queue
//!
//! One pending deadline per key. Scheduling an existing key moves its
//! deadline; cancelling a key that has no deadline does nothing.

use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone)]
pub struct TimerQueue<K: Ord + Copy> {
    deadlines: BTreeMap<K, u64>,
    order: BTreeSet<(u64, K)>,
}

impl<K: Ord + Copy> Default for TimerQueue<K> {
    fn default() -> Self {
        Self {
            deadlines: BTreeMap::new(),
            order: BTreeSet::new(),
        }
    }
}

impl<K: Ord + Copy> TimerQueue<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, key: K, at: u64) {
        if let Some(previous) = self.deadlines.insert(key, at) {
            self.order.remove(&(previous, key));
        }
        self.order.insert((at, key));
    }

    /// Returns whether a deadline was pending
    pub fn cancel(&mut self, key: K) -> bool {
        match self.deadlines.remove(&key) {
            Some(at) => {
                self.order.remove(&(at, key));
                true
            }
            None => false,
        }
    }

    pub fn deadline(&self, key: K) -> Option<u64> {
        self.deadlines.get(&key).copied()
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.order.first().map(|(at, _)| *at)
    }

    /// Pop every key due at or before `now`, earliest first
    pub fn due(&mut self, now: u64) -> Vec<(K, u64)> {
        let mut fired = Vec::new();
        while let Some(&(at, key)) = self.order.first() {
            if at > now {
                break;
            }
            self.order.remove(&(at, key));
            self.deadlines.remove(&key);
            fired.push((key, at));
        }
        fired
    }

    pub fn len(&self) -> usize {
        self.deadlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }

    pub fn clear(&mut self) {
        self.deadlines.clear();
        self.order.clear();
    }
}
