//! Monotonic identifier sequence

use std::collections::HashSet;

use crate::domain::{ItemId, UNASSIGNED_ID};

/// Hands out identifiers strictly greater than any seen before
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdSequence {
    last: ItemId,
}

impl IdSequence {
    pub fn next(&mut self) -> ItemId {
        self.last += 1;
        self.last
    }

    /// Never hand out `id` or anything below it
    pub fn observe(&mut self, id: ItemId) {
        self.last = self.last.max(id);
    }

    /// Observe every id in `items`, then give unassigned or repeated ids a
    /// fresh one. Returns how many ids changed.
    pub fn repair<T>(&mut self, items: &mut [T], mut id_of: impl FnMut(&mut T) -> &mut ItemId) -> usize {
        for item in items.iter_mut() {
            self.observe(*id_of(item));
        }
        let mut seen = HashSet::with_capacity(items.len());
        let mut changed = 0;
        for item in items.iter_mut() {
            let id = id_of(item);
            if *id == UNASSIGNED_ID || !seen.insert(*id) {
                *id = self.next();
                seen.insert(*id);
                changed += 1;
            }
        }
        if changed > 0 {
            log::warn!("Assigned fresh ids to {} stored entries", changed);
        }
        changed
    }
}
