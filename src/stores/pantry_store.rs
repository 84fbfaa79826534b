//! Pantry Store
//!
//! Pantry items keyed by id, with at most one item per case-insensitive name.

use std::collections::HashMap;

use crate::domain::{
    with_quantity_value, DomainError, DomainResult, Entity, ItemId, NewPantryItem,
    PantryItem, PantryItemPatch,
};
use super::ids::IdSequence;

/// Outcome of an insert-or-merge
#[derive(Debug, Clone, PartialEq)]
pub enum Upsert<T> {
    Inserted(T),
    Merged(T),
}

impl<T> Upsert<T> {
    pub fn item(&self) -> &T {
        match self {
            Upsert::Inserted(item) | Upsert::Merged(item) => item,
        }
    }

    pub fn into_item(self) -> T {
        match self {
            Upsert::Inserted(item) | Upsert::Merged(item) => item,
        }
    }

    pub fn was_inserted(&self) -> bool {
        matches!(self, Upsert::Inserted(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct PantryStore {
    items: Vec<PantryItem>,
    ids: IdSequence,
}

impl PantryStore {
    pub fn new(mut items: Vec<PantryItem>) -> Self {
        let mut ids = IdSequence::default();
        ids.repair(&mut items, |item| &mut item.id);
        Self { items, ids }
    }

    pub fn list(&self) -> &[PantryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&PantryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&PantryItem> {
        self.items.iter().find(|item| item.has_name(name))
    }

    /// Insert a new item; a case-insensitive name clash is a conflict
    pub fn add(&mut self, new_item: NewPantryItem) -> DomainResult<PantryItem> {
        new_item.validate()?;
        if let Some(existing) = self.find_by_name(&new_item.name) {
            return Err(DomainError::Conflict(format!("{} already exists", existing.name)));
        }
        let item = new_item.into_item(self.ids.next());
        log::debug!("Pantry add {} ({})", item.name, item.id);
        self.items.push(item.clone());
        Ok(item)
    }

    /// Merge `fields` into the item named `name` (case-insensitive), or insert
    /// a new item when none exists. A merge keeps the existing name casing.
    pub fn upsert_by_name(&mut self, name: &str, fields: PantryItemPatch) -> DomainResult<Upsert<PantryItem>> {
        fields.validate()?;
        if let Some(existing) = self.items.iter_mut().find(|item| item.has_name(name)) {
            let merge = PantryItemPatch { name: None, ..fields };
            existing.apply(&merge);
            log::debug!("Pantry merge into {} ({})", existing.name, existing.id);
            return Ok(Upsert::Merged(existing.clone()));
        }
        let new_item = fields.into_new_item(name)?;
        self.add(new_item).map(Upsert::Inserted)
    }

    pub fn update(&mut self, id: ItemId, patch: PantryItemPatch) -> DomainResult<PantryItem> {
        patch.validate()?;
        if let Some(name) = &patch.name {
            if self.items.iter().any(|item| item.id != id && item.has_name(name)) {
                return Err(DomainError::Conflict(format!("{} already exists", name.trim())));
            }
        }
        let item = self.get_mut(id)?;
        item.apply(&patch);
        Ok(item.clone())
    }

    pub fn remove(&mut self, id: ItemId) -> DomainResult<PantryItem> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| not_found(id))?;
        let removed = self.items.remove(index);
        log::debug!("Pantry remove {} ({})", removed.name, removed.id);
        Ok(removed)
    }

    /// Add `delta` to the numeric quantity, clamping at zero.
    /// Returns the item's new state for low-stock follow-ups.
    pub fn change_quantity(&mut self, id: ItemId, delta: i64) -> DomainResult<PantryItem> {
        let item = self.get_mut(id)?;
        let current = item.quantity_value().unwrap_or(0);
        let next = current.saturating_add(delta).max(0);
        item.quantity = with_quantity_value(&item.quantity, next);
        Ok(item.clone())
    }

    /// Collapse same-name entries into the first one: quantities are summed
    /// and the earliest expiry is kept. Returns how many entries were folded.
    pub fn merge_duplicates(&mut self) -> usize {
        let mut merged: Vec<PantryItem> = Vec::with_capacity(self.items.len());
        let mut index_by_name: HashMap<String, usize> = HashMap::new();
        let mut totals: Vec<Option<i64>> = Vec::new();

        for item in &self.items {
            let key = item.name.trim().to_lowercase();
            match index_by_name.get(&key) {
                Some(&index) => {
                    let target = &mut merged[index];
                    target.expiry = target.expiry.min(item.expiry);
                    if let Some(value) = item.quantity_value() {
                        totals[index] = Some(totals[index].unwrap_or(0).saturating_add(value));
                    }
                }
                None => {
                    index_by_name.insert(key, merged.len());
                    totals.push(item.quantity_value());
                    merged.push(item.clone());
                }
            }
        }

        let folded = self.items.len() - merged.len();
        if folded == 0 {
            return 0;
        }
        for (item, total) in merged.iter_mut().zip(totals) {
            if let Some(total) = total {
                item.quantity = with_quantity_value(&item.quantity, total);
            }
        }
        log::debug!("Pantry merged {} duplicate entries", folded);
        self.items = merged;
        folded
    }

    /// Remove every item matching `predicate`, returning them in store order
    pub fn remove_where(&mut self, mut predicate: impl FnMut(&PantryItem) -> bool) -> Vec<PantryItem> {
        let (removed, kept): (Vec<_>, Vec<_>) = self.items.drain(..).partition(|item| predicate(item));
        self.items = kept;
        removed
    }

    /// Swap in a whole new collection (imports, transactions)
    pub(crate) fn replace_all(&mut self, mut items: Vec<PantryItem>) {
        self.ids.repair(&mut items, |item| &mut item.id);
        self.items = items;
    }

    fn get_mut(&mut self, id: ItemId) -> DomainResult<&mut PantryItem> {
        self.items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: ItemId) -> DomainError {
    DomainError::NotFound(format!("pantry item {}", id))
}
