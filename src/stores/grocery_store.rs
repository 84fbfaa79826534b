//! Grocery List Store

use chrono::{DateTime, Utc};

use crate::domain::{
    DomainError, DomainResult, Entity, GroceryItem, GroceryItemPatch, ItemId, NewGroceryItem,
};
use super::ids::IdSequence;

#[derive(Debug, Clone, Default)]
pub struct GroceryStore {
    items: Vec<GroceryItem>,
    ids: IdSequence,
}

impl GroceryStore {
    pub fn new(mut items: Vec<GroceryItem>) -> Self {
        let mut ids = IdSequence::default();
        ids.repair(&mut items, |item| &mut item.id);
        Self { items, ids }
    }

    pub fn list(&self) -> &[GroceryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&GroceryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&GroceryItem> {
        self.items.iter().find(|item| item.has_name(name))
    }

    pub fn completed(&self) -> impl Iterator<Item = &GroceryItem> {
        self.items.iter().filter(|item| item.completed)
    }

    /// Add an entry. A duplicate name is a conflict carrying the existing
    /// item's id, so the caller can confirm and `update` it instead.
    pub fn add(&mut self, new_item: NewGroceryItem, now: DateTime<Utc>) -> DomainResult<GroceryItem> {
        new_item.validate()?;
        if let Some(existing) = self.find_by_name(&new_item.name) {
            return Err(DomainError::Conflict(format!(
                "{} is already in your list (id {})",
                existing.name, existing.id
            )));
        }
        let item = new_item.into_item(self.ids.next(), now);
        log::debug!("Grocery add {} ({})", item.name, item.id);
        self.items.push(item.clone());
        Ok(item)
    }

    /// Add entries whose names are not yet listed; duplicates (including
    /// within `new_items`) and invalid entries are skipped.
    pub fn add_many(&mut self, new_items: Vec<NewGroceryItem>, now: DateTime<Utc>) -> Vec<GroceryItem> {
        new_items
            .into_iter()
            .filter_map(|new_item| self.add(new_item, now).ok())
            .collect()
    }

    /// Bulk auto-add by name, building each entry with `defaults`
    pub fn add_from_names<S, F>(&mut self, names: impl IntoIterator<Item = S>, mut defaults: F, now: DateTime<Utc>) -> Vec<GroceryItem>
    where
        S: AsRef<str>,
        F: FnMut(&str) -> NewGroceryItem,
    {
        let new_items = names
            .into_iter()
            .map(|name| name.as_ref().trim().to_string())
            .filter(|name| !name.is_empty())
            .map(|name| defaults(&name))
            .collect();
        self.add_many(new_items, now)
    }

    pub fn update(&mut self, id: ItemId, patch: GroceryItemPatch) -> DomainResult<GroceryItem> {
        patch.validate()?;
        if let Some(name) = &patch.name {
            if self.items.iter().any(|item| item.id != id && item.has_name(name)) {
                return Err(DomainError::Conflict(format!("{} is already in your list", name.trim())));
            }
        }
        let item = self.get_mut(id)?;
        item.apply(&patch);
        Ok(item.clone())
    }

    pub fn remove(&mut self, id: ItemId) -> DomainResult<GroceryItem> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| not_found(id))?;
        Ok(self.items.remove(index))
    }

    pub fn toggle_completed(&mut self, id: ItemId) -> DomainResult<GroceryItem> {
        let item = self.get_mut(id)?;
        item.completed = !item.completed;
        Ok(item.clone())
    }

    /// Drop every checked-off entry
    pub fn clear_completed(&mut self) -> Vec<GroceryItem> {
        let (removed, kept): (Vec<_>, Vec<_>) = self.items.drain(..).partition(|item| item.completed);
        self.items = kept;
        removed
    }

    pub(crate) fn replace_all(&mut self, mut items: Vec<GroceryItem>) {
        self.ids.repair(&mut items, |item| &mut item.id);
        self.items = items;
    }

    fn get_mut(&mut self, id: ItemId) -> DomainResult<&mut GroceryItem> {
        self.items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: ItemId) -> DomainError {
    DomainError::NotFound(format!("grocery item {}", id))
}
