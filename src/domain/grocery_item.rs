//! Grocery List Item Entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{deserialize_id, require, DomainResult, Entity, ItemId};
use super::pantry_item::Category;

/// Shopping priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[serde(alias = "high")]
    Urgent,
    #[default]
    #[serde(alias = "medium")]
    Normal,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Urgent => "urgent",
            Priority::Normal => "normal",
            Priority::Low => "low",
        }
    }
}

/// An entry on the shopping list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryItem {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: ItemId,
    pub name: String,
    pub quantity: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub completed: bool,
    pub added_date: DateTime<Utc>,
}

impl GroceryItem {
    /// Apply the fields present in a patch
    pub fn apply(&mut self, patch: &GroceryItemPatch) {
        if let Some(name) = &patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(quantity) = &patch.quantity {
            self.quantity = quantity.trim().to_string();
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(notes) = &patch.notes {
            self.notes = normalize_notes(Some(notes.clone()));
        }
    }
}

impl Entity for GroceryItem {
    type Id = ItemId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Fields for a new grocery entry
#[derive(Debug, Clone, PartialEq)]
pub struct NewGroceryItem {
    pub name: String,
    pub quantity: String,
    pub category: Category,
    pub priority: Priority,
    pub notes: Option<String>,
}

impl NewGroceryItem {
    /// Quick-add defaults: one unit, category other, normal priority
    pub fn quick(name: &str) -> Self {
        Self {
            name: name.to_string(),
            quantity: "1".to_string(),
            category: Category::Other,
            priority: Priority::Normal,
            notes: None,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        require("name", &self.name)?;
        require("quantity", &self.quantity)
    }

    pub fn into_item(self, id: ItemId, added_date: DateTime<Utc>) -> GroceryItem {
        GroceryItem {
            id,
            name: self.name.trim().to_string(),
            quantity: self.quantity.trim().to_string(),
            category: self.category,
            priority: self.priority,
            notes: normalize_notes(self.notes),
            completed: false,
            added_date,
        }
    }
}

/// Partial update of a grocery item; `Some("")` for notes clears them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroceryItemPatch {
    pub name: Option<String>,
    pub quantity: Option<String>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub notes: Option<String>,
}

impl GroceryItemPatch {
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(name) = &self.name {
            require("name", name)?;
        }
        if let Some(quantity) = &self.quantity {
            require("quantity", quantity)?;
        }
        Ok(())
    }
}

impl From<NewGroceryItem> for GroceryItemPatch {
    fn from(item: NewGroceryItem) -> Self {
        Self {
            name: None,
            quantity: Some(item.quantity),
            category: Some(item.category),
            priority: Some(item.priority),
            notes: Some(item.notes.unwrap_or_default()),
        }
    }
}

pub(crate) fn normalize_notes(notes: Option<String>) -> Option<String> {
    notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
}
