//! Pantry Item Entity
//!
//! An item on hand in the household inventory. The quantity is free text
//! ("2", "500 g", "3 cans"); its leading integer is parsed on demand.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::entity::{deserialize_id, require, DomainError, DomainResult, Entity, ItemId};

/// Food category. Known values map to variants, anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Dairy,
    Meat,
    Vegetables,
    Fruits,
    Grains,
    Condiments,
    #[default]
    Other,
    Custom(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Dairy => "dairy",
            Category::Meat => "meat",
            Category::Vegetables => "vegetables",
            Category::Fruits => "fruits",
            Category::Grains => "grains",
            Category::Condiments => "condiments",
            Category::Other => "other",
            Category::Custom(name) => name,
        }
    }

    pub fn from_str(s: &str) -> Self {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "dairy" => Category::Dairy,
            "meat" => Category::Meat,
            "vegetables" => Category::Vegetables,
            "fruits" => Category::Fruits,
            "grains" => Category::Grains,
            "condiments" => Category::Condiments,
            "" | "other" => Category::Other,
            _ => Category::Custom(normalized),
        }
    }

    /// Capitalized form for display ("dairy" -> "Dairy")
    pub fn label(&self) -> String {
        let mut chars = self.as_str().chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category::from_str(&value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.as_str().to_string()
    }
}

/// Leading integer of a free-text quantity, `None` when it has no number.
pub fn quantity_value(quantity: &str) -> Option<i64> {
    let (number, _) = split_quantity(quantity);
    number.and_then(|digits| digits.parse().ok())
}

/// Replace the numeric prefix of `quantity` with `value`, keeping any unit suffix.
pub fn with_quantity_value(quantity: &str, value: i64) -> String {
    match split_quantity(quantity) {
        (Some(_), suffix) => format!("{}{}", value, suffix),
        (None, rest) if rest.trim().is_empty() => value.to_string(),
        (None, rest) => format!("{} {}", value, rest.trim()),
    }
}

fn split_quantity(quantity: &str) -> (Option<&str>, &str) {
    let trimmed = quantity.trim_start();
    let sign_len = match trimmed.chars().next() {
        Some('+') | Some('-') => 1,
        _ => 0,
    };
    let digits_len = trimmed[sign_len..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .count();
    if digits_len == 0 {
        return (None, trimmed);
    }
    let end = sign_len + digits_len;
    (Some(&trimmed[..end]), &trimmed[end..])
}

/// An item in the pantry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PantryItem {
    /// Unique identifier
    #[serde(deserialize_with = "deserialize_id")]
    pub id: ItemId,
    /// Display name (identity is the case-insensitive name)
    pub name: String,
    pub category: Category,
    /// Free-text amount, numeric prefix parsed for stock checks
    pub quantity: String,
    /// Best-before date
    pub expiry: NaiveDate,
}

impl PantryItem {
    pub fn new(id: ItemId, name: String, category: Category, quantity: String, expiry: NaiveDate) -> Self {
        Self {
            id,
            name,
            category,
            quantity,
            expiry,
        }
    }

    /// Numeric part of the quantity, `None` when it has none
    pub fn quantity_value(&self) -> Option<i64> {
        quantity_value(&self.quantity)
    }

    /// Apply the fields present in a patch
    pub fn apply(&mut self, patch: &PantryItemPatch) {
        if let Some(name) = &patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        if let Some(quantity) = &patch.quantity {
            self.quantity = quantity.trim().to_string();
        }
        if let Some(expiry) = patch.expiry {
            self.expiry = expiry;
        }
    }
}

impl Entity for PantryItem {
    type Id = ItemId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Fields for a new pantry item, all required
#[derive(Debug, Clone, PartialEq)]
pub struct NewPantryItem {
    pub name: String,
    pub category: Category,
    pub quantity: String,
    pub expiry: NaiveDate,
}

impl NewPantryItem {
    pub fn new(name: &str, category: Category, quantity: &str, expiry: NaiveDate) -> Self {
        Self {
            name: name.to_string(),
            category,
            quantity: quantity.to_string(),
            expiry,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        require("name", &self.name)?;
        require("quantity", &self.quantity)
    }

    pub fn into_item(self, id: ItemId) -> PantryItem {
        PantryItem::new(
            id,
            self.name.trim().to_string(),
            self.category,
            self.quantity.trim().to_string(),
            self.expiry,
        )
    }
}

/// Partial update of a pantry item; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PantryItemPatch {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub quantity: Option<String>,
    pub expiry: Option<NaiveDate>,
}

impl PantryItemPatch {
    pub fn quantity(quantity: &str) -> Self {
        Self {
            quantity: Some(quantity.to_string()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.category.is_none() && self.quantity.is_none() && self.expiry.is_none()
    }

    /// Blank strings are not allowed to replace existing values
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(name) = &self.name {
            require("name", name)?;
        }
        if let Some(quantity) = &self.quantity {
            require("quantity", quantity)?;
        }
        Ok(())
    }

    /// Turn a patch into a complete new item, if it carries enough fields
    pub fn into_new_item(self, name: &str) -> DomainResult<NewPantryItem> {
        let quantity = self
            .quantity
            .ok_or_else(|| DomainError::InvalidInput("quantity is required".to_string()))?;
        let expiry = self
            .expiry
            .ok_or_else(|| DomainError::InvalidInput("expiry is required".to_string()))?;
        let item = NewPantryItem {
            name: name.to_string(),
            category: self.category.unwrap_or_default(),
            quantity,
            expiry,
        };
        item.validate()?;
        Ok(item)
    }
}
