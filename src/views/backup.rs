//! JSON Backup
//!
//! Whole-state document `{pantryItems, mealPlans, groceryItems, userProfile, exportDate}`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult, GroceryItem, MealPlan, PantryItem, UserProfile};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    pub pantry_items: Option<Vec<PantryItem>>,
    pub meal_plans: Option<MealPlan>,
    pub grocery_items: Option<Vec<GroceryItem>>,
    pub user_profile: Option<UserProfile>,
    pub export_date: Option<DateTime<Utc>>,
}

impl Backup {
    /// True when the document carries at least one collection
    pub fn has_data(&self) -> bool {
        self.pantry_items.is_some() || self.meal_plans.is_some() || self.grocery_items.is_some()
    }
}

/// Pretty-printed backup of the given state
pub fn backup_export(
    pantry: &[PantryItem],
    plan: &MealPlan,
    grocery: &[GroceryItem],
    profile: Option<&UserProfile>,
    now: DateTime<Utc>,
) -> DomainResult<String> {
    let backup = Backup {
        pantry_items: Some(pantry.to_vec()),
        meal_plans: Some(plan.clone()),
        grocery_items: Some(grocery.to_vec()),
        user_profile: profile.cloned(),
        export_date: Some(now),
    };
    serde_json::to_string_pretty(&backup).map_err(|e| DomainError::Internal(e.to_string()))
}

/// Parse a backup document. Nothing is applied here; a document that fails
/// to parse or holds no collection is rejected as a whole.
pub fn backup_import(text: &str) -> DomainResult<Backup> {
    let backup: Backup = serde_json::from_str(text)
        .map_err(|e| DomainError::InvalidInput(format!("not a Smart Pantry backup: {}", e)))?;
    if !backup.has_data() {
        return Err(DomainError::InvalidInput("backup contains no data".to_string()));
    }
    Ok(backup)
}
