//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO dependencies beyond serde and chrono.

mod entity;
mod pantry_item;
mod meal_plan;
mod grocery_item;
mod profile;
mod waste;

pub use entity::{Entity, DomainError, DomainResult, ItemId, UNASSIGNED_ID};
pub use pantry_item::{
    quantity_value, with_quantity_value, Category, NewPantryItem, PantryItem, PantryItemPatch,
};
pub use meal_plan::{MealPlan, MealSlot, Weekday};
pub use grocery_item::{GroceryItem, GroceryItemPatch, NewGroceryItem, Priority};
pub use profile::{PasswordChange, UserPreferences, UserProfile};
pub use waste::{WasteEntry, WasteReason};
