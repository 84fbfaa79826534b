//! Entity Stores
//!
//! In-memory collections and their CRUD operations. Every operation either
//! applies completely or returns an error and leaves the collection as it was.
//! Persistence is layered on top by [`crate::state::PantryState`].

mod ids;
mod pantry_store;
mod meal_plan_store;
mod grocery_store;

#[cfg(test)]
mod tests;

pub use ids::IdSequence;
pub use pantry_store::{PantryStore, Upsert};
pub use meal_plan_store::{MealMove, MealPlanStore};
pub use grocery_store::GroceryStore;
