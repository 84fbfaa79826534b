//! Derived View Builder
//!
//! Pure functions recomputed on read from store snapshots.

mod stats;
mod filter;
mod grocery_plan;
mod suggestions;
mod csv;
mod backup;
mod export;
mod waste;

pub use stats::{
    alerts, analytics, category_breakdown, dashboard_stats, percentage, todays_meals, Analytics,
    CategoryShare, DashboardStats, ExpiryBreakdown,
};
pub use filter::{filter_items, CategoryFilter};
pub use grocery_plan::{grocery_from_meal_plan, GroceryCandidate, Ingredient, RecipeBook};
pub use suggestions::{shopping_suggestions, Suggestion, SuggestionReason};
pub use csv::{csv_export, csv_import, PantryRecord, CSV_HEADER};
pub use backup::{backup_export, backup_import, Backup};
pub use export::{grocery_list_text, meal_plan_text};
pub use waste::{waste_recommendations, waste_stats, RecommendationLevel, WastePeriod, WasteRecommendation, WasteStats};
