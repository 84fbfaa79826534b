//! Storage keys of the persisted state layout

pub const PANTRY_ITEMS: &str = "pantryItems";
pub const MEAL_PLANS: &str = "mealPlans";
pub const GROCERY_LIST: &str = "groceryList";
pub const SETTINGS: &str = "smartPantrySettings";
pub const USER_PROFILE: &str = "smartPantryUser";
pub const USER_PREFERENCES: &str = "userPreferences";
pub const METRICS_HISTORY: &str = "sp_metrics_history";
pub const LAST_DIGEST: &str = "sp_last_digest";
pub const WASTE_LOG: &str = "foodWasteLog";
