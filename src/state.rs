//! Pantry State
//!
//! The one owned application state: the three entity stores plus settings,
//! account, waste log and metrics history. Built once from storage at start
//! up; every successful mutation is written through before returning, and a
//! failed one leaves both memory and storage untouched.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::config::{Setting, Settings, DEFAULT_SHELF_LIFE_DAYS};
use crate::domain::{
    quantity_value, DomainError, DomainResult, GroceryItem, GroceryItemPatch, ItemId, MealSlot,
    NewGroceryItem, NewPantryItem, PantryItem, PantryItemPatch, PasswordChange, Priority,
    UserPreferences, UserProfile, WasteEntry, WasteReason, Weekday,
};
use crate::notifications::{check_alerts, record_metrics, AlertKind, AlertMessage, MetricsEntry};
use crate::status::{classify, FreshnessStatus};
use crate::storage::{keys, PersistenceGateway};
use crate::stores::{GroceryStore, IdSequence, MealMove, MealPlanStore, PantryStore, Upsert};
use crate::views::{
    alerts, analytics, backup_export, backup_import, csv_export, csv_import, dashboard_stats,
    grocery_from_meal_plan, shopping_suggestions, waste_stats, Analytics, DashboardStats,
    GroceryCandidate, RecipeBook, Suggestion, WastePeriod, WasteStats,
};

const DIGEST_DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// Clock
// ============================================================================

/// Source of "now" for everything date-relative
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Settable clock; clones share the same instant
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Rc<Cell<DateTime<Utc>>>,
}

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self {
            now: Rc::new(Cell::new(at)),
        }
    }

    pub fn set(&self, at: DateTime<Utc>) {
        self.now.set(at);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

// ============================================================================
// State
// ============================================================================

pub struct PantryState {
    gateway: PersistenceGateway,
    clock: Box<dyn Clock>,
    pantry: PantryStore,
    meal_plan: MealPlanStore,
    grocery: GroceryStore,
    settings: Settings,
    profile: Option<UserProfile>,
    preferences: UserPreferences,
    metrics: Vec<MetricsEntry>,
    last_digest: Option<NaiveDate>,
    waste_log: Vec<WasteEntry>,
    waste_ids: IdSequence,
    recipes: RecipeBook,
}

impl PantryState {
    pub fn load(gateway: PersistenceGateway) -> Self {
        Self::with_clock(gateway, SystemClock)
    }

    pub fn with_clock(mut gateway: PersistenceGateway, clock: impl Clock + 'static) -> Self {
        let mut pantry = PantryStore::new(gateway.load(keys::PANTRY_ITEMS));
        if pantry.merge_duplicates() > 0 {
            gateway.save(keys::PANTRY_ITEMS, pantry.list());
        }
        let meal_plan = MealPlanStore::new(gateway.load(keys::MEAL_PLANS));
        let grocery = GroceryStore::new(gateway.load(keys::GROCERY_LIST));
        let mut waste_log: Vec<WasteEntry> = gateway.load(keys::WASTE_LOG);
        let mut waste_ids = IdSequence::default();
        waste_ids.repair(&mut waste_log, |entry| &mut entry.id);
        let last_digest = gateway
            .load_raw(keys::LAST_DIGEST)
            .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), DIGEST_DATE_FORMAT).ok());

        log::info!(
            "Loaded {} pantry items, {} planned meals, {} grocery items",
            pantry.len(),
            meal_plan.plan().planned_meals(),
            grocery.len()
        );

        Self {
            settings: gateway.load(keys::SETTINGS),
            profile: gateway.load_optional(keys::USER_PROFILE),
            preferences: gateway.load(keys::USER_PREFERENCES),
            metrics: gateway.load(keys::METRICS_HISTORY),
            waste_ids,
            waste_log,
            last_digest,
            pantry,
            meal_plan,
            grocery,
            recipes: RecipeBook::default(),
            clock: Box::new(clock),
            gateway,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    pub fn pantry(&self) -> &PantryStore {
        &self.pantry
    }

    pub fn meal_plan(&self) -> &MealPlanStore {
        &self.meal_plan
    }

    pub fn grocery(&self) -> &GroceryStore {
        &self.grocery
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn preferences(&self) -> &UserPreferences {
        &self.preferences
    }

    pub fn metrics_history(&self) -> &[MetricsEntry] {
        &self.metrics
    }

    pub fn waste_log(&self) -> &[WasteEntry] {
        &self.waste_log
    }

    pub fn recipes(&self) -> &RecipeBook {
        &self.recipes
    }

    // ========================================================================
    // Derived views at the current instant
    // ========================================================================

    pub fn dashboard_stats(&self) -> DashboardStats {
        dashboard_stats(self.pantry.list(), self.now())
    }

    pub fn alerts(&self) -> Vec<String> {
        alerts(self.pantry.list(), self.now())
    }

    pub fn analytics(&self) -> Analytics {
        analytics(self.pantry.list(), self.grocery.list(), self.meal_plan.plan(), self.now())
    }

    pub fn suggestions(&self) -> Vec<Suggestion> {
        shopping_suggestions(self.pantry.list(), self.grocery.list(), &self.preferences)
    }

    pub fn waste_stats(&self, period: WastePeriod) -> WasteStats {
        waste_stats(&self.waste_log, period, self.pantry.list(), self.now())
    }

    // ========================================================================
    // Pantry
    // ========================================================================

    pub fn add_item(&mut self, new_item: NewPantryItem) -> DomainResult<PantryItem> {
        self.edit_pantry(|pantry| pantry.add(new_item))
    }

    pub fn upsert_item(&mut self, name: &str, fields: PantryItemPatch) -> DomainResult<Upsert<PantryItem>> {
        self.edit_pantry(|pantry| pantry.upsert_by_name(name, fields))
    }

    pub fn update_item(&mut self, id: ItemId, patch: PantryItemPatch) -> DomainResult<PantryItem> {
        self.edit_pantry(|pantry| pantry.update(id, patch))
    }

    pub fn remove_item(&mut self, id: ItemId) -> DomainResult<PantryItem> {
        self.edit_pantry(|pantry| pantry.remove(id))
    }

    pub fn change_quantity(&mut self, id: ItemId, delta: i64) -> DomainResult<PantryItem> {
        self.edit_pantry(|pantry| pantry.change_quantity(id, delta))
    }

    pub fn merge_duplicates(&mut self) -> usize {
        let folded = self.pantry.merge_duplicates();
        if folded > 0 {
            self.save_pantry();
        }
        folded
    }

    /// Remove every expired item, optionally recording each as wasted
    pub fn clear_expired(&mut self, log_as_waste: bool) -> Vec<PantryItem> {
        let now = self.now();
        let removed = self
            .pantry
            .remove_where(|item| classify(item.expiry, now) == FreshnessStatus::Expired);
        if removed.is_empty() {
            return removed;
        }
        self.save_pantry();
        if log_as_waste {
            for item in &removed {
                let entry = self.waste_entry(item, WasteReason::Expired, 0.0);
                self.waste_log.push(entry);
            }
            self.save_waste_log();
        }
        log::info!("Cleared {} expired items", removed.len());
        removed
    }

    // ========================================================================
    // Meal plan
    // ========================================================================

    pub fn set_meal(&mut self, day: Weekday, slot: MealSlot, recipe: &str) -> DomainResult<Option<String>> {
        self.edit_meal_plan(|plan| plan.set_meal(day, slot, recipe))
    }

    pub fn clear_meal(&mut self, day: Weekday, slot: MealSlot) -> DomainResult<String> {
        self.edit_meal_plan(|plan| plan.clear_meal(day, slot))
    }

    pub fn move_meal(
        &mut self,
        from: (Weekday, MealSlot),
        to: (Weekday, MealSlot),
    ) -> DomainResult<MealMove> {
        self.edit_meal_plan(|plan| plan.move_meal(from.0, from.1, to.0, to.1))
    }

    pub fn clear_meal_plan(&mut self) -> usize {
        let cleared = self.meal_plan.clear_all();
        self.save_meal_plan();
        cleared
    }

    // ========================================================================
    // Grocery list
    // ========================================================================

    /// Manual add; a duplicate name is a `Conflict` the caller may resolve
    /// with [`update_grocery`](Self::update_grocery)
    pub fn add_grocery(&mut self, new_item: NewGroceryItem) -> DomainResult<GroceryItem> {
        let now = self.now();
        self.edit_grocery(|grocery| grocery.add(new_item, now))
    }

    /// Quick-add by name, skipping names already listed
    pub fn add_groceries_by_name<S: AsRef<str>>(&mut self, names: impl IntoIterator<Item = S>) -> Vec<GroceryItem> {
        let now = self.now();
        let added = self.grocery.add_from_names(names, NewGroceryItem::quick, now);
        if !added.is_empty() {
            self.save_grocery();
        }
        added
    }

    pub fn update_grocery(&mut self, id: ItemId, patch: GroceryItemPatch) -> DomainResult<GroceryItem> {
        self.edit_grocery(|grocery| grocery.update(id, patch))
    }

    pub fn remove_grocery(&mut self, id: ItemId) -> DomainResult<GroceryItem> {
        self.edit_grocery(|grocery| grocery.remove(id))
    }

    pub fn toggle_grocery(&mut self, id: ItemId) -> DomainResult<GroceryItem> {
        self.edit_grocery(|grocery| grocery.toggle_completed(id))
    }

    pub fn clear_completed_grocery(&mut self) -> Vec<GroceryItem> {
        let removed = self.grocery.clear_completed();
        if !removed.is_empty() {
            self.save_grocery();
        }
        removed
    }

    pub fn add_suggestions(&mut self, suggestions: Vec<Suggestion>) -> Vec<GroceryItem> {
        let now = self.now();
        let new_items = suggestions.into_iter().map(Suggestion::into_new_item).collect();
        let added = self.grocery.add_many(new_items, now);
        if !added.is_empty() {
            self.save_grocery();
        }
        added
    }

    // ========================================================================
    // Cross-collection operations
    // ========================================================================

    /// Stock the pantry with every checked-off grocery entry and drop those
    /// entries from the list. Same-name pantry items get the bought quantity
    /// added; others are created with the default shelf life. Both
    /// collections change together or not at all.
    pub fn move_checked_to_inventory(&mut self) -> DomainResult<Vec<PantryItem>> {
        let checked: Vec<GroceryItem> = self.grocery.completed().cloned().collect();
        if checked.is_empty() {
            return Ok(Vec::new());
        }

        let expiry = self.today() + Duration::days(DEFAULT_SHELF_LIFE_DAYS);
        let mut pantry = self.pantry.clone();
        let mut grocery = self.grocery.clone();
        let mut stocked = Vec::with_capacity(checked.len());
        for item in &checked {
            let existing = pantry.find_by_name(&item.name).map(|found| found.id);
            let updated = match existing {
                Some(id) => {
                    let bought = quantity_value(&item.quantity).filter(|n| *n > 0).unwrap_or(1);
                    pantry.change_quantity(id, bought)?
                }
                None => pantry.add(NewPantryItem::new(
                    &item.name,
                    item.category.clone(),
                    &item.quantity,
                    expiry,
                ))?,
            };
            grocery.remove(item.id)?;
            stocked.push(updated);
        }

        self.pantry = pantry;
        self.grocery = grocery;
        self.save_pantry();
        self.save_grocery();
        log::info!("Moved {} grocery items to inventory", stocked.len());
        Ok(stocked)
    }

    /// Put a pantry item on the grocery list as an urgent restock.
    /// The pantry item stays; an already listed name is a `Conflict`.
    pub fn restock_from_inventory(&mut self, id: ItemId) -> DomainResult<GroceryItem> {
        let item = self
            .pantry
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("pantry item {}", id)))?;
        let now = self.now();
        let restock = NewGroceryItem {
            name: item.name,
            quantity: "1".to_string(),
            category: item.category,
            priority: Priority::Urgent,
            notes: Some("Restock".to_string()),
        };
        self.edit_grocery(|grocery| grocery.add(restock, now))
    }

    /// Add what the week's meals still need to the grocery list
    pub fn add_meal_ingredients(&mut self) -> Vec<GroceryItem> {
        let candidates = grocery_from_meal_plan(
            self.meal_plan.plan(),
            self.pantry.list(),
            self.grocery.list(),
            &self.recipes,
        );
        let now = self.now();
        let new_items = candidates.into_iter().map(GroceryCandidate::into_new_item).collect();
        let added = self.grocery.add_many(new_items, now);
        if !added.is_empty() {
            self.save_grocery();
        }
        added
    }

    // ========================================================================
    // Import / export
    // ========================================================================

    pub fn export_csv(&self) -> String {
        csv_export(self.pantry.list())
    }

    /// Upsert every row by name. A malformed row rejects the whole file.
    pub fn import_csv(&mut self, text: &str) -> DomainResult<Vec<Upsert<PantryItem>>> {
        let records = csv_import(text).map_err(|e| rejected("CSV import", e))?;
        self.edit_pantry(|pantry| {
            let mut next = pantry.clone();
            let outcomes = records
                .into_iter()
                .map(|record| {
                    let name = record.name.clone();
                    next.upsert_by_name(&name, record.into_patch())
                })
                .collect::<DomainResult<Vec<_>>>()?;
            *pantry = next;
            Ok(outcomes)
        })
    }

    pub fn export_backup(&self) -> DomainResult<String> {
        backup_export(
            self.pantry.list(),
            self.meal_plan.plan(),
            self.grocery.list(),
            self.profile.as_ref(),
            self.now(),
        )
    }

    /// Replace the collections present in a backup document
    pub fn import_backup(&mut self, text: &str) -> DomainResult<()> {
        let backup = backup_import(text).map_err(|e| rejected("Backup import", e))?;
        if let Some(items) = backup.pantry_items {
            self.pantry.replace_all(items);
            self.pantry.merge_duplicates();
            self.save_pantry();
        }
        if let Some(plan) = backup.meal_plans {
            self.meal_plan.replace(plan);
            self.save_meal_plan();
        }
        if let Some(items) = backup.grocery_items {
            self.grocery.replace_all(items);
            self.save_grocery();
        }
        log::info!("Backup imported");
        Ok(())
    }

    // ========================================================================
    // Settings and alerts
    // ========================================================================

    /// Flip one toggle and persist; returns the new value
    pub fn toggle_setting(&mut self, setting: Setting) -> bool {
        let enabled = self.settings.toggle(setting);
        self.gateway.save(keys::SETTINGS, &self.settings);
        log::debug!("{} {}", setting.label(), if enabled { "enabled" } else { "disabled" });
        enabled
    }

    pub fn set_preferences(&mut self, preferences: UserPreferences) {
        self.preferences = preferences;
        self.gateway.save(keys::USER_PREFERENCES, &self.preferences);
    }

    /// Alerts the user opted into for the current pantry. Marks the digest
    /// as sent for today and records today's metrics once.
    pub fn run_alert_checks(&mut self) -> Vec<AlertMessage> {
        let stats = self.dashboard_stats();
        let today = self.today();
        let alerts = check_alerts(&self.settings, &stats, self.last_digest, today);

        if alerts.iter().any(|alert| alert.kind == AlertKind::Digest) {
            self.last_digest = Some(today);
            let stamp = today.format(DIGEST_DATE_FORMAT).to_string();
            self.gateway.save_raw(keys::LAST_DIGEST, &stamp);
        }
        if record_metrics(&mut self.metrics, today, stats) {
            self.gateway.save(keys::METRICS_HISTORY, &self.metrics);
        }
        alerts
    }

    // ========================================================================
    // Account (local mock, no authentication)
    // ========================================================================

    /// Sign in; the display name is the email's local part
    pub fn login(&mut self, email: &str, password: &str) -> DomainResult<UserProfile> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(DomainError::InvalidInput("please fill in all fields".to_string()));
        }
        let email = email.trim();
        let name = email.split('@').next().filter(|local| !local.is_empty()).unwrap_or(email);
        self.sign_in(UserProfile::new(name, email)?)
    }

    pub fn register(&mut self, name: &str, email: &str, password: &str) -> DomainResult<UserProfile> {
        if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(DomainError::InvalidInput("please fill in all fields".to_string()));
        }
        self.sign_in(UserProfile::new(name, email)?)
    }

    /// Change name and email; password fields must be all filled or all empty
    pub fn update_profile(&mut self, name: &str, email: &str, password: &PasswordChange) -> DomainResult<UserProfile> {
        if self.profile.is_none() {
            return Err(DomainError::NotFound("no signed-in user".to_string()));
        }
        password.validate()?;
        let profile = UserProfile::new(name, email)?;
        self.sign_in(profile)
    }

    pub fn logout(&mut self) {
        self.profile = None;
        self.gateway.remove(keys::USER_PROFILE);
        log::info!("Signed out");
    }

    pub fn delete_account(&mut self) {
        self.reset();
        log::info!("Account deleted");
    }

    /// Wipe storage and return to an empty state
    pub fn reset(&mut self) {
        self.gateway.clear();
        self.pantry = PantryStore::default();
        self.meal_plan = MealPlanStore::default();
        self.grocery = GroceryStore::default();
        self.settings = Settings::default();
        self.profile = None;
        self.preferences = UserPreferences::default();
        self.metrics.clear();
        self.last_digest = None;
        self.waste_log.clear();
        self.waste_ids = IdSequence::default();
        log::info!("All data cleared");
    }

    fn sign_in(&mut self, profile: UserProfile) -> DomainResult<UserProfile> {
        self.gateway.save(keys::USER_PROFILE, &profile);
        self.profile = Some(profile.clone());
        Ok(profile)
    }

    // ========================================================================
    // Food waste
    // ========================================================================

    /// Throw a pantry item away: it leaves the pantry and enters the waste log.
    /// The estimated value must be a finite amount; negatives count as 0.
    pub fn log_waste(&mut self, id: ItemId, reason: WasteReason, estimated_value: f64) -> DomainResult<WasteEntry> {
        if !estimated_value.is_finite() {
            return Err(rejected(
                "Waste log",
                DomainError::InvalidInput(format!("estimated value {} is not a number", estimated_value)),
            ));
        }
        let item = self.remove_item(id)?;
        let entry = self.waste_entry(&item, reason, estimated_value);
        self.waste_log.push(entry.clone());
        self.save_waste_log();
        log::debug!("{} logged as wasted", item.name);
        Ok(entry)
    }

    fn waste_entry(&mut self, item: &PantryItem, reason: WasteReason, estimated_value: f64) -> WasteEntry {
        WasteEntry {
            id: self.waste_ids.next(),
            name: item.name.clone(),
            category: item.category.clone(),
            reason,
            estimated_value: estimated_value.max(0.0),
            date_wasted: self.clock.now(),
            original_expiry: item.expiry,
        }
    }

    // ========================================================================
    // Write-through
    // ========================================================================

    fn edit_pantry<T>(&mut self, edit: impl FnOnce(&mut PantryStore) -> DomainResult<T>) -> DomainResult<T> {
        let value = edit(&mut self.pantry).map_err(|e| rejected("Pantry", e))?;
        self.save_pantry();
        Ok(value)
    }

    fn edit_meal_plan<T>(&mut self, edit: impl FnOnce(&mut MealPlanStore) -> DomainResult<T>) -> DomainResult<T> {
        let value = edit(&mut self.meal_plan).map_err(|e| rejected("Meal plan", e))?;
        self.save_meal_plan();
        Ok(value)
    }

    fn edit_grocery<T>(&mut self, edit: impl FnOnce(&mut GroceryStore) -> DomainResult<T>) -> DomainResult<T> {
        let value = edit(&mut self.grocery).map_err(|e| rejected("Grocery list", e))?;
        self.save_grocery();
        Ok(value)
    }

    fn save_pantry(&mut self) -> bool {
        self.gateway.save(keys::PANTRY_ITEMS, self.pantry.list())
    }

    fn save_meal_plan(&mut self) -> bool {
        self.gateway.save(keys::MEAL_PLANS, self.meal_plan.plan())
    }

    fn save_grocery(&mut self) -> bool {
        self.gateway.save(keys::GROCERY_LIST, self.grocery.list())
    }

    fn save_waste_log(&mut self) -> bool {
        self.gateway.save(keys::WASTE_LOG, &self.waste_log)
    }
}

fn rejected(area: &str, error: DomainError) -> DomainError {
    match &error {
        DomainError::InvalidInput(_) => log::debug!("{}: {}", area, error),
        _ => log::warn!("{}: {}", area, error),
    }
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use crate::storage::MemoryStorage;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn start() -> DateTime<Utc> {
        // Monday
        Utc.with_ymd_and_hms(2024, 6, 3, 9, 30, 0).unwrap()
    }

    fn state_over(backend: &MemoryStorage) -> (PantryState, FixedClock) {
        let clock = FixedClock::new(start());
        let state = PantryState::with_clock(PersistenceGateway::new(backend.clone()), clock.clone());
        (state, clock)
    }

    fn days(n: i64) -> NaiveDate {
        start().date_naive() + Duration::days(n)
    }

    #[test]
    fn test_mutations_write_through() {
        let backend = MemoryStorage::new();
        let (mut state, _) = state_over(&backend);
        state
            .add_item(NewPantryItem::new("Milk", Category::Dairy, "2", days(5)))
            .unwrap();
        state.set_meal(Weekday::Monday, MealSlot::Dinner, "Grilled Salmon").unwrap();

        let (reloaded, _) = state_over(&backend);
        assert_eq!(reloaded.pantry().list(), state.pantry().list());
        assert_eq!(reloaded.meal_plan().plan(), state.meal_plan().plan());
    }

    #[test]
    fn test_failed_operation_writes_nothing() {
        let backend = MemoryStorage::new();
        let (mut state, _) = state_over(&backend);
        assert!(matches!(state.remove_item(9), Err(DomainError::NotFound(_))));
        assert!(state.add_item(NewPantryItem::new(" ", Category::Other, "1", days(1))).is_err());
        assert_eq!(backend.raw(keys::PANTRY_ITEMS), None);
    }

    #[test]
    fn test_storage_failure_keeps_memory_state() {
        let backend = MemoryStorage::new();
        backend.set_read_only(true);
        let (mut state, _) = state_over(&backend);
        let item = state
            .add_item(NewPantryItem::new("Rice", Category::Grains, "1", days(30)))
            .unwrap();
        assert_eq!(state.pantry().get(item.id), Some(&item));
        assert!(backend.is_empty());
    }

    #[test]
    fn test_corrupt_storage_loads_defaults() {
        let backend = MemoryStorage::with_entries([
            (keys::PANTRY_ITEMS, "oops"),
            (keys::SETTINGS, "[]"),
            (keys::USER_PROFILE, "null"),
            (keys::LAST_DIGEST, "Mon Jun 03 2024"),
        ]);
        let (state, _) = state_over(&backend);
        assert!(state.pantry().is_empty());
        assert_eq!(state.settings(), &Settings::default());
        assert!(state.profile().is_none());
        assert_eq!(state.dashboard_stats(), DashboardStats::default());
    }

    #[test]
    fn test_move_checked_to_inventory() {
        let backend = MemoryStorage::new();
        let (mut state, _) = state_over(&backend);
        state.add_item(NewPantryItem::new("Milk", Category::Dairy, "1", days(2))).unwrap();

        let milk = state
            .add_grocery(NewGroceryItem {
                quantity: "2".to_string(),
                ..NewGroceryItem::quick("milk")
            })
            .unwrap();
        let bread = state
            .add_grocery(NewGroceryItem {
                category: Category::Grains,
                ..NewGroceryItem::quick("Bread")
            })
            .unwrap();
        state.add_grocery(NewGroceryItem::quick("Eggs")).unwrap();
        state.toggle_grocery(milk.id).unwrap();
        state.toggle_grocery(bread.id).unwrap();

        let stocked = state.move_checked_to_inventory().unwrap();
        assert_eq!(stocked.len(), 2);

        let pantry = state.pantry();
        assert_eq!(pantry.len(), 2);
        assert_eq!(pantry.find_by_name("Milk").unwrap().quantity, "3");
        let new_bread = pantry.find_by_name("bread").unwrap();
        assert_eq!(new_bread.expiry, days(DEFAULT_SHELF_LIFE_DAYS));
        assert_eq!(new_bread.category, Category::Grains);

        let remaining: Vec<_> = state.grocery().list().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(remaining, vec!["Eggs"]);

        let (reloaded, _) = state_over(&backend);
        assert_eq!(reloaded.grocery().len(), 1);
        assert_eq!(reloaded.pantry().len(), 2);
    }

    #[test]
    fn test_restock_from_inventory() {
        let backend = MemoryStorage::new();
        let (mut state, _) = state_over(&backend);
        let rice = state
            .add_item(NewPantryItem::new("Rice", Category::Grains, "1", days(30)))
            .unwrap();

        let listed = state.restock_from_inventory(rice.id).unwrap();
        assert_eq!(listed.priority, Priority::Urgent);
        assert_eq!(listed.notes.as_deref(), Some("Restock"));
        assert_eq!(listed.category, Category::Grains);
        assert_eq!(state.pantry().len(), 1);

        assert!(matches!(state.restock_from_inventory(rice.id), Err(DomainError::Conflict(_))));
        assert!(matches!(state.restock_from_inventory(99), Err(DomainError::NotFound(_))));
        assert_eq!(state.grocery().len(), 1);
    }

    #[test]
    fn test_clear_expired_logs_waste() {
        let backend = MemoryStorage::new();
        let (mut state, clock) = state_over(&backend);
        state.add_item(NewPantryItem::new("Yogurt", Category::Dairy, "1", days(-1))).unwrap();
        state.add_item(NewPantryItem::new("Rice", Category::Grains, "1", days(40))).unwrap();

        let removed = state.clear_expired(true);
        assert_eq!(removed.len(), 1);
        assert_eq!(state.waste_log()[0].name, "Yogurt");
        assert_eq!(state.waste_log()[0].reason, WasteReason::Expired);
        assert!(state.clear_expired(true).is_empty());

        clock.advance(Duration::days(45));
        assert_eq!(state.clear_expired(false).len(), 1);
        assert_eq!(state.waste_log().len(), 1);
        assert_eq!(state.waste_stats(WastePeriod::Year).total_items, 1);
    }

    #[test]
    fn test_log_waste_removes_item() {
        let backend = MemoryStorage::new();
        let (mut state, _) = state_over(&backend);
        let bread = state
            .add_item(NewPantryItem::new("Bread", Category::Grains, "1", days(1)))
            .unwrap();
        let entry = state.log_waste(bread.id, WasteReason::Spoiled, 2.5).unwrap();
        assert_eq!(entry.id, 1);
        assert_eq!(entry.original_expiry, days(1));
        assert!(state.pantry().is_empty());
        assert!(matches!(
            state.log_waste(bread.id, WasteReason::Spoiled, 0.0),
            Err(DomainError::NotFound(_))
        ));

        let (reloaded, _) = state_over(&backend);
        assert_eq!(reloaded.waste_log(), state.waste_log());
    }

    #[test]
    fn test_non_finite_waste_value_keeps_log_loadable() {
        let backend = MemoryStorage::new();
        let (mut state, _) = state_over(&backend);
        let bread = state
            .add_item(NewPantryItem::new("Bread", Category::Grains, "1", days(1)))
            .unwrap();
        let milk = state
            .add_item(NewPantryItem::new("Milk", Category::Dairy, "1", days(1)))
            .unwrap();
        state.log_waste(bread.id, WasteReason::Spoiled, 2.5).unwrap();

        for value in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            assert!(matches!(
                state.log_waste(milk.id, WasteReason::Spoiled, value),
                Err(DomainError::InvalidInput(_))
            ));
        }
        assert!(state.pantry().get(milk.id).is_some());
        state.log_waste(milk.id, WasteReason::Leftover, -3.0).unwrap();

        let (reloaded, _) = state_over(&backend);
        assert_eq!(reloaded.waste_log().len(), 2);
        assert_eq!(reloaded.waste_log()[1].estimated_value, 0.0);
    }

    #[test]
    fn test_loads_browser_records_with_string_ids() {
        let backend = MemoryStorage::with_entries([
            (
                keys::GROCERY_LIST,
                r#"[{"id":"1717400000000","name":"Eggs","quantity":"12","category":"dairy","priority":"high","notes":"","completed":false,"addedDate":"2024-06-03T09:00:00.000Z"},
                   {"id":"17174000000000.8391","name":"Apples","quantity":"1","category":"fruits","priority":"normal","completed":false,"addedDate":"2024-06-03T09:00:00.000Z"},
                   {"id":"1717400000000","name":"Bread","quantity":"1","category":"grains","priority":"low","completed":true,"addedDate":"2024-06-03T09:00:00.000Z"}]"#,
            ),
            (
                keys::WASTE_LOG,
                r#"[{"id":"1717300000000","name":"Yogurt","category":"dairy","reason":"expired","estimatedValue":null,"dateWasted":"2024-06-02T18:00:00.000Z","originalExpiry":"2024-06-01"}]"#,
            ),
        ]);
        let (mut state, _) = state_over(&backend);

        let ids: Vec<ItemId> = state.grocery().list().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1717400000000, 1717400000001, 1717400000002]);
        assert_eq!(state.waste_log()[0].id, 1717300000000);

        let added = state.add_grocery(NewGroceryItem::quick("Rice")).unwrap();
        assert_eq!(added.id, 1717400000003);
    }

    #[test]
    fn test_backup_with_string_ids_imports() {
        let backend = MemoryStorage::new();
        let (mut state, _) = state_over(&backend);
        let document = r#"{
            "pantryItems": [{"id": 1717400000000, "name": "Milk", "category": "dairy", "quantity": "1", "expiry": "2024-06-05"}],
            "groceryItems": [{"id": "1717400000001", "name": "Eggs", "quantity": "12", "category": "dairy", "priority": "medium", "completed": false, "addedDate": "2024-06-03T09:00:00.000Z"}],
            "exportDate": "2024-06-03T09:00:00.000Z"
        }"#;
        state.import_backup(document).unwrap();
        assert_eq!(state.pantry().len(), 1);
        assert_eq!(state.grocery().list()[0].id, 1717400000001);
    }

    #[test]
    fn test_duplicate_names_merged_on_load() {
        let backend = MemoryStorage::with_entries([(
            keys::PANTRY_ITEMS,
            r#"[{"id":1,"name":"Milk","category":"dairy","quantity":"1","expiry":"2024-06-08"},
               {"id":2,"name":"milk","category":"dairy","quantity":"2","expiry":"2024-06-05"}]"#,
        )]);
        let (state, _) = state_over(&backend);
        assert_eq!(state.pantry().len(), 1);
        let milk = state.pantry().find_by_name("MILK").unwrap();
        assert_eq!(milk.quantity, "3");
        assert_eq!(milk.expiry, days(2));

        let (reloaded, _) = state_over(&backend);
        assert_eq!(reloaded.pantry().list(), state.pantry().list());
    }

    #[test]
    fn test_meal_ingredients_added_once() {
        let backend = MemoryStorage::new();
        let (mut state, _) = state_over(&backend);
        state
            .add_item(NewPantryItem::new("Olive oil", Category::Condiments, "1", days(90)))
            .unwrap();
        state.set_meal(Weekday::Monday, MealSlot::Dinner, "Pasta Primavera").unwrap();

        let added = state.add_meal_ingredients();
        let names: Vec<_> = added.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Pasta", "Mixed vegetables", "Parmesan cheese"]);
        assert_eq!(added[0].notes.as_deref(), Some("For Pasta Primavera"));
        assert!(state.add_meal_ingredients().is_empty());
    }

    #[test]
    fn test_move_meal_persists() {
        let backend = MemoryStorage::new();
        let (mut state, _) = state_over(&backend);
        state.set_meal(Weekday::Monday, MealSlot::Dinner, "Curry").unwrap();
        state
            .move_meal((Weekday::Monday, MealSlot::Dinner), (Weekday::Friday, MealSlot::Lunch))
            .unwrap();
        let (reloaded, _) = state_over(&backend);
        assert_eq!(reloaded.meal_plan().get(Weekday::Friday, MealSlot::Lunch), Some("Curry"));
        assert_eq!(reloaded.meal_plan().get(Weekday::Monday, MealSlot::Dinner), None);
    }

    #[test]
    fn test_csv_import_merges_and_rejects_whole_file() {
        let backend = MemoryStorage::new();
        let (mut state, _) = state_over(&backend);
        state.add_item(NewPantryItem::new("Milk", Category::Dairy, "2", days(2))).unwrap();

        let outcomes = state
            .import_csv("name,category,quantity,expiry\nmilk,dairy,5,2024-06-20\nEggs,dairy,12,2024-06-15\n")
            .unwrap();
        assert_eq!(outcomes.iter().filter(|o| o.was_inserted()).count(), 1);
        assert_eq!(state.pantry().len(), 2);
        assert_eq!(state.pantry().find_by_name("Milk").unwrap().quantity, "5");

        let before = state.pantry().list().to_vec();
        assert!(state.import_csv("Bread,grains,1,2024-06-09\nJam,condiments\n").is_err());
        assert_eq!(state.pantry().list(), &before[..]);
        assert!(state.export_csv().starts_with("name,category,quantity,expiry\nMilk,dairy,5,2024-06-20\n"));
    }

    #[test]
    fn test_backup_round_trip() {
        let source = MemoryStorage::new();
        let (mut state, _) = state_over(&source);
        state.add_item(NewPantryItem::new("Milk", Category::Dairy, "2", days(2))).unwrap();
        state.add_grocery(NewGroceryItem::quick("Bread")).unwrap();
        state.set_meal(Weekday::Sunday, MealSlot::Lunch, "Roast").unwrap();
        let document = state.export_backup().unwrap();

        let target = MemoryStorage::new();
        let (mut restored, _) = state_over(&target);
        restored.import_backup(&document).unwrap();
        assert_eq!(restored.pantry().list(), state.pantry().list());
        assert_eq!(restored.grocery().list(), state.grocery().list());
        assert_eq!(restored.meal_plan().plan(), state.meal_plan().plan());
        assert!(target.raw(keys::GROCERY_LIST).is_some());

        assert!(restored.import_backup("{\"exportDate\": null}").is_err());
        assert_eq!(restored.pantry().len(), 1);
    }

    #[test]
    fn test_alert_checks_digest_and_metrics() {
        let backend = MemoryStorage::new();
        let (mut state, clock) = state_over(&backend);
        state.add_item(NewPantryItem::new("Milk", Category::Dairy, "1", days(1))).unwrap();
        assert!(state.run_alert_checks().is_empty());
        assert_eq!(state.metrics_history().len(), 1);

        state.toggle_setting(Setting::ExpiryAlerts);
        state.toggle_setting(Setting::DailyDigest);
        let texts: Vec<_> = state.run_alert_checks().into_iter().map(|a| a.text).collect();
        assert_eq!(
            texts,
            vec![
                "1 item(s) expiring soon".to_string(),
                "Daily Digest: 1 expiring, 1 low stock, 0 expired".to_string(),
            ]
        );
        assert_eq!(backend.raw(keys::LAST_DIGEST).as_deref(), Some("2024-06-03"));
        assert_eq!(state.run_alert_checks().len(), 1);
        assert_eq!(state.metrics_history().len(), 1);

        let (mut reloaded, _) = state_over(&backend);
        assert!(reloaded.run_alert_checks().iter().all(|a| a.kind != AlertKind::Digest));

        clock.advance(Duration::days(1));
        let alerts = state.run_alert_checks();
        assert!(alerts.iter().any(|a| a.kind == AlertKind::Digest));
        assert_eq!(state.metrics_history().len(), 2);
    }

    #[test]
    fn test_settings_persist_by_display_name() {
        let backend = MemoryStorage::new();
        let (mut state, _) = state_over(&backend);
        assert!(state.toggle_setting(Setting::LowStockAlerts));
        let saved: serde_json::Value =
            serde_json::from_str(&backend.raw(keys::SETTINGS).unwrap()).unwrap();
        assert_eq!(saved["Low Stock Alerts"], true);
        assert_eq!(saved["Daily Digest"], false);
    }

    #[test]
    fn test_account_lifecycle() {
        let backend = MemoryStorage::new();
        let (mut state, _) = state_over(&backend);
        assert!(state.login("jo@example.com", "").is_err());

        let profile = state.login(" jo@example.com ", "secret").unwrap();
        assert_eq!(profile.name, "jo");
        assert_eq!(profile.email, "jo@example.com");

        let mismatch = PasswordChange {
            current: "secret".to_string(),
            new: "a".to_string(),
            confirm: "b".to_string(),
        };
        assert!(state.update_profile("Jo", "jo@example.com", &mismatch).is_err());
        let updated = state
            .update_profile("Jo Smith", "jo@example.com", &PasswordChange::default())
            .unwrap();
        assert_eq!(state.profile(), Some(&updated));

        state.logout();
        assert!(backend.raw(keys::USER_PROFILE).is_none());
        assert!(matches!(
            state.update_profile("Jo", "jo@example.com", &PasswordChange::default()),
            Err(DomainError::NotFound(_))
        ));

        state.register("Sam", "sam@example.com", "pw").unwrap();
        state.add_item(NewPantryItem::new("Milk", Category::Dairy, "2", days(2))).unwrap();
        state.delete_account();
        assert!(backend.is_empty());
        assert!(state.profile().is_none());
        assert!(state.pantry().is_empty());
    }
}
