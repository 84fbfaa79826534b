//! Store-level tests across collections and against persisted snapshots

use chrono::{NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

use super::*;
use crate::domain::{Category, MealPlan, MealSlot, NewGroceryItem, NewPantryItem, PantryItem, PantryItemPatch, Weekday};
use crate::storage::{keys, MemoryStorage, PersistenceGateway};

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

// ============================================================================
// Reload from storage
// ============================================================================

#[test]
fn test_stores_rebuilt_from_saved_snapshot() {
    let backend = MemoryStorage::new();
    let mut gateway = PersistenceGateway::new(backend.clone());

    let mut pantry = PantryStore::default();
    pantry.add(NewPantryItem::new("Milk", Category::Dairy, "2", date(4))).unwrap();
    pantry.add(NewPantryItem::new("Rice", Category::Grains, "1 kg", date(30))).unwrap();
    assert!(gateway.save(keys::PANTRY_ITEMS, pantry.list()));

    let mut plan = MealPlanStore::default();
    plan.set_meal(Weekday::Thursday, MealSlot::Lunch, "Wrap").unwrap();
    assert!(gateway.save(keys::MEAL_PLANS, plan.plan()));

    let reopened = PersistenceGateway::new(backend);
    let mut pantry = PantryStore::new(reopened.load(keys::PANTRY_ITEMS));
    let plan = MealPlanStore::new(reopened.load::<MealPlan>(keys::MEAL_PLANS));

    assert_eq!(pantry.len(), 2);
    assert_eq!(plan.get(Weekday::Thursday, MealSlot::Lunch), Some("Wrap"));
    // Ids keep increasing after a reload
    let eggs = pantry.add(NewPantryItem::new("Eggs", Category::Dairy, "12", date(9))).unwrap();
    assert_eq!(eggs.id, 3);
}

#[test]
fn test_corrupt_snapshot_loads_empty() {
    let backend = MemoryStorage::with_entries([(keys::PANTRY_ITEMS, "{not json"), (keys::MEAL_PLANS, "[1,2]")]);
    let gateway = PersistenceGateway::new(backend);
    assert!(PantryStore::new(gateway.load(keys::PANTRY_ITEMS)).is_empty());
    assert!(MealPlanStore::new(gateway.load(keys::MEAL_PLANS)).plan().is_empty());
}

#[test]
fn test_ids_follow_highest_loaded_id() {
    let items = vec![
        PantryItem::new(7, "Milk".into(), Category::Dairy, "1".into(), date(1)),
        PantryItem::new(3, "Bread".into(), Category::Grains, "1".into(), date(1)),
    ];
    let mut store = PantryStore::new(items);
    let added = store.add(NewPantryItem::new("Jam", Category::Condiments, "1", date(1))).unwrap();
    assert_eq!(added.id, 8);
}

#[test]
fn test_grocery_and_pantry_ids_are_independent() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let mut pantry = PantryStore::default();
    let mut grocery = GroceryStore::default();
    pantry.add(NewPantryItem::new("Milk", Category::Dairy, "1", date(2))).unwrap();
    let listed = grocery.add(NewGroceryItem::quick("Milk"), now).unwrap();
    assert_eq!(listed.id, 1);
}

// ============================================================================
// Properties
// ============================================================================

#[derive(Debug, Clone)]
enum PantryOp {
    Upsert(String, u8),
    Change(u64, i64),
    Remove(u64),
}

fn pantry_op() -> impl Strategy<Value = PantryOp> {
    let name = prop::sample::select(vec!["milk", "Milk", "MILK", "eggs", "Eggs", "rice", " rice "]);
    prop_oneof![
        (name, 0u8..20).prop_map(|(name, qty)| PantryOp::Upsert(name.to_string(), qty)),
        (1u64..6, -30i64..30).prop_map(|(id, delta)| PantryOp::Change(id, delta)),
        (1u64..6).prop_map(PantryOp::Remove),
    ]
}

proptest! {
    #[test]
    fn test_upsert_keeps_names_unique(ops in prop::collection::vec(pantry_op(), 0..40)) {
        let mut store = PantryStore::default();
        for op in ops {
            match op {
                PantryOp::Upsert(name, qty) => {
                    let patch = PantryItemPatch {
                        quantity: Some(qty.to_string()),
                        expiry: Some(date(10)),
                        ..Default::default()
                    };
                    store.upsert_by_name(&name, patch).unwrap();
                }
                PantryOp::Change(id, delta) => {
                    let _ = store.change_quantity(id, delta);
                }
                PantryOp::Remove(id) => {
                    let _ = store.remove(id);
                }
            }
        }
        let mut names: Vec<String> = store.list().iter().map(|i| i.name.to_lowercase()).collect();
        let total = names.len();
        names.sort();
        names.dedup();
        prop_assert_eq!(names.len(), total);
    }

    #[test]
    fn test_quantity_never_negative(start in 0i64..50, deltas in prop::collection::vec(-100i64..100, 0..30)) {
        let mut store = PantryStore::default();
        let item = store
            .add(NewPantryItem::new("Beans", Category::Other, &format!("{} cans", start), date(1)))
            .unwrap();
        for delta in deltas {
            let updated = store.change_quantity(item.id, delta).unwrap();
            prop_assert!(updated.quantity_value().unwrap() >= 0);
            prop_assert!(updated.quantity.ends_with(" cans"));
        }
    }
}
