//! Smart Shopping Suggestions

use serde::Serialize;

use crate::config::SUGGESTION_LIMIT;
use crate::domain::{Category, GroceryItem, NewGroceryItem, PantryItem, Priority, UserPreferences};
use crate::status::is_low_stock;

const HEALTHY_GOAL: &str = "eat-healthier";

static FREQUENT_ITEMS: [(&str, Category, Priority); 8] = [
    ("Milk", Category::Dairy, Priority::Urgent),
    ("Bread", Category::Grains, Priority::Normal),
    ("Eggs", Category::Dairy, Priority::Urgent),
    ("Chicken Breast", Category::Meat, Priority::Normal),
    ("Rice", Category::Grains, Priority::Low),
    ("Onions", Category::Vegetables, Priority::Normal),
    ("Tomatoes", Category::Vegetables, Priority::Normal),
    ("Olive Oil", Category::Condiments, Priority::Low),
];

static HEALTHY_ITEMS: [(&str, Category, Priority); 2] = [
    ("Spinach", Category::Vegetables, Priority::Urgent),
    ("Apples", Category::Fruits, Priority::Normal),
];

const NON_VEGETARIAN: [&str; 5] = ["meat", "fish", "poultry", "salmon", "chicken"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SuggestionReason {
    LowStock,
    HealthyChoice,
    CommonlyNeeded,
}

impl SuggestionReason {
    pub fn label(&self) -> &'static str {
        match self {
            SuggestionReason::LowStock => "Low stock",
            SuggestionReason::HealthyChoice => "Healthy choice",
            SuggestionReason::CommonlyNeeded => "Commonly needed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub name: String,
    pub category: Category,
    pub priority: Priority,
    pub reason: SuggestionReason,
}

impl Suggestion {
    pub fn into_new_item(self) -> NewGroceryItem {
        NewGroceryItem {
            name: self.name,
            quantity: "1".to_string(),
            category: self.category,
            priority: self.priority,
            notes: None,
        }
    }
}

/// Low-stock pantry items first, then the staples that neither the pantry
/// nor the grocery list mention yet
pub fn shopping_suggestions(
    pantry: &[PantryItem],
    grocery: &[GroceryItem],
    preferences: &UserPreferences,
) -> Vec<Suggestion> {
    let healthy = preferences.has_goal(HEALTHY_GOAL);
    let vegetarian = preferences.is_vegetarian();

    let low_stock = pantry
        .iter()
        .filter(|item| is_low_stock(&item.quantity))
        .map(|item| Suggestion {
            name: item.name.clone(),
            category: item.category.clone(),
            priority: Priority::Urgent,
            reason: SuggestionReason::LowStock,
        });

    let mentioned = |name: &str| {
        let needle = name.to_lowercase();
        pantry.iter().any(|item| item.name.to_lowercase().contains(&needle))
            || grocery.iter().any(|item| item.name.to_lowercase().contains(&needle))
    };

    let extras = if healthy { &HEALTHY_ITEMS[..] } else { &HEALTHY_ITEMS[..0] };
    let staples = FREQUENT_ITEMS
        .iter()
        .chain(extras)
        .filter(|(_, category, _)| !(vegetarian && is_non_vegetarian(category)))
        .filter(|(name, _, _)| !mentioned(name))
        .map(|(name, category, priority)| {
            let produce = matches!(category, Category::Vegetables | Category::Fruits);
            Suggestion {
                name: name.to_string(),
                category: category.clone(),
                priority: *priority,
                reason: if healthy && produce {
                    SuggestionReason::HealthyChoice
                } else {
                    SuggestionReason::CommonlyNeeded
                },
            }
        });

    low_stock.chain(staples).take(SUGGESTION_LIMIT).collect()
}

fn is_non_vegetarian(category: &Category) -> bool {
    let category = category.as_str().to_lowercase();
    NON_VEGETARIAN.iter().any(|word| category.contains(word))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn pantry_item(id: u64, name: &str, qty: &str) -> PantryItem {
        PantryItem::new(
            id,
            name.to_string(),
            Category::Other,
            qty.to_string(),
            NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
        )
    }

    fn names(suggestions: &[Suggestion]) -> Vec<&str> {
        suggestions.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_staples_for_empty_pantry() {
        let suggestions = shopping_suggestions(&[], &[], &UserPreferences::default());
        assert_eq!(
            names(&suggestions),
            vec!["Milk", "Bread", "Eggs", "Chicken Breast", "Rice", "Onions", "Tomatoes", "Olive Oil"]
        );
        assert!(suggestions.iter().all(|s| s.reason == SuggestionReason::CommonlyNeeded));
    }

    #[test]
    fn test_low_stock_first_and_mentions_skipped() {
        let pantry = vec![pantry_item(1, "Whole Milk", "1"), pantry_item(2, "Brown Rice", "10")];
        let suggestions = shopping_suggestions(&pantry, &[], &UserPreferences::default());
        assert_eq!(suggestions[0].name, "Whole Milk");
        assert_eq!(suggestions[0].reason, SuggestionReason::LowStock);
        assert_eq!(suggestions[0].priority, Priority::Urgent);
        let rest = names(&suggestions[1..]);
        assert!(!rest.contains(&"Milk"));
        assert!(!rest.contains(&"Rice"));
    }

    #[test]
    fn test_preferences_shape_staples() {
        let preferences = UserPreferences {
            dietary_restrictions: vec!["Vegetarian".to_string()],
            goals: vec!["eat-healthier".to_string()],
        };
        let suggestions = shopping_suggestions(&[], &[], &preferences);
        let names = names(&suggestions);
        assert!(!names.contains(&"Chicken Breast"));
        assert!(names.contains(&"Spinach"));
        let apples = suggestions.iter().find(|s| s.name == "Apples").unwrap();
        assert_eq!(apples.reason, SuggestionReason::HealthyChoice);
    }

    #[test]
    fn test_capped() {
        let pantry: Vec<_> = (1..=20).map(|i| pantry_item(i, &format!("Item {}", i), "1")).collect();
        let suggestions = shopping_suggestions(&pantry, &[], &UserPreferences::default());
        assert_eq!(suggestions.len(), SUGGESTION_LIMIT);
        assert!(suggestions.iter().all(|s| s.reason == SuggestionReason::LowStock));
    }
}
