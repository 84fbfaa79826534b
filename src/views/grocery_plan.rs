//! Grocery List from Meal Plan
//!
//! Ingredient need over every planned meal, minus what the pantry holds.

use std::collections::HashMap;

use crate::domain::{Category, Entity, GroceryItem, MealPlan, NewGroceryItem, PantryItem, Priority};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub name: String,
    pub quantity: u32,
}

impl Ingredient {
    pub fn new(name: &str, quantity: u32) -> Self {
        Self {
            name: name.to_string(),
            quantity,
        }
    }
}

/// Recipe name -> ingredients, looked up case-insensitively
#[derive(Debug, Clone)]
pub struct RecipeBook {
    recipes: HashMap<String, (String, Vec<Ingredient>)>,
}

impl RecipeBook {
    pub fn empty() -> Self {
        Self {
            recipes: HashMap::new(),
        }
    }

    pub fn with_recipe(mut self, name: &str, ingredients: Vec<Ingredient>) -> Self {
        self.insert(name, ingredients);
        self
    }

    pub fn insert(&mut self, name: &str, ingredients: Vec<Ingredient>) {
        self.recipes
            .insert(name.trim().to_lowercase(), (name.trim().to_string(), ingredients));
    }

    pub fn ingredients(&self, recipe: &str) -> Option<&[Ingredient]> {
        self.recipes
            .get(&recipe.trim().to_lowercase())
            .map(|(_, ingredients)| ingredients.as_slice())
    }

    /// Recipe names in alphabetical order, for the recipe picker
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.recipes.values().map(|(name, _)| name.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl Default for RecipeBook {
    fn default() -> Self {
        let one = |names: &[&str]| names.iter().map(|name| Ingredient::new(name, 1)).collect();
        RecipeBook::empty()
            .with_recipe(
                "Chicken Stir Fry",
                one(&["Chicken breast", "Bell peppers", "Onions", "Soy sauce"]),
            )
            .with_recipe(
                "Pasta Primavera",
                one(&["Pasta", "Mixed vegetables", "Olive oil", "Parmesan cheese"]),
            )
            .with_recipe("Grilled Salmon", one(&["Salmon fillet", "Lemon", "Herbs", "Olive oil"]))
            .with_recipe(
                "Vegetable Curry",
                one(&["Mixed vegetables", "Coconut milk", "Curry powder", "Rice"]),
            )
    }
}

/// An ingredient still to buy
#[derive(Debug, Clone, PartialEq)]
pub struct GroceryCandidate {
    pub name: String,
    pub quantity: i64,
    pub category: Category,
    /// First recipe that asked for it
    pub recipe: String,
}

impl GroceryCandidate {
    pub fn into_new_item(self) -> NewGroceryItem {
        NewGroceryItem {
            name: self.name,
            quantity: self.quantity.to_string(),
            category: self.category,
            priority: Priority::Normal,
            notes: Some(format!("For {}", self.recipe)),
        }
    }
}

struct Need {
    name: String,
    quantity: i64,
    recipe: String,
}

/// Candidates for every ingredient whose total need across the plan exceeds
/// what the pantry holds, skipping names already on the grocery list.
/// Ordered by first appearance in the plan (Monday breakfast first).
pub fn grocery_from_meal_plan(
    plan: &MealPlan,
    pantry: &[PantryItem],
    grocery: &[GroceryItem],
    recipes: &RecipeBook,
) -> Vec<GroceryCandidate> {
    let mut needs: Vec<Need> = Vec::new();
    let mut index_by_name: HashMap<String, usize> = HashMap::new();

    for (_, _, recipe) in plan.cells() {
        let Some(ingredients) = recipes.ingredients(recipe) else {
            log::debug!("No ingredients known for {}", recipe);
            continue;
        };
        for ingredient in ingredients {
            let key = ingredient.name.trim().to_lowercase();
            match index_by_name.get(&key) {
                Some(&index) => {
                    needs[index].quantity = needs[index].quantity.saturating_add(i64::from(ingredient.quantity))
                }
                None => {
                    index_by_name.insert(key, needs.len());
                    needs.push(Need {
                        name: ingredient.name.trim().to_string(),
                        quantity: i64::from(ingredient.quantity),
                        recipe: recipe.to_string(),
                    });
                }
            }
        }
    }

    let on_hand = on_hand(pantry);

    needs
        .into_iter()
        .filter(|need| !grocery.iter().any(|item| item.has_name(&need.name)))
        .filter_map(|need| {
            let key = need.name.to_lowercase();
            let remainder = need.quantity.saturating_sub(on_hand.get(&key).copied().unwrap_or(0));
            if remainder <= 0 {
                return None;
            }
            let category = pantry
                .iter()
                .find(|item| item.has_name(&need.name))
                .map(|item| item.category.clone())
                .unwrap_or_else(|| Category::Custom("ingredient".to_string()));
            Some(GroceryCandidate {
                name: need.name,
                quantity: remainder,
                category,
                recipe: need.recipe,
            })
        })
        .collect()
}

/// Numeric amount on hand per lowercase name, summed over same-name rows
fn on_hand(pantry: &[PantryItem]) -> HashMap<String, i64> {
    let mut totals: HashMap<String, i64> = HashMap::new();
    for item in pantry {
        let value = item.quantity_value().unwrap_or(0).max(0);
        let total = totals.entry(item.name.trim().to_lowercase()).or_insert(0);
        *total = total.saturating_add(value);
    }
    totals
}
