//! Meal Plan
//!
//! Weekly plan: weekday -> meal slot -> recipe name.
//! Serialized as `{"Monday": {"dinner": "Pasta Primavera"}}`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult};

/// The seven fixed day keys, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    pub fn parse(s: &str) -> DomainResult<Self> {
        Weekday::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::InvalidInput(format!("unknown day '{}'", s)))
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

/// Meal slot within a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    pub const ALL: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Lunch => "Lunch",
            MealSlot::Dinner => "Dinner",
        }
    }

    pub fn parse(s: &str) -> DomainResult<Self> {
        MealSlot::ALL
            .into_iter()
            .find(|slot| slot.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::InvalidInput(format!("unknown meal slot '{}'", s)))
    }
}

/// Weekly meal plan. Days without any populated slot are never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MealPlan {
    days: BTreeMap<Weekday, BTreeMap<MealSlot, String>>,
}

impl MealPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, day: Weekday, slot: MealSlot) -> Option<&str> {
        self.days.get(&day)?.get(&slot).map(String::as_str)
    }

    pub fn day(&self, day: Weekday) -> Option<&BTreeMap<MealSlot, String>> {
        self.days.get(&day)
    }

    /// Populated cells in (day, slot) order
    pub fn cells(&self) -> impl Iterator<Item = (Weekday, MealSlot, &str)> + '_ {
        self.days
            .iter()
            .flat_map(|(day, slots)| slots.iter().map(move |(slot, recipe)| (*day, *slot, recipe.as_str())))
    }

    pub fn planned_meals(&self) -> usize {
        self.days.values().map(BTreeMap::len).sum()
    }

    pub fn days_with_plans(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Set a cell; a blank recipe name clears it
    pub(crate) fn set(&mut self, day: Weekday, slot: MealSlot, recipe: &str) {
        let recipe = recipe.trim();
        if recipe.is_empty() {
            self.clear(day, slot);
            return;
        }
        self.days.entry(day).or_default().insert(slot, recipe.to_string());
    }

    /// Clear a cell, pruning the day if it becomes empty
    pub(crate) fn clear(&mut self, day: Weekday, slot: MealSlot) -> Option<String> {
        let slots = self.days.get_mut(&day)?;
        let removed = slots.remove(&slot);
        if slots.is_empty() {
            self.days.remove(&day);
        }
        removed
    }

    pub(crate) fn clear_all(&mut self) {
        self.days.clear();
    }

    /// Drop empty day entries left behind by older data
    pub(crate) fn prune(&mut self) {
        self.days.retain(|_, slots| {
            slots.retain(|_, recipe| !recipe.trim().is_empty());
            !slots.is_empty()
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_clear_prunes_day() {
        let mut plan = MealPlan::new();
        plan.set(Weekday::Monday, MealSlot::Dinner, "Pasta Primavera");
        assert_eq!(plan.get(Weekday::Monday, MealSlot::Dinner), Some("Pasta Primavera"));
        assert_eq!(plan.days_with_plans(), 1);

        assert_eq!(plan.clear(Weekday::Monday, MealSlot::Dinner).as_deref(), Some("Pasta Primavera"));
        assert!(plan.is_empty());
    }

    #[test]
    fn test_serialized_layout() {
        let mut plan = MealPlan::new();
        plan.set(Weekday::Friday, MealSlot::Lunch, "Grilled Salmon");
        let json = serde_json::to_string(&plan).unwrap();
        assert_eq!(json, r#"{"Friday":{"lunch":"Grilled Salmon"}}"#);

        let parsed: MealPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, plan);
    }

    #[test]
    fn test_unknown_day_fails_to_parse() {
        let result: Result<MealPlan, _> = serde_json::from_str(r#"{"Someday":{"lunch":"Soup"}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_cells_in_week_order() {
        let mut plan = MealPlan::new();
        plan.set(Weekday::Sunday, MealSlot::Breakfast, "Pancakes");
        plan.set(Weekday::Monday, MealSlot::Dinner, "Curry");
        plan.set(Weekday::Monday, MealSlot::Breakfast, "Oats");

        let cells: Vec<_> = plan.cells().collect();
        assert_eq!(
            cells,
            vec![
                (Weekday::Monday, MealSlot::Breakfast, "Oats"),
                (Weekday::Monday, MealSlot::Dinner, "Curry"),
                (Weekday::Sunday, MealSlot::Breakfast, "Pancakes"),
            ]
        );
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(Weekday::parse("tuesday").unwrap(), Weekday::Tuesday);
        assert_eq!(MealSlot::parse("Dinner").unwrap(), MealSlot::Dinner);
        assert!(MealSlot::parse("brunch").is_err());
    }
}
