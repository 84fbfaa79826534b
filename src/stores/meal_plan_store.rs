//! Meal Plan Store

use crate::domain::{DomainError, DomainResult, MealPlan, MealSlot, Weekday};

/// Result of a drag-move between two cells
#[derive(Debug, Clone, PartialEq)]
pub struct MealMove {
    pub recipe: String,
    /// Recipe that occupied the target cell and was overwritten
    pub displaced: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MealPlanStore {
    plan: MealPlan,
}

impl MealPlanStore {
    pub fn new(mut plan: MealPlan) -> Self {
        plan.prune();
        Self { plan }
    }

    pub fn plan(&self) -> &MealPlan {
        &self.plan
    }

    pub fn get(&self, day: Weekday, slot: MealSlot) -> Option<&str> {
        self.plan.get(day, slot)
    }

    /// Assign a recipe to a cell, returning the recipe it replaced
    pub fn set_meal(&mut self, day: Weekday, slot: MealSlot, recipe: &str) -> DomainResult<Option<String>> {
        if recipe.trim().is_empty() {
            return Err(DomainError::InvalidInput("recipe name is required".to_string()));
        }
        let previous = self.plan.get(day, slot).map(str::to_string);
        self.plan.set(day, slot, recipe);
        log::debug!("Meal plan {} {} = {}", day.as_str(), slot.as_str(), recipe.trim());
        Ok(previous)
    }

    pub fn clear_meal(&mut self, day: Weekday, slot: MealSlot) -> DomainResult<String> {
        self.plan.clear(day, slot).ok_or_else(|| empty_cell(day, slot))
    }

    /// Move a recipe to another cell. The next plan is built in full before
    /// it replaces the current one, so no reader sees the recipe twice.
    pub fn move_meal(
        &mut self,
        from_day: Weekday,
        from_slot: MealSlot,
        to_day: Weekday,
        to_slot: MealSlot,
    ) -> DomainResult<MealMove> {
        let recipe = self
            .plan
            .get(from_day, from_slot)
            .map(str::to_string)
            .ok_or_else(|| empty_cell(from_day, from_slot))?;
        if (from_day, from_slot) == (to_day, to_slot) {
            return Ok(MealMove { recipe, displaced: None });
        }

        let mut next = self.plan.clone();
        next.clear(from_day, from_slot);
        let displaced = next.get(to_day, to_slot).map(str::to_string);
        next.set(to_day, to_slot, &recipe);
        self.plan = next;

        Ok(MealMove { recipe, displaced })
    }

    /// Remove every planned meal, returning how many there were
    pub fn clear_all(&mut self) -> usize {
        let count = self.plan.planned_meals();
        self.plan.clear_all();
        count
    }

    pub(crate) fn replace(&mut self, mut plan: MealPlan) {
        plan.prune();
        self.plan = plan;
    }
}

fn empty_cell(day: Weekday, slot: MealSlot) -> DomainError {
    DomainError::NotFound(format!("no meal planned for {} {}", day.as_str(), slot.as_str()))
}
