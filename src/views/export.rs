//! Plain-text exports for download or sharing

use chrono::NaiveDate;

use crate::domain::{GroceryItem, MealPlan, MealSlot, Weekday};

const DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Meal plan printout: one block per planned day, optionally followed by
/// the grocery list
pub fn meal_plan_text(plan: &MealPlan, grocery: Option<&[GroceryItem]>, today: NaiveDate) -> String {
    let mut out = format!(
        "SMART PANTRY - MEAL PLAN\n{}\n{}\n\n",
        today.format(DATE_FORMAT),
        "=".repeat(35)
    );
    for day in Weekday::ALL {
        if plan.day(day).is_none() {
            continue;
        }
        out.push_str(&format!("{}:\n", day.as_str().to_uppercase()));
        for slot in MealSlot::ALL {
            let recipe = plan.get(day, slot).unwrap_or("Not planned");
            out.push_str(&format!("  {}: {}\n", slot.label(), recipe));
        }
        out.push('\n');
    }
    if let Some(items) = grocery {
        out.push_str("\nGROCERY LIST:\n=============\n");
        for item in items {
            out.push_str(&format!("- {} ({})\n", item.name, item.category.as_str()));
        }
    }
    out
}

/// Shopping checklist, one `□ name (quantity)` line per entry
pub fn grocery_list_text(items: &[GroceryItem], today: NaiveDate) -> String {
    let lines: Vec<String> = items
        .iter()
        .map(|item| format!("□ {} ({})", item.name, item.quantity))
        .collect();
    format!(
        "SMART PANTRY - GROCERY LIST\n{}\n{}\n\n{}",
        today.format(DATE_FORMAT),
        "=".repeat(32),
        lines.join("\n")
    )
}
