//! Dashboard and Analytics Views

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Category, GroceryItem, MealPlan, MealSlot, PantryItem, Weekday};
use crate::status::{classify, is_low_stock, FreshnessStatus};

/// Headline counts for the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total: usize,
    pub expiring: usize,
    pub expired: usize,
    pub low_stock: usize,
}

pub fn dashboard_stats(items: &[PantryItem], now: DateTime<Utc>) -> DashboardStats {
    let mut stats = DashboardStats {
        total: items.len(),
        ..Default::default()
    };
    for item in items {
        match classify(item.expiry, now) {
            FreshnessStatus::Expired => stats.expired += 1,
            FreshnessStatus::Expiring => stats.expiring += 1,
            FreshnessStatus::Fresh => {}
        }
        if is_low_stock(&item.quantity) {
            stats.low_stock += 1;
        }
    }
    stats
}

/// One message per (item, condition), items in store order and
/// conditions in the order expired/expiring, then low stock.
/// Truncation for display is up to the view.
pub fn alerts(items: &[PantryItem], now: DateTime<Utc>) -> Vec<String> {
    let mut alerts = Vec::new();
    for item in items {
        match classify(item.expiry, now) {
            FreshnessStatus::Expired => alerts.push(format!("{} has expired!", item.name)),
            FreshnessStatus::Expiring => alerts.push(format!("{} expires soon", item.name)),
            FreshnessStatus::Fresh => {}
        }
        if is_low_stock(&item.quantity) {
            alerts.push(format!("{} is running low", item.name));
        }
    }
    alerts
}

/// `count / total` as a percentage, 0 when the total is 0
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: Category,
    pub count: usize,
    pub percentage: f64,
}

/// Item count per category, in order of first appearance
pub fn category_breakdown(items: &[PantryItem]) -> Vec<CategoryShare> {
    let mut shares: Vec<CategoryShare> = Vec::new();
    for item in items {
        match shares.iter_mut().find(|share| share.category == item.category) {
            Some(share) => share.count += 1,
            None => shares.push(CategoryShare {
                category: item.category.clone(),
                count: 1,
                percentage: 0.0,
            }),
        }
    }
    for share in &mut shares {
        share.percentage = percentage(share.count, items.len());
    }
    shares
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExpiryBreakdown {
    pub expired: usize,
    pub expiring: usize,
    pub fresh: usize,
}

/// Numbers behind the analytics page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub total_items: usize,
    pub grocery_items: usize,
    pub expiry: ExpiryBreakdown,
    pub categories: Vec<CategoryShare>,
    pub most_added_category: Option<Category>,
    pub average_items_per_category: f64,
    pub planned_meals: usize,
    pub days_with_plans: usize,
    /// Share of the week's days that have at least one meal planned
    pub completion_rate: f64,
}

pub fn analytics(
    items: &[PantryItem],
    grocery: &[GroceryItem],
    plan: &MealPlan,
    now: DateTime<Utc>,
) -> Analytics {
    let mut expiry = ExpiryBreakdown::default();
    for item in items {
        match classify(item.expiry, now) {
            FreshnessStatus::Expired => expiry.expired += 1,
            FreshnessStatus::Expiring => expiry.expiring += 1,
            FreshnessStatus::Fresh => expiry.fresh += 1,
        }
    }

    let categories = category_breakdown(items);
    // Ties go to the category seen first
    let mut most_added: Option<&CategoryShare> = None;
    for share in &categories {
        if most_added.map_or(true, |best| share.count > best.count) {
            most_added = Some(share);
        }
    }
    let average_items_per_category = if categories.is_empty() {
        0.0
    } else {
        items.len() as f64 / categories.len() as f64
    };

    Analytics {
        total_items: items.len(),
        grocery_items: grocery.len(),
        expiry,
        most_added_category: most_added.map(|share| share.category.clone()),
        average_items_per_category,
        planned_meals: plan.planned_meals(),
        days_with_plans: plan.days_with_plans(),
        completion_rate: percentage(plan.days_with_plans(), Weekday::ALL.len()),
        categories,
    }
}

/// Today's three slots for the dashboard preview
pub fn todays_meals(plan: &MealPlan, now: DateTime<Utc>) -> Vec<(MealSlot, Option<&str>)> {
    let today = Weekday::from(now.weekday());
    MealSlot::ALL
        .into_iter()
        .map(|slot| (slot, plan.get(today, slot)))
        .collect()
}
