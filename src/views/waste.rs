//! Food Waste Statistics
//!
//! Aggregates over the waste log for a trailing window, plus the current
//! at-risk counts from the pantry.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::domain::{Category, PantryItem, WasteEntry, WasteReason};
use crate::status::{classify, FreshnessStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WastePeriod {
    Week,
    #[default]
    Month,
    Year,
}

impl WastePeriod {
    pub fn days(&self) -> i64 {
        match self {
            WastePeriod::Week => 7,
            WastePeriod::Month => 30,
            WastePeriod::Year => 365,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WasteStats {
    pub period: WastePeriod,
    pub total_items: usize,
    pub total_value: f64,
    /// Most wasted first; ties keep log order
    pub category_breakdown: Vec<(Category, usize)>,
    pub reason_breakdown: Vec<(WasteReason, usize)>,
    pub currently_expired: usize,
    pub currently_expiring: usize,
    pub average_per_week: f64,
}

pub fn waste_stats(
    log: &[WasteEntry],
    period: WastePeriod,
    pantry: &[PantryItem],
    now: DateTime<Utc>,
) -> WasteStats {
    let cutoff = now - Duration::days(period.days());
    let in_period: Vec<&WasteEntry> = log.iter().filter(|entry| entry.date_wasted >= cutoff).collect();

    let mut category_breakdown = tally(in_period.iter().map(|entry| entry.category.clone()));
    category_breakdown.sort_by(|a, b| b.1.cmp(&a.1));
    let reason_breakdown = tally(in_period.iter().map(|entry| entry.reason.clone()));

    let mut currently_expired = 0;
    let mut currently_expiring = 0;
    for item in pantry {
        match classify(item.expiry, now) {
            FreshnessStatus::Expired => currently_expired += 1,
            FreshnessStatus::Expiring => currently_expiring += 1,
            FreshnessStatus::Fresh => {}
        }
    }

    let total_items = in_period.len();
    WasteStats {
        period,
        total_items,
        total_value: in_period.iter().map(|entry| entry.estimated_value.max(0.0)).sum(),
        category_breakdown,
        reason_breakdown,
        currently_expired,
        currently_expiring,
        average_per_week: total_items as f64 / (period.days() as f64 / 7.0),
    }
}

fn tally<K: PartialEq>(keys: impl Iterator<Item = K>) -> Vec<(K, usize)> {
    let mut counts: Vec<(K, usize)> = Vec::new();
    for key in keys {
        match counts.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, count)) => *count += 1,
            None => counts.push((key, 1)),
        }
    }
    counts
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationLevel {
    Urgent,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WasteRecommendation {
    pub level: RecommendationLevel,
    pub message: String,
    pub action: String,
}

pub fn waste_recommendations(stats: &WasteStats) -> Vec<WasteRecommendation> {
    let mut recommendations = Vec::new();

    if stats.currently_expired > 0 {
        recommendations.push(WasteRecommendation {
            level: RecommendationLevel::Urgent,
            message: format!(
                "You have {} expired items. Remove them to prevent contamination.",
                stats.currently_expired
            ),
            action: "Remove expired items".to_string(),
        });
    }
    if stats.currently_expiring > 3 {
        recommendations.push(WasteRecommendation {
            level: RecommendationLevel::Warning,
            message: format!(
                "{} items are expiring soon. Plan meals to use them first.",
                stats.currently_expiring
            ),
            action: "Plan meals with expiring items".to_string(),
        });
    }
    if stats.average_per_week > 5.0 {
        recommendations.push(WasteRecommendation {
            level: RecommendationLevel::Info,
            message: "You're wasting more than 5 items per week. Consider buying smaller quantities."
                .to_string(),
            action: "Adjust shopping habits".to_string(),
        });
    }
    if let Some((category, count)) = stats.category_breakdown.first() {
        if *count > 3 {
            recommendations.push(WasteRecommendation {
                level: RecommendationLevel::Info,
                message: format!(
                    "Most waste comes from {}. Focus on better storage and planning for this category.",
                    category.as_str()
                ),
                action: format!("Improve {} management", category.as_str()),
            });
        }
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap()
    }

    fn entry(id: u64, category: Category, reason: WasteReason, days_ago: i64, value: f64) -> WasteEntry {
        WasteEntry {
            id,
            name: format!("Item {}", id),
            category,
            reason,
            estimated_value: value,
            date_wasted: now() - Duration::days(days_ago),
            original_expiry: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        }
    }

    #[test]
    fn test_empty_log() {
        let stats = waste_stats(&[], WastePeriod::Week, &[], now());
        assert_eq!(stats.total_items, 0);
        assert_eq!(stats.average_per_week, 0.0);
        assert!(waste_recommendations(&stats).is_empty());
    }

    #[test]
    fn test_window_and_breakdowns() {
        let log = vec![
            entry(1, Category::Dairy, WasteReason::Expired, 1, 2.5),
            entry(2, Category::Vegetables, WasteReason::Spoiled, 3, 1.0),
            entry(3, Category::Vegetables, WasteReason::Expired, 20, 4.0),
            entry(4, Category::Meat, WasteReason::Leftover, 100, 9.0),
        ];
        let week = waste_stats(&log, WastePeriod::Week, &[], now());
        assert_eq!(week.total_items, 2);
        assert!((week.total_value - 3.5).abs() < 1e-9);
        assert_eq!(week.average_per_week, 2.0);

        let month = waste_stats(&log, WastePeriod::Month, &[], now());
        assert_eq!(month.total_items, 3);
        assert_eq!(month.category_breakdown[0], (Category::Vegetables, 2));
        assert_eq!(month.reason_breakdown[0], (WasteReason::Expired, 2));
        assert!((month.average_per_week - 0.7).abs() < 1e-9);

        assert_eq!(waste_stats(&log, WastePeriod::Year, &[], now()).total_items, 4);
    }

    #[test]
    fn test_recommendations() {
        let log: Vec<_> = (1..=6)
            .map(|id| entry(id, Category::Fruits, WasteReason::Spoiled, 1, 0.0))
            .collect();
        let today = now().date_naive();
        let mut pantry = vec![PantryItem::new(
            100,
            "Old".into(),
            Category::Other,
            "1".into(),
            today - Duration::days(2),
        )];
        for id in 0..4 {
            pantry.push(PantryItem::new(
                id,
                format!("Soon {}", id),
                Category::Other,
                "1".into(),
                today + Duration::days(2),
            ));
        }

        let stats = waste_stats(&log, WastePeriod::Week, &pantry, now());
        let levels: Vec<_> = waste_recommendations(&stats).iter().map(|r| r.level).collect();
        assert_eq!(
            levels,
            vec![
                RecommendationLevel::Urgent,
                RecommendationLevel::Warning,
                RecommendationLevel::Info,
                RecommendationLevel::Info,
            ]
        );
        let recommendations = waste_recommendations(&stats);
        assert_eq!(recommendations[3].action, "Improve fruits management");
    }
}
