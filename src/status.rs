//! Status Classifier
//!
//! Maps an expiry date to a freshness category relative to an injected `now`.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{EXPIRING_WINDOW_DAYS, LOW_STOCK_THRESHOLD};
use crate::domain::quantity_value;

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Freshness of a pantry item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FreshnessStatus {
    Expired,
    Expiring,
    Fresh,
}

impl FreshnessStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FreshnessStatus::Expired => "expired",
            FreshnessStatus::Expiring => "expiring",
            FreshnessStatus::Fresh => "fresh",
        }
    }
}

/// Whole days from `now` until the start (UTC midnight) of `expiry`,
/// rounded up: anything later today counts as 0, yesterday as -1.
pub fn days_until(expiry: NaiveDate, now: DateTime<Utc>) -> i64 {
    let expiry_start = expiry.and_time(NaiveTime::MIN).and_utc();
    let diff_ms = (expiry_start - now).num_milliseconds();
    let days = diff_ms.div_euclid(MS_PER_DAY);
    if diff_ms.rem_euclid(MS_PER_DAY) != 0 {
        days + 1
    } else {
        days
    }
}

/// Policy on a day difference: < 0 expired, 0..=3 expiring, otherwise fresh
pub fn status_for_days(days: i64) -> FreshnessStatus {
    if days < 0 {
        FreshnessStatus::Expired
    } else if days <= EXPIRING_WINDOW_DAYS {
        FreshnessStatus::Expiring
    } else {
        FreshnessStatus::Fresh
    }
}

pub fn classify(expiry: NaiveDate, now: DateTime<Utc>) -> FreshnessStatus {
    status_for_days(days_until(expiry, now))
}

/// Low stock: the quantity's numeric prefix is at most the threshold.
/// Quantities without a number are never low.
pub fn is_low_stock(quantity: &str) -> bool {
    quantity_value(quantity).is_some_and(|n| n <= LOW_STOCK_THRESHOLD)
}
