//! Pantry Alert Scheduler
//!
//! Turns the dashboard counts into the alerts the user opted into, and
//! keeps a once-per-day metrics history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::{Settings, METRICS_HISTORY_LIMIT};
use crate::views::DashboardStats;

use super::types::{NotificationKind, NotificationRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Expiring,
    LowStock,
    Digest,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlertMessage {
    pub kind: AlertKind,
    pub text: String,
}

impl AlertMessage {
    /// Title used for the browser's native notification
    pub const NATIVE_TITLE: &'static str = "Smart Pantry";

    /// The digest is always shown in-app, even when also sent natively
    pub fn always_in_app(&self) -> bool {
        self.kind == AlertKind::Digest
    }

    /// In-app fallback when native notifications are unavailable
    pub fn to_request(&self) -> NotificationRequest {
        let kind = match self.kind {
            AlertKind::Expiring => NotificationKind::Warning,
            AlertKind::LowStock | AlertKind::Digest => NotificationKind::Info,
        };
        NotificationRequest::new(kind, self.text.clone())
    }
}

/// Alerts due for `stats` under `settings`. The digest goes out at most once
/// per calendar day: it is included only when `last_digest` is not `today`.
pub fn check_alerts(
    settings: &Settings,
    stats: &DashboardStats,
    last_digest: Option<NaiveDate>,
    today: NaiveDate,
) -> Vec<AlertMessage> {
    let mut alerts = Vec::new();
    if settings.expiry_alerts && stats.expiring > 0 {
        alerts.push(AlertMessage {
            kind: AlertKind::Expiring,
            text: format!("{} item(s) expiring soon", stats.expiring),
        });
    }
    if settings.low_stock_alerts && stats.low_stock > 0 {
        alerts.push(AlertMessage {
            kind: AlertKind::LowStock,
            text: format!("{} item(s) low on stock", stats.low_stock),
        });
    }
    if settings.daily_digest && last_digest != Some(today) {
        alerts.push(AlertMessage {
            kind: AlertKind::Digest,
            text: format!(
                "Daily Digest: {} expiring, {} low stock, {} expired",
                stats.expiring, stats.low_stock, stats.expired
            ),
        });
    }
    alerts
}

/// One day's snapshot under `sp_metrics_history`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsEntry {
    pub date: NaiveDate,
    pub totals: DashboardStats,
}

/// Append today's totals unless the last entry is already today's; keeps
/// the most recent entries only. Returns whether the history changed.
pub fn record_metrics(history: &mut Vec<MetricsEntry>, today: NaiveDate, stats: DashboardStats) -> bool {
    if history.last().is_some_and(|entry| entry.date == today) {
        return false;
    }
    history.push(MetricsEntry { date: today, totals: stats });
    if history.len() > METRICS_HISTORY_LIMIT {
        let excess = history.len() - METRICS_HISTORY_LIMIT;
        history.drain(..excess);
    }
    true
}
