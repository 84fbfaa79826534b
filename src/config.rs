//! Configuration
//!
//! Fixed policy constants and the user-toggled settings record.

use serde::{Deserialize, Serialize};

/// Items expiring within this many days (inclusive) are "expiring"
pub const EXPIRING_WINDOW_DAYS: i64 = 3;
/// Numeric quantity at or below which an item is low on stock
pub const LOW_STOCK_THRESHOLD: i64 = 2;
/// Alerts shown on the dashboard
pub const ALERT_DISPLAY_LIMIT: usize = 3;
/// Daily metrics entries kept in history
pub const METRICS_HISTORY_LIMIT: usize = 30;
/// Shopping suggestions offered at once
pub const SUGGESTION_LIMIT: usize = 12;
/// Expiry given to groceries moved into the pantry
pub const DEFAULT_SHELF_LIFE_DAYS: i64 = 7;

/// Lifetime of a notification when the caller gives none
pub const DEFAULT_NOTIFICATION_MS: u64 = 3000;
/// Time an exiting notification keeps its slot for the exit animation
pub const EXIT_ANIMATION_MS: u64 = 300;

/// Log lines kept by the rolling logger
pub const LOG_BUFFER_LINES: usize = 500;

/// Alert toggles persisted under `smartPantrySettings`.
/// Keys are the display names; missing keys mean disabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(rename = "Expiry Alerts")]
    pub expiry_alerts: bool,
    #[serde(rename = "Low Stock Alerts")]
    pub low_stock_alerts: bool,
    #[serde(rename = "Daily Digest")]
    pub daily_digest: bool,
}

/// A single toggle in [`Settings`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    ExpiryAlerts,
    LowStockAlerts,
    DailyDigest,
}

impl Setting {
    pub fn label(&self) -> &'static str {
        match self {
            Setting::ExpiryAlerts => "Expiry Alerts",
            Setting::LowStockAlerts => "Low Stock Alerts",
            Setting::DailyDigest => "Daily Digest",
        }
    }
}

impl Settings {
    pub fn get(&self, setting: Setting) -> bool {
        match setting {
            Setting::ExpiryAlerts => self.expiry_alerts,
            Setting::LowStockAlerts => self.low_stock_alerts,
            Setting::DailyDigest => self.daily_digest,
        }
    }

    /// Flip one toggle and return its new value
    pub fn toggle(&mut self, setting: Setting) -> bool {
        let flag = match setting {
            Setting::ExpiryAlerts => &mut self.expiry_alerts,
            Setting::LowStockAlerts => &mut self.low_stock_alerts,
            Setting::DailyDigest => &mut self.daily_digest,
        };
        *flag = !*flag;
        *flag
    }
}
