//! Smart Pantry
//!
//! Pantry inventory, weekly meal plan and grocery list state with the
//! derived views, alerts and notifications a browser front end renders.

pub mod config;
pub mod domain;
pub mod status;
pub mod storage;
pub mod stores;
pub mod views;
pub mod notifications;
pub mod state;
pub mod context;

pub use context::{provide_pantry_context, use_pantry_context, PantryContext};
pub use state::{Clock, FixedClock, PantryState, SystemClock};

/// Install the panic hook and the logger. Safe to call more than once.
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    if rolling_logger::init_logger("SmartPantry", config::LOG_BUFFER_LINES).is_err() {
        log::debug!("Logger already installed");
    }
}
