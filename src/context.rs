//! Pantry Context
//!
//! Shared state provided via Leptos Context API. The state and the
//! notification stack are owned by this thread (the clock and storage
//! handles are not `Send`), so both live in local signals.

use leptos::prelude::*;

use crate::config::ALERT_DISPLAY_LIMIT;
use crate::notifications::{AlertMessage, NotificationId, NotificationRequest, NotificationStack, StackEvent};
use crate::state::PantryState;
use crate::storage::{MemoryStorage, PersistenceGateway};
use crate::views::{Analytics, DashboardStats};

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct PantryContext {
    /// The whole pantry state - mutate through [`PantryContext::update`]
    pub state: RwSignal<PantryState, LocalStorage>,
    /// In-app notifications
    pub notifications: RwSignal<NotificationStack, LocalStorage>,
    pub stats: Memo<DashboardStats>,
    /// Dashboard alerts, first few only
    pub alerts: Memo<Vec<String>>,
    pub analytics: Memo<Analytics>,
}

impl PantryContext {
    pub fn new(state: PantryState) -> Self {
        let state = RwSignal::new_local(state);
        Self {
            state,
            notifications: RwSignal::new_local(NotificationStack::new()),
            stats: Memo::new(move |_| state.with(|s| s.dashboard_stats())),
            alerts: Memo::new(move |_| {
                state.with(|s| s.alerts().into_iter().take(ALERT_DISPLAY_LIMIT).collect())
            }),
            analytics: Memo::new(move |_| state.with(|s| s.analytics())),
        }
    }

    /// Run a mutation and notify subscribers; `None` if the state is gone
    pub fn update<R>(&self, mutate: impl FnOnce(&mut PantryState) -> R) -> Option<R> {
        self.state.try_update(mutate)
    }

    /// Show an in-app notification
    pub fn notify(&self, request: NotificationRequest) -> Option<NotificationId> {
        let id = self.notifications.try_update(|stack| stack.push(request, now_ms()))?;
        self.schedule_tick();
        Some(id)
    }

    pub fn dismiss(&self, id: NotificationId) {
        let result = self.notifications.try_update(|stack| stack.dismiss(id, now_ms()));
        if let Some(Err(e)) = result {
            log::debug!("Dismiss ignored: {}", e);
        }
        self.schedule_tick();
    }

    pub fn pause(&self, id: NotificationId) {
        let result = self.notifications.try_update(|stack| stack.pause(id, now_ms()));
        if let Some(Err(e)) = result {
            log::debug!("Pause ignored: {}", e);
        }
    }

    pub fn resume(&self, id: NotificationId) {
        let result = self.notifications.try_update(|stack| stack.resume(id, now_ms()));
        if let Some(Err(e)) = result {
            log::debug!("Resume ignored: {}", e);
        }
        self.schedule_tick();
    }

    /// Recent log lines for the diagnostics view, oldest first
    pub fn log_lines(&self) -> Vec<String> {
        rolling_logger::recent_lines()
    }

    /// Fire due notification timers
    pub fn tick(&self) -> Vec<StackEvent> {
        let events = self
            .notifications
            .try_update(|stack| stack.advance(now_ms()))
            .unwrap_or_default();
        if !events.is_empty() {
            self.schedule_tick();
        }
        events
    }

    /// Run the alert checks and deliver whatever is due
    pub fn check_alerts(&self) {
        let alerts = self.update(|s| s.run_alert_checks()).unwrap_or_default();
        for alert in alerts {
            self.deliver(&alert);
        }
    }

    fn deliver(&self, alert: &AlertMessage) {
        let sent_natively = send_native(alert);
        if !sent_natively || alert.always_in_app() {
            self.notify(alert.to_request());
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn schedule_tick(&self) {
        use gloo_timers::future::TimeoutFuture;
        use leptos::task::spawn_local;

        let Some(deadline) = self.notifications.with_untracked(|stack| stack.next_deadline()) else {
            return;
        };
        let delay = deadline.saturating_sub(now_ms()).min(u32::MAX as u64) as u32;
        let ctx = *self;
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            ctx.tick();
        });
    }

    /// Natively the host drives [`tick`](Self::tick) itself
    #[cfg(not(target_arch = "wasm32"))]
    fn schedule_tick(&self) {}
}

/// Load the state from the best available storage and provide it
pub fn provide_pantry_context() -> PantryContext {
    let ctx = PantryContext::new(PantryState::load(open_gateway()));
    provide_context(ctx);
    ctx.check_alerts();
    ctx
}

/// Get the pantry context
pub fn use_pantry_context() -> PantryContext {
    expect_context::<PantryContext>()
}

#[cfg(target_arch = "wasm32")]
fn open_gateway() -> PersistenceGateway {
    match crate::storage::BrowserStorage::open() {
        Ok(storage) => PersistenceGateway::new(storage),
        Err(e) => {
            log::warn!("localStorage unavailable, data will not persist: {}", e);
            PersistenceGateway::new(MemoryStorage::new())
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn open_gateway() -> PersistenceGateway {
    PersistenceGateway::new(MemoryStorage::new())
}

#[cfg(target_arch = "wasm32")]
fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_ms() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}

// ========================
// Browser notifications
// ========================

/// Ask for native notification permission (no-op outside the browser)
pub fn request_notification_permission() {
    #[cfg(target_arch = "wasm32")]
    if let Err(e) = web_sys::Notification::request_permission() {
        log::warn!("Notification permission request failed: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn send_native(alert: &AlertMessage) -> bool {
    use web_sys::{Notification, NotificationOptions, NotificationPermission};

    if Notification::permission() != NotificationPermission::Granted {
        return false;
    }
    let options = NotificationOptions::new();
    options.set_body(&alert.text);
    match Notification::new_with_options(AlertMessage::NATIVE_TITLE, &options) {
        Ok(_) => true,
        Err(e) => {
            log::warn!("Native notification failed: {:?}", e);
            false
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn send_native(_alert: &AlertMessage) -> bool {
    false
}
