//! Notification Stack
//!
//! Notifications live in one bucket per screen corner; insertion order is
//! display order, and a notification's offset is its index in the bucket.
//! Each one has its own countdown in a shared [`TimerQueue`], so removing
//! one never touches a sibling's timer.
//!
//! `visible -> (paused) -> exiting -> removed`. An exiting notification
//! keeps its slot for the exit animation, then leaves its bucket and the
//! ones behind it move up.

use std::collections::BTreeMap;

use crate::config::EXIT_ANIMATION_MS;
use crate::domain::{DomainError, DomainResult};

use super::timers::TimerQueue;
use super::types::{Notification, NotificationId, NotificationRequest, Phase, Position};

/// Transitions produced by [`NotificationStack::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackEvent {
    Exiting(NotificationId),
    Removed(NotificationId),
}

#[derive(Debug, Default)]
pub struct NotificationStack {
    next_id: NotificationId,
    entries: BTreeMap<NotificationId, Notification>,
    buckets: BTreeMap<Position, Vec<NotificationId>>,
    timers: TimerQueue<NotificationId>,
}

impl NotificationStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register and show a notification at the end of its bucket
    pub fn push(&mut self, request: NotificationRequest, now: u64) -> NotificationId {
        self.next_id += 1;
        let id = self.next_id;
        let deadline = (request.duration_ms > 0).then(|| now.saturating_add(request.duration_ms));
        if let Some(at) = deadline {
            self.timers.schedule(id, at);
        }
        self.buckets.entry(request.position).or_default().push(id);
        self.entries.insert(
            id,
            Notification {
                id,
                kind: request.kind,
                title: request.title,
                message: request.message,
                duration_ms: request.duration_ms,
                position: request.position,
                dismissible: request.dismissible,
                phase: Phase::Visible { deadline },
            },
        );
        log::debug!("Notification {} shown", id);
        id
    }

    /// Start the exit of a dismissible notification.
    /// Dismissing one that is already exiting changes nothing.
    pub fn dismiss(&mut self, id: NotificationId, now: u64) -> DomainResult<()> {
        let entry = self.entries.get(&id).ok_or_else(|| not_found(id))?;
        if !entry.dismissible {
            return Err(DomainError::InvalidInput(format!("notification {} cannot be dismissed", id)));
        }
        if entry.is_exiting() {
            return Ok(());
        }
        self.begin_exit(id, now);
        Ok(())
    }

    /// Hover entered: freeze the countdown
    pub fn pause(&mut self, id: NotificationId, now: u64) -> DomainResult<()> {
        let entry = self.entries.get_mut(&id).ok_or_else(|| not_found(id))?;
        if let Phase::Visible { deadline: Some(deadline) } = entry.phase {
            entry.phase = Phase::Paused {
                remaining: deadline.saturating_sub(now),
            };
            self.timers.cancel(id);
        }
        Ok(())
    }

    /// Hover left: continue the countdown from where it was paused
    pub fn resume(&mut self, id: NotificationId, now: u64) -> DomainResult<()> {
        let entry = self.entries.get_mut(&id).ok_or_else(|| not_found(id))?;
        if let Phase::Paused { remaining } = entry.phase {
            let deadline = now.saturating_add(remaining);
            entry.phase = Phase::Visible { deadline: Some(deadline) };
            self.timers.schedule(id, deadline);
        }
        Ok(())
    }

    /// Fire every timer due at `now`, in deadline order
    pub fn advance(&mut self, now: u64) -> Vec<StackEvent> {
        let mut events = Vec::new();
        // An exit scheduled here may itself be due already
        loop {
            let due = self.timers.due(now);
            if due.is_empty() {
                break;
            }
            for (id, at) in due {
                let Some(phase) = self.entries.get(&id).map(|entry| entry.phase) else {
                    continue;
                };
                match phase {
                    Phase::Visible { .. } => {
                        self.begin_exit(id, at);
                        events.push(StackEvent::Exiting(id));
                    }
                    Phase::Exiting { .. } => {
                        self.unregister(id);
                        events.push(StackEvent::Removed(id));
                    }
                    Phase::Paused { .. } => {}
                }
            }
        }
        events
    }

    /// Unregister immediately, skipping the exit animation
    pub fn remove(&mut self, id: NotificationId) -> Option<Notification> {
        self.timers.cancel(id);
        self.unregister(id)
    }

    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.entries.get(&id)
    }

    /// Stacking slot within the notification's bucket
    pub fn offset(&self, id: NotificationId) -> Option<usize> {
        let position = self.entries.get(&id)?.position;
        self.buckets.get(&position)?.iter().position(|other| *other == id)
    }

    /// Notifications of one corner in display order
    pub fn bucket(&self, position: Position) -> Vec<&Notification> {
        self.buckets
            .get(&position)
            .map(|ids| ids.iter().filter_map(|id| self.entries.get(id)).collect())
            .unwrap_or_default()
    }

    /// When the host should call [`advance`](Self::advance) next
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop everything, e.g. when the owning view unmounts
    pub fn clear(&mut self) {
        self.timers.clear();
        self.entries.clear();
        self.buckets.clear();
    }

    fn begin_exit(&mut self, id: NotificationId, at: u64) {
        let removes_at = at.saturating_add(EXIT_ANIMATION_MS);
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.phase = Phase::Exiting { removes_at };
            self.timers.schedule(id, removes_at);
        }
    }

    fn unregister(&mut self, id: NotificationId) -> Option<Notification> {
        let entry = self.entries.remove(&id)?;
        if let Some(ids) = self.buckets.get_mut(&entry.position) {
            ids.retain(|other| *other != id);
            if ids.is_empty() {
                self.buckets.remove(&entry.position);
            }
        }
        log::debug!("Notification {} removed", id);
        Some(entry)
    }
}

fn not_found(id: NotificationId) -> DomainError {
    DomainError::NotFound(format!("notification {}", id))
}
