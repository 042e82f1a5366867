//! Reminder scheduling contract and request shape.
//!
//! # Responsibility
//! - Define the fire-and-forget scheduling seam used by the task service.
//! - Build notification requests from task description + time.
//!
//! # Invariants
//! - `schedule` returns nothing; outcomes never flow back to callers.
//! - Request fire times are truncated to the whole minute.

use crate::model::task::EpochMillis;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// Title used for every reminder notification.
pub const REMINDER_TITLE: &str = "Reminder";

const MILLIS_PER_MINUTE: EpochMillis = 60_000;

/// Sound played when a reminder fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderSound {
    Default,
}

/// One-shot notification request handed to a notification center.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderRequest {
    /// Fresh identifier per request; never reused.
    pub id: Uuid,
    pub title: String,
    /// Task description.
    pub body: String,
    /// Epoch milliseconds at minute precision.
    pub fire_at: EpochMillis,
    pub sound: ReminderSound,
}

impl ReminderRequest {
    /// Builds a request for `description` firing at the minute containing `time`.
    pub fn new(description: impl Into<String>, time: EpochMillis) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: REMINDER_TITLE.to_string(),
            body: description.into(),
            fire_at: truncate_to_minute(time),
            sound: ReminderSound::Default,
        }
    }

    pub fn is_due(&self, now: EpochMillis) -> bool {
        self.fire_at <= now
    }
}

/// Floors epoch milliseconds to the start of their minute.
///
/// Uses Euclidean remainder so pre-epoch values floor toward negative infinity.
pub fn truncate_to_minute(time: EpochMillis) -> EpochMillis {
    time - time.rem_euclid(MILLIS_PER_MINUTE)
}

/// Registers one-shot local reminders.
///
/// Implementations must not panic and must not report failures to the
/// caller; a failed registration is logged and dropped.
pub trait ReminderScheduler {
    fn schedule(&self, description: &str, time: EpochMillis);
}

impl<T: ReminderScheduler + ?Sized> ReminderScheduler for Arc<T> {
    fn schedule(&self, description: &str, time: EpochMillis) {
        (**self).schedule(description, time);
    }
}

impl<T: ReminderScheduler + ?Sized> ReminderScheduler for &T {
    fn schedule(&self, description: &str, time: EpochMillis) {
        (**self).schedule(description, time);
    }
}
