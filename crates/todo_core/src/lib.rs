//! Core domain logic for the to-do list.
//! This crate is the single source of truth for task invariants.

pub mod logging;
pub mod model;
pub mod reminder;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{EpochMillis, Task, TaskId, TaskValidationError};
pub use reminder::center::{system_now_millis, Clock, LocalNotificationCenter};
pub use reminder::scheduler::{ReminderRequest, ReminderScheduler, ReminderSound};
pub use service::task_service::{CompletionObserver, TaskService};
pub use store::task_store::{MemoryTaskStore, StoreError, StoreResult, TaskStore};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
