//! Reminder scheduling.
//!
//! # Responsibility
//! - Define the scheduler seam between task use-cases and notifications.
//! - Provide an in-process notification center for front-ends to poll.

pub mod center;
pub mod scheduler;
