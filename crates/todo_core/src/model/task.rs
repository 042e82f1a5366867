//! Task domain model.
//!
//! # Responsibility
//! - Define the record held by the in-memory task list.
//! - Validate construction and deserialization through one path.
//!
//! # Invariants
//! - `description` is never the empty string.
//! - `is_done` starts as `false` and is independent from `reminder_time`.
//! - Identity is positional; duplicates are allowed.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Positional identifier of a task inside its list.
///
/// Positions shift down by one for every task removed before them.
pub type TaskId = usize;

/// Unix epoch milliseconds.
pub type EpochMillis = i64;

/// Validation errors for task invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Description is the empty string.
    EmptyDescription,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "task description must not be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// One to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskRecord")]
pub struct Task {
    /// User-entered text shown in the list and used as reminder body.
    pub description: String,
    /// Optional reminder time in epoch milliseconds.
    pub reminder_time: Option<EpochMillis>,
    /// Completion flag flipped by toggle.
    pub is_done: bool,
}

/// Unvalidated wire shape used by `Deserialize`.
#[derive(Deserialize)]
struct TaskRecord {
    description: String,
    #[serde(default)]
    reminder_time: Option<EpochMillis>,
    #[serde(default)]
    is_done: bool,
}

impl TryFrom<TaskRecord> for Task {
    type Error = TaskValidationError;

    fn try_from(value: TaskRecord) -> Result<Self, Self::Error> {
        let task = Self {
            description: value.description,
            reminder_time: value.reminder_time,
            is_done: value.is_done,
        };
        task.validate()?;
        Ok(task)
    }
}

impl Task {
    /// Creates an open task.
    ///
    /// # Errors
    /// - `EmptyDescription` when `description` is `""`.
    pub fn new(
        description: impl Into<String>,
        reminder_time: Option<EpochMillis>,
    ) -> Result<Self, TaskValidationError> {
        let task = Self {
            description: description.into(),
            reminder_time,
            is_done: false,
        };
        task.validate()?;
        Ok(task)
    }

    /// Checks model invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.description.is_empty() {
            return Err(TaskValidationError::EmptyDescription);
        }
        Ok(())
    }

    /// Flips completion and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.is_done = !self.is_done;
        self.is_done
    }
}
