//! Task store contract and in-memory implementation.
//!
//! # Responsibility
//! - Provide append/remove/toggle over an ordered task list.
//! - Report semantic errors (`InvalidInput`, `NotFound`) to callers.
//!
//! # Invariants
//! - Write paths call `Task::validate()` before mutating the list.
//! - Order is insertion order; removal shifts later positions down by one.
//! - A failed operation leaves the list unchanged.

use crate::model::task::{EpochMillis, Task, TaskId, TaskValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store error for task list mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    InvalidInput(TaskValidationError),
    NotFound { id: TaskId, len: usize },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(err) => write!(f, "invalid task input: {err}"),
            Self::NotFound { id, len } => {
                write!(f, "task not found at position {id} (list has {len} task(s))")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            Self::NotFound { .. } => None,
        }
    }
}

impl From<TaskValidationError> for StoreError {
    fn from(value: TaskValidationError) -> Self {
        Self::InvalidInput(value)
    }
}

/// Store interface for positional task mutations.
pub trait TaskStore {
    fn add(
        &mut self,
        description: String,
        reminder_time: Option<EpochMillis>,
    ) -> StoreResult<TaskId>;
    fn remove(&mut self, id: TaskId) -> StoreResult<Task>;
    fn toggle(&mut self, id: TaskId) -> StoreResult<bool>;
    fn get(&self, id: TaskId) -> Option<&Task>;
    fn tasks(&self) -> &[Task];

    fn len(&self) -> usize {
        self.tasks().len()
    }

    fn is_empty(&self) -> bool {
        self.tasks().is_empty()
    }
}

/// `Vec`-backed task store owned by one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryTaskStore {
    tasks: Vec<Task>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn not_found(&self, id: TaskId) -> StoreError {
        StoreError::NotFound {
            id,
            len: self.tasks.len(),
        }
    }
}

impl TaskStore for MemoryTaskStore {
    fn add(
        &mut self,
        description: String,
        reminder_time: Option<EpochMillis>,
    ) -> StoreResult<TaskId> {
        let task = Task::new(description, reminder_time)?;
        self.tasks.push(task);
        Ok(self.tasks.len() - 1)
    }

    fn remove(&mut self, id: TaskId) -> StoreResult<Task> {
        if id >= self.tasks.len() {
            return Err(self.not_found(id));
        }
        Ok(self.tasks.remove(id))
    }

    fn toggle(&mut self, id: TaskId) -> StoreResult<bool> {
        let len = self.tasks.len();
        match self.tasks.get_mut(id) {
            Some(task) => Ok(task.toggle()),
            None => Err(StoreError::NotFound { id, len }),
        }
    }

    fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    fn tasks(&self) -> &[Task] {
        &self.tasks
    }
}
