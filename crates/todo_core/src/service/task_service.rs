//! Task use-case service.
//!
//! # Responsibility
//! - Provide add/remove/toggle entry points for front-ends.
//! - Call the reminder scheduler after a task with a reminder time is added.
//! - Notify an optional observer after completion changes.
//!
//! # Invariants
//! - Service APIs never bypass store validation.
//! - Scheduling happens only after the store accepted the task.
//! - Log lines carry positions and flags only, never task text.

use crate::model::task::{EpochMillis, Task, TaskId};
use crate::reminder::scheduler::ReminderScheduler;
use crate::store::task_store::{StoreResult, TaskStore};
use log::{info, warn};

/// Receives completion changes so external views can refresh.
pub trait CompletionObserver {
    fn completion_changed(&self, id: TaskId, is_done: bool);
}

/// Use-case service wrapping a task store and a reminder scheduler.
pub struct TaskService<S: TaskStore, R: ReminderScheduler> {
    store: S,
    scheduler: R,
    observer: Option<Box<dyn CompletionObserver + Send>>,
}

impl<S: TaskStore, R: ReminderScheduler> TaskService<S, R> {
    pub fn new(store: S, scheduler: R) -> Self {
        Self {
            store,
            scheduler,
            observer: None,
        }
    }

    /// Registers the completion observer, replacing any previous one.
    pub fn set_observer(&mut self, observer: Box<dyn CompletionObserver + Send>) {
        self.observer = Some(observer);
    }

    /// Appends a task and schedules its reminder when a time is given.
    ///
    /// # Contract
    /// - Empty description returns `StoreError::InvalidInput`; nothing is
    ///   stored or scheduled.
    /// - Returns the new task position.
    pub fn add_task(
        &mut self,
        description: impl Into<String>,
        reminder_time: Option<EpochMillis>,
    ) -> StoreResult<TaskId> {
        let description = description.into();
        let id = match self.store.add(description.clone(), reminder_time) {
            Ok(id) => id,
            Err(err) => {
                warn!("event=task_add module=service status=rejected error={err}");
                return Err(err);
            }
        };

        if let Some(time) = reminder_time {
            self.scheduler.schedule(&description, time);
        }
        info!(
            "event=task_add module=service status=ok id={} has_reminder={} len={}",
            id,
            reminder_time.is_some(),
            self.store.len()
        );
        Ok(id)
    }

    /// Removes the task at `id` and returns it.
    ///
    /// Already scheduled reminders are left in place.
    pub fn remove_task(&mut self, id: TaskId) -> StoreResult<Task> {
        let removed = self.store.remove(id)?;
        info!(
            "event=task_remove module=service status=ok id={} len={}",
            id,
            self.store.len()
        );
        Ok(removed)
    }

    /// Flips completion of the task at `id` and returns the new value.
    pub fn toggle_task(&mut self, id: TaskId) -> StoreResult<bool> {
        let is_done = self.store.toggle(id)?;
        info!("event=task_toggle module=service status=ok id={id} is_done={is_done}");
        if let Some(observer) = &self.observer {
            observer.completion_changed(id, is_done);
        }
        Ok(is_done)
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.store.get(id)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns the scheduler, e.g. to poll due reminders.
    pub fn scheduler(&self) -> &R {
        &self.scheduler
    }
}
