//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose task list and reminder use-cases to Dart via FRB.
//! - Own the single in-memory session for the host process.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Task positions are zero-based and refer to the current list.
//! - The session lives until process exit; nothing is persisted.

use log::warn;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use todo_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    CompletionObserver, LocalNotificationCenter, MemoryTaskStore, ReminderRequest, StoreError,
    Task, TaskId, TaskService,
};

type Session = TaskService<MemoryTaskStore, Arc<LocalNotificationCenter>>;

static SESSION: OnceLock<Mutex<Session>> = OnceLock::new();
static NOTIFICATION_CENTER: OnceLock<Arc<LocalNotificationCenter>> = OnceLock::new();
static COMPLETION_REVISION: AtomicU64 = AtomicU64::new(0);

/// Bumps the completion revision so host widgets know to reload.
struct RevisionObserver;

impl CompletionObserver for RevisionObserver {
    fn completion_changed(&self, _id: TaskId, _is_done: bool) {
        COMPLETION_REVISION.fetch_add(1, Ordering::SeqCst);
    }
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Task row for list rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    /// Zero-based position in the current list.
    pub index: u32,
    pub description: String,
    /// Reminder time in epoch milliseconds.
    pub reminder_epoch_ms: Option<i64>,
    pub is_done: bool,
}

/// Reminder handed to the host notification layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderItem {
    pub id: String,
    pub title: String,
    pub body: String,
    /// Minute-precision fire time in epoch milliseconds.
    pub fire_at_epoch_ms: i64,
}

/// Action response envelope for task mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Position affected by the operation, when it succeeded.
    pub index: Option<u32>,
    /// Completion flag after a toggle.
    pub is_done: Option<bool>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl TaskActionResponse {
    fn success(message: impl Into<String>, index: TaskId) -> Self {
        Self {
            ok: true,
            index: Some(to_ffi_index(index)),
            is_done: None,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            index: None,
            is_done: None,
            message: message.into(),
        }
    }
}

/// Appends a task and schedules its reminder when a time is given.
///
/// # FFI contract
/// - Empty description returns `ok=false`; the list is unchanged.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn task_add(description: String, reminder_epoch_ms: Option<i64>) -> TaskActionResponse {
    match lock_session().add_task(description, reminder_epoch_ms) {
        Ok(index) => TaskActionResponse::success("Task added.", index),
        Err(err) => failure("task_add", &err),
    }
}

/// Removes the task at `index`.
#[flutter_rust_bridge::frb(sync)]
pub fn task_remove(index: u32) -> TaskActionResponse {
    let id = from_ffi_index(index);
    match lock_session().remove_task(id) {
        Ok(_) => TaskActionResponse::success("Task removed.", id),
        Err(err) => failure("task_remove", &err),
    }
}

/// Flips completion of the task at `index`.
///
/// Bumps `completion_revision` on success.
#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle(index: u32) -> TaskActionResponse {
    let id = from_ffi_index(index);
    match lock_session().toggle_task(id) {
        Ok(is_done) => TaskActionResponse {
            is_done: Some(is_done),
            ..TaskActionResponse::success("Task toggled.", id)
        },
        Err(err) => failure("task_toggle", &err),
    }
}

/// Returns the current list in insertion order.
#[flutter_rust_bridge::frb(sync)]
pub fn task_list() -> Vec<TaskItem> {
    lock_session()
        .tasks()
        .iter()
        .enumerate()
        .map(|(index, task)| to_task_item(index, task))
        .collect()
}

/// Returns reminders waiting to fire, ordered by fire time.
#[flutter_rust_bridge::frb(sync)]
pub fn reminders_pending() -> Vec<ReminderItem> {
    notification_center()
        .pending()
        .into_iter()
        .map(to_reminder_item)
        .collect()
}

/// Removes and returns reminders due at `now_epoch_ms`.
///
/// Each reminder is returned once; the host posts it to the platform.
#[flutter_rust_bridge::frb(sync)]
pub fn reminders_take_due(now_epoch_ms: i64) -> Vec<ReminderItem> {
    notification_center()
        .take_due(now_epoch_ms)
        .into_iter()
        .map(to_reminder_item)
        .collect()
}

/// Monotonic counter bumped after every successful toggle.
#[flutter_rust_bridge::frb(sync)]
pub fn completion_revision() -> u64 {
    COMPLETION_REVISION.load(Ordering::SeqCst)
}

fn notification_center() -> &'static Arc<LocalNotificationCenter> {
    NOTIFICATION_CENTER.get_or_init(|| Arc::new(LocalNotificationCenter::new()))
}

fn lock_session() -> MutexGuard<'static, Session> {
    SESSION
        .get_or_init(|| {
            let mut service =
                TaskService::new(MemoryTaskStore::new(), Arc::clone(notification_center()));
            service.set_observer(Box::new(RevisionObserver));
            Mutex::new(service)
        })
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

fn failure(operation: &str, err: &StoreError) -> TaskActionResponse {
    warn!("event=ffi_call module=ffi status=error op={operation} error={err}");
    TaskActionResponse::failure(format!("{operation} failed: {err}"))
}

fn to_task_item(index: TaskId, task: &Task) -> TaskItem {
    TaskItem {
        index: to_ffi_index(index),
        description: task.description.clone(),
        reminder_epoch_ms: task.reminder_time,
        is_done: task.is_done,
    }
}

fn to_reminder_item(request: ReminderRequest) -> ReminderItem {
    ReminderItem {
        id: request.id.to_string(),
        title: request.title,
        body: request.body,
        fire_at_epoch_ms: request.fire_at,
    }
}

fn to_ffi_index(index: TaskId) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}

fn from_ffi_index(index: u32) -> TaskId {
    usize::try_from(index).unwrap_or(usize::MAX)
}
