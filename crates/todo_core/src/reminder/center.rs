//! In-process local notification center.
//!
//! # Responsibility
//! - Hold scheduled reminder requests until a front-end polls them.
//! - Drop requests whose minute has already passed.
//!
//! # Invariants
//! - Each accepted request is returned by `take_due`/`drain` at most once.
//! - Lock poisoning is recovered; no API panics.

use crate::model::task::EpochMillis;
use crate::reminder::scheduler::{truncate_to_minute, ReminderRequest, ReminderScheduler};
use log::{debug, info};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

/// Clock source returning epoch milliseconds.
pub type Clock = fn() -> EpochMillis;

/// Reads the system clock as epoch milliseconds.
///
/// Returns `0` if the clock is before the Unix epoch.
pub fn system_now_millis() -> EpochMillis {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

/// Pending entry plus scheduling sequence for stable ordering.
#[derive(Debug)]
struct Pending {
    seq: u64,
    request: ReminderRequest,
}

#[derive(Debug, Default)]
struct CenterState {
    next_seq: u64,
    pending: Vec<Pending>,
}

/// Local notification center that queues one-shot reminders in memory.
#[derive(Debug)]
pub struct LocalNotificationCenter {
    clock: Clock,
    state: Mutex<CenterState>,
}

impl Default for LocalNotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalNotificationCenter {
    /// Creates a center using the system clock.
    pub fn new() -> Self {
        Self::with_clock(system_now_millis)
    }

    /// Creates a center with an explicit clock.
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            clock,
            state: Mutex::new(CenterState::default()),
        }
    }

    /// Accepts a built request unless its minute is already in the past.
    ///
    /// Returns whether the request was queued.
    pub fn submit(&self, request: ReminderRequest) -> bool {
        let current_minute = truncate_to_minute((self.clock)());
        if request.fire_at < current_minute {
            debug!(
                "event=reminder_schedule module=reminder status=skipped reason=past fire_at={} now={}",
                request.fire_at, current_minute
            );
            return false;
        }

        let mut state = self.lock();
        let seq = state.next_seq;
        state.next_seq += 1;
        info!(
            "event=reminder_schedule module=reminder status=ok id={} fire_at={}",
            request.id, request.fire_at
        );
        state.pending.push(Pending { seq, request });
        true
    }

    /// Snapshot of pending requests ordered by fire time.
    pub fn pending(&self) -> Vec<ReminderRequest> {
        let state = self.lock();
        let mut entries = state.pending.iter().collect::<Vec<_>>();
        entries.sort_by_key(|entry| (entry.request.fire_at, entry.seq));
        entries
            .into_iter()
            .map(|entry| entry.request.clone())
            .collect()
    }

    pub fn pending_len(&self) -> usize {
        self.lock().pending.len()
    }

    /// Removes and returns every request due at `now`.
    pub fn take_due(&self, now: EpochMillis) -> Vec<ReminderRequest> {
        let mut state = self.lock();
        let (mut due, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut state.pending)
            .into_iter()
            .partition(|entry| entry.request.is_due(now));
        state.pending = rest;
        drop(state);

        due.sort_by_key(|entry| (entry.request.fire_at, entry.seq));
        if !due.is_empty() {
            info!(
                "event=reminder_fire module=reminder status=ok count={} now={}",
                due.len(),
                now
            );
        }
        due.into_iter().map(|entry| entry.request).collect()
    }

    /// Removes and returns all pending requests.
    pub fn drain(&self) -> Vec<ReminderRequest> {
        let mut entries = std::mem::take(&mut self.lock().pending);
        entries.sort_by_key(|entry| (entry.request.fire_at, entry.seq));
        entries.into_iter().map(|entry| entry.request).collect()
    }

    fn lock(&self) -> MutexGuard<'_, CenterState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ReminderScheduler for LocalNotificationCenter {
    fn schedule(&self, description: &str, time: EpochMillis) {
        self.submit(ReminderRequest::new(description, time));
    }
}
