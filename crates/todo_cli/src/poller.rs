//! Background reminder delivery for the interactive shell.
//!
//! # Responsibility
//! - Print reminders when they come due, independent of stdin activity.
//!
//! # Invariants
//! - Each reminder is printed once; `take_due` removes it from the center.
//! - The loop exits within one interval after `stop` is set.

use log::warn;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use todo_core::{Clock, LocalNotificationCenter};

/// Default delay between due-reminder checks.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

pub struct ReminderPoller<W: Write> {
    center: Arc<LocalNotificationCenter>,
    clock: Clock,
    out: W,
}

impl<W: Write> ReminderPoller<W> {
    pub fn new(center: Arc<LocalNotificationCenter>, clock: Clock, out: W) -> Self {
        Self { center, clock, out }
    }

    /// Prints every reminder due now and re-draws the prompt.
    ///
    /// Returns the number of reminders printed.
    pub fn tick(&mut self) -> io::Result<usize> {
        let due = self.center.take_due((self.clock)());
        if due.is_empty() {
            return Ok(0);
        }
        for request in &due {
            writeln!(self.out, "\n{}: {}", request.title, request.body)?;
        }
        write!(self.out, "> ")?;
        self.out.flush()?;
        Ok(due.len())
    }

    /// Ticks every `interval` until `stop` is set.
    pub fn run(mut self, interval: Duration, stop: &AtomicBool) -> io::Result<()> {
        while !stop.load(Ordering::SeqCst) {
            self.tick()?;
            thread::sleep(interval);
        }
        Ok(())
    }
}

impl<W: Write + Send + 'static> ReminderPoller<W> {
    /// Runs the poller on its own thread.
    pub fn spawn(self, interval: Duration, stop: Arc<AtomicBool>) -> JoinHandle<()> {
        thread::spawn(move || {
            if let Err(err) = self.run(interval, &stop) {
                warn!("event=reminder_poll module=cli status=error error={err}");
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::ReminderPoller;
    use std::io::{self, Write};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};
    use std::thread;
    use std::time::{Duration, Instant};
    use todo_core::{EpochMillis, LocalNotificationCenter, ReminderScheduler};

    #[derive(Clone, Default)]
    struct SharedOutput(Arc<Mutex<Vec<u8>>>);

    impl SharedOutput {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedOutput {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn scheduled_at() -> EpochMillis {
        0
    }

    fn two_minutes_in() -> EpochMillis {
        120_000
    }

    #[test]
    fn tick_prints_due_reminders_once() {
        let center = Arc::new(LocalNotificationCenter::with_clock(scheduled_at));
        center.schedule("stretch", 60_000);
        center.schedule("later", 180_000);
        let mut poller = ReminderPoller::new(Arc::clone(&center), two_minutes_in, Vec::new());

        assert_eq!(poller.tick().unwrap(), 1);
        assert_eq!(poller.tick().unwrap(), 0);

        assert_eq!(String::from_utf8(poller.out).unwrap(), "\nReminder: stretch\n> ");
        assert_eq!(center.pending_len(), 1);
    }

    #[test]
    fn spawned_poller_delivers_without_input() {
        let center = Arc::new(LocalNotificationCenter::with_clock(scheduled_at));
        center.schedule("stretch", 90_000);
        let output = SharedOutput::default();
        let stop = Arc::new(AtomicBool::new(false));

        let handle = ReminderPoller::new(Arc::clone(&center), two_minutes_in, output.clone())
            .spawn(Duration::from_millis(5), Arc::clone(&stop));

        let deadline = Instant::now() + Duration::from_secs(5);
        while !output.text().contains("Reminder: stretch") && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        stop.store(true, Ordering::SeqCst);
        handle.join().unwrap();

        assert_eq!(output.text().matches("Reminder: stretch").count(), 1);
        assert_eq!(center.pending_len(), 0);
    }
}
