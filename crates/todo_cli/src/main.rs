//! Interactive to-do shell.
//!
//! # Responsibility
//! - Parse arguments and start file logging.
//! - Run one in-memory session reading commands from stdin.
//! - Deliver due reminders from a background poller thread.

mod args;
mod poller;
mod shell;

use anyhow::{anyhow, Context};
use args::Cli;
use clap::Parser;
use log::{info, warn};
use poller::{ReminderPoller, POLL_INTERVAL};
use shell::{Flow, Shell};
use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use todo_core::{system_now_millis, LocalNotificationCenter};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if !cli.no_log {
        start_logging(&cli)?;
    }

    let center = Arc::new(LocalNotificationCenter::new());
    let stop = Arc::new(AtomicBool::new(false));
    let poller = ReminderPoller::new(Arc::clone(&center), system_now_millis, io::stdout())
        .spawn(POLL_INTERVAL, Arc::clone(&stop));
    let mut shell = Shell::new(Arc::clone(&center), io::stdout());
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("todo {}; type `help` for commands", todo_core::core_version());
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read command")?;
        if shell.handle_line(&line)? == Flow::Exit {
            break;
        }
    }

    stop.store(true, Ordering::SeqCst);
    if poller.join().is_err() {
        warn!("event=reminder_poll module=cli status=error error=poller_panicked");
    }

    info!(
        "event=app_exit module=cli status=ok tasks={} pending_reminders={}",
        shell.session().len(),
        center.pending_len()
    );
    Ok(())
}

fn start_logging(cli: &Cli) -> anyhow::Result<()> {
    let log_dir = cli
        .effective_log_dir()
        .ok_or_else(|| anyhow!("no log directory available; pass --log-dir or --no-log"))?;
    let log_dir = log_dir
        .to_str()
        .ok_or_else(|| anyhow!("log directory is not valid UTF-8: {}", log_dir.display()))?;
    todo_core::init_logging(&cli.effective_log_level(), log_dir).map_err(|err| anyhow!(err))
}
