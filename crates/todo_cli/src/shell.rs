//! Line-oriented shell over one in-memory task session.
//!
//! # Responsibility
//! - Parse shell lines into commands.
//! - Apply commands to the task service and render results.
//!
//! # Invariants
//! - Empty `add` text is ignored without output.
//! - Positions are zero-based, matching the store.

use chrono::{Local, NaiveDateTime, TimeZone};
use std::fmt::{Display, Formatter};
use std::io::{self, Write};
use std::sync::Arc;
use todo_core::{
    EpochMillis, LocalNotificationCenter, MemoryTaskStore, StoreError, TaskId, TaskService,
};

/// Reminder time format for input and display, in local time.
const REMINDER_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
const REMINDER_SEPARATOR: &str = " @ ";

pub type Session = TaskService<MemoryTaskStore, Arc<LocalNotificationCenter>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add {
        description: String,
        reminder_time: Option<EpochMillis>,
    },
    Toggle(TaskId),
    Remove(TaskId),
    List {
        json: bool,
    },
    Reminders {
        json: bool,
    },
    Help,
    Quit,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    UnknownCommand(String),
    MissingPosition(&'static str),
    InvalidPosition(String),
    InvalidReminderTime(String),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCommand(value) => {
                write!(f, "unknown command `{value}`; type `help` for commands")
            }
            Self::MissingPosition(command) => write!(f, "`{command}` needs a task position"),
            Self::InvalidPosition(value) => write!(f, "invalid task position `{value}`"),
            Self::InvalidReminderTime(value) => write!(
                f,
                "invalid reminder time `{value}`; expected YYYY-MM-DD HH:MM"
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses one shell line.
pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let trimmed = line.trim();
    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (trimmed, ""),
    };

    match word {
        "" => Ok(Command::Empty),
        "add" => Ok(parse_add(rest)),
        "toggle" | "done" => parse_position("toggle", rest).map(Command::Toggle),
        "remove" | "rm" => parse_position("remove", rest).map(Command::Remove),
        "list" | "ls" => Ok(Command::List {
            json: rest == "--json",
        }),
        "reminders" => Ok(Command::Reminders {
            json: rest == "--json",
        }),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}

/// A trailing ` @ <time>` sets the reminder only when `<time>` parses;
/// otherwise the whole text is the description.
fn parse_add(rest: &str) -> Command {
    let padded = format!(" {rest}");
    let reminder = padded.rsplit_once(REMINDER_SEPARATOR).and_then(|(text, time)| {
        let time = parse_reminder_time(time.trim()).ok()?;
        Some((text.trim(), time))
    });
    let (description, reminder_time) = match reminder {
        Some((text, time)) => (text, Some(time)),
        None => (rest, None),
    };
    Command::Add {
        description: description.to_string(),
        reminder_time,
    }
}

fn parse_position(command: &'static str, rest: &str) -> Result<TaskId, ParseError> {
    if rest.is_empty() {
        return Err(ParseError::MissingPosition(command));
    }
    rest.parse::<TaskId>()
        .map_err(|_| ParseError::InvalidPosition(rest.to_string()))
}

/// Parses `YYYY-MM-DD HH:MM` in local time into epoch milliseconds.
pub fn parse_reminder_time(value: &str) -> Result<EpochMillis, ParseError> {
    let naive = NaiveDateTime::parse_from_str(value, REMINDER_TIME_FORMAT)
        .map_err(|_| ParseError::InvalidReminderTime(value.to_string()))?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|time| time.timestamp_millis())
        .ok_or_else(|| ParseError::InvalidReminderTime(value.to_string()))
}

fn format_reminder_time(time: EpochMillis) -> String {
    match Local.timestamp_millis_opt(time).single() {
        Some(local) => local.format(REMINDER_TIME_FORMAT).to_string(),
        None => time.to_string(),
    }
}

/// Whether the shell keeps reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Shell<W: Write> {
    session: Session,
    center: Arc<LocalNotificationCenter>,
    out: W,
}

impl<W: Write> Shell<W> {
    pub fn new(center: Arc<LocalNotificationCenter>, out: W) -> Self {
        Self {
            session: TaskService::new(MemoryTaskStore::new(), Arc::clone(&center)),
            center,
            out,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Parses and runs one line.
    pub fn handle_line(&mut self, line: &str) -> io::Result<Flow> {
        match parse_command(line) {
            Ok(command) => self.execute(command),
            Err(err) => {
                writeln!(self.out, "error: {err}")?;
                Ok(Flow::Continue)
            }
        }
    }

    pub fn execute(&mut self, command: Command) -> io::Result<Flow> {
        match command {
            Command::Add {
                description,
                reminder_time,
            } => match self.session.add_task(description, reminder_time) {
                Ok(id) => writeln!(self.out, "added #{id}")?,
                Err(StoreError::InvalidInput(_)) => {}
                Err(err) => writeln!(self.out, "error: {err}")?,
            },
            Command::Toggle(id) => match self.session.toggle_task(id) {
                Ok(true) => writeln!(self.out, "#{id} done")?,
                Ok(false) => writeln!(self.out, "#{id} open")?,
                Err(err) => writeln!(self.out, "error: {err}")?,
            },
            Command::Remove(id) => match self.session.remove_task(id) {
                Ok(task) => writeln!(self.out, "removed #{id} {}", task.description)?,
                Err(err) => writeln!(self.out, "error: {err}")?,
            },
            Command::List { json } => self.write_list(json)?,
            Command::Reminders { json } => self.write_reminders(json)?,
            Command::Help => self.write_help()?,
            Command::Quit => return Ok(Flow::Exit),
            Command::Empty => {}
        }
        Ok(Flow::Continue)
    }

    fn write_list(&mut self, json: bool) -> io::Result<()> {
        if json {
            let rendered = serde_json::to_string_pretty(self.session.tasks())
                .map_err(io::Error::other)?;
            return writeln!(self.out, "{rendered}");
        }

        if self.session.is_empty() {
            return writeln!(self.out, "no tasks");
        }
        for (id, task) in self.session.tasks().iter().enumerate() {
            let mark = if task.is_done { "x" } else { " " };
            match task.reminder_time {
                Some(time) => writeln!(
                    self.out,
                    "{id:>3} [{mark}] {}  @ {}",
                    task.description,
                    format_reminder_time(time)
                )?,
                None => writeln!(self.out, "{id:>3} [{mark}] {}", task.description)?,
            }
        }
        Ok(())
    }

    fn write_reminders(&mut self, json: bool) -> io::Result<()> {
        let pending = self.center.pending();
        if json {
            let rendered = serde_json::to_string_pretty(&pending).map_err(io::Error::other)?;
            return writeln!(self.out, "{rendered}");
        }

        if pending.is_empty() {
            return writeln!(self.out, "no pending reminders");
        }
        for request in pending {
            writeln!(
                self.out,
                "{}  {}",
                format_reminder_time(request.fire_at),
                request.body
            )?;
        }
        Ok(())
    }

    fn write_help(&mut self) -> io::Result<()> {
        writeln!(
            self.out,
            "commands:\n  \
             add <text> [@ YYYY-MM-DD HH:MM]\n  \
             toggle <n>\n  \
             remove <n>\n  \
             list [--json]\n  \
             reminders [--json]\n  \
             help\n  \
             quit"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_command, parse_reminder_time, Command, Flow, ParseError, Shell};
    use chrono::{Local, TimeZone};
    use std::sync::Arc;
    use todo_core::{EpochMillis, LocalNotificationCenter};

    fn epoch_clock() -> EpochMillis {
        0
    }

    fn new_shell() -> Shell<Vec<u8>> {
        Shell::new(
            Arc::new(LocalNotificationCenter::with_clock(epoch_clock)),
            Vec::new(),
        )
    }

    fn output(shell: &Shell<Vec<u8>>) -> String {
        String::from_utf8(shell.out.clone()).unwrap()
    }

    #[test]
    fn parses_add_without_reminder() {
        assert_eq!(
            parse_command("add Buy milk").unwrap(),
            Command::Add {
                description: "Buy milk".to_string(),
                reminder_time: None,
            }
        );
    }

    #[test]
    fn parses_add_with_reminder() {
        let expected = Local
            .with_ymd_and_hms(2030, 1, 2, 9, 30, 0)
            .earliest()
            .unwrap()
            .timestamp_millis();

        assert_eq!(
            parse_command("add Call mom @ 2030-01-02 09:30").unwrap(),
            Command::Add {
                description: "Call mom".to_string(),
                reminder_time: Some(expected),
            }
        );
    }

    #[test]
    fn bare_add_parses_to_empty_description() {
        assert_eq!(
            parse_command("add").unwrap(),
            Command::Add {
                description: String::new(),
                reminder_time: None,
            }
        );
        match parse_command("add @ 2030-01-02 09:30").unwrap() {
            Command::Add {
                description,
                reminder_time,
            } => {
                assert!(description.is_empty());
                assert!(reminder_time.is_some());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn at_sign_without_valid_time_stays_in_description() {
        assert_eq!(
            parse_command("add meet Bob @ the office").unwrap(),
            Command::Add {
                description: "meet Bob @ the office".to_string(),
                reminder_time: None,
            }
        );
        assert_eq!(
            parse_command("add x @ tomorrow").unwrap(),
            Command::Add {
                description: "x @ tomorrow".to_string(),
                reminder_time: None,
            }
        );
    }

    #[test]
    fn only_last_valid_time_suffix_sets_the_reminder() {
        match parse_command("add lunch @ cafe @ 2030-01-02 12:00").unwrap() {
            Command::Add {
                description,
                reminder_time,
            } => {
                assert_eq!(description, "lunch @ cafe");
                assert!(reminder_time.is_some());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_bad_positions_and_times() {
        assert_eq!(
            parse_command("toggle"),
            Err(ParseError::MissingPosition("toggle"))
        );
        assert_eq!(
            parse_command("remove one"),
            Err(ParseError::InvalidPosition("one".to_string()))
        );
        assert_eq!(
            parse_reminder_time("2030-13-01 10:00"),
            Err(ParseError::InvalidReminderTime("2030-13-01 10:00".to_string()))
        );
    }

    #[test]
    fn parses_simple_commands() {
        assert_eq!(parse_command("toggle 2").unwrap(), Command::Toggle(2));
        assert_eq!(parse_command("rm 0").unwrap(), Command::Remove(0));
        assert_eq!(
            parse_command("list --json").unwrap(),
            Command::List { json: true }
        );
        assert_eq!(parse_command("  ").unwrap(), Command::Empty);
        assert_eq!(parse_command("exit").unwrap(), Command::Quit);
        assert!(matches!(
            parse_command("frobnicate"),
            Err(ParseError::UnknownCommand(_))
        ));
    }

    #[test]
    fn empty_add_is_silently_ignored() {
        let mut shell = new_shell();

        assert_eq!(shell.handle_line("add").unwrap(), Flow::Continue);

        assert!(shell.session().is_empty());
        assert_eq!(output(&shell), "");
    }

    #[test]
    fn add_toggle_remove_session() {
        let mut shell = new_shell();

        shell.handle_line("add Buy milk").unwrap();
        shell.handle_line("toggle 0").unwrap();
        assert!(shell.session().tasks()[0].is_done);
        shell.handle_line("remove 0").unwrap();
        shell.handle_line("toggle 0").unwrap();

        let text = output(&shell);
        assert!(text.contains("added #0"));
        assert!(text.contains("#0 done"));
        assert!(text.contains("removed #0 Buy milk"));
        assert!(text.contains("error: task not found at position 0"));
        assert!(shell.session().is_empty());
    }

    #[test]
    fn list_json_renders_tasks() {
        let mut shell = new_shell();
        shell.handle_line("add A").unwrap();
        shell.handle_line("add B").unwrap();
        shell.handle_line("toggle 1").unwrap();
        shell.out.clear();

        shell.handle_line("list --json").unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output(&shell)).unwrap();
        assert_eq!(parsed[0]["description"], "A");
        assert_eq!(parsed[1]["is_done"], true);
    }

    #[test]
    fn reminders_json_renders_pending_requests() {
        let mut shell = new_shell();
        shell
            .execute(Command::Add {
                description: "stretch".to_string(),
                reminder_time: Some(125_000),
            })
            .unwrap();
        shell.out.clear();

        shell.handle_line("reminders --json").unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output(&shell)).unwrap();
        assert_eq!(parsed[0]["title"], "Reminder");
        assert_eq!(parsed[0]["body"], "stretch");
        assert_eq!(parsed[0]["fire_at"], 120_000);
        assert_eq!(parsed[0]["sound"], "default");
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut shell = new_shell();
        assert_eq!(shell.handle_line("quit").unwrap(), Flow::Exit);
    }
}
