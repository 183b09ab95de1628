//! Shell state, command dispatch, error reporting, and argument parsing.

use std::io;

use chrono::{Local, NaiveDate, NaiveTime};
use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;
use thiserror::Error;

use crate::cli::commands;
use crate::cli::io as cli_io;
use crate::cli::output::{self, OutputPreferences};
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::core::DayBook;
use crate::errors::LedgrError;
use crate::ledger::Interval;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Failures surfaced by command handlers. Most are reported and the loop
/// continues; `ExitRequested` is the ordinary way out.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Settings not configured.")]
    SettingsNotConfigured,
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Core(LedgrError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<LedgrError> for CommandError {
    fn from(err: LedgrError) -> Self {
        match err {
            LedgrError::SettingsNotConfigured => CommandError::SettingsNotConfigured,
            other => CommandError::Core(other),
        }
    }
}

/// Failures that abort the shell itself rather than a single command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgrError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub book: DayBook,
    pub theme: ColorfulTheme,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        // Scripted runs want stable, uncolored output.
        if mode == CliMode::Script {
            output::set_preferences(OutputPreferences {
                screen_reader_mode: true,
                ..OutputPreferences::default()
            });
        }

        let book = DayBook::open_default()?;
        Ok(Self {
            mode,
            registry,
            book,
            theme: ColorfulTheme::default(),
            running: true,
        })
    }

    #[cfg(test)]
    pub(crate) fn with_book(mode: CliMode, book: DayBook) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        Self {
            mode,
            registry,
            book,
            theme: ColorfulTheme::default(),
            running: true,
        }
    }

    pub(crate) fn mode(&self) -> CliMode {
        self.mode
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn prompt(&self) -> String {
        "ledgr> ".to_string()
    }

    pub(crate) fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                self.print_warning(&err.to_string());
                return Ok(LoopControl::Continue);
            }
        };

        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }

        let command = tokens[0].to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&command, &tokens[0], &args)
    }

    #[cfg(test)]
    pub(crate) fn process_script(&mut self, lines: &[&str]) -> Result<(), CommandError> {
        for line in lines {
            match self.process_line(line)? {
                LoopControl::Continue => {}
                LoopControl::Exit => break,
            }
        }
        Ok(())
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, input), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        let confirmed = dialoguer::Confirm::with_theme(&self.theme)
            .with_prompt("Exit shell?")
            .default(true)
            .interact()?;
        Ok(confirmed)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                self.print_error(&message);
                self.print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::SettingsNotConfigured => {
                self.print_error("Settings not configured.");
                self.print_hint(
                    "Run `settings edit` or `settings set <tax%> <rent> <weekly|monthly> <days>` first.",
                );
                Ok(())
            }
            other => {
                self.print_error(&other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn print_error(&self, message: &str) {
        cli_io::print_error(message);
    }

    pub(crate) fn print_warning(&self, message: &str) {
        cli_io::print_warning(message);
    }

    pub(crate) fn print_hint(&self, message: &str) {
        cli_io::print_hint(message);
    }
}

pub(crate) fn parse_date(input: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("invalid date `{}` (use YYYY-MM-DD)", input))
    })
}

pub(crate) fn parse_time(input: &str) -> Result<NaiveTime, CommandError> {
    NaiveTime::parse_from_str(input, "%H:%M").map_err(|_| {
        CommandError::InvalidArguments(format!("invalid time `{}` (use HH:MM)", input))
    })
}

pub(crate) fn parse_interval(input: &str) -> Result<Interval, CommandError> {
    Interval::parse(input).ok_or_else(|| {
        CommandError::InvalidArguments(format!(
            "unknown interval `{}` (use daily, weekly, monthly, quarterly, or yearly)",
            input
        ))
    })
}

pub(crate) fn parse_amount(value: &str, label: &str) -> Result<f64, CommandError> {
    let amount: f64 = value
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("invalid {} `{}`", label, value)))?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(CommandError::InvalidArguments(format!(
            "{} must be zero or more",
            label
        )));
    }
    Ok(amount)
}

pub(crate) fn parse_minutes(value: &str) -> Result<i64, CommandError> {
    let minutes: i64 = value
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("invalid minutes `{}`", value)))?;
    if minutes <= 0 {
        return Err(CommandError::InvalidArguments(
            "minutes must be 1 or more".into(),
        ));
    }
    Ok(minutes)
}

/// Parses a 1-based display index into its zero-based position.
pub(crate) fn parse_index(value: &str) -> Result<usize, CommandError> {
    let index: usize = value
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("invalid index `{}`", value)))?;
    if index == 0 {
        return Err(CommandError::InvalidArguments(
            "index must be 1 or higher".into(),
        ));
    }
    Ok(index - 1)
}
