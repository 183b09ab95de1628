//! Shell entry points and the readline completion helper.

use std::{
    borrow::Cow,
    fmt,
    io::{self, BufRead},
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::{ValidationContext, ValidationResult, Validator},
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::split;

use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::output::info as output_info;

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os("LEDGR_CLI_SCRIPT").is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn build_editor(context: &ShellContext) -> Result<Editor<ShellHelper, DefaultHistory>, CliError> {
    let mut editor = Editor::new()?;
    editor.set_helper(Some(ShellHelper::new(context.command_names())));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
    Ok(editor)
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = build_editor(context)?;

    while context.running {
        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();

                match handle_line(context, trimmed) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => context.report_error(err)?,
                }
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                output_info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

/// Runs stdin as a script, one command per line. Failures are reported with
/// their line number and the script keeps going.
fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let stdin = io::stdin();
    for (index, line) in stdin.lock().lines().enumerate() {
        if !context.running {
            break;
        }
        match handle_line(context, &line?) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => {
                context.print_warning(&format!("script line {} failed.", index + 1));
                context.report_error(err)?;
            }
        }
    }
    Ok(())
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            context.print_warning(&err.to_string());
            return Ok(LoopControl::Continue);
        }
    };

    let Some(raw) = tokens.first() else {
        return Ok(LoopControl::Continue);
    };
    let command = raw.to_lowercase();
    let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

    let control = context.dispatch(&command, raw, &args)?;
    if control == LoopControl::Exit {
        context.running = false;
    }
    Ok(control)
}

/// Completion, hinting, and validation for the prompt. Completes command
/// names in the first position and each command's fixed follow-up words in
/// the second; free-text positions (clients, dates, amounts) never complete.
struct ShellHelper {
    commands: Vec<String>,
}

impl ShellHelper {
    fn new(names: Vec<&'static str>) -> Self {
        let mut commands: Vec<String> = names
            .into_iter()
            .map(|name| name.to_ascii_lowercase())
            .collect();
        commands.sort();
        commands.dedup();
        Self { commands }
    }

    fn follow_ups(&self, command: &str) -> Vec<&str> {
        match command {
            "settings" => vec!["edit", "set", "show"],
            "history" => vec!["daily", "weekly", "monthly", "quarterly", "yearly"],
            "help" => self.commands.iter().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }
}

impl Helper for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let needle = prefix[start..].to_ascii_lowercase();

        let mut earlier = prefix[..start].split_whitespace();
        let words: Vec<&str> = match earlier.next() {
            None => self.commands.iter().map(String::as_str).collect(),
            Some(command) if earlier.next().is_none() => {
                self.follow_ups(&command.to_ascii_lowercase())
            }
            Some(_) => Vec::new(),
        };

        let candidates = words
            .into_iter()
            .filter(|word| word.starts_with(&needle))
            .map(|word| Pair {
                display: word.to_string(),
                replacement: word.to_string(),
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;
}

impl Highlighter for ShellHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for ShellHelper {
    fn validate(&self, ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        let _ = ctx;
        Ok(ValidationResult::Valid(None))
    }
}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, ParseError> {
    split(input).map_err(|err| ParseError(err.to_string()))
}

#[derive(Debug)]
pub(crate) struct ParseError(String);

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_at(helper: &ShellHelper, line: &str, pos: usize) -> (usize, Vec<String>) {
        let history = DefaultHistory::new();
        let ctx = ReadlineContext::new(&history);
        let (start, pairs) = helper.complete(line, pos, &ctx).unwrap();
        let mut found: Vec<String> = pairs.into_iter().map(|pair| pair.replacement).collect();
        found.sort();
        (start, found)
    }

    #[test]
    fn splits_quoted_arguments() {
        let tokens = parse_command_line("book \"Ana Maria\" Haircut 09:30").unwrap();
        assert_eq!(tokens, vec!["book", "Ana Maria", "Haircut", "09:30"]);
    }

    #[test]
    fn unbalanced_quotes_are_a_parse_error() {
        assert!(parse_command_line("log \"Ana").is_err());
    }

    #[test]
    fn first_word_completes_command_names() {
        let helper = ShellHelper::new(vec!["history", "help", "book"]);
        let (start, found) = complete_at(&helper, "he", 2);
        assert_eq!(start, 0);
        assert_eq!(found, vec!["help"]);
    }

    #[test]
    fn second_word_completes_known_actions() {
        let helper = ShellHelper::new(vec!["settings", "history"]);

        let (start, actions) = complete_at(&helper, "settings s", 10);
        assert_eq!(start, 9);
        assert_eq!(actions, vec!["set", "show"]);

        let (_, intervals) = complete_at(&helper, "history q", 9);
        assert_eq!(intervals, vec!["quarterly"]);
    }

    #[test]
    fn free_text_positions_never_complete() {
        let helper = ShellHelper::new(vec!["book", "history"]);
        let (_, clients) = complete_at(&helper, "book An", 7);
        assert!(clients.is_empty());

        let (_, later) = complete_at(&helper, "history weekly 20", 17);
        assert!(later.is_empty());
    }
}
