use colored::Colorize;
use std::fmt;
use std::sync::{OnceLock, RwLock};

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Hint,
    Section,
    Separator,
}

impl MessageKind {
    fn label(self) -> &'static str {
        match self {
            MessageKind::Success => "SUCCESS",
            MessageKind::Warning => "WARNING",
            MessageKind::Error => "ERROR",
            MessageKind::Hint => "HINT",
            MessageKind::Info | MessageKind::Section | MessageKind::Separator => "INFO",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            MessageKind::Info => "[i]",
            MessageKind::Success => "[\u{2713}]",
            MessageKind::Warning => "[!]",
            MessageKind::Error => "[x]",
            MessageKind::Hint => "[?]",
            MessageKind::Section | MessageKind::Separator => "",
        }
    }

    /// Decoration-only kinds disappear under `quiet_mode`.
    fn quiet_skipped(self) -> bool {
        matches!(self, MessageKind::Separator | MessageKind::Hint)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct OutputPreferences {
    /// Plain text only, labels kept, styling stripped.
    pub screen_reader_mode: bool,
    /// Suppresses decoration such as separators and hints.
    pub quiet_mode: bool,
}

static PREFERENCES: OnceLock<RwLock<OutputPreferences>> = OnceLock::new();

pub fn set_preferences(prefs: OutputPreferences) {
    let lock = PREFERENCES.get_or_init(|| RwLock::new(OutputPreferences::default()));
    if let Ok(mut guard) = lock.write() {
        *guard = prefs;
    }
}

fn preferences() -> OutputPreferences {
    PREFERENCES
        .get_or_init(|| RwLock::new(OutputPreferences::default()))
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

/// Renders one message for the given preferences, or `None` when the kind is
/// suppressed. Kept free of I/O so formatting stays testable.
fn decorate(kind: MessageKind, text: &str, prefs: &OutputPreferences) -> Option<String> {
    if prefs.quiet_mode && kind.quiet_skipped() {
        return None;
    }

    let base = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        MessageKind::Separator => "-".repeat(40),
        _ => {
            let label = kind.label();
            let icon = kind.icon();
            if icon.is_empty() {
                format!("{label}: {text}")
            } else {
                format!("{label}: {icon} {text}")
            }
        }
    };

    if prefs.screen_reader_mode {
        return Some(base);
    }

    Some(match kind {
        MessageKind::Success => base.bright_green().to_string(),
        MessageKind::Warning => base.bright_yellow().to_string(),
        MessageKind::Error => base.bright_red().to_string(),
        MessageKind::Hint => base.bright_cyan().to_string(),
        MessageKind::Section => base.bold().to_string(),
        MessageKind::Separator | MessageKind::Info => base,
    })
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let prefs = preferences();
    let Some(formatted) = decorate(kind, &message.to_string(), &prefs) else {
        return;
    };
    match kind {
        MessageKind::Section | MessageKind::Separator => println!("\n{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn hint(message: impl fmt::Display) {
    print(MessageKind::Hint, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

pub fn separator() {
    print(MessageKind::Separator, "");
}

pub fn blank_line() {
    if !preferences().quiet_mode {
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_reader_output_keeps_labels_without_styling() {
        let prefs = OutputPreferences {
            screen_reader_mode: true,
            quiet_mode: false,
        };
        assert_eq!(
            decorate(MessageKind::Success, "Settings saved.", &prefs).unwrap(),
            "SUCCESS: [\u{2713}] Settings saved."
        );
        assert_eq!(
            decorate(MessageKind::Section, "  Settings  ", &prefs).unwrap(),
            "=== Settings ==="
        );
    }

    #[test]
    fn quiet_mode_drops_decoration_but_keeps_substance() {
        let prefs = OutputPreferences {
            screen_reader_mode: true,
            quiet_mode: true,
        };
        assert!(decorate(MessageKind::Hint, "try `help`", &prefs).is_none());
        assert!(decorate(MessageKind::Separator, "", &prefs).is_none());
        assert!(decorate(MessageKind::Error, "kept", &prefs).is_some());
        assert!(decorate(MessageKind::Info, "kept", &prefs).is_some());
    }

    #[test]
    fn separators_render_as_a_dash_rule() {
        let prefs = OutputPreferences {
            screen_reader_mode: true,
            quiet_mode: false,
        };
        let rule = decorate(MessageKind::Separator, "", &prefs).unwrap();
        assert_eq!(rule.len(), 40);
        assert!(rule.chars().all(|c| c == '-'));
    }
}
