use chrono::NaiveDate;

use crate::cli::core::{
    parse_date, parse_index, parse_time, CliMode, CommandError, CommandResult, ShellContext,
};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::views;
use crate::ledger::{Appointment, SERVICE_TYPES};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "book",
            &[],
            "Book a client slot",
            "book [<client> <service> [HH:MM] [YYYY-MM-DD]]",
            cmd_book,
        ),
        CommandEntry::new(
            "schedule",
            &[],
            "List a day's appointments",
            "schedule [YYYY-MM-DD]",
            cmd_schedule,
        ),
        CommandEntry::new(
            "cancel",
            &[],
            "Cancel an appointment by its list position",
            "cancel <index> [YYYY-MM-DD]",
            cmd_cancel,
        ),
    ]
}

fn cmd_book(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return book_from_args(context, args);
    }
    if context.mode() != CliMode::Interactive {
        return Err(CommandError::InvalidArguments(
            "usage: book <client> <service> [HH:MM] [YYYY-MM-DD]".into(),
        ));
    }
    book_wizard(context)
}

fn book_from_args(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 2 || args.len() > 4 {
        return Err(CommandError::InvalidArguments(
            "usage: book <client> <service> [HH:MM] [YYYY-MM-DD]".into(),
        ));
    }

    let mut scheduled_time = None;
    let mut date = context.today();
    match args.len() {
        3 => {
            // A lone third token is a time when it carries a colon.
            if args[2].contains(':') {
                scheduled_time = Some(parse_time(args[2])?);
            } else {
                date = parse_date(args[2])?;
            }
        }
        4 => {
            scheduled_time = Some(parse_time(args[2])?);
            date = parse_date(args[3])?;
        }
        _ => {}
    }

    let appointment = context.book.book(date, args[0], args[1], scheduled_time)?;
    announce(&appointment, date);
    Ok(())
}

fn book_wizard(context: &mut ShellContext) -> CommandResult {
    let client = io::prompt_text(&context.theme, "Client name")?;
    let service_index = io::select_index(&context.theme, "Service", SERVICE_TYPES, 0)?;
    let date_text = io::prompt_text_with_default(
        &context.theme,
        "Date (YYYY-MM-DD)",
        &context.today().to_string(),
    )?;
    let date = parse_date(&date_text)?;
    let time_text = io::prompt_optional_text(&context.theme, "Time (HH:MM, empty for walk-in)")?;
    let trimmed = time_text.trim();
    let scheduled_time = if trimmed.is_empty() {
        None
    } else {
        Some(parse_time(trimmed)?)
    };

    let appointment = context
        .book
        .book(date, &client, SERVICE_TYPES[service_index], scheduled_time)?;
    announce(&appointment, date);
    Ok(())
}

fn cmd_schedule(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() > 1 {
        return Err(CommandError::InvalidArguments(
            "usage: schedule [YYYY-MM-DD]".into(),
        ));
    }
    let date = match args.first() {
        Some(token) => parse_date(token)?,
        None => context.today(),
    };
    let appointments = context.book.schedule_for(date)?;
    views::render_schedule(date, &appointments);
    Ok(())
}

fn cmd_cancel(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args.len() > 2 {
        return Err(CommandError::InvalidArguments(
            "usage: cancel <index> [YYYY-MM-DD]".into(),
        ));
    }
    let index = parse_index(args[0])?;
    let date = match args.get(1) {
        Some(token) => parse_date(token)?,
        None => context.today(),
    };
    let removed = context.book.cancel(date, index)?;
    io::print_success(format!(
        "Cancelled {} ({}).",
        removed.client_name, removed.service_type
    ));
    Ok(())
}

fn announce(appointment: &Appointment, date: NaiveDate) {
    let at = appointment
        .scheduled_time
        .map(|time| format!(" at {}", time.format("%H:%M")))
        .unwrap_or_default();
    io::print_success(format!(
        "Booked {} ({}) on {}{}.",
        appointment.client_name, appointment.service_type, date, at
    ));
}
