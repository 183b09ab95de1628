use chrono::{Duration, NaiveDate, Utc};

use crate::cli::core::{
    parse_amount, parse_date, parse_interval, parse_minutes, CliMode, CommandError, CommandResult,
    ShellContext,
};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::views::{self, NavigationKey};
use crate::ledger::{Interval, SERVICE_TYPES};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "dashboard",
            &["today"],
            "Show today's sessions and totals",
            "dashboard [YYYY-MM-DD]",
            cmd_dashboard,
        ),
        CommandEntry::new(
            "log",
            &[],
            "Record a finished service",
            "log [<client> <service> <minutes> <payout> [YYYY-MM-DD]]",
            cmd_log,
        ),
        CommandEntry::new(
            "history",
            &[],
            "Browse aggregated periods",
            "history [daily|weekly|monthly|quarterly|yearly] [YYYY-MM-DD]",
            cmd_history,
        ),
    ]
}

fn cmd_dashboard(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() > 1 {
        return Err(CommandError::InvalidArguments(
            "usage: dashboard [YYYY-MM-DD]".into(),
        ));
    }
    let date = match args.first() {
        Some(token) => parse_date(token)?,
        None => context.today(),
    };
    let metrics = context.book.today_metrics(date);
    let schedule = context.book.schedule_for(date)?;
    views::render_day(date, &metrics, &schedule, context.book.settings());
    Ok(())
}

fn cmd_history(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() > 2 {
        return Err(CommandError::InvalidArguments(
            "usage: history [interval] [YYYY-MM-DD]".into(),
        ));
    }
    let interval = match args.first() {
        Some(token) => parse_interval(token)?,
        None => Interval::Weekly,
    };
    let mut reference = match args.get(1) {
        Some(token) => parse_date(token)?,
        None => context.today(),
    };

    loop {
        let metrics = context.book.period_metrics(interval, reference);
        views::render_period(interval, reference, &metrics, context.book.settings());
        if context.mode() != CliMode::Interactive {
            return Ok(());
        }
        io::print_hint("Left and Right arrows change the period, Esc returns.");
        match views::read_navigation_key()? {
            NavigationKey::Previous => reference = interval.shift(reference, -1),
            NavigationKey::Next => reference = interval.shift(reference, 1),
            NavigationKey::Exit => return Ok(()),
        }
    }
}

fn cmd_log(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return log_from_args(context, args);
    }
    if context.mode() != CliMode::Interactive {
        return Err(CommandError::InvalidArguments(
            "usage: log <client> <service> <minutes> <payout> [YYYY-MM-DD]".into(),
        ));
    }
    log_wizard(context)
}

fn log_from_args(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 4 || args.len() > 5 {
        return Err(CommandError::InvalidArguments(
            "usage: log <client> <service> <minutes> <payout> [YYYY-MM-DD]".into(),
        ));
    }
    let minutes = parse_minutes(args[2])?;
    let payout = parse_amount(args[3], "payout")?;
    let date = match args.get(4) {
        Some(token) => parse_date(token)?,
        None => context.today(),
    };

    // Scripted entries only know the duration, so anchor the session to now.
    let end = Utc::now();
    let start = end - Duration::minutes(minutes);
    record(context, date, args[0], args[1], start, end, payout)
}

fn log_wizard(context: &mut ShellContext) -> CommandResult {
    let today = context.today();
    let schedule = context.book.schedule_for(today)?;
    let outstanding: Vec<(usize, _)> = schedule
        .iter()
        .enumerate()
        .filter(|(_, appointment)| !appointment.completed)
        .collect();

    let mut completed_slot = None;
    let mut client = String::new();
    let mut service_default = 0usize;

    if !outstanding.is_empty()
        && io::confirm_action(&context.theme, "Log one of today's appointments?", true)?
    {
        let labels: Vec<String> = outstanding
            .iter()
            .map(|(_, appointment)| {
                format!("{} ({})", appointment.client_name, appointment.service_type)
            })
            .collect();
        let label_refs: Vec<&str> = labels.iter().map(String::as_str).collect();
        let picked = io::select_index(&context.theme, "Appointment", &label_refs, 0)?;
        let (slot, appointment) = outstanding[picked];
        completed_slot = Some(slot);
        client = appointment.client_name.clone();
        service_default = SERVICE_TYPES
            .iter()
            .position(|name| *name == appointment.service_type)
            .unwrap_or(SERVICE_TYPES.len() - 1);
    }

    let client = if client.is_empty() {
        io::prompt_text(&context.theme, "Client name")?
    } else {
        io::prompt_text_with_default(&context.theme, "Client name", &client)?
    };
    let service_index = io::select_index(&context.theme, "Service", SERVICE_TYPES, service_default)?;
    let service = SERVICE_TYPES[service_index];

    // Either time the session live or take a duration entered after the fact.
    let (start, end) = if io::confirm_action(&context.theme, "Time the session now?", false)? {
        let start = Utc::now();
        io::prompt_optional_text(&context.theme, "Timing. Press Enter when the session ends")?;
        (start, Utc::now())
    } else {
        let minutes = parse_minutes(&io::prompt_text(&context.theme, "Duration (minutes)")?)?;
        let end = Utc::now();
        (end - Duration::minutes(minutes), end)
    };
    let payout = parse_amount(&io::prompt_text(&context.theme, "Payout amount")?, "payout")?;

    record(context, today, &client, service, start, end, payout)?;

    if let Some(slot) = completed_slot {
        let appointment = context.book.complete_appointment(today, slot)?;
        io::print_info(format!(
            "Marked {}'s appointment as done.",
            appointment.client_name
        ));
    }
    Ok(())
}

fn record(
    context: &mut ShellContext,
    date: NaiveDate,
    client: &str,
    service: &str,
    start: chrono::DateTime<Utc>,
    end: chrono::DateTime<Utc>,
    payout: f64,
) -> CommandResult {
    let log = context
        .book
        .log_service(date, client, service, start, end, payout)?;
    io::print_success(format!(
        "Logged {} for {}: {} min, {}.",
        log.service_type,
        log.client_name,
        log.duration_minutes,
        views::money(log.payout_amount)
    ));
    io::print_info(format!(
        "Tax set aside: {} at {:.1}%.",
        views::money(log.tax_set_aside),
        log.tax_rate_used
    ));
    Ok(())
}
