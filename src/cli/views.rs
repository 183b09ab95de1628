//! Rendering for the dashboard, history, and schedule views, plus the raw
//! key reader behind interactive period navigation.

use std::io;

use chrono::NaiveDate;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;

use crate::cli::io as cli_io;
use crate::cli::output;
use crate::ledger::{AggregateMetrics, Appointment, Interval, Settings};

pub(crate) fn money(value: f64) -> String {
    format!("${:.2}", value)
}

pub(crate) fn hours(value: f64) -> String {
    format!("{:.1} h", value)
}

fn render_totals(metrics: &AggregateMetrics, settings: Option<&Settings>) {
    cli_io::print_info(format!("  Revenue       : {}", money(metrics.total_revenue)));
    cli_io::print_info(format!(
        "  Hours worked  : {}",
        hours(metrics.total_service_hours)
    ));
    cli_io::print_info(format!("  Per hour      : {}", money(metrics.money_per_hour)));
    cli_io::print_info(format!(
        "  Tax set aside : {}",
        money(metrics.total_tax_set_aside)
    ));
    cli_io::print_info(format!(
        "  Rent share    : {}",
        money(metrics.rent_contribution)
    ));
    cli_io::print_info(format!(
        "  Set-asides    : {}",
        money(metrics.total_set_asides)
    ));
    cli_io::print_info(format!("  Net income    : {}", money(metrics.net_income)));
    if settings.is_none() {
        cli_io::print_warning("Settings not configured; amounts show zero.");
    }
}

/// Today view: the day's sessions, its outstanding appointments, and the
/// totals. Pending rows keep their schedule position so `cancel` and the
/// log wizard line up with what is shown.
pub(crate) fn render_day(
    date: NaiveDate,
    metrics: &AggregateMetrics,
    schedule: &[Appointment],
    settings: Option<&Settings>,
) {
    output::section(Interval::Daily.range_label(date));
    if metrics.logs.is_empty() {
        cli_io::print_info("No services logged yet.");
    } else {
        for (position, entry) in metrics.logs.iter().enumerate() {
            let log = &entry.log;
            cli_io::print_info(format!(
                "  {:>2}. {} ({}): {} min, {}",
                position + 1,
                log.client_name,
                log.service_type,
                log.duration_minutes,
                money(log.payout_amount)
            ));
        }
    }
    if schedule.iter().any(|appointment| !appointment.completed) {
        output::blank_line();
        cli_io::print_info("Pending appointments:");
        for (position, appointment) in schedule.iter().enumerate() {
            if appointment.completed {
                continue;
            }
            cli_io::print_info(schedule_row(position, appointment));
        }
    }
    output::blank_line();
    render_totals(metrics, settings);
}

/// History view: one resolved period with its aggregate numbers.
pub(crate) fn render_period(
    interval: Interval,
    reference: NaiveDate,
    metrics: &AggregateMetrics,
    settings: Option<&Settings>,
) {
    output::section(interval.range_label(reference));
    cli_io::print_info(format!("  View          : {}", interval));
    cli_io::print_info(format!("  Days worked   : {}", metrics.days_worked));
    output::separator();
    render_totals(metrics, settings);
}

pub(crate) fn render_schedule(date: NaiveDate, appointments: &[Appointment]) {
    output::section(format!("Schedule for {}", date.format("%A, %B %-d, %Y")));
    if appointments.is_empty() {
        cli_io::print_info("Nothing booked.");
        return;
    }
    for (position, appointment) in appointments.iter().enumerate() {
        cli_io::print_info(schedule_row(position, appointment));
    }
}

fn schedule_row(position: usize, appointment: &Appointment) -> String {
    let time = appointment
        .scheduled_time
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".into());
    let marker = if appointment.completed { "done" } else { "open" };
    format!(
        "  {:>2}. {} [{}] {} ({})",
        position + 1,
        time,
        marker,
        appointment.client_name,
        appointment.service_type
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NavigationKey {
    Previous,
    Next,
    Exit,
}

/// Blocks until the user presses a navigation key. Raw mode is scoped to the
/// wait so Ctrl-C handling and the readline prompt stay intact around it.
pub(crate) fn read_navigation_key() -> io::Result<NavigationKey> {
    let mut guard = RawModeGuard::activate()?;
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if key.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
            {
                guard.deactivate();
                return Ok(NavigationKey::Exit);
            }
            match key.code {
                KeyCode::Left => {
                    guard.deactivate();
                    return Ok(NavigationKey::Previous);
                }
                KeyCode::Right => {
                    guard.deactivate();
                    return Ok(NavigationKey::Next);
                }
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                    guard.deactivate();
                    return Ok(NavigationKey::Exit);
                }
                _ => {}
            }
        }
    }
}

struct RawModeGuard {
    active: bool,
}

impl RawModeGuard {
    fn activate() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self { active: true })
    }

    fn deactivate(&mut self) {
        if self.active {
            let _ = terminal::disable_raw_mode();
            self.active = false;
        }
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        self.deactivate();
    }
}
