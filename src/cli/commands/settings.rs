use crate::cli::core::{parse_amount, CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::views;
use crate::ledger::{RentFrequency, Settings};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "settings",
        &[],
        "Show or change tax, rent, and working days",
        "settings [show | set <tax%> <rent> <weekly|monthly> <days> | edit]",
        cmd_settings,
    )]
}

fn cmd_settings(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().copied() {
        None | Some("show") => show(context),
        Some("set") => set_from_args(context, &args[1..]),
        Some("edit") => edit_wizard(context),
        Some(other) => Err(CommandError::InvalidArguments(format!(
            "unknown settings action `{}` (use show, set, or edit)",
            other
        ))),
    }
}

fn show(context: &ShellContext) -> CommandResult {
    output_section("Settings");
    match context.book.settings() {
        Some(settings) => {
            io::print_info(format!("  Tax rate     : {:.1}%", settings.tax_rate));
            io::print_info(format!(
                "  Rent         : {} ({})",
                views::money(settings.rent_amount),
                settings.rent_frequency.as_str()
            ));
            io::print_info(format!(
                "  Working days : {} per week",
                settings.working_days
            ));
            io::print_info(format!(
                "  Daily rent   : {}",
                views::money(settings.daily_rent())
            ));
        }
        None => {
            io::print_info("Not configured.");
            io::print_hint(
                "Run `settings edit` or `settings set <tax%> <rent> <weekly|monthly> <days>`.",
            );
        }
    }
    Ok(())
}

fn set_from_args(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() != 4 {
        return Err(CommandError::InvalidArguments(
            "usage: settings set <tax%> <rent> <weekly|monthly> <days>".into(),
        ));
    }
    let settings = build_settings(args[0], args[1], args[2], args[3])?;
    apply(context, settings)
}

fn edit_wizard(context: &mut ShellContext) -> CommandResult {
    if context.mode() != CliMode::Interactive {
        return Err(CommandError::InvalidArguments(
            "the settings wizard needs an interactive session; use `settings set ...`".into(),
        ));
    }

    let current = context.book.settings().cloned().unwrap_or_default();
    let tax = io::prompt_text_with_default(
        &context.theme,
        "Tax rate (%)",
        &current.tax_rate.to_string(),
    )?;
    let rent = io::prompt_text_with_default(
        &context.theme,
        "Rent amount",
        &current.rent_amount.to_string(),
    )?;
    let frequency_default = match current.rent_frequency {
        RentFrequency::Weekly => 0,
        RentFrequency::Monthly => 1,
    };
    let frequency_index = io::select_index(
        &context.theme,
        "Rent frequency",
        &["weekly", "monthly"],
        frequency_default,
    )?;
    let days = io::prompt_text_with_default(
        &context.theme,
        "Working days per week",
        &current.working_days.to_string(),
    )?;

    let frequency = if frequency_index == 0 { "weekly" } else { "monthly" };
    let settings = build_settings(&tax, &rent, frequency, &days)?;
    apply(context, settings)
}

fn build_settings(
    tax: &str,
    rent: &str,
    frequency: &str,
    days: &str,
) -> Result<Settings, CommandError> {
    let tax_rate = parse_amount(tax, "tax rate")?;
    if tax_rate > 100.0 {
        return Err(CommandError::InvalidArguments(
            "tax rate must be between 0 and 100".into(),
        ));
    }
    let rent_amount = parse_amount(rent, "rent")?;
    let rent_frequency = RentFrequency::parse(frequency).ok_or_else(|| {
        CommandError::InvalidArguments(format!(
            "unknown rent frequency `{}` (use weekly or monthly)",
            frequency
        ))
    })?;
    let working_days: u32 = days.parse().map_err(|_| {
        CommandError::InvalidArguments(format!("invalid working days `{}`", days))
    })?;
    if !(1..=7).contains(&working_days) {
        return Err(CommandError::InvalidArguments(
            "working days must be between 1 and 7".into(),
        ));
    }
    Ok(Settings {
        tax_rate,
        rent_amount,
        rent_frequency,
        working_days,
    })
}

fn apply(context: &mut ShellContext, settings: Settings) -> CommandResult {
    let daily = settings.daily_rent();
    context.book.update_settings(settings)?;
    io::print_success("Settings saved.");
    io::print_info(format!(
        "Daily rent share is now {}.",
        views::money(daily)
    ));
    Ok(())
}
