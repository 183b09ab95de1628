use serde::{Deserialize, Serialize};

/// Average weeks per month (52 / 12). Kept as the historical constant so
/// monthly-rent summaries never change meaning between releases.
pub const WEEKS_PER_MONTH: f64 = 4.33;

/// How often the chair/space rent falls due.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RentFrequency {
    Weekly,
    Monthly,
}

impl RentFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            RentFrequency::Weekly => "Weekly",
            RentFrequency::Monthly => "Monthly",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        match input.to_lowercase().as_str() {
            "weekly" | "week" | "w" => Some(RentFrequency::Weekly),
            "monthly" | "month" | "m" => Some(RentFrequency::Monthly),
            _ => None,
        }
    }
}

impl Default for RentFrequency {
    fn default() -> Self {
        RentFrequency::Weekly
    }
}

/// Operator-configured rates read by every metrics computation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Percentage of each payout reserved for tax (expected 0-100, not enforced).
    pub tax_rate: f64,
    pub rent_amount: f64,
    pub rent_frequency: RentFrequency,
    /// Working days per rent period; the divisor for the per-day rent share.
    pub working_days: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tax_rate: 25.0,
            rent_amount: 250.0,
            rent_frequency: RentFrequency::Weekly,
            working_days: 5,
        }
    }
}

impl Settings {
    /// Rent attributed to a single working day, whatever the billing frequency.
    /// Zero working days yields zero rather than a division by zero.
    pub fn daily_rent(&self) -> f64 {
        if self.working_days == 0 {
            return 0.0;
        }
        let days = f64::from(self.working_days);
        match self.rent_frequency {
            RentFrequency::Weekly => self.rent_amount / days,
            RentFrequency::Monthly => self.rent_amount / (days * WEEKS_PER_MONTH),
        }
    }

    /// Tax to set aside from a payout at the configured rate.
    pub fn tax_for(&self, payout: f64) -> f64 {
        payout * self.tax_rate / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekly_rent_splits_across_working_days() {
        let settings = Settings::default();
        assert!((settings.daily_rent() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn monthly_rent_uses_average_weeks_per_month() {
        let settings = Settings {
            rent_frequency: RentFrequency::Monthly,
            ..Settings::default()
        };
        let expected = 250.0 / (5.0 * WEEKS_PER_MONTH);
        assert!((settings.daily_rent() - expected).abs() < 1e-9);
    }

    #[test]
    fn zero_working_days_yields_zero_rent() {
        let settings = Settings {
            working_days: 0,
            ..Settings::default()
        };
        assert_eq!(settings.daily_rent(), 0.0);
    }

    #[test]
    fn tax_share_follows_configured_rate() {
        let settings = Settings::default();
        assert!((settings.tax_for(100.0) - 25.0).abs() < f64::EPSILON);
        assert_eq!(settings.tax_for(0.0), 0.0);
    }

    #[test]
    fn rent_frequency_parses_common_spellings() {
        assert_eq!(RentFrequency::parse("Weekly"), Some(RentFrequency::Weekly));
        assert_eq!(RentFrequency::parse("month"), Some(RentFrequency::Monthly));
        assert_eq!(RentFrequency::parse("fortnightly"), None);
    }
}
