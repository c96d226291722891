use chrono::NaiveDate;

use crate::models::runway::{RunwayState, RunwaySummary};
use crate::models::settings::RunwayConfig;
use crate::models::transaction::Transaction;

/// Burn rate and how long liquid assets would last at that rate.
pub struct RunwayService {
    config: RunwayConfig,
}

impl RunwayService {
    pub fn new(config: RunwayConfig) -> Self {
        Self { config }
    }

    /// Average monthly spend from the earliest counted debit up to `as_of`.
    ///
    /// Excluded transactions, credits and anything dated after `as_of` are
    /// ignored. The span is never shorter than one month.
    #[must_use]
    pub fn monthly_burn(&self, transactions: &[Transaction], as_of: NaiveDate) -> f64 {
        let spend: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| t.is_spend() && t.date <= as_of)
            .collect();

        let Some(earliest) = spend.iter().map(|t| t.date).min() else {
            return 0.0;
        };

        let total: f64 = spend.iter().map(|t| t.clean_amount()).sum();
        let months = (as_of - earliest).num_days() as f64 / self.config.days_per_month;
        total / months.max(1.0)
    }

    /// Classify how many months `liquid_assets` cover at `monthly_burn`.
    #[must_use]
    pub fn runway(&self, liquid_assets: f64, monthly_burn: f64) -> RunwaySummary {
        let assets = clean(liquid_assets);
        let burn = clean(monthly_burn);

        let runway_months = if burn > 0.0 {
            Some(assets / burn)
        } else if assets > 0.0 {
            None
        } else {
            Some(0.0)
        };

        let state = match runway_months {
            None => RunwayState::Independent,
            Some(m) if m > self.config.independent_months => RunwayState::Independent,
            Some(m) if m > self.config.secure_months => RunwayState::Secure,
            Some(m) if m > self.config.caution_months => RunwayState::Caution,
            Some(_) => RunwayState::Critical,
        };

        RunwaySummary {
            monthly_burn: burn,
            liquid_assets: assets,
            runway_months,
            state,
        }
    }
}

impl Default for RunwayService {
    fn default() -> Self {
        Self::new(RunwayConfig::default())
    }
}

fn clean(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}
