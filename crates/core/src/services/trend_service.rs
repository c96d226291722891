use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::models::period::CalendarMonth;
use crate::models::settings::TrendConfig;
use crate::models::transaction::Transaction;
use crate::models::trend::{CategoryTrend, TrendDirection};

/// Compares spending per category between the reference month and the month before.
///
/// Only debits that are not excluded count.
pub struct TrendService {
    config: TrendConfig,
}

#[derive(Default)]
struct MonthTotals {
    current: f64,
    previous: f64,
}

impl TrendService {
    pub fn new(config: TrendConfig) -> Self {
        Self { config }
    }

    /// One trend per category seen in either month, largest |change %| first
    /// (ties by category name).
    #[must_use]
    pub fn month_over_month(
        &self,
        transactions: &[Transaction],
        reference_date: NaiveDate,
    ) -> Vec<CategoryTrend> {
        let current_month = CalendarMonth::of(reference_date);
        let previous_month = current_month.previous();

        let mut totals: BTreeMap<&str, MonthTotals> = BTreeMap::new();
        for txn in transactions.iter().filter(|t| t.is_spend()) {
            if current_month.contains(txn.date) {
                totals.entry(txn.category.as_str()).or_default().current += txn.clean_amount();
            } else if previous_month.contains(txn.date) {
                totals.entry(txn.category.as_str()).or_default().previous += txn.clean_amount();
            }
        }

        let mut trends: Vec<CategoryTrend> = totals
            .into_iter()
            .map(|(category, t)| self.trend_for(category, t.current, t.previous))
            .collect();

        trends.sort_by(|a, b| b.change_percent.abs().total_cmp(&a.change_percent.abs()));

        tracing::debug!(
            month = %current_month,
            categories = trends.len(),
            "Month-over-month trends computed"
        );

        trends
    }

    fn trend_for(&self, category: &str, current: f64, previous: f64) -> CategoryTrend {
        let change = current - previous;
        let change_percent = if previous > 0.0 {
            change / previous * 100.0
        } else if current > 0.0 {
            100.0
        } else {
            0.0
        };

        let trend = if change_percent.abs() < self.config.stable_band_pct {
            TrendDirection::Stable
        } else if change > 0.0 {
            TrendDirection::Up
        } else {
            TrendDirection::Down
        };

        CategoryTrend {
            category: category.to_string(),
            current_amount: current,
            previous_amount: previous,
            change,
            change_percent,
            trend,
        }
    }
}

impl Default for TrendService {
    fn default() -> Self {
        Self::new(TrendConfig::default())
    }
}
