use chrono::{Duration, NaiveDate};
use std::collections::HashMap;

use crate::models::pattern::{Frequency, RecurringPattern};
use crate::models::settings::PatternConfig;
use crate::models::transaction::Transaction;

/// Detects recurring payments (subscriptions, rent, SIPs) in a transaction list.
///
/// Transactions are grouped by counterparty. A group of two or more is
/// recurring when its amounts barely move (`variance / mean` under the
/// dispersion threshold); its frequency comes from the average gap between
/// distinct dates. Groups that fail the test are dropped, not downgraded.
pub struct PatternService {
    config: PatternConfig,
}

impl PatternService {
    pub fn new(config: PatternConfig) -> Self {
        Self { config }
    }

    /// Up to `max_patterns` recurring patterns, most observations first.
    /// Equal counts keep the order in which the counterparty first appeared.
    #[must_use]
    pub fn detect_recurring(&self, transactions: &[Transaction]) -> Vec<RecurringPattern> {
        let mut patterns: Vec<RecurringPattern> = self
            .group_by_counterparty(transactions)
            .into_iter()
            .filter(|(_, group)| group.len() >= 2)
            .filter_map(|(key, group)| self.evaluate_group(key, &group))
            .collect();

        patterns.sort_by(|a, b| b.count.cmp(&a.count));
        patterns.truncate(self.config.max_patterns);

        tracing::debug!(
            transactions = transactions.len(),
            patterns = patterns.len(),
            "Recurring pattern scan complete"
        );

        patterns
    }

    /// Map a frequency bucket from an average gap in days.
    #[must_use]
    pub fn classify(&self, average_gap_days: f64) -> Frequency {
        let c = &self.config;
        if average_gap_days < c.daily_max_days {
            Frequency::Daily
        } else if average_gap_days < c.weekly_max_days {
            Frequency::Weekly
        } else if average_gap_days < c.biweekly_max_days {
            Frequency::Biweekly
        } else if average_gap_days < c.monthly_max_days {
            Frequency::Monthly
        } else {
            Frequency::Yearly
        }
    }

    /// Merchant when present, otherwise a prefix of the description.
    fn counterparty_key(&self, txn: &Transaction) -> String {
        match txn.merchant.as_deref().map(str::trim) {
            Some(m) if !m.is_empty() => m.to_string(),
            _ => txn
                .description
                .chars()
                .take(self.config.description_key_chars)
                .collect(),
        }
    }

    /// Groups in first-appearance order.
    fn group_by_counterparty<'a>(
        &self,
        transactions: &'a [Transaction],
    ) -> Vec<(String, Vec<&'a Transaction>)> {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut groups: Vec<(String, Vec<&Transaction>)> = Vec::new();

        for txn in transactions {
            let key = self.counterparty_key(txn);
            match index.get(&key) {
                Some(&i) => groups[i].1.push(txn),
                None => {
                    index.insert(key.clone(), groups.len());
                    groups.push((key, vec![txn]));
                }
            }
        }

        groups
    }

    fn evaluate_group(&self, merchant: String, group: &[&Transaction]) -> Option<RecurringPattern> {
        let n = group.len() as f64;
        let mean = group.iter().map(|t| t.clean_amount()).sum::<f64>() / n;
        if mean <= 0.0 {
            return None;
        }
        let variance = group
            .iter()
            .map(|t| (t.clean_amount() - mean).powi(2))
            .sum::<f64>()
            / n;
        if variance / mean >= self.config.dispersion_threshold {
            return None;
        }

        let mut dates: Vec<NaiveDate> = group.iter().map(|t| t.date).collect();
        dates.sort_unstable();
        dates.dedup();

        // Dates collapsing to a single day give an average gap of 0.
        let average_gap = if dates.len() < 2 {
            0.0
        } else {
            let total: i64 = dates.windows(2).map(|w| (w[1] - w[0]).num_days()).sum();
            total as f64 / (dates.len() - 1) as f64
        };

        let last_date = *dates.last()?;
        let next_expected = last_date
            .checked_add_signed(Duration::days(average_gap.round() as i64))
            .unwrap_or(last_date);

        Some(RecurringPattern {
            merchant,
            amount: mean,
            frequency: self.classify(average_gap),
            average_interval_days: average_gap,
            last_date,
            next_expected,
            count: group.len(),
        })
    }
}

impl Default for PatternService {
    fn default() -> Self {
        Self::new(PatternConfig::default())
    }
}
