use std::collections::HashMap;

use crate::models::pattern::{AnomalyRecord, Severity};
use crate::models::settings::AnomalyConfig;
use crate::models::transaction::Transaction;

/// Relative floor under which a standard deviation counts as zero.
const ZERO_SPREAD_EPSILON: f64 = 1e-9;

/// Share of the category's squared deviations below which the members other
/// than the candidate count as flat.
const FLAT_REMAINDER_RATIO: f64 = 1e-9;

/// Flags transactions whose amount is far out of line with their category.
///
/// Each transaction is scored against its whole category (population mean and
/// standard deviation). A lone outlier among `n` members can score at most
/// `√(n-1)` that way, so when the other members still have a spread of their
/// own the transaction is also scored against them alone and the larger |z|
/// wins.
///
/// Single-member and zero-spread categories never produce anomalies.
pub struct AnomalyService {
    config: AnomalyConfig,
}

/// Running mean and sum of squared deviations (Welford).
#[derive(Default)]
struct CategoryStats {
    count: usize,
    mean: f64,
    m2: f64,
}

impl CategoryStats {
    fn push(&mut self, x: f64) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
    }

    /// Mean and population std of the whole category.
    fn population(&self) -> Option<(f64, f64)> {
        if self.count < 2 {
            return None;
        }
        let std_dev = (self.m2 / self.count as f64).max(0.0).sqrt();
        if std_dev <= ZERO_SPREAD_EPSILON * self.mean.abs().max(1.0) {
            return None;
        }
        Some((self.mean, std_dev))
    }

    /// Mean and population std of the category without `x`, or `None` when
    /// the remaining members are flat.
    fn without(&self, x: f64) -> Option<(f64, f64)> {
        if self.count < 3 {
            return None;
        }
        let rest = (self.count - 1) as f64;
        let mean = (self.count as f64 * self.mean - x) / rest;
        let m2 = self.m2 - (x - self.mean) * (x - mean);
        if m2 <= FLAT_REMAINDER_RATIO * self.m2 {
            return None;
        }
        Some((mean, (m2 / rest).sqrt()))
    }

    /// Larger of the whole-category and leave-one-out z-scores.
    fn deviation(&self, x: f64) -> Option<f64> {
        let (mean, std_dev) = self.population()?;
        let whole = (x - mean) / std_dev;
        Some(match self.without(x) {
            Some((rest_mean, rest_std)) => {
                let rest = (x - rest_mean) / rest_std;
                if rest.abs() > whole.abs() {
                    rest
                } else {
                    whole
                }
            }
            None => whole,
        })
    }
}

impl AnomalyService {
    pub fn new(config: AnomalyConfig) -> Self {
        Self { config }
    }

    /// Up to `max_anomalies` records, largest absolute deviation first.
    #[must_use]
    pub fn detect_anomalies(&self, transactions: &[Transaction]) -> Vec<AnomalyRecord> {
        let mut stats: HashMap<&str, CategoryStats> = HashMap::new();
        for txn in transactions {
            stats
                .entry(txn.category.as_str())
                .or_default()
                .push(txn.clean_amount());
        }

        let mut anomalies: Vec<AnomalyRecord> = transactions
            .iter()
            .filter_map(|txn| {
                let amount = txn.clean_amount();
                let deviation = stats.get(txn.category.as_str())?.deviation(amount)?;
                if deviation.abs() <= self.config.threshold {
                    return None;
                }
                Some(AnomalyRecord {
                    transaction: txn.clone(),
                    deviation,
                    severity: self.severity(deviation),
                    reason: reason(deviation).to_string(),
                })
            })
            .collect();

        anomalies.sort_by(|a, b| b.deviation.abs().total_cmp(&a.deviation.abs()));
        anomalies.truncate(self.config.max_anomalies);

        tracing::debug!(
            transactions = transactions.len(),
            categories = stats.len(),
            anomalies = anomalies.len(),
            "Anomaly scan complete"
        );

        anomalies
    }

    fn severity(&self, deviation: f64) -> Severity {
        if deviation.abs() > self.config.high_threshold {
            Severity::High
        } else {
            Severity::Medium
        }
    }
}

impl Default for AnomalyService {
    fn default() -> Self {
        Self::new(AnomalyConfig::default())
    }
}

fn reason(deviation: f64) -> &'static str {
    if deviation > 0.0 {
        "Unusually high spending"
    } else {
        "Unusually low spending"
    }
}
