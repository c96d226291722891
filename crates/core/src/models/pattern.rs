use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::transaction::Transaction;

/// How often a recurring payment occurs, bucketed by average gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    Yearly,
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Frequency::Daily => write!(f, "daily"),
            Frequency::Weekly => write!(f, "weekly"),
            Frequency::Biweekly => write!(f, "biweekly"),
            Frequency::Monthly => write!(f, "monthly"),
            Frequency::Yearly => write!(f, "yearly"),
        }
    }
}

/// A payment to the same counterparty at a stable amount and interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringPattern {
    /// Grouping key: merchant, or truncated description
    pub merchant: String,

    /// Mean amount across observations
    pub amount: f64,

    pub frequency: Frequency,

    /// Average gap between distinct dates, in days
    pub average_interval_days: f64,

    pub last_date: NaiveDate,

    /// `last_date` plus the average gap
    pub next_expected: NaiveDate,

    /// Number of observations (always ≥ 2)
    pub count: usize,
}

/// How far out of line an anomalous transaction is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

/// A transaction whose amount is far from its category's norm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyRecord {
    pub transaction: Transaction,

    /// Signed distance from the category mean, in standard deviations
    pub deviation: f64,

    pub severity: Severity,

    /// Human-readable explanation
    pub reason: String,
}
