use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A closed trade reduced to what streak tracking needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeOutcome {
    /// Date the trade was closed
    pub date: NaiveDate,

    /// Realized profit (positive) or loss (negative)
    pub pnl: f64,
}

impl TradeOutcome {
    pub fn new(date: NaiveDate, pnl: f64) -> Self {
        Self { date, pnl }
    }
}
