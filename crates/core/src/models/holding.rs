use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How long a holding has been held, as the caller classifies it.
///
/// Carried through to harvest opportunities for display only: the tax
/// estimate uses a single flat rate regardless of period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HoldingPeriod {
    /// Held for less than the long-term threshold
    #[default]
    ShortTerm,
    /// Held long enough for long-term treatment
    LongTerm,
}

impl std::fmt::Display for HoldingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HoldingPeriod::ShortTerm => write!(f, "Short-term"),
            HoldingPeriod::LongTerm => write!(f, "Long-term"),
        }
    }
}

/// A single investment position as supplied by the caller.
///
/// `invested_amount` and `current_value` are independent; a current value
/// below the invested amount is an unrealized loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Unique identifier
    pub id: Uuid,

    /// Display name (e.g., "Nifty 50 Index Fund")
    pub name: String,

    /// Total amount put into the position
    pub invested_amount: f64,

    /// Market value of the position today (price supplied by the caller)
    pub current_value: f64,

    /// Short- or long-term holding
    #[serde(default)]
    pub holding_period: HoldingPeriod,
}

impl Holding {
    pub fn new(name: impl Into<String>, invested_amount: f64, current_value: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            invested_amount,
            current_value,
            holding_period: HoldingPeriod::ShortTerm,
        }
    }

    /// Builder-style setter for the holding period.
    pub fn with_period(mut self, holding_period: HoldingPeriod) -> Self {
        self.holding_period = holding_period;
        self
    }

    /// `invested_amount - current_value` when positive, otherwise `None`.
    #[must_use]
    pub fn unrealized_loss(&self) -> Option<f64> {
        let loss = self.invested_amount - self.current_value;
        (loss.is_finite() && loss > 0.0).then_some(loss)
    }
}
