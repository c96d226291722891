use serde::{Deserialize, Serialize};

/// How long liquid assets would cover current spending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunwayState {
    /// Six months or less
    Critical,
    /// More than six months
    Caution,
    /// More than a year
    Secure,
    /// More than five years, or no spending at all
    Independent,
}

impl std::fmt::Display for RunwayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunwayState::Critical => write!(f, "Critical"),
            RunwayState::Caution => write!(f, "Caution"),
            RunwayState::Secure => write!(f, "Secure"),
            RunwayState::Independent => write!(f, "Independent"),
        }
    }
}

/// Burn rate against liquid assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunwaySummary {
    /// Average monthly spend
    pub monthly_burn: f64,

    /// Assets that could be drawn on
    pub liquid_assets: f64,

    /// Months of spending covered; `None` when spending is zero and assets are positive
    pub runway_months: Option<f64>,

    pub state: RunwayState,
}
