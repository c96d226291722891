use serde::{Deserialize, Serialize};

/// Default expected annual return (long-run broad index average).
pub const DEFAULT_MEAN_RETURN: f64 = 0.12;

/// Default annual volatility (standard deviation of annual returns).
pub const DEFAULT_VOLATILITY: f64 = 0.15;

/// Inputs to a wealth projection, as entered on the goal form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Wealth at the start of the projection
    pub principal: f64,

    /// Amount added at the end of every month
    pub monthly_contribution: f64,

    /// Projection horizon in years (fractional years round up to whole months)
    pub years: f64,

    /// Wealth the goal is considered met at
    pub target_wealth: f64,

    /// Expected annual mean return (0.12 = 12%)
    #[serde(default = "default_mean_return")]
    pub mean_return: f64,

    /// Annual volatility (0.15 = 15%)
    #[serde(default = "default_volatility")]
    pub volatility: f64,
}

fn default_mean_return() -> f64 {
    DEFAULT_MEAN_RETURN
}

fn default_volatility() -> f64 {
    DEFAULT_VOLATILITY
}

impl SimulationParameters {
    /// Parameters with the default mean return and volatility.
    pub fn new(principal: f64, monthly_contribution: f64, years: f64, target_wealth: f64) -> Self {
        Self {
            principal,
            monthly_contribution,
            years,
            target_wealth,
            mean_return: DEFAULT_MEAN_RETURN,
            volatility: DEFAULT_VOLATILITY,
        }
    }

    /// Builder-style override of the return model.
    pub fn with_returns(mut self, mean_return: f64, volatility: f64) -> Self {
        self.mean_return = mean_return;
        self.volatility = volatility;
        self
    }
}

/// Pessimistic / median / optimistic final wealth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Percentiles {
    pub p10: f64,
    pub p50: f64,
    pub p90: f64,
}

/// Outcome of a Monte Carlo projection. Recomputed on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Final wealth at the 10th/50th/90th percentile (p10 ≤ p50 ≤ p90)
    pub percentiles: Percentiles,

    /// Share of trials ending at or above the target, in [0, 100]
    pub success_probability: f64,

    /// Number of trials actually run (0 for degenerate input)
    pub trials: usize,
}

impl SimulationResult {
    /// Result for a projection that could not run: every percentile is the
    /// starting principal and nothing succeeded.
    pub fn degenerate(principal: f64) -> Self {
        Self {
            percentiles: Percentiles {
                p10: principal,
                p50: principal,
                p90: principal,
            },
            success_probability: 0.0,
            trials: 0,
        }
    }
}
