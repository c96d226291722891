use serde::{Deserialize, Serialize};

use super::simulation::{DEFAULT_MEAN_RETURN, DEFAULT_VOLATILITY};
use crate::errors::CoreError;

/// Default number of Monte Carlo trials.
pub const DEFAULT_TRIALS: usize = 1000;

/// Upper bound on configured Monte Carlo trials.
pub const MAX_TRIALS: usize = 1_000_000;

/// Default flat tax rate applied to harvestable losses.
pub const DEFAULT_TAX_RATE: f64 = 0.20;

/// Default `variance / mean` ceiling for a group to count as recurring.
pub const DEFAULT_DISPERSION_THRESHOLD: f64 = 0.1;

/// Default |z| above which a transaction is anomalous.
pub const DEFAULT_ANOMALY_THRESHOLD: f64 = 2.0;

/// Default |z| above which an anomaly is high severity.
pub const DEFAULT_HIGH_SEVERITY_THRESHOLD: f64 = 3.0;

/// Tunable thresholds for every analytic, with documented defaults.
/// Missing sections or fields in JSON fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub simulation: SimulationConfig,
    pub tax: TaxConfig,
    pub pattern: PatternConfig,
    pub anomaly: AnomalyConfig,
    pub trend: TrendConfig,
    pub runway: RunwayConfig,
}

impl EngineConfig {
    /// Check every threshold is finite and in range.
    pub fn validate(&self) -> Result<(), CoreError> {
        self.simulation.validate()?;
        self.tax.validate()?;
        self.pattern.validate()?;
        self.anomaly.validate()?;
        self.trend.validate()?;
        self.runway.validate()
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Dump the configuration as pretty JSON.
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize config: {e}")))
    }
}

fn ensure(ok: bool, message: impl FnOnce() -> String) -> Result<(), CoreError> {
    if ok {
        Ok(())
    } else {
        Err(CoreError::InvalidConfig(message()))
    }
}

// ── Monte Carlo ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Independent paths per projection
    pub trials: usize,
    /// Mean return used when the caller does not supply one
    pub default_mean_return: f64,
    /// Volatility used when the caller does not supply one
    pub default_volatility: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            default_mean_return: DEFAULT_MEAN_RETURN,
            default_volatility: DEFAULT_VOLATILITY,
        }
    }
}

impl SimulationConfig {
    fn validate(&self) -> Result<(), CoreError> {
        ensure(self.trials <= MAX_TRIALS, || {
            format!("simulation.trials must be <= {MAX_TRIALS}, got {}", self.trials)
        })?;
        ensure(self.default_mean_return.is_finite(), || {
            format!("simulation.default_mean_return must be finite, got {}", self.default_mean_return)
        })?;
        ensure(
            self.default_volatility.is_finite() && self.default_volatility >= 0.0,
            || format!("simulation.default_volatility must be >= 0, got {}", self.default_volatility),
        )
    }
}

// ── Tax ─────────────────────────────────────────────────────────────

/// Simplified single-rate tax model. The rate does not vary with holding
/// period or jurisdiction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxConfig {
    /// Fraction of a realized loss assumed to come back as tax saved
    pub tax_rate: f64,
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self {
            tax_rate: DEFAULT_TAX_RATE,
        }
    }
}

impl TaxConfig {
    fn validate(&self) -> Result<(), CoreError> {
        ensure((0.0..=1.0).contains(&self.tax_rate), || {
            format!("tax.tax_rate must be within [0, 1], got {}", self.tax_rate)
        })
    }
}

// ── Recurring patterns ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Groups with `variance / mean` at or above this are not recurring
    pub dispersion_threshold: f64,
    /// Average gap (days) below which a pattern is daily
    pub daily_max_days: f64,
    /// ... weekly
    pub weekly_max_days: f64,
    /// ... biweekly
    pub biweekly_max_days: f64,
    /// ... monthly; anything longer is yearly
    pub monthly_max_days: f64,
    /// Maximum patterns reported
    pub max_patterns: usize,
    /// Description prefix length used when a transaction has no merchant
    pub description_key_chars: usize,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            dispersion_threshold: DEFAULT_DISPERSION_THRESHOLD,
            daily_max_days: 2.0,
            weekly_max_days: 10.0,
            biweekly_max_days: 20.0,
            monthly_max_days: 45.0,
            max_patterns: 10,
            description_key_chars: 20,
        }
    }
}

impl PatternConfig {
    fn validate(&self) -> Result<(), CoreError> {
        ensure(
            self.dispersion_threshold.is_finite() && self.dispersion_threshold > 0.0,
            || format!("pattern.dispersion_threshold must be > 0, got {}", self.dispersion_threshold),
        )?;
        let edges = [
            self.daily_max_days,
            self.weekly_max_days,
            self.biweekly_max_days,
            self.monthly_max_days,
        ];
        ensure(
            edges.iter().all(|e| e.is_finite() && *e > 0.0)
                && edges.windows(2).all(|w| w[0] < w[1]),
            || format!("pattern frequency edges must be positive and increasing, got {edges:?}"),
        )?;
        ensure(self.description_key_chars > 0, || {
            "pattern.description_key_chars must be > 0".to_string()
        })
    }
}

// ── Anomalies ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnomalyConfig {
    /// |z| strictly above this flags a transaction
    pub threshold: f64,
    /// |z| strictly above this makes it high severity
    pub high_threshold: f64,
    /// Maximum anomalies reported
    pub max_anomalies: usize,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_ANOMALY_THRESHOLD,
            high_threshold: DEFAULT_HIGH_SEVERITY_THRESHOLD,
            max_anomalies: 5,
        }
    }
}

impl AnomalyConfig {
    fn validate(&self) -> Result<(), CoreError> {
        ensure(self.threshold.is_finite() && self.threshold > 0.0, || {
            format!("anomaly.threshold must be > 0, got {}", self.threshold)
        })?;
        ensure(
            self.high_threshold.is_finite() && self.high_threshold >= self.threshold,
            || {
                format!(
                    "anomaly.high_threshold ({}) must be >= anomaly.threshold ({})",
                    self.high_threshold, self.threshold
                )
            },
        )
    }
}

// ── Trends ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// |change %| below this is reported as stable
    pub stable_band_pct: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            stable_band_pct: 5.0,
        }
    }
}

impl TrendConfig {
    fn validate(&self) -> Result<(), CoreError> {
        ensure(
            self.stable_band_pct.is_finite() && self.stable_band_pct >= 0.0,
            || format!("trend.stable_band_pct must be >= 0, got {}", self.stable_band_pct),
        )
    }
}

// ── Runway ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunwayConfig {
    /// Days treated as one month when averaging spend
    pub days_per_month: f64,
    /// Runway above this many months is `Caution`
    pub caution_months: f64,
    /// ... `Secure`
    pub secure_months: f64,
    /// ... `Independent`
    pub independent_months: f64,
}

impl Default for RunwayConfig {
    fn default() -> Self {
        Self {
            days_per_month: 30.0,
            caution_months: 6.0,
            secure_months: 12.0,
            independent_months: 60.0,
        }
    }
}

impl RunwayConfig {
    fn validate(&self) -> Result<(), CoreError> {
        ensure(
            self.days_per_month.is_finite() && self.days_per_month > 0.0,
            || format!("runway.days_per_month must be > 0, got {}", self.days_per_month),
        )?;
        let tiers = [self.caution_months, self.secure_months, self.independent_months];
        ensure(
            tiers.iter().all(|t| t.is_finite() && *t >= 0.0)
                && tiers.windows(2).all(|w| w[0] < w[1]),
            || format!("runway tiers must be non-negative and increasing, got {tiers:?}"),
        )
    }
}
