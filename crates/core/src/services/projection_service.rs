use crate::models::settings::{SimulationConfig, MAX_TRIALS};
use crate::models::simulation::{Percentiles, SimulationParameters, SimulationResult};
use crate::services::random::{standard_normal, RandomSource};

const MONTHS_PER_YEAR: f64 = 12.0;

/// Long-horizon wealth projection.
///
/// Each trial walks the horizon month by month: the month's return is
/// `mean/12 + (volatility/√12)·z` with `z` standard normal, applied to the
/// wealth before that month's contribution is added. Trials are reduced to
/// p10/p50/p90 final wealth and the share that reached the target.
///
/// Input policy: negative principal, contribution and volatility clamp to 0,
/// a NaN mean return is read as 0, and a NaN target as 0. Wealth is floored at
/// 0 after every month, so no outcome is negative.
pub struct ProjectionService {
    config: SimulationConfig,
}

/// Parameters after clamping.
struct Walk {
    principal: f64,
    contribution: f64,
    months: usize,
    target: f64,
    monthly_mean: f64,
    monthly_volatility: f64,
}

impl ProjectionService {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Trials run per projection.
    #[must_use]
    pub fn trials(&self) -> usize {
        self.config.trials
    }

    /// Run the Monte Carlo projection with draws from `rng`.
    ///
    /// A non-positive or NaN horizon, or a zero trial count, returns the
    /// degenerate result (all percentiles equal to the principal, 0% success).
    pub fn simulate(
        &self,
        params: &SimulationParameters,
        rng: &mut dyn RandomSource,
    ) -> SimulationResult {
        let walk = Self::clamp(params);
        let trials = self.config.trials;

        if walk.months == 0 || trials == 0 {
            tracing::debug!(
                years = params.years,
                trials,
                "Projection skipped: empty horizon or no trials"
            );
            return SimulationResult::degenerate(walk.principal);
        }

        let mut outcomes = Vec::with_capacity(trials.min(MAX_TRIALS));
        let mut successes = 0usize;

        for _ in 0..trials {
            let wealth = Self::run_trial(&walk, rng);
            if wealth >= walk.target {
                successes += 1;
            }
            outcomes.push(wealth);
        }

        outcomes.sort_by(f64::total_cmp);

        let result = SimulationResult {
            percentiles: Percentiles {
                p10: percentile(&outcomes, 0.10),
                p50: percentile(&outcomes, 0.50),
                p90: percentile(&outcomes, 0.90),
            },
            success_probability: successes as f64 / trials as f64 * 100.0,
            trials,
        };

        tracing::debug!(
            trials,
            months = walk.months,
            p50 = result.percentiles.p50,
            success = result.success_probability,
            "Projection complete"
        );

        result
    }

    fn run_trial(walk: &Walk, rng: &mut dyn RandomSource) -> f64 {
        let mut wealth = walk.principal;
        for _ in 0..walk.months {
            let shock = standard_normal(rng);
            let period_return = walk.monthly_mean + walk.monthly_volatility * shock;
            wealth = wealth * (1.0 + period_return) + walk.contribution;
            wealth = if wealth.is_nan() {
                0.0
            } else {
                wealth.clamp(0.0, f64::MAX)
            };
        }
        wealth
    }

    fn clamp(params: &SimulationParameters) -> Walk {
        let principal = non_negative("principal", params.principal);
        let contribution = non_negative("monthly_contribution", params.monthly_contribution);
        let volatility = non_negative("volatility", params.volatility);

        let mean_return = if params.mean_return.is_finite() {
            params.mean_return
        } else {
            tracing::warn!(value = params.mean_return, "Non-finite mean return read as 0");
            0.0
        };

        let target = if params.target_wealth.is_nan() {
            tracing::warn!("NaN target wealth read as 0");
            0.0
        } else {
            params.target_wealth
        };

        let months = if params.years.is_finite() && params.years > 0.0 {
            (params.years * MONTHS_PER_YEAR).ceil() as usize
        } else {
            0
        };

        Walk {
            principal,
            contribution,
            months,
            target,
            monthly_mean: mean_return / MONTHS_PER_YEAR,
            monthly_volatility: volatility / MONTHS_PER_YEAR.sqrt(),
        }
    }

    /// Months until `target` is reached under a constant annual return with
    /// monthly compounding and end-of-month contributions, in years.
    ///
    /// `Some(0.0)` if already there; `None` if the target is never reached.
    #[must_use]
    pub fn years_to_target(
        &self,
        current_wealth: f64,
        target: f64,
        monthly_contribution: f64,
        annual_return: f64,
    ) -> Option<f64> {
        let values = [current_wealth, target, monthly_contribution, annual_return];
        if values.iter().any(|v| !v.is_finite()) {
            return None;
        }
        let wealth = current_wealth.max(0.0);
        let contribution = monthly_contribution.max(0.0);
        if wealth >= target {
            return Some(0.0);
        }

        let r = annual_return / MONTHS_PER_YEAR;
        let months = if r.abs() < f64::EPSILON {
            if contribution <= 0.0 {
                return None;
            }
            (target - wealth) / contribution
        } else {
            // Closed form of W(n) = W·(1+r)^n + C·((1+r)^n - 1)/r solved for n.
            let numerator = target * r + contribution;
            let denominator = wealth * r + contribution;
            if r <= -1.0 || denominator <= 0.0 || numerator / denominator <= 0.0 {
                return None;
            }
            let n = (numerator / denominator).ln() / (1.0 + r).ln();
            if !n.is_finite() || n < 0.0 {
                return None;
            }
            n
        };

        Some(months / MONTHS_PER_YEAR)
    }

    /// Progress toward `target` in percent, capped at 100.
    #[must_use]
    pub fn goal_progress(&self, current_wealth: f64, target: f64) -> f64 {
        if !target.is_finite() || target <= 0.0 || !current_wealth.is_finite() {
            return 0.0;
        }
        (current_wealth / target * 100.0).clamp(0.0, 100.0)
    }
}

impl Default for ProjectionService {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

fn non_negative(field: &str, value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        tracing::warn!(field, value, "Clamping invalid simulation input to 0");
        0.0
    }
}

/// Value at index `floor(n·q)` of an ascending slice, clamped to the last index.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let idx = ((sorted.len() as f64 * q).floor() as usize).min(sorted.len() - 1);
    sorted[idx]
}
