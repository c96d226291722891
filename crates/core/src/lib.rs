pub mod errors;
pub mod models;
pub mod services;

use chrono::NaiveDate;
use models::{
    harvest::HarvestOpportunity,
    holding::Holding,
    pattern::{AnomalyRecord, RecurringPattern},
    period::FiscalYear,
    runway::RunwaySummary,
    settings::EngineConfig,
    simulation::{SimulationParameters, SimulationResult},
    trade::TradeOutcome,
    transaction::Transaction,
    trend::{CategoryTrend, StreakSummary},
};
use services::{
    anomaly_service::AnomalyService,
    pattern_service::PatternService,
    projection_service::ProjectionService,
    random::{RandomSource, SeededRandom},
    runway_service::RunwayService,
    streak_service::StreakService,
    tax_service::TaxService,
    trend_service::TrendService,
};

use errors::CoreError;

/// Main entry point for the analytics engine.
///
/// Holds the configuration and one instance of each service. Every
/// operation is a pure function of its inputs (plus the random source for
/// projections); nothing is cached or persisted between calls.
#[must_use]
pub struct FinanceEngine {
    config: EngineConfig,
    projection_service: ProjectionService,
    tax_service: TaxService,
    pattern_service: PatternService,
    anomaly_service: AnomalyService,
    trend_service: TrendService,
    streak_service: StreakService,
    runway_service: RunwayService,
}

impl std::fmt::Debug for FinanceEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinanceEngine")
            .field("config", &self.config)
            .finish()
    }
}

impl FinanceEngine {
    /// Engine with the default thresholds.
    pub fn new() -> Self {
        Self::build(EngineConfig::default())
    }

    /// Engine with custom thresholds. The configuration is validated first.
    pub fn with_config(config: EngineConfig) -> Result<Self, CoreError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Engine configured from a JSON document (missing fields use defaults).
    pub fn from_json_config(json: &str) -> Result<Self, CoreError> {
        let config = EngineConfig::from_json(json)?;
        Ok(Self::build(config))
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ── Wealth Projection ───────────────────────────────────────────

    /// Simulation parameters using the configured default return model.
    pub fn parameters(
        &self,
        principal: f64,
        monthly_contribution: f64,
        years: f64,
        target_wealth: f64,
    ) -> SimulationParameters {
        SimulationParameters::new(principal, monthly_contribution, years, target_wealth)
            .with_returns(
                self.config.simulation.default_mean_return,
                self.config.simulation.default_volatility,
            )
    }

    /// Run a projection seeded from OS entropy.
    pub fn simulate(&self, params: &SimulationParameters) -> Result<SimulationResult, CoreError> {
        let mut rng = SeededRandom::from_entropy()?;
        Ok(self.projection_service.simulate(params, &mut rng))
    }

    /// Run a reproducible projection: the same seed gives the same result.
    pub fn simulate_seeded(&self, params: &SimulationParameters, seed: u64) -> SimulationResult {
        let mut rng = SeededRandom::new(seed);
        self.projection_service.simulate(params, &mut rng)
    }

    /// Run a projection drawing from a caller-supplied source.
    pub fn simulate_with(
        &self,
        params: &SimulationParameters,
        rng: &mut dyn RandomSource,
    ) -> SimulationResult {
        self.projection_service.simulate(params, rng)
    }

    /// Years until `target` at a constant return; `None` if never reached.
    #[must_use]
    pub fn years_to_target(
        &self,
        current_wealth: f64,
        target: f64,
        monthly_contribution: f64,
        annual_return: f64,
    ) -> Option<f64> {
        self.projection_service
            .years_to_target(current_wealth, target, monthly_contribution, annual_return)
    }

    /// Percent of `target` already reached, capped at 100.
    #[must_use]
    pub fn goal_progress(&self, current_wealth: f64, target: f64) -> f64 {
        self.projection_service.goal_progress(current_wealth, target)
    }

    // ── Tax ─────────────────────────────────────────────────────────

    /// Holdings with harvestable losses, best saving first.
    #[must_use]
    pub fn find_harvest_opportunities(&self, holdings: &[Holding]) -> Vec<HarvestOpportunity> {
        self.tax_service.find_opportunities(holdings)
    }

    /// Total estimated saving across `opportunities`.
    #[must_use]
    pub fn total_potential_saving(&self, opportunities: &[HarvestOpportunity]) -> f64 {
        self.tax_service.total_potential_saving(opportunities)
    }

    // ── Spending ────────────────────────────────────────────────────

    #[must_use]
    pub fn detect_recurring(&self, transactions: &[Transaction]) -> Vec<RecurringPattern> {
        self.pattern_service.detect_recurring(transactions)
    }

    #[must_use]
    pub fn detect_anomalies(&self, transactions: &[Transaction]) -> Vec<AnomalyRecord> {
        self.anomaly_service.detect_anomalies(transactions)
    }

    /// Category spend in `reference_date`'s month against the month before.
    #[must_use]
    pub fn month_over_month(
        &self,
        transactions: &[Transaction],
        reference_date: NaiveDate,
    ) -> Vec<CategoryTrend> {
        self.trend_service.month_over_month(transactions, reference_date)
    }

    /// Month-over-month trends for the current month (UTC).
    #[must_use]
    pub fn month_over_month_today(&self, transactions: &[Transaction]) -> Vec<CategoryTrend> {
        let today = chrono::Utc::now().date_naive();
        self.month_over_month(transactions, today)
    }

    /// Average monthly spend up to `as_of`.
    #[must_use]
    pub fn monthly_burn(&self, transactions: &[Transaction], as_of: NaiveDate) -> f64 {
        self.runway_service.monthly_burn(transactions, as_of)
    }

    /// How long `liquid_assets` last at `monthly_burn`.
    #[must_use]
    pub fn runway(&self, liquid_assets: f64, monthly_burn: f64) -> RunwaySummary {
        self.runway_service.runway(liquid_assets, monthly_burn)
    }

    // ── Trading ─────────────────────────────────────────────────────

    #[must_use]
    pub fn compute_streaks(&self, trades: &[TradeOutcome]) -> StreakSummary {
        self.streak_service.compute_streaks(trades)
    }

    // ── Calendar ────────────────────────────────────────────────────

    /// April-to-March fiscal year containing `date`, shifted by `offset_years`.
    #[must_use]
    pub fn fiscal_year(&self, date: NaiveDate, offset_years: i32) -> Option<FiscalYear> {
        FiscalYear::containing(date, offset_years)
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(config: EngineConfig) -> Self {
        Self {
            projection_service: ProjectionService::new(config.simulation.clone()),
            tax_service: TaxService::new(config.tax.clone()),
            pattern_service: PatternService::new(config.pattern.clone()),
            anomaly_service: AnomalyService::new(config.anomaly.clone()),
            trend_service: TrendService::new(config.trend.clone()),
            streak_service: StreakService::new(),
            runway_service: RunwayService::new(config.runway.clone()),
            config,
        }
    }
}

impl Default for FinanceEngine {
    fn default() -> Self {
        Self::new()
    }
}
