use crate::models::harvest::HarvestOpportunity;
use crate::models::holding::Holding;
use crate::models::settings::TaxConfig;

/// Finds tax-loss harvesting opportunities in a list of holdings.
///
/// A holding qualifies when its current value is below what was invested.
/// The saving is `loss × tax_rate` with one flat rate for every holding;
/// holding period is reported but does not change the estimate.
///
/// Pure read: holdings are never modified or marked as harvested.
pub struct TaxService {
    config: TaxConfig,
}

impl TaxService {
    pub fn new(config: TaxConfig) -> Self {
        Self { config }
    }

    /// All holdings with an unrealized loss, ordered by descending tax saving,
    /// then descending loss, then input order.
    ///
    /// Holdings with a non-positive invested amount are skipped.
    #[must_use]
    pub fn find_opportunities(&self, holdings: &[Holding]) -> Vec<HarvestOpportunity> {
        let mut opportunities: Vec<HarvestOpportunity> = holdings
            .iter()
            .filter(|h| h.invested_amount.is_finite() && h.invested_amount > 0.0)
            .filter_map(|h| {
                let loss = h.unrealized_loss()?;
                Some(HarvestOpportunity {
                    holding_id: h.id,
                    name: h.name.clone(),
                    unrealized_loss: loss,
                    loss_pct: loss / h.invested_amount * 100.0,
                    potential_tax_saving: loss * self.config.tax_rate,
                    holding_period: h.holding_period,
                })
            })
            .collect();

        // Stable sort keeps input order for full ties.
        opportunities.sort_by(|a, b| {
            b.potential_tax_saving
                .total_cmp(&a.potential_tax_saving)
                .then_with(|| b.unrealized_loss.total_cmp(&a.unrealized_loss))
        });

        tracing::debug!(
            holdings = holdings.len(),
            opportunities = opportunities.len(),
            "Harvest scan complete"
        );

        opportunities
    }

    /// Sum of the estimated savings across `opportunities`.
    #[must_use]
    pub fn total_potential_saving(&self, opportunities: &[HarvestOpportunity]) -> f64 {
        opportunities.iter().map(|o| o.potential_tax_saving).sum()
    }
}

impl Default for TaxService {
    fn default() -> Self {
        Self::new(TaxConfig::default())
    }
}
