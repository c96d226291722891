use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::holding::HoldingPeriod;

/// A holding whose unrealized loss could be realized to offset gains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestOpportunity {
    /// The holding this refers to
    pub holding_id: Uuid,

    /// Holding display name
    pub name: String,

    /// invested - current (always > 0)
    pub unrealized_loss: f64,

    /// Loss as a percentage of the invested amount
    pub loss_pct: f64,

    /// Flat-rate estimate of tax saved by realizing the loss
    pub potential_tax_saving: f64,

    /// Period classification copied from the holding
    pub holding_period: HoldingPeriod,
}
