use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::rates::{ZoningStage, MANAGEMENT_FEE_ANNUAL, OPPORTUNITY_COST_RATE};
use crate::types::Money;

/// Recurring yearly carrying costs of an undeveloped plot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnualHoldingCosts {
    /// Municipal property tax for the whole plot
    pub arnona: Money,
    pub arnona_per_sqm: Money,
    pub management: Money,
    /// Return forgone on the purchase capital. Informational, not a cash outflow.
    pub opportunity_cost: Money,
    /// arnona + management
    pub total_annual: Money,
}

impl AnnualHoldingCosts {
    /// Cash holding cost accumulated over `years`. Zero if the total overflows.
    pub fn over_years(&self, years: u32) -> Money {
        self.total_annual
            .checked_mul(Decimal::from(years))
            .unwrap_or(Decimal::ZERO)
    }
}

/// Yearly holding costs. All zero unless both price and size are positive
/// and the arnona bill fits in decimal range.
pub fn calc_annual_holding_costs(
    price: Money,
    size_sqm: Decimal,
    zoning_stage: ZoningStage,
) -> AnnualHoldingCosts {
    if price <= Decimal::ZERO || size_sqm <= Decimal::ZERO {
        return AnnualHoldingCosts::default();
    }

    let arnona_per_sqm = zoning_stage.arnona_per_sqm();
    let arnona = match arnona_per_sqm.checked_mul(size_sqm) {
        Some(a) => a,
        None => return AnnualHoldingCosts::default(),
    };
    let management = MANAGEMENT_FEE_ANNUAL;

    AnnualHoldingCosts {
        arnona,
        arnona_per_sqm,
        management,
        opportunity_cost: price * OPPORTUNITY_COST_RATE,
        total_annual: arnona + management,
    }
}
