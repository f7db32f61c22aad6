use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::rates::{
    ReadinessEstimate, ZoningStage, DEFAULT_DOWN_PAYMENT_PCT, DEFAULT_HOLDING_YEARS,
    DEFAULT_INTEREST_RATE_PCT, DEFAULT_LOAN_YEARS,
};
use crate::types::{Money, Percent};

/// The raw attributes of a plot every metric is derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSnapshot {
    /// Purchase price
    pub price: Money,
    /// Plot area in square metres
    pub size_sqm: Decimal,
    /// Current planning stage
    pub zoning_stage: ZoningStage,
    /// Coarse time-to-maturity bucket, e.g. "3-5"
    #[serde(
        default,
        deserialize_with = "lenient_readiness",
        skip_serializing_if = "Option::is_none"
    )]
    pub readiness_estimate: Option<ReadinessEstimate>,
    /// Intended holding period in whole years
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holding_years: Option<u32>,
}

impl PlotSnapshot {
    pub fn new(price: Money, size_sqm: Decimal, zoning_stage: ZoningStage) -> Self {
        Self {
            price,
            size_sqm,
            zoning_stage,
            readiness_estimate: None,
            holding_years: None,
        }
    }

    /// Both price and size must be positive for any derived metric.
    pub fn is_computable(&self) -> bool {
        self.price > Decimal::ZERO && self.size_sqm > Decimal::ZERO
    }

    /// Explicit holding period, else the readiness bucket's, else the engine default.
    pub fn resolved_holding_years(&self) -> u32 {
        match self.holding_years {
            Some(years) if years > 0 => years,
            _ => self
                .readiness_estimate
                .map(ReadinessEstimate::default_holding_years)
                .unwrap_or(DEFAULT_HOLDING_YEARS),
        }
    }

    /// `None` when not computable or when the ratio is out of decimal range.
    pub fn price_per_sqm(&self) -> Option<Money> {
        if !self.is_computable() {
            return None;
        }
        self.price.checked_div(self.size_sqm)
    }

    /// Value of the plot once it reaches `target`, at that stage's price per sqm.
    pub fn projected_value(&self, target: ZoningStage) -> Money {
        self.projected_value_at(target.price_per_sqm())
    }

    /// Zero for a non-positive size or price, or when the product overflows.
    pub fn projected_value_at(&self, price_per_sqm: Money) -> Money {
        if self.size_sqm <= Decimal::ZERO || price_per_sqm <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.size_sqm
            .checked_mul(price_per_sqm)
            .unwrap_or(Decimal::ZERO)
    }
}

/// Mortgage parameters as entered in the calculator. Any missing field takes its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancingTerms {
    /// Share of the price paid in cash (30 = 30%)
    pub down_payment_pct: Percent,
    /// Nominal annual interest rate (4.5 = 4.5%)
    pub annual_rate_pct: Percent,
    /// Amortization term in years
    pub loan_years: u32,
}

impl Default for FinancingTerms {
    fn default() -> Self {
        Self {
            down_payment_pct: DEFAULT_DOWN_PAYMENT_PCT,
            annual_rate_pct: DEFAULT_INTEREST_RATE_PCT,
            loan_years: DEFAULT_LOAN_YEARS,
        }
    }
}

/// Unknown or malformed readiness buckets are treated as absent.
fn lenient_readiness<'de, D>(deserializer: D) -> Result<Option<ReadinessEstimate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_holding_years_resolution_order() {
        let mut plot = PlotSnapshot::new(dec!(1000000), dec!(500), ZoningStage::Agricultural);
        assert_eq!(plot.resolved_holding_years(), DEFAULT_HOLDING_YEARS);

        plot.readiness_estimate = Some(ReadinessEstimate::FiveToTen);
        assert_eq!(plot.resolved_holding_years(), 10);

        plot.holding_years = Some(7);
        assert_eq!(plot.resolved_holding_years(), 7);

        plot.holding_years = Some(0);
        assert_eq!(plot.resolved_holding_years(), 10);
    }

    #[test]
    fn test_not_computable_without_size() {
        let plot = PlotSnapshot::new(dec!(1000000), dec!(0), ZoningStage::Agricultural);
        assert!(!plot.is_computable());
        assert_eq!(plot.price_per_sqm(), None);
        assert_eq!(plot.projected_value(ZoningStage::BuildingPermit), Decimal::ZERO);
    }

    #[test]
    fn test_projected_value_from_stage_curve() {
        let plot = PlotSnapshot::new(dec!(2500000), dec!(1000), ZoningStage::Agricultural);
        assert_eq!(plot.projected_value(ZoningStage::BuildingPermit), dec!(6000000));
        assert_eq!(plot.price_per_sqm(), Some(dec!(2500)));
    }

    #[test]
    fn test_extreme_sizes_degrade_instead_of_overflowing() {
        let size = Decimal::from_scientific("1e26").unwrap();
        let huge = PlotSnapshot::new(dec!(2500000), size, ZoningStage::Agricultural);
        assert_eq!(huge.projected_value(ZoningStage::BuildingPermit), Decimal::ZERO);
        assert!(huge.price_per_sqm().is_some());

        let size = Decimal::from_scientific("1e-27").unwrap();
        let tiny = PlotSnapshot::new(dec!(2500000), size, ZoningStage::Agricultural);
        assert!(tiny.is_computable());
        assert_eq!(tiny.price_per_sqm(), None);
    }

    #[test]
    fn test_snapshot_tolerates_missing_and_unknown_fields() {
        let json = r#"{
            "price": "800000",
            "size_sqm": "400",
            "zoning_stage": "master_plan_approved",
            "readiness_estimate": "someday"
        }"#;
        let plot: PlotSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(plot.readiness_estimate, None);
        assert_eq!(plot.holding_years, None);
        assert_eq!(plot.resolved_holding_years(), DEFAULT_HOLDING_YEARS);
    }

    #[test]
    fn test_readiness_bucket_deserializes() {
        let json = r#"{"price": 1, "size_sqm": 1, "zoning_stage": "agricultural", "readiness_estimate": "3-5"}"#;
        let plot: PlotSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(plot.readiness_estimate, Some(ReadinessEstimate::ThreeToFive));
    }

    #[test]
    fn test_financing_partial_defaults() {
        let terms: FinancingTerms = serde_json::from_str(r#"{"annual_rate_pct": "5.2"}"#).unwrap();
        assert_eq!(terms.annual_rate_pct, dec!(5.2));
        assert_eq!(terms.down_payment_pct, dec!(30));
        assert_eq!(terms.loan_years, 15);
    }
}
