//! Fixed fiscal rate table, zoning-stage price curve and engine defaults.
//!
//! Every cost and return function reads its rates from here. Nothing else in
//! the crate spells out a tax percentage.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LandModelError;
use crate::types::{Money, Rate};

// ---------------------------------------------------------------------------
// Acquisition
// ---------------------------------------------------------------------------

/// Purchase tax on the full price.
pub const PURCHASE_TAX_RATE: Rate = dec!(0.06);
/// Attorney fees (incl. VAT) on the full price.
pub const ATTORNEY_FEE_RATE: Rate = dec!(0.0175);
/// Flat appraiser fee per transaction.
pub const APPRAISER_FEE: Money = dec!(3500);
/// Flat land-registry fee per transaction.
pub const REGISTRATION_FEE: Money = dec!(500);

// ---------------------------------------------------------------------------
// Disposal
// ---------------------------------------------------------------------------

/// Betterment levy on gross appreciation.
pub const BETTERMENT_LEVY_RATE: Rate = dec!(0.50);
/// Capital gains tax on appreciation net of levy and entry costs.
pub const CAPITAL_GAINS_TAX_RATE: Rate = dec!(0.25);
/// Agent commission on the sale price.
pub const AGENT_COMMISSION_RATE: Rate = dec!(0.01);

// ---------------------------------------------------------------------------
// Holding
// ---------------------------------------------------------------------------

/// Flat yearly management fee.
pub const MANAGEMENT_FEE_ANNUAL: Money = dec!(1200);
/// Yearly return forgone on the capital tied up in the plot.
pub const OPPORTUNITY_COST_RATE: Rate = dec!(0.08);

// ---------------------------------------------------------------------------
// Macro assumptions and benchmarks
// ---------------------------------------------------------------------------

pub const INFLATION_RATE: Rate = dec!(0.03);
pub const EQUITIES_RETURN_RATE: Rate = dec!(0.09);
pub const BANK_DEPOSIT_RATE: Rate = dec!(0.045);

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_HOLDING_YEARS: u32 = 5;
pub const DEFAULT_DOWN_PAYMENT_PCT: Decimal = dec!(30);
pub const DEFAULT_INTEREST_RATE_PCT: Decimal = dec!(4.5);
pub const DEFAULT_LOAN_YEARS: u32 = 15;
/// Longest loan term the amortization engine accepts; longer terms are not computable.
pub const MAX_LOAN_YEARS: u32 = 50;

/// Candidate holding periods for the sensitivity table.
pub const SENSITIVITY_YEARS: [u32; 5] = [3, 5, 7, 10, 15];

// ---------------------------------------------------------------------------
// Zoning stages
// ---------------------------------------------------------------------------

/// Position of a plot in the planning pipeline, earliest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoningStage {
    Agricultural,
    MasterPlanDeposited,
    MasterPlanApproved,
    DetailedPlanPreparation,
    DetailedPlanDeposited,
    DetailedPlanApproved,
    DeveloperTender,
    BuildingPermit,
}

impl ZoningStage {
    pub const ALL: [ZoningStage; 8] = [
        ZoningStage::Agricultural,
        ZoningStage::MasterPlanDeposited,
        ZoningStage::MasterPlanApproved,
        ZoningStage::DetailedPlanPreparation,
        ZoningStage::DetailedPlanDeposited,
        ZoningStage::DetailedPlanApproved,
        ZoningStage::DeveloperTender,
        ZoningStage::BuildingPermit,
    ];

    /// Expected market price per sqm once a plot has reached this stage.
    pub fn price_per_sqm(self) -> Money {
        match self {
            ZoningStage::Agricultural => dec!(150),
            ZoningStage::MasterPlanDeposited => dec!(350),
            ZoningStage::MasterPlanApproved => dec!(700),
            ZoningStage::DetailedPlanPreparation => dec!(1200),
            ZoningStage::DetailedPlanDeposited => dec!(2000),
            ZoningStage::DetailedPlanApproved => dec!(3500),
            ZoningStage::DeveloperTender => dec!(5000),
            ZoningStage::BuildingPermit => dec!(6000),
        }
    }

    /// Yearly arnona (municipal property tax) per sqm. Earlier stages are cheaper.
    pub fn arnona_per_sqm(self) -> Money {
        match self {
            ZoningStage::Agricultural => dec!(0.20),
            ZoningStage::MasterPlanDeposited => dec!(0.25),
            ZoningStage::MasterPlanApproved => dec!(0.35),
            ZoningStage::DetailedPlanPreparation => dec!(0.50),
            ZoningStage::DetailedPlanDeposited => dec!(0.75),
            ZoningStage::DetailedPlanApproved => dec!(1.10),
            ZoningStage::DeveloperTender => dec!(1.60),
            ZoningStage::BuildingPermit => dec!(2.20),
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Fraction of the pipeline completed, 0 for agricultural and 1 for a building permit.
    pub fn progress(self) -> Decimal {
        let last = Self::ALL.len() - 1;
        Decimal::from(self.index() as u64) / Decimal::from(last as u64)
    }

    pub fn next(self) -> Option<ZoningStage> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            ZoningStage::Agricultural => "Agricultural land",
            ZoningStage::MasterPlanDeposited => "Master plan deposited",
            ZoningStage::MasterPlanApproved => "Master plan approved",
            ZoningStage::DetailedPlanPreparation => "Detailed plan in preparation",
            ZoningStage::DetailedPlanDeposited => "Detailed plan deposited",
            ZoningStage::DetailedPlanApproved => "Detailed plan approved",
            ZoningStage::DeveloperTender => "Developer tender",
            ZoningStage::BuildingPermit => "Building permit",
        }
    }

    fn key(self) -> &'static str {
        match self {
            ZoningStage::Agricultural => "agricultural",
            ZoningStage::MasterPlanDeposited => "master_plan_deposited",
            ZoningStage::MasterPlanApproved => "master_plan_approved",
            ZoningStage::DetailedPlanPreparation => "detailed_plan_preparation",
            ZoningStage::DetailedPlanDeposited => "detailed_plan_deposited",
            ZoningStage::DetailedPlanApproved => "detailed_plan_approved",
            ZoningStage::DeveloperTender => "developer_tender",
            ZoningStage::BuildingPermit => "building_permit",
        }
    }
}

impl fmt::Display for ZoningStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ZoningStage {
    type Err = LandModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|stage| stage.key() == wanted)
            .ok_or_else(|| LandModelError::InvalidInput {
                field: "zoning_stage".into(),
                reason: format!("unknown zoning stage '{s}'"),
            })
    }
}

// ---------------------------------------------------------------------------
// Readiness buckets
// ---------------------------------------------------------------------------

/// Coarse time-to-maturity bucket attached to a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadinessEstimate {
    #[serde(rename = "1-3")]
    OneToThree,
    #[serde(rename = "3-5")]
    ThreeToFive,
    #[serde(rename = "5-10")]
    FiveToTen,
    #[serde(rename = "10+")]
    TenPlus,
}

impl ReadinessEstimate {
    /// Holding period assumed when the caller gives none: the bucket's upper bound.
    pub fn default_holding_years(self) -> u32 {
        match self {
            ReadinessEstimate::OneToThree => 3,
            ReadinessEstimate::ThreeToFive => 5,
            ReadinessEstimate::FiveToTen => 10,
            ReadinessEstimate::TenPlus => 15,
        }
    }
}

impl FromStr for ReadinessEstimate {
    type Err = LandModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().replace(' ', "").as_str() {
            "1-3" => Ok(ReadinessEstimate::OneToThree),
            "3-5" => Ok(ReadinessEstimate::ThreeToFive),
            "5-10" => Ok(ReadinessEstimate::FiveToTen),
            "10+" => Ok(ReadinessEstimate::TenPlus),
            other => Err(LandModelError::InvalidInput {
                field: "readiness_estimate".into(),
                reason: format!("unknown readiness bucket '{other}'"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stages_totally_ordered() {
        for pair in ZoningStage::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].price_per_sqm() < pair[1].price_per_sqm());
            assert!(pair[0].arnona_per_sqm() < pair[1].arnona_per_sqm());
        }
    }

    #[test]
    fn test_progress_bounds() {
        assert_eq!(ZoningStage::Agricultural.progress(), Decimal::ZERO);
        assert_eq!(ZoningStage::BuildingPermit.progress(), Decimal::ONE);
    }

    #[test]
    fn test_next_stage() {
        assert_eq!(
            ZoningStage::Agricultural.next(),
            Some(ZoningStage::MasterPlanDeposited)
        );
        assert_eq!(ZoningStage::BuildingPermit.next(), None);
    }

    #[test]
    fn test_stage_from_str() {
        assert_eq!(
            "building_permit".parse::<ZoningStage>().unwrap(),
            ZoningStage::BuildingPermit
        );
        assert_eq!(
            "Master-Plan-Approved".parse::<ZoningStage>().unwrap(),
            ZoningStage::MasterPlanApproved
        );
        assert!("residential".parse::<ZoningStage>().is_err());
    }

    #[test]
    fn test_stage_display_round_trips() {
        for stage in ZoningStage::ALL {
            assert_eq!(stage.to_string().parse::<ZoningStage>().unwrap(), stage);
        }
    }

    #[test]
    fn test_stage_serde_matches_display() {
        let json = serde_json::to_string(&ZoningStage::DetailedPlanDeposited).unwrap();
        assert_eq!(json, "\"detailed_plan_deposited\"");
    }

    #[test]
    fn test_readiness_defaults() {
        assert_eq!("3-5".parse::<ReadinessEstimate>().unwrap().default_holding_years(), 5);
        assert_eq!("10+".parse::<ReadinessEstimate>().unwrap().default_holding_years(), 15);
        assert!("soon".parse::<ReadinessEstimate>().is_err());
    }
}
