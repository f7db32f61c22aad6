pub mod break_even;
pub mod costs;
pub mod mortgage;
pub mod plot;
pub mod returns;
pub mod score;

use clap::Args;
use rust_decimal::Decimal;

use land_model_core::plot::{FinancingTerms, PlotSnapshot};
use land_model_core::rates::{ReadinessEstimate, ZoningStage};

/// Plot attributes shared by every per-plot command
#[derive(Args, Debug, Clone)]
pub struct PlotArgs {
    /// Purchase price
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Plot area in square metres
    #[arg(long)]
    pub size_sqm: Option<Decimal>,

    /// Current zoning stage (e.g. agricultural, master_plan_approved)
    #[arg(long)]
    pub zoning_stage: Option<ZoningStage>,

    /// Intended holding period in years
    #[arg(long)]
    pub holding_years: Option<u32>,

    /// Readiness bucket used when no holding period is given (1-3, 3-5, 5-10, 10+)
    #[arg(long)]
    pub readiness: Option<ReadinessEstimate>,
}

impl PlotArgs {
    pub fn to_snapshot(&self) -> Result<PlotSnapshot, Box<dyn std::error::Error>> {
        let price = self
            .price
            .ok_or("--price is required (or provide --input)")?;
        let size_sqm = self
            .size_sqm
            .ok_or("--size-sqm is required (or provide --input)")?;
        let mut plot = PlotSnapshot::new(
            price,
            size_sqm,
            self.zoning_stage.unwrap_or(ZoningStage::Agricultural),
        );
        plot.holding_years = self.holding_years;
        plot.readiness_estimate = self.readiness;
        Ok(plot)
    }
}

/// Mortgage flags; financing is modelled only when at least one is given
#[derive(Args, Debug, Clone)]
pub struct FinancingArgs {
    /// Down payment as a percentage of the price (default 30)
    #[arg(long)]
    pub down_payment_pct: Option<Decimal>,

    /// Annual interest rate in percent (default 4.5)
    #[arg(long)]
    pub interest_rate_pct: Option<Decimal>,

    /// Loan term in years (default 15)
    #[arg(long)]
    pub loan_years: Option<u32>,
}

impl FinancingArgs {
    pub fn to_terms(&self) -> Option<FinancingTerms> {
        if self.down_payment_pct.is_none()
            && self.interest_rate_pct.is_none()
            && self.loan_years.is_none()
        {
            return None;
        }
        let defaults = FinancingTerms::default();
        Some(FinancingTerms {
            down_payment_pct: self.down_payment_pct.unwrap_or(defaults.down_payment_pct),
            annual_rate_pct: self.interest_rate_pct.unwrap_or(defaults.annual_rate_pct),
            loan_years: self.loan_years.unwrap_or(defaults.loan_years),
        })
    }
}
