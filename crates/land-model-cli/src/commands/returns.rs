use clap::Args;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use land_model_core::alternatives::calc_alternative_returns;
use land_model_core::plot::{FinancingTerms, PlotSnapshot};
use land_model_core::rates::{ZoningStage, DEFAULT_HOLDING_YEARS, SENSITIVITY_YEARS};
use land_model_core::sensitivity::build_sensitivity_table;

use super::{FinancingArgs, PlotArgs};
use crate::input;

/// JSON shape accepted by `sensitivity`
#[derive(Debug, Serialize, Deserialize)]
pub struct SensitivityInput {
    pub plot: PlotSnapshot,
    #[serde(default)]
    pub projected_value: Option<Decimal>,
    #[serde(default)]
    pub target_stage: Option<ZoningStage>,
    #[serde(default)]
    pub years: Option<Vec<u32>>,
    #[serde(default)]
    pub financing: Option<FinancingTerms>,
}

/// Arguments for the holding-period sensitivity table
#[derive(Args)]
pub struct SensitivityArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub plot: PlotArgs,

    /// Expected sale price
    #[arg(long)]
    pub projected_value: Option<Decimal>,

    /// Stage used to project the sale price when none is given (default building_permit)
    #[arg(long)]
    pub target_stage: Option<ZoningStage>,

    /// Holding periods (comma-separated, default "3,5,7,10,15")
    #[arg(long, value_delimiter = ',')]
    pub years: Option<Vec<u32>>,

    #[command(flatten)]
    pub financing: FinancingArgs,
}

pub fn run_sensitivity(args: SensitivityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let s_input: SensitivityInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        SensitivityInput {
            plot: args.plot.to_snapshot()?,
            projected_value: args.projected_value,
            target_stage: args.target_stage,
            years: args.years,
            financing: args.financing.to_terms(),
        }
    };

    let projected_value = s_input.projected_value.unwrap_or_else(|| {
        s_input
            .plot
            .projected_value(s_input.target_stage.unwrap_or(ZoningStage::BuildingPermit))
    });
    let years = s_input.years.as_deref().unwrap_or(&SENSITIVITY_YEARS);
    let rows = build_sensitivity_table(
        &s_input.plot,
        projected_value,
        years,
        s_input.financing.as_ref(),
    );

    Ok(json!({
        "result": rows,
        "methodology": "Independent hold-and-sell scenarios per holding period",
        "warnings": [],
    }))
}

/// Arguments for the land vs. equities vs. bank deposit comparison
#[derive(Args)]
pub struct AlternativesArgs {
    /// Purchase price
    #[arg(long)]
    pub price: Decimal,

    /// Net profit of the plot after all costs
    #[arg(long, allow_hyphen_values = true)]
    pub net_profit: Decimal,

    /// Holding period in years (default 5)
    #[arg(long)]
    pub years: Option<u32>,
}

pub fn run_alternatives(args: AlternativesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let years = args.years.unwrap_or(DEFAULT_HOLDING_YEARS);
    let alternatives = calc_alternative_returns(args.price, args.net_profit, years);
    let mut warnings: Vec<String> = Vec::new();
    if alternatives.is_empty() {
        warnings.push("Price and years must both be positive".to_string());
    }

    Ok(json!({
        "result": alternatives,
        "methodology": "Compound growth at fixed benchmark rates vs. realised land outcome",
        "warnings": warnings,
    }))
}
