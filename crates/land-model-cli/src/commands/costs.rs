use clap::Args;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use land_model_core::costs::{calc_annual_holding_costs, calc_exit_costs, calc_transaction_costs};
use land_model_core::plot::PlotSnapshot;
use land_model_core::rates::ZoningStage;
use land_model_core::returns::total_net_profit;

use super::PlotArgs;
use crate::input;

/// JSON shape accepted by `costs`
#[derive(Debug, Serialize, Deserialize)]
pub struct CostsInput {
    pub plot: PlotSnapshot,
    /// Sale price; when absent, the plot's value at `target_stage`
    #[serde(default)]
    pub projected_value: Option<Decimal>,
    #[serde(default)]
    pub target_stage: Option<ZoningStage>,
}

/// Arguments for the acquisition, holding and exit cost breakdown
#[derive(Args)]
pub struct CostsArgs {
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
}

pub fn run_costs(args: CostsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let costs_input: CostsInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        CostsInput {
            plot: args.plot.to_snapshot()?,
            projected_value: args.projected_value,
            target_stage: args.target_stage,
        }
    };

    let plot = &costs_input.plot;
    let holding_years = plot.resolved_holding_years();
    let projected_value = costs_input.projected_value.unwrap_or_else(|| {
        plot.projected_value(
            costs_input
                .target_stage
                .unwrap_or(ZoningStage::BuildingPermit),
        )
    });

    let transaction = calc_transaction_costs(plot.price);
    let holding = calc_annual_holding_costs(plot.price, plot.size_sqm, plot.zoning_stage);
    let cumulative_holding = holding.over_years(holding_years);
    let exit = calc_exit_costs(plot.price, projected_value);
    let net = total_net_profit(&exit, transaction.total, cumulative_holding);

    Ok(json!({
        "result": {
            "projected_value": projected_value,
            "holding_years": holding_years,
            "transaction_costs": transaction,
            "annual_holding_costs": holding,
            "cumulative_holding_costs": cumulative_holding,
            "exit_costs": exit,
            "total_net_profit": net,
        },
        "methodology": "Land plot acquisition, holding and exit costs",
        "warnings": [],
    }))
}
