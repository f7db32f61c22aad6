use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use land_model_core::analysis::{self, PlotAnalysisInput};
use land_model_core::rates::ZoningStage;
use land_model_core::scoring::Proximity;

use super::{FinancingArgs, PlotArgs};
use crate::input;

/// Arguments for the full plot analysis
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub plot: PlotArgs,

    /// Stage the plot is expected to reach before sale (default building_permit)
    #[arg(long)]
    pub target_stage: Option<ZoningStage>,

    /// Projected price per sqm, overriding the stage curve
    #[arg(long)]
    pub price_per_sqm: Option<Decimal>,

    #[command(flatten)]
    pub financing: FinancingArgs,

    /// Holding periods for the sensitivity table (comma-separated, e.g. "3,5,10")
    #[arg(long, value_delimiter = ',')]
    pub years: Option<Vec<u32>>,

    /// Distance to the sea in metres
    #[arg(long)]
    pub sea_m: Option<Decimal>,

    /// Distance to the nearest park in metres
    #[arg(long)]
    pub park_m: Option<Decimal>,

    /// Distance to the nearest hospital in metres
    #[arg(long)]
    pub hospital_m: Option<Decimal>,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let analysis_input: PlotAnalysisInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let mut built = PlotAnalysisInput::new(args.plot.to_snapshot()?);
        built.target_stage = args.target_stage;
        built.projected_price_per_sqm = args.price_per_sqm;
        built.financing = args.financing.to_terms();
        built.sensitivity_years = args.years;
        built.proximity = Proximity {
            sea_distance_m: args.sea_m,
            park_distance_m: args.park_m,
            hospital_distance_m: args.hospital_m,
        };
        built
    };

    let result = analysis::analyze_plot(&analysis_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for side-by-side plot comparison
#[derive(Args)]
pub struct CompareArgs {
    /// Path to JSON file holding an array of plot inputs, or {"plots": [...]}
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let raw: Value = if let Some(ref path) = args.input {
        input::file::read_json_value(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        return Err("--input <file.json> or stdin required for compare".into());
    };

    let plots = match raw {
        Value::Object(mut map) => map
            .remove("plots")
            .ok_or("expected an array of plots or an object with a \"plots\" array")?,
        other => other,
    };
    let inputs: Vec<PlotAnalysisInput> = serde_json::from_value(plots)?;

    let result = analysis::compare_plots(&inputs)?;
    Ok(serde_json::to_value(result)?)
}
