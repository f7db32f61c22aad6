use clap::Args;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use land_model_core::break_even::{break_even_for_plot, SolverConfig};
use land_model_core::plot::PlotSnapshot;

use super::PlotArgs;
use crate::input;

/// JSON shape accepted by `break-even`
#[derive(Debug, Serialize, Deserialize)]
pub struct BreakEvenInput {
    pub plot: PlotSnapshot,
    #[serde(default)]
    pub solver: SolverConfig,
    /// Fail instead of returning an unconverged estimate
    #[serde(default)]
    pub strict: bool,
}

/// Arguments for the break-even sale price
#[derive(Args)]
pub struct BreakEvenArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub plot: PlotArgs,

    /// Iteration budget for the solver
    #[arg(long)]
    pub max_iterations: Option<u32>,

    /// Largest acceptable net profit at the returned price
    #[arg(long)]
    pub tolerance: Option<Decimal>,

    /// Exit with an error when the solver does not converge
    #[arg(long)]
    pub strict: bool,
}

pub fn run_break_even(args: BreakEvenArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let be_input: BreakEvenInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let defaults = SolverConfig::default();
        BreakEvenInput {
            plot: args.plot.to_snapshot()?,
            solver: SolverConfig {
                max_iterations: args.max_iterations.unwrap_or(defaults.max_iterations),
                tolerance: args.tolerance.unwrap_or(defaults.tolerance),
                ..defaults
            },
            strict: args.strict,
        }
    };

    be_input.solver.validate()?;
    let holding_years = be_input.plot.resolved_holding_years();
    let mut result = break_even_for_plot(&be_input.plot, holding_years, &be_input.solver);
    if be_input.strict {
        result = result.require_converged()?;
    }

    let mut warnings: Vec<String> = Vec::new();
    if !be_input.plot.is_computable() {
        warnings.push("Price and size must both be positive".into());
    } else if !result.converged {
        warnings.push(format!(
            "Did not converge after {} iterations; returning the last estimate",
            result.iterations
        ));
    }

    Ok(json!({
        "result": result,
        "methodology": "Damped fixed-point search for the zero-profit sale price",
        "assumptions": { "holding_years": holding_years, "solver": be_input.solver },
        "warnings": warnings,
    }))
}
