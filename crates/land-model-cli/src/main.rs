mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::break_even::BreakEvenArgs;
use commands::costs::CostsArgs;
use commands::mortgage::MortgageArgs;
use commands::plot::{AnalyzeArgs, CompareArgs};
use commands::returns::{AlternativesArgs, SensitivityArgs};
use commands::score::ScoreArgs;

/// Land plot investment calculator
#[derive(Parser)]
#[command(
    name = "landcalc",
    version,
    about = "Land plot investment calculator",
    long_about = "A CLI for modelling land plot investments with decimal precision. \
                  Covers acquisition, holding and exit costs, mortgage financing, \
                  returns, break-even sale price, holding-period sensitivity and \
                  investment scoring."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Full analysis of one plot (costs, returns, break-even, sensitivity, score)
    Analyze(AnalyzeArgs),
    /// Compare several plots side by side
    Compare(CompareArgs),
    /// Acquisition, holding and exit cost breakdown
    Costs(CostsArgs),
    /// Fixed-rate mortgage payment and totals
    Mortgage(MortgageArgs),
    /// Minimum sale price that recovers every cost
    BreakEven(BreakEvenArgs),
    /// Returns across candidate holding periods
    Sensitivity(SensitivityArgs),
    /// Land vs. equities vs. bank deposit
    Alternatives(AlternativesArgs),
    /// Investment score (0-10) and verdict
    Score(ScoreArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::plot::run_analyze(args),
        Commands::Compare(args) => commands::plot::run_compare(args),
        Commands::Costs(args) => commands::costs::run_costs(args),
        Commands::Mortgage(args) => commands::mortgage::run_mortgage(args),
        Commands::BreakEven(args) => commands::break_even::run_break_even(args),
        Commands::Sensitivity(args) => commands::returns::run_sensitivity(args),
        Commands::Alternatives(args) => commands::returns::run_alternatives(args),
        Commands::Score(args) => commands::score::run_score(args),
        Commands::Version => {
            println!("landcalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
