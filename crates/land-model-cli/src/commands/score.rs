use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use land_model_core::rates::ZoningStage;
use land_model_core::scoring::{
    calc_investment_score, investment_verdict, score_label, Proximity, ScoreInput,
};

use crate::input;

/// Arguments for the investment score and verdict
#[derive(Args)]
pub struct ScoreArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Gross ROI in percent
    #[arg(long, allow_hyphen_values = true)]
    pub roi_pct: Option<Decimal>,

    /// Current zoning stage
    #[arg(long)]
    pub zoning_stage: Option<ZoningStage>,

    /// Distance to the sea in metres
    #[arg(long)]
    pub sea_m: Option<Decimal>,

    /// Distance to the nearest park in metres
    #[arg(long)]
    pub park_m: Option<Decimal>,

    /// Distance to the nearest hospital in metres
    #[arg(long)]
    pub hospital_m: Option<Decimal>,

    /// Scores of comparable plots (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub peer_scores: Option<Vec<Decimal>>,
}

pub fn run_score(args: ScoreArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (score_input, peers): (ScoreInput, Vec<Decimal>) = if let Some(ref path) = args.input {
        let raw = input::file::read_json_value(path)?;
        split_peers(raw)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        split_peers(data)?
    } else {
        let roi_pct = args
            .roi_pct
            .ok_or("--roi-pct is required (or provide --input)")?;
        let zoning_stage = args
            .zoning_stage
            .ok_or("--zoning-stage is required (or provide --input)")?;
        (
            ScoreInput {
                roi_pct,
                zoning_stage,
                proximity: Proximity {
                    sea_distance_m: args.sea_m,
                    park_distance_m: args.park_m,
                    hospital_distance_m: args.hospital_m,
                },
            },
            args.peer_scores.unwrap_or_default(),
        )
    };

    let score = calc_investment_score(&score_input);
    let verdict = investment_verdict(score, &peers);

    Ok(json!({
        "result": {
            "score": score,
            "label": score_label(score),
            "verdict": verdict,
        },
        "methodology": "0.6 x ROI component + 0.4 x zoning progress + proximity bonus (0-10)",
        "warnings": [],
    }))
}

/// A score input object with an optional `peer_scores` array alongside it.
fn split_peers(mut raw: Value) -> Result<(ScoreInput, Vec<Decimal>), Box<dyn std::error::Error>> {
    let peers = match raw.as_object_mut().and_then(|m| m.remove("peer_scores")) {
        Some(v) => serde_json::from_value(v)?,
        None => Vec::new(),
    };
    Ok((serde_json::from_value(raw)?, peers))
}
