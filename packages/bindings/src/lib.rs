use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use land_model_core::break_even::SolverConfig;
use land_model_core::plot::{FinancingTerms, PlotSnapshot};
use land_model_core::rates::ZoningStage;
use land_model_core::scoring::ScoreInput;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse<T: for<'de> Deserialize<'de>>(input_json: &str) -> NapiResult<T> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

fn render<T: Serialize>(output: &T) -> NapiResult<String> {
    serde_json::to_string(output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Inputs for single-purpose calls
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct PriceInput {
    price: Decimal,
}

#[derive(Deserialize)]
struct HoldingInput {
    price: Decimal,
    size_sqm: Decimal,
    zoning_stage: ZoningStage,
    #[serde(default)]
    years: Option<u32>,
}

#[derive(Deserialize)]
struct SaleInput {
    price: Decimal,
    projected_value: Decimal,
    #[serde(default)]
    years: Option<u32>,
}

#[derive(Deserialize)]
struct MortgageInput {
    principal: Decimal,
    annual_rate_pct: Decimal,
    years: u32,
    #[serde(default)]
    schedule: bool,
}

#[derive(Deserialize)]
struct BreakEvenInput {
    plot: PlotSnapshot,
    #[serde(default)]
    holding_years: Option<u32>,
    #[serde(default)]
    solver: SolverConfig,
}

#[derive(Deserialize)]
struct SensitivityInput {
    plot: PlotSnapshot,
    projected_value: Decimal,
    #[serde(default)]
    years: Option<Vec<u32>>,
    #[serde(default)]
    financing: Option<FinancingTerms>,
}

#[derive(Deserialize)]
struct AlternativesInput {
    price: Decimal,
    net_profit: Decimal,
    years: u32,
}

#[derive(Deserialize)]
struct VerdictInput {
    score: Decimal,
    #[serde(default)]
    peer_scores: Vec<Decimal>,
}

#[derive(Serialize)]
struct StageInfo {
    stage: ZoningStage,
    label: &'static str,
    price_per_sqm: Decimal,
    arnona_per_sqm: Decimal,
    progress: Decimal,
}

// ---------------------------------------------------------------------------
// Calculator / PlotDetail / Compare
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_plot(input_json: String) -> NapiResult<String> {
    let input: land_model_core::analysis::PlotAnalysisInput = parse(&input_json)?;
    let output = land_model_core::analysis::analyze_plot(&input).map_err(to_napi_error)?;
    render(&output)
}

#[napi]
pub fn compare_plots(input_json: String) -> NapiResult<String> {
    let inputs: Vec<land_model_core::analysis::PlotAnalysisInput> = parse(&input_json)?;
    let output = land_model_core::analysis::compare_plots(&inputs).map_err(to_napi_error)?;
    render(&output)
}

// ---------------------------------------------------------------------------
// Costs
// ---------------------------------------------------------------------------

#[napi]
pub fn transaction_costs(input_json: String) -> NapiResult<String> {
    let input: PriceInput = parse(&input_json)?;
    render(&land_model_core::costs::calc_transaction_costs(input.price))
}

#[napi]
pub fn holding_costs(input_json: String) -> NapiResult<String> {
    let input: HoldingInput = parse(&input_json)?;
    let annual =
        land_model_core::costs::calc_annual_holding_costs(input.price, input.size_sqm, input.zoning_stage);
    let cumulative = input.years.map(|y| annual.over_years(y));
    render(&serde_json::json!({ "annual": annual, "cumulative": cumulative }))
}

#[napi]
pub fn exit_costs(input_json: String) -> NapiResult<String> {
    let input: SaleInput = parse(&input_json)?;
    render(&land_model_core::costs::calc_exit_costs(
        input.price,
        input.projected_value,
    ))
}

// ---------------------------------------------------------------------------
// Financing
// ---------------------------------------------------------------------------

#[napi]
pub fn mortgage(input_json: String) -> NapiResult<String> {
    let input: MortgageInput = parse(&input_json)?;
    let summary =
        land_model_core::financing::calc_mortgage(input.principal, input.annual_rate_pct, input.years);
    if input.schedule {
        let schedule = land_model_core::financing::amortization_schedule(
            input.principal,
            input.annual_rate_pct,
            input.years,
        );
        render(&serde_json::json!({ "summary": summary, "schedule": schedule }))
    } else {
        render(&summary)
    }
}

// ---------------------------------------------------------------------------
// Returns
// ---------------------------------------------------------------------------

#[napi]
pub fn return_metrics(input_json: String) -> NapiResult<String> {
    let input: SaleInput = parse(&input_json)?;
    let years = input.years.unwrap_or(land_model_core::rates::DEFAULT_HOLDING_YEARS);
    let roi = land_model_core::returns::gross_roi_pct(input.price, input.projected_value);
    let cagr = land_model_core::returns::calc_cagr(input.price, input.projected_value, years);
    let real = cagr.map(|c| land_model_core::returns::real_return_pct(c.cagr_pct));
    render(&serde_json::json!({
        "years": years,
        "gross_roi_pct": roi,
        "cagr_pct": cagr.map(|c| c.cagr_pct),
        "real_cagr_pct": real,
    }))
}

#[napi]
pub fn break_even(input_json: String) -> NapiResult<String> {
    let input: BreakEvenInput = parse(&input_json)?;
    input.solver.validate().map_err(to_napi_error)?;
    let years = input
        .holding_years
        .unwrap_or_else(|| input.plot.resolved_holding_years());
    render(&land_model_core::break_even::break_even_for_plot(
        &input.plot,
        years,
        &input.solver,
    ))
}

#[napi]
pub fn sensitivity_table(input_json: String) -> NapiResult<String> {
    let input: SensitivityInput = parse(&input_json)?;
    let years = input
        .years
        .as_deref()
        .unwrap_or(&land_model_core::rates::SENSITIVITY_YEARS);
    render(&land_model_core::sensitivity::build_sensitivity_table(
        &input.plot,
        input.projected_value,
        years,
        input.financing.as_ref(),
    ))
}

#[napi]
pub fn alternative_returns(input_json: String) -> NapiResult<String> {
    let input: AlternativesInput = parse(&input_json)?;
    render(&land_model_core::alternatives::calc_alternative_returns(
        input.price,
        input.net_profit,
        input.years,
    ))
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

#[napi]
pub fn investment_score(input_json: String) -> NapiResult<String> {
    let input: ScoreInput = parse(&input_json)?;
    let score = land_model_core::scoring::calc_investment_score(&input);
    render(&serde_json::json!({
        "score": score,
        "label": land_model_core::scoring::score_label(score),
    }))
}

#[napi]
pub fn investment_verdict(input_json: String) -> NapiResult<String> {
    let input: VerdictInput = parse(&input_json)?;
    render(&land_model_core::scoring::investment_verdict(
        input.score,
        &input.peer_scores,
    ))
}

// ---------------------------------------------------------------------------
// Reference data
// ---------------------------------------------------------------------------

/// The zoning pipeline with its price curve, for stage pickers.
#[napi]
pub fn zoning_stages() -> NapiResult<String> {
    let stages: Vec<StageInfo> = ZoningStage::ALL
        .iter()
        .map(|&stage| StageInfo {
            stage,
            label: stage.label(),
            price_per_sqm: stage.price_per_sqm(),
            arnona_per_sqm: stage.arnona_per_sqm(),
            progress: stage.progress(),
        })
        .collect();
    render(&stages)
}
