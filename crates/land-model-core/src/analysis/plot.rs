use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::alternatives::{best_alternative, calc_alternative_returns, AlternativeInvestment};
use crate::break_even::{break_even_for_plot, BreakEvenResult, SolverConfig};
use crate::costs::{
    calc_annual_holding_costs, calc_exit_costs, calc_transaction_costs, AnnualHoldingCosts,
    ExitCosts, TransactionCosts,
};
use crate::financing::{mortgage_for_plot, MortgageSummary};
use crate::plot::{FinancingTerms, PlotSnapshot};
use crate::rates::{ZoningStage, MAX_LOAN_YEARS, SENSITIVITY_YEARS};
use crate::returns::{calc_cagr, gross_roi_pct, net_cagr, real_return_pct, total_net_profit};
use crate::scoring::{
    calc_investment_score, investment_verdict, score_label, InvestmentVerdict, Proximity,
    ScoreInput,
};
use crate::sensitivity::{build_sensitivity_table, SensitivityRow};
use crate::types::{round_currency, with_metadata, ComputationOutput, Money, Percent};
use crate::LandModelResult;

/// Loan-to-value above which a warning is raised.
const HIGH_LTV_DOWN_PAYMENT_PCT: Decimal = dec!(25);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Everything the calculator knows about one plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotAnalysisInput {
    pub plot: PlotSnapshot,
    /// Stage the plot is expected to reach before sale (default: building permit)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_stage: Option<ZoningStage>,
    /// Overrides the stage curve's price per sqm at the target stage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projected_price_per_sqm: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financing: Option<FinancingTerms>,
    /// Holding periods for the sensitivity table (default 3, 5, 7, 10, 15)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitivity_years: Option<Vec<u32>>,
    #[serde(default)]
    pub proximity: Proximity,
    /// Plots the verdict is benchmarked against
    #[serde(default)]
    pub peers: Vec<PeerPlot>,
    #[serde(default)]
    pub solver: SolverConfig,
}

impl PlotAnalysisInput {
    pub fn new(plot: PlotSnapshot) -> Self {
        Self {
            plot,
            target_stage: None,
            projected_price_per_sqm: None,
            financing: None,
            sensitivity_years: None,
            proximity: Proximity::default(),
            peers: Vec::new(),
            solver: SolverConfig::default(),
        }
    }

    pub fn resolved_target_stage(&self) -> ZoningStage {
        self.target_stage.unwrap_or(ZoningStage::BuildingPermit)
    }

    /// Price per sqm the plot is projected to sell at.
    pub fn resolved_projected_price_per_sqm(&self) -> Money {
        self.projected_price_per_sqm
            .filter(|p| *p > Decimal::ZERO)
            .unwrap_or_else(|| self.resolved_target_stage().price_per_sqm())
    }

    /// Score of this plot, `None` when the snapshot is not computable.
    pub fn score(&self) -> Option<Decimal> {
        score_plot(
            &self.plot,
            self.resolved_projected_price_per_sqm(),
            &self.proximity,
        )
    }
}

/// A neighbouring listing, scored the same way as the plot under analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerPlot {
    pub plot: PlotSnapshot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_stage: Option<ZoningStage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projected_price_per_sqm: Option<Money>,
    #[serde(default)]
    pub proximity: Proximity,
}

impl PeerPlot {
    pub fn score(&self) -> Option<Decimal> {
        let per_sqm = self
            .projected_price_per_sqm
            .filter(|p| *p > Decimal::ZERO)
            .unwrap_or_else(|| {
                self.target_stage
                    .unwrap_or(ZoningStage::BuildingPermit)
                    .price_per_sqm()
            });
        score_plot(&self.plot, per_sqm, &self.proximity)
    }
}

/// Full Calculator / PlotDetail output for one plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotAnalysis {
    pub holding_years: u32,
    pub target_stage: ZoningStage,
    pub price_per_sqm: Option<Money>,
    pub projected_price_per_sqm: Money,
    pub projected_value: Money,
    pub transaction_costs: TransactionCosts,
    pub annual_holding_costs: AnnualHoldingCosts,
    /// Annual holding costs over the holding period
    pub cumulative_holding_costs: Money,
    pub exit_costs: ExitCosts,
    /// Net of exit, entry and cumulative holding costs
    pub total_net_profit: Money,
    pub gross_roi_pct: Option<Percent>,
    pub cagr_pct: Option<Percent>,
    pub net_cagr_pct: Option<Percent>,
    pub real_cagr_pct: Option<Percent>,
    pub break_even: BreakEvenResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mortgage: Option<MortgageSummary>,
    pub sensitivity: Vec<SensitivityRow>,
    pub alternatives: Vec<AlternativeInvestment>,
    pub score: Option<Decimal>,
    pub score_label: Option<String>,
    pub verdict: Option<InvestmentVerdict>,
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

/// Derive every metric of the plot page from a snapshot.
///
/// A snapshot without a positive price and size yields `None` metrics and a
/// warning. Only an invalid solver configuration is an error.
pub fn analyze_plot(
    input: &PlotAnalysisInput,
) -> LandModelResult<ComputationOutput<PlotAnalysis>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    input.solver.validate()?;

    let analysis = build_analysis(input, &mut warnings);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Land Plot Investment Analysis (Rezoning Appreciation)",
        input,
        warnings,
        elapsed,
        analysis,
    ))
}

pub(crate) fn build_analysis(input: &PlotAnalysisInput, warnings: &mut Vec<String>) -> PlotAnalysis {
    let plot = &input.plot;
    let holding_years = plot.resolved_holding_years();
    let target_stage = input.resolved_target_stage();
    let projected_price_per_sqm = input.resolved_projected_price_per_sqm();

    if plot.holding_years.filter(|y| *y > 0).is_none() {
        warnings.push(format!(
            "No holding period given; assuming {holding_years} years"
        ));
    }

    if !plot.is_computable() {
        warnings.push("Price and size must both be positive; metrics not computed".into());
        return PlotAnalysis {
            holding_years,
            target_stage,
            price_per_sqm: None,
            projected_price_per_sqm,
            projected_value: Decimal::ZERO,
            transaction_costs: TransactionCosts::default(),
            annual_holding_costs: AnnualHoldingCosts::default(),
            cumulative_holding_costs: Decimal::ZERO,
            exit_costs: ExitCosts::default(),
            total_net_profit: Decimal::ZERO,
            gross_roi_pct: None,
            cagr_pct: None,
            net_cagr_pct: None,
            real_cagr_pct: None,
            break_even: break_even_for_plot(plot, holding_years, &input.solver),
            mortgage: None,
            sensitivity: Vec::new(),
            alternatives: Vec::new(),
            score: None,
            score_label: None,
            verdict: None,
        };
    }

    if input.projected_price_per_sqm.is_none() && target_stage <= plot.zoning_stage {
        warnings.push(format!(
            "Target stage '{}' is not beyond the current stage '{}'",
            target_stage, plot.zoning_stage
        ));
    }

    let price = plot.price;
    let projected_value = plot.projected_value_at(projected_price_per_sqm);

    // --- Costs ---
    let transaction_costs = calc_transaction_costs(price);
    let annual_holding_costs = calc_annual_holding_costs(price, plot.size_sqm, plot.zoning_stage);
    let cumulative_holding_costs = annual_holding_costs.over_years(holding_years);
    let exit_costs = calc_exit_costs(price, projected_value);
    let net_profit = total_net_profit(&exit_costs, transaction_costs.total, cumulative_holding_costs);

    if net_profit < Decimal::ZERO {
        warnings.push(format!(
            "Projected sale does not cover costs: net loss of {}",
            round_currency(-net_profit)
        ));
    }

    // --- Returns ---
    let gross_roi = gross_roi_pct(price, projected_value);
    let cagr_pct = calc_cagr(price, projected_value, holding_years).map(|c| c.cagr_pct);
    let net_cagr_pct = net_cagr(price, net_profit, holding_years).map(|c| c.cagr_pct);
    let real_cagr_pct = net_cagr_pct.map(real_return_pct);

    // --- Break-even ---
    let break_even = break_even_for_plot(plot, holding_years, &input.solver);
    if !break_even.converged {
        warnings.push(format!(
            "Break-even search did not converge after {} iterations (residual {})",
            break_even.iterations,
            round_currency(break_even.residual)
        ));
    }

    // --- Financing ---
    let mortgage = input.financing.as_ref().map(|terms| {
        if terms.down_payment_pct < HIGH_LTV_DOWN_PAYMENT_PCT {
            warnings.push(format!(
                "Down payment of {}% implies loan-to-value above {}%",
                terms.down_payment_pct,
                dec!(100) - HIGH_LTV_DOWN_PAYMENT_PCT
            ));
        }
        if terms.loan_years > MAX_LOAN_YEARS {
            warnings.push(format!(
                "Loan term of {} years exceeds the {}-year maximum; mortgage not computed",
                terms.loan_years, MAX_LOAN_YEARS
            ));
        }
        mortgage_for_plot(price, terms, None)
    });

    // --- Sensitivity and alternatives ---
    let years = input
        .sensitivity_years
        .as_deref()
        .unwrap_or(&SENSITIVITY_YEARS);
    let sensitivity =
        build_sensitivity_table(plot, projected_value, years, input.financing.as_ref());

    let alternatives = calc_alternative_returns(price, net_profit, holding_years);
    if let Some(best) = best_alternative(&alternatives) {
        if best.label != "Land" {
            warnings.push(format!(
                "{} outperforms this plot over {holding_years} years",
                best.label
            ));
        }
    }

    // --- Score and verdict ---
    let score = input.score();
    let peer_scores: Vec<Decimal> = input.peers.iter().filter_map(PeerPlot::score).collect();
    let verdict = score.map(|s| investment_verdict(s, &peer_scores));

    PlotAnalysis {
        holding_years,
        target_stage,
        price_per_sqm: plot.price_per_sqm().map(round_currency),
        projected_price_per_sqm,
        projected_value,
        transaction_costs,
        annual_holding_costs,
        cumulative_holding_costs,
        exit_costs,
        total_net_profit: net_profit,
        gross_roi_pct: gross_roi,
        cagr_pct,
        net_cagr_pct,
        real_cagr_pct,
        break_even,
        mortgage,
        sensitivity,
        alternatives,
        score,
        score_label: score.map(|s| score_label(s).to_string()),
        verdict,
    }
}

fn score_plot(plot: &PlotSnapshot, projected_price_per_sqm: Money, proximity: &Proximity) -> Option<Decimal> {
    if !plot.is_computable() {
        return None;
    }
    let projected_value = plot.projected_value_at(projected_price_per_sqm);
    let roi_pct = gross_roi_pct(plot.price, projected_value)?;
    Some(calc_investment_score(&ScoreInput {
        roi_pct,
        zoning_stage: plot.zoning_stage,
        proximity: proximity.clone(),
    }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
