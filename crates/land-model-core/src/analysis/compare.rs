use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::analysis::plot::{build_analysis, PlotAnalysis, PlotAnalysisInput};
use crate::error::LandModelError;
use crate::scoring::{investment_verdict, median};
use crate::types::{with_metadata, ComputationOutput};
use crate::LandModelResult;

/// One column of the Compare view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparedPlot {
    pub index: usize,
    /// The plot's own analysis; its verdict is re-benchmarked against the group
    pub analysis: PlotAnalysis,
    /// Break-even price / purchase price
    pub break_even_ratio: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotComparison {
    pub plots: Vec<ComparedPlot>,
    pub group_median_score: Option<Decimal>,
    pub best_roi: Option<usize>,
    pub best_net_cagr: Option<usize>,
    pub best_score: Option<usize>,
    /// Plot needing the smallest price rise to break even
    pub lowest_break_even_ratio: Option<usize>,
}

/// Analyse plots side by side.
///
/// Each plot's verdict is taken relative to the other plots in the group.
/// Warnings are prefixed with the plot's position. Ties for "best" go to the
/// earlier plot.
pub fn compare_plots(
    inputs: &[PlotAnalysisInput],
) -> LandModelResult<ComputationOutput<PlotComparison>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if inputs.is_empty() {
        return Err(LandModelError::InvalidInput {
            field: "plots".into(),
            reason: "At least one plot is required for comparison".into(),
        });
    }
    for input in inputs {
        input.solver.validate()?;
    }

    let mut plots: Vec<ComparedPlot> = Vec::with_capacity(inputs.len());
    for (index, input) in inputs.iter().enumerate() {
        let mut plot_warnings = Vec::new();
        let analysis = build_analysis(input, &mut plot_warnings);
        warnings.extend(
            plot_warnings
                .into_iter()
                .map(|w| format!("Plot {}: {w}", index + 1)),
        );

        let price = input.plot.price;
        let break_even_ratio = if price > Decimal::ZERO
            && analysis.break_even.break_even_price > Decimal::ZERO
        {
            Some(analysis.break_even.break_even_price / price)
        } else {
            None
        };

        plots.push(ComparedPlot {
            index,
            analysis,
            break_even_ratio,
        });
    }

    // --- Group-relative verdicts ---
    let scores: Vec<Option<Decimal>> = plots.iter().map(|p| p.analysis.score).collect();
    for (i, plot) in plots.iter_mut().enumerate() {
        if let Some(score) = scores[i] {
            let others: Vec<Decimal> = scores
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .filter_map(|(_, s)| *s)
                .collect();
            plot.analysis.verdict = Some(investment_verdict(score, &others));
        }
    }

    let all_scores: Vec<Decimal> = scores.iter().flatten().copied().collect();
    let group_median_score = if all_scores.is_empty() {
        None
    } else {
        Some(median(&all_scores))
    };

    let comparison = PlotComparison {
        best_roi: best_index(&plots, |p| p.analysis.gross_roi_pct),
        best_net_cagr: best_index(&plots, |p| p.analysis.net_cagr_pct),
        best_score: best_index(&plots, |p| p.analysis.score),
        lowest_break_even_ratio: best_index(&plots, |p| p.break_even_ratio.map(|r| -r)),
        group_median_score,
        plots,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Land Plot Comparison",
        &inputs,
        warnings,
        elapsed,
        comparison,
    ))
}

/// Index of the largest key; the first plot wins a tie.
fn best_index<F>(plots: &[ComparedPlot], key: F) -> Option<usize>
where
    F: Fn(&ComparedPlot) -> Option<Decimal>,
{
    let mut best: Option<(usize, Decimal)> = None;
    for plot in plots {
        if let Some(value) = key(plot) {
            match best {
                Some((_, current)) if value <= current => {}
                _ => best = Some((plot.index, value)),
            }
        }
    }
    best.map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::PlotSnapshot;
    use crate::rates::ZoningStage;
    use rust_decimal_macros::dec;

    fn input(price: Decimal, stage: ZoningStage) -> PlotAnalysisInput {
        let mut plot = PlotSnapshot::new(price, dec!(1000), stage);
        plot.holding_years = Some(5);
        PlotAnalysisInput::new(plot)
    }

    #[test]
    fn test_empty_comparison_rejected() {
        match compare_plots(&[]) {
            Err(LandModelError::InvalidInput { field, .. }) => assert_eq!(field, "plots"),
            other => panic!("expected invalid input, got {other:?}"),
        }
    }

    #[test]
    fn test_best_indices() {
        let inputs = vec![
            input(dec!(2500000), ZoningStage::Agricultural),
            input(dec!(1500000), ZoningStage::Agricultural),
            input(dec!(4000000), ZoningStage::DetailedPlanApproved),
        ];
        let out = compare_plots(&inputs).unwrap();
        let cmp = &out.result;
        assert_eq!(cmp.plots.len(), 3);
        // Cheapest plot has the largest upside to 6,000/sqm
        assert_eq!(cmp.best_roi, Some(1));
        assert_eq!(cmp.best_net_cagr, Some(1));
        // Flat fees weigh least on the most expensive plot
        assert_eq!(cmp.lowest_break_even_ratio, Some(2));
        assert!(cmp.group_median_score.is_some());
    }

    #[test]
    fn test_verdict_relative_to_group() {
        let inputs = vec![
            input(dec!(2500000), ZoningStage::Agricultural),
            input(dec!(2500000), ZoningStage::Agricultural),
            input(dec!(2500000), ZoningStage::Agricultural),
            input(dec!(2500000), ZoningStage::Agricultural),
        ];
        let out = compare_plots(&inputs).unwrap();
        for plot in &out.result.plots {
            let verdict = plot.analysis.verdict.as_ref().unwrap();
            assert_eq!(verdict.peer_median, Some(dec!(2.8)));
        }
        assert_eq!(out.result.best_score, Some(0));
    }

    #[test]
    fn test_warnings_prefixed_with_position() {
        let mut bad = input(dec!(1000000), ZoningStage::Agricultural);
        bad.plot.size_sqm = Decimal::ZERO;
        let out = compare_plots(&[input(dec!(2500000), ZoningStage::Agricultural), bad]).unwrap();
        assert!(out.warnings.iter().any(|w| w.starts_with("Plot 2:")));
        assert_eq!(out.result.plots[1].analysis.score, None);
    }
}
