use land_model_core::analysis::{analyze_plot, compare_plots, PeerPlot, PlotAnalysisInput};
use land_model_core::plot::{FinancingTerms, PlotSnapshot};
use land_model_core::rates::{ReadinessEstimate, ZoningStage};
use land_model_core::scoring::{Proximity, VerdictTier};
use land_model_core::LandModelError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn reference_plot() -> PlotSnapshot {
    let mut plot = PlotSnapshot::new(dec!(2500000), dec!(1000), ZoningStage::Agricultural);
    plot.holding_years = Some(5);
    plot
}

// ===========================================================================
// Single plot
// ===========================================================================

#[test]
fn test_reference_analysis_end_to_end() {
    let mut input = PlotAnalysisInput::new(reference_plot());
    input.financing = Some(FinancingTerms::default());

    let out = analyze_plot(&input).unwrap();
    let a = &out.result;

    assert_eq!(a.holding_years, 5);
    assert_eq!(a.target_stage, ZoningStage::BuildingPermit);
    assert_eq!(a.price_per_sqm, Some(dec!(2500)));
    assert_eq!(a.projected_value, dec!(6000000));
    assert_eq!(a.transaction_costs.purchase_tax, dec!(150000));
    assert_eq!(a.transaction_costs.attorney_fees, dec!(43750));
    assert_eq!(a.exit_costs.betterment_levy, dec!(1750000));
    assert_eq!(a.gross_roi_pct, Some(dec!(140)));
    assert_eq!(a.cagr_pct, Some(dec!(19.1)));
    assert_eq!(a.net_cagr_pct, Some(dec!(7.5)));

    let mortgage = a.mortgage.as_ref().unwrap();
    assert_eq!(mortgage.monthly_payment, dec!(13387));
    assert_eq!(mortgage.total_interest, dec!(659660));

    assert!(a.break_even.converged);
    assert!(a.break_even.break_even_price > dec!(2500000));
    assert_eq!(out.methodology, "Land Plot Investment Analysis (Rezoning Appreciation)");
}

#[test]
fn test_readiness_bucket_sets_holding_period() {
    let mut plot = reference_plot();
    plot.holding_years = None;
    plot.readiness_estimate = Some(ReadinessEstimate::FiveToTen);
    let out = analyze_plot(&PlotAnalysisInput::new(plot)).unwrap();
    assert_eq!(out.result.holding_years, 10);
    assert_eq!(out.result.cumulative_holding_costs, dec!(14000));
}

#[test]
fn test_target_stage_and_override() {
    let mut input = PlotAnalysisInput::new(reference_plot());
    input.target_stage = Some(ZoningStage::DetailedPlanApproved);
    let staged = analyze_plot(&input).unwrap();
    assert_eq!(staged.result.projected_value, dec!(3500000));
    assert_eq!(staged.result.gross_roi_pct, Some(dec!(40)));

    input.projected_price_per_sqm = Some(dec!(4200));
    let overridden = analyze_plot(&input).unwrap();
    assert_eq!(overridden.result.projected_value, dec!(4200000));
}

#[test]
fn test_target_behind_current_stage_warns() {
    let mut plot = reference_plot();
    plot.zoning_stage = ZoningStage::DeveloperTender;
    let mut input = PlotAnalysisInput::new(plot);
    input.target_stage = Some(ZoningStage::MasterPlanApproved);
    let out = analyze_plot(&input).unwrap();
    assert!(out.warnings.iter().any(|w| w.contains("not beyond")));
    assert!(out.warnings.iter().any(|w| w.contains("net loss")));
}

#[test]
fn test_proximity_lifts_score() {
    let base = analyze_plot(&PlotAnalysisInput::new(reference_plot())).unwrap();
    let mut input = PlotAnalysisInput::new(reference_plot());
    input.proximity = Proximity {
        sea_distance_m: Some(dec!(600)),
        park_distance_m: None,
        hospital_distance_m: None,
    };
    let near_sea = analyze_plot(&input).unwrap();
    assert_eq!(
        near_sea.result.score.unwrap() - base.result.score.unwrap(),
        dec!(0.5)
    );
}

#[test]
fn test_input_deserializes_with_defaults() {
    let json = r#"{
        "plot": {
            "price": "2500000",
            "size_sqm": "1000",
            "zoning_stage": "agricultural",
            "readiness_estimate": "3-5"
        },
        "financing": { "down_payment_pct": "40" }
    }"#;
    let input: PlotAnalysisInput = serde_json::from_str(json).unwrap();
    assert_eq!(input.resolved_target_stage(), ZoningStage::BuildingPermit);
    let terms = input.financing.as_ref().unwrap();
    assert_eq!(terms.down_payment_pct, dec!(40));
    assert_eq!(terms.loan_years, 15);
    assert!(input.peers.is_empty());

    let out = analyze_plot(&input).unwrap();
    assert_eq!(out.result.holding_years, 5);
    assert_eq!(out.result.mortgage.unwrap().principal, dec!(1500000));
}

#[test]
fn test_huge_loan_term_from_json_does_not_panic() {
    let json = r#"{
        "plot": { "price": "2500000", "size_sqm": "1000", "zoning_stage": "agricultural" },
        "financing": { "loan_years": 4000000000 }
    }"#;
    let input: PlotAnalysisInput = serde_json::from_str(json).unwrap();
    let out = analyze_plot(&input).unwrap();
    let mortgage = out.result.mortgage.unwrap();
    assert_eq!(mortgage.years, 4_000_000_000);
    assert_eq!(mortgage.num_payments, 0);
    assert_eq!(mortgage.monthly_payment, Decimal::ZERO);
    assert!(out.warnings.iter().any(|w| w.contains("mortgage not computed")));
}

#[test]
fn test_extreme_plot_sizes_do_not_panic() {
    let huge = r#"{
        "plot": {
            "price": "2500000",
            "size_sqm": "100000000000000000000000000",
            "zoning_stage": "agricultural"
        }
    }"#;
    let input: PlotAnalysisInput = serde_json::from_str(huge).unwrap();
    let out = analyze_plot(&input).unwrap();
    // 1e26 sqm at 6,000 per sqm is out of decimal range
    assert_eq!(out.result.projected_value, Decimal::ZERO);
    assert!(out.result.total_net_profit < Decimal::ZERO);
    assert!(out.result.break_even.break_even_per_sqm.is_some());

    let tiny = r#"{
        "plot": {
            "price": "2500000",
            "size_sqm": "0.000000000000000000000000001",
            "zoning_stage": "agricultural"
        }
    }"#;
    let input: PlotAnalysisInput = serde_json::from_str(tiny).unwrap();
    let out = analyze_plot(&input).unwrap();
    assert_eq!(out.result.price_per_sqm, None);
    assert_eq!(out.result.break_even.break_even_per_sqm, None);
    assert!(out.result.break_even.converged);
}

#[test]
fn test_verdict_against_weaker_peers() {
    let mut input = PlotAnalysisInput::new(reference_plot());
    let peer = |price: Decimal| PeerPlot {
        plot: PlotSnapshot::new(price, dec!(1000), ZoningStage::Agricultural),
        target_stage: None,
        projected_price_per_sqm: None,
        proximity: Proximity::default(),
    };
    // Peer scores 0.4, 0.2 and 1.0 against 2.8
    input.peers = vec![peer(dec!(5000000)), peer(dec!(5500000)), peer(dec!(4000000))];
    let out = analyze_plot(&input).unwrap();
    let verdict = out.result.verdict.unwrap();
    assert_eq!(verdict.tier, VerdictTier::Excellent);
    assert_eq!(verdict.peer_median, Some(dec!(0.4)));
}

// ===========================================================================
// Comparison
// ===========================================================================

#[test]
fn test_compare_reports_best_plot() {
    let cheap = {
        let mut p = reference_plot();
        p.price = dec!(1200000);
        p
    };
    let inputs = vec![
        PlotAnalysisInput::new(reference_plot()),
        PlotAnalysisInput::new(cheap),
    ];
    let out = compare_plots(&inputs).unwrap();
    assert_eq!(out.result.best_roi, Some(1));
    assert_eq!(out.result.best_score, Some(1));
    assert_eq!(out.result.plots[0].index, 0);
    assert!(out.result.plots.iter().all(|p| p.break_even_ratio.is_some()));
}

#[test]
fn test_compare_empty_is_invalid() {
    let err = compare_plots(&[]).unwrap_err();
    assert!(matches!(err, LandModelError::InvalidInput { .. }));
}
