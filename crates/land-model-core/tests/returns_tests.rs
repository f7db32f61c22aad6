use land_model_core::alternatives::calc_alternative_returns;
use land_model_core::costs::{calc_exit_costs, calc_transaction_costs};
use land_model_core::plot::{FinancingTerms, PlotSnapshot};
use land_model_core::rates::{ZoningStage, SENSITIVITY_YEARS};
use land_model_core::returns::{
    cagr_from_roi, calc_cagr, gross_roi_pct, net_cagr, real_return_pct, total_net_profit,
};
use land_model_core::sensitivity::build_sensitivity_table;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Return metrics
// ===========================================================================

#[test]
fn test_reference_roi_and_cagr() {
    assert_eq!(gross_roi_pct(dec!(2500000), dec!(6000000)), Some(dec!(140)));
    let cagr = calc_cagr(dec!(2500000), dec!(6000000), 5).unwrap();
    assert_eq!(cagr.cagr_pct, dec!(19.1));
    assert_eq!(cagr_from_roi(dec!(140), 5).unwrap().cagr_pct, dec!(19.1));
}

#[test]
fn test_longer_hold_dilutes_cagr() {
    let five = calc_cagr(dec!(2500000), dec!(6000000), 5).unwrap();
    let ten = calc_cagr(dec!(2500000), dec!(6000000), 10).unwrap();
    // 2.4^(1/10) - 1 = 9.149%
    assert_eq!(ten.cagr_pct, dec!(9.1));
    assert!(ten.cagr_pct < five.cagr_pct);
}

#[test]
fn test_net_cagr_after_all_costs() {
    let price = dec!(2500000);
    let exit = calc_exit_costs(price, dec!(6000000));
    let entry = calc_transaction_costs(price).total;
    let net = total_net_profit(&exit, entry, dec!(7000));
    assert_eq!(net, dec!(1097187.5));
    // (3,597,187.5 / 2,500,000)^(1/5) - 1 = 7.55%
    assert_eq!(net_cagr(price, net, 5).unwrap().cagr_pct, dec!(7.5));
}

#[test]
fn test_real_return_below_nominal() {
    assert_eq!(real_return_pct(dec!(19.1)), dec!(15.6));
    assert_eq!(real_return_pct(dec!(-100)), dec!(-100));
}

// ===========================================================================
// Sensitivity and alternatives
// ===========================================================================

#[test]
fn test_sensitivity_rows_for_reference_plot() {
    let plot = PlotSnapshot::new(dec!(2500000), dec!(1000), ZoningStage::Agricultural);
    let terms = FinancingTerms::default();
    let rows = build_sensitivity_table(&plot, dec!(6000000), &SENSITIVITY_YEARS, Some(&terms));

    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0].years, 3);
    assert_eq!(rows[0].holding_costs, dec!(4200));
    assert_eq!(rows[4].holding_costs, dec!(21000));
    // Loan term is capped by the holding period until it reaches the full 15 years
    let loan_years: Vec<Option<u32>> = rows.iter().map(|r| r.loan_years).collect();
    assert_eq!(loan_years, vec![Some(3), Some(5), Some(7), Some(10), Some(15)]);
    assert_eq!(rows[4].interest_cost, Some(dec!(659660)));
}

#[test]
fn test_alternatives_for_reference_plot() {
    let alts = calc_alternative_returns(dec!(2500000), dec!(1097187.5), 5);
    assert_eq!(alts.len(), 3);
    assert_eq!(alts[0].future_value, dec!(3597188));
    // 2.5M * 1.09^5 = 3,846,559.9
    assert_eq!(alts[1].future_value, dec!(3846560));
    // 2.5M * 1.045^5 = 3,115,454.8
    assert_eq!(alts[2].future_value, dec!(3115455));
    assert!(alts.iter().all(|a| a.real_rate_pct < a.rate_pct));
}

#[test]
fn test_alternatives_empty_without_price() {
    assert!(calc_alternative_returns(Decimal::ZERO, dec!(1000), 5).is_empty());
}
