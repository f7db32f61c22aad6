use land_model_core::break_even::{break_even_for_plot, solve_break_even_price, SolverConfig};
use land_model_core::costs::{calc_annual_holding_costs, calc_exit_costs, calc_transaction_costs};
use land_model_core::plot::PlotSnapshot;
use land_model_core::rates::ZoningStage;
use land_model_core::returns::total_net_profit;
use land_model_core::LandModelError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn net_at_sale(plot: &PlotSnapshot, years: u32, sale: Decimal) -> Decimal {
    let entry = calc_transaction_costs(plot.price).total;
    let holding =
        calc_annual_holding_costs(plot.price, plot.size_sqm, plot.zoning_stage).over_years(years);
    total_net_profit(&calc_exit_costs(plot.price, sale), entry, holding)
}

// ===========================================================================
// Reference scenario
// ===========================================================================

#[test]
fn test_reference_break_even_without_holding() {
    // S - 0.5(S - P) - 0.25(0.5(S - P) - E) - 0.01S = P + E
    // => S = (0.375P + 0.75E) / 0.365 = 2,974,829 with P = 2.5M, E = 197,750.
    // A residual under 100 allows the price to sit up to 100 / 0.365 away.
    let price = dec!(2500000);
    let entry = calc_transaction_costs(price).total;
    let result = solve_break_even_price(
        price,
        entry,
        Decimal::ZERO,
        calc_exit_costs,
        &SolverConfig::default(),
    );
    assert!(result.converged);
    assert!(
        (result.break_even_price - dec!(2974829)).abs() < dec!(275),
        "break-even {}",
        result.break_even_price
    );
}

#[test]
fn test_holding_costs_raise_break_even() {
    let mut plot = PlotSnapshot::new(dec!(2500000), dec!(1000), ZoningStage::Agricultural);
    plot.holding_years = Some(15);
    let config = SolverConfig::default();
    let short = break_even_for_plot(&plot, 3, &config);
    let long = break_even_for_plot(&plot, 15, &config);
    assert!(long.break_even_price > short.break_even_price);
    assert!(long.break_even_per_sqm > short.break_even_per_sqm);
}

#[test]
fn test_strict_mode_surfaces_convergence_failure() {
    let plot = PlotSnapshot::new(dec!(2500000), dec!(1000), ZoningStage::Agricultural);
    let config = SolverConfig {
        max_iterations: 2,
        initial_markup: dec!(5),
        ..SolverConfig::default()
    };
    let result = break_even_for_plot(&plot, 5, &config);
    assert!(!result.converged);
    let err = result.require_converged().unwrap_err();
    assert!(matches!(err, LandModelError::ConvergenceFailure { iterations: 2, .. }));
    assert!(err.to_string().contains("break-even"));
}

// ===========================================================================
// Randomized sweep
// ===========================================================================

#[test]
fn test_randomized_sweep_lands_within_tolerance() {
    let mut rng = StdRng::seed_from_u64(0x1a2b_3c4d);
    let config = SolverConfig::default();
    let cases = 500;
    let mut within = 0;

    for _ in 0..cases {
        let price = Decimal::from(rng.gen_range(100_000u64..20_000_000));
        let size = Decimal::from(rng.gen_range(100u64..10_000));
        let stage = ZoningStage::ALL[rng.gen_range(0..ZoningStage::ALL.len())];
        let years = rng.gen_range(1u32..=20);

        let plot = PlotSnapshot::new(price, size, stage);
        let result = break_even_for_plot(&plot, years, &config);
        assert!(result.iterations <= config.max_iterations);

        // Rounding the price to whole units moves net profit by well under one unit
        let net = net_at_sale(&plot, years, result.break_even_price);
        if result.converged && net.abs() < dec!(101) {
            within += 1;
        }
    }

    assert!(
        within * 100 >= cases * 95,
        "only {within} of {cases} break-even prices within tolerance"
    );
}
