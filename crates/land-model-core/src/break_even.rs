//! Minimum sale price at which a plot investment neither gains nor loses.
//!
//! Exit taxes depend on the sale price itself, so the root of
//! `S - exit(S) - price - entry - holding` is found by a bounded, damped
//! fixed-point iteration rather than a closed form.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::costs::{calc_annual_holding_costs, calc_exit_costs, calc_transaction_costs, ExitCosts};
use crate::error::LandModelError;
use crate::plot::PlotSnapshot;
use crate::types::{round_currency, Money};
use crate::LandModelResult;

pub const BREAK_EVEN_MAX_ITERATIONS: u32 = 20;
pub const BREAK_EVEN_DAMPING: Decimal = dec!(0.6);
/// Largest acceptable |net profit| at the returned price, in currency units.
pub const BREAK_EVEN_TOLERANCE: Money = dec!(100);
/// First guess as a multiple of the sunk costs.
pub const BREAK_EVEN_INITIAL_MARKUP: Decimal = dec!(1.1);

/// Solver knobs. Defaults are the constants above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub max_iterations: u32,
    pub damping: Decimal,
    pub tolerance: Money,
    pub initial_markup: Decimal,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: BREAK_EVEN_MAX_ITERATIONS,
            damping: BREAK_EVEN_DAMPING,
            tolerance: BREAK_EVEN_TOLERANCE,
            initial_markup: BREAK_EVEN_INITIAL_MARKUP,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> LandModelResult<()> {
        if self.max_iterations == 0 {
            return Err(LandModelError::InvalidInput {
                field: "max_iterations".into(),
                reason: "At least one iteration is required".into(),
            });
        }
        if self.damping <= Decimal::ZERO || self.damping > Decimal::ONE {
            return Err(LandModelError::InvalidInput {
                field: "damping".into(),
                reason: "Damping must be in (0, 1]".into(),
            });
        }
        if self.tolerance <= Decimal::ZERO {
            return Err(LandModelError::InvalidInput {
                field: "tolerance".into(),
                reason: "Tolerance must be positive".into(),
            });
        }
        if self.initial_markup <= Decimal::ZERO {
            return Err(LandModelError::InvalidInput {
                field: "initial_markup".into(),
                reason: "Initial markup must be positive".into(),
            });
        }
        Ok(())
    }
}

/// Outcome of the break-even search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenResult {
    /// Sale price with zero net profit, rounded to whole units
    pub break_even_price: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub break_even_per_sqm: Option<Money>,
    pub iterations: u32,
    /// Whether |residual| fell below the tolerance
    pub converged: bool,
    /// Net profit remaining at the returned price (before rounding)
    pub residual: Money,
}

impl BreakEvenResult {
    fn not_computable() -> Self {
        Self {
            break_even_price: Decimal::ZERO,
            break_even_per_sqm: None,
            iterations: 0,
            converged: false,
            residual: Decimal::ZERO,
        }
    }

    /// For callers that cannot use a best-effort estimate.
    pub fn require_converged(self) -> LandModelResult<Self> {
        if self.converged {
            Ok(self)
        } else {
            Err(LandModelError::ConvergenceFailure {
                function: "break-even price".into(),
                iterations: self.iterations,
                last_delta: self.residual,
            })
        }
    }
}

/// Solve for the sale price `S` where
/// `S - exit_cost_fn(price, S).total_exit - price - entry_costs - holding_costs = 0`.
///
/// Starts at `(price + entry + holding) * initial_markup` and corrects by
/// `damping * net / retention` per step, where `retention` is the share of a
/// marginal currency unit of sale price left after exit costs, measured by a
/// one-unit forward difference. Stops once |net| < tolerance or the iteration
/// budget is spent; an unconverged result still carries the last guess.
pub fn solve_break_even_price<F>(
    price: Money,
    entry_costs: Money,
    holding_costs: Money,
    exit_cost_fn: F,
    config: &SolverConfig,
) -> BreakEvenResult
where
    F: Fn(Money, Money) -> ExitCosts,
{
    if price <= Decimal::ZERO {
        return BreakEvenResult::not_computable();
    }

    let sunk = price + entry_costs + holding_costs;
    let net = |sale: Money| sale - sunk - exit_cost_fn(price, sale).total_exit;

    let mut guess = sunk * config.initial_markup;
    let mut residual = net(guess);
    let mut iterations = 0;

    while iterations < config.max_iterations {
        iterations += 1;
        if residual.abs() < config.tolerance {
            break;
        }

        let mut retention = net(guess + Decimal::ONE) - residual;
        if retention <= Decimal::ZERO {
            retention = Decimal::ONE;
        }
        guess -= config.damping * residual / retention;
        residual = net(guess);
    }

    let converged = residual.abs() < config.tolerance;

    BreakEvenResult {
        break_even_price: round_currency(guess),
        break_even_per_sqm: None,
        iterations,
        converged,
        residual,
    }
}

/// Break-even sale price of a plot held for `holding_years`, using the
/// standard transaction, holding and exit cost models.
pub fn break_even_for_plot(
    plot: &PlotSnapshot,
    holding_years: u32,
    config: &SolverConfig,
) -> BreakEvenResult {
    if !plot.is_computable() {
        return BreakEvenResult::not_computable();
    }

    let entry = calc_transaction_costs(plot.price).total;
    let holding = calc_annual_holding_costs(plot.price, plot.size_sqm, plot.zoning_stage)
        .over_years(holding_years);

    let mut result = solve_break_even_price(plot.price, entry, holding, calc_exit_costs, config);
    result.break_even_per_sqm = result
        .break_even_price
        .checked_div(plot.size_sqm)
        .map(round_currency);
    result
}
