use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::costs::ExitCosts;
use crate::rates::INFLATION_RATE;
use crate::types::{round_pct, Money, Percent};

/// Compound annual growth over a whole number of years.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CagrResult {
    pub years: u32,
    /// Rounded to one decimal place
    pub cagr_pct: Percent,
}

/// Total return on the purchase price, rounded to a whole percent.
pub fn gross_roi_pct(price: Money, projected_value: Money) -> Option<Percent> {
    if price <= Decimal::ZERO {
        return None;
    }
    let roi = (projected_value - price) / price * dec!(100);
    Some(roi.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
}

/// CAGR of growing `price` into `projected_value` over `years`.
///
/// `None` unless `years > 0` and `price > 0`. A projected value at or below
/// zero is a total loss and reports -100%.
pub fn calc_cagr(price: Money, projected_value: Money, years: u32) -> Option<CagrResult> {
    if years == 0 || price <= Decimal::ZERO {
        return None;
    }
    let cagr_pct = annualized_pct(projected_value / price, years)?;
    Some(CagrResult {
        years,
        cagr_pct: round_pct(cagr_pct),
    })
}

/// CAGR equivalent to a total return of `roi_pct` over `years`.
pub fn cagr_from_roi(roi_pct: Percent, years: u32) -> Option<CagrResult> {
    if years == 0 {
        return None;
    }
    let cagr_pct = annualized_pct(Decimal::ONE + roi_pct / dec!(100), years)?;
    Some(CagrResult {
        years,
        cagr_pct: round_pct(cagr_pct),
    })
}

/// CAGR of the realised outcome `price + net_profit`.
pub fn net_cagr(price: Money, net_profit: Money, years: u32) -> Option<CagrResult> {
    calc_cagr(price, price + net_profit, years)
}

/// Inflation-adjusted return: (1 + nominal) / (1 + inflation) - 1.
pub fn real_return_pct(nominal_pct: Percent) -> Percent {
    let nominal = nominal_pct / dec!(100);
    round_pct(((Decimal::ONE + nominal) / (Decimal::ONE + INFLATION_RATE) - Decimal::ONE) * dec!(100))
}

/// What the investor keeps: exit net profit less acquisition and cumulative holding costs.
///
/// Exactly zero at the break-even sale price.
pub fn total_net_profit(exit: &ExitCosts, entry_costs: Money, holding_costs: Money) -> Money {
    exit.net_profit - entry_costs - holding_costs
}

/// (ratio^(1/years) - 1) * 100, with the growth ratio clamped at zero.
fn annualized_pct(ratio: Decimal, years: u32) -> Option<Percent> {
    let ratio = ratio.max(Decimal::ZERO);
    if ratio.is_zero() {
        return Some(dec!(-100));
    }
    if years == 1 {
        return Some((ratio - Decimal::ONE) * dec!(100));
    }
    let per_year = ratio.checked_ln()? / Decimal::from(years);
    let growth = per_year.checked_exp()?;
    Some((growth - Decimal::ONE) * dec!(100))
}
