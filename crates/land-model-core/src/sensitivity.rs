use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::costs::{calc_annual_holding_costs, calc_exit_costs, calc_transaction_costs};
use crate::financing::{loan_principal, mortgage_for_plot};
use crate::plot::{FinancingTerms, PlotSnapshot};
use crate::returns::{calc_cagr, net_cagr, real_return_pct, total_net_profit};
use crate::types::{round_currency, round_pct, Money, Percent};

/// The investment outcome if the plot were sold after `years`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityRow {
    pub years: u32,
    pub projected_value: Money,
    pub gross_cagr_pct: Option<Percent>,
    /// Cumulative arnona and management over the period
    pub holding_costs: Money,
    /// After exit, entry and holding costs
    pub net_profit: Money,
    pub net_cagr_pct: Option<Percent>,
    /// Net CAGR in today's money
    pub real_cagr_pct: Option<Percent>,
    /// Loan term, capped at the holding period
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_years: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_cost: Option<Money>,
    /// Down payment plus entry costs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equity_invested: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financed_net_profit: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financed_roi_pct: Option<Percent>,
}

/// One row per candidate holding period.
///
/// Every row is derived from the snapshot alone, so filtering or reordering
/// `years` never changes a row. Zero-year candidates are skipped and a
/// non-computable snapshot yields no rows.
pub fn build_sensitivity_table(
    plot: &PlotSnapshot,
    projected_value: Money,
    years: &[u32],
    financing: Option<&FinancingTerms>,
) -> Vec<SensitivityRow> {
    if !plot.is_computable() {
        return Vec::new();
    }

    years
        .iter()
        .copied()
        .filter(|&y| y > 0)
        .map(|y| sensitivity_row(plot, projected_value, y, financing))
        .collect()
}

fn sensitivity_row(
    plot: &PlotSnapshot,
    projected_value: Money,
    years: u32,
    financing: Option<&FinancingTerms>,
) -> SensitivityRow {
    let price = plot.price;
    let entry = calc_transaction_costs(price).total;
    let exit = calc_exit_costs(price, projected_value);
    let holding =
        calc_annual_holding_costs(price, plot.size_sqm, plot.zoning_stage).over_years(years);
    let net_profit = total_net_profit(&exit, entry, holding);

    let gross_cagr_pct = calc_cagr(price, projected_value, years).map(|c| c.cagr_pct);
    let net_cagr_pct = net_cagr(price, net_profit, years).map(|c| c.cagr_pct);

    let mut row = SensitivityRow {
        years,
        projected_value: round_currency(projected_value),
        gross_cagr_pct,
        holding_costs: round_currency(holding),
        net_profit: round_currency(net_profit),
        net_cagr_pct,
        real_cagr_pct: net_cagr_pct.map(real_return_pct),
        loan_years: None,
        interest_cost: None,
        equity_invested: None,
        financed_net_profit: None,
        financed_roi_pct: None,
    };

    if let Some(terms) = financing {
        let mortgage = mortgage_for_plot(price, terms, Some(years));
        let equity = price - loan_principal(price, terms.down_payment_pct) + entry;
        let financed = net_profit - mortgage.total_interest;

        row.loan_years = Some(mortgage.years);
        row.interest_cost = Some(mortgage.total_interest);
        row.equity_invested = Some(round_currency(equity));
        row.financed_net_profit = Some(round_currency(financed));
        row.financed_roi_pct = if equity > Decimal::ZERO {
            Some(round_pct(financed / equity * dec!(100)))
        } else {
            None
        };
    }

    row
}
