use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::costs::transaction::calc_transaction_costs;
use crate::rates::{AGENT_COMMISSION_RATE, BETTERMENT_LEVY_RATE, CAPITAL_GAINS_TAX_RATE};
use crate::types::Money;

/// Taxes and commission due when the plot is sold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExitCosts {
    pub betterment_levy: Money,
    pub capital_gains: Money,
    pub agent_commission: Money,
    pub total_exit: Money,
    /// (projected_value - price) - total_exit
    pub net_profit: Money,
}

/// Disposal costs of selling a plot bought at `price` for `projected_value`.
///
/// Levy and capital gains apply only to a gain; the commission applies to any
/// modelled sale. The capital gains base deducts the levy and the acquisition
/// costs of [`calc_transaction_costs`].
pub fn calc_exit_costs(price: Money, projected_value: Money) -> ExitCosts {
    let gross_profit = projected_value - price;
    let gain = gross_profit.max(Decimal::ZERO);

    let betterment_levy = gain * BETTERMENT_LEVY_RATE;
    let entry_costs = calc_transaction_costs(price).total;
    let taxable_base = (gross_profit - betterment_levy - entry_costs).max(Decimal::ZERO);
    let capital_gains = taxable_base * CAPITAL_GAINS_TAX_RATE;
    let agent_commission = projected_value.max(Decimal::ZERO) * AGENT_COMMISSION_RATE;

    let total_exit = betterment_levy + capital_gains + agent_commission;

    ExitCosts {
        betterment_levy,
        capital_gains,
        agent_commission,
        total_exit,
        net_profit: gross_profit - total_exit,
    }
}
