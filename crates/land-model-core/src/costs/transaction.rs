use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::rates::{APPRAISER_FEE, ATTORNEY_FEE_RATE, PURCHASE_TAX_RATE, REGISTRATION_FEE};
use crate::types::Money;

/// One-time acquisition costs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionCosts {
    pub purchase_tax: Money,
    pub attorney_fees: Money,
    pub appraiser_fee: Money,
    pub registration_fee: Money,
    /// Sum of the four fees
    pub total: Money,
    /// Fees plus the purchase price
    pub total_with_purchase: Money,
}

/// Acquisition costs for a purchase at `price`. All zero when `price <= 0`.
pub fn calc_transaction_costs(price: Money) -> TransactionCosts {
    if price <= Decimal::ZERO {
        return TransactionCosts::default();
    }

    let purchase_tax = price * PURCHASE_TAX_RATE;
    let attorney_fees = price * ATTORNEY_FEE_RATE;
    let total = purchase_tax + attorney_fees + APPRAISER_FEE + REGISTRATION_FEE;

    TransactionCosts {
        purchase_tax,
        attorney_fees,
        appraiser_fee: APPRAISER_FEE,
        registration_fee: REGISTRATION_FEE,
        total,
        total_with_purchase: total + price,
    }
}
