use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::plot::FinancingTerms;
use crate::rates::MAX_LOAN_YEARS;
use crate::types::{round_currency, Money, Percent};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Totals of a fixed-rate, fully amortizing loan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MortgageSummary {
    pub principal: Money,
    pub annual_rate_pct: Percent,
    pub years: u32,
    pub num_payments: u32,
    /// Rounded to whole currency units
    pub monthly_payment: Money,
    /// monthly_payment * num_payments
    pub total_payments: Money,
    /// total_payments - principal
    pub total_interest: Money,
}

/// One year of the amortization schedule, summed over its twelve payments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationYear {
    pub year: u32,
    pub opening_balance: Money,
    pub interest: Money,
    pub principal_repaid: Money,
    pub closing_balance: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Number of monthly payments, or `None` for a zero term or one beyond `MAX_LOAN_YEARS`.
pub fn payment_count(years: u32) -> Option<u32> {
    if years == 0 || years > MAX_LOAN_YEARS {
        return None;
    }
    years.checked_mul(12)
}

/// Standard fixed-rate mortgage payment: P * r(1+r)^n / ((1+r)^n - 1).
///
/// `r` is the monthly rate and `n` the number of monthly payments. Returns 0
/// for a non-positive principal, a negative rate, or a term that is zero or
/// longer than `MAX_LOAN_YEARS`. An interest-free loan is repaid straight-line.
pub fn calc_monthly_payment(principal: Money, annual_rate_pct: Percent, years: u32) -> Money {
    if principal <= Decimal::ZERO || annual_rate_pct < Decimal::ZERO {
        return Decimal::ZERO;
    }
    let total_months = match payment_count(years) {
        Some(n) => Decimal::from(n),
        None => return Decimal::ZERO,
    };
    let monthly_rate = annual_rate_pct / dec!(100) / dec!(12);

    if monthly_rate.is_zero() {
        return round_currency(principal / total_months);
    }

    let compound = match (Decimal::ONE + monthly_rate).checked_powd(total_months) {
        Some(c) => c,
        None => return Decimal::ZERO,
    };
    let denominator = compound - Decimal::ONE;
    if denominator.is_zero() {
        return round_currency(principal / total_months);
    }

    round_currency(principal * monthly_rate * compound / denominator)
}

/// Payment, total paid and total interest for a loan.
pub fn calc_mortgage(principal: Money, annual_rate_pct: Percent, years: u32) -> MortgageSummary {
    let monthly_payment = calc_monthly_payment(principal, annual_rate_pct, years);
    let num_payments = match payment_count(years) {
        Some(n) if !monthly_payment.is_zero() => n,
        _ => {
            return MortgageSummary {
                annual_rate_pct,
                years,
                ..MortgageSummary::default()
            }
        }
    };
    let total_payments = monthly_payment * Decimal::from(num_payments);

    MortgageSummary {
        principal,
        annual_rate_pct,
        years,
        num_payments,
        monthly_payment,
        total_payments,
        total_interest: total_payments - principal,
    }
}

/// Amount borrowed when `down_payment_pct` of `price` is paid in cash.
pub fn loan_principal(price: Money, down_payment_pct: Percent) -> Money {
    if price <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let down = down_payment_pct.clamp(Decimal::ZERO, dec!(100));
    price * (dec!(100) - down) / dec!(100)
}

/// Mortgage taken to buy a plot at `price`. The term is shortened to
/// `cap_years` when the plot is sold before the loan would run out.
pub fn mortgage_for_plot(
    price: Money,
    terms: &FinancingTerms,
    cap_years: Option<u32>,
) -> MortgageSummary {
    let years = match cap_years {
        Some(cap) => cap.min(terms.loan_years),
        None => terms.loan_years,
    };
    calc_mortgage(
        loan_principal(price, terms.down_payment_pct),
        terms.annual_rate_pct,
        years,
    )
}

/// Year-by-year amortization of the loan.
///
/// Uses the rounded monthly payment; the final payment absorbs the rounding
/// so the closing balance of the last year is zero.
pub fn amortization_schedule(
    principal: Money,
    annual_rate_pct: Percent,
    years: u32,
) -> Vec<AmortizationYear> {
    let payment = calc_monthly_payment(principal, annual_rate_pct, years);
    let total_months = match payment_count(years) {
        Some(n) if !payment.is_zero() => n,
        _ => return Vec::new(),
    };

    let monthly_rate = annual_rate_pct / dec!(100) / dec!(12);
    let mut schedule = Vec::with_capacity(years as usize);
    let mut balance = principal;

    for year in 1..=years {
        let opening_balance = balance;
        let mut interest = Decimal::ZERO;
        let mut principal_repaid = Decimal::ZERO;

        for month in 1..=12 {
            let month_index = (year - 1) * 12 + month;
            let month_interest = balance * monthly_rate;
            let mut month_principal = payment - month_interest;
            if month_index == total_months || month_principal > balance {
                month_principal = balance;
            }
            balance -= month_principal;
            interest += month_interest;
            principal_repaid += month_principal;
        }

        schedule.push(AmortizationYear {
            year,
            opening_balance: round_currency(opening_balance),
            interest: round_currency(interest),
            principal_repaid: round_currency(principal_repaid),
            closing_balance: round_currency(balance),
        });
    }

    schedule
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
