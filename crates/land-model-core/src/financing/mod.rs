pub mod amortization;

pub use amortization::{
    amortization_schedule, calc_monthly_payment, calc_mortgage, loan_principal,
    mortgage_for_plot, payment_count, AmortizationYear, MortgageSummary,
};
