pub mod exit;
pub mod holding;
pub mod transaction;

pub use exit::{calc_exit_costs, ExitCosts};
pub use holding::{calc_annual_holding_costs, AnnualHoldingCosts};
pub use transaction::{calc_transaction_costs, TransactionCosts};
