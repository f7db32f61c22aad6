use clap::Args;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use land_model_core::financing::{amortization_schedule, calc_mortgage, loan_principal};
use land_model_core::rates::{DEFAULT_DOWN_PAYMENT_PCT, DEFAULT_INTEREST_RATE_PCT, DEFAULT_LOAN_YEARS};

use crate::input;

/// JSON shape accepted by `mortgage`
#[derive(Debug, Serialize, Deserialize)]
pub struct MortgageInput {
    /// Amount borrowed; derived from `price` and the down payment when absent
    #[serde(default)]
    pub principal: Option<Decimal>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default = "default_down_payment")]
    pub down_payment_pct: Decimal,
    #[serde(default = "default_rate")]
    pub annual_rate_pct: Decimal,
    #[serde(default = "default_years")]
    pub years: u32,
    #[serde(default)]
    pub schedule: bool,
}

fn default_down_payment() -> Decimal {
    DEFAULT_DOWN_PAYMENT_PCT
}

fn default_rate() -> Decimal {
    DEFAULT_INTEREST_RATE_PCT
}

fn default_years() -> u32 {
    DEFAULT_LOAN_YEARS
}

/// Arguments for fixed-rate mortgage payments
#[derive(Args)]
pub struct MortgageArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Purchase price; the loan is the part not covered by the down payment
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Down payment as a percentage of the price (default 30)
    #[arg(long)]
    pub down_payment_pct: Option<Decimal>,

    /// Annual interest rate in percent (default 4.5)
    #[arg(long)]
    pub interest_rate_pct: Option<Decimal>,

    /// Loan term in years (default 15)
    #[arg(long)]
    pub years: Option<u32>,

    /// Include the year-by-year amortization schedule
    #[arg(long)]
    pub schedule: bool,
}

impl MortgageArgs {
    fn to_input(&self) -> MortgageInput {
        MortgageInput {
            principal: self.principal,
            price: self.price,
            down_payment_pct: self.down_payment_pct.unwrap_or(DEFAULT_DOWN_PAYMENT_PCT),
            annual_rate_pct: self.interest_rate_pct.unwrap_or(DEFAULT_INTEREST_RATE_PCT),
            years: self.years.unwrap_or(DEFAULT_LOAN_YEARS),
            schedule: self.schedule,
        }
    }
}

pub fn run_mortgage(args: MortgageArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mortgage_input: MortgageInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        args.to_input()
    };

    let principal = match (mortgage_input.principal, mortgage_input.price) {
        (Some(p), _) => p,
        (None, Some(price)) => loan_principal(price, mortgage_input.down_payment_pct),
        (None, None) => return Err("--principal or --price is required (or provide --input)".into()),
    };

    let summary = calc_mortgage(principal, mortgage_input.annual_rate_pct, mortgage_input.years);
    let mut warnings: Vec<String> = Vec::new();
    if summary.monthly_payment.is_zero() {
        warnings.push("Loan not computable: principal and term must be positive and the rate non-negative".into());
    }

    let result = if mortgage_input.schedule {
        json!({
            "summary": summary,
            "schedule": amortization_schedule(principal, mortgage_input.annual_rate_pct, mortgage_input.years),
        })
    } else {
        serde_json::to_value(&summary)?
    };

    Ok(json!({
        "result": result,
        "methodology": "Fixed-rate fully amortizing mortgage (monthly payments)",
        "warnings": warnings,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_args() -> MortgageArgs {
        MortgageArgs {
            input: None,
            principal: None,
            price: Some(Decimal::from(2_500_000)),
            down_payment_pct: None,
            interest_rate_pct: None,
            years: None,
            schedule: false,
        }
    }

    #[test]
    fn test_missing_flags_take_rate_table_defaults() {
        let input = bare_args().to_input();
        assert_eq!(input.down_payment_pct, DEFAULT_DOWN_PAYMENT_PCT);
        assert_eq!(input.annual_rate_pct, DEFAULT_INTEREST_RATE_PCT);
        assert_eq!(input.years, DEFAULT_LOAN_YEARS);
    }

    #[test]
    fn test_flags_override_defaults() {
        let mut args = bare_args();
        args.down_payment_pct = Some(Decimal::from(50));
        args.years = Some(20);
        let input = args.to_input();
        assert_eq!(input.down_payment_pct, Decimal::from(50));
        assert_eq!(input.annual_rate_pct, DEFAULT_INTEREST_RATE_PCT);
        assert_eq!(input.years, 20);
    }

    #[test]
    fn test_json_defaults_match_flag_defaults() {
        let from_json: MortgageInput = serde_json::from_str(r#"{ "price": "2500000" }"#).unwrap();
        let from_flags = bare_args().to_input();
        assert_eq!(from_json.down_payment_pct, from_flags.down_payment_pct);
        assert_eq!(from_json.annual_rate_pct, from_flags.annual_rate_pct);
        assert_eq!(from_json.years, from_flags.years);
    }
}
