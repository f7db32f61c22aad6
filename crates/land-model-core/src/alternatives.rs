use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::rates::{BANK_DEPOSIT_RATE, EQUITIES_RETURN_RATE};
use crate::returns::{net_cagr, real_return_pct};
use crate::types::{round_currency, Money, Percent, Rate};

/// One benchmark the plot's net outcome is measured against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeInvestment {
    pub label: String,
    pub emoji: String,
    /// Nominal annual rate
    pub rate_pct: Percent,
    pub real_rate_pct: Percent,
    pub future_value: Money,
    pub profit: Money,
    /// Chart colour as a hex string
    pub color: String,
}

/// What the same capital would have become in land, equities and a bank deposit.
///
/// Land uses the plot's realised outcome `price + net_profit`; the others
/// compound `price` at their fixed benchmark rate. Empty when `price <= 0`
/// or `years == 0`.
pub fn calc_alternative_returns(
    price: Money,
    net_profit: Money,
    years: u32,
) -> Vec<AlternativeInvestment> {
    if price <= Decimal::ZERO || years == 0 {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(3);

    let land_rate = net_cagr(price, net_profit, years)
        .map(|c| c.cagr_pct)
        .unwrap_or(Decimal::ZERO);
    let land_value = (price + net_profit).max(Decimal::ZERO);
    out.push(AlternativeInvestment {
        label: "Land".into(),
        emoji: "🏞️".into(),
        rate_pct: land_rate,
        real_rate_pct: real_return_pct(land_rate),
        future_value: round_currency(land_value),
        profit: round_currency(land_value - price),
        color: "#16a34a".into(),
    });

    let benchmarks = [
        ("Equities", "📈", EQUITIES_RETURN_RATE, "#2563eb"),
        ("Bank deposit", "🏦", BANK_DEPOSIT_RATE, "#f59e0b"),
    ];
    for (label, emoji, rate, color) in benchmarks {
        if let Some(future_value) = compound(price, rate, years) {
            let rate_pct = rate * dec!(100);
            out.push(AlternativeInvestment {
                label: label.into(),
                emoji: emoji.into(),
                rate_pct,
                real_rate_pct: real_return_pct(rate_pct),
                future_value: round_currency(future_value),
                profit: round_currency(future_value - price),
                color: color.into(),
            });
        }
    }

    out
}

/// The alternative with the largest future value.
pub fn best_alternative(alternatives: &[AlternativeInvestment]) -> Option<&AlternativeInvestment> {
    alternatives.iter().max_by(|a, b| a.future_value.cmp(&b.future_value))
}

fn compound(principal: Money, rate: Rate, years: u32) -> Option<Money> {
    let factor = (Decimal::ONE + rate).checked_powu(years as u64)?;
    principal.checked_mul(factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_alternatives() {
        let alts = calc_alternative_returns(dec!(2500000), dec!(1097187.5), 5);
        let labels: Vec<&str> = alts.iter().map(|a| a.label.as_str()).collect();
        assert_eq!(labels, vec!["Land", "Equities", "Bank deposit"]);
    }

    #[test]
    fn test_benchmark_compounding() {
        let alts = calc_alternative_returns(dec!(1000000), dec!(0), 2);
        // 1.09^2 = 1.1881, 1.045^2 = 1.092025
        assert_eq!(alts[1].future_value, dec!(1188100));
        assert_eq!(alts[1].profit, dec!(188100));
        assert_eq!(alts[1].rate_pct, dec!(9));
        assert_eq!(alts[1].real_rate_pct, dec!(5.8));
        assert_eq!(alts[2].future_value, dec!(1092025));
        assert_eq!(alts[2].rate_pct, dec!(4.5));
    }

    #[test]
    fn test_land_uses_net_outcome() {
        let alts = calc_alternative_returns(dec!(2500000), dec!(1301937.5), 5);
        assert_eq!(alts[0].future_value, dec!(3801938));
        assert_eq!(alts[0].rate_pct, dec!(8.7));
    }

    #[test]
    fn test_land_total_loss_floors_at_zero() {
        let alts = calc_alternative_returns(dec!(1000000), dec!(-1500000), 5);
        assert_eq!(alts[0].future_value, Decimal::ZERO);
        assert_eq!(alts[0].profit, dec!(-1000000));
        assert_eq!(alts[0].rate_pct, dec!(-100));
    }

    #[test]
    fn test_best_alternative() {
        let alts = calc_alternative_returns(dec!(1000000), dec!(0), 10);
        assert_eq!(best_alternative(&alts).unwrap().label, "Equities");
        assert!(best_alternative(&[]).is_none());
    }

    #[test]
    fn test_empty_when_not_computable() {
        assert!(calc_alternative_returns(dec!(0), dec!(100), 5).is_empty());
        assert!(calc_alternative_returns(dec!(100), dec!(100), 0).is_empty());
    }
}
