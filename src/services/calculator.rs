// src/services/calculator.rs

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::calculator::{Currency, ProfitAdvice, ProfitInput, ProfitResult, ProfitVerdict};

/// Câmbio usado quando o custo vem em dólar e o usuário não informa a taxa.
pub const DEFAULT_EXCHANGE_RATE: Decimal = Decimal::from_parts(1500, 0, 0, false, 0);

const LOW_MARGIN: Decimal = Decimal::from_parts(15, 0, 0, false, 0);
const GOOD_MARGIN: Decimal = Decimal::from_parts(30, 0, 0, false, 0);
const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

fn percent(part: Decimal, whole: Decimal) -> Decimal {
    if whole > Decimal::ZERO {
        part / whole * HUNDRED
    } else {
        Decimal::ZERO
    }
}

fn two_places(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Calculadora de lucro de um produto (ferramenta pública, sem banco).
pub fn calculate(input: &ProfitInput) -> ProfitResult {
    let final_cost = match input.currency {
        Currency::Usd => {
            // Câmbio vazio ou zero cai no padrão
            let rate = input
                .exchange_rate
                .filter(|r| *r > Decimal::ZERO)
                .unwrap_or(DEFAULT_EXCHANGE_RATE);
            input.cost_price * rate
        }
        Currency::Iqd => input.cost_price,
    };
    let total_cost = final_cost + input.other_expenses;
    let net_profit = input.selling_price - total_cost;

    let margin = percent(net_profit, input.selling_price);
    let roi = percent(net_profit, total_cost);

    // Classifica pela margem exata; só o que vai na resposta é arredondado
    let verdict = if net_profit < Decimal::ZERO {
        ProfitVerdict::Loss
    } else if margin < LOW_MARGIN {
        ProfitVerdict::Low
    } else {
        ProfitVerdict::Healthy
    };

    let advice = if net_profit <= Decimal::ZERO {
        ProfitAdvice::SellingAtLoss
    } else if margin < LOW_MARGIN {
        ProfitAdvice::LowMargin
    } else if margin < GOOD_MARGIN {
        ProfitAdvice::GoodMargin
    } else {
        ProfitAdvice::ExcellentMargin
    };

    ProfitResult {
        final_cost,
        total_cost,
        net_profit,
        margin: two_places(margin),
        roi: two_places(roi),
        verdict,
        advice,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(cost: i64, currency: Currency, other: i64, selling: i64) -> ProfitInput {
        ProfitInput {
            cost_price: Decimal::from(cost),
            currency,
            exchange_rate: None,
            other_expenses: Decimal::from(other),
            selling_price: Decimal::from(selling),
        }
    }

    #[test]
    fn usd_cost_uses_default_exchange_rate() {
        let result = calculate(&input(10, Currency::Usd, 3_000, 25_000));
        assert_eq!(result.final_cost, Decimal::from(15_000));
        assert_eq!(result.total_cost, Decimal::from(18_000));
        assert_eq!(result.net_profit, Decimal::from(7_000));
        assert_eq!(result.margin, Decimal::from(28));
        assert_eq!(result.verdict, ProfitVerdict::Healthy);
        assert_eq!(result.advice, ProfitAdvice::GoodMargin);
    }

    #[test]
    fn iqd_ignores_exchange_rate() {
        let mut data = input(10_000, Currency::Iqd, 0, 20_000);
        data.exchange_rate = Some(Decimal::from(1_450));
        let result = calculate(&data);
        assert_eq!(result.final_cost, Decimal::from(10_000));
        assert_eq!(result.roi, Decimal::from(100));
        assert_eq!(result.advice, ProfitAdvice::ExcellentMargin);
    }

    #[test]
    fn verdict_tiers() {
        assert_eq!(calculate(&input(30_000, Currency::Iqd, 0, 25_000)).verdict, ProfitVerdict::Loss);
        assert_eq!(calculate(&input(23_000, Currency::Iqd, 0, 25_000)).verdict, ProfitVerdict::Low);

        let break_even = calculate(&input(25_000, Currency::Iqd, 0, 25_000));
        assert_eq!(break_even.verdict, ProfitVerdict::Low);
        assert_eq!(break_even.advice, ProfitAdvice::SellingAtLoss);
    }

    #[test]
    fn zero_selling_price_has_zero_margin() {
        let result = calculate(&input(0, Currency::Iqd, 0, 0));
        assert_eq!(result.margin, Decimal::ZERO);
        assert_eq!(result.roi, Decimal::ZERO);
    }

    #[test]
    fn margin_just_under_the_threshold_stays_low() {
        // margem real 14,996%: arredondada mostra 15.00 mas ainda é baixa
        let result = calculate(&input(85_004, Currency::Iqd, 0, 100_000));
        assert_eq!(result.margin, Decimal::new(1500, 2));
        assert_eq!(result.verdict, ProfitVerdict::Low);
        assert_eq!(result.advice, ProfitAdvice::LowMargin);
    }

    #[test]
    fn zero_exchange_rate_falls_back_to_default() {
        let mut data = input(10, Currency::Usd, 0, 25_000);
        data.exchange_rate = Some(Decimal::ZERO);
        let result = calculate(&data);
        assert_eq!(result.final_cost, Decimal::from(15_000));
        assert_eq!(result.net_profit, Decimal::from(10_000));
    }
}
