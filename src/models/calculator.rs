// src/models/calculator.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::common::validation::non_negative;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Currency {
    #[default]
    #[serde(rename = "IQD")]
    Iqd,
    #[serde(rename = "USD")]
    Usd,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfitInput {
    #[validate(custom(function = "non_negative"))]
    #[schema(example = "10")]
    pub cost_price: Decimal,

    #[serde(default)]
    pub currency: Currency,

    // Só usado quando a moeda é USD; padrão 1500
    #[validate(custom(function = "non_negative"))]
    #[schema(example = "1500")]
    pub exchange_rate: Option<Decimal>,

    #[serde(default)]
    #[validate(custom(function = "non_negative"))]
    #[schema(example = "3000")]
    pub other_expenses: Decimal,

    #[validate(custom(function = "non_negative"))]
    #[schema(example = "25000")]
    pub selling_price: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProfitVerdict {
    Loss,
    Low,
    Healthy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProfitAdvice {
    SellingAtLoss,
    LowMargin,
    GoodMargin,
    ExcellentMargin,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfitResult {
    pub final_cost: Decimal,
    pub total_cost: Decimal,
    pub net_profit: Decimal,
    pub margin: Decimal,
    pub roi: Decimal,
    pub verdict: ProfitVerdict,
    pub advice: ProfitAdvice,
}
