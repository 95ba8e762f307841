// src/models/delivery.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// As 18 províncias atendidas; são a chave das tarifas de entrega.
pub const GOVERNORATES: [&str; 18] = [
    "بغداد", "البصرة", "نينوى", "أربيل", "السليمانية", "دهوك",
    "الأنبار", "بابل", "كربلاء", "النجف", "صلاح الدين", "ديالى",
    "واسط", "ميسان", "المثنى", "الديوانية", "ذي قار", "كركوك",
];

pub fn is_known_governorate(name: &str) -> bool {
    GOVERNORATES.contains(&name.trim())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRate {
    pub id: Uuid,

    #[schema(ignore)]
    pub user_id: Uuid,

    #[schema(example = "بغداد")]
    pub governorate: String,

    #[schema(example = "5000")]
    pub price: Decimal,
}

// Uma linha da tela de tarifas (todas as províncias, zero quando não cadastrada)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GovernorateRate {
    #[schema(example = "بغداد")]
    pub governorate: String,
    #[schema(example = "5000")]
    pub price: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertRatesPayload {
    #[validate(length(min = 1, message = "required"))]
    pub rates: Vec<GovernorateRate>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ResolveRateQuery {
    pub governorate: String,
    /// Valor que já está no campo do formulário
    #[param(value_type = Option<f64>)]
    pub current: Option<Decimal>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDeliveryCost {
    pub governorate: String,
    pub delivery_cost: Option<Decimal>,
    // true quando a tarifa da província sobrescreveu o campo
    pub from_rate: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn governorate_lookup_trims_input() {
        assert!(is_known_governorate(" بغداد "));
        assert!(is_known_governorate("كركوك"));
        assert!(!is_known_governorate("Baghdad"));
    }
}
