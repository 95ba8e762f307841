// src/models/orders.rs

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::common::validation::{non_negative, phone_number};

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "order_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    New,
    Processing,
    OutForDelivery,
    Delivered,
    Returned,
}

// --- Structs ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,

    #[schema(ignore)]
    pub user_id: Uuid,

    #[schema(example = "علي حسن")]
    pub customer_name: String,
    #[schema(example = "07701234567")]
    pub phone: String,
    #[schema(example = "بغداد")]
    pub governorate: String,
    pub address: Option<String>,

    #[schema(example = "ساعة يد")]
    pub product: String,

    // Preço líquido do item (sem o frete)
    #[schema(example = "25000")]
    pub price: Decimal,

    // Frete: o entregador cobra do cliente e fica com ele.
    // Nunca entra como receita nem como custo do lojista.
    #[schema(example = "5000")]
    pub delivery_cost: Decimal,

    #[schema(example = "0")]
    pub discount: Decimal,

    #[schema(example = "15000")]
    pub cost_price: Option<Decimal>,

    pub status: OrderStatus,

    // true quando o entregador já repassou o dinheiro
    pub is_collected: bool,

    pub campaign_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// O que o lojista recebe de fato: preço menos desconto.
    pub fn merchant_amount(&self) -> Decimal {
        self.price - self.discount
    }

    /// O que o entregador cobra do cliente na porta.
    pub fn courier_amount(&self) -> Decimal {
        self.price + self.delivery_cost - self.discount
    }

    pub fn is_delivered(&self) -> bool {
        self.status == OrderStatus::Delivered
    }
}

/// Desconto acima do preço deixaria o valor do lojista negativo.
pub fn discount_within_price(price: Decimal, discount: Decimal) -> Result<(), ValidationErrors> {
    if discount > price {
        let mut err = ValidationError::new("discount_exceeds_price");
        err.message = Some("discount_exceeds_price".into());
        let mut errors = ValidationErrors::new();
        errors.add("discount", err);
        return Err(errors);
    }
    Ok(())
}

// --- Payloads ---

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "علي حسن")]
    pub customer_name: String,

    #[validate(custom(function = "phone_number"))]
    #[schema(example = "07701234567")]
    pub phone: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "بغداد")]
    pub governorate: String,

    pub address: Option<String>,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "ساعة يد")]
    pub product: String,

    #[validate(custom(function = "non_negative"))]
    #[schema(example = "25000")]
    pub price: Decimal,

    // Se vier vazio, usamos a tarifa da província
    #[validate(custom(function = "non_negative"))]
    #[schema(example = "5000")]
    pub delivery_cost: Option<Decimal>,

    #[validate(custom(function = "non_negative"))]
    pub discount: Option<Decimal>,

    #[validate(custom(function = "non_negative"))]
    pub cost_price: Option<Decimal>,

    pub campaign_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusPayload {
    pub status: OrderStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCollectionPayload {
    pub is_collected: bool,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlockCustomerPayload {
    #[schema(example = "رفض استلام الطلب")]
    pub reason: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareLink {
    #[schema(example = "https://wa.me/9647701234567")]
    pub url: String,
}

// --- Filtros da listagem ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderPeriod {
    #[default]
    All,
    Today,
    Week,
    Month,
}

impl OrderPeriod {
    /// Início da janela; `None` para "all".
    pub fn since(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            OrderPeriod::All => None,
            OrderPeriod::Today => now
                .date_naive()
                .and_hms_opt(0, 0, 0)
                .map(|start| start.and_utc()),
            OrderPeriod::Week => Some(now - Duration::days(7)),
            OrderPeriod::Month => Some(now - Duration::days(30)),
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    /// Nome do cliente, telefone ou ID do pedido
    pub search: Option<String>,
    #[serde(default)]
    pub period: OrderPeriod,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SuggestionQuery {
    pub q: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn today_starts_at_midnight_utc() {
        let now = Utc.with_ymd_and_hms(2026, 3, 14, 17, 45, 0).unwrap();
        let since = OrderPeriod::Today.since(now).unwrap();
        assert_eq!(since, Utc.with_ymd_and_hms(2026, 3, 14, 0, 0, 0).unwrap());
        assert_eq!(OrderPeriod::All.since(now), None);
        assert_eq!(OrderPeriod::Week.since(now), Some(now - Duration::days(7)));
    }

    #[test]
    fn status_uses_snake_case_on_the_wire() {
        let json = serde_json::to_string(&OrderStatus::OutForDelivery).unwrap();
        assert_eq!(json, "\"out_for_delivery\"");
    }

    #[test]
    fn discount_cannot_exceed_price() {
        let price = Decimal::from(25000);
        assert!(discount_within_price(price, Decimal::from(25000)).is_ok());
        assert!(discount_within_price(price, Decimal::ZERO).is_ok());

        let errors = discount_within_price(price, Decimal::from(25001)).unwrap_err();
        let field = &errors.field_errors()["discount"];
        assert_eq!(field[0].code, "discount_exceeds_price");
    }

    #[test]
    fn padded_short_phone_fails_validation() {
        let payload: OrderPayload = serde_json::from_value(serde_json::json!({
            "customerName": "علي",
            "phone": "   0770000   ",
            "governorate": "بغداد",
            "product": "ساعة",
            "price": 25000
        }))
        .unwrap();

        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("phone"));
    }
}
