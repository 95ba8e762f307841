// src/models/campaigns.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "campaign_platform", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Facebook,
    Instagram,
    Tiktok,
    Snapchat,
    Google,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: Uuid,

    #[schema(ignore)]
    pub user_id: Uuid,

    #[schema(example = "عرض الصيف")]
    pub name: String,

    pub platform: Platform,

    // Arquivamento é só desativar; nunca apagamos
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "عرض الصيف")]
    pub name: String,

    pub platform: Option<Platform>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampaignPerformance {
    pub campaign_id: Uuid,
    pub name: String,
    pub platform: Platform,
    pub order_count: usize,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampaignReport {
    pub campaigns: Vec<CampaignPerformance>,
    // Pedidos sem campanha vinculada
    pub unattributed_orders: usize,
}
