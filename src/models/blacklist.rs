// src/models/blacklist.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlacklistEntry {
    pub id: Uuid,

    #[schema(ignore)]
    pub user_id: Uuid,

    #[schema(example = "0770000000")]
    pub phone: String,

    pub name: Option<String>,

    #[schema(example = "رفض استلام الطلب")]
    pub reason: String,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlacklistPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "0770000000")]
    pub phone: String,

    pub name: Option<String>,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "احتيال")]
    pub reason: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BlacklistSearch {
    pub search: Option<String>,
}

pub const DEFAULT_BLOCK_REASON: &str = "رفض استلام الطلب";
