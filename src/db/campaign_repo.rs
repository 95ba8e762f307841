// src/db/campaign_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::campaigns::{Campaign, Platform},
};

const CAMPAIGN_COLUMNS: &str = "id, user_id, name, platform, is_active, created_at";

#[derive(Clone, Default)]
pub struct CampaignRepository;

impl CampaignRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        name: &str,
        platform: Platform,
    ) -> Result<Campaign, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "INSERT INTO campaigns (user_id, name, platform) VALUES ($1, $2, $3) RETURNING {CAMPAIGN_COLUMNS}"
        );
        let campaign = sqlx::query_as::<_, Campaign>(&sql)
            .bind(user_id)
            .bind(name)
            .bind(platform)
            .fetch_one(executor)
            .await?;

        Ok(campaign)
    }

    // Só as ativas; as arquivadas somem das telas mas os pedidos continuam apontando para elas
    pub async fn list_active<'e, E>(&self, executor: E, user_id: Uuid) -> Result<Vec<Campaign>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "SELECT {CAMPAIGN_COLUMNS} FROM campaigns WHERE user_id = $1 AND is_active \
             ORDER BY created_at DESC"
        );
        let campaigns = sqlx::query_as::<_, Campaign>(&sql)
            .bind(user_id)
            .fetch_all(executor)
            .await?;

        Ok(campaigns)
    }

    pub async fn is_active<'e, E>(&self, executor: E, user_id: Uuid, campaign_id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM campaigns WHERE id = $1 AND user_id = $2 AND is_active)",
        )
            .bind(campaign_id)
            .bind(user_id)
            .fetch_one(executor)
            .await?;

        Ok(exists)
    }

    /// Arquiva (is_active = false). Devolve a campanha atualizada, se existir.
    pub async fn archive<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        campaign_id: Uuid,
    ) -> Result<Option<Campaign>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "UPDATE campaigns SET is_active = FALSE WHERE id = $1 AND user_id = $2 RETURNING {CAMPAIGN_COLUMNS}"
        );
        let campaign = sqlx::query_as::<_, Campaign>(&sql)
            .bind(campaign_id)
            .bind(user_id)
            .fetch_optional(executor)
            .await?;

        Ok(campaign)
    }
}
