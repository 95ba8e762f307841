// src/services/blacklist_service.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::BlacklistRepository,
    models::blacklist::{BlacklistEntry, CreateBlacklistPayload},
};

#[derive(Clone, Default)]
pub struct BlacklistService {
    repo: BlacklistRepository,
}

impl BlacklistService {
    pub fn new(repo: BlacklistRepository) -> Self {
        Self { repo }
    }

    pub async fn add<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        phone: &str,
        name: Option<&str>,
        reason: &str,
    ) -> Result<BlacklistEntry, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let name = name.map(str::trim).filter(|n| !n.is_empty());
        let entry = self
            .repo
            .create(executor, user_id, phone.trim(), name, reason.trim())
            .await?;

        tracing::info!("⛔ Telefone {} adicionado à lista negra de {}", entry.phone, user_id);
        Ok(entry)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        payload: &CreateBlacklistPayload,
    ) -> Result<BlacklistEntry, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.add(executor, user_id, &payload.phone, payload.name.as_deref(), &payload.reason)
            .await
    }

    pub async fn list<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        search: Option<&str>,
    ) -> Result<Vec<BlacklistEntry>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.list(executor, user_id, search).await
    }

    pub async fn remove<'e, E>(&self, executor: E, user_id: Uuid, entry_id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        if self.repo.delete(executor, user_id, entry_id).await? {
            Ok(())
        } else {
            Err(AppError::ResourceNotFound("blacklist entry"))
        }
    }
}
