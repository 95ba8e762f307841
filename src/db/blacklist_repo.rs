// src/db/blacklist_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::like_pattern, error::AppError},
    models::blacklist::BlacklistEntry,
};

const BLACKLIST_COLUMNS: &str = "id, user_id, phone, name, reason, created_at";

#[derive(Clone, Default)]
pub struct BlacklistRepository;

impl BlacklistRepository {
    pub fn new() -> Self {
        Self
    }

    /// UNIQUE (user_id, phone): repetir o telefone vira `AlreadyBlacklisted`.
    pub async fn create<'e, E>(
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
        let sql = format!(
            "INSERT INTO customer_blacklist (user_id, phone, name, reason) \
             VALUES ($1, $2, $3, $4) RETURNING {BLACKLIST_COLUMNS}"
        );
        let entry = sqlx::query_as::<_, BlacklistEntry>(&sql)
            .bind(user_id)
            .bind(phone)
            .bind(name)
            .bind(reason)
            .fetch_one(executor)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return AppError::AlreadyBlacklisted;
                    }
                }
                e.into()
            })?;

        Ok(entry)
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
        let pattern = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(like_pattern);

        let sql = format!(
            r#"
            SELECT {BLACKLIST_COLUMNS}
            FROM customer_blacklist
            WHERE user_id = $1
              AND ($2::text IS NULL OR phone LIKE $2 OR name ILIKE $2)
            ORDER BY created_at DESC
            "#
        );
        let entries = sqlx::query_as::<_, BlacklistEntry>(&sql)
            .bind(user_id)
            .bind(pattern)
            .fetch_all(executor)
            .await?;

        Ok(entries)
    }

    pub async fn find_by_phone<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        phone: &str,
    ) -> Result<Option<BlacklistEntry>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "SELECT {BLACKLIST_COLUMNS} FROM customer_blacklist WHERE user_id = $1 AND phone = $2"
        );
        let entry = sqlx::query_as::<_, BlacklistEntry>(&sql)
            .bind(user_id)
            .bind(phone)
            .fetch_optional(executor)
            .await?;

        Ok(entry)
    }

    pub async fn delete<'e, E>(&self, executor: E, user_id: Uuid, entry_id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM customer_blacklist WHERE id = $1 AND user_id = $2")
            .bind(entry_id)
            .bind(user_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
