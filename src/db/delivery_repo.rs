// src/db/delivery_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::delivery::DeliveryRate};

const RATE_COLUMNS: &str = "id, user_id, governorate, price";

#[derive(Clone, Default)]
pub struct DeliveryRepository;

impl DeliveryRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E, user_id: Uuid) -> Result<Vec<DeliveryRate>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("SELECT {RATE_COLUMNS} FROM delivery_rates WHERE user_id = $1");
        let rates = sqlx::query_as::<_, DeliveryRate>(&sql)
            .bind(user_id)
            .fetch_all(executor)
            .await?;

        Ok(rates)
    }

    pub async fn find<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        governorate: &str,
    ) -> Result<Option<DeliveryRate>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "SELECT {RATE_COLUMNS} FROM delivery_rates WHERE user_id = $1 AND governorate = $2"
        );
        let rate = sqlx::query_as::<_, DeliveryRate>(&sql)
            .bind(user_id)
            .bind(governorate)
            .fetch_optional(executor)
            .await?;

        Ok(rate)
    }

    // Upsert pela chave (user_id, governorate)
    pub async fn upsert<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        governorate: &str,
        price: Decimal,
    ) -> Result<DeliveryRate, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO delivery_rates (user_id, governorate, price)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, governorate) DO UPDATE SET price = EXCLUDED.price
            RETURNING {RATE_COLUMNS}
            "#
        );
        let rate = sqlx::query_as::<_, DeliveryRate>(&sql)
            .bind(user_id)
            .bind(governorate)
            .bind(price)
            .fetch_one(executor)
            .await?;

        Ok(rate)
    }
}
