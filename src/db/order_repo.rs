// src/db/order_repo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::like_pattern, error::AppError},
    models::orders::{Order, OrderPayload, OrderStatus},
};

const ORDER_COLUMNS: &str = "id, user_id, customer_name, phone, governorate, address, product, \
     price, delivery_cost, discount, cost_price, status, is_collected, campaign_id, \
     created_at, updated_at";

/// Valores finais de um pedido, depois de resolver frete e desconto.
#[derive(Debug, Clone)]
pub struct OrderValues<'a> {
    pub payload: &'a OrderPayload,
    pub governorate: &'a str,
    pub delivery_cost: Decimal,
    pub discount: Decimal,
}

#[derive(Clone, Default)]
pub struct OrderRepository;

impl OrderRepository {
    pub fn new() -> Self {
        Self
    }

    // =========================================================================
    //  LEITURA
    // =========================================================================

    /// Lista com filtros opcionais, mais novos primeiro.
    pub async fn list<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        status: Option<OrderStatus>,
        search: Option<&str>,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let pattern = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(like_pattern);

        let sql = format!(
            r#"
            SELECT {ORDER_COLUMNS}
            FROM orders
            WHERE user_id = $1
              AND ($2::order_status IS NULL OR status = $2)
              AND ($3::text IS NULL
                   OR customer_name ILIKE $3
                   OR phone LIKE $3
                   OR id::text ILIKE $3)
              AND ($4::timestamptz IS NULL OR created_at >= $4)
            ORDER BY created_at DESC
            "#
        );

        let orders = sqlx::query_as::<_, Order>(&sql)
            .bind(user_id)
            .bind(status)
            .bind(pattern)
            .bind(since)
            .fetch_all(executor)
            .await?;

        Ok(orders)
    }

    pub async fn list_all<'e, E>(&self, executor: E, user_id: Uuid) -> Result<Vec<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.list(executor, user_id, None, None, None).await
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        order_id: Uuid,
    ) -> Result<Option<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 AND user_id = $2");
        let order = sqlx::query_as::<_, Order>(&sql)
            .bind(order_id)
            .bind(user_id)
            .fetch_optional(executor)
            .await?;

        Ok(order)
    }

    /// Status de todos os pedidos anteriores de um telefone (histórico de risco).
    pub async fn statuses_for_phone<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        phone: &str,
    ) -> Result<Vec<OrderStatus>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let statuses = sqlx::query_scalar::<_, OrderStatus>(
            "SELECT status FROM orders WHERE user_id = $1 AND phone = $2",
        )
            .bind(user_id)
            .bind(phone)
            .fetch_all(executor)
            .await?;

        Ok(statuses)
    }

    /// Nomes de produto já usados que contêm o termo (máx. 10).
    pub async fn product_suggestions<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        term: &str,
    ) -> Result<Vec<String>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let names = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT product
            FROM orders
            WHERE user_id = $1 AND product ILIKE $2
            ORDER BY product
            LIMIT 10
            "#,
        )
            .bind(user_id)
            .bind(like_pattern(term))
            .fetch_all(executor)
            .await?;

        Ok(names)
    }

    // =========================================================================
    //  ESCRITA
    // =========================================================================

    pub async fn create<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        values: &OrderValues<'_>,
    ) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO orders (
                user_id, customer_name, phone, governorate, address, product,
                price, delivery_cost, discount, cost_price, campaign_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {ORDER_COLUMNS}
            "#
        );
        let p = values.payload;

        let order = sqlx::query_as::<_, Order>(&sql)
            .bind(user_id)
            .bind(p.customer_name.trim())
            .bind(p.phone.trim())
            .bind(values.governorate)
            .bind(p.address.as_deref())
            .bind(p.product.trim())
            .bind(p.price)
            .bind(values.delivery_cost)
            .bind(values.discount)
            .bind(p.cost_price)
            .bind(p.campaign_id)
            .fetch_one(executor)
            .await?;

        Ok(order)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        order_id: Uuid,
        values: &OrderValues<'_>,
    ) -> Result<Option<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            UPDATE orders SET
                customer_name = $3, phone = $4, governorate = $5, address = $6,
                product = $7, price = $8, delivery_cost = $9, discount = $10,
                cost_price = $11, campaign_id = $12, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {ORDER_COLUMNS}
            "#
        );
        let p = values.payload;

        let order = sqlx::query_as::<_, Order>(&sql)
            .bind(order_id)
            .bind(user_id)
            .bind(p.customer_name.trim())
            .bind(p.phone.trim())
            .bind(values.governorate)
            .bind(p.address.as_deref())
            .bind(p.product.trim())
            .bind(p.price)
            .bind(values.delivery_cost)
            .bind(values.discount)
            .bind(p.cost_price)
            .bind(p.campaign_id)
            .fetch_optional(executor)
            .await?;

        Ok(order)
    }

    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        order_id: Uuid,
        status: OrderStatus,
    ) -> Result<Option<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "UPDATE orders SET status = $3, updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 RETURNING {ORDER_COLUMNS}"
        );
        let order = sqlx::query_as::<_, Order>(&sql)
            .bind(order_id)
            .bind(user_id)
            .bind(status)
            .fetch_optional(executor)
            .await?;

        Ok(order)
    }

    pub async fn update_collection<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        order_id: Uuid,
        is_collected: bool,
    ) -> Result<Option<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "UPDATE orders SET is_collected = $3, updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 RETURNING {ORDER_COLUMNS}"
        );
        let order = sqlx::query_as::<_, Order>(&sql)
            .bind(order_id)
            .bind(user_id)
            .bind(is_collected)
            .fetch_optional(executor)
            .await?;

        Ok(order)
    }

    /// Devolve `true` se algo foi apagado.
    pub async fn delete<'e, E>(&self, executor: E, user_id: Uuid, order_id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1 AND user_id = $2")
            .bind(order_id)
            .bind(user_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
