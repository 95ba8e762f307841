// src/services/order_service.rs

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{Executor, PgConnection, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{order_repo::OrderValues, DeliveryRepository, OrderRepository},
    models::{
        blacklist::{BlacklistEntry, DEFAULT_BLOCK_REASON},
        delivery::is_known_governorate,
        orders::{discount_within_price, Order, OrderFilter, OrderPayload, OrderStatus, ShareLink},
        risk::RiskAssessment,
    },
    services::{
        blacklist_service::BlacklistService, campaign_service::CampaignService,
        delivery_service::resolve_delivery_cost, risk::RiskService,
    },
};

const MAX_SUGGESTIONS: usize = 10;

/// Link `wa.me` para o telefone do cliente, no formato internacional do Iraque.
pub fn whatsapp_url(phone: &str) -> String {
    let mut digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    if let Some(rest) = digits.strip_prefix("07") {
        digits = format!("9647{}", rest);
    } else if digits.starts_with('7') {
        digits = format!("964{}", digits);
    }

    format!("https://wa.me/{}", digits)
}

fn not_found() -> AppError {
    AppError::ResourceNotFound("order")
}

fn refuse_if_blocked(user_id: Uuid, phone: &str, risk: &RiskAssessment) -> Result<(), AppError> {
    if risk.blocks_submission() {
        let reason = risk.reason.clone().unwrap_or_default();
        tracing::warn!("⛔ Pedido recusado para {}: telefone {} na lista negra", user_id, phone);
        return Err(AppError::CustomerBlocked { reason });
    }
    Ok(())
}

#[derive(Clone, Default)]
pub struct OrderService {
    repo: OrderRepository,
    delivery_repo: DeliveryRepository,
    risk: RiskService,
    campaigns: CampaignService,
    blacklist: BlacklistService,
}

impl OrderService {
    pub fn new(
        repo: OrderRepository,
        delivery_repo: DeliveryRepository,
        risk: RiskService,
        campaigns: CampaignService,
        blacklist: BlacklistService,
    ) -> Self {
        Self { repo, delivery_repo, risk, campaigns, blacklist }
    }

    // =========================================================================
    //  LEITURA
    // =========================================================================

    pub async fn list<'e, E>(&self, executor: E, user_id: Uuid, filter: &OrderFilter) -> Result<Vec<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let since = filter.period.since(Utc::now());
        self.repo
            .list(executor, user_id, filter.status, filter.search.as_deref(), since)
            .await
    }

    pub async fn get<'e, E>(&self, executor: E, user_id: Uuid, order_id: Uuid) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .find_by_id(executor, user_id, order_id)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn product_suggestions<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        term: &str,
    ) -> Result<Vec<String>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        if term.trim().is_empty() {
            return Ok(Vec::new());
        }
        let mut names = self.repo.product_suggestions(executor, user_id, term).await?;
        names.truncate(MAX_SUGGESTIONS);
        Ok(names)
    }

    pub async fn share_link<'e, E>(&self, executor: E, user_id: Uuid, order_id: Uuid) -> Result<ShareLink, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = self.get(executor, user_id, order_id).await?;
        Ok(ShareLink { url: whatsapp_url(&order.phone) })
    }

    // =========================================================================
    //  CRIAÇÃO / EDIÇÃO
    // =========================================================================

    /// Cria o pedido. Telefone na lista negra bloqueia; histórico ruim só avisa (no /risk).
    pub async fn create(&self, conn: &mut PgConnection, user_id: Uuid, payload: &OrderPayload) -> Result<Order, AppError> {
        let governorate = self.check_references(&mut *conn, user_id, payload).await?;

        let risk = self.risk.check(&mut *conn, user_id, &payload.phone, None).await?;
        refuse_if_blocked(user_id, payload.phone.trim(), &risk)?;

        // Sem frete explícito: tarifa da província, ou zero
        let delivery_cost = match payload.delivery_cost {
            Some(cost) => cost,
            None => {
                let rate = self.rate_for(&mut *conn, user_id, governorate).await?;
                resolve_delivery_cost(rate, None).unwrap_or_default()
            }
        };

        let discount = payload.discount.unwrap_or_default();
        discount_within_price(payload.price, discount)?;

        let values = OrderValues { payload, governorate, delivery_cost, discount };
        let order = self.repo.create(&mut *conn, user_id, &values).await?;

        tracing::info!("📦 Pedido {} criado ({})", order.id, order.governorate);
        Ok(order)
    }

    /// Edição completa. Mesmo telefone = cliente já verificado, sem nova checagem.
    pub async fn update(
        &self,
        conn: &mut PgConnection,
        user_id: Uuid,
        order_id: Uuid,
        payload: &OrderPayload,
    ) -> Result<Order, AppError> {
        let current = self
            .repo
            .find_by_id(&mut *conn, user_id, order_id)
            .await?
            .ok_or_else(not_found)?;

        let governorate = self.check_references(&mut *conn, user_id, payload).await?;

        let risk = self
            .risk
            .check(&mut *conn, user_id, &payload.phone, Some(current.phone.as_str()))
            .await?;
        refuse_if_blocked(user_id, payload.phone.trim(), &risk)?;

        let delivery_cost = match payload.delivery_cost {
            Some(cost) => cost,
            None if governorate != current.governorate => {
                let rate = self.rate_for(&mut *conn, user_id, governorate).await?;
                resolve_delivery_cost(rate, Some(current.delivery_cost)).unwrap_or_default()
            }
            None => current.delivery_cost,
        };

        let discount = payload.discount.unwrap_or(current.discount);
        discount_within_price(payload.price, discount)?;

        let values = OrderValues { payload, governorate, delivery_cost, discount };
        let order = self
            .repo
            .update(&mut *conn, user_id, order_id, &values)
            .await?
            .ok_or_else(not_found)?;

        Ok(order)
    }

    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        order_id: Uuid,
        status: OrderStatus,
    ) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .update_status(executor, user_id, order_id, status)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn update_collection<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        order_id: Uuid,
        is_collected: bool,
    ) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .update_collection(executor, user_id, order_id, is_collected)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn delete<'e, E>(&self, executor: E, user_id: Uuid, order_id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        if self.repo.delete(executor, user_id, order_id).await? {
            Ok(())
        } else {
            Err(not_found())
        }
    }

    /// Coloca o cliente do pedido na lista negra (motivo padrão: recusou o recebimento).
    pub async fn block_customer(
        &self,
        conn: &mut PgConnection,
        user_id: Uuid,
        order_id: Uuid,
        reason: Option<&str>,
    ) -> Result<BlacklistEntry, AppError> {
        let order = self
            .repo
            .find_by_id(&mut *conn, user_id, order_id)
            .await?
            .ok_or_else(not_found)?;

        let reason = reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_BLOCK_REASON);

        let entry = self
            .blacklist
            .add(&mut *conn, user_id, &order.phone, Some(&order.customer_name), reason)
            .await?;

        Ok(entry)
    }

    // =========================================================================
    //  AUXILIARES
    // =========================================================================

    /// Província válida e campanha (se houver) ativa e do próprio lojista.
    async fn check_references<'p>(
        &self,
        conn: &mut PgConnection,
        user_id: Uuid,
        payload: &'p OrderPayload,
    ) -> Result<&'p str, AppError> {
        let governorate = payload.governorate.trim();
        if !is_known_governorate(governorate) {
            return Err(AppError::UnknownGovernorate(governorate.to_string()));
        }

        if let Some(campaign_id) = payload.campaign_id {
            self.campaigns.ensure_active(&mut *conn, user_id, campaign_id).await?;
        }

        Ok(governorate)
    }

    async fn rate_for(
        &self,
        conn: &mut PgConnection,
        user_id: Uuid,
        governorate: &str,
    ) -> Result<Option<Decimal>, AppError> {
        let rate = self.delivery_repo.find(&mut *conn, user_id, governorate).await?;
        Ok(rate.map(|r| r.price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whatsapp_link_uses_iraqi_international_format() {
        assert_eq!(whatsapp_url("0770 123 4567"), "https://wa.me/9647701234567");
        assert_eq!(whatsapp_url("7701234567"), "https://wa.me/9647701234567");
        assert_eq!(whatsapp_url("+964 770-123-4567"), "https://wa.me/9647701234567");
    }

    #[test]
    fn blocked_risk_refuses_with_reason() {
        let risk = RiskAssessment {
            tier: crate::models::risk::RiskTier::Blocked,
            reason: Some("fraud".into()),
            returned_orders: 0,
            total_orders: 0,
            message: None,
        };
        match refuse_if_blocked(Uuid::nil(), "0770000000", &risk) {
            Err(AppError::CustomerBlocked { reason }) => assert_eq!(reason, "fraud"),
            other => panic!("esperava CustomerBlocked, veio {:?}", other),
        }

        let warning = RiskAssessment { tier: crate::models::risk::RiskTier::Warning, ..risk };
        assert!(refuse_if_blocked(Uuid::nil(), "0770000000", &warning).is_ok());
    }
}
