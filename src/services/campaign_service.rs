// src/services/campaign_service.rs

use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CampaignRepository,
    models::{
        campaigns::{Campaign, CampaignPerformance, CampaignReport, CreateCampaignPayload, Platform},
        orders::Order,
    },
};

/// Pedidos e receita (preço − desconto) por campanha ativa; só as que têm pedido.
pub fn campaign_report(campaigns: &[Campaign], orders: &[Order]) -> CampaignReport {
    let mut totals: HashMap<Uuid, (usize, Decimal)> = HashMap::new();
    let mut unattributed_orders = 0;

    for order in orders {
        match order.campaign_id {
            Some(id) => {
                let entry = totals.entry(id).or_insert((0, Decimal::ZERO));
                entry.0 += 1;
                entry.1 += order.merchant_amount();
            }
            None => unattributed_orders += 1,
        }
    }

    let mut performance: Vec<CampaignPerformance> = campaigns
        .iter()
        .filter(|c| c.is_active)
        .filter_map(|c| {
            let (order_count, revenue) = totals.get(&c.id).copied()?;
            Some(CampaignPerformance {
                campaign_id: c.id,
                name: c.name.clone(),
                platform: c.platform,
                order_count,
                revenue,
            })
        })
        .collect();
    performance.sort_by(|a, b| b.order_count.cmp(&a.order_count));

    CampaignReport { campaigns: performance, unattributed_orders }
}

#[derive(Clone, Default)]
pub struct CampaignService {
    repo: CampaignRepository,
}

impl CampaignService {
    pub fn new(repo: CampaignRepository) -> Self {
        Self { repo }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        payload: &CreateCampaignPayload,
    ) -> Result<Campaign, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let platform = payload.platform.unwrap_or(Platform::Facebook);
        self.repo.create(executor, user_id, payload.name.trim(), platform).await
    }

    pub async fn list_active<'e, E>(&self, executor: E, user_id: Uuid) -> Result<Vec<Campaign>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.list_active(executor, user_id).await
    }

    pub async fn archive<'e, E>(&self, executor: E, user_id: Uuid, campaign_id: Uuid) -> Result<Campaign, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .archive(executor, user_id, campaign_id)
            .await?
            .ok_or(AppError::ResourceNotFound("campaign"))
    }

    pub async fn ensure_active<'e, E>(&self, executor: E, user_id: Uuid, campaign_id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        if self.repo.is_active(executor, user_id, campaign_id).await? {
            Ok(())
        } else {
            Err(AppError::ResourceNotFound("campaign"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::orders::OrderStatus, services::aggregation::fixtures::order};
    use chrono::Utc;

    fn campaign(name: &str, active: bool) -> Campaign {
        Campaign {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            name: name.into(),
            platform: Platform::Instagram,
            is_active: active,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn counts_orders_and_revenue_per_active_campaign() {
        let summer = campaign("Summer", true);
        let quiet = campaign("Quiet", true);
        let old = campaign("Old", false);

        let mut orders = Vec::new();
        for (campaign_id, discount) in [(summer.id, 0), (summer.id, 1_000), (old.id, 0)] {
            let mut o = order(OrderStatus::New, false, 10_000, 5_000, discount);
            o.campaign_id = Some(campaign_id);
            orders.push(o);
        }
        orders.push(order(OrderStatus::Delivered, true, 10_000, 5_000, 0));

        let report = campaign_report(&[quiet, summer.clone(), old], &orders);

        assert_eq!(report.campaigns.len(), 1);
        let perf = &report.campaigns[0];
        assert_eq!(perf.campaign_id, summer.id);
        assert_eq!(perf.order_count, 2);
        assert_eq!(perf.revenue, Decimal::from(19_000));
        assert_eq!(report.unattributed_orders, 1);
    }

    #[test]
    fn sorted_by_order_count() {
        let a = campaign("A", true);
        let b = campaign("B", true);
        let mut orders = Vec::new();
        for id in [a.id, b.id, b.id] {
            let mut o = order(OrderStatus::New, false, 1, 0, 0);
            o.campaign_id = Some(id);
            orders.push(o);
        }
        let report = campaign_report(&[a, b], &orders);
        assert_eq!(report.campaigns[0].name, "B");
    }
}
