// src/services/dashboard_service.rs

use sqlx::{Executor, PgConnection, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CampaignRepository, FinanceRepository, OrderRepository},
    models::{
        campaigns::CampaignReport,
        dashboard::{AccountSnapshot, DashboardOverview, ProductReport},
    },
    services::{aggregation::summarize, analytics, campaign_service::campaign_report},
};

// Tudo é recalculado do zero a cada chamada; as leituras usam a mesma transação da requisição.
#[derive(Clone, Default)]
pub struct DashboardService {
    orders: OrderRepository,
    finance: FinanceRepository,
    campaigns: CampaignRepository,
}

impl DashboardService {
    pub fn new(orders: OrderRepository, finance: FinanceRepository, campaigns: CampaignRepository) -> Self {
        Self { orders, finance, campaigns }
    }

    pub async fn overview(&self, conn: &mut PgConnection, user_id: Uuid) -> Result<DashboardOverview, AppError> {
        let orders = self.orders.list_all(&mut *conn, user_id).await?;
        let expenses = self.finance.list_expenses(&mut *conn, user_id).await?;
        let ledger = self.finance.list_ledger(&mut *conn, user_id).await?;

        Ok(DashboardOverview {
            summary: summarize(&orders, &expenses, &ledger),
            insights: analytics::order_insights(&orders),
        })
    }

    pub async fn products<'e, E>(&self, executor: E, user_id: Uuid) -> Result<ProductReport, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let orders = self.orders.list_all(executor, user_id).await?;
        Ok(analytics::product_report(&orders))
    }

    pub async fn campaigns(&self, conn: &mut PgConnection, user_id: Uuid) -> Result<CampaignReport, AppError> {
        let campaigns = self.campaigns.list_active(&mut *conn, user_id).await?;
        let orders = self.orders.list_all(&mut *conn, user_id).await?;

        Ok(campaign_report(&campaigns, &orders))
    }

    /// "Recarregar tudo": as cinco coleções numa leitura só.
    pub async fn snapshot(&self, conn: &mut PgConnection, user_id: Uuid) -> Result<AccountSnapshot, AppError> {
        Ok(AccountSnapshot {
            orders: self.orders.list_all(&mut *conn, user_id).await?,
            expenses: self.finance.list_expenses(&mut *conn, user_id).await?,
            suppliers: self.finance.list_suppliers(&mut *conn, user_id, None).await?,
            ledger: self.finance.list_ledger(&mut *conn, user_id).await?,
            campaigns: self.campaigns.list_active(&mut *conn, user_id).await?,
        })
    }
}
