// src/config.rs

use std::{env, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    common::i18n::I18nStore,
    db::{
        BlacklistRepository, CampaignRepository, DeliveryRepository, FinanceRepository,
        OrderRepository, UserRepository,
    },
    services::{
        auth::AuthService, blacklist_service::BlacklistService, campaign_service::CampaignService,
        dashboard_service::DashboardService, delivery_service::DeliveryService,
        finance_service::FinanceService, order_service::OrderService, risk::RiskService,
    },
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Tudo que vem do ambiente (.env em desenvolvimento).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub access_codes: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let access_codes = parse_access_codes(&env::var("ACCESS_CODES").unwrap_or_default());

        if access_codes.is_empty() {
            tracing::warn!("⚠️ ACCESS_CODES vazio: nenhuma conta conseguirá liberar o app");
        }

        Ok(Self { database_url, jwt_secret, bind_addr, access_codes })
    }
}

/// "A1, b2 ,,C3" -> ["A1", "b2", "C3"]
pub fn parse_access_codes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub i18n_store: I18nStore,

    pub auth_service: AuthService,
    pub order_service: OrderService,
    pub risk_service: RiskService,
    pub delivery_service: DeliveryService,
    pub finance_service: FinanceService,
    pub campaign_service: CampaignService,
    pub blacklist_service: BlacklistService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    // Conecta ao banco e monta o estado; erros sobem em vez de dar panic
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::from_parts(config, db_pool))
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_parts(config: &AppConfig, db_pool: PgPool) -> Self {
        let user_repo = UserRepository::new(db_pool.clone());
        let order_repo = OrderRepository::new();
        let finance_repo = FinanceRepository::new();
        let campaign_repo = CampaignRepository::new();
        let blacklist_repo = BlacklistRepository::new();
        let delivery_repo = DeliveryRepository::new();

        let auth_service = AuthService::new(
            user_repo,
            config.jwt_secret.clone(),
            config.access_codes.clone(),
        );
        let risk_service = RiskService::new(order_repo.clone(), blacklist_repo.clone());
        let campaign_service = CampaignService::new(campaign_repo.clone());
        let blacklist_service = BlacklistService::new(blacklist_repo);
        let order_service = OrderService::new(
            order_repo.clone(),
            delivery_repo.clone(),
            risk_service.clone(),
            campaign_service.clone(),
            blacklist_service.clone(),
        );

        Self {
            db_pool,
            i18n_store: I18nStore::new(),
            auth_service,
            order_service,
            risk_service,
            delivery_service: DeliveryService::new(delivery_repo),
            finance_service: FinanceService::new(finance_repo.clone()),
            campaign_service,
            blacklist_service,
            dashboard_service: DashboardService::new(order_repo, finance_repo, campaign_repo),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_codes_are_split_and_trimmed() {
        assert_eq!(parse_access_codes("A1, b2 ,,C3"), vec!["A1", "b2", "C3"]);
        assert!(parse_access_codes("").is_empty());
    }
}
