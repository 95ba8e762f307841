// src/services/delivery_service.rs

use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::{Executor, PgConnection, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::DeliveryRepository,
    models::delivery::{
        is_known_governorate, DeliveryRate, GovernorateRate, ResolvedDeliveryCost, GOVERNORATES,
    },
};

/// Tarifa cadastrada > 0 sobrescreve o campo; ausente ou zero mantém o valor atual.
pub fn resolve_delivery_cost(rate: Option<Decimal>, current: Option<Decimal>) -> Option<Decimal> {
    match rate {
        Some(price) if price > Decimal::ZERO => Some(price),
        _ => current,
    }
}

/// Tabela completa para a tela de tarifas: as 18 províncias, zero quando não cadastrada.
pub fn rate_book(stored: &[DeliveryRate]) -> Vec<GovernorateRate> {
    let by_name: HashMap<&str, Decimal> = stored
        .iter()
        .map(|r| (r.governorate.as_str(), r.price))
        .collect();

    GOVERNORATES
        .iter()
        .map(|name| GovernorateRate {
            governorate: name.to_string(),
            price: by_name.get(name).copied().unwrap_or_default(),
        })
        .collect()
}

#[derive(Clone, Default)]
pub struct DeliveryService {
    repo: DeliveryRepository,
}

impl DeliveryService {
    pub fn new(repo: DeliveryRepository) -> Self {
        Self { repo }
    }

    pub async fn list_rates<'e, E>(&self, executor: E, user_id: Uuid) -> Result<Vec<GovernorateRate>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let stored = self.repo.list(executor, user_id).await?;
        Ok(rate_book(&stored))
    }

    /// Salva todas as tarifas numa transação; província desconhecida ou preço negativo aborta tudo.
    pub async fn save_rates(
        &self,
        conn: &mut PgConnection,
        user_id: Uuid,
        rates: &[GovernorateRate],
    ) -> Result<Vec<GovernorateRate>, AppError> {

        for rate in rates {
            let name = rate.governorate.trim();
            if !is_known_governorate(name) {
                return Err(AppError::UnknownGovernorate(name.to_string()));
            }
            crate::common::validation::non_negative(&rate.price)
                .map_err(|e| {
                    let mut errors = validator::ValidationErrors::new();
                    errors.add("rates", e);
                    AppError::ValidationError(errors)
                })?;
            self.repo.upsert(&mut *conn, user_id, name, rate.price).await?;
        }

        let stored = self.repo.list(&mut *conn, user_id).await?;

        tracing::info!("🚚 {} tarifas de entrega salvas para {}", rates.len(), user_id);
        Ok(rate_book(&stored))
    }

    /// O que o formulário de pedido deve mostrar no campo de frete ao escolher a província.
    pub async fn resolve<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        governorate: &str,
        current: Option<Decimal>,
    ) -> Result<ResolvedDeliveryCost, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let name = governorate.trim();
        let rate = self.repo.find(executor, user_id, name).await?.map(|r| r.price);
        let delivery_cost = resolve_delivery_cost(rate, current);

        Ok(ResolvedDeliveryCost {
            governorate: name.to_string(),
            from_rate: rate.is_some_and(|p| p > Decimal::ZERO),
            delivery_cost,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_rate_overwrites_the_field() {
        let rate = Some(Decimal::from(5000));
        assert_eq!(resolve_delivery_cost(rate, Some(Decimal::from(3000))), rate);
        assert_eq!(resolve_delivery_cost(rate, None), rate);
    }

    #[test]
    fn missing_or_zero_rate_keeps_current_value() {
        let current = Some(Decimal::from(3000));
        assert_eq!(resolve_delivery_cost(None, current), current);
        assert_eq!(resolve_delivery_cost(Some(Decimal::ZERO), current), current);
        assert_eq!(resolve_delivery_cost(None, None), None);
    }

    #[test]
    fn rate_book_lists_every_governorate() {
        let stored = vec![DeliveryRate {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            governorate: "البصرة".into(),
            price: Decimal::from(6000),
        }];
        let book = rate_book(&stored);

        assert_eq!(book.len(), GOVERNORATES.len());
        let basra = book.iter().find(|r| r.governorate == "البصرة").unwrap();
        assert_eq!(basra.price, Decimal::from(6000));
        assert!(book.iter().filter(|r| r.governorate != "البصرة").all(|r| r.price.is_zero()));
    }
}
