// src/services/risk.rs

use sqlx::PgConnection;
use uuid::Uuid;

use crate::{
    common::{error::AppError, i18n::I18nStore},
    db::{BlacklistRepository, OrderRepository},
    models::{
        blacklist::BlacklistEntry,
        orders::OrderStatus,
        risk::{RiskAssessment, RiskTier},
    },
};

/// Telefones mais curtos que isso ainda estão sendo digitados: nada a verificar.
pub const MIN_PHONE_LEN: usize = 10;

const MIN_HISTORY: usize = 2;
const WARNING_RETURN_RATE: f64 = 50.0;

// =========================================================================
//  CLASSIFICAÇÃO (pura)
// =========================================================================

/// Tabela de decisão: lista negra primeiro, depois histórico de devoluções.
pub fn assess(
    phone: &str,
    blacklisted: Option<&BlacklistEntry>,
    history: &[OrderStatus],
) -> RiskAssessment {
    let total = history.len();
    let returned = history.iter().filter(|s| **s == OrderStatus::Returned).count();

    let mut assessment = RiskAssessment {
        tier: RiskTier::Safe,
        reason: None,
        returned_orders: returned,
        total_orders: total,
        message: None,
    };

    if phone.trim().chars().count() < MIN_PHONE_LEN {
        return assessment;
    }

    if let Some(entry) = blacklisted {
        assessment.tier = RiskTier::Blocked;
        assessment.reason = Some(entry.reason.clone());
        return assessment;
    }

    if total >= MIN_HISTORY {
        let return_rate = returned as f64 / total as f64 * 100.0;
        if return_rate >= WARNING_RETURN_RATE {
            assessment.tier = RiskTier::Warning;
        }
    }

    assessment
}

/// Edição que mantém o telefone: o cliente já foi verificado quando o pedido foi criado.
pub fn skipped() -> RiskAssessment {
    RiskAssessment {
        tier: RiskTier::Skipped,
        reason: None,
        returned_orders: 0,
        total_orders: 0,
        message: None,
    }
}

pub fn phone_unchanged(previous: Option<&str>, phone: &str) -> bool {
    previous.is_some_and(|p| p.trim() == phone.trim())
}

/// Decide sem consultar o banco: telefone mantido na edição ou ainda incompleto.
pub fn screen(previous: Option<&str>, phone: &str) -> Option<RiskAssessment> {
    if phone_unchanged(previous, phone) {
        return Some(skipped());
    }
    let phone = phone.trim();
    if phone.chars().count() < MIN_PHONE_LEN {
        return Some(assess(phone, None, &[]));
    }
    None
}

/// Preenche a mensagem do banner no idioma do cliente.
pub fn localize(mut assessment: RiskAssessment, lang: &str, i18n: &I18nStore) -> RiskAssessment {
    assessment.message = match assessment.tier {
        RiskTier::Blocked => Some(i18n.render(
            lang,
            "customer_blocked",
            &[("reason", assessment.reason.as_deref().unwrap_or_default())],
        )),
        RiskTier::Warning => {
            let returned = assessment.returned_orders.to_string();
            let total = assessment.total_orders.to_string();
            Some(i18n.render(
                lang,
                "high_return_rate",
                &[("returned", returned.as_str()), ("total", total.as_str())],
            ))
        }
        RiskTier::Safe | RiskTier::Skipped => None,
    };
    assessment
}

// =========================================================================
//  SERVIÇO (consulta lista negra + histórico)
// =========================================================================

#[derive(Clone, Default)]
pub struct RiskService {
    orders: OrderRepository,
    blacklist: BlacklistRepository,
}

impl RiskService {
    pub fn new(orders: OrderRepository, blacklist: BlacklistRepository) -> Self {
        Self { orders, blacklist }
    }

    /// `previous_phone` é o telefone do pedido em edição, se houver.
    pub async fn check(
        &self,
        conn: &mut PgConnection,
        user_id: Uuid,
        phone: &str,
        previous_phone: Option<&str>,
    ) -> Result<RiskAssessment, AppError> {
        if let Some(early) = screen(previous_phone, phone) {
            return Ok(early);
        }

        let phone = phone.trim();
        let entry = self.blacklist.find_by_phone(&mut *conn, user_id, phone).await?;
        if entry.is_some() {
            return Ok(assess(phone, entry.as_ref(), &[]));
        }

        let history = self.orders.statuses_for_phone(&mut *conn, user_id, phone).await?;
        Ok(assess(phone, None, &history))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    const PHONE: &str = "0770000000";

    fn blacklisted(reason: &str) -> BlacklistEntry {
        BlacklistEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            phone: PHONE.into(),
            name: None,
            reason: reason.into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn blacklist_wins_over_history() {
        let entry = blacklisted("fraud");
        let result = assess(PHONE, Some(&entry), &[OrderStatus::Delivered, OrderStatus::Delivered]);
        assert_eq!(result.tier, RiskTier::Blocked);
        assert!(result.blocks_submission());

        let localized = localize(result, "en", &I18nStore::new());
        assert!(localized.message.unwrap().contains("fraud"));
    }

    #[test]
    fn half_or_more_returns_is_a_warning() {
        let history = [OrderStatus::Returned, OrderStatus::Returned, OrderStatus::Delivered];
        let result = assess(PHONE, None, &history);
        assert_eq!(result.tier, RiskTier::Warning);
        assert_eq!((result.returned_orders, result.total_orders), (2, 3));
        assert!(!result.blocks_submission());

        let even = [OrderStatus::Returned, OrderStatus::Delivered];
        assert_eq!(assess(PHONE, None, &even).tier, RiskTier::Warning);
    }

    #[test]
    fn short_history_is_safe() {
        assert_eq!(assess(PHONE, None, &[OrderStatus::Returned]).tier, RiskTier::Safe);
        assert_eq!(assess(PHONE, None, &[]).tier, RiskTier::Safe);

        let low = [OrderStatus::Returned, OrderStatus::Delivered, OrderStatus::Delivered];
        assert_eq!(assess(PHONE, None, &low).tier, RiskTier::Safe);
    }

    #[test]
    fn short_phone_is_never_checked() {
        let entry = blacklisted("fraud");
        assert_eq!(assess("0770", Some(&entry), &[]).tier, RiskTier::Safe);
    }

    #[test]
    fn unchanged_phone_skips_the_check() {
        assert!(phone_unchanged(Some("07701234567"), " 07701234567"));
        assert!(!phone_unchanged(Some("07701234567"), "07709999999"));
        assert!(!phone_unchanged(None, "07701234567"));
        assert_eq!(skipped().tier, RiskTier::Skipped);
    }

    #[test]
    fn screen_decides_before_any_lookup() {
        let kept = screen(Some("07701234567"), "07701234567 ").expect("decided early");
        assert_eq!(kept.tier, RiskTier::Skipped);
        assert_eq!((kept.returned_orders, kept.total_orders), (0, 0));

        let typing = screen(None, " 0770 ").expect("decided early");
        assert_eq!(typing.tier, RiskTier::Safe);

        // telefone novo e completo precisa da lista negra e do histórico
        assert!(screen(Some("07701234567"), "07709999999").is_none());
        assert!(screen(None, PHONE).is_none());
    }

    #[test]
    fn warning_message_carries_counts() {
        let history = [OrderStatus::Returned, OrderStatus::Returned];
        let result = localize(assess(PHONE, None, &history), "en", &I18nStore::new());
        assert_eq!(
            result.message.as_deref(),
            Some("Warning: this customer returned 2 of 2 previous orders.")
        );
    }
}
