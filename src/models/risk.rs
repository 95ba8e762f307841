// src/models/risk.rs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Safe,
    Warning,
    Blocked,
    // Edição de pedido com o mesmo telefone: cliente já verificado
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub tier: RiskTier,
    /// Motivo gravado na lista negra (só em `blocked`)
    pub reason: Option<String>,
    pub returned_orders: usize,
    pub total_orders: usize,
    /// Mensagem pronta para o banner, já traduzida
    pub message: Option<String>,
}

impl RiskAssessment {
    pub fn blocks_submission(&self) -> bool {
        self.tier == RiskTier::Blocked
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RiskQuery {
    pub phone: String,
    /// Pedido em edição, se houver
    pub order_id: Option<Uuid>,
}
