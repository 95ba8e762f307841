// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{
    campaigns::Campaign,
    finance::{Expense, Supplier, SupplierLedgerEntry},
    orders::Order,
};

// 1. Os Cards do Topo (recalculados do zero a cada requisição)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    /// Já repassado pelo entregador: Σ (preço − desconto)
    pub cash: Decimal,
    /// Em mãos do entregador, com o frete: Σ (preço + frete − desconto)
    pub pending_gross: Decimal,
    /// Parte do lojista no valor pendente: Σ (preço − desconto)
    pub pending_net: Decimal,
    pub total_expenses: Decimal,
    /// Pode ser negativo
    pub net_profit: Decimal,
    pub total_supplier_debt: Decimal,
}

// 2. Indicadores de pedidos
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GovernorateCount {
    pub governorate: String,
    pub orders: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderInsights {
    pub total_orders: usize,
    /// Percentual inteiro de pedidos entregues
    pub delivery_rate: u32,
    pub top_governorates: Vec<GovernorateCount>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub summary: FinancialSummary,
    pub insights: OrderInsights,
}

// 3. Desempenho por produto
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductStat {
    pub name: String,
    pub total: usize,
    pub delivered: usize,
    pub returned: usize,
    pub return_rate: f64,
    pub success_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductReport {
    pub top_sellers: Vec<ProductStat>,
    pub high_returns: Vec<ProductStat>,
}

// 4. Tudo de uma vez, numa leitura consistente
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountSnapshot {
    pub orders: Vec<Order>,
    pub expenses: Vec<Expense>,
    pub suppliers: Vec<Supplier>,
    pub ledger: Vec<SupplierLedgerEntry>,
    pub campaigns: Vec<Campaign>,
}
