// src/models/finance.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::non_negative;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "ledger_transaction_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Purchase, // Compra a prazo: aumenta a dívida
    Payment,  // Pagamento: diminui a dívida
}

// =========================================================================
//  DESPESAS
// =========================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Uuid,

    #[schema(ignore)]
    pub user_id: Uuid,

    #[schema(example = "إعلانات فيسبوك")]
    pub title: String,

    #[schema(example = "50000")]
    pub amount: Decimal,

    #[schema(example = "نثريات")]
    pub category: String,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpensePayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "إعلانات فيسبوك")]
    pub title: String,

    #[validate(custom(function = "non_negative"))]
    #[schema(example = "50000")]
    pub amount: Decimal,

    #[schema(example = "نثريات")]
    pub category: Option<String>,
}

pub const DEFAULT_EXPENSE_CATEGORY: &str = "نثريات";

// =========================================================================
//  FORNECEDORES & CONTA CORRENTE
// =========================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: Uuid,

    #[schema(ignore)]
    pub user_id: Uuid,

    #[schema(example = "مخزن الرشيد")]
    pub name: String,

    #[schema(example = "07801234567")]
    pub phone: String,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplierLedgerEntry {
    pub id: Uuid,

    #[schema(ignore)]
    pub user_id: Uuid,

    pub supplier_id: Uuid,
    pub transaction_type: TransactionType,

    #[schema(example = "1000")]
    pub amount: Decimal,

    pub notes: Option<String>,

    #[schema(value_type = String, format = Date, example = "2026-01-15")]
    pub transaction_date: NaiveDate,

    pub created_at: DateTime<Utc>,
}

impl SupplierLedgerEntry {
    /// Efeito do lançamento sobre a dívida com o fornecedor.
    pub fn signed_amount(&self) -> Decimal {
        match self.transaction_type {
            TransactionType::Purchase => self.amount,
            TransactionType::Payment => -self.amount,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSupplierPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "مخزن الرشيد")]
    pub name: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "07801234567")]
    pub phone: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLedgerEntryPayload {
    pub transaction_type: TransactionType,

    #[validate(custom(function = "non_negative"))]
    #[schema(example = "1000")]
    pub amount: Decimal,

    pub notes: Option<String>,

    // Se não vier, usamos a data de hoje
    #[schema(value_type = Option<String>, format = Date, example = "2026-01-15")]
    pub transaction_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SupplierSearch {
    pub search: Option<String>,
}

// --- Respostas ---

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplierWithBalance {
    #[serde(flatten)]
    pub supplier: Supplier,
    pub balance: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplierLedgerView {
    pub supplier: Supplier,
    pub balance: Decimal,
    pub entries: Vec<SupplierLedgerEntry>,
}
