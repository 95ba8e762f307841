// src/db/finance_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::like_pattern, error::AppError},
    models::finance::{Expense, Supplier, SupplierLedgerEntry, TransactionType},
};

const EXPENSE_COLUMNS: &str = "id, user_id, title, amount, category, created_at";
const SUPPLIER_COLUMNS: &str = "id, user_id, name, phone, created_at";
const LEDGER_COLUMNS: &str =
    "id, user_id, supplier_id, transaction_type, amount, notes, transaction_date, created_at";

#[derive(Clone, Default)]
pub struct FinanceRepository;

impl FinanceRepository {
    pub fn new() -> Self {
        Self
    }

    // =========================================================================
    //  DESPESAS
    // =========================================================================

    pub async fn create_expense<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        title: &str,
        amount: Decimal,
        category: &str,
    ) -> Result<Expense, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "INSERT INTO expenses (user_id, title, amount, category) \
             VALUES ($1, $2, $3, $4) RETURNING {EXPENSE_COLUMNS}"
        );
        let expense = sqlx::query_as::<_, Expense>(&sql)
            .bind(user_id)
            .bind(title)
            .bind(amount)
            .bind(category)
            .fetch_one(executor)
            .await?;

        Ok(expense)
    }

    pub async fn list_expenses<'e, E>(&self, executor: E, user_id: Uuid) -> Result<Vec<Expense>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses WHERE user_id = $1 ORDER BY created_at DESC"
        );
        let expenses = sqlx::query_as::<_, Expense>(&sql)
            .bind(user_id)
            .fetch_all(executor)
            .await?;

        Ok(expenses)
    }

    pub async fn delete_expense<'e, E>(&self, executor: E, user_id: Uuid, expense_id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1 AND user_id = $2")
            .bind(expense_id)
            .bind(user_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    //  FORNECEDORES
    // =========================================================================

    pub async fn create_supplier<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        name: &str,
        phone: &str,
    ) -> Result<Supplier, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "INSERT INTO suppliers (user_id, name, phone) VALUES ($1, $2, $3) RETURNING {SUPPLIER_COLUMNS}"
        );
        let supplier = sqlx::query_as::<_, Supplier>(&sql)
            .bind(user_id)
            .bind(name)
            .bind(phone)
            .fetch_one(executor)
            .await?;

        Ok(supplier)
    }

    /// Busca por nome (sem diferenciar maiúsculas) ou telefone.
    pub async fn list_suppliers<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        search: Option<&str>,
    ) -> Result<Vec<Supplier>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let pattern = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(like_pattern);

        let sql = format!(
            r#"
            SELECT {SUPPLIER_COLUMNS}
            FROM suppliers
            WHERE user_id = $1
              AND ($2::text IS NULL OR name ILIKE $2 OR phone LIKE $2)
            ORDER BY name ASC
            "#
        );
        let suppliers = sqlx::query_as::<_, Supplier>(&sql)
            .bind(user_id)
            .bind(pattern)
            .fetch_all(executor)
            .await?;

        Ok(suppliers)
    }

    pub async fn find_supplier<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        supplier_id: Uuid,
    ) -> Result<Option<Supplier>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("SELECT {SUPPLIER_COLUMNS} FROM suppliers WHERE id = $1 AND user_id = $2");
        let supplier = sqlx::query_as::<_, Supplier>(&sql)
            .bind(supplier_id)
            .bind(user_id)
            .fetch_optional(executor)
            .await?;

        Ok(supplier)
    }

    // =========================================================================
    //  CONTA CORRENTE (Ledger)
    // =========================================================================

    pub async fn create_ledger_entry<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        supplier_id: Uuid,
        kind: TransactionType,
        amount: Decimal,
        notes: Option<&str>,
        transaction_date: NaiveDate,
    ) -> Result<SupplierLedgerEntry, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO supplier_ledger (user_id, supplier_id, transaction_type, amount, notes, transaction_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {LEDGER_COLUMNS}
            "#
        );
        let entry = sqlx::query_as::<_, SupplierLedgerEntry>(&sql)
            .bind(user_id)
            .bind(supplier_id)
            .bind(kind)
            .bind(amount)
            .bind(notes)
            .bind(transaction_date)
            .fetch_one(executor)
            .await?;

        Ok(entry)
    }

    /// Todos os lançamentos da conta, mais recentes primeiro.
    pub async fn list_ledger<'e, E>(&self, executor: E, user_id: Uuid) -> Result<Vec<SupplierLedgerEntry>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "SELECT {LEDGER_COLUMNS} FROM supplier_ledger WHERE user_id = $1 \
             ORDER BY transaction_date DESC, created_at DESC"
        );
        let entries = sqlx::query_as::<_, SupplierLedgerEntry>(&sql)
            .bind(user_id)
            .fetch_all(executor)
            .await?;

        Ok(entries)
    }

    pub async fn list_ledger_for_supplier<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        supplier_id: Uuid,
    ) -> Result<Vec<SupplierLedgerEntry>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "SELECT {LEDGER_COLUMNS} FROM supplier_ledger WHERE user_id = $1 AND supplier_id = $2 \
             ORDER BY transaction_date DESC, created_at DESC"
        );
        let entries = sqlx::query_as::<_, SupplierLedgerEntry>(&sql)
            .bind(user_id)
            .bind(supplier_id)
            .fetch_all(executor)
            .await?;

        Ok(entries)
    }
}
