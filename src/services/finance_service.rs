// src/services/finance_service.rs

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{Executor, PgConnection, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::FinanceRepository,
    models::finance::{
        CreateExpensePayload, CreateLedgerEntryPayload, CreateSupplierPayload, Expense, Supplier,
        SupplierLedgerEntry, SupplierLedgerView, SupplierWithBalance, DEFAULT_EXPENSE_CATEGORY,
    },
};

/// Saldo devedor por fornecedor: compras somam, pagamentos subtraem.
pub fn supplier_balances(ledger: &[SupplierLedgerEntry]) -> HashMap<Uuid, Decimal> {
    let mut balances: HashMap<Uuid, Decimal> = HashMap::new();
    for entry in ledger {
        *balances.entry(entry.supplier_id).or_default() += entry.signed_amount();
    }
    balances
}

pub fn with_balances(suppliers: Vec<Supplier>, ledger: &[SupplierLedgerEntry]) -> Vec<SupplierWithBalance> {
    let balances = supplier_balances(ledger);
    suppliers
        .into_iter()
        .map(|supplier| {
            let balance = balances.get(&supplier.id).copied().unwrap_or_default();
            SupplierWithBalance { supplier, balance }
        })
        .collect()
}

#[derive(Clone, Default)]
pub struct FinanceService {
    repo: FinanceRepository,
}

impl FinanceService {
    pub fn new(repo: FinanceRepository) -> Self {
        Self { repo }
    }

    // =========================================================================
    //  DESPESAS
    // =========================================================================

    pub async fn create_expense<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        payload: &CreateExpensePayload,
    ) -> Result<Expense, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let category = payload
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_EXPENSE_CATEGORY);

        self.repo
            .create_expense(executor, user_id, payload.title.trim(), payload.amount, category)
            .await
    }

    pub async fn list_expenses<'e, E>(&self, executor: E, user_id: Uuid) -> Result<Vec<Expense>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.list_expenses(executor, user_id).await
    }

    pub async fn delete_expense<'e, E>(&self, executor: E, user_id: Uuid, expense_id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        if self.repo.delete_expense(executor, user_id, expense_id).await? {
            Ok(())
        } else {
            Err(AppError::ResourceNotFound("expense"))
        }
    }

    // =========================================================================
    //  FORNECEDORES
    // =========================================================================

    pub async fn create_supplier<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        payload: &CreateSupplierPayload,
    ) -> Result<SupplierWithBalance, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let supplier = self
            .repo
            .create_supplier(executor, user_id, payload.name.trim(), payload.phone.trim())
            .await?;

        Ok(SupplierWithBalance { supplier, balance: Decimal::ZERO })
    }

    pub async fn list_suppliers(
        &self,
        conn: &mut PgConnection,
        user_id: Uuid,
        search: Option<&str>,
    ) -> Result<Vec<SupplierWithBalance>, AppError> {
        let suppliers = self.repo.list_suppliers(&mut *conn, user_id, search).await?;
        let ledger = self.repo.list_ledger(&mut *conn, user_id).await?;

        Ok(with_balances(suppliers, &ledger))
    }

    pub async fn supplier_ledger(
        &self,
        conn: &mut PgConnection,
        user_id: Uuid,
        supplier_id: Uuid,
    ) -> Result<SupplierLedgerView, AppError> {
        let supplier = self
            .repo
            .find_supplier(&mut *conn, user_id, supplier_id)
            .await?
            .ok_or(AppError::ResourceNotFound("supplier"))?;
        let entries = self.repo.list_ledger_for_supplier(&mut *conn, user_id, supplier_id).await?;
        let balance = entries.iter().map(SupplierLedgerEntry::signed_amount).sum();

        Ok(SupplierLedgerView { supplier, balance, entries })
    }

    /// Lança compra/pagamento e devolve o extrato atualizado do fornecedor.
    pub async fn add_ledger_entry(
        &self,
        conn: &mut PgConnection,
        user_id: Uuid,
        supplier_id: Uuid,
        payload: &CreateLedgerEntryPayload,
    ) -> Result<SupplierLedgerView, AppError> {
        self.repo
            .find_supplier(&mut *conn, user_id, supplier_id)
            .await?
            .ok_or(AppError::ResourceNotFound("supplier"))?;

        let notes = payload.notes.as_deref().map(str::trim).filter(|n| !n.is_empty());
        let date = payload.transaction_date.unwrap_or_else(|| Utc::now().date_naive());

        self.repo
            .create_ledger_entry(
                &mut *conn,
                user_id,
                supplier_id,
                payload.transaction_type,
                payload.amount,
                notes,
                date,
            )
            .await?;

        self.supplier_ledger(&mut *conn, user_id, supplier_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::finance::TransactionType, services::aggregation::fixtures::ledger};

    fn supplier(name: &str) -> Supplier {
        Supplier {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            name: name.into(),
            phone: "07801112222".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn balance_is_per_supplier() {
        let a = supplier("A");
        let b = supplier("B");
        let c = supplier("C");
        let entries = vec![
            ledger(TransactionType::Purchase, 1_000, a.id),
            ledger(TransactionType::Payment, 400, a.id),
            ledger(TransactionType::Purchase, 250, b.id),
        ];

        let listed = with_balances(vec![a, b, c], &entries);
        let balances: Vec<Decimal> = listed.iter().map(|s| s.balance).collect();
        assert_eq!(balances, vec![Decimal::from(600), Decimal::from(250), Decimal::ZERO]);
    }

    #[test]
    fn supplier_balance_serializes_flat() {
        let listed = with_balances(vec![supplier("A")], &[]);
        let json = serde_json::to_value(&listed[0]).unwrap();
        assert_eq!(json["name"], "A");
        assert_eq!(json["balance"], 0.0);
    }
}
