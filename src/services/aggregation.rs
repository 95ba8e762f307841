// src/services/aggregation.rs

use rust_decimal::Decimal;

use crate::models::{
    dashboard::FinancialSummary,
    finance::{Expense, SupplierLedgerEntry},
    orders::Order,
};

/// Calcula os cards do topo do painel a partir das coleções cruas.
///
/// Só pedidos entregues contam dinheiro. O frete é do entregador: entra no
/// valor pendente bruto (é o que ele tem em mãos) mas nunca como receita ou custo.
pub fn summarize(
    orders: &[Order],
    expenses: &[Expense],
    ledger: &[SupplierLedgerEntry],
) -> FinancialSummary {
    let mut summary = FinancialSummary::default();
    let mut collected_cost = Decimal::ZERO;

    for order in orders.iter().filter(|o| o.is_delivered()) {
        if order.is_collected {
            summary.cash += order.merchant_amount();
            collected_cost += order.cost_price.unwrap_or_default();
        } else {
            summary.pending_gross += order.courier_amount();
            summary.pending_net += order.merchant_amount();
        }
    }

    summary.total_expenses = expenses.iter().map(|e| e.amount).sum();
    summary.net_profit = summary.cash - collected_cost - summary.total_expenses;
    summary.total_supplier_debt = ledger.iter().map(SupplierLedgerEntry::signed_amount).sum();

    summary
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use crate::models::{
        finance::{Expense, SupplierLedgerEntry, TransactionType},
        orders::{Order, OrderStatus},
    };

    pub fn order(status: OrderStatus, collected: bool, price: i64, delivery: i64, discount: i64) -> Order {
        let now = Utc::now();
        Order {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            customer_name: "Ali".into(),
            phone: "07701234567".into(),
            governorate: "بغداد".into(),
            address: None,
            product: "Watch".into(),
            price: Decimal::from(price),
            delivery_cost: Decimal::from(delivery),
            discount: Decimal::from(discount),
            cost_price: None,
            status,
            is_collected: collected,
            campaign_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn expense(amount: i64) -> Expense {
        Expense {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            title: "Ads".into(),
            amount: Decimal::from(amount),
            category: "إعلانات".into(),
            created_at: Utc::now(),
        }
    }

    pub fn ledger(kind: TransactionType, amount: i64, supplier_id: Uuid) -> SupplierLedgerEntry {
        SupplierLedgerEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            supplier_id,
            transaction_type: kind,
            amount: Decimal::from(amount),
            notes: None,
            transaction_date: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::models::{finance::TransactionType, orders::OrderStatus};
    use uuid::Uuid;

    #[test]
    fn undelivered_orders_count_for_nothing() {
        let orders = vec![
            order(OrderStatus::New, true, 10_000, 5_000, 0),
            order(OrderStatus::Processing, false, 20_000, 5_000, 0),
            order(OrderStatus::OutForDelivery, false, 30_000, 5_000, 0),
            order(OrderStatus::Returned, true, 40_000, 5_000, 0),
        ];
        let summary = summarize(&orders, &[], &[]);
        assert_eq!(summary, FinancialSummary::default());
    }

    #[test]
    fn delivery_cost_only_shows_in_pending_gross() {
        let orders = vec![
            order(OrderStatus::Delivered, true, 25_000, 5_000, 1_000),
            order(OrderStatus::Delivered, false, 30_000, 6_000, 0),
        ];
        let summary = summarize(&orders, &[], &[]);

        assert_eq!(summary.cash, Decimal::from(24_000));
        assert_eq!(summary.pending_gross, Decimal::from(36_000));
        assert_eq!(summary.pending_net, Decimal::from(30_000));
        assert!(summary.cash + summary.pending_gross > summary.cash + summary.pending_net);
        // Lucro só olha o que já foi repassado
        assert_eq!(summary.net_profit, Decimal::from(24_000));
    }

    #[test]
    fn net_profit_subtracts_cost_and_expenses_and_may_go_negative() {
        let mut sold = order(OrderStatus::Delivered, true, 20_000, 5_000, 0);
        sold.cost_price = Some(Decimal::from(12_000));
        let mut pending = order(OrderStatus::Delivered, false, 50_000, 5_000, 0);
        pending.cost_price = Some(Decimal::from(40_000));

        let summary = summarize(&[sold, pending], &[expense(3_000), expense(10_000)], &[]);
        assert_eq!(summary.total_expenses, Decimal::from(13_000));
        assert_eq!(summary.net_profit, Decimal::from(-5_000));
    }

    #[test]
    fn supplier_debt_nets_purchases_and_payments() {
        let supplier = Uuid::new_v4();
        let ledger = vec![
            super::fixtures::ledger(TransactionType::Purchase, 1_000, supplier),
            super::fixtures::ledger(TransactionType::Payment, 400, supplier),
            super::fixtures::ledger(TransactionType::Purchase, 200, supplier),
        ];
        let summary = summarize(&[], &[], &ledger);
        assert_eq!(summary.total_supplier_debt, Decimal::from(800));
    }

    #[test]
    fn same_input_same_output() {
        let orders = vec![order(OrderStatus::Delivered, true, 10_000, 2_000, 0)];
        let expenses = vec![expense(500)];
        assert_eq!(summarize(&orders, &expenses, &[]), summarize(&orders, &expenses, &[]));
    }
}
