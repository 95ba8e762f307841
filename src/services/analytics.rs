// src/services/analytics.rs

use std::collections::HashMap;

use crate::models::{
    dashboard::{GovernorateCount, OrderInsights, ProductReport, ProductStat},
    orders::{Order, OrderStatus},
};

const TOP_N: usize = 3;
// Abaixo disso a taxa de devolução não diz nada
const MIN_ORDERS_FOR_RETURN_RANKING: usize = 5;

fn rate(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Agrupa por nome do produto (trim + minúsculas), mantendo a primeira grafia vista.
pub fn product_stats(orders: &[Order]) -> Vec<ProductStat> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut stats: Vec<ProductStat> = Vec::new();

    for order in orders {
        let name = order.product.trim();
        if name.is_empty() {
            continue;
        }

        let slot = *index.entry(name.to_lowercase()).or_insert_with(|| {
            stats.push(ProductStat {
                name: name.to_string(),
                total: 0,
                delivered: 0,
                returned: 0,
                return_rate: 0.0,
                success_rate: 0.0,
            });
            stats.len() - 1
        });

        let stat = &mut stats[slot];
        stat.total += 1;
        match order.status {
            OrderStatus::Delivered => stat.delivered += 1,
            OrderStatus::Returned => stat.returned += 1,
            _ => {}
        }
    }

    for stat in &mut stats {
        stat.return_rate = rate(stat.returned, stat.total);
        stat.success_rate = rate(stat.delivered, stat.total);
    }

    stats
}

pub fn product_report(orders: &[Order]) -> ProductReport {
    let stats = product_stats(orders);

    let mut top_sellers = stats.clone();
    top_sellers.sort_by(|a, b| b.delivered.cmp(&a.delivered));
    top_sellers.truncate(TOP_N);

    let mut high_returns: Vec<ProductStat> = stats
        .into_iter()
        .filter(|s| s.total >= MIN_ORDERS_FOR_RETURN_RANKING && s.return_rate > 0.0)
        .collect();
    high_returns.sort_by(|a, b| b.return_rate.total_cmp(&a.return_rate));
    high_returns.truncate(TOP_N);

    ProductReport { top_sellers, high_returns }
}

/// Total, taxa de entrega (inteira) e as 3 províncias com mais pedidos.
pub fn order_insights(orders: &[Order]) -> OrderInsights {
    let total_orders = orders.len();
    let delivered = orders.iter().filter(|o| o.is_delivered()).count();
    let delivery_rate = rate(delivered, total_orders).round() as u32;

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<GovernorateCount> = Vec::new();
    for order in orders {
        let slot = *index.entry(order.governorate.as_str()).or_insert_with(|| {
            counts.push(GovernorateCount { governorate: order.governorate.clone(), orders: 0 });
            counts.len() - 1
        });
        counts[slot].orders += 1;
    }
    counts.sort_by(|a, b| b.orders.cmp(&a.orders));
    counts.truncate(TOP_N);

    OrderInsights { total_orders, delivery_rate, top_governorates: counts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::aggregation::fixtures::order;

    fn product(name: &str, status: OrderStatus) -> Order {
        let mut o = order(status, false, 10_000, 0, 0);
        o.product = name.to_string();
        o
    }

    #[test]
    fn groups_by_normalized_name_and_keeps_first_spelling() {
        let orders = vec![
            product(" Smart Watch ", OrderStatus::Delivered),
            product("smart watch", OrderStatus::Returned),
            product("SMART WATCH", OrderStatus::New),
            product("   ", OrderStatus::Delivered),
        ];
        let stats = product_stats(&orders);

        assert_eq!(stats.len(), 1);
        let watch = &stats[0];
        assert_eq!(watch.name, "Smart Watch");
        assert_eq!((watch.total, watch.delivered, watch.returned), (3, 1, 1));
        assert!((watch.success_rate - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn high_returns_need_five_orders() {
        let mut orders = Vec::new();
        for _ in 0..4 {
            orders.push(product("Lamp", OrderStatus::Returned));
        }
        for status in [
            OrderStatus::Returned,
            OrderStatus::Returned,
            OrderStatus::Delivered,
            OrderStatus::Delivered,
            OrderStatus::Delivered,
        ] {
            orders.push(product("Bag", status));
        }

        let report = product_report(&orders);
        assert_eq!(report.high_returns.len(), 1);
        assert_eq!(report.high_returns[0].name, "Bag");
        assert_eq!(report.top_sellers[0].name, "Bag");
    }

    #[test]
    fn top_sellers_are_capped_at_three() {
        let orders: Vec<Order> = ["A", "B", "C", "D"]
            .iter()
            .map(|n| product(n, OrderStatus::Delivered))
            .collect();
        assert_eq!(product_report(&orders).top_sellers.len(), 3);
    }

    #[test]
    fn insights_round_delivery_rate_and_rank_governorates() {
        let mut orders = vec![
            order(OrderStatus::Delivered, true, 1, 0, 0),
            order(OrderStatus::Delivered, true, 1, 0, 0),
            order(OrderStatus::Returned, false, 1, 0, 0),
        ];
        orders[2].governorate = "البصرة".into();

        let insights = order_insights(&orders);
        assert_eq!(insights.total_orders, 3);
        assert_eq!(insights.delivery_rate, 67);
        assert_eq!(insights.top_governorates[0].governorate, "بغداد");
        assert_eq!(insights.top_governorates[0].orders, 2);

        assert_eq!(order_insights(&[]).delivery_rate, 0);
    }
}
