//! Dashboard analytics computed from order snapshots.

use std::collections::BTreeMap;

use serde::Serialize;

use ridegear_core::{Money, OrderStatus, ProductId};
use ridegear_store::entities::Order;

/// How many products the top-sellers list carries.
const TOP_PRODUCTS: usize = 5;

/// One row of the top-sellers list.
#[derive(Debug, Clone, Serialize)]
pub struct TopProduct {
    pub product_id: ProductId,
    pub title: String,
    pub units: u32,
}

/// The analytics payload for the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSummary {
    /// Revenue across all non-canceled orders.
    pub revenue: Money,
    pub order_count: usize,
    pub average_order_value: Money,
    pub orders_by_status: BTreeMap<String, usize>,
    pub top_products: Vec<TopProduct>,
}

/// Aggregate order snapshots into the dashboard summary.
///
/// Canceled orders count toward the status breakdown but not revenue.
#[must_use]
pub fn summarize(orders: &[Order]) -> AnalyticsSummary {
    let mut orders_by_status: BTreeMap<String, usize> = BTreeMap::new();
    for order in orders {
        *orders_by_status.entry(order.status.to_string()).or_default() += 1;
    }

    let billable: Vec<&Order> = orders
        .iter()
        .filter(|o| o.status != OrderStatus::Canceled)
        .collect();

    let revenue: Money = billable.iter().map(|o| o.total).sum();
    let order_count = billable.len();
    let average_order_value = if order_count == 0 {
        Money::ZERO
    } else {
        Money::from_cents(revenue.cents() / order_count as i64)
    };

    let mut units_by_product: BTreeMap<ProductId, (String, u32)> = BTreeMap::new();
    for order in &billable {
        for item in &order.items {
            let entry = units_by_product
                .entry(item.product_id)
                .or_insert_with(|| (item.title.clone(), 0));
            entry.1 += item.quantity;
        }
    }
    let mut top_products: Vec<TopProduct> = units_by_product
        .into_iter()
        .map(|(product_id, (title, units))| TopProduct {
            product_id,
            title,
            units,
        })
        .collect();
    top_products.sort_by(|a, b| b.units.cmp(&a.units).then(a.title.cmp(&b.title)));
    top_products.truncate(TOP_PRODUCTS);

    AnalyticsSummary {
        revenue,
        order_count,
        average_order_value,
        orders_by_status,
        top_products,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ridegear_core::{Email, OrderId, PaymentMethod};
    use ridegear_store::entities::{Address, OrderItem};

    fn order(total: i64, status: OrderStatus, items: Vec<OrderItem>) -> Order {
        let now = Utc::now();
        Order {
            id: OrderId::generate(),
            number: "RG-TEST0000".into(),
            user_id: None,
            email: Email::parse("rider@example.com").expect("valid"),
            items,
            address: Address {
                name: "Rider".into(),
                line1: "1 Apex Way".into(),
                line2: None,
                city: "Laguna Seca".into(),
                state: "CA".into(),
                postal_code: "93908".into(),
                country: "US".into(),
            },
            payment_method: PaymentMethod::Card,
            subtotal: Money::from_cents(total),
            tax: Money::ZERO,
            shipping: Money::ZERO,
            discount: Money::ZERO,
            total: Money::from_cents(total),
            coupon_code: None,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    fn item(title: &str, id: u128, quantity: u32) -> OrderItem {
        OrderItem {
            product_id: ProductId::from_uuid(uuid::Uuid::from_u128(id)),
            slug: title.to_lowercase().replace(' ', "-"),
            title: title.into(),
            brand: "Vortex".into(),
            variant: None,
            unit_price: Money::from_cents(1000),
            quantity,
            line_total: Money::from_cents(1000).times(quantity),
        }
    }

    #[test]
    fn canceled_orders_are_excluded_from_revenue() {
        let orders = vec![
            order(5000, OrderStatus::Paid, vec![item("Helmet", 1, 1)]),
            order(3000, OrderStatus::Canceled, vec![item("Gloves", 2, 2)]),
        ];

        let summary = summarize(&orders);
        assert_eq!(summary.revenue, Money::from_cents(5000));
        assert_eq!(summary.order_count, 1);
        assert_eq!(summary.orders_by_status.get("canceled"), Some(&1));
    }

    #[test]
    fn top_products_rank_by_units() {
        let orders = vec![
            order(
                1000,
                OrderStatus::Paid,
                vec![item("Helmet", 1, 1), item("Gloves", 2, 5)],
            ),
            order(1000, OrderStatus::Pending, vec![item("Gloves", 2, 2)]),
        ];

        let summary = summarize(&orders);
        assert_eq!(summary.top_products[0].title, "Gloves");
        assert_eq!(summary.top_products[0].units, 7);
    }

    #[test]
    fn empty_orders_produce_zeroes() {
        let summary = summarize(&[]);
        assert_eq!(summary.revenue, Money::ZERO);
        assert_eq!(summary.average_order_value, Money::ZERO);
        assert!(summary.top_products.is_empty());
    }
}
