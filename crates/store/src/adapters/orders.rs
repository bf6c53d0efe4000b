//! Order store adapter.
//!
//! Orders are created once at checkout with a generated order number and an
//! immutable item snapshot. The only mutation afterwards is the status
//! transition, driven by the admin surface.

use std::sync::Arc;

use chrono::Utc;
use rand::Rng;

use ridegear_core::{Email, Money, OrderId, OrderStatus, PaymentMethod, UserId};

use super::{decode, encode, paginate, Page};
use crate::backend::StoreBackend;
use crate::entities::{Address, Order, OrderItem};
use crate::{stores, StoreError};

/// Filter and pagination parameters for [`OrderStore::list`].
#[derive(Debug, Clone, Default)]
pub struct OrderListParams {
    pub status: Option<OrderStatus>,
    pub user_id: Option<UserId>,
    pub offset: usize,
    pub limit: usize,
}

impl OrderListParams {
    pub const DEFAULT_LIMIT: usize = 20;
}

/// Everything checkout captures to create an order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: Option<UserId>,
    pub email: Email,
    pub items: Vec<OrderItem>,
    pub address: Address,
    pub payment_method: PaymentMethod,
    pub subtotal: Money,
    pub tax: Money,
    pub shipping: Money,
    pub discount: Money,
    pub total: Money,
    pub coupon_code: Option<String>,
}

/// Adapter for the `orders` object store.
#[derive(Clone)]
pub struct OrderStore {
    backend: Arc<dyn StoreBackend>,
}

impl OrderStore {
    #[must_use]
    pub fn new(backend: Arc<dyn StoreBackend>) -> Self {
        Self { backend }
    }

    async fn all(&self) -> Result<Vec<Order>, StoreError> {
        self.backend
            .load(stores::ORDERS)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    /// List orders newest first, optionally filtered by status or owner.
    ///
    /// # Errors
    ///
    /// Backend or corruption errors only.
    pub async fn list(&self, params: &OrderListParams) -> Result<Page<Order>, StoreError> {
        let mut orders: Vec<Order> = self
            .all()
            .await?
            .into_iter()
            .filter(|o| params.status.is_none_or(|s| o.status == s))
            .filter(|o| params.user_id.is_none_or(|u| o.user_id == Some(u)))
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let limit = if params.limit == 0 {
            OrderListParams::DEFAULT_LIMIT
        } else {
            params.limit
        };
        Ok(paginate(orders, params.offset, limit))
    }

    /// # Errors
    ///
    /// Backend or corruption errors only; absence is `Ok(None)`.
    pub async fn get(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        match self.backend.get(stores::ORDERS, &id.to_string()).await? {
            Some(doc) => Ok(Some(decode(doc)?)),
            None => Ok(None),
        }
    }

    /// Create an order in `Pending` status with a freshly generated number.
    ///
    /// # Errors
    ///
    /// Backend or serialization errors only.
    pub async fn create(&self, new: NewOrder) -> Result<Order, StoreError> {
        let now = Utc::now();
        let order = Order {
            id: OrderId::generate(),
            number: generate_order_number(),
            user_id: new.user_id,
            email: new.email,
            items: new.items,
            address: new.address,
            payment_method: new.payment_method,
            subtotal: new.subtotal,
            tax: new.tax,
            shipping: new.shipping,
            discount: new.discount,
            total: new.total,
            coupon_code: new.coupon_code,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        self.backend
            .put(stores::ORDERS, &order.id.to_string(), encode(&order)?)
            .await?;
        Ok(order)
    }

    /// Move an order to `next` status.
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` for an absent id; `StoreError::Conflict` for
    /// an illegal transition (the status machine is pending -> paid ->
    /// shipped -> delivered, with cancel from any non-terminal state).
    pub async fn update_status(
        &self,
        id: OrderId,
        next: OrderStatus,
    ) -> Result<Order, StoreError> {
        let mut order = self.get(id).await?.ok_or(StoreError::NotFound)?;

        if !order.status.can_transition_to(next) {
            return Err(StoreError::Conflict(format!(
                "cannot move order from {} to {next}",
                order.status
            )));
        }

        order.status = next;
        order.updated_at = Utc::now();

        self.backend
            .put(stores::ORDERS, &id.to_string(), encode(&order)?)
            .await?;
        Ok(order)
    }
}

/// Human-facing order number, e.g. `RG-58A31F07`.
fn generate_order_number() -> String {
    let suffix: u32 = rand::rng().random();
    format!("RG-{suffix:08X}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    fn store() -> OrderStore {
        OrderStore::new(Arc::new(MemoryBackend::new()))
    }

    fn new_order(total: i64) -> NewOrder {
        NewOrder {
            user_id: None,
            email: Email::parse("rider@example.com").expect("valid"),
            items: vec![],
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
        }
    }

    #[tokio::test]
    async fn create_starts_pending_with_a_number() {
        let order = store().create(new_order(5999)).await.expect("create");
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.number.starts_with("RG-"));
        assert_eq!(order.number.len(), 11);
    }

    #[tokio::test]
    async fn status_walks_legally_and_rejects_jumps() {
        let store = store();
        let order = store.create(new_order(5999)).await.expect("create");

        let err = store
            .update_status(order.id, OrderStatus::Shipped)
            .await
            .expect_err("jump");
        assert!(matches!(err, StoreError::Conflict(_)));

        let order = store
            .update_status(order.id, OrderStatus::Paid)
            .await
            .expect("paid");
        assert_eq!(order.status, OrderStatus::Paid);

        let order = store
            .update_status(order.id, OrderStatus::Shipped)
            .await
            .expect("shipped");
        let order = store
            .update_status(order.id, OrderStatus::Delivered)
            .await
            .expect("delivered");
        assert_eq!(order.status, OrderStatus::Delivered);

        let err = store
            .update_status(order.id, OrderStatus::Canceled)
            .await
            .expect_err("terminal");
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_status_on_missing_order_is_not_found() {
        let err = store()
            .update_status(OrderId::generate(), OrderStatus::Paid)
            .await
            .expect_err("missing");
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn list_filters_by_status() {
        let store = store();
        let a = store.create(new_order(1000)).await.expect("create");
        store.create(new_order(2000)).await.expect("create");
        store
            .update_status(a.id, OrderStatus::Paid)
            .await
            .expect("paid");

        let page = store
            .list(&OrderListParams {
                status: Some(OrderStatus::Pending),
                ..OrderListParams::default()
            })
            .await
            .expect("list");
        assert_eq!(page.total, 1);
    }
}
