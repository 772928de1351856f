use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use crate::{
    error::OrderError,
    models::order::{CreateOrderRequest, Order, UpdateOrderRequest},
    services::order_store::OrderStore,
};

/// In-memory order store with the same semantics as the MongoDB-backed
/// one, used by the integration test suite.
#[derive(Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<Vec<Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create(&self, request: CreateOrderRequest) -> Result<Order, OrderError> {
        let order = request.into_order(Utc::now())?;

        let mut orders = self.orders.write();
        if orders.iter().any(|o| o.order_id == order.order_id) {
            return Err(OrderError::Validation(format!(
                "an order with orderId \"{}\" already exists",
                order.order_id
            )));
        }
        orders.push(order.clone());
        Ok(order)
    }

    async fn get_by_order_id(&self, order_id: &str) -> Result<Order, OrderError> {
        self.orders
            .read()
            .iter()
            .find(|o| o.order_id == order_id)
            .cloned()
            .ok_or(OrderError::NotFound)
    }

    async fn list_all(&self) -> Result<Vec<Order>, OrderError> {
        // Reverse insertion order first so equal timestamps still come
        // out newest-first under the stable sort.
        let mut orders: Vec<Order> = self.orders.read().iter().rev().cloned().collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn update_by_order_id(
        &self,
        order_id: &str,
        changes: UpdateOrderRequest,
    ) -> Result<Order, OrderError> {
        let changes = changes.normalized()?;

        let mut orders = self.orders.write();
        let order = orders
            .iter_mut()
            .find(|o| o.order_id == order_id)
            .ok_or(OrderError::NotFound)?;

        changes.apply_to(order, Utc::now());
        Ok(order.clone())
    }

    async fn delete_by_order_id(&self, order_id: &str) -> Result<Order, OrderError> {
        let mut orders = self.orders.write();
        let position = orders
            .iter()
            .position(|o| o.order_id == order_id)
            .ok_or(OrderError::NotFound)?;

        Ok(orders.remove(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request(order_id: &str) -> CreateOrderRequest {
        CreateOrderRequest {
            order_id: order_id.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let store = InMemoryOrderStore::new();
        let created = store.create(create_request("ORD-1")).await.unwrap();

        let fetched = store.get_by_order_id("ORD-1").await.unwrap();
        assert_eq!(fetched.order_id, created.order_id);
        assert_eq!(fetched.status, "Pending");
    }

    #[tokio::test]
    async fn test_duplicate_order_id_rejected() {
        let store = InMemoryOrderStore::new();
        store.create(create_request("ORD-1")).await.unwrap();

        let result = store.create(create_request("ORD-1")).await;
        assert!(matches!(result, Err(OrderError::Validation(_))));
    }

    #[tokio::test]
    async fn test_missing_order_id_is_not_found() {
        let store = InMemoryOrderStore::new();

        assert!(matches!(
            store.get_by_order_id("nope").await,
            Err(OrderError::NotFound)
        ));
        assert!(matches!(
            store
                .update_by_order_id("nope", UpdateOrderRequest::default())
                .await,
            Err(OrderError::NotFound)
        ));
        assert!(matches!(
            store.delete_by_order_id("nope").await,
            Err(OrderError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_list_all_newest_first() {
        let store = InMemoryOrderStore::new();
        store.create(create_request("ORD-1")).await.unwrap();
        store.create(create_request("ORD-2")).await.unwrap();
        store.create(create_request("ORD-3")).await.unwrap();

        let orders = store.list_all().await.unwrap();
        assert_eq!(orders.len(), 3);
        assert_eq!(orders[0].order_id, "ORD-3");
        assert_eq!(orders[2].order_id, "ORD-1");
    }

    #[tokio::test]
    async fn test_update_is_partial() {
        let store = InMemoryOrderStore::new();
        store
            .create(CreateOrderRequest {
                order_id: "ORD-1".to_string(),
                customer_name: Some("Ada".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let updated = store
            .update_by_order_id(
                "ORD-1",
                UpdateOrderRequest {
                    status: Some("Delivered".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, "Delivered");
        assert_eq!(updated.customer_name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let store = InMemoryOrderStore::new();
        store.create(create_request("ORD-1")).await.unwrap();

        let deleted = store.delete_by_order_id("ORD-1").await.unwrap();
        assert_eq!(deleted.order_id, "ORD-1");

        assert!(matches!(
            store.get_by_order_id("ORD-1").await,
            Err(OrderError::NotFound)
        ));
    }
}
