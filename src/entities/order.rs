use chrono::Utc;
use mongodb::bson::{self, oid::ObjectId};
use serde::{Deserialize, Serialize};

use crate::models::order::Order;

/// Name of the collection holding order documents.
pub const COLLECTION: &str = "orders";

/// The at-rest shape of an order in the `orders` collection.
///
/// `_id` is the store-internal identifier; every lookup goes through the
/// unique `orderId` field instead, so `_id` never crosses the API boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub order_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    pub booked_on: bson::DateTime,
    pub payment: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eta: Option<bson::DateTime>,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

/// BSON dates carry millisecond precision, so conversion truncates
/// sub-millisecond components.
pub fn to_bson_datetime(value: chrono::DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(value.timestamp_millis())
}

pub fn to_chrono_datetime(value: bson::DateTime) -> chrono::DateTime<Utc> {
    chrono::DateTime::from_timestamp_millis(value.timestamp_millis()).unwrap_or_default()
}

impl From<Order> for OrderDocument {
    fn from(order: Order) -> Self {
        Self {
            id: None,
            order_id: order.order_id,
            customer_name: order.customer_name,
            from: order.from,
            to: order.to,
            booked_on: to_bson_datetime(order.booked_on),
            payment: order.payment,
            status: order.status,
            eta: order.eta.map(to_bson_datetime),
            created_at: to_bson_datetime(order.created_at),
            updated_at: to_bson_datetime(order.updated_at),
        }
    }
}

impl From<OrderDocument> for Order {
    fn from(document: OrderDocument) -> Self {
        Self {
            order_id: document.order_id,
            customer_name: document.customer_name,
            from: document.from,
            to: document.to,
            booked_on: to_chrono_datetime(document.booked_on),
            payment: document.payment,
            status: document.status,
            eta: document.eta.map(to_chrono_datetime),
            created_at: to_chrono_datetime(document.created_at),
            updated_at: to_chrono_datetime(document.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::CreateOrderRequest;
    use chrono::SubsecRound;

    #[test]
    fn test_round_trip_preserves_fields() {
        // Truncate to milliseconds up front so the round trip is exact.
        let now = Utc::now().trunc_subsecs(3);
        let order = CreateOrderRequest {
            order_id: "ORD-9".to_string(),
            customer_name: Some("Ada".to_string()),
            eta: Some(now),
            ..Default::default()
        }
        .into_order(now)
        .unwrap();

        let document = OrderDocument::from(order.clone());
        assert!(document.id.is_none());

        let back = Order::from(document);
        assert_eq!(back.order_id, order.order_id);
        assert_eq!(back.customer_name, order.customer_name);
        assert_eq!(back.booked_on, order.booked_on);
        assert_eq!(back.eta, order.eta);
        assert_eq!(back.created_at, order.created_at);
        assert_eq!(back.updated_at, order.updated_at);
    }

    #[test]
    fn test_document_field_names_match_wire_format() {
        let now = Utc::now();
        let order = CreateOrderRequest {
            order_id: "ORD-10".to_string(),
            ..Default::default()
        }
        .into_order(now)
        .unwrap();

        let document = bson::to_document(&OrderDocument::from(order)).unwrap();
        assert!(document.contains_key("orderId"));
        assert!(document.contains_key("bookedOn"));
        assert!(document.contains_key("createdAt"));
        assert!(document.contains_key("updatedAt"));
        // _id is generated by the store, not serialized when None
        assert!(!document.contains_key("_id"));
    }
}
