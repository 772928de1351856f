use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::OrderError;

/// Status assigned to an order when the caller does not supply one.
pub const DEFAULT_STATUS: &str = "Pending";

/// An order record as exposed through the API.
///
/// Addressed exclusively by the business-assigned `orderId`; the store's
/// internal identifier never leaves the persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    pub booked_on: DateTime<Utc>,
    pub payment: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eta: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for POST /api/orders
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub order_id: String,
    pub customer_name: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub booked_on: Option<DateTime<Utc>>,
    pub payment: Option<String>,
    pub status: Option<String>,
    pub eta: Option<DateTime<Utc>>,
}

impl CreateOrderRequest {
    /// Applies trimming and schema defaults, producing the record to insert.
    ///
    /// Fails with a validation error when `orderId` is missing or empty
    /// after trimming.
    pub fn into_order(self, now: DateTime<Utc>) -> Result<Order, OrderError> {
        let order_id = self.order_id.trim().to_string();
        if order_id.is_empty() {
            return Err(OrderError::Validation(
                "orderId is required".to_string(),
            ));
        }

        Ok(Order {
            order_id,
            customer_name: trim_optional(self.customer_name),
            from: trim_optional(self.from),
            to: trim_optional(self.to),
            booked_on: self.booked_on.unwrap_or(now),
            payment: self
                .payment
                .map(|s| s.trim().to_string())
                .unwrap_or_default(),
            status: self
                .status
                .map(|s| s.trim().to_string())
                .unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            eta: self.eta,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Request body for PUT /api/orders/{id}. Every field is optional;
/// absent fields are left untouched (partial replacement).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    pub order_id: Option<String>,
    pub customer_name: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub booked_on: Option<DateTime<Utc>>,
    pub payment: Option<String>,
    pub status: Option<String>,
    pub eta: Option<DateTime<Utc>>,
}

impl UpdateOrderRequest {
    /// Trims every provided string field. An explicit empty `orderId`
    /// is rejected, since a record must stay addressable.
    pub fn normalized(self) -> Result<Self, OrderError> {
        let order_id = self.order_id.map(|s| s.trim().to_string());
        if matches!(order_id.as_deref(), Some("")) {
            return Err(OrderError::Validation(
                "orderId cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            order_id,
            customer_name: trim_optional(self.customer_name),
            from: trim_optional(self.from),
            to: trim_optional(self.to),
            booked_on: self.booked_on,
            payment: trim_optional(self.payment),
            status: trim_optional(self.status),
            eta: self.eta,
        })
    }

    /// Applies the partial replacement in place and bumps `updatedAt`.
    /// Expects an already-normalized request.
    pub fn apply_to(self, order: &mut Order, now: DateTime<Utc>) {
        if let Some(value) = self.order_id {
            order.order_id = value;
        }
        if let Some(value) = self.customer_name {
            order.customer_name = Some(value);
        }
        if let Some(value) = self.from {
            order.from = Some(value);
        }
        if let Some(value) = self.to {
            order.to = Some(value);
        }
        if let Some(value) = self.booked_on {
            order.booked_on = value;
        }
        if let Some(value) = self.payment {
            order.payment = value;
        }
        if let Some(value) = self.status {
            order.status = value;
        }
        if let Some(value) = self.eta {
            order.eta = Some(value);
        }
        order.updated_at = now;
    }
}

fn trim_optional(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string())
}

/// Response body for successful create/update operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderMutationResponse {
    pub message: String,
    pub order: Order,
}

/// Response body for a successful delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDeletedResponse {
    pub message: String,
    pub deleted: Order,
}

/// Liveness payload for GET /health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
