use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    AppState,
    error::OrderError,
    models::order::{
        CreateOrderRequest, Order, OrderDeletedResponse, OrderMutationResponse,
        UpdateOrderRequest,
    },
};

/// Handler for POST /api/orders
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderMutationResponse>), OrderError> {
    let order = state.store.create(request).await?;
    tracing::info!(order_id = %order.order_id, "order created");

    Ok((
        StatusCode::CREATED,
        Json(OrderMutationResponse {
            message: "Order added successfully".to_string(),
            order,
        }),
    ))
}

/// Handler for GET /api/orders (admin dashboard listing, newest first)
pub async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<Order>>, OrderError> {
    let orders = state.store.list_all().await?;
    tracing::debug!("listed {} orders", orders.len());
    Ok(Json(orders))
}

/// Handler for GET /api/orders/{id}
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<Order>, OrderError> {
    let order = state.store.get_by_order_id(&order_id).await?;
    Ok(Json(order))
}

/// Handler for PUT /api/orders/{id}
pub async fn update_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    Json(changes): Json<UpdateOrderRequest>,
) -> Result<Json<OrderMutationResponse>, OrderError> {
    let order = state.store.update_by_order_id(&order_id, changes).await?;
    tracing::info!(order_id = %order.order_id, "order updated");

    Ok(Json(OrderMutationResponse {
        message: "Order updated successfully".to_string(),
        order,
    }))
}

/// Handler for DELETE /api/orders/{id}
pub async fn delete_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<OrderDeletedResponse>, OrderError> {
    let deleted = state.store.delete_by_order_id(&order_id).await?;
    tracing::info!(order_id = %deleted.order_id, "order deleted");

    Ok(Json(OrderDeletedResponse {
        message: "Order deleted".to_string(),
        deleted,
    }))
}
