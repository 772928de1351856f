use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::order::ErrorResponse;

/// Failure taxonomy for order operations.
///
/// Validation failures map to 400, missing records to 404, and anything
/// the store reports beyond that to 500. No retries anywhere; errors
/// surface immediately to the caller.
#[derive(Error, Debug)]
pub enum OrderError {
    #[error("{0}")]
    Validation(String),

    #[error("Order not found")]
    NotFound,

    #[error("store error: {0}")]
    Store(#[from] mongodb::error::Error),
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let status = match self {
            OrderError::Validation(_) => StatusCode::BAD_REQUEST,
            OrderError::NotFound => StatusCode::NOT_FOUND,
            OrderError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("store failure: {self}");
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
