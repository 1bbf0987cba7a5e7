//! Application error handling

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use claim_map_core::ErrorOutcome;

use crate::node::NodeError;

/// Application error type
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    BadGateway(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, outcome) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorOutcome::not_found(&msg)),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorOutcome::invalid(&msg)),
            AppError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, ErrorOutcome::bad_gateway(&msg)),
        };

        (status, Json(outcome)).into_response()
    }
}

/// Handlers only see request-time node errors; the full error is logged and
/// clients get the public message.
impl From<NodeError> for AppError {
    fn from(err: NodeError) -> Self {
        tracing::error!(error = %err, "Blockchain node request failed");
        AppError::BadGateway(err.public_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_node_error_is_bad_gateway() {
        let errors = [
            NodeError::Client("tls backend missing".to_string()),
            NodeError::Network("connection refused".to_string()),
            NodeError::HttpStatus {
                status: 500,
                body: "panic: store corrupted".to_string(),
            },
            NodeError::Decode("expected value at line 1".to_string()),
        ];

        for err in errors {
            let response = AppError::from(err).into_response();
            assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        }
    }
}
