//! Error handling for the API gateway

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::error::Error;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error information
    pub error: ErrorInfo,
    /// Request ID for tracing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// Detailed error information
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Error code (string identifier for the error type)
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// API errors
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Common(#[from] Error),
}

impl ApiError {
    /// HTTP status, machine-readable code and optional details for this error
    fn classify(&self) -> (StatusCode, &'static str, Option<serde_json::Value>) {
        match self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found", None),
            ApiError::Common(e) => match e {
                // Client errors (4xx)
                Error::ValidationError(_) => (StatusCode::BAD_REQUEST, "validation_error", None),
                Error::BusinessRule(_) => (StatusCode::UNPROCESSABLE_ENTITY, "business_rule_violation", None),
                Error::AccountNotFound(_) => (StatusCode::NOT_FOUND, "account_not_found", None),
                Error::CustomerNotFound(_) => (StatusCode::NOT_FOUND, "customer_not_found", None),

                // Upstream failure
                Error::CustomerService(_) => (StatusCode::BAD_GATEWAY, "customer_service_error", None),

                // Server errors (5xx)
                Error::ConfigurationError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "configuration_error", None),
                Error::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None),
                Error::Database(e) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    Some(serde_json::json!({
                        "code": e.as_database_error().and_then(|dbe| dbe.code().map(|c| c.to_string())),
                    })),
                ),
                Error::Migration(_) => (StatusCode::INTERNAL_SERVER_ERROR, "migration_error", None),
                Error::Serialization(_) => (StatusCode::INTERNAL_SERVER_ERROR, "serialization_error", None),
                Error::DecimalError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "decimal_error", None),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Generate a request ID for tracking errors
        let request_id = Uuid::new_v4().to_string();

        let (status, code, details) = self.classify();

        if status.is_server_error() {
            tracing::error!("API Error [{}]: {:?}", request_id, &self);
        } else {
            tracing::info!("Request rejected [{}]: {}", request_id, &self);
        }

        let error_response = ErrorResponse {
            error: ErrorInfo {
                code: code.to_string(),
                message: self.to_string(),
                details,
            },
            request_id: Some(request_id),
        };

        (status, Json(error_response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApiError::from(Error::ValidationError("x".into())), StatusCode::BAD_REQUEST),
            (ApiError::from(Error::BusinessRule("x".into())), StatusCode::UNPROCESSABLE_ENTITY),
            (ApiError::from(Error::AccountNotFound("x".into())), StatusCode::NOT_FOUND),
            (ApiError::from(Error::CustomerNotFound("x".into())), StatusCode::NOT_FOUND),
            (ApiError::from(Error::CustomerService("x".into())), StatusCode::BAD_GATEWAY),
            (ApiError::from(Error::Internal("x".into())), StatusCode::INTERNAL_SERVER_ERROR),
            (ApiError::NotFound("x".into()), StatusCode::NOT_FOUND),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_rule_message_is_exposed() {
        let error = ApiError::from(Error::ValidationError("Cuenta corriente no debe tener limite de movimientos".into()));
        assert_eq!(error.to_string(), "Validation error: Cuenta corriente no debe tener limite de movimientos");
    }
}
