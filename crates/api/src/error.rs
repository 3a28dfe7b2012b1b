//! Typed-error to HTTP response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use tradelink_core::budget::BudgetError;
use tradelink_core::scope::ScopeError;
use tradelink_core::workflow::WorkflowError;
use tradelink_db::repositories::{JbpError, WalletError};

/// API error: a status code, a machine-readable code, and a message.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    /// Builds an error from parts.
    #[must_use]
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// 403 with the opaque access-denied body.
    #[must_use]
    pub fn access_denied() -> Self {
        Self::new(StatusCode::FORBIDDEN, "ACCESS_DENIED", "access denied")
    }

    fn from_status(status: u16, code: &'static str, message: String) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            code,
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(code = self.code, message = %self.message, "request failed");
        }
        (
            self.status,
            Json(json!({ "error": self.code, "message": self.message })),
        )
            .into_response()
    }
}

impl From<BudgetError> for ApiError {
    fn from(err: BudgetError) -> Self {
        Self::from_status(err.status_code(), err.error_code(), err.to_string())
    }
}

impl From<WorkflowError> for ApiError {
    fn from(err: WorkflowError) -> Self {
        Self::from_status(err.status_code(), err.error_code(), err.to_string())
    }
}

impl From<ScopeError> for ApiError {
    fn from(err: ScopeError) -> Self {
        Self::from_status(err.status_code(), err.error_code(), err.to_string())
    }
}

impl From<WalletError> for ApiError {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::Budget(e) => e.into(),
            WalletError::NotFound(id) => Self::new(
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("wallet not found: {id}"),
            ),
            WalletError::Database(e) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                e.to_string(),
            ),
        }
    }
}

impl From<JbpError> for ApiError {
    fn from(err: JbpError) -> Self {
        match err {
            // Out-of-scope and nonexistent plans share one response body.
            JbpError::NotFound(id) => Self::new(
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("plan not found: {id}"),
            ),
            JbpError::AccessDenied => Self::access_denied(),
            JbpError::Workflow(e) => e.into(),
            JbpError::Budget(e) => e.into(),
            JbpError::Wallet(e) => e.into(),
            JbpError::Database(e) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                e.to_string(),
            ),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            err.to_string(),
        )
    }
}

impl From<sea_orm::DbErr> for ApiError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "DATABASE_ERROR",
            err.to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_insufficient_budget_maps_to_conflict() {
        let err: ApiError = BudgetError::InsufficientBudget {
            requested: dec!(100),
            available: dec!(40),
        }
        .into();
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.code, "INSUFFICIENT_BUDGET");
    }

    #[test]
    fn test_already_approved_maps_to_conflict() {
        let err: ApiError = WorkflowError::AlreadyApproved.into();
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.code, "ALREADY_APPROVED");
    }

    #[test]
    fn test_not_found_hides_scope_denial() {
        let id = uuid::Uuid::new_v4();
        let err: ApiError = JbpError::NotFound(id).into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
