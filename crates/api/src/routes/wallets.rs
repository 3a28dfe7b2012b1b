//! Wallet balance route.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::routes::require_permission;
use tradelink_core::scope::{AccessScope, Module, PermissionLevel};
use tradelink_db::repositories::{ScopeRepository, WalletRepository};

/// Wallet routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/wallets/balance", get(balance))
}

#[derive(Debug, Deserialize)]
struct BalanceQuery {
    supplier_id: Uuid,
    year: i32,
}

/// Whether the scope makes this supplier's wallets visible.
fn supplier_visible(scope: &AccessScope, supplier_id: Uuid) -> bool {
    match scope {
        AccessScope::Unrestricted => true,
        AccessScope::DenyAll => false,
        AccessScope::Scoped { supplier_ids, .. } => supplier_ids.contains(&supplier_id),
    }
}

async fn balance(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<BalanceQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_permission(&user, Module::Wallet, PermissionLevel::Read)?;

    let scope = ScopeRepository::new(state.db.clone())
        .resolve(&user.principal())
        .await?;

    // Out-of-scope suppliers look exactly like suppliers without a wallet.
    if !supplier_visible(&scope, query.supplier_id) {
        return Err(ApiError::new(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "no open wallet for this supplier and year",
        ));
    }

    let wallet = WalletRepository::new(state.db.clone())
        .balance(query.supplier_id, query.year)
        .await?
        .ok_or_else(|| {
            ApiError::new(
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "no open wallet for this supplier and year",
            )
        })?;

    Ok(Json(json!({
        "supplier_id": wallet.supplier_id,
        "year": wallet.year,
        "total_budget": wallet.total_budget,
        "consumed_budget": wallet.consumed_budget,
        "available": wallet.available(),
        "status": wallet.status,
    })))
}
