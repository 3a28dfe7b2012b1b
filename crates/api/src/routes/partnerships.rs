//! Partnership listing route (administrators only).

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::routes::require_permission;
use tradelink_core::scope::{Module, PermissionLevel};
use tradelink_db::repositories::PartnershipRepository;

/// Partnership routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/partnerships", get(list))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    /// Restrict to partnerships active right now.
    #[serde(default)]
    active_only: bool,
    /// Explicit tenant (platform administrators only); defaults to the
    /// caller's tenant claim.
    tenant_id: Option<Uuid>,
}

async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_permission(&user, Module::Partnership, PermissionLevel::Full)?;

    let tenant_id = query
        .tenant_id
        .or(user.claims().tenant)
        .ok_or_else(|| {
            ApiError::new(
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "tenant_id is required",
            )
        })?;

    // Tenant admins stay inside their own tenant regardless of the query.
    if let Some(own_tenant) = user.claims().tenant
        && own_tenant != tenant_id
    {
        return Err(ApiError::access_denied());
    }

    let rows = PartnershipRepository::new(state.db.clone())
        .list(tenant_id, query.active_only)
        .await?;
    Ok(Json(serde_json::to_value(rows)?))
}
