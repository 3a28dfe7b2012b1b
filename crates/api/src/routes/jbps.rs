//! JBP routes: CRUD, workflow transitions, and history.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::routes::require_permission;
use tradelink_core::scope::{AccessScope, Module, PermissionLevel};
use tradelink_core::workflow::JbpStatus;
use tradelink_db::repositories::{
    CreateJbpInput, CreateJbpItemInput, JbpRepository, ScopeRepository, UpdateJbpInput,
};

/// JBP routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/jbps", post(create_jbp).get(list_jbps))
        .route("/jbps/{id}", get(get_jbp).put(update_jbp).delete(delete_jbp))
        .route("/jbps/{id}/submit", post(submit_jbp))
        .route("/jbps/{id}/approve", post(approve_jbp))
        .route("/jbps/{id}/reopen", post(reopen_jbp))
        .route("/jbps/{id}/start", post(start_jbp))
        .route("/jbps/{id}/history", get(jbp_history))
}

#[derive(Debug, Deserialize)]
struct CreateItemRequest {
    name: String,
    asset_id: Option<Uuid>,
    #[serde(default)]
    budget: Decimal,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    #[serde(default)]
    store_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize)]
struct CreateJbpRequest {
    /// Explicit tenant; defaults to the caller's tenant claim.
    tenant_id: Option<Uuid>,
    supplier_id: Uuid,
    retail_id: Uuid,
    title: String,
    total_budget: Decimal,
    start_date: NaiveDate,
    end_date: NaiveDate,
    #[serde(default)]
    items: Vec<CreateItemRequest>,
}

#[derive(Debug, Deserialize)]
struct UpdateJbpRequest {
    title: Option<String>,
    total_budget: Option<Decimal>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    status: Option<String>,
}

async fn resolve_scope(state: &AppState, user: &AuthUser) -> Result<AccessScope, ApiError> {
    let scope = ScopeRepository::new(state.db.clone())
        .resolve(&user.principal())
        .await?;
    Ok(scope)
}

async fn create_jbp(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateJbpRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    require_permission(&user, Module::Jbp, PermissionLevel::Write)?;
    let scope = resolve_scope(&state, &user).await?;

    let tenant_id = payload
        .tenant_id
        .or(user.claims().tenant)
        .ok_or_else(|| {
            ApiError::new(
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "tenant_id is required",
            )
        })?;

    let input = CreateJbpInput {
        tenant_id,
        supplier_id: payload.supplier_id,
        retail_id: payload.retail_id,
        title: payload.title,
        total_budget: payload.total_budget,
        start_date: payload.start_date,
        end_date: payload.end_date,
        items: payload
            .items
            .into_iter()
            .map(|item| CreateJbpItemInput {
                name: item.name,
                asset_id: item.asset_id,
                budget: item.budget,
                start_date: item.start_date,
                end_date: item.end_date,
                store_ids: item.store_ids,
            })
            .collect(),
    };

    let aggregate = JbpRepository::new(state.db.clone())
        .create(&scope, user.user_id(), input)
        .await?;
    Ok((StatusCode::CREATED, Json(serde_json::to_value(aggregate)?)))
}

async fn list_jbps(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_permission(&user, Module::Jbp, PermissionLevel::Read)?;
    let scope = resolve_scope(&state, &user).await?;

    let status = match query.status.as_deref() {
        Some(raw) => Some(JbpStatus::parse(raw).ok_or_else(|| {
            ApiError::new(
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                format!("unknown status: {raw}"),
            )
        })?),
        None => None,
    };

    let plans = JbpRepository::new(state.db.clone())
        .list(&scope, status)
        .await?;
    Ok(Json(serde_json::to_value(plans)?))
}

async fn get_jbp(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_permission(&user, Module::Jbp, PermissionLevel::Read)?;
    let scope = resolve_scope(&state, &user).await?;

    let aggregate = JbpRepository::new(state.db.clone()).get(&scope, id).await?;
    Ok(Json(serde_json::to_value(aggregate)?))
}

async fn update_jbp(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateJbpRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_permission(&user, Module::Jbp, PermissionLevel::Write)?;
    let scope = resolve_scope(&state, &user).await?;

    let input = UpdateJbpInput {
        title: payload.title,
        total_budget: payload.total_budget,
        start_date: payload.start_date,
        end_date: payload.end_date,
    };

    let aggregate = JbpRepository::new(state.db.clone())
        .update(&scope, id, input)
        .await?;
    Ok(Json(serde_json::to_value(aggregate)?))
}

async fn delete_jbp(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    require_permission(&user, Module::Jbp, PermissionLevel::Write)?;
    let scope = resolve_scope(&state, &user).await?;

    JbpRepository::new(state.db.clone()).delete(&scope, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn submit_jbp(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_permission(&user, Module::Jbp, PermissionLevel::Write)?;
    let scope = resolve_scope(&state, &user).await?;

    let aggregate = JbpRepository::new(state.db.clone())
        .submit(&scope, id, user.user_id())
        .await?;
    Ok(Json(serde_json::to_value(aggregate)?))
}

async fn approve_jbp(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    // Approval is an administrative action.
    require_permission(&user, Module::Jbp, PermissionLevel::Full)?;
    let scope = resolve_scope(&state, &user).await?;

    let aggregate = JbpRepository::new(state.db.clone())
        .approve(&scope, id, user.user_id())
        .await?;
    Ok(Json(serde_json::to_value(aggregate)?))
}

async fn reopen_jbp(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_permission(&user, Module::Jbp, PermissionLevel::Full)?;
    let scope = resolve_scope(&state, &user).await?;

    let aggregate = JbpRepository::new(state.db.clone())
        .reopen(&scope, id, user.user_id())
        .await?;
    Ok(Json(serde_json::to_value(aggregate)?))
}

async fn start_jbp(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_permission(&user, Module::Jbp, PermissionLevel::Write)?;
    let scope = resolve_scope(&state, &user).await?;

    let aggregate = JbpRepository::new(state.db.clone())
        .start_execution(&scope, id, user.user_id())
        .await?;
    Ok(Json(serde_json::to_value(aggregate)?))
}

async fn jbp_history(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_permission(&user, Module::Jbp, PermissionLevel::Read)?;
    let scope = resolve_scope(&state, &user).await?;

    let rows = JbpRepository::new(state.db.clone())
        .history(&scope, id)
        .await?;
    Ok(Json(serde_json::to_value(rows)?))
}
