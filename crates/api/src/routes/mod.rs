//! REST API routes.

pub mod health;
pub mod jbps;
pub mod partnerships;
pub mod wallets;

use axum::Router;
use axum::middleware::from_fn_with_state;

use crate::AppState;
use crate::error::ApiError;
use crate::middleware::{AuthUser, auth_middleware};
use tradelink_core::scope::{AccessChannel, Module, PermissionLevel, UserRole, permission_for};

/// Assembles the API routes: public health check plus the protected
/// resource routes behind the auth middleware.
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .merge(jbps::routes())
        .merge(wallets::routes())
        .merge(partnerships::routes())
        .layer(from_fn_with_state(state, auth_middleware));

    Router::new().merge(health::routes()).merge(protected)
}

/// Coarse module gate. Row-level visibility is enforced separately by the
/// scope filter; this only rejects actions the role/channel pair can never
/// perform. Unparseable claims are denied outright.
pub(crate) fn require_permission(
    user: &AuthUser,
    module: Module,
    required: PermissionLevel,
) -> Result<(), ApiError> {
    let role = UserRole::parse(&user.0.role);
    let channel = AccessChannel::parse(&user.0.channel);
    match (role, channel) {
        (Some(role), Some(channel)) if permission_for(role, channel, module).allows(required) => {
            Ok(())
        }
        _ => Err(ApiError::access_denied()),
    }
}
