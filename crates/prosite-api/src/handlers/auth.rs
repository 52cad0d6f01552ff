//! Auth handlers: login and identity echo.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use prosite_core::error::AppError;

use crate::dto::request::LoginRequest;
use crate::dto::response::{LoginResponse, MeResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let outcome = state.auth_service.login(&req.email, &req.password).await?;

    Ok(Json(LoginResponse::from_access(
        outcome.token,
        outcome.expires_at,
        &outcome.access,
    )))
}

/// GET /api/auth/me
///
/// Echoes the identity of the presented token. No database access; the
/// signed claims are the source of truth until they expire.
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> Json<MeResponse> {
    let claims = &auth.claims;
    Json(MeResponse {
        user_id: auth.user_id,
        email: claims.email.clone(),
        role: claims.role.clone(),
        company_id: claims.company_id.clone(),
        company_code: claims.company_code.clone(),
        department_id: claims.department_id.clone(),
        user_roles: claims.user_roles.clone(),
        role_scopes: claims.role_scopes.clone(),
        has_group_access: state.scope_gate.has_group_access(claims),
    })
}
