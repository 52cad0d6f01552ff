//! `AuthUser` extractor: pulls the token from the Authorization header,
//! validates it, and injects the claims context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use prosite_core::error::AppError;
use prosite_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
///
/// Validation is fail-closed: a missing header, malformed scheme, bad
/// signature, wrong issuer/audience, or expired token all reject the
/// request before the handler runs.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid Authorization header format"))?;

        let claims = state.jwt_decoder.decode(token)?;
        let ctx = RequestContext::from_claims(claims.identity)?;

        Ok(AuthUser(ctx))
    }
}
