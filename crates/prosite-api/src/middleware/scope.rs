//! Declarative route scoping.
//!
//! Instead of per-handler authorization attributes, routes declare their
//! required scope in a table consulted by one middleware before any handler
//! runs. Routes absent from the table pass through untouched (they either
//! are public or do their own checks via the `AuthUser` extractor).

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use prosite_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// What a route requires of the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeRequirement {
    /// A valid token is enough.
    Authenticated,
    /// A valid token carrying a group-wide scope.
    Group,
}

/// Route-prefix → required-scope table.
///
/// Longest matching prefix wins, so a broad `/api` rule can coexist with a
/// stricter `/api/admin` rule.
#[derive(Debug, Clone)]
pub struct ScopePolicy {
    rules: Vec<(String, ScopeRequirement)>,
}

impl ScopePolicy {
    /// Creates an empty policy.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Adds a rule for the given path prefix.
    pub fn require(mut self, prefix: impl Into<String>, requirement: ScopeRequirement) -> Self {
        self.rules.push((prefix.into(), requirement));
        self
    }

    /// Returns the requirement for a path, if any rule matches.
    pub fn requirement_for(&self, path: &str) -> Option<ScopeRequirement> {
        self.rules
            .iter()
            .filter(|(prefix, _)| path.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, requirement)| *requirement)
    }
}

impl Default for ScopePolicy {
    /// The baseline table: identity endpoints need a valid token; business
    /// route groups mounted by consuming crates add their own entries.
    fn default() -> Self {
        Self::new().require("/api/auth/me", ScopeRequirement::Authenticated)
    }
}

/// Middleware enforcing the scope policy table.
///
/// Fail-closed: if a rule matches and the token is missing, invalid, or
/// lacks the required scope, the handler is never invoked.
pub async fn enforce_scope(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(requirement) = state.scope_policy.requirement_for(request.uri().path()) else {
        return Ok(next.run(request).await);
    };

    let token = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::unauthorized("Missing bearer token"))?;

    let claims = state.jwt_decoder.decode(token)?;

    if requirement == ScopeRequirement::Group && !state.scope_gate.has_group_access(&claims.identity)
    {
        return Err(AppError::forbidden("Group-wide scope required").into());
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longest_prefix_wins() {
        let policy = ScopePolicy::new()
            .require("/api", ScopeRequirement::Authenticated)
            .require("/api/admin", ScopeRequirement::Group);

        assert_eq!(
            policy.requirement_for("/api/auth/me"),
            Some(ScopeRequirement::Authenticated)
        );
        assert_eq!(
            policy.requirement_for("/api/admin/companies"),
            Some(ScopeRequirement::Group)
        );
    }

    #[test]
    fn test_unlisted_route_has_no_requirement() {
        let policy = ScopePolicy::default();
        assert_eq!(policy.requirement_for("/api/health"), None);
        assert_eq!(policy.requirement_for("/api/auth/login"), None);
    }

    #[test]
    fn test_default_policy_guards_me() {
        let policy = ScopePolicy::default();
        assert_eq!(
            policy.requirement_for("/api/auth/me"),
            Some(ScopeRequirement::Authenticated)
        );
    }
}
