//! Request context carrying the authenticated identity claims.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use prosite_auth::claims::IdentityClaims;
use prosite_core::error::AppError;

/// Context for the current authenticated request.
///
/// Built by middleware from an already-validated token and passed into
/// service methods so that every operation knows *who* is acting and under
/// *which* company scope. Discarded when the response is sent; never cached
/// across requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's id, parsed from the subject claim.
    pub user_id: i64,
    /// The full identity claim set from the token.
    pub claims: IdentityClaims,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a request context from validated identity claims.
    pub fn from_claims(claims: IdentityClaims) -> Result<Self, AppError> {
        let user_id = claims
            .sub
            .parse()
            .map_err(|_| AppError::unauthorized("Malformed subject claim"))?;

        Ok(Self {
            user_id,
            claims,
            request_time: Utc::now(),
        })
    }

    /// The caller's email.
    pub fn email(&self) -> &str {
        &self.claims.email
    }

    /// The caller's company code, if any.
    pub fn company_code(&self) -> Option<&str> {
        self.claims.company_code.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(sub: &str) -> IdentityClaims {
        IdentityClaims {
            sub: sub.to_string(),
            user_id: sub.to_string(),
            email: "a@x.com".to_string(),
            role: "SiteManager".to_string(),
            company_id: None,
            company_code: None,
            department_id: None,
            user_roles: vec![],
            role_scopes: vec![],
        }
    }

    #[test]
    fn test_context_parses_subject() {
        let ctx = RequestContext::from_claims(identity("42")).unwrap();
        assert_eq!(ctx.user_id, 42);
        assert_eq!(ctx.email(), "a@x.com");
    }

    #[test]
    fn test_malformed_subject_is_unauthorized() {
        assert!(RequestContext::from_claims(identity("not-a-number")).is_err());
    }
}
