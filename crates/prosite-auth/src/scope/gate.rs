//! The authorization gate: pure reads over already-validated claims.

use prosite_core::error::AppError;

use crate::claims::IdentityClaims;

/// Decides, per operation, whether the caller's claims allow access to a
/// company-scoped record.
///
/// The gate never touches the database. Which scope values qualify for the
/// cross-company ("group") bypass is deployment configuration, not code.
#[derive(Debug, Clone)]
pub struct ScopeGate {
    /// Scope tags that grant group-wide access.
    group_scopes: Vec<String>,
}

impl ScopeGate {
    /// Creates a gate accepting the given scope tags as group-wide.
    pub fn new(group_scopes: Vec<String>) -> Self {
        Self { group_scopes }
    }

    /// Creates a gate from auth configuration.
    pub fn from_config(config: &prosite_core::config::auth::AuthConfig) -> Self {
        Self::new(config.group_scopes.clone())
    }

    /// Current user id, parsed from the subject claim.
    pub fn user_id(&self, claims: &IdentityClaims) -> Result<i64, AppError> {
        claims
            .sub
            .parse()
            .map_err(|_| AppError::unauthorized("Malformed subject claim"))
    }

    /// Current company id, if the caller belongs to a company.
    pub fn company_id(&self, claims: &IdentityClaims) -> Option<i64> {
        claims.company_id.as_deref().and_then(|id| id.parse().ok())
    }

    /// Current company code, if the caller belongs to a company.
    pub fn company_code<'a>(&self, claims: &'a IdentityClaims) -> Option<&'a str> {
        claims.company_code.as_deref()
    }

    /// Whether any of the caller's role scopes grants group-wide access
    /// that bypasses company filtering.
    pub fn has_group_access(&self, claims: &IdentityClaims) -> bool {
        self.group_scopes.iter().any(|g| claims.has_scope(g))
    }

    /// Company id to restrict list/read queries to, or `None` when the
    /// caller may see every company's records.
    pub fn company_filter(&self, claims: &IdentityClaims) -> Option<i64> {
        if self.has_group_access(claims) {
            None
        } else {
            self.company_id(claims)
        }
    }

    /// Checks that the caller may access a record belonging to the company
    /// with the given code.
    ///
    /// Group-wide scopes bypass the check; otherwise the record's company
    /// code must equal the caller's. A mismatch is a forbidden outcome,
    /// distinct from unauthenticated.
    pub fn ensure_company_access(
        &self,
        claims: &IdentityClaims,
        record_company_code: &str,
    ) -> Result<(), AppError> {
        if self.has_group_access(claims) {
            return Ok(());
        }
        match claims.company_code.as_deref() {
            Some(code) if code == record_company_code => Ok(()),
            _ => Err(AppError::forbidden(
                "Record belongs to another company".to_string(),
            )),
        }
    }
}
