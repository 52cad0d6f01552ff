//! Token payload structures.

use serde::{Deserialize, Serialize};

/// Identity claims derived once per login from the enriched user record.
///
/// The set is intentionally redundant: `sub` and `userId` carry the same
/// value, and the legacy single `role` string coexists with the
/// `userRole`/`roleScope` assignment pairs. Two generations of consuming
/// authorization logic key off different names; both must keep working.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Subject, the user id in string form.
    pub sub: String,
    /// Duplicate of `sub` under the name some consumers key off directly.
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Login email.
    pub email: String,
    /// Legacy single-role string, emitted as-is.
    pub role: String,
    /// Company id, present only when the user has a company.
    #[serde(rename = "companyId", skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    /// Company code. Empty string when the company has no code; absent only
    /// when the user has no company at all.
    #[serde(rename = "companyCode", skip_serializing_if = "Option::is_none")]
    pub company_code: Option<String>,
    /// Department id, present only when the user has a department.
    #[serde(rename = "departmentId", skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    /// Role codes of active assignments, index-paired with `role_scopes`.
    #[serde(rename = "userRole", default)]
    pub user_roles: Vec<String>,
    /// Scope tags of active assignments, index-paired with `user_roles`.
    #[serde(rename = "roleScope", default)]
    pub role_scopes: Vec<String>,
}

impl IdentityClaims {
    /// Returns the (role code, scope tag) pairs carried by this identity.
    pub fn role_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.user_roles
            .iter()
            .zip(self.role_scopes.iter())
            .map(|(code, scope)| (code.as_str(), scope.as_str()))
    }

    /// Returns whether any active assignment carries the given scope tag.
    pub fn has_scope(&self, scope: &str) -> bool {
        self.role_scopes.iter().any(|s| s == scope)
    }
}

/// The full signed token payload: identity claims plus the standard
/// issuer/audience/issued-at/expiry fields stamped at issuance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Identity claims assembled at login.
    #[serde(flatten)]
    pub identity: IdentityClaims,
    /// Issuer.
    pub iss: String,
    /// Audience.
    pub aud: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}
