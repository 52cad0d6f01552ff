//! Response DTOs.
//!
//! Field names are camelCase on the wire for compatibility with the
//! existing SPA clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use prosite_entity::access::UserAccess;

/// Login response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// The signed bearer token.
    pub token: String,
    /// Token expiry.
    pub expires_at: DateTime<Utc>,
    /// User id.
    pub user_id: i64,
    /// Display name.
    pub user_name: String,
    /// Legacy single-role string.
    pub role: String,
    /// Company id, if assigned.
    pub company_id: Option<i64>,
    /// Company name, if assigned.
    pub company_name: Option<String>,
    /// Company code, if assigned.
    pub company_code: Option<String>,
    /// Department id, if assigned.
    pub department_id: Option<i64>,
    /// Department name, if assigned.
    pub department_name: Option<String>,
    /// Active role assignments only.
    pub roles: Vec<RoleResponse>,
}

/// One active role assignment in the login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleResponse {
    /// Catalog role id.
    pub role_id: i64,
    /// Role name.
    pub role_name: String,
    /// Role machine code.
    pub role_code: String,
    /// Role scope tag.
    pub scope: String,
}

impl LoginResponse {
    /// Builds the response body from a login outcome.
    pub fn from_access(token: String, expires_at: DateTime<Utc>, access: &UserAccess) -> Self {
        Self {
            token,
            expires_at,
            user_id: access.user.id,
            user_name: access.user.display_name.clone(),
            role: access.user.role.clone(),
            company_id: access.company.as_ref().map(|c| c.id),
            company_name: access.company.as_ref().map(|c| c.name.clone()),
            company_code: access.company.as_ref().and_then(|c| c.code.clone()),
            department_id: access.department.as_ref().map(|d| d.id),
            department_name: access.department.as_ref().map(|d| d.name.clone()),
            roles: access
                .roles
                .iter()
                .map(|grant| RoleResponse {
                    role_id: grant.role_id,
                    role_name: grant.name.clone(),
                    role_code: grant.code.clone(),
                    scope: grant.scope.clone(),
                })
                .collect(),
        }
    }
}

/// Authenticated identity echo for `GET /api/auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    /// User id from the subject claim.
    pub user_id: i64,
    /// Email claim.
    pub email: String,
    /// Legacy role claim.
    pub role: String,
    /// Company id claim, if present.
    pub company_id: Option<String>,
    /// Company code claim, if present.
    pub company_code: Option<String>,
    /// Department id claim, if present.
    pub department_id: Option<String>,
    /// Active role codes.
    pub user_roles: Vec<String>,
    /// Scope tags paired with `user_roles`.
    pub role_scopes: Vec<String>,
    /// Whether the caller holds a group-wide scope.
    pub has_group_access: bool,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}
