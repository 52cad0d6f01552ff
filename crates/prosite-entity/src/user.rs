//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered user in the Prosite system.
///
/// Users are created by administrative actions outside the auth core;
/// this crate only ever reads them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: i64,
    /// Unique login email.
    pub email: String,
    /// Argon2id password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Human-readable display name.
    pub display_name: String,
    /// Legacy single-role string, retained for backward compatibility with
    /// the first generation of authorization checks. The richer role
    /// assignment catalog lives in `user_roles`.
    pub role: String,
    /// Employing company, if assigned.
    pub company_id: Option<i64>,
    /// Department within the company, if assigned.
    pub department_id: Option<i64>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}
