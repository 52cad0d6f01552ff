//! Role catalog and user-role assignment models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A role in the catalog, independent of any user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Role {
    /// Unique role identifier.
    pub id: i64,
    /// Human-readable role name.
    pub name: String,
    /// Machine code embedded in claims (e.g. `"MGR"`).
    pub code: String,
    /// Breadth-of-authority tag (e.g. `"company"` vs `"group"`).
    pub scope: String,
}

/// A many-to-many assignment between a user and a role.
///
/// Only assignments with `is_active = true` contribute claims; an inactive
/// assignment must never surface in a token.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRole {
    /// Unique assignment identifier.
    pub id: i64,
    /// The assigned user.
    pub user_id: i64,
    /// The assigned role.
    pub role_id: i64,
    /// Whether this assignment is currently in force.
    pub is_active: bool,
}
