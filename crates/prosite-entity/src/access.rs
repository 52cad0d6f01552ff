//! Eager-loaded user access aggregate.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::company::Company;
use crate::department::Department;
use crate::user::User;

/// An active role assignment flattened for claim emission: the assignment
/// joined with its catalog role.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoleGrant {
    /// Catalog role identifier.
    pub role_id: i64,
    /// Role name.
    pub name: String,
    /// Role machine code.
    pub code: String,
    /// Role scope tag.
    pub scope: String,
}

/// A user record enriched with company, department, and active role
/// assignments: the output of one logical credential-stage fetch and the
/// input to claim assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccess {
    /// The user record itself.
    pub user: User,
    /// The user's company, if assigned.
    pub company: Option<Company>,
    /// The user's department, if assigned.
    pub department: Option<Department>,
    /// Active role assignments only. Inactive assignments are filtered at
    /// the repository layer and never reach this aggregate.
    pub roles: Vec<RoleGrant>,
}
