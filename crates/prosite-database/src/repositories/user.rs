//! User repository implementation.

use sqlx::PgPool;

use prosite_core::error::{AppError, ErrorKind};
use prosite_core::result::AppResult;
use prosite_entity::access::{RoleGrant, UserAccess};
use prosite_entity::company::Company;
use prosite_entity::department::Department;
use prosite_entity::user::User;

/// Repository for user lookup during authentication.
///
/// The auth core never mutates users; administrative CRUD lives elsewhere.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

/// One row of the user-role join, before the active filter is applied.
#[derive(Debug, Clone, sqlx::FromRow)]
struct RoleAssignmentRow {
    role_id: i64,
    name: String,
    code: String,
    scope: String,
    is_active: bool,
}

/// Keeps only active assignments; an assignment switched off stays in the
/// table for audit but must never yield a role grant.
fn active_role_grants(rows: Vec<RoleAssignmentRow>) -> Vec<RoleGrant> {
    rows.into_iter()
        .filter(|row| row.is_active)
        .map(|row| RoleGrant {
            role_id: row.role_id,
            name: row.name,
            code: row.code,
            scope: row.scope,
        })
        .collect()
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by email (exact match).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    /// Find a user by email, enriched with company, department, and active
    /// role assignments, the one logical fetch the credential stage needs.
    ///
    /// Inactive role assignments are dropped before the aggregate is built;
    /// they never enter a [`UserAccess`].
    pub async fn find_access_by_email(&self, email: &str) -> AppResult<Option<UserAccess>> {
        let Some(user) = self.find_by_email(email).await? else {
            return Ok(None);
        };

        let company = match user.company_id {
            Some(company_id) => {
                sqlx::query_as::<_, Company>("SELECT id, name, code FROM companies WHERE id = $1")
                    .bind(company_id)
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(|e| {
                        AppError::with_source(ErrorKind::Database, "Failed to load company", e)
                    })?
            }
            None => None,
        };

        let department = match user.department_id {
            Some(department_id) => {
                sqlx::query_as::<_, Department>("SELECT id, name FROM departments WHERE id = $1")
                    .bind(department_id)
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(|e| {
                        AppError::with_source(ErrorKind::Database, "Failed to load department", e)
                    })?
            }
            None => None,
        };

        let assignments = sqlx::query_as::<_, RoleAssignmentRow>(
            "SELECT r.id AS role_id, r.name, r.code, r.scope, ur.is_active \
             FROM user_roles ur \
             JOIN roles r ON r.id = ur.role_id \
             WHERE ur.user_id = $1 \
             ORDER BY r.code",
        )
        .bind(user.id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load role assignments", e)
        })?;

        Ok(Some(UserAccess {
            user,
            company,
            department,
            roles: active_role_grants(assignments),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(code: &str, scope: &str, is_active: bool) -> RoleAssignmentRow {
        RoleAssignmentRow {
            role_id: code.len() as i64,
            name: code.to_string(),
            code: code.to_string(),
            scope: scope.to_string(),
            is_active,
        }
    }

    #[test]
    fn test_inactive_assignments_never_become_grants() {
        let grants = active_role_grants(vec![
            row("ADM", "group", true),
            row("MGR", "company", true),
            row("OLD", "company", false),
        ]);

        let codes: Vec<_> = grants.iter().map(|g| g.code.as_str()).collect();
        assert_eq!(codes, vec!["ADM", "MGR"]);
    }

    #[test]
    fn test_all_inactive_yields_no_grants() {
        let grants = active_role_grants(vec![row("ADM", "group", false)]);
        assert!(grants.is_empty());
    }

    #[test]
    fn test_active_grants_keep_role_fields() {
        let grants = active_role_grants(vec![row("MGR", "company", true)]);
        assert_eq!(grants[0].scope, "company");
        assert_eq!(grants[0].name, "MGR");
    }
}
