//! Deterministic claim assembly from the enriched user record.

use prosite_entity::access::UserAccess;

use super::payload::IdentityClaims;

/// Builds the identity claim set embedded in every issued token.
///
/// Assembly runs once per login; subsequent requests trust the signed token
/// and never re-derive claims from the database.
#[derive(Debug, Clone, Default)]
pub struct ClaimsAssembler;

impl ClaimsAssembler {
    /// Creates a new assembler.
    pub fn new() -> Self {
        Self
    }

    /// Assembles identity claims from an authenticated user's access record.
    ///
    /// Emission order is fixed: subject, the `userId` duplicate, email, the
    /// legacy role string, company id + code (code downgraded to an empty
    /// string when the company record has none), department id, then one
    /// role-code/role-scope pair per active assignment. The repository has
    /// already filtered inactive assignments out of `access.roles`.
    pub fn assemble(&self, access: &UserAccess) -> IdentityClaims {
        let user = &access.user;
        let user_id = user.id.to_string();

        let (company_id, company_code) = match &access.company {
            Some(company) => (
                Some(company.id.to_string()),
                Some(company.code.clone().unwrap_or_default()),
            ),
            None => (None, None),
        };

        let department_id = access.department.as_ref().map(|d| d.id.to_string());

        let mut user_roles = Vec::with_capacity(access.roles.len());
        let mut role_scopes = Vec::with_capacity(access.roles.len());
        for grant in &access.roles {
            user_roles.push(grant.code.clone());
            role_scopes.push(grant.scope.clone());
        }

        IdentityClaims {
            sub: user_id.clone(),
            user_id,
            email: user.email.clone(),
            role: user.role.clone(),
            company_id,
            company_code,
            department_id,
            user_roles,
            role_scopes,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use prosite_entity::access::{RoleGrant, UserAccess};
    use prosite_entity::company::Company;
    use prosite_entity::department::Department;
    use prosite_entity::user::User;

    use super::*;

    fn test_user() -> User {
        User {
            id: 42,
            email: "a@x.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            display_name: "Ayşe Yılmaz".to_string(),
            role: "SiteManager".to_string(),
            company_id: Some(7),
            department_id: Some(3),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn test_access() -> UserAccess {
        UserAccess {
            user: test_user(),
            company: Some(Company {
                id: 7,
                name: "Acme İnşaat".to_string(),
                code: Some("ACME".to_string()),
            }),
            department: Some(Department {
                id: 3,
                name: "Satınalma".to_string(),
            }),
            roles: vec![
                RoleGrant {
                    role_id: 1,
                    name: "Administrator".to_string(),
                    code: "ADM".to_string(),
                    scope: "group".to_string(),
                },
                RoleGrant {
                    role_id: 2,
                    name: "Manager".to_string(),
                    code: "MGR".to_string(),
                    scope: "company".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_subject_and_duplicate_user_id() {
        let claims = ClaimsAssembler::new().assemble(&test_access());
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.user_id, "42");
    }

    #[test]
    fn test_email_and_legacy_role() {
        let claims = ClaimsAssembler::new().assemble(&test_access());
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.role, "SiteManager");
    }

    #[test]
    fn test_company_and_department_claims() {
        let claims = ClaimsAssembler::new().assemble(&test_access());
        assert_eq!(claims.company_id.as_deref(), Some("7"));
        assert_eq!(claims.company_code.as_deref(), Some("ACME"));
        assert_eq!(claims.department_id.as_deref(), Some("3"));
    }

    #[test]
    fn test_missing_company_code_becomes_empty_string() {
        let mut access = test_access();
        access.company.as_mut().unwrap().code = None;

        let claims = ClaimsAssembler::new().assemble(&access);
        // Present but empty, never omitted, when a company exists.
        assert_eq!(claims.company_code.as_deref(), Some(""));
    }

    #[test]
    fn test_no_company_omits_company_claims() {
        let mut access = test_access();
        access.company = None;
        access.user.company_id = None;

        let claims = ClaimsAssembler::new().assemble(&access);
        assert_eq!(claims.company_id, None);
        assert_eq!(claims.company_code, None);
    }

    #[test]
    fn test_no_department_omits_department_claim() {
        let mut access = test_access();
        access.department = None;
        access.user.department_id = None;

        let claims = ClaimsAssembler::new().assemble(&access);
        assert_eq!(claims.department_id, None);
    }

    #[test]
    fn test_role_pairs_stay_index_aligned() {
        let claims = ClaimsAssembler::new().assemble(&test_access());
        let pairs: Vec<_> = claims.role_pairs().collect();
        assert_eq!(pairs, vec![("ADM", "group"), ("MGR", "company")]);
    }

    #[test]
    fn test_user_without_roles_yields_empty_pairs() {
        let mut access = test_access();
        access.roles.clear();

        let claims = ClaimsAssembler::new().assemble(&access);
        assert!(claims.user_roles.is_empty());
        assert!(claims.role_scopes.is_empty());
    }
}
