//! End-to-end claim flow: assemble from a user record, sign, validate,
//! then authorize against company-scoped records.

use chrono::Utc;

use prosite_auth::claims::ClaimsAssembler;
use prosite_auth::jwt::{JwtDecoder, JwtEncoder};
use prosite_auth::scope::ScopeGate;
use prosite_core::config::auth::AuthConfig;
use prosite_entity::access::{RoleGrant, UserAccess};
use prosite_entity::company::Company;
use prosite_entity::department::Department;
use prosite_entity::user::User;

fn config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "integration-secret-integration-secret".to_string(),
        issuer: "prosite".to_string(),
        audience: "prosite-clients".to_string(),
        token_ttl_hours: 3,
        group_scopes: vec!["group".to_string()],
    }
}

/// Mirrors what the repository returns: inactive assignments are already
/// filtered, so only the two active grants appear here even though a third
/// assignment exists in the database with `is_active = false`.
fn access_record() -> UserAccess {
    UserAccess {
        user: User {
            id: 42,
            email: "a@x.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            display_name: "Ayşe Yılmaz".to_string(),
            role: "SiteManager".to_string(),
            company_id: Some(7),
            department_id: Some(3),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        },
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
                role_id: 2,
                name: "Administrator".to_string(),
                code: "ADM".to_string(),
                scope: "group".to_string(),
            },
            RoleGrant {
                role_id: 1,
                name: "Manager".to_string(),
                code: "MGR".to_string(),
                scope: "company".to_string(),
            },
        ],
    }
}

#[test]
fn assembled_claims_survive_encode_decode() {
    let config = config();
    let identity = ClaimsAssembler::new().assemble(&access_record());
    let (token, _) = JwtEncoder::new(&config).issue(identity.clone()).unwrap();

    let decoded = JwtDecoder::new(&config).decode(&token).unwrap();

    assert_eq!(decoded.identity.company_id.as_deref(), Some("7"));
    assert_eq!(decoded.identity.company_code.as_deref(), Some("ACME"));
    assert_eq!(decoded.identity.department_id.as_deref(), Some("3"));

    let pairs: Vec<_> = decoded.identity.role_pairs().collect();
    assert!(pairs.contains(&("MGR", "company")));
    assert!(pairs.contains(&("ADM", "group")));
    // Exactly the active assignments, never more.
    assert_eq!(pairs.len(), 2);
}

#[test]
fn decoded_claims_drive_the_gate() {
    let config = config();
    let gate = ScopeGate::from_config(&config);

    let identity = ClaimsAssembler::new().assemble(&access_record());
    let (token, _) = JwtEncoder::new(&config).issue(identity).unwrap();
    let decoded = JwtDecoder::new(&config).decode(&token).unwrap();

    // Holds the group scope, so foreign-company records are visible.
    assert!(gate.has_group_access(&decoded.identity));
    assert!(gate.ensure_company_access(&decoded.identity, "OTHER").is_ok());
}

#[test]
fn company_bound_caller_is_fenced_in() {
    let config = config();
    let gate = ScopeGate::from_config(&config);

    let mut access = access_record();
    access.roles.retain(|grant| grant.scope != "group");

    let identity = ClaimsAssembler::new().assemble(&access);
    let (token, _) = JwtEncoder::new(&config).issue(identity).unwrap();
    let decoded = JwtDecoder::new(&config).decode(&token).unwrap();

    assert!(!gate.has_group_access(&decoded.identity));
    assert!(gate.ensure_company_access(&decoded.identity, "ACME").is_ok());
    assert!(gate.ensure_company_access(&decoded.identity, "OTHER").is_err());
}
