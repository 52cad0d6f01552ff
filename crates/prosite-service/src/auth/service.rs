//! Login orchestration: credential verification through token issuance.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use prosite_auth::claims::ClaimsAssembler;
use prosite_auth::jwt::JwtEncoder;
use prosite_auth::password::PasswordHasher;
use prosite_core::error::AppError;
use prosite_database::repositories::UserRepository;
use prosite_entity::access::UserAccess;

/// Localized generic credential failure message. Identical for an unknown
/// email and a wrong password so that responses cannot be used to enumerate
/// accounts.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Geçersiz e-posta veya şifre.";

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// The signed token.
    pub token: String,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
    /// The enriched user record the claims were derived from, for the
    /// login response body.
    pub access: UserAccess,
}

/// Verifies credentials, assembles claims, and issues tokens.
#[derive(Debug, Clone)]
pub struct AuthService {
    user_repo: Arc<UserRepository>,
    password_hasher: Arc<PasswordHasher>,
    assembler: ClaimsAssembler,
    encoder: Arc<JwtEncoder>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        password_hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
    ) -> Self {
        Self {
            user_repo,
            password_hasher,
            assembler: ClaimsAssembler::new(),
            encoder,
        }
    }

    /// Authenticates an email/password pair and issues a signed token.
    ///
    /// Any credential failure (unknown email or wrong password) produces
    /// the same generic unauthorized error. On success the user record is
    /// returned enriched with company, department, and active role
    /// assignments, exactly as they were embedded in the token.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AppError> {
        let access = match self.user_repo.find_access_by_email(email).await? {
            Some(access) => access,
            None => {
                warn!(email = %email, "Login attempt for unknown email");
                return Err(AppError::unauthorized(INVALID_CREDENTIALS_MESSAGE));
            }
        };

        let password_valid = self
            .password_hasher
            .verify_password(password, &access.user.password_hash)?;

        if !password_valid {
            warn!(user_id = access.user.id, "Login attempt with wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        }

        let identity = self.assembler.assemble(&access);
        let (token, expires_at) = self.encoder.issue(identity)?;

        info!(
            user_id = access.user.id,
            roles = access.roles.len(),
            "User authenticated"
        );

        Ok(LoginOutcome {
            token,
            expires_at,
            access,
        })
    }
}
