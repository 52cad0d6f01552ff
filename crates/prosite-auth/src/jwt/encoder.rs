//! Token creation: signs assembled claims with a fixed lifetime.

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use prosite_core::config::auth::AuthConfig;
use prosite_core::error::AppError;

use crate::claims::{IdentityClaims, TokenClaims};

/// Creates signed, time-bounded tokens (HMAC-SHA256).
///
/// The signing key is held in memory only; it is never embedded in a token
/// payload and must never appear in logs. There is no refresh mechanism;
/// a token expires at `iat + ttl` and is only replaced by a fresh login.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Issuer stamped into every token.
    issuer: String,
    /// Audience stamped into every token.
    audience: String,
    /// Token TTL in hours.
    ttl_hours: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("ttl_hours", &self.ttl_hours)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            ttl_hours: config.token_ttl_hours as i64,
        }
    }

    /// Signs the given identity claims into a token expiring at
    /// issuance time + the configured lifetime.
    ///
    /// Returns the token string and its expiry.
    pub fn issue(
        &self,
        identity: IdentityClaims,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::hours(self.ttl_hours);

        let claims = TokenClaims {
            identity,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))?;

        Ok((token, expires_at))
    }
}
