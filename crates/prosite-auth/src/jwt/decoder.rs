//! Request-time token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use prosite_core::config::auth::AuthConfig;
use prosite_core::error::AppError;

use crate::claims::TokenClaims;

/// Validates tokens on every incoming request.
///
/// Signature, issuer, audience, and expiry are all checked; any single
/// failure rejects the request as unauthenticated. Decoded claims live only
/// for the request that presented them.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration (algorithm, issuer, audience, expiry).
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a token string.
    ///
    /// Checks, in order of the underlying library:
    /// 1. Signature matches the configured secret
    /// 2. Issuer equals the configured issuer
    /// 3. Audience equals the configured audience
    /// 4. Current time is before the embedded expiry
    pub fn decode(&self, token: &str) -> Result<TokenClaims, AppError> {
        let token_data =
            decode::<TokenClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::unauthorized("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::unauthorized("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::unauthorized("Invalid token signature")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                        AppError::unauthorized("Invalid token issuer")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidAudience => {
                        AppError::unauthorized("Invalid token audience")
                    }
                    _ => AppError::unauthorized(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use jsonwebtoken::{EncodingKey, Header, encode};

    use crate::claims::{IdentityClaims, TokenClaims};
    use crate::jwt::encoder::JwtEncoder;
    use prosite_core::config::auth::AuthConfig;

    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret-test-secret-test-secret!".to_string(),
            issuer: "prosite".to_string(),
            audience: "prosite-clients".to_string(),
            token_ttl_hours: 3,
            group_scopes: vec!["group".to_string()],
        }
    }

    fn test_identity() -> IdentityClaims {
        IdentityClaims {
            sub: "42".to_string(),
            user_id: "42".to_string(),
            email: "a@x.com".to_string(),
            role: "SiteManager".to_string(),
            company_id: Some("7".to_string()),
            company_code: Some("ACME".to_string()),
            department_id: Some("3".to_string()),
            user_roles: vec!["ADM".to_string(), "MGR".to_string()],
            role_scopes: vec!["group".to_string(), "company".to_string()],
        }
    }

    #[test]
    fn test_issue_then_decode_round_trip() {
        let config = test_config();
        let encoder = JwtEncoder::new(&config);
        let decoder = JwtDecoder::new(&config);

        let (token, _expires_at) = encoder.issue(test_identity()).unwrap();
        let claims = decoder.decode(&token).unwrap();

        assert_eq!(claims.identity, test_identity());
        assert_eq!(claims.iss, "prosite");
        assert_eq!(claims.aud, "prosite-clients");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_lifetime_is_fixed_at_issuance() {
        let config = test_config();
        let encoder = JwtEncoder::new(&config);

        let (_, expires_at) = encoder.issue(test_identity()).unwrap();
        let lifetime = expires_at - Utc::now();
        assert!(lifetime <= chrono::Duration::hours(3));
        assert!(lifetime > chrono::Duration::hours(2));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let config = test_config();
        let encoder = JwtEncoder::new(&config);

        let mut other = test_config();
        other.jwt_secret = "another-secret-another-secret-entirely".to_string();
        let decoder = JwtDecoder::new(&other);

        let (token, _) = encoder.issue(test_identity()).unwrap();
        assert!(decoder.decode(&token).is_err());
    }

    #[test]
    fn test_wrong_issuer_is_rejected() {
        let config = test_config();
        let mut other = test_config();
        other.issuer = "someone-else".to_string();

        let (token, _) = JwtEncoder::new(&other).issue(test_identity()).unwrap();
        assert!(JwtDecoder::new(&config).decode(&token).is_err());
    }

    #[test]
    fn test_wrong_audience_is_rejected() {
        let config = test_config();
        let mut other = test_config();
        other.audience = "other-clients".to_string();

        let (token, _) = JwtEncoder::new(&other).issue(test_identity()).unwrap();
        assert!(JwtDecoder::new(&config).decode(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let config = test_config();
        let decoder = JwtDecoder::new(&config);

        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            identity: test_identity(),
            iss: config.issuer.clone(),
            aud: config.audience.clone(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap();

        assert!(decoder.decode(&token).is_err());
    }

    #[test]
    fn test_token_valid_just_before_expiry() {
        let config = test_config();
        let decoder = JwtDecoder::new(&config);

        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            identity: test_identity(),
            iss: config.issuer.clone(),
            aud: config.audience.clone(),
            iat: now - 3 * 3600 + 60,
            exp: now + 60,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap();

        assert!(decoder.decode(&token).is_ok());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let decoder = JwtDecoder::new(&test_config());
        assert!(decoder.decode("not.a.token").is_err());
        assert!(decoder.decode("").is_err());
    }
}
