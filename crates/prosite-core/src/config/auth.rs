//! Authentication and token configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Placeholder secret shipped in example configs. Never valid at runtime.
const PLACEHOLDER_SECRET: &str = "CHANGE_ME_IN_PRODUCTION";

/// Minimum accepted signing secret length in bytes (HMAC-SHA256 key).
const MIN_SECRET_LENGTH: usize = 32;

/// Upper bound on the token lifetime (one year), keeping expiry arithmetic
/// well inside the timestamp range.
const MAX_TOKEN_TTL_HOURS: u64 = 24 * 365;

/// Authentication, token signing, and authorization scope configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for token signing (HMAC-SHA256). No default; must be
    /// supplied via config file or environment.
    #[serde(default)]
    pub jwt_secret: String,
    /// Issuer embedded in and required of every token.
    #[serde(default = "default_issuer")]
    pub issuer: String,
    /// Audience embedded in and required of every token.
    #[serde(default = "default_audience")]
    pub audience: String,
    /// Token lifetime in hours, fixed at issuance.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_hours: u64,
    /// Role scope values that grant cross-company ("group") access.
    /// Which scopes qualify is deployment policy, not code.
    #[serde(default = "default_group_scopes")]
    pub group_scopes: Vec<String>,
}

impl AuthConfig {
    /// Validates that the configuration can safely sign tokens.
    ///
    /// A missing, placeholder, or too-short secret is a startup-fatal
    /// configuration error.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt_secret.is_empty() {
            return Err(AppError::configuration(
                "auth.jwt_secret is not set; refusing to start without a signing secret",
            ));
        }
        if self.jwt_secret == PLACEHOLDER_SECRET {
            return Err(AppError::configuration(
                "auth.jwt_secret is still the placeholder value; set a real secret",
            ));
        }
        if self.jwt_secret.len() < MIN_SECRET_LENGTH {
            return Err(AppError::configuration(format!(
                "auth.jwt_secret must be at least {MIN_SECRET_LENGTH} bytes"
            )));
        }
        if self.token_ttl_hours == 0 {
            return Err(AppError::configuration(
                "auth.token_ttl_hours must be greater than zero",
            ));
        }
        if self.token_ttl_hours > MAX_TOKEN_TTL_HOURS {
            return Err(AppError::configuration(format!(
                "auth.token_ttl_hours must be at most {MAX_TOKEN_TTL_HOURS}"
            )));
        }
        Ok(())
    }
}

fn default_issuer() -> String {
    "prosite".to_string()
}

fn default_audience() -> String {
    "prosite-clients".to_string()
}

fn default_token_ttl() -> u64 {
    3
}

fn default_group_scopes() -> Vec<String> {
    vec!["group".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "0123456789abcdef0123456789abcdef".to_string(),
            issuer: default_issuer(),
            audience: default_audience(),
            token_ttl_hours: 3,
            group_scopes: default_group_scopes(),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_empty_secret_rejected() {
        let mut config = valid_config();
        config.jwt_secret = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_placeholder_secret_rejected() {
        let mut config = valid_config();
        config.jwt_secret = PLACEHOLDER_SECRET.to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_short_secret_rejected() {
        let mut config = valid_config();
        config.jwt_secret = "short".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let mut config = valid_config();
        config.token_ttl_hours = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_absurd_ttl_rejected() {
        let mut config = valid_config();
        config.token_ttl_hours = u64::MAX;
        assert!(config.validate().is_err());

        config.token_ttl_hours = MAX_TOKEN_TTL_HOURS;
        assert!(config.validate().is_ok());
    }
}
