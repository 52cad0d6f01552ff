//! # prosite-auth
//!
//! Authentication and claims-based authorization core for the Prosite
//! platform.
//!
//! ## Modules
//!
//! - `password`: Argon2id password hashing and verification
//! - `claims`: deterministic claim assembly from an enriched user record
//! - `jwt`: token issuance and request-time validation (HMAC-SHA256)
//! - `scope`: pure per-request authorization decisions over validated claims

pub mod claims;
pub mod jwt;
pub mod password;
pub mod scope;

pub use claims::{ClaimsAssembler, IdentityClaims, TokenClaims};
pub use jwt::{JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
pub use scope::ScopeGate;
