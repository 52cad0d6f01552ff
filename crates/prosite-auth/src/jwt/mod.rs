//! Token issuance and request-time validation.

pub mod decoder;
pub mod encoder;

pub use decoder::JwtDecoder;
pub use encoder::JwtEncoder;
