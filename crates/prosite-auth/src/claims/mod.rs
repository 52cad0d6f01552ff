//! Claim assembly and the token payload structure.

pub mod assembler;
pub mod payload;

pub use assembler::ClaimsAssembler;
pub use payload::{IdentityClaims, TokenClaims};
