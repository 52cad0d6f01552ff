//! # prosite-service
//!
//! Business logic layer for Prosite. Orchestrates the repositories and the
//! auth core; handlers call into this crate, never into the database
//! directly.

pub mod auth;
pub mod context;

pub use auth::AuthService;
pub use context::RequestContext;
