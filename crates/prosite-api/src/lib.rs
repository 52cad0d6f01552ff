//! # prosite-api
//!
//! HTTP API layer for Prosite built on Axum.
//!
//! Provides the login and identity endpoints, the WebSocket events channel,
//! middleware (bearer-token validation, declarative route scoping, CORS,
//! logging), extractors, DTOs, and error mapping.

pub mod dto;
pub mod error;
pub mod events;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
