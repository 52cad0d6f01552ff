//! # prosite-database
//!
//! PostgreSQL connection management and the repository implementations
//! used by the Prosite auth core.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
