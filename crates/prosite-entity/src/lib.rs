//! # prosite-entity
//!
//! Domain entity models for the Prosite auth core. Every struct in this
//! crate represents a database table row or a value object derived from
//! one. All entities derive `Debug`, `Clone`, `Serialize`, `Deserialize`,
//! and database entities additionally derive `sqlx::FromRow`.

pub mod access;
pub mod company;
pub mod department;
pub mod role;
pub mod user;

pub use access::{RoleGrant, UserAccess};
pub use company::Company;
pub use department::Department;
pub use role::{Role, UserRole};
pub use user::User;
