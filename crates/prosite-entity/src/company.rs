//! Company entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A company (tenant) in the Prosite system.
///
/// Referenced, never mutated, by the auth core. The `code` is a short
/// unique identifier embedded in claims for fast scope comparison.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Company {
    /// Unique company identifier.
    pub id: i64,
    /// Full company name.
    pub name: String,
    /// Short unique code used for claim-level scope checks.
    pub code: Option<String>,
}
