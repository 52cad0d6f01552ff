//! Department entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A department within a company. Referenced only by the auth core.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Department {
    /// Unique department identifier.
    pub id: i64,
    /// Department name.
    pub name: String,
}
