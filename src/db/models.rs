//! Database models for the users table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User record, mapped from the fixed `id, name, email, created_at`
/// projection. No other row shape is accepted.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied to a partial update; only present fields participate in
/// the statement.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserFields {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UpdateUserFields {
    /// True when no updatable field was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}
