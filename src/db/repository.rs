//! User repository for database operations on the `users` table.

use sqlx::mysql::MySqlPool;
use sqlx::{MySql, QueryBuilder};

use super::models::{UpdateUserFields, User};
use crate::error::AppError;

/// Database repository for user operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: MySqlPool,
}

impl UserRepository {
    #[must_use]
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Create a new user, then re-read the row the store committed.
    ///
    /// Two sequential statements, not wrapped in a transaction: a concurrent
    /// delete between them surfaces as `NotFound` even though the insert
    /// persisted.
    pub async fn create_user(&self, name: &str, email: &str) -> Result<User, AppError> {
        let result = sqlx::query("INSERT INTO users (name, email) VALUES (?, ?)")
            .bind(name)
            .bind(email)
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_id() as i64;
        self.get_user_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User", id))
    }

    /// List all users, newest first. A fresh query on every call.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, created_at
              FROM users
             ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Into::into)
    }

    /// Get a user by ID. `None` is a valid outcome, not an error.
    pub async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, created_at
              FROM users
             WHERE id = ?
             LIMIT 1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Into::into)
    }

    /// Apply a partial update, then re-read the full record.
    ///
    /// # Errors
    /// Returns `AppError::InvalidArgument` before issuing any statement when
    /// no updatable field was supplied. Returns `Ok(None)` when the row does
    /// not exist (or vanished concurrently).
    pub async fn update_user(
        &self,
        id: i64,
        fields: &UpdateUserFields,
    ) -> Result<Option<User>, AppError> {
        let mut query = build_update(id, fields)?;
        query.build().execute(&self.pool).await?;
        self.get_user_by_id(id).await
    }

    /// Delete a user. True iff a row was actually removed.
    pub async fn delete_user(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Build the dynamic `UPDATE` statement, accumulating column assignments in
/// encounter order. Values are always bound, never concatenated.
fn build_update<'a>(
    id: i64,
    fields: &'a UpdateUserFields,
) -> Result<QueryBuilder<'a, MySql>, AppError> {
    if fields.is_empty() {
        return Err(AppError::InvalidArgument(
            "Provide at least one field to update.".to_string(),
        ));
    }

    let mut query = QueryBuilder::new("UPDATE users SET ");
    {
        let mut assignments = query.separated(", ");
        if let Some(name) = &fields.name {
            assignments.push("name = ").push_bind_unseparated(name.as_str());
        }
        if let Some(email) = &fields.email {
            assignments
                .push("email = ")
                .push_bind_unseparated(email.as_str());
        }
    }
    query.push(" WHERE id = ");
    query.push_bind(id);

    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: Option<&str>, email: Option<&str>) -> UpdateUserFields {
        UpdateUserFields {
            name: name.map(str::to_string),
            email: email.map(str::to_string),
        }
    }

    #[test]
    fn update_with_name_only_binds_one_column() {
        let fields = fields(Some("Ada"), None);
        let query = build_update(7, &fields).unwrap();
        assert_eq!(query.sql(), "UPDATE users SET name = ? WHERE id = ?");
    }

    #[test]
    fn update_with_email_only_binds_one_column() {
        let fields = fields(None, Some("ada@example.com"));
        let query = build_update(7, &fields).unwrap();
        assert_eq!(query.sql(), "UPDATE users SET email = ? WHERE id = ?");
    }

    #[test]
    fn update_with_both_fields_keeps_encounter_order() {
        let fields = fields(Some("Ada"), Some("ada@example.com"));
        let query = build_update(7, &fields).unwrap();
        assert_eq!(
            query.sql(),
            "UPDATE users SET name = ?, email = ? WHERE id = ?"
        );
    }

    #[test]
    fn update_with_no_fields_fails_before_any_statement() {
        let fields = UpdateUserFields::default();
        assert!(matches!(
            build_update(7, &fields),
            Err(AppError::InvalidArgument(_))
        ));
    }
}
