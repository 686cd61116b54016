//! REST user handlers.
//!
//! Thin handlers that validate input and delegate to the repository; absent
//! records become 404 here, at the boundary.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::{UpdateUserFields, User};
use crate::error::AppError;
use crate::startup::AppState;

/// Success envelope shared by all user endpoints.
#[derive(Debug, Serialize)]
pub struct DataBody<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl CreateUserRequest {
    /// Both fields are required on creation and must be non-empty.
    fn into_validated(self) -> Result<(String, String), AppError> {
        match (self.name, self.email) {
            (Some(name), Some(email)) if !name.is_empty() && !email.is_empty() => {
                Ok((name, email))
            }
            _ => Err(AppError::InvalidArgument(
                "Both name and email are required.".to_string(),
            )),
        }
    }
}

/// Routes for the user collection and items.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user).get(list_users))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
}

async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<DataBody<User>>), AppError> {
    let (name, email) = req.into_validated()?;
    let user = state.db.users.create_user(&name, &email).await?;
    Ok((StatusCode::CREATED, Json(DataBody { data: user })))
}

async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<DataBody<Vec<User>>>, AppError> {
    let users = state.db.users.list_users().await?;
    Ok(Json(DataBody { data: users }))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DataBody<User>>, AppError> {
    let user = state
        .db
        .users
        .get_user_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("User", id))?;
    Ok(Json(DataBody { data: user }))
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(fields): Json<UpdateUserFields>,
) -> Result<Json<DataBody<User>>, AppError> {
    let user = state
        .db
        .users
        .update_user(id, &fields)
        .await?
        .ok_or_else(|| AppError::not_found("User", id))?;
    Ok(Json(DataBody { data: user }))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if state.db.users.delete_user(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("User", id))
    }
}
