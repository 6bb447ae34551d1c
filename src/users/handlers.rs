use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use bytes::Bytes;
use tracing::{instrument, warn};

use crate::{
    state::AppState,
    users::{
        dto::{MessageResponse, UserEnvelope, UserSummary},
        error::UserError,
        services::UserResource,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

#[instrument(skip(users))]
pub async fn list_users(
    State(users): State<UserResource>,
) -> Result<Json<Vec<UserSummary>>, UserError> {
    Ok(Json(users.list_users().await?))
}

#[instrument(skip(users))]
pub async fn get_user(
    State(users): State<UserResource>,
    Path(id): Path<String>,
) -> Result<Json<UserSummary>, UserError> {
    let id = parse_id(&id)?;
    Ok(Json(users.get_user(id).await?))
}

#[instrument(skip(users, body))]
pub async fn create_user(
    State(users): State<UserResource>,
    body: Bytes,
) -> Result<(StatusCode, Json<UserEnvelope>), UserError> {
    let user = users.create_user(&body).await?;
    Ok((
        StatusCode::CREATED,
        Json(UserEnvelope {
            message: "User created successfully".into(),
            user,
        }),
    ))
}

#[instrument(skip(users, body))]
pub async fn update_user(
    State(users): State<UserResource>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<UserEnvelope>, UserError> {
    let id = parse_id(&id)?;
    let user = users.update_user(id, &body).await?;
    Ok(Json(UserEnvelope {
        message: "User updated successfully".into(),
        user,
    }))
}

#[instrument(skip(users))]
pub async fn delete_user(
    State(users): State<UserResource>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, UserError> {
    let id = parse_id(&id)?;
    users.delete_user(id).await?;
    Ok(Json(MessageResponse {
        message: "User deleted".into(),
    }))
}

/// Only positive integers can name a user; anything else matches nothing.
fn parse_id(raw: &str) -> Result<i64, UserError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => {
            warn!(id = raw, "not a user id");
            Err(UserError::NotFound)
        }
    }
}
