use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{
    error::{ApiError, AppError},
    response::{CommonResponse, MessageResponse},
    state::AppState,
    users::{dto::UserRequest, repo_types::User},
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<CommonResponse<Vec<User>>, ApiError> {
    let users = state
        .users
        .list_all()
        .await
        .map_err(|e| e.into_api("Failed to get all users"))?;
    Ok(CommonResponse::ok("Retrieved data successfully", users))
}

#[instrument(skip(state, id))]
pub async fn get_user(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<CommonResponse<User>, ApiError> {
    let Path(id) = id.map_err(AppError::from)?;
    let user = state
        .users
        .find_by_id(id)
        .await
        .map_err(|e| e.into_api(format!("Failed to get user with ID {id}")))?;
    Ok(CommonResponse::ok("Retrieved data successfully", user))
}

#[instrument(skip(state, body))]
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let body = UserRequest::decode(&body.map_err(AppError::from)?)?;
    state
        .users
        .register(body.into())
        .await
        .map_err(|e| e.into_api("Failed to create user"))?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User created successfully")),
    ))
}

#[instrument(skip(state, id, body))]
pub async fn update_user(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = id.map_err(AppError::from)?;
    let body = UserRequest::decode(&body.map_err(AppError::from)?)?;
    state
        .users
        .update_by_id(id, body.into())
        .await
        .map_err(|e| e.into_api(format!("Failed to update user with ID {id}")))?;
    Ok(Json(MessageResponse::new("User updated successfully")))
}

#[instrument(skip(state, id))]
pub async fn delete_user(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = id.map_err(AppError::from)?;
    state
        .users
        .remove_by_id(id)
        .await
        .map_err(|e| e.into_api(format!("Failed to delete user with ID {id}")))?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
