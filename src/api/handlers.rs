use crate::{
    api::{
        AppState,
        models::{ApiError, CreateUserRequest, ErrorResponse, UpdateUserRequest},
    },
    core::{
        errors::UserbaseError,
        models::{audit::AppLog, user::User},
    },
};
use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};

// Define API routes
pub fn api_routes(service: AppState) -> Router {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{user_id}", get(get_user).put(update_user).delete(delete_user))
        .route("/logs", get(get_app_logs))
        .with_state(service)
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError(UserbaseError::InvalidBody(rejection.body_text())))
}

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users, ordered by id", body = Vec<User>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub(crate) async fn list_users(State(service): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = service.list_users().await?;
    Ok(Json(users))
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully", body = User),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub(crate) async fn create_user(
    State(service): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let req = json_body(payload)?;
    let user = service.create_user(req.into()).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    params(
        ("user_id" = String, Path, description = "ID of the user to retrieve")
    ),
    responses(
        (status = 200, description = "User retrieved successfully", body = User),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub(crate) async fn get_user(
    State(service): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let user = service.get_user(&user_id).await?;
    Ok(Json(user))
}

#[utoipa::path(
    put,
    path = "/api/users/{user_id}",
    request_body = UpdateUserRequest,
    params(
        ("user_id" = String, Path, description = "ID of the user to update")
    ),
    responses(
        (status = 200, description = "User updated successfully", body = User),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub(crate) async fn update_user(
    State(service): State<AppState>,
    Path(user_id): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    // 404 takes precedence over a malformed body.
    service.get_user(&user_id).await?;
    let req = json_body(payload)?;
    let user = service.update_user(&user_id, req.into()).await?;
    Ok(Json(user))
}

#[utoipa::path(
    delete,
    path = "/api/users/{user_id}",
    params(
        ("user_id" = String, Path, description = "ID of the user to delete")
    ),
    responses(
        (status = 204, description = "User deleted successfully"),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub(crate) async fn delete_user(
    State(service): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.delete_user(&user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/logs",
    responses(
        (status = 200, description = "Action log entries, oldest first", body = Vec<AppLog>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub(crate) async fn get_app_logs(State(service): State<AppState>) -> Result<Json<Vec<AppLog>>, ApiError> {
    let logs = service.get_app_logs().await?;
    Ok(Json(logs))
}
