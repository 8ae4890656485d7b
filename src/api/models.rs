use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::core::errors::UserbaseError;
use crate::core::models::user::{NewUser, UserChanges};

pub const USER_NOT_FOUND_MESSAGE: &str = "Usuário não encontrado";

// Request structs for JSON payloads
#[derive(Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

impl From<CreateUserRequest> for NewUser {
    fn from(req: CreateUserRequest) -> Self {
        NewUser {
            full_name: req.full_name,
            email: req.email,
            password: req.password,
        }
    }
}

/// Any subset of the mutable user fields. Absent (or `null`) fields keep
/// their stored value.
#[derive(Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl From<UpdateUserRequest> for UserChanges {
    fn from(req: UpdateUserRequest) -> Self {
        UserChanges {
            full_name: req.full_name,
            email: req.email,
            password: req.password,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

// Newtype wrapper for UserbaseError to implement IntoResponse
pub struct ApiError(pub UserbaseError);

impl From<UserbaseError> for ApiError {
    fn from(err: UserbaseError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self.0 {
            UserbaseError::UserNotFound(_) => (StatusCode::NOT_FOUND, USER_NOT_FOUND_MESSAGE.to_string()),
            UserbaseError::InvalidInput(_, detail) => (
                StatusCode::BAD_REQUEST,
                format!("{}: {}", detail.title, detail.description),
            ),
            UserbaseError::InvalidBody(reason) => (StatusCode::BAD_REQUEST, reason),
            err @ UserbaseError::LoggingError(_) => {
                error!(error = %err, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };
        (status, Json(ErrorResponse { message })).into_response()
    }
}
