use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

#[derive(Error, Debug, Serialize)]
pub enum UserbaseError {
    #[error("Usuário {0} não encontrado")]
    UserNotFound(String),
    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
    #[error("Logging error: {0}")]
    LoggingError(String),
}
