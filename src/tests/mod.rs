mod api_tests;

use crate::api::{self, AppState};
use crate::core::models::user::NewUser;
use crate::core::services::UserbaseService;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::storage::in_memory::InMemoryStorage;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;

pub fn create_test_service() -> UserbaseService<InMemoryLogging, InMemoryStorage> {
    let _ = env_logger::try_init();
    let storage = InMemoryStorage::new();
    let logging = InMemoryLogging::new();
    UserbaseService::new(storage, logging)
}

pub fn create_test_app() -> (Router, AppState) {
    let service = Arc::new(create_test_service());
    (api::app(service.clone(), Duration::from_secs(5)), service)
}

pub fn lucas() -> NewUser {
    NewUser {
        full_name: "Lucas de Paula".to_string(),
        email: "lucas@email.com".to_string(),
        password: "senha123".to_string(),
    }
}
