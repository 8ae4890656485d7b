//! HTTP surface: the `/api` routes, the OpenAPI document and the middleware
//! stack shared by `main` and the in-process tests.

pub mod handlers;
pub mod models;
pub mod openapi;

use crate::core::services::UserbaseService;
use crate::infrastructure::{logging::in_memory::InMemoryLogging, storage::in_memory::InMemoryStorage};
use axum::{Router, http::header, routing::get};
use http::Method;
use openapi::ApiDoc;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub type AppState = Arc<UserbaseService<InMemoryLogging, InMemoryStorage>>;

pub fn app(service: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(|| async { "OK" }))
        .nest("/api", handlers::api_routes(service))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
}
