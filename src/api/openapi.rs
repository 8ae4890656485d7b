use utoipa::OpenApi;

use crate::{
    api::models::{CreateUserRequest, ErrorResponse, UpdateUserRequest},
    core::models::{audit::AppLog, user::User},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::list_users,
        super::handlers::create_user,
        super::handlers::get_user,
        super::handlers::update_user,
        super::handlers::delete_user,
        super::handlers::get_app_logs
    ),
    components(schemas(CreateUserRequest, UpdateUserRequest, ErrorResponse, User, AppLog)),
    info(
        title = "Userbase API",
        description = "CRUD API for user records",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
