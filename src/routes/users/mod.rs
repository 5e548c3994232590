pub mod orders;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use utoipa_axum::router::OpenApiRouter;

use crate::{
    app_error::{AppError, ErrorRes},
    app_state::AppState,
    models::{CreateUserEntity, MenuEntity, UserEntity},
};

/// Customer-facing routes. None of them require authentication.
pub fn routes_with_openapi() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(utoipa_axum::routes!(create_user))
        .routes(utoipa_axum::routes!(get_menu))
        .merge(orders::routes_with_openapi())
}

/// Register a customer at a table.
#[utoipa::path(
    post,
    path = "/users",
    tags = ["Users"],
    request_body = CreateUserEntity,
    responses(
        (status = 201, description = "Registered user", body = UserEntity),
        (status = 400, description = "Invalid user", body = ErrorRes),
        (status = 409, description = "Email already registered", body = ErrorRes)
    )
)]
async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<CreateUserEntity>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    let user = state.users.create(body).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Browse the menu.
#[utoipa::path(
    get,
    path = "/users/menu",
    tags = ["Users"],
    responses(
        (status = 200, description = "List all menu items", body = Vec<MenuEntity>)
    )
)]
async fn get_menu(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.menu.list().await?))
}
