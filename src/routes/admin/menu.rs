use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use utoipa_axum::router::OpenApiRouter;

use crate::{
    app_error::{AppError, ErrorRes},
    app_state::AppState,
    models::{CreateMenuEntity, MenuEntity},
    services::MenuKey,
    views::MessageRes,
};

/// Admin menu management. Mounted behind the admin gate.
pub fn routes_with_openapi() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(utoipa_axum::routes!(get_menus, create_menu))
        .routes(utoipa_axum::routes!(
            get_menu_by_id,
            update_menu_by_id,
            delete_menu_by_id
        ))
        .routes(utoipa_axum::routes!(
            get_menu_by_name,
            update_menu_by_name,
            delete_menu_by_name
        ))
}

fn deleted() -> Json<MessageRes> {
    Json(MessageRes {
        message: "Menu deleted successfully".into(),
    })
}

/// List every menu item.
#[utoipa::path(
    get,
    path = "/admin/menu",
    tags = ["Menu"],
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "List all menu items", body = Vec<MenuEntity>)
    )
)]
async fn get_menus(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.menu.list().await?))
}

/// Add a menu item.
#[utoipa::path(
    post,
    path = "/admin/menu",
    tags = ["Menu"],
    security(("bearerAuth" = [])),
    request_body = CreateMenuEntity,
    responses(
        (status = 201, description = "Created menu item", body = MenuEntity),
        (status = 400, description = "Invalid menu item", body = ErrorRes)
    )
)]
async fn create_menu(
    State(state): State<AppState>,
    body: Result<Json<CreateMenuEntity>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    let menu = state.menu.create(body).await?;

    Ok((StatusCode::CREATED, Json(menu)))
}

/// Fetch a menu item by id.
#[utoipa::path(
    get,
    path = "/admin/menu/id/{id}",
    tags = ["Menu"],
    security(("bearerAuth" = [])),
    params(
        ("id" = i32, Path, description = "Menu ID to fetch")
    ),
    responses(
        (status = 200, description = "Menu item", body = MenuEntity),
        (status = 404, description = "Menu not found", body = ErrorRes)
    )
)]
async fn get_menu_by_id(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = path?;
    Ok(Json(state.menu.get(id).await?))
}

/// Replace the editable fields of a menu item found by id.
#[utoipa::path(
    put,
    path = "/admin/menu/id/{id}",
    tags = ["Menu"],
    security(("bearerAuth" = [])),
    params(
        ("id" = i32, Path, description = "Menu ID to update")
    ),
    request_body = CreateMenuEntity,
    responses(
        (status = 200, description = "Updated menu item", body = MenuEntity),
        (status = 404, description = "Menu not found", body = ErrorRes)
    )
)]
async fn update_menu_by_id(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    body: Result<Json<CreateMenuEntity>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = path?;
    let Json(body) = body?;

    Ok(Json(state.menu.update(MenuKey::Id(id), body).await?))
}

/// Delete a menu item found by id.
#[utoipa::path(
    delete,
    path = "/admin/menu/id/{id}",
    tags = ["Menu"],
    security(("bearerAuth" = [])),
    params(
        ("id" = i32, Path, description = "Menu ID to delete")
    ),
    responses(
        (status = 200, description = "Menu deleted", body = MessageRes),
        (status = 404, description = "Menu not found", body = ErrorRes)
    )
)]
async fn delete_menu_by_id(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = path?;
    state.menu.delete(MenuKey::Id(id)).await?;

    Ok(deleted())
}

/// Fetch the first menu item (lowest id) whose name contains `name`.
#[utoipa::path(
    get,
    path = "/admin/menu/name/{name}",
    tags = ["Menu"],
    security(("bearerAuth" = [])),
    params(
        ("name" = String, Path, description = "Case-sensitive name fragment")
    ),
    responses(
        (status = 200, description = "First matching menu item", body = MenuEntity),
        (status = 404, description = "Menu not found", body = ErrorRes)
    )
)]
async fn get_menu_by_name(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(name) = path?;
    Ok(Json(state.menu.search_by_name(&name).await?))
}

/// Replace the editable fields of the menu item with exactly this name.
#[utoipa::path(
    put,
    path = "/admin/menu/name/{name}",
    tags = ["Menu"],
    security(("bearerAuth" = [])),
    params(
        ("name" = String, Path, description = "Exact menu name")
    ),
    request_body = CreateMenuEntity,
    responses(
        (status = 200, description = "Updated menu item", body = MenuEntity),
        (status = 404, description = "Menu not found", body = ErrorRes)
    )
)]
async fn update_menu_by_name(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<CreateMenuEntity>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(name) = path?;
    let Json(body) = body?;

    Ok(Json(state.menu.update(MenuKey::Name(name), body).await?))
}

/// Delete the menu item with exactly this name.
#[utoipa::path(
    delete,
    path = "/admin/menu/name/{name}",
    tags = ["Menu"],
    security(("bearerAuth" = [])),
    params(
        ("name" = String, Path, description = "Exact menu name")
    ),
    responses(
        (status = 200, description = "Menu deleted", body = MessageRes),
        (status = 404, description = "Menu not found", body = ErrorRes)
    )
)]
async fn delete_menu_by_name(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(name) = path?;
    state.menu.delete(MenuKey::Name(name)).await?;

    Ok(deleted())
}
