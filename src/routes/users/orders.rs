use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;

use crate::{
    app_error::{AppError, ErrorRes},
    app_state::AppState,
    services::orders::RequestedLine,
    views::OrderView,
};

pub fn routes_with_openapi() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(utoipa_axum::routes!(create_order))
        .routes(utoipa_axum::routes!(get_user_orders))
}

#[derive(Deserialize, ToSchema)]
pub struct CreateOrderReq {
    pub user_id: i32,
    pub menu_items: Vec<RequestedLine>,
}

/// Place an order. Line prices are taken from the menu at request time.
#[utoipa::path(
    post,
    path = "/users/orders",
    tags = ["Users"],
    request_body = CreateOrderReq,
    responses(
        (status = 201, description = "Created order successfully", body = OrderView),
        (status = 400, description = "Invalid order or menu item not available", body = ErrorRes),
        (status = 404, description = "User or menu item not found", body = ErrorRes),
        (status = 500, description = "Failed to create order", body = ErrorRes)
    )
)]
async fn create_order(
    State(state): State<AppState>,
    body: Result<Json<CreateOrderReq>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    let view = state.orders.create(body.user_id, body.menu_items).await?;

    Ok((StatusCode::CREATED, Json(view)))
}

/// Fetch every order placed by a user, newest first.
#[utoipa::path(
    get,
    path = "/users/orders/{user_id}",
    tags = ["Users"],
    params(
        ("user_id" = i32, Path, description = "Owning user ID")
    ),
    responses(
        (status = 200, description = "List user orders", body = Vec<OrderView>)
    )
)]
async fn get_user_orders(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(user_id) = path?;
    Ok(Json(state.orders.orders_for_user(user_id).await?))
}
