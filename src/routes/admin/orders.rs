use axum::{
    Extension, Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;

use crate::{
    app_error::{AppError, ErrorRes},
    app_state::AppState,
    middleware::AdminIdentity,
    views::OrderWithContextView,
};

/// Admin order review and status management. Mounted behind the admin gate.
pub fn routes_with_openapi() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(utoipa_axum::routes!(get_orders))
        .routes(utoipa_axum::routes!(get_order))
        .routes(utoipa_axum::routes!(update_order_status))
        .routes(utoipa_axum::routes!(update_payment_status))
}

/// Fetch every order with its user and items, newest first.
#[utoipa::path(
    get,
    path = "/admin/orders",
    tags = ["Orders"],
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "List all orders", body = Vec<OrderWithContextView>)
    )
)]
async fn get_orders(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.orders.list().await?))
}

/// Fetch a specific order with its user and items.
#[utoipa::path(
    get,
    path = "/admin/orders/{id}",
    tags = ["Orders"],
    security(("bearerAuth" = [])),
    params(
        ("id" = i32, Path, description = "Order ID to fetch")
    ),
    responses(
        (status = 200, description = "Get order successfully", body = OrderWithContextView),
        (status = 404, description = "Order not found", body = ErrorRes)
    )
)]
async fn get_order(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = path?;
    Ok(Json(state.orders.get(id).await?))
}

/// An unknown order is reported before a malformed body.
async fn order_body<T>(
    state: &AppState,
    id: i32,
    body: Result<Json<T>, JsonRejection>,
) -> Result<Json<T>, AppError> {
    match body {
        Ok(body) => Ok(body),
        Err(rejection) => {
            state.orders.get(id).await?;
            Err(rejection.into())
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateOrderStatusReq {
    /// One of `pending`, `processing`, `completed`, `cancelled`.
    pub status: String,
}

/// Set the order status.
#[utoipa::path(
    put,
    path = "/admin/orders/{id}/status",
    tags = ["Orders"],
    security(("bearerAuth" = [])),
    params(
        ("id" = i32, Path, description = "Order ID to update")
    ),
    request_body = UpdateOrderStatusReq,
    responses(
        (status = 200, description = "Updated order", body = OrderWithContextView),
        (status = 400, description = "Invalid status", body = ErrorRes),
        (status = 404, description = "Order not found", body = ErrorRes)
    )
)]
async fn update_order_status(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminIdentity>,
    path: Result<Path<i32>, PathRejection>,
    body: Result<Json<UpdateOrderStatusReq>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = path?;
    let Json(body) = order_body(&state, id, body).await?;

    let view = state
        .orders
        .update_status(id, &body.status, &admin.username)
        .await?;
    Ok(Json(view))
}

#[derive(Deserialize, ToSchema)]
pub struct UpdatePaymentStatusReq {
    /// One of `unpaid`, `paid`, `refunded`.
    pub payment_status: String,
}

/// Set the order payment status. This is a manual label, no payment is processed.
#[utoipa::path(
    put,
    path = "/admin/orders/{id}/payment",
    tags = ["Orders"],
    security(("bearerAuth" = [])),
    params(
        ("id" = i32, Path, description = "Order ID to update")
    ),
    request_body = UpdatePaymentStatusReq,
    responses(
        (status = 200, description = "Updated order", body = OrderWithContextView),
        (status = 400, description = "Invalid payment status", body = ErrorRes),
        (status = 404, description = "Order not found", body = ErrorRes)
    )
)]
async fn update_payment_status(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminIdentity>,
    path: Result<Path<i32>, PathRejection>,
    body: Result<Json<UpdatePaymentStatusReq>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = path?;
    let Json(body) = order_body(&state, id, body).await?;

    let view = state
        .orders
        .update_payment_status(id, &body.payment_status, &admin.username)
        .await?;
    Ok(Json(view))
}
