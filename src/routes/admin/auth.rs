use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;

use crate::app_error::{AppError, ErrorRes};
use crate::app_state::AppState;

pub fn routes_with_openapi() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(utoipa_axum::routes!(login))
}

#[derive(Deserialize, ToSchema)]
pub struct LoginReq {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginRes {
    pub message: String,
    pub token: String,
}

/// Exchange admin credentials for a bearer token valid for 24 hours.
#[utoipa::path(
    post,
    path = "/admin/login",
    tags = ["Admin"],
    request_body = LoginReq,
    responses(
        (status = 200, description = "Login successful", body = LoginRes),
        (status = 401, description = "Invalid username or password", body = ErrorRes)
    )
)]
async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginReq>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    let token = state.admins.login(&body.username, &body.password).await?;

    Ok(Json(LoginRes {
        message: "Login successful".into(),
        token,
    }))
}
