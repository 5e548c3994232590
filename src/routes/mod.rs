pub mod admin;
pub mod users;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa_axum::router::OpenApiRouter;

use crate::{app_state::AppState, swagger};

pub fn routes_with_openapi(state: &AppState) -> OpenApiRouter<AppState> {
    admin::routes_with_openapi(state).merge(users::routes_with_openapi())
}

/// The complete HTTP application: API routes, Swagger UI and request tracing.
pub fn build_app(state: AppState) -> Router {
    let routes = routes_with_openapi(&state);

    let mut openapi = routes.get_openapi().clone();
    openapi.info = utoipa::openapi::InfoBuilder::new()
        .title("Restaurant OrderService API")
        .version(env!("CARGO_PKG_VERSION"))
        .build();
    let swagger_ui = swagger::create_swagger_ui(openapi);

    Router::new()
        .merge(routes)
        .merge(swagger_ui)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
