pub mod auth;
pub mod menu;
pub mod orders;

use utoipa_axum::router::OpenApiRouter;

use crate::{app_state::AppState, middleware};

/// `/admin/login` is public; every other admin route requires a bearer token.
pub fn routes_with_openapi(state: &AppState) -> OpenApiRouter<AppState> {
    let protected = menu::routes_with_openapi()
        .merge(orders::routes_with_openapi())
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::admin_authorization,
        ));

    auth::routes_with_openapi().merge(protected)
}
