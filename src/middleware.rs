use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::{app_error::AppError, app_state::AppState};

/// Identity of the admin whose token passed the gate. Available to
/// protected handlers as `Extension<AdminIdentity>`.
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    pub username: String,
}

/// Extracts the token from `Bearer <token>`. Anything other than exactly
/// two space-separated parts with the `Bearer` scheme is rejected.
fn bearer_token(header: &str) -> Option<&str> {
    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None)
            if scheme.eq_ignore_ascii_case("Bearer") && !token.is_empty() =>
        {
            Some(token)
        }
        _ => None,
    }
}

/// Rejects requests without a valid admin token.
pub async fn admin_authorization(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("Authorization header is required".into()))?;

    let token = header
        .to_str()
        .ok()
        .and_then(bearer_token)
        .ok_or_else(|| AppError::Unauthorized("Invalid token format".into()))?;

    let username = state.credentials.verify_token(token).map_err(|e| {
        warn!("Rejected admin token on {}: {}", req.uri().path(), e);
        AppError::from(e)
    })?;

    req.extensions_mut().insert(AdminIdentity { username });
    Ok(next.run(req).await)
}
