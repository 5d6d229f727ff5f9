use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::{error::AppError, state::AppState};

/// Rejects cross-origin browser requests from origins outside the
/// configured allow list. Requests without an `Origin` header (curl,
/// same-origin navigations, server-to-server calls) pass through.
pub async fn enforce_origin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(origin) = req
        .headers()
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok())
    {
        if !origin_allowed(&state.config.allowed_origins, origin) {
            return Err(AppError::Forbidden("Origin not allowed".into()));
        }
    }

    Ok(next.run(req).await)
}

fn origin_allowed(allowed: &[String], origin: &str) -> bool {
    allowed
        .iter()
        .any(|candidate| candidate == "*" || candidate == origin.trim_end_matches('/'))
}
