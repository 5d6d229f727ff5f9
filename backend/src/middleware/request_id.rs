use axum::{
    extract::Request,
    http::{header::HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request-scoped identifier, available to downstream middleware and
/// handlers via request extensions.
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

/// Tags every request with an id and echoes it on the response.
/// A non-empty `x-request-id` supplied by the caller wins, so ids stay
/// stable across proxies; anything else gets a fresh UUID.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = caller_supplied_id(&req).unwrap_or_else(|| Uuid::new_v4().to_string());

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut response = next.run(req).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }
    response
}

fn caller_supplied_id(req: &Request) -> Option<String> {
    let value = req.headers().get(REQUEST_ID_HEADER)?.to_str().ok()?;
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
