//! Benefit request service: employees submit program and benefit
//! requests (optionally with a supporting document), HR reviews and
//! updates their status.

use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    handler::HandlerWithoutStateExt,
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod db;
pub mod docs;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod state;
pub mod utils;
pub mod validation;

use config::Config;
use error::AppError;
use state::AppState;
use utils::uploads::MAX_DOCUMENT_BYTES;

/// Transport-level body cap. Sits above the per-file limit so an
/// oversized document still reaches the handler and gets the
/// structured rejection instead of a bare 413.
const MAX_REQUEST_BODY_BYTES: usize = 2 * MAX_DOCUMENT_BYTES;

/// Stored documents never change after upload.
const UPLOADS_CACHE_CONTROL: &str = "public, max-age=604800";

/// Static assets only change on deploy.
const STATIC_CACHE_CONTROL: &str = "public, max-age=86400";

/// Builds the full application router on top of shared state.
///
/// Fails only on unusable configuration (an allowed origin that is not
/// a valid header value).
pub fn app(state: AppState) -> anyhow::Result<Router> {
    let cors = cors_layer(&state.config)?;

    let uploads = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_static(UPLOADS_CACHE_CONTROL),
        ))
        .service(
            ServeDir::new(&state.config.upload_dir)
                .call_fallback_on_method_not_allowed(true)
                .not_found_service(route_not_found.into_service()),
        );

    let static_pages = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_static(STATIC_CACHE_CONTROL),
        ))
        .service(
            ServeDir::new(&state.config.public_dir)
                .call_fallback_on_method_not_allowed(true)
                .not_found_service(route_not_found.into_service()),
        );

    // Compose routes, documentation UI, file services and shared
    // layers. Later `.layer` calls run earlier on the way in, so the
    // request id middleware is added last and wraps everything the
    // logging middleware needs.
    let app = Router::new()
        .route("/", get(handlers::pages::index_page))
        .route("/hr", get(handlers::pages::hr_page))
        .route(
            "/api/requests",
            post(handlers::requests::create_request).get(handlers::requests::list_requests),
        )
        .route(
            "/api/requests/emp/{emp_id}",
            get(handlers::requests::list_requests_by_employee),
        )
        .route(
            "/api/requests/{id}",
            get(handlers::requests::get_request).put(handlers::requests::update_request_status),
        )
        .route(
            "/download/{filename}",
            get(handlers::downloads::download_document),
        )
        .merge(SwaggerUi::new("/api/docs").url("/api-doc/openapi.json", docs::ApiDoc::openapi()))
        .nest_service("/Uploads", uploads)
        .fallback_service(static_pages)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES)),
        )
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::enforce_origin,
        ))
        .layer(axum_middleware::from_fn(middleware::log_error_responses))
        .layer(axum_middleware::from_fn(middleware::request_id))
        .with_state(state);

    Ok(app)
}

fn cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    // A literal `*` entry disables the allowlist entirely.
    let origin = if config.allowed_origins.iter().any(|origin| origin == "*") {
        AllowOrigin::any()
    } else {
        let mut origins = Vec::with_capacity(config.allowed_origins.len());
        for origin in &config.allowed_origins {
            origins.push(
                HeaderValue::from_str(origin)
                    .map_err(|_| anyhow::anyhow!("Invalid allowed origin: {origin}"))?,
            );
        }
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(Duration::from_secs(24 * 60 * 60)))
}

/// JSON 404 for anything the router and the file services miss. The
/// file services stamp a cache header on whatever they return, so the
/// miss response pins its own.
async fn route_not_found() -> impl IntoResponse {
    let mut response = AppError::NotFound("Route not found".to_string()).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}
