use anyhow::Context;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};
use std::path::Path;

use crate::{error::AppError, state::AppState};

/// Employee-facing submission page.
pub async fn index_page(State(state): State<AppState>) -> Result<Response, AppError> {
    serve_page(&state.config.public_dir, "index.html").await
}

/// HR review page.
pub async fn hr_page(State(state): State<AppState>) -> Result<Response, AppError> {
    serve_page(&state.config.public_dir, "hr.html").await
}

async fn serve_page(public_dir: &Path, file: &str) -> Result<Response, AppError> {
    let html = tokio::fs::read_to_string(public_dir.join(file))
        .await
        .with_context(|| format!("could not read page {file}"))
        .map_err(AppError::InternalServerError)?;
    Ok(Html(html).into_response())
}
