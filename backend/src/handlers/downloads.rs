use axum::{
    extract::{Path as UrlPath, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use std::io;
use std::path::Path;

use crate::{error::AppError, state::AppState, validation::rules::is_safe_download_filename};

/// Serves a stored document as an attachment download.
pub async fn download_document(
    State(state): State<AppState>,
    UrlPath(filename): UrlPath<String>,
) -> Result<Response, AppError> {
    if !is_safe_download_filename(&filename) {
        return Err(AppError::BadRequest("Invalid filename".to_string()));
    }

    // Vetted above, but only ever serve a bare file name.
    let base_name = Path::new(&filename)
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| AppError::BadRequest("Invalid filename".to_string()))?
        .to_string();

    let path = state.config.upload_dir.join(&base_name);
    let data = tokio::fs::read(&path)
        .await
        .map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => AppError::NotFound("File not found".to_string()),
            _ => AppError::InternalServerError(err.into()),
        })?;

    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{base_name}\""))
        .map_err(|err| AppError::InternalServerError(err.into()))?;
    let headers = [
        (
            header::CONTENT_TYPE,
            HeaderValue::from_static(content_type_for(&base_name)),
        ),
        (header::CONTENT_DISPOSITION, disposition),
    ];

    Ok((headers, data).into_response())
}

fn content_type_for(filename: &str) -> &'static str {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "pdf" => "application/pdf",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_covers_accepted_extensions() {
        assert_eq!(content_type_for("a.pdf"), "application/pdf");
        assert_eq!(content_type_for("a.jpg"), "image/jpeg");
        assert_eq!(content_type_for("a.JPEG"), "image/jpeg");
        assert_eq!(content_type_for("a.png"), "image/png");
    }

    #[test]
    fn content_type_defaults_to_octet_stream() {
        assert_eq!(content_type_for("a.bin"), "application/octet-stream");
        assert_eq!(content_type_for("noextension"), "application/octet-stream");
    }
}
