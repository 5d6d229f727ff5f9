//! Validation and storage for uploaded supporting documents.

use axum::body::Bytes;
use chrono::Utc;
use rand::Rng;
use std::path::Path;
use thiserror::Error;
use tokio::fs;

use crate::error::AppError;

/// Hard cap on a single uploaded document.
pub const MAX_DOCUMENT_BYTES: usize = 5 * 1024 * 1024;

/// Accepted file types. A candidate upload must match on both the file
/// extension and the declared content type.
const ALLOWED_FILE_TYPES: [&str; 4] = ["pdf", "jpg", "jpeg", "png"];

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("File too large. Maximum size is 5 MB")]
    TooLarge,
    #[error("Only PDF, JPG, JPEG, and PNG files are allowed")]
    UnsupportedType,
    #[error("could not store uploaded file")]
    Io(#[from] std::io::Error),
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Io(io_err) => AppError::InternalServerError(io_err.into()),
            rejected => AppError::FileRejected(rejected.to_string()),
        }
    }
}

/// An uploaded document as read from the multipart body.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

/// Validates the document and writes it under `upload_dir`.
///
/// Nothing touches the filesystem until every policy check has passed.
/// Returns the generated file name, which embeds a millisecond timestamp
/// and a random component so concurrent uploads cannot collide.
pub async fn store_document(
    upload_dir: &Path,
    document: &DocumentUpload,
) -> Result<String, UploadError> {
    validate_document(document)?;
    fs::create_dir_all(upload_dir).await?;
    let file_name = generate_file_name(&document.file_name);
    fs::write(upload_dir.join(&file_name), &document.data).await?;
    Ok(file_name)
}

fn validate_document(document: &DocumentUpload) -> Result<(), UploadError> {
    if document.data.len() > MAX_DOCUMENT_BYTES {
        return Err(UploadError::TooLarge);
    }

    let extension = Path::new(&document.file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default();
    let content_type = document.content_type.to_lowercase();

    let extension_ok = ALLOWED_FILE_TYPES.contains(&extension.as_str());
    let content_type_ok = ALLOWED_FILE_TYPES
        .iter()
        .any(|file_type| content_type.contains(file_type));

    if extension_ok && content_type_ok {
        Ok(())
    } else {
        Err(UploadError::UnsupportedType)
    }
}

/// `<millis>-<random><original extension>`. The original base name is
/// discarded so user input never reaches the filesystem.
fn generate_file_name(original: &str) -> String {
    let extension = Path::new(original)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default();
    let random: u32 = rand::thread_rng().gen();
    format!("{}-{}{}", Utc::now().timestamp_millis(), random, extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf_upload(name: &str, size: usize) -> DocumentUpload {
        DocumentUpload {
            file_name: name.to_string(),
            content_type: "application/pdf".to_string(),
            data: Bytes::from(vec![0u8; size]),
        }
    }

    #[tokio::test]
    async fn store_document_writes_and_names_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let upload = pdf_upload("statement.pdf", 128);
        let file_name = store_document(dir.path(), &upload).await.expect("store");
        assert!(file_name.ends_with(".pdf"));
        let written = std::fs::read(dir.path().join(&file_name)).expect("read back");
        assert_eq!(written.len(), 128);
    }

    #[tokio::test]
    async fn store_document_keeps_original_extension_case() {
        let dir = tempfile::tempdir().expect("tempdir");
        let upload = DocumentUpload {
            file_name: "scan.PDF".into(),
            content_type: "application/pdf".into(),
            data: Bytes::from_static(b"%PDF-1.4"),
        };
        let file_name = store_document(dir.path(), &upload).await.expect("store");
        assert!(file_name.ends_with(".PDF"));
    }

    #[tokio::test]
    async fn oversize_document_is_rejected_before_write() {
        let dir = tempfile::tempdir().expect("tempdir");
        let upload = pdf_upload("big.pdf", MAX_DOCUMENT_BYTES + 1);
        let result = store_document(dir.path(), &upload).await;
        assert!(matches!(result, Err(UploadError::TooLarge)));
        assert_eq!(std::fs::read_dir(dir.path()).expect("dir").count(), 0);
    }

    #[tokio::test]
    async fn executable_extension_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let upload = DocumentUpload {
            file_name: "payload.exe".into(),
            content_type: "application/pdf".into(),
            data: Bytes::from_static(b"MZ"),
        };
        let result = store_document(dir.path(), &upload).await;
        assert!(matches!(result, Err(UploadError::UnsupportedType)));
        assert_eq!(std::fs::read_dir(dir.path()).expect("dir").count(), 0);
    }

    #[tokio::test]
    async fn mismatched_content_type_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let upload = DocumentUpload {
            file_name: "notes.pdf".into(),
            content_type: "application/octet-stream".into(),
            data: Bytes::from_static(b"%PDF-1.4"),
        };
        let result = store_document(dir.path(), &upload).await;
        assert!(matches!(result, Err(UploadError::UnsupportedType)));
    }

    #[test]
    fn exact_size_limit_is_allowed() {
        let upload = pdf_upload("edge.pdf", MAX_DOCUMENT_BYTES);
        assert!(validate_document(&upload).is_ok());
    }

    #[test]
    fn uppercase_extension_is_allowed() {
        let upload = DocumentUpload {
            file_name: "SCAN.JPG".into(),
            content_type: "image/jpeg".into(),
            data: Bytes::from_static(b"\xff\xd8"),
        };
        assert!(validate_document(&upload).is_ok());
    }

    #[test]
    fn generated_names_do_not_collide() {
        let first = generate_file_name("a.pdf");
        let second = generate_file_name("a.pdf");
        assert_ne!(first, second);
    }
}
