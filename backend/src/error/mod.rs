//! Application error type and its JSON wire format.
//!
//! Every handler returns `Result<_, AppError>`. The conversions at the
//! bottom let `?` lift database, validation, and ad-hoc failures into
//! the same response shape.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

/// Body of every non-2xx response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Forbidden(String),
    /// A repeat submission for a one-time program. Carries the code
    /// `DUPLICATE_REQUEST` on a 400 rather than a 409.
    Conflict(String),
    BadRequest(String),
    /// Upload refused by the document policy checks.
    FileRejected(String),
    /// Field-level failures, rendered as `details.errors`.
    Validation(Vec<String>),
    InternalServerError(anyhow::Error),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Conflict(_)
            | AppError::BadRequest(_)
            | AppError::FileRejected(_)
            | AppError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::Conflict(_) => "DUPLICATE_REQUEST",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::FileRejected(_) => "FILE_REJECTED",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code().to_string();

        let (error, details) = match self {
            AppError::Validation(errors) => (
                "Validation failed".to_string(),
                Some(serde_json::json!({ "errors": errors })),
            ),
            AppError::InternalServerError(err) => {
                tracing::error!("Internal server error: {:?}", err);
                ("Internal server error".to_string(), None)
            }
            AppError::NotFound(msg)
            | AppError::Forbidden(msg)
            | AppError::Conflict(msg)
            | AppError::BadRequest(msg)
            | AppError::FileRejected(msg) => (msg, None),
        };

        let body = ErrorResponse {
            error,
            code,
            details,
        };
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalServerError(err)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if matches!(err, sqlx::Error::RowNotFound) {
            AppError::NotFound("Resource not found".to_string())
        } else {
            AppError::InternalServerError(err.into())
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages = Vec::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                messages.push(format!("{field}: {}", error.code));
            }
        }
        messages.sort();
        AppError::Validation(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn client_errors_carry_their_code_and_message() {
        let cases = [
            (
                AppError::NotFound("missing".into()),
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
            ),
            (
                AppError::Forbidden("denied".into()),
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
            ),
            (
                AppError::BadRequest("bad".into()),
                StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
            ),
            (
                AppError::FileRejected("bad file".into()),
                StatusCode::BAD_REQUEST,
                "FILE_REJECTED",
            ),
        ];

        for (error, status, code) in cases {
            let message = match &error {
                AppError::NotFound(m)
                | AppError::Forbidden(m)
                | AppError::BadRequest(m)
                | AppError::FileRejected(m) => m.clone(),
                _ => unreachable!(),
            };
            let response = error.into_response();
            assert_eq!(response.status(), status);
            let json = body_json(response).await;
            assert_eq!(json["error"], message);
            assert_eq!(json["code"], code);
            assert!(json["details"].is_null());
        }
    }

    #[tokio::test]
    async fn duplicate_request_is_a_bad_request() {
        let response = AppError::Conflict("already requested".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "already requested");
        assert_eq!(json["code"], "DUPLICATE_REQUEST");
    }

    #[tokio::test]
    async fn validation_details_list_field_errors() {
        let response =
            AppError::Validation(vec!["email: required".into(), "name: length".into()])
                .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Validation failed");
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["details"]["errors"][0], "email: required");
        assert_eq!(json["details"]["errors"][1], "name: length");
    }

    #[tokio::test]
    async fn internal_error_hides_the_cause() {
        let response =
            AppError::InternalServerError(anyhow::anyhow!("db exploded")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Internal server error");
        assert_eq!(json["code"], "INTERNAL_SERVER_ERROR");
        assert!(json["details"].is_null());
    }

    #[test]
    fn row_not_found_becomes_not_found() {
        let error = AppError::from(sqlx::Error::RowNotFound);
        assert!(matches!(error, AppError::NotFound(_)));
    }

    #[test]
    fn other_database_errors_become_internal() {
        let error = AppError::from(sqlx::Error::PoolClosed);
        assert!(matches!(error, AppError::InternalServerError(_)));
    }
}
