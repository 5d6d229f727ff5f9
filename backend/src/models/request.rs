use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A benefit or program request as stored in the `requests` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Request {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub employee_id: String,
    pub program: String,
    pub time_slot: Option<String>,
    pub request_date: NaiveDate,
    pub status: RequestStatus,
    pub loan_type: Option<String>,
    pub amount: Option<f64>,
    pub reason: Option<String>,
    pub document_path: Option<String>,
}

/// Workflow status of a request. The capitalized spellings are the wire
/// format and the stored database values, so no serde or sqlx renaming
/// is applied.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema, Default,
)]
#[sqlx(type_name = "TEXT")]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Approved => "Approved",
            RequestStatus::Rejected => "Rejected",
        }
    }

    /// Parses the exact capitalized form used by the API and the database.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Pending" => Some(RequestStatus::Pending),
            "Approved" => Some(RequestStatus::Approved),
            "Rejected" => Some(RequestStatus::Rejected),
            _ => None,
        }
    }
}

/// Form fields accepted by the create endpoint, collected from the
/// multipart body. Optional fields arrive as empty strings when the
/// submitter leaves them blank and are normalized to `None` before
/// this struct is built.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct CreateRequest {
    #[validate(length(min = 1, code = "required"))]
    pub name: String,
    #[validate(length(min = 1, code = "required"))]
    pub email: String,
    #[validate(length(min = 1, code = "required"))]
    pub employee_id: String,
    #[validate(length(min = 1, code = "required"))]
    pub program: String,
    pub time_slot: Option<String>,
    /// Requested date in `YYYY-MM-DD` form.
    #[validate(length(min = 1, code = "required"))]
    pub date: String,
    pub reason: Option<String>,
    pub loan_type: Option<String>,
    pub amount: Option<String>,
}

/// A validated request ready for insertion. The status is always
/// `Pending` for submissions coming through the public endpoint.
#[derive(Debug, Clone)]
pub struct NewRequest {
    pub name: String,
    pub email: String,
    pub employee_id: String,
    pub program: String,
    pub time_slot: Option<String>,
    pub request_date: NaiveDate,
    pub status: RequestStatus,
    pub loan_type: Option<String>,
    pub amount: Option<f64>,
    pub reason: Option<String>,
    pub document_path: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_exact_spelling() {
        for status in [
            RequestStatus::Pending,
            RequestStatus::Approved,
            RequestStatus::Rejected,
        ] {
            assert_eq!(RequestStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn status_parse_rejects_other_spellings() {
        assert_eq!(RequestStatus::parse("pending"), None);
        assert_eq!(RequestStatus::parse("APPROVED"), None);
        assert_eq!(RequestStatus::parse("Cancelled"), None);
        assert_eq!(RequestStatus::parse(""), None);
    }

    #[test]
    fn status_serializes_capitalized() {
        let json = serde_json::to_string(&RequestStatus::Pending).unwrap();
        assert_eq!(json, "\"Pending\"");
    }
}
