//! Request repository trait for dependency injection and testing.
//!
//! This module defines the RequestRepository trait which can be mocked
//! using mockall for testing purposes.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::request::{NewRequest, Request, RequestStatus};

/// Column list for every query that maps rows into [`Request`].
const COLUMNS: &str = "id, name, email, employee_id, program, time_slot, request_date, \
     status, loan_type, amount, reason, document_path";

/// Repository trait for request operations.
///
/// This trait is designed to be mockable using mockall for testing.
/// Use `MockRequestRepositoryTrait` in tests to mock the behavior.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestRepositoryTrait: Send + Sync {
    /// Insert a new request and return the stored row.
    async fn insert(&self, db: &PgPool, item: &NewRequest) -> Result<Request, AppError>;

    /// All requests, most recent request date first.
    async fn find_all(&self, db: &PgPool) -> Result<Vec<Request>, AppError>;

    /// Requests submitted by one employee, most recent request date first.
    async fn find_by_employee(
        &self,
        db: &PgPool,
        employee_id: &str,
    ) -> Result<Vec<Request>, AppError>;

    /// A single request by id.
    async fn find_by_id(&self, db: &PgPool, id: i64) -> Result<Request, AppError>;

    /// The employee's existing non-rejected request for a program, if any.
    async fn find_active(
        &self,
        db: &PgPool,
        employee_id: &str,
        program: &str,
    ) -> Result<Option<Request>, AppError>;

    /// Set the status of a request and return the updated row.
    async fn update_status(
        &self,
        db: &PgPool,
        id: i64,
        status: RequestStatus,
    ) -> Result<Request, AppError>;
}

/// Concrete implementation of RequestRepositoryTrait.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestRepository;

impl RequestRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RequestRepositoryTrait for RequestRepository {
    async fn insert(&self, db: &PgPool, item: &NewRequest) -> Result<Request, AppError> {
        let query = format!(
            "INSERT INTO requests (name, email, employee_id, program, time_slot, request_date, \
             status, loan_type, amount, reason, document_path) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Request>(&query)
            .bind(&item.name)
            .bind(&item.email)
            .bind(&item.employee_id)
            .bind(&item.program)
            .bind(&item.time_slot)
            .bind(item.request_date)
            .bind(item.status.as_str())
            .bind(&item.loan_type)
            .bind(item.amount)
            .bind(&item.reason)
            .bind(&item.document_path)
            .fetch_one(db)
            .await?;
        Ok(row)
    }

    async fn find_all(&self, db: &PgPool) -> Result<Vec<Request>, AppError> {
        let query = format!("SELECT {COLUMNS} FROM requests ORDER BY request_date DESC");
        let rows = sqlx::query_as::<_, Request>(&query).fetch_all(db).await?;
        Ok(rows)
    }

    async fn find_by_employee(
        &self,
        db: &PgPool,
        employee_id: &str,
    ) -> Result<Vec<Request>, AppError> {
        let query = format!(
            "SELECT {COLUMNS} FROM requests WHERE employee_id = $1 ORDER BY request_date DESC"
        );
        let rows = sqlx::query_as::<_, Request>(&query)
            .bind(employee_id)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, db: &PgPool, id: i64) -> Result<Request, AppError> {
        let query = format!("SELECT {COLUMNS} FROM requests WHERE id = $1");
        let row = sqlx::query_as::<_, Request>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Request not found".into()))?;
        Ok(row)
    }

    async fn find_active(
        &self,
        db: &PgPool,
        employee_id: &str,
        program: &str,
    ) -> Result<Option<Request>, AppError> {
        let query = format!(
            "SELECT {COLUMNS} FROM requests \
             WHERE employee_id = $1 AND program = $2 AND status <> 'Rejected' LIMIT 1"
        );
        let row = sqlx::query_as::<_, Request>(&query)
            .bind(employee_id)
            .bind(program)
            .fetch_optional(db)
            .await?;
        Ok(row)
    }

    async fn update_status(
        &self,
        db: &PgPool,
        id: i64,
        status: RequestStatus,
    ) -> Result<Request, AppError> {
        let query = format!("UPDATE requests SET status = $1 WHERE id = $2 RETURNING {COLUMNS}");
        let row = sqlx::query_as::<_, Request>(&query)
            .bind(status.as_str())
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Request not found".into()))?;
        Ok(row)
    }
}
