#![allow(dead_code)] // OpenAPI doc stubs are only referenced by utoipa macros.

use crate::{
    error::ErrorResponse,
    models::request::{CreateRequest, Request, RequestStatus, UpdateStatusRequest},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        create_request_doc,
        list_requests_doc,
        list_requests_by_employee_doc,
        get_request_doc,
        update_request_status_doc,
        download_document_doc
    ),
    components(
        schemas(
            Request,
            RequestStatus,
            CreateRequest,
            UpdateStatusRequest,
            ErrorResponse
        )
    ),
    tags(
        (name = "Requests", description = "Submit and review benefit and program requests"),
        (name = "Documents", description = "Supporting document downloads")
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    post,
    path = "/api/requests",
    request_body(
        content = CreateRequest,
        content_type = "multipart/form-data",
        description = "Form fields plus an optional `document` file part (PDF/JPG/JPEG/PNG, max 5 MB)"
    ),
    responses(
        (status = 201, description = "Request recorded", body = Request),
        (status = 400, description = "Validation failure, rejected file, or duplicate one-time program request", body = ErrorResponse)
    ),
    tag = "Requests"
)]
fn create_request_doc() {}

#[utoipa::path(
    get,
    path = "/api/requests",
    responses((status = 200, description = "All requests, most recent request date first", body = [Request])),
    tag = "Requests"
)]
fn list_requests_doc() {}

#[utoipa::path(
    get,
    path = "/api/requests/emp/{emp_id}",
    params(("emp_id" = String, Path, description = "Employee identifier")),
    responses((status = 200, description = "Requests for one employee, most recent request date first", body = [Request])),
    tag = "Requests"
)]
fn list_requests_by_employee_doc() {}

#[utoipa::path(
    get,
    path = "/api/requests/{id}",
    params(("id" = i64, Path, description = "Request id")),
    responses(
        (status = 200, body = Request),
        (status = 404, description = "No request with this id", body = ErrorResponse)
    ),
    tag = "Requests"
)]
fn get_request_doc() {}

#[utoipa::path(
    put,
    path = "/api/requests/{id}",
    params(("id" = i64, Path, description = "Request id")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Updated request", body = Request),
        (status = 400, description = "Invalid status value", body = ErrorResponse),
        (status = 404, description = "No request with this id", body = ErrorResponse)
    ),
    tag = "Requests"
)]
fn update_request_status_doc() {}

#[utoipa::path(
    get,
    path = "/download/{filename}",
    params(("filename" = String, Path, description = "Stored file name as recorded in document_path")),
    responses(
        (status = 200, description = "File contents as an attachment"),
        (status = 400, description = "Unsafe file name", body = ErrorResponse),
        (status = 404, description = "No stored file with this name", body = ErrorResponse)
    ),
    tag = "Documents"
)]
fn download_document_doc() {}
