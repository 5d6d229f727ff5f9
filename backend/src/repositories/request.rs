//! Benefit request repository.
//!
//! Provides CRUD operations for benefit and program requests.
//! This module re-exports the trait-based implementation from request_repository.

pub use crate::repositories::request_repository::{RequestRepository, RequestRepositoryTrait};

// MockRequestRepositoryTrait is only available in test builds via #[cfg(test)]
#[cfg(test)]
pub use crate::repositories::request_repository::MockRequestRepositoryTrait;
