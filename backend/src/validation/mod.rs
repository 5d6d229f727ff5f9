//! Input validation shared across API endpoints.

pub mod rules;

pub use validator::Validate;
