pub mod request;
pub mod request_repository;

pub use request::{RequestRepository, RequestRepositoryTrait};
