//! Products: request/response types, query filters, repository and service.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::ProductService;
