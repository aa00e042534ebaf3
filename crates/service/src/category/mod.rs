//! Categories: domain types, repository and service.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::CategoryService;
