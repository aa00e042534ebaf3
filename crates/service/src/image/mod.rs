//! Product images: upload payloads, repository and service.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::ImageService;
