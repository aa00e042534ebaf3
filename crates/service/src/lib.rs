//! Service layer providing catalog operations on top of models.
//! - Separates business logic from data access (repository traits + SeaORM implementations).
//! - Reuses validation, entity definitions and query helpers from the `models` crate.
//! - Maps entities to transfer objects and turns missing rows into `NotFound`.

pub mod errors;
pub mod category;
pub mod product;
pub mod image;
pub mod mapper;
#[cfg(test)]
pub mod test_support;
