use models::errors::ModelError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(entity.to_string()) }
}

impl From<DbErr> for ServiceError {
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => ServiceError::Conflict(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => ServiceError::Conflict(msg),
            _ => ServiceError::Db(e.to_string()),
        }
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => ServiceError::Validation(msg),
            ModelError::Db(db) => db.into(),
        }
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(e: std::io::Error) -> Self { ServiceError::Io(e.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_validation_stays_validation() {
        let e: ServiceError = ModelError::Validation("bad".into()).into();
        assert!(matches!(e, ServiceError::Validation(ref m) if m == "bad"));
    }

    #[test]
    fn plain_db_errors_are_generic() {
        let e: ServiceError = DbErr::Custom("boom".into()).into();
        assert!(matches!(e, ServiceError::Db(_)));
    }

    #[test]
    fn io_errors_are_io() {
        let e: ServiceError = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "short read").into();
        assert!(matches!(e, ServiceError::Io(_)));
    }

    #[test]
    fn not_found_message() {
        assert_eq!(ServiceError::not_found("product").to_string(), "product not found");
    }
}
