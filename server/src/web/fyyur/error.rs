use crate::data_store::StoreError;
use actix_web::error::UrlGenerationError;
use actix_web::http::StatusCode;
use actix_web::ResponseError;
use std::fmt::{Display, Formatter};

/// Semantic error type for Fyyur endpoint functions
///
/// The error pages are generated using the
/// [crate::web::fyyur::error_page::error_page_middleware] middleware, because actix-web's
/// ResponseError trait is quite restricted in what it can do.
#[derive(Debug)]
pub enum AppError {
    PageNotFound,
    EntityNotFound,
    TransactionConflict,
    DatabaseConnectionError(String),
    InternalError(String),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::ConnectionError(error) => Self::DatabaseConnectionError(error),
            StoreError::QueryError(diesel_error) => {
                Self::InternalError(format!("Database query failed: {}", diesel_error))
            }
            StoreError::TransactionConflict => Self::TransactionConflict,
            StoreError::NotExisting => Self::EntityNotFound,
            StoreError::ConflictEntityExists => {
                Self::InternalError("Conflicting entity exists".to_owned())
            }
            StoreError::InvalidInputData(e) => Self::InternalError(format!("Invalid data: {}", e)),
            StoreError::InvalidDataInDatabase(e) => Self::InternalError(format!(
                "Data queried from database could not be deserialized: {}",
                e
            )),
        }
    }
}

impl From<actix_web::error::BlockingError> for AppError {
    fn from(_e: actix_web::error::BlockingError) -> Self {
        AppError::InternalError(
            "Could not get thread from thread pool for synchronous database operation.".to_owned(),
        )
    }
}

impl From<askama::Error> for AppError {
    fn from(value: askama::Error) -> Self {
        AppError::InternalError(format!("Error while rendering template: {}", value))
    }
}

impl From<UrlGenerationError> for AppError {
    fn from(value: UrlGenerationError) -> Self {
        AppError::InternalError(format!("Could not generate URL: {}", value))
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::PageNotFound => write!(f, "Not found"),
            AppError::EntityNotFound => write!(f, "Entity not found"),
            AppError::TransactionConflict => {
                write!(f, "Concurrent database transaction conflict. Please retry.")
            }
            AppError::DatabaseConnectionError(e) => {
                write!(f, "Could not connect to database: {}", e)
            }
            AppError::InternalError(e) => write!(f, "Internal program error: {}", e),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::PageNotFound | AppError::EntityNotFound => StatusCode::NOT_FOUND,
            AppError::TransactionConflict => StatusCode::SERVICE_UNAVAILABLE,
            AppError::DatabaseConnectionError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
