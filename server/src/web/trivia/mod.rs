//! The Trivia JSON API
//!
//! All endpoints answer with JSON bodies, including all error responses, which are generated from
//! the [TriviaApiError] type. Every response carries permissive CORS headers, so that the API can
//! be used from a web frontend, served from a different origin.

use crate::data_store::{StoreError, TriviaStore};
use actix_web::http::header::ContentType;
use actix_web::http::{Method, StatusCode};
use actix_web::{error::ResponseError, middleware, web, HttpRequest, HttpResponse};
use log::debug;
use serde::Deserialize;
use std::fmt::Display;
use std::sync::Arc;

mod endpoints_category;
mod endpoints_question;
mod endpoints_quiz;
#[cfg(test)]
mod tests;

/// Number of questions per page in all paginated question lists
pub const QUESTIONS_PER_PAGE: usize = 10;

#[derive(Clone)]
pub struct TriviaState {
    pub store: Arc<dyn TriviaStore>,
}

pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.service(
        get_api_service().wrap(
            middleware::DefaultHeaders::new()
                .add(("Access-Control-Allow-Origin", "*"))
                .add(("Access-Control-Allow-Headers", "Content-Type, Authorization"))
                .add((
                    "Access-Control-Allow-Methods",
                    "GET, POST, PATCH, DELETE, OPTIONS",
                )),
        ),
    );
}

fn get_api_service() -> actix_web::Scope {
    let json_config = web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(|err, _req| TriviaApiError::InvalidJson(err.to_string()).into());
    let query_config = web::QueryConfig::default()
        .error_handler(|err, _req| TriviaApiError::InvalidQuery(err.to_string()).into());
    let path_config =
        web::PathConfig::default().error_handler(|_err, _req| TriviaApiError::NotFound.into());
    web::scope("")
        .app_data(json_config)
        .app_data(query_config)
        .app_data(path_config)
        .service(
            web::resource("/categories")
                .route(web::get().to(endpoints_category::list_categories))
                .default_service(web::to(method_not_allowed_handler)),
        )
        .service(
            web::resource("/categories/{category_id}/questions")
                .route(web::get().to(endpoints_category::list_questions_of_category))
                .default_service(web::to(method_not_allowed_handler)),
        )
        .service(
            web::resource("/questions")
                .route(web::get().to(endpoints_question::list_questions))
                .route(web::post().to(endpoints_question::create_question))
                .default_service(web::to(method_not_allowed_handler)),
        )
        .service(
            web::resource("/questions/search")
                .route(web::post().to(endpoints_question::search_questions))
                .default_service(web::to(method_not_allowed_handler)),
        )
        .service(
            web::resource("/questions/{question_id}")
                .route(web::delete().to(endpoints_question::delete_question))
                .default_service(web::to(method_not_allowed_handler)),
        )
        .service(
            web::resource("/quizzes")
                .route(web::post().to(endpoints_quiz::next_quiz_question))
                .default_service(web::to(method_not_allowed_handler)),
        )
        .default_service(web::to(not_found_handler))
}

/// Fallback for requests to a known path with an unsupported method. CORS preflight requests are
/// answered here, too.
async fn method_not_allowed_handler(req: HttpRequest) -> Result<HttpResponse, TriviaApiError> {
    if req.method() == Method::OPTIONS {
        return Ok(HttpResponse::NoContent().finish());
    }
    Err(TriviaApiError::MethodNotAllowed)
}

async fn not_found_handler(req: HttpRequest) -> Result<HttpResponse, TriviaApiError> {
    if req.method() == Method::OPTIONS {
        return Ok(HttpResponse::NoContent().finish());
    }
    Err(TriviaApiError::NotFound)
}

/// The `?page=N` query parameter of paginated question lists. Pages are counted from 1.
#[derive(Deserialize, Debug)]
pub struct PageQuery {
    page: Option<usize>,
}

impl PageQuery {
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1)
    }
}

/// Get the items of the given 1-based page. Pages beyond the end of the list and page 0 are empty.
pub fn paginate<T>(items: Vec<T>, page: usize) -> Vec<T> {
    if page == 0 {
        return Vec::new();
    }
    items
        .into_iter()
        .skip((page - 1).saturating_mul(QUESTIONS_PER_PAGE))
        .take(QUESTIONS_PER_PAGE)
        .collect()
}

#[derive(Debug)]
pub enum TriviaApiError {
    /// The request body is not valid JSON or does not have the expected structure
    InvalidJson(String),
    /// The query string could not be parsed
    InvalidQuery(String),
    /// A required field of the request body is missing or null
    MissingField(&'static str),
    NotFound,
    MethodNotAllowed,
    /// The request is well-formed, but its content can not be processed
    Unprocessable(String),
    InternalError(String),
}

impl TriviaApiError {
    /// The fixed, client-visible message for each error status
    fn message(&self) -> &'static str {
        match self.status_code() {
            StatusCode::BAD_REQUEST => "Bad request error",
            StatusCode::NOT_FOUND => "Resource not found",
            StatusCode::METHOD_NOT_ALLOWED => "Method not allowed",
            StatusCode::UNPROCESSABLE_ENTITY => "Unprocessable entity",
            _ => "An error has occured, please try again",
        }
    }
}

impl Display for TriviaApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidJson(e) => write!(f, "Invalid JSON request data: {}", e),
            Self::InvalidQuery(e) => write!(f, "Invalid query string: {}", e),
            Self::MissingField(field) => write!(f, "Required field '{}' is missing", field),
            Self::NotFound => f.write_str("Resource not found"),
            Self::MethodNotAllowed => f.write_str("Method not allowed"),
            Self::Unprocessable(e) => write!(f, "Unprocessable request: {}", e),
            Self::InternalError(e) => write!(f, "Internal error: {}", e),
        }
    }
}

impl ResponseError for TriviaApiError {
    fn error_response(&self) -> HttpResponse {
        debug!("Responding with error: {}", self);
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(trivia_api_types::ErrorResponse {
                success: false,
                error: self.status_code().as_u16(),
                message: self.message().to_owned(),
            })
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidJson(_) | Self::InvalidQuery(_) | Self::MissingField(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for TriviaApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::ConnectionError(error) => {
                Self::InternalError(format!("Could not connect to database: {}", error))
            }
            StoreError::QueryError(diesel_error) => Self::InternalError(format!(
                "Error while executing database query: {}",
                diesel_error
            )),
            StoreError::TransactionConflict => {
                Self::InternalError("Concurrent database transaction conflict".to_owned())
            }
            StoreError::NotExisting => Self::NotFound,
            StoreError::ConflictEntityExists => {
                Self::Unprocessable("Element already exists".to_owned())
            }
            StoreError::InvalidInputData(e) => Self::Unprocessable(e),
            StoreError::InvalidDataInDatabase(e) => Self::InternalError(format!(
                "Data queried from database could not be deserialized: {}",
                e
            )),
        }
    }
}

impl From<actix_web::error::BlockingError> for TriviaApiError {
    fn from(_e: actix_web::error::BlockingError) -> Self {
        TriviaApiError::InternalError(
            "Could not get thread from thread pool for synchronous database operation.".to_owned(),
        )
    }
}
