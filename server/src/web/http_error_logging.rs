use crate::web::fyyur::error::AppError;
use crate::web::trivia::TriviaApiError;
use log::{error, warn};

/// Log every error response of the web applications, using the error level according to the
/// error's cause.
pub async fn error_logging_middleware<B: actix_web::body::MessageBody>(
    req: actix_web::dev::ServiceRequest,
    next: actix_web::middleware::Next<B>,
) -> Result<actix_web::dev::ServiceResponse<B>, actix_web::Error> {
    let response = next.call(req).await?;

    if let Some(error) = response.response().error() {
        if let Some(app_error) = error.as_error::<AppError>() {
            match app_error {
                AppError::PageNotFound | AppError::EntityNotFound => {
                    warn!(
                        "HTTP {} not found at <{}>",
                        response.response().status(),
                        response.request().uri()
                    );
                }
                AppError::TransactionConflict => {}
                AppError::DatabaseConnectionError(e) => {
                    error!(
                        "HTTP {} database connection error: {}",
                        response.response().status(),
                        e
                    );
                }
                AppError::InternalError(e) => {
                    error!(
                        "HTTP {} internal server error at <{}>: {}",
                        response.response().status(),
                        response.request().uri(),
                        e
                    );
                }
            }
        } else if let Some(api_error) = error.as_error::<TriviaApiError>() {
            match api_error {
                TriviaApiError::InternalError(e) => {
                    error!(
                        "HTTP {} internal server error at <{}>: {}",
                        response.response().status(),
                        response.request().uri(),
                        e
                    );
                }
                TriviaApiError::InvalidJson(_)
                | TriviaApiError::InvalidQuery(_)
                | TriviaApiError::MissingField(_)
                | TriviaApiError::Unprocessable(_) => {
                    warn!(
                        "HTTP {} invalid request at <{}>: {}",
                        response.response().status(),
                        response.request().uri(),
                        api_error
                    );
                }
                TriviaApiError::NotFound | TriviaApiError::MethodNotAllowed => {}
            }
        } else {
            error!(
                "HTTP {} unexpected error at <{}>: {:?}",
                response.response().status(),
                response.request().uri(),
                error
            );
        }
    }
    Ok(response)
}
