//! Nice-looking error pages for errors returned from Fyyur handler functions.
//!
//! This is achieved by an actix-web middleware that replaces the body of the original HTTP
//! response in the case of an error. In contrast to rendering the error page in our
//! [actix_web::ResponseError] implementation, this allows us to access the HTTP Request, e.g. for
//! generating URLs to static files and other pages.
use crate::web::fyyur::base_template::BaseTemplateContext;
use actix_web::body::EitherBody;
use actix_web::http::header::{HeaderValue, CONTENT_TYPE};
use actix_web::{HttpRequest, ResponseError};
use askama::Template;

/// An actix-web middleware for generating nice error pages
///
/// The middleware replaces the body of the existing HTTP response (typically generated from the
/// error's ResponseError implementation, e.g. of [crate::web::fyyur::error::AppError]) with an
/// error page, when an error has been returned by the endpoint handler function. The status code
/// and the error itself are kept in the response, so outer middlewares can still log the error.
///
/// The error page extends the "base.html" template to keep the application's look & feel. In case
/// rendering the template fails, we fall back to a plain text representation of the error.
pub async fn error_page_middleware<B: actix_web::body::MessageBody>(
    req: actix_web::dev::ServiceRequest,
    next: actix_web::middleware::Next<B>,
) -> Result<actix_web::dev::ServiceResponse<EitherBody<B, String>>, actix_web::Error> {
    let response = next.call(req).await?;

    if response.response().error().is_some() {
        let (req, res) = response.into_parts();
        let error = res
            .error()
            .expect("We checked that res has an error, above.");
        let (body, content_type) = render_error_page(error.as_response_error(), &req);
        let mut res = res.set_body(body);
        res.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        Ok(actix_web::dev::ServiceResponse::new(
            req,
            res.map_body(|_, body| EitherBody::right(body)),
        ))
    } else {
        Ok(response.map_body(|_, body| EitherBody::left(body)))
    }
}

/// Render the error page for the given `error`, using its string representation and status code.
///
/// Returns the response body and its content type.
fn render_error_page(
    error: &dyn ResponseError,
    http_request: &HttpRequest,
) -> (String, &'static str) {
    let status = error.status_code();
    let tmpl = ErrorTemplate {
        base: BaseTemplateContext {
            request: http_request,
            page_title: status.canonical_reason().unwrap_or("Error"),
        },
        status_code: status.as_u16(),
        headline: headline_for_status(status.as_u16()),
        error,
        url: &http_request.full_url(),
        timestamp: chrono::Local::now(),
    };
    match tmpl.render() {
        Ok(body) => (body, "text/html; charset=utf-8"),
        Err(err) => (
            format!(
                "Error: {}\n(Could not render nice error page: {})",
                error, err
            ),
            "text/plain; charset=utf-8",
        ),
    }
}

fn headline_for_status(status_code: u16) -> &'static str {
    match status_code {
        404 => "The page you are looking for does not exist.",
        503 => "The service is temporarily unavailable. Please try again.",
        400..=499 => "The request could not be processed.",
        _ => "Something went wrong on our side.",
    }
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate<'a> {
    base: BaseTemplateContext<'a>,
    status_code: u16,
    headline: &'a str,
    error: &'a dyn ResponseError,
    url: &'a url::Url,
    timestamp: chrono::DateTime<chrono::Local>,
}
