use crate::data_store::models::FullShow;
use crate::data_store::StoreError;
use crate::web::fyyur::error::AppError;
use crate::web::fyyur::flash::{FlashMessage, FlashesInterface};
use actix_web::web::Redirect;
use actix_web::{Either, HttpRequest, HttpResponse};
use askama::Template;
use chrono::{DateTime, Utc};
use log::warn;
use std::collections::HashMap;
use std::hash::Hash;

/// Helper type for representing the different possible outcomes of submitting a create or edit
/// form.
///
/// They are used to delegate creating appropriate response to [create_form_response()].
pub enum FormSubmitResult {
    Success,
    ValidationError,
    StoreFailure(StoreError),
}

impl From<Result<(), StoreError>> for FormSubmitResult {
    fn from(value: Result<(), StoreError>) -> Self {
        match value {
            Ok(()) => FormSubmitResult::Success,
            Err(e) => FormSubmitResult::StoreFailure(e),
        }
    }
}

/// User-visible flash messages for the outcomes of a form submission
pub struct FormMessages {
    pub success: String,
    pub failure: String,
}

/// Generate the HTTP response for a submitted create or edit form.
///
/// A successful submission and a failure of the store are both reported with a flash message and
/// a redirect to `redirect_url`. Invalid form data results in the re-rendered form (`tmpl`),
/// which shows the validation errors next to the affected fields.
pub fn create_form_response(
    result: FormSubmitResult,
    tmpl: impl Template,
    messages: FormMessages,
    redirect_url: url::Url,
    request: &HttpRequest,
) -> Result<Either<Redirect, HttpResponse>, AppError> {
    match result {
        FormSubmitResult::Success => {
            request.add_flash_message(FlashMessage::success(messages.success));
            Ok(Either::Left(Redirect::to(redirect_url.to_string()).see_other()))
        }
        FormSubmitResult::ValidationError => {
            request.add_flash_message(FlashMessage::error(
                "The submitted data is invalid. Please check the marked fields.".to_owned(),
            ));
            Ok(Either::Right(
                HttpResponse::UnprocessableEntity()
                    .content_type("text/html; charset=utf-8")
                    .body(tmpl.render()?),
            ))
        }
        FormSubmitResult::StoreFailure(StoreError::NotExisting) => Err(AppError::EntityNotFound),
        FormSubmitResult::StoreFailure(e) => {
            warn!("Could not store submitted form data: {}", e);
            request.add_flash_message(FlashMessage::error(messages.failure));
            Ok(Either::Left(Redirect::to(redirect_url.to_string()).see_other()))
        }
    }
}

/// Display data of a show, from the perspective of a venue's or artist's detail page or the show
/// list
#[derive(Debug)]
pub struct ShowView {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: String,
}

impl From<FullShow> for ShowView {
    fn from(value: FullShow) -> Self {
        Self {
            venue_id: value.show.venue_id,
            venue_name: value.venue_name,
            venue_image_link: value.venue_image_link,
            artist_id: value.show.artist_id,
            artist_name: value.artist_name,
            artist_image_link: value.artist_image_link,
            start_time: format_start_time(&value.show.start_time),
        }
    }
}

pub fn format_start_time(start_time: &DateTime<Utc>) -> String {
    start_time.format("%A %B %-d, %Y at %-I:%M%p").to_string()
}

/// Split a chronologically sorted list of shows into (past, upcoming) shows, relative to `now`
pub fn split_past_and_upcoming(
    shows: Vec<FullShow>,
    now: &DateTime<Utc>,
) -> (Vec<ShowView>, Vec<ShowView>) {
    let (upcoming, past): (Vec<FullShow>, Vec<FullShow>) =
        shows.into_iter().partition(|s| s.show.is_upcoming(now));
    (
        past.into_iter().map(ShowView::from).collect(),
        upcoming.into_iter().map(ShowView::from).collect(),
    )
}

/// Count the given shows per key, e.g. per venue id
pub fn count_shows_by<K: Eq + Hash>(
    shows: &[FullShow],
    key: impl Fn(&FullShow) -> K,
) -> HashMap<K, usize> {
    let mut result = HashMap::new();
    for show in shows {
        *result.entry(key(show)).or_insert(0) += 1;
    }
    result
}

/// An entry of the venue or artist lists and search results
#[derive(Debug, PartialEq)]
pub struct EntitySummary {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: usize,
}
