//! The backend part of the backend: the database interface
//!
//! The primary entry point to this module is the function [get_store_from_env], which returns an
//! object implementing the [FyyurStore] and [TriviaStore] traits. This object can be shared between
//! threads in a global application state and be used to create [FyyurStoreFacade] or
//! [TriviaStoreFacade] instances for interaction with the database. These provide a CRUD-like
//! interface, using the data models from the [models] module.
//!
//! The primary implementation ([postgres::PgDataStore]) wraps a PostgreSQL connection pool and its
//! corresponding facade objects ([postgres::PgDataStoreFacade]) hold one pooled connection each,
//! using the Diesel query DSL for implementing the database interaction. The Fyyur and the Trivia
//! application use separate databases with separate schemas; which of the two facades is used
//! depends on the served application.
//!
//! There is also a mock implementation for unittests.

use crate::cli_error::CliError;
use crate::setup;
use crate::Service;
use std::fmt::Debug;

pub mod models;
mod postgres;
mod schema;
#[cfg(test)]
pub mod store_mock;

/// Get a data store instance for the database of the given application, as configured by the
/// environment variables (see [setup::get_database_url_from_env]).
///
/// The database URL must be a PosgreSQL connection url, following the schema
/// "postgres://{user}:{password}@{host}/{database}".
pub fn get_store_from_env(service: Service) -> Result<impl FyyurStore + TriviaStore, CliError> {
    postgres::PgDataStore::new(&setup::get_database_url_from_env(service)?)
        .map_err(|err| CliError::UnexpectedStoreError(err.to_string()))
}

pub type VenueId = i32;
pub type ArtistId = i32;
pub type ShowId = i32;
pub type QuestionId = i32;
pub type CategoryId = i32;

pub trait FyyurStoreFacade {
    /// Get all venues, sorted by (state, city, name)
    fn get_venues(&mut self) -> Result<Vec<models::Venue>, StoreError>;
    fn get_venue(&mut self, venue_id: VenueId) -> Result<models::Venue, StoreError>;
    /// Get all venues whose name contains the search term (case-insensitive), sorted by name
    fn search_venues(&mut self, search_term: &str) -> Result<Vec<models::Venue>, StoreError>;
    fn create_venue(&mut self, venue: models::NewVenue) -> Result<VenueId, StoreError>;
    fn update_venue(
        &mut self,
        venue_id: VenueId,
        venue: models::NewVenue,
    ) -> Result<(), StoreError>;
    /// Delete the venue together with all of its shows
    fn delete_venue(&mut self, venue_id: VenueId) -> Result<(), StoreError>;

    /// Get all artists, sorted by name
    fn get_artists(&mut self) -> Result<Vec<models::Artist>, StoreError>;
    fn get_artist(&mut self, artist_id: ArtistId) -> Result<models::Artist, StoreError>;
    /// Get all artists whose name contains the search term (case-insensitive), sorted by name
    fn search_artists(&mut self, search_term: &str) -> Result<Vec<models::Artist>, StoreError>;
    fn create_artist(&mut self, artist: models::NewArtist) -> Result<ArtistId, StoreError>;
    fn update_artist(
        &mut self,
        artist_id: ArtistId,
        artist: models::NewArtist,
    ) -> Result<(), StoreError>;

    /// Get a filtered list of shows, together with their venue's and artist's display data
    ///
    /// Shows are returned in chronological order.
    fn get_shows(&mut self, filter: ShowFilter) -> Result<Vec<models::FullShow>, StoreError>;
    /// Create a new show.
    ///
    /// Returns `Err(StoreError::InvalidInputData)` if the referenced venue or artist does not
    /// exist.
    fn create_show(&mut self, show: models::NewShow) -> Result<ShowId, StoreError>;
}

pub trait TriviaStoreFacade {
    /// Get all categories, sorted by id
    fn get_categories(&mut self) -> Result<Vec<models::Category>, StoreError>;
    fn get_category(&mut self, category_id: CategoryId) -> Result<models::Category, StoreError>;
    fn create_category(&mut self, category: models::NewCategory)
        -> Result<CategoryId, StoreError>;

    /// Get a filtered list of questions, sorted by id
    fn get_questions(&mut self, filter: QuestionFilter)
        -> Result<Vec<models::Question>, StoreError>;
    /// Create a new question and return it, including its id.
    ///
    /// Returns `Err(StoreError::InvalidInputData)` if the category does not exist.
    fn create_question(
        &mut self,
        question: models::NewQuestion,
    ) -> Result<models::Question, StoreError>;
    /// Delete a question. Returns `Err(StoreError::NotExisting)` if there is no such question.
    fn delete_question(&mut self, question_id: QuestionId) -> Result<(), StoreError>;
}

pub trait FyyurStore: Send + Sync {
    fn get_facade<'a>(&'a self) -> Result<Box<dyn FyyurStoreFacade + 'a>, StoreError>;
}

pub trait TriviaStore: Send + Sync {
    fn get_facade<'a>(&'a self) -> Result<Box<dyn TriviaStoreFacade + 'a>, StoreError>;
}

/// Filter options for retrieving shows from the store via [FyyurStoreFacade::get_shows]
///
/// Can be constructed through the [ShowFilterBuilder]
#[derive(Default, Debug, Clone)]
pub struct ShowFilter {
    /// Filter for shows that start after the given point in time
    pub after: Option<chrono::DateTime<chrono::Utc>>,
    /// Filter for shows that start before the given point in time
    pub before: Option<chrono::DateTime<chrono::Utc>>,
    /// Filter for shows at the given venue
    pub venue_id: Option<VenueId>,
    /// Filter for shows of the given artist
    pub artist_id: Option<ArtistId>,
}

impl ShowFilter {
    pub fn builder() -> ShowFilterBuilder {
        ShowFilterBuilder::new()
    }

    /// Checks if a given show matches the filter
    ///
    /// Usually, filtering should be done by the database. This function can be used for separate
    /// checks of individual shows in software.
    pub fn matches(&self, show: &models::Show) -> bool {
        if let Some(after) = self.after {
            if show.start_time <= after {
                return false;
            }
        }
        if let Some(before) = self.before {
            if show.start_time >= before {
                return false;
            }
        }
        if let Some(venue_id) = self.venue_id {
            if show.venue_id != venue_id {
                return false;
            }
        }
        if let Some(artist_id) = self.artist_id {
            if show.artist_id != artist_id {
                return false;
            }
        }
        true
    }
}

/// Builder for constructing ShowFilter objects
pub struct ShowFilterBuilder {
    result: ShowFilter,
}

impl ShowFilterBuilder {
    pub fn new() -> Self {
        Self {
            result: ShowFilter::default(),
        }
    }

    /// Add filter, to only include shows starting after the given point in time
    pub fn after(mut self, after: chrono::DateTime<chrono::Utc>) -> Self {
        self.result.after = Some(after);
        self
    }
    /// Add filter, to only include shows starting before the given point in time
    pub fn before(mut self, before: chrono::DateTime<chrono::Utc>) -> Self {
        self.result.before = Some(before);
        self
    }
    pub fn at_venue(mut self, venue_id: VenueId) -> Self {
        self.result.venue_id = Some(venue_id);
        self
    }
    pub fn of_artist(mut self, artist_id: ArtistId) -> Self {
        self.result.artist_id = Some(artist_id);
        self
    }

    pub fn build(self) -> ShowFilter {
        self.result
    }
}

/// Filter options for retrieving questions from the store via
/// [TriviaStoreFacade::get_questions]
#[derive(Default, Debug, Clone)]
pub struct QuestionFilter {
    /// Only include questions of this category
    pub category: Option<CategoryId>,
    /// Only include questions whose text contains this string (case-insensitive)
    pub search_term: Option<String>,
    /// Exclude the questions with these ids
    pub excluded_ids: Vec<QuestionId>,
}

impl QuestionFilter {
    /// Checks if a given question matches the filter
    ///
    /// Usually, filtering should be done by the database. This function can be used for separate
    /// checks of individual questions in software.
    pub fn matches(&self, question: &models::Question) -> bool {
        if let Some(category) = self.category {
            if question.category != category {
                return false;
            }
        }
        if let Some(search_term) = &self.search_term {
            if !contains_case_insensitive(&question.question, search_term) {
                return false;
            }
        }
        !self.excluded_ids.contains(&question.id)
    }
}

/// Case-insensitive substring check, matching the semantics of SQL `ILIKE '%term%'`
pub fn contains_case_insensitive(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Build an SQL `LIKE` pattern that matches any string containing `term` literally.
///
/// The LIKE wildcard characters and the escape character within the term are escaped.
pub fn substring_like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[derive(Debug)]
pub enum StoreError {
    /// Connection the database failed. See string description for details.
    ConnectionError(String),
    /// The query could not be executed because of some error not covered by the other members (see
    /// string description)
    QueryError(diesel::result::Error),
    /// Database transaction could not be commited due to a conflicting concurrent transaction
    TransactionConflict,
    /// The requested entity does not exist
    NotExisting,
    /// The entity could not be created because it already exists.
    ConflictEntityExists,
    /// The provided data is invalid, i.e. it does not match the expected ranges or violates a
    /// SQL constraint. See string description for details.
    InvalidInputData(String),
    /// Some data queried from the database could not be deserialized. See string description for
    /// details.
    InvalidDataInDatabase(String),
}

impl From<diesel::result::Error> for StoreError {
    fn from(error: diesel::result::Error) -> Self {
        match error {
            diesel::result::Error::NotFound => Self::NotExisting,
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                _,
            ) => Self::ConflictEntityExists,
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::SerializationFailure,
                _,
            ) => Self::TransactionConflict,
            diesel::result::Error::DatabaseError(
                e @ diesel::result::DatabaseErrorKind::ForeignKeyViolation
                | e @ diesel::result::DatabaseErrorKind::CheckViolation
                | e @ diesel::result::DatabaseErrorKind::NotNullViolation,
                info,
            ) => Self::InvalidInputData(format!("{:?}: {}", e, info.message())),
            diesel::result::Error::SerializationError(e) => Self::InvalidInputData(e.to_string()),
            diesel::result::Error::DeserializationError(e) => {
                Self::InvalidDataInDatabase(e.to_string())
            }
            _ => Self::QueryError(error),
        }
    }
}

impl From<r2d2::Error> for StoreError {
    fn from(error: r2d2::Error) -> Self {
        Self::ConnectionError(error.to_string())
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Error connecting to database: {}", e),
            Self::QueryError(e) => write!(f, "Error while executing database query: {}", e),
            Self::TransactionConflict => f.write_str("Database transaction could not be commited due to a conflicting concurrent transaction"),
            Self::NotExisting => f.write_str("Database record does not exist."),
            Self::ConflictEntityExists => f.write_str("Database record exists already."),
            Self::InvalidInputData(e) => {
                write!(f, "Data to be stored in database is not valid: {}", e)
            }
            Self::InvalidDataInDatabase(e) => {
                write!(f, "Data queried from database could not be deserialized: {}", e)
            }
        }
    }
}

impl std::error::Error for StoreError {}
