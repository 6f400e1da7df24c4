use super::schema::{fyyur, trivia};
use super::{ArtistId, CategoryId, QuestionId, ShowId, VenueId};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

#[derive(Clone, Debug, Queryable, Selectable, Identifiable)]
#[diesel(table_name=fyyur::venues)]
pub struct Venue {
    pub id: VenueId,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub genres: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website_link: String,
    pub seeking_talent: bool,
    pub seeking_description: String,
}

impl Venue {
    pub fn genre_list(&self) -> Vec<&str> {
        split_genres(&self.genres)
    }
}

#[derive(Clone, Debug, Default, Insertable, AsChangeset)]
#[diesel(table_name=fyyur::venues)]
pub struct NewVenue {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub genres: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website_link: String,
    pub seeking_talent: bool,
    pub seeking_description: String,
}

#[derive(Clone, Debug, Queryable, Selectable, Identifiable)]
#[diesel(table_name=fyyur::artists)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website_link: String,
    pub seeking_venue: bool,
    pub seeking_description: String,
}

impl Artist {
    pub fn genre_list(&self) -> Vec<&str> {
        split_genres(&self.genres)
    }
}

#[derive(Clone, Debug, Default, Insertable, AsChangeset)]
#[diesel(table_name=fyyur::artists)]
pub struct NewArtist {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website_link: String,
    pub seeking_venue: bool,
    pub seeking_description: String,
}

/// Genres are stored as a single comma-separated string
fn split_genres(genres: &str) -> Vec<&str> {
    genres
        .split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .collect()
}

#[derive(Clone, Debug, Queryable, Selectable, Identifiable)]
#[diesel(table_name=fyyur::shows)]
pub struct Show {
    pub id: ShowId,
    pub start_time: DateTime<Utc>,
    pub venue_id: VenueId,
    pub artist_id: ArtistId,
}

impl Show {
    /// Shows starting after `now` are "upcoming", all others are "past".
    pub fn is_upcoming(&self, now: &DateTime<Utc>) -> bool {
        self.start_time > *now
    }
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name=fyyur::shows)]
pub struct NewShow {
    pub start_time: DateTime<Utc>,
    pub venue_id: VenueId,
    pub artist_id: ArtistId,
}

/// A show together with the display data of its venue and artist
#[derive(Clone, Debug)]
pub struct FullShow {
    pub show: Show,
    pub venue_name: String,
    pub venue_image_link: String,
    pub artist_name: String,
    pub artist_image_link: String,
}

#[derive(Clone, Debug, Queryable, Selectable, Identifiable, Insertable)]
#[diesel(table_name=trivia::categories)]
pub struct Category {
    pub id: CategoryId,
    pub category_type: String,
}

impl From<Category> for trivia_api_types::Category {
    fn from(value: Category) -> Self {
        Self {
            id: value.id,
            category_type: value.category_type,
        }
    }
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name=trivia::categories)]
pub struct NewCategory {
    pub category_type: String,
}

#[derive(Clone, Debug, Queryable, Selectable, Identifiable)]
#[diesel(table_name=trivia::questions)]
pub struct Question {
    pub id: QuestionId,
    pub question: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: i32,
}

impl From<Question> for trivia_api_types::Question {
    fn from(value: Question) -> Self {
        Self {
            id: value.id,
            question: value.question,
            answer: value.answer,
            category: value.category,
            difficulty: value.difficulty,
        }
    }
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name=trivia::questions)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: i32,
}
