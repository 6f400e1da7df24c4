use crate::data_store::models::{
    Artist, Category, FullShow, NewArtist, NewCategory, NewQuestion, NewShow, NewVenue, Question,
    Show, Venue,
};
use crate::data_store::{
    contains_case_insensitive, ArtistId, CategoryId, FyyurStore, FyyurStoreFacade,
    QuestionFilter, QuestionId, ShowFilter, ShowId, StoreError, TriviaStore, TriviaStoreFacade,
    VenueId,
};
use std::sync::{Mutex, MutexGuard};

/**
 * A mock [FyyurStore] and [TriviaStore] implementation for testing.
 *
 * The simulated database consists of the [StoreMockData] structure with vectors of entities. These
 * can be directly modified by the tests.
 *
 * Except from checking for entity existence and foreign key references, the interface functions of
 * this mock don't do any error checking. Instead, the [StoreMockData.next_error] attribute can be
 * set to simulate a database error.
 */
#[derive(Default)]
pub struct StoreMock {
    pub data: Mutex<StoreMockData>,
}

impl FyyurStore for StoreMock {
    fn get_facade<'a>(&'a self) -> Result<Box<dyn FyyurStoreFacade + 'a>, StoreError> {
        Ok(Box::new(StoreMockFacade { store: self }))
    }
}

impl TriviaStore for StoreMock {
    fn get_facade<'a>(&'a self) -> Result<Box<dyn TriviaStoreFacade + 'a>, StoreError> {
        Ok(Box::new(StoreMockFacade { store: self }))
    }
}

#[derive(Default)]
pub struct StoreMockData {
    pub venues: Vec<Venue>,
    pub artists: Vec<Artist>,
    pub shows: Vec<Show>,
    pub categories: Vec<Category>,
    pub questions: Vec<Question>,
    /// If not none, the next call to a store facade method will return this error.
    pub next_error: Option<StoreError>,
}

struct StoreMockFacade<'a> {
    store: &'a StoreMock,
}

impl<'a> StoreMockFacade<'a> {
    /// Lock the mock data or return the simulated error, if one is set
    fn data(&self) -> Result<MutexGuard<'a, StoreMockData>, StoreError> {
        let mut data = self.store.data.lock().expect("Error while locking mutex.");
        if let Some(e) = data.next_error.take() {
            return Err(e);
        }
        Ok(data)
    }
}

fn next_id(ids: impl Iterator<Item = i32>) -> i32 {
    ids.max().unwrap_or(0) + 1
}

fn venue_from_new(id: VenueId, venue: NewVenue) -> Venue {
    Venue {
        id,
        name: venue.name,
        city: venue.city,
        state: venue.state,
        address: venue.address,
        phone: venue.phone,
        genres: venue.genres,
        image_link: venue.image_link,
        facebook_link: venue.facebook_link,
        website_link: venue.website_link,
        seeking_talent: venue.seeking_talent,
        seeking_description: venue.seeking_description,
    }
}

fn artist_from_new(id: ArtistId, artist: NewArtist) -> Artist {
    Artist {
        id,
        name: artist.name,
        city: artist.city,
        state: artist.state,
        phone: artist.phone,
        genres: artist.genres,
        image_link: artist.image_link,
        facebook_link: artist.facebook_link,
        website_link: artist.website_link,
        seeking_venue: artist.seeking_venue,
        seeking_description: artist.seeking_description,
    }
}

impl<'a> FyyurStoreFacade for StoreMockFacade<'a> {
    fn get_venues(&mut self) -> Result<Vec<Venue>, StoreError> {
        let data = self.data()?;
        let mut result = data.venues.clone();
        result.sort_by(|a, b| (&a.state, &a.city, &a.name).cmp(&(&b.state, &b.city, &b.name)));
        Ok(result)
    }

    fn get_venue(&mut self, venue_id: VenueId) -> Result<Venue, StoreError> {
        self.data()?
            .venues
            .iter()
            .find(|v| v.id == venue_id)
            .cloned()
            .ok_or(StoreError::NotExisting)
    }

    fn search_venues(&mut self, search_term: &str) -> Result<Vec<Venue>, StoreError> {
        let data = self.data()?;
        let mut result: Vec<Venue> = data
            .venues
            .iter()
            .filter(|v| contains_case_insensitive(&v.name, search_term))
            .cloned()
            .collect();
        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }

    fn create_venue(&mut self, venue: NewVenue) -> Result<VenueId, StoreError> {
        let mut data = self.data()?;
        let venue_id = next_id(data.venues.iter().map(|v| v.id));
        data.venues.push(venue_from_new(venue_id, venue));
        Ok(venue_id)
    }

    fn update_venue(&mut self, venue_id: VenueId, venue: NewVenue) -> Result<(), StoreError> {
        let mut data = self.data()?;
        let existing_venue = data
            .venues
            .iter_mut()
            .find(|v| v.id == venue_id)
            .ok_or(StoreError::NotExisting)?;
        *existing_venue = venue_from_new(venue_id, venue);
        Ok(())
    }

    fn delete_venue(&mut self, venue_id: VenueId) -> Result<(), StoreError> {
        let mut data = self.data()?;
        let count_before = data.venues.len();
        data.venues.retain(|v| v.id != venue_id);
        if data.venues.len() == count_before {
            return Err(StoreError::NotExisting);
        }
        data.shows.retain(|s| s.venue_id != venue_id);
        Ok(())
    }

    fn get_artists(&mut self) -> Result<Vec<Artist>, StoreError> {
        let data = self.data()?;
        let mut result = data.artists.clone();
        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }

    fn get_artist(&mut self, artist_id: ArtistId) -> Result<Artist, StoreError> {
        self.data()?
            .artists
            .iter()
            .find(|a| a.id == artist_id)
            .cloned()
            .ok_or(StoreError::NotExisting)
    }

    fn search_artists(&mut self, search_term: &str) -> Result<Vec<Artist>, StoreError> {
        let data = self.data()?;
        let mut result: Vec<Artist> = data
            .artists
            .iter()
            .filter(|a| contains_case_insensitive(&a.name, search_term))
            .cloned()
            .collect();
        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }

    fn create_artist(&mut self, artist: NewArtist) -> Result<ArtistId, StoreError> {
        let mut data = self.data()?;
        let artist_id = next_id(data.artists.iter().map(|a| a.id));
        data.artists.push(artist_from_new(artist_id, artist));
        Ok(artist_id)
    }

    fn update_artist(&mut self, artist_id: ArtistId, artist: NewArtist) -> Result<(), StoreError> {
        let mut data = self.data()?;
        let existing_artist = data
            .artists
            .iter_mut()
            .find(|a| a.id == artist_id)
            .ok_or(StoreError::NotExisting)?;
        *existing_artist = artist_from_new(artist_id, artist);
        Ok(())
    }

    fn get_shows(&mut self, filter: ShowFilter) -> Result<Vec<FullShow>, StoreError> {
        let data = self.data()?;
        let mut result = Vec::new();
        for show in data.shows.iter().filter(|s| filter.matches(s)) {
            let venue = data
                .venues
                .iter()
                .find(|v| v.id == show.venue_id)
                .ok_or_else(|| StoreError::InvalidDataInDatabase("dangling venue".to_owned()))?;
            let artist = data
                .artists
                .iter()
                .find(|a| a.id == show.artist_id)
                .ok_or_else(|| StoreError::InvalidDataInDatabase("dangling artist".to_owned()))?;
            result.push(FullShow {
                show: show.clone(),
                venue_name: venue.name.clone(),
                venue_image_link: venue.image_link.clone(),
                artist_name: artist.name.clone(),
                artist_image_link: artist.image_link.clone(),
            });
        }
        result.sort_by_key(|s| (s.show.start_time, s.show.id));
        Ok(result)
    }

    fn create_show(&mut self, show: NewShow) -> Result<ShowId, StoreError> {
        let mut data = self.data()?;
        if !data.venues.iter().any(|v| v.id == show.venue_id) {
            return Err(StoreError::InvalidInputData(
                "Show's venue_id must reference an existing venue.".to_owned(),
            ));
        }
        if !data.artists.iter().any(|a| a.id == show.artist_id) {
            return Err(StoreError::InvalidInputData(
                "Show's artist_id must reference an existing artist.".to_owned(),
            ));
        }
        let show_id = next_id(data.shows.iter().map(|s| s.id));
        data.shows.push(Show {
            id: show_id,
            start_time: show.start_time,
            venue_id: show.venue_id,
            artist_id: show.artist_id,
        });
        Ok(show_id)
    }
}

impl<'a> TriviaStoreFacade for StoreMockFacade<'a> {
    fn get_categories(&mut self) -> Result<Vec<Category>, StoreError> {
        let data = self.data()?;
        let mut result = data.categories.clone();
        result.sort_by_key(|c| c.id);
        Ok(result)
    }

    fn get_category(&mut self, category_id: CategoryId) -> Result<Category, StoreError> {
        self.data()?
            .categories
            .iter()
            .find(|c| c.id == category_id)
            .cloned()
            .ok_or(StoreError::NotExisting)
    }

    fn create_category(&mut self, category: NewCategory) -> Result<CategoryId, StoreError> {
        let mut data = self.data()?;
        let category_id = next_id(data.categories.iter().map(|c| c.id));
        data.categories.push(Category {
            id: category_id,
            category_type: category.category_type,
        });
        Ok(category_id)
    }

    fn get_questions(&mut self, filter: QuestionFilter) -> Result<Vec<Question>, StoreError> {
        let data = self.data()?;
        let mut result: Vec<Question> = data
            .questions
            .iter()
            .filter(|q| filter.matches(q))
            .cloned()
            .collect();
        result.sort_by_key(|q| q.id);
        Ok(result)
    }

    fn create_question(&mut self, question: NewQuestion) -> Result<Question, StoreError> {
        let mut data = self.data()?;
        if !data.categories.iter().any(|c| c.id == question.category) {
            return Err(StoreError::InvalidInputData(
                "Question's category must reference an existing category.".to_owned(),
            ));
        }
        let question = Question {
            id: next_id(data.questions.iter().map(|q| q.id)),
            question: question.question,
            answer: question.answer,
            category: question.category,
            difficulty: question.difficulty,
        };
        data.questions.push(question.clone());
        Ok(question)
    }

    fn delete_question(&mut self, question_id: QuestionId) -> Result<(), StoreError> {
        let mut data = self.data()?;
        let count_before = data.questions.len();
        data.questions.retain(|q| q.id != question_id);
        if data.questions.len() == count_before {
            return Err(StoreError::NotExisting);
        }
        Ok(())
    }
}
