use crate::cli_error::CliError;
use crate::data_store::{
    get_store_from_env, models, ArtistId, CategoryId, FyyurStore, FyyurStoreFacade, TriviaStore,
    TriviaStoreFacade, VenueId,
};
use crate::Service;
use log::info;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Seed data file contents for the Trivia application.
///
/// Category ids are local to the file: they are only used for referencing categories from the
/// questions and are replaced by newly generated database ids on import.
#[derive(Deserialize)]
struct TriviaSeed {
    categories: Vec<trivia_api_types::Category>,
    questions: Vec<SeedQuestion>,
}

#[derive(Deserialize)]
struct SeedQuestion {
    question: String,
    answer: String,
    category: CategoryId,
    difficulty: i32,
}

/// Seed data file contents for the Fyyur application.
///
/// Like in [TriviaSeed], venue and artist ids are local to the file.
#[derive(Deserialize)]
struct FyyurSeed {
    #[serde(default)]
    venues: Vec<SeedVenue>,
    #[serde(default)]
    artists: Vec<SeedArtist>,
    #[serde(default)]
    shows: Vec<SeedShow>,
}

#[derive(Deserialize)]
struct SeedVenue {
    id: VenueId,
    name: String,
    city: String,
    state: String,
    address: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    genres: Vec<String>,
    #[serde(default)]
    image_link: String,
    #[serde(default)]
    facebook_link: String,
    #[serde(default)]
    website_link: String,
    #[serde(default)]
    seeking_talent: bool,
    #[serde(default)]
    seeking_description: String,
}

#[derive(Deserialize)]
struct SeedArtist {
    id: ArtistId,
    name: String,
    city: String,
    state: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    genres: Vec<String>,
    #[serde(default)]
    image_link: String,
    #[serde(default)]
    facebook_link: String,
    #[serde(default)]
    website_link: String,
    #[serde(default)]
    seeking_venue: bool,
    #[serde(default)]
    seeking_description: String,
}

#[derive(Deserialize)]
struct SeedShow {
    venue_id: VenueId,
    artist_id: ArtistId,
    start_time: chrono::DateTime<chrono::Utc>,
}

/// Read a JSON seed data file and add its contents to the database of the given application.
pub fn load_data_from_file(service: Service, path: &Path) -> Result<(), CliError> {
    let f = File::open(path).map_err(|e| {
        CliError::FileError(format!("Could not open {:?} for reading: {}", path, e))
    })?;
    let reader = BufReader::new(f);
    let data_store_pool = get_store_from_env(service)?;

    match service {
        Service::Fyyur => {
            let data: FyyurSeed = serde_json::from_reader(reader)?;
            let mut data_store = FyyurStore::get_facade(&data_store_pool)?;
            import_fyyur_seed(data_store.as_mut(), data)
        }
        Service::Trivia => {
            let data: TriviaSeed = serde_json::from_reader(reader)?;
            let mut data_store = TriviaStore::get_facade(&data_store_pool)?;
            import_trivia_seed(data_store.as_mut(), data)
        }
    }
}

fn import_trivia_seed(
    data_store: &mut dyn TriviaStoreFacade,
    data: TriviaSeed,
) -> Result<(), CliError> {
    let mut category_id_map = BTreeMap::<CategoryId, CategoryId>::new();
    for category in data.categories {
        let new_id = data_store.create_category(models::NewCategory {
            category_type: category.category_type,
        })?;
        category_id_map.insert(category.id, new_id);
    }
    let num_questions = data.questions.len();
    for question in data.questions {
        let category = *category_id_map
            .get(&question.category)
            .ok_or(CliError::DataError(format!(
                "Category {} of question \"{}\" does not exist",
                question.category, question.question
            )))?;
        data_store.create_question(models::NewQuestion {
            question: question.question,
            answer: question.answer,
            category,
            difficulty: question.difficulty,
        })?;
    }
    info!(
        "Imported {} categories and {} questions.",
        category_id_map.len(),
        num_questions
    );
    Ok(())
}

fn import_fyyur_seed(data_store: &mut dyn FyyurStoreFacade, data: FyyurSeed) -> Result<(), CliError> {
    let mut venue_id_map = BTreeMap::<VenueId, VenueId>::new();
    for venue in data.venues {
        let new_id = data_store.create_venue(models::NewVenue {
            name: venue.name,
            city: venue.city,
            state: venue.state,
            address: venue.address,
            phone: venue.phone,
            genres: venue.genres.join(","),
            image_link: venue.image_link,
            facebook_link: venue.facebook_link,
            website_link: venue.website_link,
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description,
        })?;
        venue_id_map.insert(venue.id, new_id);
    }
    let mut artist_id_map = BTreeMap::<ArtistId, ArtistId>::new();
    for artist in data.artists {
        let new_id = data_store.create_artist(models::NewArtist {
            name: artist.name,
            city: artist.city,
            state: artist.state,
            phone: artist.phone,
            genres: artist.genres.join(","),
            image_link: artist.image_link,
            facebook_link: artist.facebook_link,
            website_link: artist.website_link,
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description,
        })?;
        artist_id_map.insert(artist.id, new_id);
    }
    let num_shows = data.shows.len();
    for show in data.shows {
        data_store.create_show(models::NewShow {
            start_time: show.start_time,
            venue_id: *venue_id_map
                .get(&show.venue_id)
                .ok_or(CliError::DataError(format!(
                    "Venue {} of show at {} does not exist",
                    show.venue_id, show.start_time
                )))?,
            artist_id: *artist_id_map
                .get(&show.artist_id)
                .ok_or(CliError::DataError(format!(
                    "Artist {} of show at {} does not exist",
                    show.artist_id, show.start_time
                )))?,
        })?;
    }
    info!(
        "Imported {} venues, {} artists and {} shows.",
        venue_id_map.len(),
        artist_id_map.len(),
        num_shows
    );
    Ok(())
}
