use crate::cli_error::CliError;
use crate::data_store::{get_store_from_env, FyyurStore, QuestionFilter, ShowFilter, TriviaStore};
use crate::Service;
use std::collections::BTreeMap;

/// Print a table of the stored venues (Fyyur) or questions (Trivia) to stdout.
pub fn print_summary(service: Service) -> Result<(), CliError> {
    let data_store_pool = get_store_from_env(service)?;
    let table = match service {
        Service::Fyyur => {
            let mut data_store = FyyurStore::get_facade(&data_store_pool)?;
            let venues = data_store.get_venues()?;
            let mut show_counts = BTreeMap::new();
            for show in data_store.get_shows(ShowFilter::default())? {
                *show_counts.entry(show.show.venue_id).or_insert(0usize) += 1;
            }

            let mut table = comfy_table::Table::new();
            table
                .load_preset(comfy_table::presets::ASCII_BORDERS_ONLY_CONDENSED)
                .set_header(vec!["id", "name", "city", "state", "genres", "shows"])
                .add_rows(venues.into_iter().map(|venue| {
                    [
                        venue.id.to_string(),
                        venue.name,
                        venue.city,
                        venue.state,
                        venue.genres,
                        show_counts.get(&venue.id).unwrap_or(&0).to_string(),
                    ]
                }));
            table
        }
        Service::Trivia => {
            let mut data_store = TriviaStore::get_facade(&data_store_pool)?;
            let categories: BTreeMap<_, _> = data_store
                .get_categories()?
                .into_iter()
                .map(|c| (c.id, c.category_type))
                .collect();
            let questions = data_store.get_questions(QuestionFilter::default())?;

            let mut table = comfy_table::Table::new();
            table
                .load_preset(comfy_table::presets::ASCII_BORDERS_ONLY_CONDENSED)
                .set_header(vec!["id", "category", "difficulty", "question", "answer"])
                .add_rows(questions.into_iter().map(|question| {
                    [
                        question.id.to_string(),
                        categories
                            .get(&question.category)
                            .cloned()
                            .unwrap_or_default(),
                        question.difficulty.to_string(),
                        question.question,
                        question.answer,
                    ]
                }))
                .set_content_arrangement(comfy_table::ContentArrangement::Dynamic);
            table
        }
    };

    println!("{table}");
    Ok(())
}
