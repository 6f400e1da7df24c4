use crate::data_store::models::Venue;
use crate::data_store::{ShowFilter, VenueId};
use crate::web::fyyur::base_template::BaseTemplateContext;
use crate::web::fyyur::endpoints::index::render_home_page;
use crate::web::fyyur::error::AppError;
use crate::web::fyyur::flash::{FlashMessage, FlashesInterface};
use crate::web::fyyur::util::{self, EntitySummary, ShowView};
use crate::web::fyyur::FyyurState;
use actix_web::web::{Form, Html};
use actix_web::{delete, get, post, web, HttpRequest, Responder};
use askama::Template;
use log::{info, warn};
use serde::Deserialize;
use std::collections::HashMap;

#[get("/venues")]
async fn list_venues(
    state: web::Data<FyyurState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let now = chrono::Utc::now();
    let (venues, upcoming_shows) = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok((
            store.get_venues()?,
            store.get_shows(ShowFilter::builder().after(now).build())?,
        ))
    })
    .await??;

    let upcoming_counts = util::count_shows_by(&upcoming_shows, |s| s.show.venue_id);
    let tmpl = VenueListTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Venues",
        },
        areas: group_venues_by_area(venues, &upcoming_counts),
    };
    Ok(Html::new(tmpl.render()?))
}

/// All venues of one city
#[derive(Debug)]
struct VenueArea {
    city: String,
    state: String,
    venues: Vec<EntitySummary>,
}

/// Group the venues by (city, state). The venues must already be sorted by state and city, so
/// that venues of the same area are adjacent.
fn group_venues_by_area(
    venues: Vec<Venue>,
    upcoming_counts: &HashMap<VenueId, usize>,
) -> Vec<VenueArea> {
    let mut areas: Vec<VenueArea> = Vec::new();
    for venue in venues {
        let summary = EntitySummary {
            id: venue.id,
            name: venue.name,
            num_upcoming_shows: upcoming_counts.get(&venue.id).copied().unwrap_or(0),
        };
        match areas.last_mut() {
            Some(area) if area.city == venue.city && area.state == venue.state => {
                area.venues.push(summary)
            }
            _ => areas.push(VenueArea {
                city: venue.city,
                state: venue.state,
                venues: vec![summary],
            }),
        }
    }
    areas
}

#[derive(Template)]
#[template(path = "venues.html")]
struct VenueListTemplate<'a> {
    base: BaseTemplateContext<'a>,
    areas: Vec<VenueArea>,
}

#[derive(Deserialize, Debug)]
pub struct SearchFormData {
    #[serde(default)]
    pub search_term: String,
}

#[post("/venues/search")]
async fn search_venues(
    data: Form<SearchFormData>,
    state: web::Data<FyyurState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let search_term = data.into_inner().search_term.trim().to_owned();
    let now = chrono::Utc::now();
    let term = search_term.clone();
    let (venues, upcoming_shows) = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok((
            store.search_venues(&term)?,
            store.get_shows(ShowFilter::builder().after(now).build())?,
        ))
    })
    .await??;

    let upcoming_counts = util::count_shows_by(&upcoming_shows, |s| s.show.venue_id);
    let tmpl = SearchResultsTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Search venues",
        },
        search_term: &search_term,
        entity_path: "venues",
        results: venues
            .into_iter()
            .map(|v| EntitySummary {
                num_upcoming_shows: upcoming_counts.get(&v.id).copied().unwrap_or(0),
                id: v.id,
                name: v.name,
            })
            .collect(),
    };
    Ok(Html::new(tmpl.render()?))
}

#[derive(Template)]
#[template(path = "search_results.html")]
pub struct SearchResultsTemplate<'a> {
    pub base: BaseTemplateContext<'a>,
    pub search_term: &'a str,
    /// First path segment of the results' detail pages
    pub entity_path: &'a str,
    pub results: Vec<EntitySummary>,
}

#[get("/venues/{venue_id}")]
async fn show_venue(
    path: web::Path<VenueId>,
    state: web::Data<FyyurState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let venue_id = path.into_inner();
    let (venue, shows) = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        let venue = store.get_venue(venue_id)?;
        let shows = store.get_shows(ShowFilter::builder().at_venue(venue_id).build())?;
        Ok((venue, shows))
    })
    .await??;

    let (past_shows, upcoming_shows) = util::split_past_and_upcoming(shows, &chrono::Utc::now());
    let tmpl = VenueTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: &venue.name,
        },
        venue: &venue,
        past_shows,
        upcoming_shows,
    };
    Ok(Html::new(tmpl.render()?))
}

#[derive(Template)]
#[template(path = "venue.html")]
struct VenueTemplate<'a> {
    base: BaseTemplateContext<'a>,
    venue: &'a Venue,
    past_shows: Vec<ShowView>,
    upcoming_shows: Vec<ShowView>,
}

/// Delete a venue together with its shows.
///
/// This endpoint is called from a script on the venue's detail page. It always responds with the
/// home page. Failures are only reported with a flash message.
#[delete("/venues/{venue_id}")]
async fn delete_venue(
    path: web::Path<VenueId>,
    state: web::Data<FyyurState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let venue_id = path.into_inner();
    let result = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        let venue = store.get_venue(venue_id)?;
        store.delete_venue(venue_id)?;
        Ok(venue.name)
    })
    .await
    .map_err(AppError::from)
    .and_then(|r| r);

    match result {
        Ok(name) => {
            info!("Deleted venue {} ({})", venue_id, name);
            req.add_flash_message(FlashMessage::success(format!(
                "Venue {} successfully deleted.",
                name
            )));
        }
        Err(e) => {
            warn!("Could not delete venue {}: {}", venue_id, e);
            req.add_flash_message(FlashMessage::error(
                "Something went wrong. Venue could not be deleted.".to_owned(),
            ));
        }
    }
    render_home_page(&req)
}
