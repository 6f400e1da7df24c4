use crate::data_store::models::Artist;
use crate::data_store::{ArtistId, ShowFilter};
use crate::web::fyyur::base_template::BaseTemplateContext;
use crate::web::fyyur::endpoints::venues::{SearchFormData, SearchResultsTemplate};
use crate::web::fyyur::error::AppError;
use crate::web::fyyur::util::{self, EntitySummary, ShowView};
use crate::web::fyyur::FyyurState;
use actix_web::web::{Form, Html};
use actix_web::{get, post, web, HttpRequest, Responder};
use askama::Template;

#[get("/artists")]
async fn list_artists(
    state: web::Data<FyyurState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let now = chrono::Utc::now();
    let (artists, upcoming_shows) = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok((
            store.get_artists()?,
            store.get_shows(ShowFilter::builder().after(now).build())?,
        ))
    })
    .await??;

    let upcoming_counts = util::count_shows_by(&upcoming_shows, |s| s.show.artist_id);
    let tmpl = ArtistListTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Artists",
        },
        artists: artists
            .into_iter()
            .map(|a| EntitySummary {
                num_upcoming_shows: upcoming_counts.get(&a.id).copied().unwrap_or(0),
                id: a.id,
                name: a.name,
            })
            .collect(),
    };
    Ok(Html::new(tmpl.render()?))
}

#[derive(Template)]
#[template(path = "artists.html")]
struct ArtistListTemplate<'a> {
    base: BaseTemplateContext<'a>,
    artists: Vec<EntitySummary>,
}

#[post("/artists/search")]
async fn search_artists(
    data: Form<SearchFormData>,
    state: web::Data<FyyurState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let search_term = data.into_inner().search_term.trim().to_owned();
    let now = chrono::Utc::now();
    let term = search_term.clone();
    let (artists, upcoming_shows) = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok((
            store.search_artists(&term)?,
            store.get_shows(ShowFilter::builder().after(now).build())?,
        ))
    })
    .await??;

    let upcoming_counts = util::count_shows_by(&upcoming_shows, |s| s.show.artist_id);
    let tmpl = SearchResultsTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Search artists",
        },
        search_term: &search_term,
        entity_path: "artists",
        results: artists
            .into_iter()
            .map(|a| EntitySummary {
                num_upcoming_shows: upcoming_counts.get(&a.id).copied().unwrap_or(0),
                id: a.id,
                name: a.name,
            })
            .collect(),
    };
    Ok(Html::new(tmpl.render()?))
}

#[get("/artists/{artist_id}")]
async fn show_artist(
    path: web::Path<ArtistId>,
    state: web::Data<FyyurState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let artist_id = path.into_inner();
    let (artist, shows) = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        let artist = store.get_artist(artist_id)?;
        let shows = store.get_shows(ShowFilter::builder().of_artist(artist_id).build())?;
        Ok((artist, shows))
    })
    .await??;

    let (past_shows, upcoming_shows) = util::split_past_and_upcoming(shows, &chrono::Utc::now());
    let tmpl = ArtistTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: &artist.name,
        },
        artist: &artist,
        past_shows,
        upcoming_shows,
    };
    Ok(Html::new(tmpl.render()?))
}

#[derive(Template)]
#[template(path = "artist.html")]
struct ArtistTemplate<'a> {
    base: BaseTemplateContext<'a>,
    artist: &'a Artist,
    past_shows: Vec<ShowView>,
    upcoming_shows: Vec<ShowView>,
}
