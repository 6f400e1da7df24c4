use crate::data_store::models::NewShow;
use crate::data_store::{ShowFilter, StoreError};
use crate::web::fyyur::base_template::BaseTemplateContext;
use crate::web::fyyur::error::AppError;
use crate::web::fyyur::form_inputs::{FormFieldTemplate, InputType};
use crate::web::fyyur::form_values::{FormValue, _FormValidSimpleValidate};
use crate::web::fyyur::util::{FormMessages, FormSubmitResult, ShowView};
use crate::web::fyyur::validation::ShowStartTime;
use crate::web::fyyur::{util, FyyurState};
use actix_web::web::{Form, Html};
use actix_web::{get, post, web, HttpRequest, Responder};
use askama::Template;
use log::info;
use serde::Deserialize;

#[get("/shows")]
async fn list_shows(
    state: web::Data<FyyurState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let shows = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok(store.get_shows(ShowFilter::default())?)
    })
    .await??;

    let tmpl = ShowListTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Shows",
        },
        shows: shows.into_iter().map(ShowView::from).collect(),
    };
    Ok(Html::new(tmpl.render()?))
}

#[derive(Template)]
#[template(path = "shows.html")]
struct ShowListTemplate<'a> {
    base: BaseTemplateContext<'a>,
    shows: Vec<ShowView>,
}

#[get("/shows/create")]
async fn new_show_form(req: HttpRequest) -> Result<impl Responder, AppError> {
    let form_data = ShowFormData {
        artist_id: FormValue::empty(),
        venue_id: FormValue::empty(),
        start_time: ShowStartTime(chrono::Utc::now()).into(),
    };
    let tmpl = ShowFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "New Show",
        },
        form_data: &form_data,
        post_url: req.url_for_static("new_show")?.to_string(),
    };
    Ok(Html::new(tmpl.render()?))
}

/// Create a new show.
///
/// Unknown artist or venue ids are not checked here, but rejected by the store, which results in
/// an error flash message.
#[post("/shows/create")]
async fn new_show(
    data: Form<ShowFormData>,
    state: web::Data<FyyurState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let mut form_data = data.into_inner();
    let show = form_data.validate();

    let result: FormSubmitResult = if let Some(show) = show {
        web::block(move || -> Result<_, StoreError> {
            let mut store = state.store.get_facade()?;
            let show_id = store.create_show(show)?;
            info!("Created show {}", show_id);
            Ok(())
        })
        .await?
        .into()
    } else {
        FormSubmitResult::ValidationError
    };

    let tmpl = ShowFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "New Show",
        },
        form_data: &form_data,
        post_url: req.url_for_static("new_show")?.to_string(),
    };
    util::create_form_response(
        result,
        tmpl,
        FormMessages {
            success: "Show was successfully listed!".to_owned(),
            failure: "An error occurred. Show could not be listed.".to_owned(),
        },
        req.url_for_static("index")?,
        &req,
    )
}

#[derive(Deserialize, Debug)]
pub struct ShowFormData {
    artist_id: FormValue<i32>,
    venue_id: FormValue<i32>,
    start_time: FormValue<ShowStartTime>,
}

impl ShowFormData {
    fn validate(&mut self) -> Option<NewShow> {
        let artist_id = self.artist_id.validate();
        let venue_id = self.venue_id.validate();
        let start_time = self.start_time.validate();

        Some(NewShow {
            artist_id: artist_id?,
            venue_id: venue_id?,
            start_time: start_time?.into_inner(),
        })
    }
}

#[derive(Template)]
#[template(path = "show_form.html")]
struct ShowFormTemplate<'a> {
    base: BaseTemplateContext<'a>,
    form_data: &'a ShowFormData,
    post_url: String,
}
