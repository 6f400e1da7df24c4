use crate::data_store::models::{Artist, NewArtist};
use crate::data_store::{ArtistId, StoreError};
use crate::web::fyyur::base_template::BaseTemplateContext;
use crate::web::fyyur::error::AppError;
use crate::web::fyyur::form_inputs::{CheckboxTemplate, FormFieldTemplate, InputType};
use crate::web::fyyur::form_values::{BoolFormValue, FormValue, _FormValidSimpleValidate};
use crate::web::fyyur::util::{FormMessages, FormSubmitResult};
use crate::web::fyyur::validation::{self, NonEmptyString};
use crate::web::fyyur::{util, FyyurState};
use actix_web::web::{Form, Html};
use actix_web::{get, post, web, HttpRequest, Responder};
use askama::Template;
use log::info;
use serde::Deserialize;

#[get("/artists/create")]
async fn new_artist_form(req: HttpRequest) -> Result<impl Responder, AppError> {
    let form_data = ArtistFormData::default();
    let tmpl = ArtistFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "New Artist",
        },
        form_data: &form_data,
        heading: "List a new artist",
        submit_label: "Create Artist",
        post_url: req.url_for_static("new_artist")?.to_string(),
    };
    Ok(Html::new(tmpl.render()?))
}

#[post("/artists/create")]
async fn new_artist(
    data: Form<ArtistFormData>,
    state: web::Data<FyyurState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let mut form_data = data.into_inner();
    let artist = form_data.validate();
    let name = form_data.name.string_value().to_owned();

    let result: FormSubmitResult = if let Some(artist) = artist {
        web::block(move || -> Result<_, StoreError> {
            let mut store = state.store.get_facade()?;
            let artist_id = store.create_artist(artist)?;
            info!("Created artist {}", artist_id);
            Ok(())
        })
        .await?
        .into()
    } else {
        FormSubmitResult::ValidationError
    };

    let tmpl = ArtistFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "New Artist",
        },
        form_data: &form_data,
        heading: "List a new artist",
        submit_label: "Create Artist",
        post_url: req.url_for_static("new_artist")?.to_string(),
    };
    util::create_form_response(
        result,
        tmpl,
        FormMessages {
            success: format!("Artist {} was successfully listed!", name),
            failure: format!("An error occurred. Artist {} could not be listed.", name),
        },
        req.url_for_static("index")?,
        &req,
    )
}

#[get("/artists/{artist_id}/edit")]
async fn edit_artist_form(
    path: web::Path<ArtistId>,
    state: web::Data<FyyurState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let artist_id = path.into_inner();
    let artist = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok(store.get_artist(artist_id)?)
    })
    .await??;

    let form_data: ArtistFormData = artist.into();
    let tmpl = ArtistFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Edit Artist",
        },
        form_data: &form_data,
        heading: "Edit artist",
        submit_label: "Save Changes",
        post_url: req.url_for("edit_artist", [artist_id.to_string()])?.to_string(),
    };
    Ok(Html::new(tmpl.render()?))
}

#[post("/artists/{artist_id}/edit")]
async fn edit_artist(
    path: web::Path<ArtistId>,
    data: Form<ArtistFormData>,
    state: web::Data<FyyurState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let artist_id = path.into_inner();
    let mut form_data = data.into_inner();
    let artist = form_data.validate();
    let name = form_data.name.string_value().to_owned();

    let result: FormSubmitResult = if let Some(artist) = artist {
        web::block(move || -> Result<_, StoreError> {
            let mut store = state.store.get_facade()?;
            store.update_artist(artist_id, artist)?;
            info!("Updated artist {}", artist_id);
            Ok(())
        })
        .await?
        .into()
    } else {
        FormSubmitResult::ValidationError
    };

    let tmpl = ArtistFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Edit Artist",
        },
        form_data: &form_data,
        heading: "Edit artist",
        submit_label: "Save Changes",
        post_url: req.url_for("edit_artist", [artist_id.to_string()])?.to_string(),
    };
    util::create_form_response(
        result,
        tmpl,
        FormMessages {
            success: format!("Artist {} was successfully updated.", name),
            failure: format!("Something went wrong. Artist {} could not be updated.", name),
        },
        req.url_for("show_artist", [artist_id.to_string()])?,
        &req,
    )
}

#[derive(Deserialize, Default, Debug)]
pub struct ArtistFormData {
    name: FormValue<NonEmptyString>,
    city: FormValue<String>,
    state: FormValue<String>,
    phone: FormValue<String>,
    genres: FormValue<String>,
    image_link: FormValue<String>,
    facebook_link: FormValue<String>,
    website_link: FormValue<String>,
    seeking_venue: BoolFormValue,
    seeking_description: FormValue<String>,
}

impl ArtistFormData {
    fn validate(&mut self) -> Option<NewArtist> {
        let name = self.name.validate();
        let city = self.city.validate();
        let state = self.state.validate();
        let phone = self.phone.validate();
        let genres = self.genres.validate();
        let image_link = self.image_link.validate();
        let facebook_link = self.facebook_link.validate();
        let website_link = self.website_link.validate();
        let seeking_description = self.seeking_description.validate();

        Some(NewArtist {
            name: name?.into_inner(),
            city: city?,
            state: state?,
            phone: phone?,
            genres: validation::normalize_genres(&genres?),
            image_link: image_link?,
            facebook_link: facebook_link?,
            website_link: website_link?,
            seeking_venue: self.seeking_venue.get_value(),
            seeking_description: seeking_description?,
        })
    }
}

impl From<Artist> for ArtistFormData {
    fn from(value: Artist) -> Self {
        Self {
            name: NonEmptyString(value.name).into(),
            city: value.city.into(),
            state: value.state.into(),
            phone: value.phone.into(),
            genres: value.genres.into(),
            image_link: value.image_link.into(),
            facebook_link: value.facebook_link.into(),
            website_link: value.website_link.into(),
            seeking_venue: value.seeking_venue.into(),
            seeking_description: value.seeking_description.into(),
        }
    }
}

#[derive(Template)]
#[template(path = "artist_form.html")]
struct ArtistFormTemplate<'a> {
    base: BaseTemplateContext<'a>,
    form_data: &'a ArtistFormData,
    heading: &'a str,
    submit_label: &'a str,
    post_url: String,
}
