use crate::data_store::models::{NewVenue, Venue};
use crate::data_store::{StoreError, VenueId};
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

#[get("/venues/create")]
async fn new_venue_form(req: HttpRequest) -> Result<impl Responder, AppError> {
    let form_data = VenueFormData::default();
    let tmpl = VenueFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "New Venue",
        },
        form_data: &form_data,
        heading: "List a new venue",
        submit_label: "Create Venue",
        post_url: req.url_for_static("new_venue")?.to_string(),
    };
    Ok(Html::new(tmpl.render()?))
}

#[post("/venues/create")]
async fn new_venue(
    data: Form<VenueFormData>,
    state: web::Data<FyyurState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let mut form_data = data.into_inner();
    let venue = form_data.validate();
    let name = form_data.name.string_value().to_owned();

    let result: FormSubmitResult = if let Some(venue) = venue {
        web::block(move || -> Result<_, StoreError> {
            let mut store = state.store.get_facade()?;
            let venue_id = store.create_venue(venue)?;
            info!("Created venue {}", venue_id);
            Ok(())
        })
        .await?
        .into()
    } else {
        FormSubmitResult::ValidationError
    };

    let tmpl = VenueFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "New Venue",
        },
        form_data: &form_data,
        heading: "List a new venue",
        submit_label: "Create Venue",
        post_url: req.url_for_static("new_venue")?.to_string(),
    };
    util::create_form_response(
        result,
        tmpl,
        FormMessages {
            success: format!("Venue {} was successfully listed!", name),
            failure: format!("An error occurred. Venue {} could not be listed.", name),
        },
        req.url_for_static("index")?,
        &req,
    )
}

#[get("/venues/{venue_id}/edit")]
async fn edit_venue_form(
    path: web::Path<VenueId>,
    state: web::Data<FyyurState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let venue_id = path.into_inner();
    let venue = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok(store.get_venue(venue_id)?)
    })
    .await??;

    let form_data: VenueFormData = venue.into();
    let tmpl = VenueFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Edit Venue",
        },
        form_data: &form_data,
        heading: "Edit venue",
        submit_label: "Save Changes",
        post_url: req.url_for("edit_venue", [venue_id.to_string()])?.to_string(),
    };
    Ok(Html::new(tmpl.render()?))
}

#[post("/venues/{venue_id}/edit")]
async fn edit_venue(
    path: web::Path<VenueId>,
    data: Form<VenueFormData>,
    state: web::Data<FyyurState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let venue_id = path.into_inner();
    let mut form_data = data.into_inner();
    let venue = form_data.validate();
    let name = form_data.name.string_value().to_owned();

    let result: FormSubmitResult = if let Some(venue) = venue {
        web::block(move || -> Result<_, StoreError> {
            let mut store = state.store.get_facade()?;
            store.update_venue(venue_id, venue)?;
            info!("Updated venue {}", venue_id);
            Ok(())
        })
        .await?
        .into()
    } else {
        FormSubmitResult::ValidationError
    };

    let tmpl = VenueFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Edit Venue",
        },
        form_data: &form_data,
        heading: "Edit venue",
        submit_label: "Save Changes",
        post_url: req.url_for("edit_venue", [venue_id.to_string()])?.to_string(),
    };
    util::create_form_response(
        result,
        tmpl,
        FormMessages {
            success: format!("Venue {} was successfully updated.", name),
            failure: format!("Something went wrong. Venue {} could not be updated.", name),
        },
        req.url_for("show_venue", [venue_id.to_string()])?,
        &req,
    )
}

#[derive(Deserialize, Default, Debug)]
pub struct VenueFormData {
    name: FormValue<NonEmptyString>,
    city: FormValue<String>,
    state: FormValue<String>,
    address: FormValue<String>,
    phone: FormValue<String>,
    genres: FormValue<String>,
    image_link: FormValue<String>,
    facebook_link: FormValue<String>,
    website_link: FormValue<String>,
    seeking_talent: BoolFormValue,
    seeking_description: FormValue<String>,
}

impl VenueFormData {
    fn validate(&mut self) -> Option<NewVenue> {
        let name = self.name.validate();
        let city = self.city.validate();
        let state = self.state.validate();
        let address = self.address.validate();
        let phone = self.phone.validate();
        let genres = self.genres.validate();
        let image_link = self.image_link.validate();
        let facebook_link = self.facebook_link.validate();
        let website_link = self.website_link.validate();
        let seeking_description = self.seeking_description.validate();

        Some(NewVenue {
            name: name?.into_inner(),
            city: city?,
            state: state?,
            address: address?,
            phone: phone?,
            genres: validation::normalize_genres(&genres?),
            image_link: image_link?,
            facebook_link: facebook_link?,
            website_link: website_link?,
            seeking_talent: self.seeking_talent.get_value(),
            seeking_description: seeking_description?,
        })
    }
}

impl From<Venue> for VenueFormData {
    fn from(value: Venue) -> Self {
        Self {
            name: NonEmptyString(value.name).into(),
            city: value.city.into(),
            state: value.state.into(),
            address: value.address.into(),
            phone: value.phone.into(),
            genres: value.genres.into(),
            image_link: value.image_link.into(),
            facebook_link: value.facebook_link.into(),
            website_link: value.website_link.into(),
            seeking_talent: value.seeking_talent.into(),
            seeking_description: value.seeking_description.into(),
        }
    }
}

#[derive(Template)]
#[template(path = "venue_form.html")]
struct VenueFormTemplate<'a> {
    base: BaseTemplateContext<'a>,
    form_data: &'a VenueFormData,
    heading: &'a str,
    submit_label: &'a str,
    post_url: String,
}
