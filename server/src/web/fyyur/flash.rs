//! One-time messages ("flashes") for the user, which are shown on the next rendered page.
//!
//! Flashes are stored in a cookie between requests, so that they survive a redirect after a form
//! submission. The [flash_middleware] reads and writes the cookie, endpoint functions and templates
//! only use the [FlashesInterface] of the [HttpRequest].

use actix_web::cookie::Cookie;
use actix_web::http::header::{HeaderValue, SET_COOKIE};
use actix_web::{HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum FlashType {
    Success,
    Error,
}

impl FlashType {
    pub fn css_class(&self) -> &'static str {
        match self {
            FlashType::Success => "alert-success",
            FlashType::Error => "alert-danger",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FlashMessage {
    pub flash_type: FlashType,
    pub message: String,
}

impl FlashMessage {
    pub fn success(message: String) -> Self {
        Self {
            flash_type: FlashType::Success,
            message,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            flash_type: FlashType::Error,
            message,
        }
    }
}

struct Flashes {
    flashes: Vec<FlashMessage>,
    dirty: bool,
}

pub const COOKIE_NAME: &str = "flash";

impl Flashes {
    fn from_cookie(request: &HttpRequest) -> Result<Self, serde_json::Error> {
        let cookie = request.cookie(COOKIE_NAME);
        if let Some(cookie) = cookie {
            Ok(Flashes {
                flashes: serde_json::from_str(cookie.value())?,
                dirty: false,
            })
        } else {
            Ok(Flashes {
                flashes: vec![],
                dirty: false,
            })
        }
    }

    fn into_cookie(self) -> Result<Cookie<'static>, serde_json::Error> {
        let mut result = Cookie::new(COOKIE_NAME, serde_json::to_string(&self.flashes)?);
        result.set_path("/");
        Ok(result)
    }
}

pub trait FlashesInterface {
    fn add_flash_message(&self, flash: FlashMessage);

    fn get_and_clear_flashes(&self) -> Vec<FlashMessage>;
}

impl FlashesInterface for HttpRequest {
    fn add_flash_message(&self, flash: FlashMessage) {
        if let Some(flashes) = self.extensions_mut().get_mut::<Flashes>() {
            flashes.flashes.push(flash);
            flashes.dirty = true;
            return;
        }
        // Must not be within the `if let` statement to avoid panicking of the `extensions` RefCell
        self.extensions_mut().insert(Flashes {
            flashes: vec![flash],
            dirty: true,
        });
    }

    fn get_and_clear_flashes(&self) -> Vec<FlashMessage> {
        self.extensions_mut()
            .get_mut::<Flashes>()
            .map(|flashes| {
                flashes.dirty = true;
                std::mem::take(&mut flashes.flashes)
            })
            .unwrap_or_default()
    }
}

pub async fn flash_middleware(
    req: actix_web::dev::ServiceRequest,
    next: actix_web::middleware::Next<impl actix_web::body::MessageBody>,
) -> Result<actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>, actix_web::Error> {
    // Ignore unparsable flash cookies
    if let Ok(flashes) = Flashes::from_cookie(req.request()) {
        req.extensions_mut().insert(flashes);
    }

    let mut response = next.call(req).await?;

    let flashes = response.request().extensions_mut().remove::<Flashes>();
    if let Some(flashes) = flashes {
        if flashes.dirty {
            let cookie = flashes
                .into_cookie()
                .map_err(actix_web::error::ErrorInternalServerError)?;
            // Flash messages may contain arbitrary user input
            let val = HeaderValue::from_str(&cookie.encoded().to_string())?;
            response.headers_mut().append(SET_COOKIE, val);
        }
    }
    Ok(response)
}
