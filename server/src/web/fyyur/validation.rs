use crate::web::fyyur::form_values::{FormValueRepresentation, ValidateFromFormInput};
use chrono::{DateTime, NaiveDateTime, Utc};
use std::fmt::Debug;

#[derive(Default, Debug)]
pub struct NonEmptyString(pub String);

impl NonEmptyString {
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FormValueRepresentation for NonEmptyString {
    fn into_form_value_string(self) -> String {
        self.0
    }
}
impl ValidateFromFormInput for NonEmptyString {
    fn from_form_value(value: &str) -> Result<Self, String> {
        let value = value.trim();
        if value.is_empty() {
            Err("This field is required".to_owned())
        } else {
            Ok(NonEmptyString(value.to_owned()))
        }
    }
}

/// Start time of a show, entered as naive date and time and interpreted as UTC
#[derive(Debug, PartialEq)]
pub struct ShowStartTime(pub DateTime<Utc>);

impl ShowStartTime {
    pub fn into_inner(self) -> DateTime<Utc> {
        self.0
    }
}

/// Accepted input formats, including the format of HTML `datetime-local` inputs
const START_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

impl FormValueRepresentation for ShowStartTime {
    fn into_form_value_string(self) -> String {
        self.0.format("%Y-%m-%dT%H:%M").to_string()
    }
}

impl ValidateFromFormInput for ShowStartTime {
    fn from_form_value(value: &str) -> Result<Self, String> {
        let value = value.trim();
        START_TIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
            .map(|naive| ShowStartTime(naive.and_utc()))
            .ok_or_else(|| "Not a valid date and time (YYYY-MM-DD HH:MM)".to_owned())
    }
}

/// Normalize a comma-separated list of genres: trim the genres and remove empty entries
pub fn normalize_genres(genres: &str) -> String {
    genres
        .split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}
