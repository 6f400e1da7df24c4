//! JSON data types of the Trivia API, shared between the server and API clients.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Question {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub category: i32,
    pub difficulty: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Category {
    pub id: i32,
    #[serde(rename = "type")]
    pub category_type: String,
}

/// Mapping of category id to its display label, as used in several responses
pub type CategoryMap = BTreeMap<i32, String>;

/// Request body for creating a question.
///
/// All fields are optional on the wire, so that missing keys can be reported as a "bad request"
/// by the endpoint instead of a generic deserialization error.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct NewQuestion {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub category: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub difficulty: Option<i32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct SearchRequest {
    #[serde(default, rename = "searchTerm")]
    pub search_term: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct QuizCategory {
    /// Category id or 0 for "all categories"
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i32,
    #[serde(default, rename = "type")]
    pub category_type: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct QuizRequest {
    #[serde(default)]
    pub previous_questions: Option<Vec<i32>>,
    #[serde(default)]
    pub quiz_category: Option<QuizCategory>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: CategoryMap,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct QuestionsResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<CategoryMap>,
    pub current_category: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct QuestionCreatedResponse {
    pub success: bool,
    pub created: i32,
    pub question: Question,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct QuestionDeletedResponse {
    pub success: bool,
    pub deleted: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct QuizResponse {
    pub success: bool,
    /// The next quiz question or `None` if all questions of the category have been played
    pub question: Option<Question>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: u16,
    pub message: String,
}

/// Integer values sent by web frontends, which may arrive as JSON numbers or as strings taken from
/// HTML form inputs.
#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(i32),
    String(String),
}

impl IntOrString {
    fn into_optional_int<E: serde::de::Error>(self) -> Result<Option<i32>, E> {
        match self {
            IntOrString::Int(i) => Ok(Some(i)),
            IntOrString::String(s) if s.trim().is_empty() => Ok(None),
            IntOrString::String(s) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| E::custom(format!("not an integer: \"{}\"", s))),
        }
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    IntOrString::deserialize(deserializer)?
        .into_optional_int()?
        .ok_or_else(|| serde::de::Error::custom("empty id"))
}

fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<IntOrString>::deserialize(deserializer)? {
        Some(value) => value.into_optional_int(),
        None => Ok(None),
    }
}
