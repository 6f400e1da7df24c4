use crate::data_store::{models, QuestionFilter, StoreError};
use crate::web::trivia::{TriviaApiError, TriviaState};
use actix_web::{web, Responder};
use rand::seq::IndexedRandom;
use trivia_api_types::{QuizRequest, QuizResponse};

/// Category id in quiz requests, which selects questions of all categories
const ALL_CATEGORIES: i32 = 0;

pub async fn next_quiz_question(
    data: web::Json<QuizRequest>,
    state: web::Data<TriviaState>,
) -> Result<impl Responder, TriviaApiError> {
    let data = data.into_inner();
    let previous_questions = data
        .previous_questions
        .ok_or(TriviaApiError::MissingField("previous_questions"))?;
    let quiz_category = data
        .quiz_category
        .ok_or(TriviaApiError::MissingField("quiz_category"))?;

    let candidates = web::block(move || -> Result<_, TriviaApiError> {
        let mut store = state.store.get_facade()?;
        let category = if quiz_category.id == ALL_CATEGORIES {
            None
        } else {
            match store.get_category(quiz_category.id) {
                Ok(category) => Some(category.id),
                Err(StoreError::NotExisting) => {
                    return Err(TriviaApiError::Unprocessable(format!(
                        "Category {} does not exist",
                        quiz_category.id
                    )))
                }
                Err(e) => return Err(e.into()),
            }
        };
        Ok(store.get_questions(QuestionFilter {
            category,
            search_term: None,
            excluded_ids: previous_questions,
        })?)
    })
    .await??;

    Ok(web::Json(QuizResponse {
        success: true,
        question: choose_question(&candidates).map(|q| q.into()),
    }))
}

/// Pick one of the remaining questions uniformly at random or `None` if there are none left.
fn choose_question(candidates: &[models::Question]) -> Option<models::Question> {
    candidates.choose(&mut rand::rng()).cloned()
}
