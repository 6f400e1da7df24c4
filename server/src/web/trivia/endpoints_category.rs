use crate::data_store::{CategoryId, QuestionFilter, StoreError};
use crate::web::trivia::{paginate, PageQuery, TriviaApiError, TriviaState};
use actix_web::{web, Responder};
use trivia_api_types::{CategoriesResponse, CategoryMap, QuestionsResponse};

pub async fn list_categories(
    state: web::Data<TriviaState>,
) -> Result<impl Responder, TriviaApiError> {
    let categories: CategoryMap = web::block(move || -> Result<_, TriviaApiError> {
        let mut store = state.store.get_facade()?;
        Ok(store.get_categories()?)
    })
    .await??
    .into_iter()
    .map(|c| (c.id, c.category_type))
    .collect();

    Ok(web::Json(CategoriesResponse {
        success: true,
        categories,
    }))
}

pub async fn list_questions_of_category(
    path: web::Path<CategoryId>,
    query: web::Query<PageQuery>,
    state: web::Data<TriviaState>,
) -> Result<impl Responder, TriviaApiError> {
    let category_id = path.into_inner();
    let (category, questions) = web::block(move || -> Result<_, TriviaApiError> {
        let mut store = state.store.get_facade()?;
        let category = match store.get_category(category_id) {
            Ok(category) => category,
            Err(StoreError::NotExisting) => {
                return Err(TriviaApiError::Unprocessable(format!(
                    "Category {} does not exist",
                    category_id
                )))
            }
            Err(e) => return Err(e.into()),
        };
        let questions = store.get_questions(QuestionFilter {
            category: Some(category_id),
            ..QuestionFilter::default()
        })?;
        Ok((category, questions))
    })
    .await??;

    let total_questions = questions.len();
    Ok(web::Json(QuestionsResponse {
        success: true,
        questions: paginate(questions, query.page())
            .into_iter()
            .map(|q| q.into())
            .collect(),
        total_questions,
        categories: None,
        current_category: Some(category.category_type),
    }))
}
