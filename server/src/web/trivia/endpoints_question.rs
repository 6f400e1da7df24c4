use crate::data_store::{models, QuestionFilter, QuestionId, StoreError};
use crate::web::trivia::{paginate, PageQuery, TriviaApiError, TriviaState};
use actix_web::{web, HttpResponse, Responder};
use trivia_api_types::{
    CategoryMap, NewQuestion, QuestionCreatedResponse, QuestionDeletedResponse, QuestionsResponse,
    SearchRequest,
};

pub async fn list_questions(
    query: web::Query<PageQuery>,
    state: web::Data<TriviaState>,
) -> Result<impl Responder, TriviaApiError> {
    let (categories, questions) = web::block(move || -> Result<_, TriviaApiError> {
        let mut store = state.store.get_facade()?;
        let categories: CategoryMap = store
            .get_categories()?
            .into_iter()
            .map(|c| (c.id, c.category_type))
            .collect();
        let questions = store.get_questions(QuestionFilter::default())?;
        Ok((categories, questions))
    })
    .await??;

    let total_questions = questions.len();
    let questions = paginate(questions, query.page());
    if questions.is_empty() {
        return Err(TriviaApiError::NotFound);
    }
    Ok(web::Json(QuestionsResponse {
        success: true,
        questions: questions.into_iter().map(|q| q.into()).collect(),
        total_questions,
        categories: Some(categories),
        current_category: None,
    }))
}

pub async fn delete_question(
    path: web::Path<QuestionId>,
    state: web::Data<TriviaState>,
) -> Result<impl Responder, TriviaApiError> {
    let question_id = path.into_inner();
    web::block(move || -> Result<_, TriviaApiError> {
        let mut store = state.store.get_facade()?;
        store.delete_question(question_id)?;
        Ok(())
    })
    .await??;

    Ok(web::Json(QuestionDeletedResponse {
        success: true,
        deleted: question_id,
    }))
}

pub async fn create_question(
    data: web::Json<NewQuestion>,
    state: web::Data<TriviaState>,
) -> Result<impl Responder, TriviaApiError> {
    let question = validate_new_question(data.into_inner())?;
    let question = web::block(move || -> Result<_, TriviaApiError> {
        let mut store = state.store.get_facade()?;
        if let Err(e) = store.get_category(question.category) {
            return Err(match e {
                StoreError::NotExisting => TriviaApiError::Unprocessable(format!(
                    "Category {} does not exist",
                    question.category
                )),
                e => e.into(),
            });
        }
        Ok(store.create_question(question)?)
    })
    .await??;

    Ok(HttpResponse::Created().json(QuestionCreatedResponse {
        success: true,
        created: question.id,
        question: question.into(),
    }))
}

/// Check the presence of all fields (400 otherwise) and their content (422 otherwise) and convert
/// the request into a database model.
fn validate_new_question(data: NewQuestion) -> Result<models::NewQuestion, TriviaApiError> {
    let question = data.question.ok_or(TriviaApiError::MissingField("question"))?;
    let answer = data.answer.ok_or(TriviaApiError::MissingField("answer"))?;
    let category = data.category.ok_or(TriviaApiError::MissingField("category"))?;
    let difficulty = data
        .difficulty
        .ok_or(TriviaApiError::MissingField("difficulty"))?;

    if question.trim().is_empty() {
        return Err(TriviaApiError::Unprocessable(
            "Question text must not be empty".to_owned(),
        ));
    }
    if answer.trim().is_empty() {
        return Err(TriviaApiError::Unprocessable(
            "Answer must not be empty".to_owned(),
        ));
    }
    if difficulty < 1 {
        return Err(TriviaApiError::Unprocessable(format!(
            "Invalid difficulty {}",
            difficulty
        )));
    }
    Ok(models::NewQuestion {
        question,
        answer,
        category,
        difficulty,
    })
}

pub async fn search_questions(
    data: web::Json<SearchRequest>,
    query: web::Query<PageQuery>,
    state: web::Data<TriviaState>,
) -> Result<impl Responder, TriviaApiError> {
    let search_term = data.into_inner().search_term.unwrap_or_default();
    if search_term.is_empty() {
        return Err(TriviaApiError::Unprocessable(
            "Search term must not be empty".to_owned(),
        ));
    }
    let questions = web::block(move || -> Result<_, TriviaApiError> {
        let mut store = state.store.get_facade()?;
        Ok(store.get_questions(QuestionFilter {
            search_term: Some(search_term),
            ..QuestionFilter::default()
        })?)
    })
    .await??;

    if questions.is_empty() {
        return Err(TriviaApiError::NotFound);
    }
    let total_questions = questions.len();
    Ok(web::Json(QuestionsResponse {
        success: true,
        questions: paginate(questions, query.page())
            .into_iter()
            .map(|q| q.into())
            .collect(),
        total_questions,
        categories: None,
        current_category: None,
    }))
}
