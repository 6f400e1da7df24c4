
use super::*;
use crate::data_store::store_mock::StoreMock;
use actix_web::{http, test, web, App};
use serde_json::json;
use trivia_api_types::{
    CategoriesResponse, ErrorResponse, QuestionCreatedResponse, QuestionDeletedResponse,
    QuestionsResponse, QuizResponse,
};

fn create_sample_state() -> (Arc<StoreMock>, TriviaState) {
    let data_store_mock = Arc::new(StoreMock::default());
    sample_data::fill_sample_data(&data_store_mock);
    let state = TriviaState {
        store: data_store_mock.clone(),
    };
    (data_store_mock, state)
}

#[actix_web::test]
async fn test_list_categories() {
    let (_store, state) = create_sample_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;
    let req = test::TestRequest::get().uri("/categories").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    assert_eq!(
        res.headers().get("Access-Control-Allow-Origin").unwrap(),
        "*"
    );
    let result: CategoriesResponse = test::read_body_json(res).await;
    assert!(result.success);
    assert_eq!(result.categories.len(), 6);
    assert_eq!(result.categories[&1], "Science");
    assert_eq!(result.categories[&6], "Sports");
}

#[actix_web::test]
async fn test_list_questions_paginated() {
    let (_store, state) = create_sample_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;

    let req = test::TestRequest::get().uri("/questions").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let result: QuestionsResponse = test::read_body_json(res).await;
    assert!(result.success);
    assert_eq!(result.questions.len(), 10);
    assert_eq!(result.total_questions, 19);
    assert_eq!(result.categories.unwrap().len(), 6);
    assert_eq!(result.current_category, None);
    assert_eq!(result.questions[0].id, 2);

    let req = test::TestRequest::get()
        .uri("/questions?page=2")
        .to_request();
    let result: QuestionsResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(result.questions.len(), 9);
    assert_eq!(result.total_questions, 19);

    let req = test::TestRequest::get()
        .uri("/questions?page=3")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::NOT_FOUND);
    let result: ErrorResponse = test::read_body_json(res).await;
    assert!(!result.success);
    assert_eq!(result.error, 404);
    assert_eq!(result.message, "Resource not found");

    let req = test::TestRequest::get()
        .uri("/questions?page=abc")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_delete_question() {
    let (store, state) = create_sample_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;

    let req = test::TestRequest::delete().uri("/questions/5").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let result: QuestionDeletedResponse = test::read_body_json(res).await;
    assert_eq!(result.deleted, 5);
    assert_eq!(store.data.lock().unwrap().questions.len(), 18);

    let req = test::TestRequest::delete().uri("/questions/5").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri("/questions/five")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_create_question() {
    let (store, state) = create_sample_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/questions")
        .set_json(json!({
            "question": "Which planet is known as the red planet?",
            "answer": "Mars",
            "category": "1",
            "difficulty": 1
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::CREATED);
    let result: QuestionCreatedResponse = test::read_body_json(res).await;
    assert!(result.success);
    assert_eq!(result.created, 24);
    assert_eq!(result.question.answer, "Mars");
    assert_eq!(result.question.category, 1);
    assert_eq!(store.data.lock().unwrap().questions.len(), 20);
}

#[actix_web::test]
async fn test_create_invalid_question() {
    let (store, state) = create_sample_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;

    let cases = [
        (
            json!({"question": "Q?", "category": 1, "difficulty": 1}),
            http::StatusCode::BAD_REQUEST,
        ),
        (
            json!({"question": "Q?", "answer": "A", "category": 1, "difficulty": null}),
            http::StatusCode::BAD_REQUEST,
        ),
        (json!("Q?"), http::StatusCode::BAD_REQUEST),
        (
            json!({"question": "", "answer": "A", "category": 1, "difficulty": 1}),
            http::StatusCode::UNPROCESSABLE_ENTITY,
        ),
        (
            json!({"question": "Q?", "answer": "A", "category": 1, "difficulty": 0}),
            http::StatusCode::UNPROCESSABLE_ENTITY,
        ),
        (
            json!({"question": "Q?", "answer": "A", "category": 1000, "difficulty": 1}),
            http::StatusCode::UNPROCESSABLE_ENTITY,
        ),
    ];
    for (body, expected_status) in cases {
        let req = test::TestRequest::post()
            .uri("/questions")
            .set_json(&body)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), expected_status, "request body: {}", body);
        let result: ErrorResponse = test::read_body_json(res).await;
        assert!(!result.success);
        assert_eq!(result.error, expected_status.as_u16());
    }

    let req = test::TestRequest::post()
        .uri("/questions")
        .insert_header(http::header::ContentType::json())
        .set_payload("{\"question\": ")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::BAD_REQUEST);

    assert_eq!(store.data.lock().unwrap().questions.len(), 19);
}

#[actix_web::test]
async fn test_search_questions() {
    let (_store, state) = create_sample_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/questions/search")
        .set_json(json!({"searchTerm": "WHO"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let result: QuestionsResponse = test::read_body_json(res).await;
    assert_eq!(
        result.questions.iter().map(|q| q.id).collect::<Vec<_>>(),
        vec![5, 12, 21]
    );
    assert_eq!(result.total_questions, 3);
    assert_eq!(result.current_category, None);

    let req = test::TestRequest::post()
        .uri("/questions/search")
        .set_json(json!({"searchTerm": "quantum"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/questions/search")
        .set_json(json!({"searchTerm": ""}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::UNPROCESSABLE_ENTITY);
    let result: ErrorResponse = test::read_body_json(res).await;
    assert_eq!(result.message, "Unprocessable entity");
}

#[actix_web::test]
async fn test_questions_of_category() {
    let (_store, state) = create_sample_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/categories/2/questions")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let result: QuestionsResponse = test::read_body_json(res).await;
    assert_eq!(result.questions.len(), 4);
    assert!(result.questions.iter().all(|q| q.category == 2));
    assert_eq!(result.total_questions, 4);
    assert_eq!(result.current_category.as_deref(), Some("Art"));

    let req = test::TestRequest::get()
        .uri("/categories/1000/questions")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn test_quiz() {
    let (_store, state) = create_sample_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;

    for _ in 0..10 {
        let req = test::TestRequest::post()
            .uri("/quizzes")
            .set_json(json!({
                "previous_questions": [5, 9],
                "quiz_category": {"type": "History", "id": 4}
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), http::StatusCode::OK);
        let result: QuizResponse = test::read_body_json(res).await;
        let question = result.question.unwrap();
        assert!(question.id == 12 || question.id == 23);
        assert_eq!(question.category, 4);
    }

    let req = test::TestRequest::post()
        .uri("/quizzes")
        .set_json(json!({
            "previous_questions": [5, 9, 12, 23],
            "quiz_category": {"type": "History", "id": 4}
        }))
        .to_request();
    let result: QuizResponse = test::call_and_read_body_json(&app, req).await;
    assert!(result.success);
    assert!(result.question.is_none());

    let req = test::TestRequest::post()
        .uri("/quizzes")
        .set_json(json!({
            "previous_questions": [],
            "quiz_category": {"type": "click", "id": 0}
        }))
        .to_request();
    let result: QuizResponse = test::call_and_read_body_json(&app, req).await;
    assert!(result.question.is_some());
}

#[actix_web::test]
async fn test_invalid_quiz_requests() {
    let (_store, state) = create_sample_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/quizzes")
        .set_json(json!({"previous_questions": []}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/quizzes")
        .set_json(json!({"quiz_category": {"type": "Art", "id": 2}}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/quizzes")
        .set_json(json!({
            "previous_questions": [],
            "quiz_category": {"type": "Unknown", "id": 99}
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn test_routing_errors_and_cors() {
    let (_store, state) = create_sample_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;

    let req = test::TestRequest::get().uri("/unknown").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::NOT_FOUND);
    assert_eq!(
        res.headers().get("Access-Control-Allow-Origin").unwrap(),
        "*"
    );
    let result: ErrorResponse = test::read_body_json(res).await;
    assert_eq!(result.error, 404);

    let req = test::TestRequest::put().uri("/questions").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::METHOD_NOT_ALLOWED);
    let result: ErrorResponse = test::read_body_json(res).await;
    assert_eq!(result.message, "Method not allowed");

    let req = test::TestRequest::default()
        .method(http::Method::OPTIONS)
        .uri("/questions")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::NO_CONTENT);
    assert_eq!(
        res.headers().get("Access-Control-Allow-Methods").unwrap(),
        "GET, POST, PATCH, DELETE, OPTIONS"
    );
}

#[actix_web::test]
async fn test_cors_headers_on_all_responses() {
    let (_store, state) = create_sample_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;

    let requests = vec![
        (
            test::TestRequest::get().uri("/questions?page=2"),
            http::StatusCode::OK,
        ),
        (
            test::TestRequest::post()
                .uri("/questions")
                .set_payload("not json"),
            http::StatusCode::BAD_REQUEST,
        ),
        (
            test::TestRequest::get().uri("/categories/999/questions"),
            http::StatusCode::UNPROCESSABLE_ENTITY,
        ),
        (
            test::TestRequest::delete().uri("/questions/999"),
            http::StatusCode::NOT_FOUND,
        ),
        (
            test::TestRequest::get().uri("/quizzes"),
            http::StatusCode::METHOD_NOT_ALLOWED,
        ),
        (
            test::TestRequest::default()
                .method(http::Method::OPTIONS)
                .uri("/no/such/path"),
            http::StatusCode::NO_CONTENT,
        ),
    ];
    for (req, expected_status) in requests {
        let res = test::call_service(&app, req.to_request()).await;
        assert_eq!(res.status(), expected_status);
        let headers = res.headers();
        assert_eq!(headers.get("Access-Control-Allow-Origin").unwrap(), "*");
        assert_eq!(
            headers.get("Access-Control-Allow-Headers").unwrap(),
            "Content-Type, Authorization"
        );
        assert_eq!(
            headers.get("Access-Control-Allow-Methods").unwrap(),
            "GET, POST, PATCH, DELETE, OPTIONS"
        );
    }
}

#[actix_web::test]
async fn test_database_error() {
    let (store, state) = create_sample_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;

    store.data.lock().unwrap().next_error =
        Some(StoreError::ConnectionError("connection refused".to_owned()));
    let req = test::TestRequest::get().uri("/categories").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::INTERNAL_SERVER_ERROR);
    let result: ErrorResponse = test::read_body_json(res).await;
    assert_eq!(result.message, "An error has occured, please try again");
}
