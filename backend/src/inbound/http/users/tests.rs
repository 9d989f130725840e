//! Handler tests for the users endpoints.

use std::sync::Arc;

use actix_web::{App, http::StatusCode, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use crate::Trace;
use crate::domain::ports::{MockUsersCommand, MockUsersQuery, UsersCommand, UsersQuery};
use crate::domain::{Error, TRACE_ID_HEADER};
use crate::inbound::http::api_scope;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::inbound::http::test_utils::in_memory_state;

macro_rules! init_app {
    ($state:expr) => {
        actix_test::init_service(App::new().app_data($state).wrap(Trace).service(api_scope()))
            .await
    };
}

macro_rules! create {
    ($app:expr, $body:expr) => {{
        let request = actix_test::TestRequest::post()
            .uri("/api/users")
            .set_json($body)
            .to_request();
        let response = actix_test::call_service(&$app, request).await;
        let status = response.status();
        let body: Value = actix_test::read_body_json(response).await;
        (status, body)
    }};
}

fn ada() -> Value {
    json!({"name": "Ada Lovelace", "email": "ada@example.com"})
}

#[rstest]
#[actix_web::test]
async fn create_returns_201_with_store_assigned_id() {
    let app = init_app!(in_memory_state());
    let (status, body) = create!(app, ada());

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], json!(1));
    assert_eq!(body["name"], json!("Ada Lovelace"));
    assert_eq!(body["email"], json!("ada@example.com"));
}

#[rstest]
#[actix_web::test]
async fn create_reports_every_issue() {
    let app = init_app!(in_memory_state());
    let (status, body) = create!(app, json!({"name": "Al", "email": "nope"}));

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let issues = body.as_array().expect("issue array");
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0]["code"], json!("too_small"));
    assert_eq!(issues[0]["path"], json!(["name"]));
    assert_eq!(issues[1]["code"], json!("invalid_string"));
    assert_eq!(issues[1]["validation"], json!("email"));
}

#[rstest]
#[actix_web::test]
async fn integral_float_followers_are_stored_as_integers() {
    let app = init_app!(in_memory_state());
    let (status, body) = create!(
        app,
        json!({"name": "Ada Lovelace", "email": "ada@example.com", "followers": 1.0})
    );

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["followers"], json!(1));
}

#[rstest]
#[actix_web::test]
async fn oversized_followers_are_reported_at_the_field() {
    let app = init_app!(in_memory_state());
    let (status, body) = create!(
        app,
        json!({"name": "Ada Lovelace", "email": "ada@example.com", "followers": 1e19})
    );

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let issues = body.as_array().expect("issue array");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0]["code"], json!("too_big"));
    assert_eq!(issues[0]["path"], json!(["followers"]));
}

#[rstest]
#[actix_web::test]
async fn duplicate_email_is_rejected() {
    let app = init_app!(in_memory_state());
    let (first, _) = create!(app, ada());
    let (second, body) = create!(app, ada());

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "User already exists."}));
}

#[rstest]
#[actix_web::test]
async fn malformed_json_is_an_error_object() {
    let app = init_app!(in_memory_state());
    let request = actix_test::TestRequest::post()
        .uri("/api/users")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"name\":")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().contains_key(TRACE_ID_HEADER));
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!({"error": "request body must be valid JSON"}));
}

#[rstest]
#[case::fetch("GET", "User not found")]
#[case::delete("DELETE", "The user does not exist.")]
#[actix_web::test]
async fn unknown_ids_are_not_found(#[case] method: &str, #[case] message: &str) {
    let app = init_app!(in_memory_state());
    for uri in ["/api/users/42", "/api/users/abc"] {
        let request = actix_test::TestRequest::default()
            .method(method.parse().expect("http method"))
            .uri(uri)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{method} {uri}");
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body, json!({"error": message}));
    }
}

#[rstest]
#[actix_web::test]
async fn update_replaces_name_and_email() {
    let app = init_app!(in_memory_state());
    let _ = create!(app, ada());

    let request = actix_test::TestRequest::put()
        .uri("/api/users/1")
        .set_json(json!({"name": "Augusta", "email": "augusta@example.com"}))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, request).await;
    assert_eq!(body["id"], json!(1));
    assert_eq!(body["name"], json!("Augusta"));

    let request = actix_test::TestRequest::get().uri("/api/users/1").to_request();
    let fetched: Value = actix_test::call_and_read_body_json(&app, request).await;
    assert_eq!(fetched["email"], json!("augusta@example.com"));
}

#[rstest]
#[actix_web::test]
async fn invalid_update_leaves_the_store_untouched() {
    let app = init_app!(in_memory_state());
    let _ = create!(app, ada());

    let request = actix_test::TestRequest::put()
        .uri("/api/users/1")
        .set_json(json!({"name": ""}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let issues: Value = actix_test::read_body_json(response).await;
    assert_eq!(issues[1]["message"], json!("Required"));
    assert_eq!(issues[1]["path"], json!(["email"]));

    let request = actix_test::TestRequest::get().uri("/api/users/1").to_request();
    let fetched: Value = actix_test::call_and_read_body_json(&app, request).await;
    assert_eq!(fetched["name"], json!("Ada Lovelace"));
}

#[rstest]
#[actix_web::test]
async fn delete_returns_the_removed_user_once() {
    let app = init_app!(in_memory_state());
    let _ = create!(app, ada());

    let request = actix_test::TestRequest::delete().uri("/api/users/1").to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["email"], json!("ada@example.com"));

    let request = actix_test::TestRequest::delete().uri("/api/users/1").to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn list_sorts_by_requested_field() {
    let app = init_app!(in_memory_state());
    let _ = create!(app, json!({"name": "Zed", "email": "a@example.com"}));
    let _ = create!(app, json!({"name": "Amy", "email": "z@example.com"}));

    let request = actix_test::TestRequest::get()
        .uri("/api/users?sortOrder=name")
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, request).await;
    let names: Vec<&str> = body
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|user| user["name"].as_str())
        .collect();
    assert_eq!(names, ["Amy", "Zed"]);
}

#[rstest]
#[actix_web::test]
async fn unknown_sort_order_is_rejected() {
    let app = init_app!(in_memory_state());
    let request = actix_test::TestRequest::get()
        .uri("/api/users?sortOrder=age")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn store_outage_surfaces_as_503() {
    let mut query = MockUsersQuery::new();
    query
        .expect_list_users()
        .times(1)
        .return_once(|_| Err(Error::service_unavailable("database connection refused")));
    let fallback = in_memory_state();
    let users: Arc<dyn UsersCommand> = Arc::new(MockUsersCommand::new());
    let users_query: Arc<dyn UsersQuery> = Arc::new(query);
    let state = web::Data::new(HttpState::new(HttpStatePorts {
        users,
        users_query,
        products: fallback.products.clone(),
        products_query: fallback.products_query.clone(),
    }));
    let app = init_app!(state);

    let request = actix_test::TestRequest::get().uri("/api/users").to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!({"error": "database connection refused"}));
}
