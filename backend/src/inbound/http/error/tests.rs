//! Tests for HTTP rendering of domain errors.

use super::*;
use crate::domain::{FieldIssue, IssueKind, ValidationIssues};
use actix_web::{body::to_bytes, http::StatusCode};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[fixture]
fn validation_error() -> Error {
    Error::validation(ValidationIssues::from(vec![FieldIssue::new(
        IssueKind::InvalidString { validation: "email" },
        ["email"],
        "Invalid email",
    )]))
}

async fn render(error: Error) -> (StatusCode, Option<String>, Value) {
    let response = error.error_response();
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("trace header is ascii").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("response body is JSON");
    (status, header, body)
}

#[rstest]
#[case(ErrorCode::InvalidRequest, StatusCode::BAD_REQUEST)]
#[case(ErrorCode::ValidationFailed, StatusCode::BAD_REQUEST)]
#[case(ErrorCode::Conflict, StatusCode::BAD_REQUEST)]
#[case(ErrorCode::NotFound, StatusCode::NOT_FOUND)]
#[case(ErrorCode::ServiceUnavailable, StatusCode::SERVICE_UNAVAILABLE)]
#[case(ErrorCode::InternalError, StatusCode::INTERNAL_SERVER_ERROR)]
fn maps_codes_to_statuses(#[case] code: ErrorCode, #[case] status: StatusCode) {
    assert_eq!(status_for(code), status);
}

#[rstest]
#[actix_web::test]
async fn validation_errors_render_the_issue_array(validation_error: Error) {
    let (status, _, body) = render(validation_error).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!([{
            "code": "invalid_string",
            "validation": "email",
            "path": ["email"],
            "message": "Invalid email"
        }])
    );
}

#[rstest]
#[actix_web::test]
async fn conflicts_render_an_error_object(expected_trace_id: String) {
    let error = Error::conflict("User already exists.").with_trace_id(expected_trace_id.clone());
    let (status, header, body) = render(error).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(header.as_deref(), Some(expected_trace_id.as_str()));
    assert_eq!(body, json!({"error": "User already exists."}));
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(expected_trace_id: String) {
    let error = Error::internal("user repository error: relation missing")
        .with_trace_id(expected_trace_id.clone());
    let (status, header, body) = render(error).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(expected_trace_id.as_str()));
    assert_eq!(body, json!({"error": "Internal server error"}));
}

#[rstest]
#[actix_web::test]
async fn errors_without_trace_id_omit_the_header() {
    let (_, header, body) = render(Error::not_found("User not found")).await;
    assert!(header.is_none());
    assert_eq!(body, json!({"error": "User not found"}));
}

#[rstest]
fn from_actix_error_is_redacted_internal_error() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();
    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
}
