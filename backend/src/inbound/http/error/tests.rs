//! Tests for HTTP error mapping.

use super::*;
use crate::domain::{ApiDraft, Error};
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[fixture]
fn internal_error_case(expected_trace_id: String) -> Error {
    Error::internal("boom")
        .with_trace_id(expected_trace_id)
        .with_details(json!({"secret": "x"}))
}

#[fixture]
fn not_found_case(expected_trace_id: String) -> Error {
    Error::not_found("api entry 4 not found")
        .with_trace_id(expected_trace_id)
        .with_details(json!({"id": 4}))
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::service_unavailable("db down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

async fn assert_error_response(
    error: Error,
    expected_status: StatusCode,
    expected_trace_id: Option<&str>,
) -> Value {
    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), expected_status);

    let header = response.headers().get(TRACE_ID_HEADER);
    match expected_trace_id {
        Some(expected) => {
            let trace_id = header
                .expect("trace-id header is set by error_response")
                .to_str()
                .expect("trace-id not valid UTF-8");
            assert_eq!(trace_id, expected);
        }
        None => assert!(header.is_none(), "trace-id header should not be present"),
    }

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");

    serde_json::from_slice(&bytes).expect("error body is JSON")
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_trace_id(
    #[from(internal_error_case)] internal_error: Error,
    expected_trace_id: String,
) {
    let redacted = assert_error_response(
        internal_error,
        StatusCode::INTERNAL_SERVER_ERROR,
        Some(expected_trace_id.as_str()),
    )
    .await;

    assert_eq!(
        redacted,
        json!({
            "code": "internal_error",
            "message": "Internal server error",
            "traceId": TRACE_ID,
        })
    );
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_their_payload(
    #[from(not_found_case)] not_found: Error,
    expected_trace_id: String,
) {
    let payload = assert_error_response(
        not_found,
        StatusCode::NOT_FOUND,
        Some(expected_trace_id.as_str()),
    )
    .await;

    assert_eq!(
        payload,
        json!({
            "code": "not_found",
            "message": "api entry 4 not found",
            "traceId": TRACE_ID,
            "details": {"id": 4},
        })
    );
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let error = Error::invalid_request("bad").with_details(json!({"field": "api"}));

    let payload = assert_error_response(error, StatusCode::BAD_REQUEST, None).await;
    assert_eq!(payload["code"], json!("invalid_request"));
    assert!(payload.get("traceId").is_none());
}

#[rstest]
fn redaction_leaves_client_errors_untouched() {
    let error = Error::invalid_request("bad").with_trace_id(TRACE_ID);

    assert_eq!(redact_if_internal(&error), error);
}

#[rstest]
#[actix_web::test]
async fn validation_failures_render_as_missing_parameter_body() {
    let failure = ApiDraft {
        name: Some("petstore".to_owned()),
        ..ApiDraft::default()
    }
    .validate()
    .expect_err("draft is incomplete");

    let response = ResponseError::error_response(&failure);
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body()).await.expect("body reads");
    let body: Value = serde_json::from_slice(&bytes).expect("json body");
    assert_eq!(
        body,
        json!({
            "type": "MISSING_PARAMETER",
            "message": "Required parameters are missing : version, specificationType",
        })
    );
}

#[test]
fn from_actix_error_is_redacted_internal_error() {
    use actix_web::error;

    let actix_err = error::ErrorBadRequest("boom");
    let err: Error = actix_err.into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.trace_id(), None);
    assert_eq!(err.details(), None);
}
