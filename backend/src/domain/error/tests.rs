//! Tests for the domain error payload.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn trace_id() -> TraceId {
    TRACE_ID.parse().expect("fixture trace id is a valid UUID")
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("who"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("no"), ErrorCode::Forbidden)]
#[case(Error::not_found("gone"), ErrorCode::NotFound)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_blank_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
}

#[rstest]
fn new_substitutes_fallback_for_blank_message() {
    let error = Error::new(ErrorCode::NotFound, "");
    assert_eq!(error.message(), "not found");
}

#[rstest]
fn try_with_trace_id_rejects_blank_values() {
    let result = Error::internal("boom").try_with_trace_id(" ");
    assert_eq!(result, Err(ErrorValidationError::EmptyTraceId));
}

#[rstest]
fn no_trace_id_outside_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn captures_trace_id_in_scope(trace_id: TraceId) {
    let error = TraceId::scope(trace_id, async { Error::forbidden("no") }).await;
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn serialises_camel_case_and_skips_empty_fields() {
    let value = serde_json::to_value(Error::not_found("Match request not found"))
        .expect("serialise error");
    assert_eq!(
        value,
        json!({ "code": "not_found", "message": "Match request not found" })
    );
}

#[rstest]
fn serialises_trace_and_details() {
    let error = Error::invalid_request("Mentor not found")
        .with_trace_id(TRACE_ID)
        .with_details(json!({ "code": "invalid_mentor" }));
    let value = serde_json::to_value(error).expect("serialise error");
    assert_eq!(value["traceId"], json!(TRACE_ID));
    assert_eq!(value["details"]["code"], json!("invalid_mentor"));
}

#[rstest]
#[tokio::test]
async fn decoding_ignores_ambient_trace(trace_id: TraceId) {
    let payload = json!({ "code": "forbidden", "message": "no" });
    let decoded: Error = TraceId::scope(trace_id, async move {
        serde_json::from_value(payload).expect("decode error")
    })
    .await;
    assert!(decoded.trace_id().is_none());
}

#[rstest]
fn decoding_rejects_blank_message() {
    let payload = json!({ "code": "forbidden", "message": "  " });
    assert!(serde_json::from_value::<Error>(payload).is_err());
}
