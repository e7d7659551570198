//! Tests for the match request handlers.

use super::*;
use crate::domain::ports::{
    MockLoginService, MockMatchRequestCommand, MockMatchRequestQuery, MockSignupService,
};
use crate::domain::{MatchRequestId, Principal, Role, UserId};
use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, test as actix_test};
use rstest::rstest;
use serde_json::Value;
use std::sync::Arc;

const MENTOR: i64 = 3;
const MENTEE: i64 = 9;

fn record(id: i64, status: MatchRequestStatus) -> MatchRequest {
    MatchRequest {
        id: MatchRequestId::new(id).expect("fixture id"),
        mentor_id: UserId::new(MENTOR).expect("fixture mentor"),
        mentee_id: UserId::new(MENTEE).expect("fixture mentee"),
        message: RequestMessage::new("Please mentor me").expect("fixture message"),
        status,
    }
}

fn state(command: MockMatchRequestCommand, query: MockMatchRequestQuery) -> HttpState {
    HttpState::new(
        Arc::new(MockLoginService::new()),
        Arc::new(MockSignupService::new()),
        Arc::new(command),
        Arc::new(query),
    )
}

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(crate::inbound::http::validation::json_config())
        .wrap(test_session_middleware())
        .route(
            "/as/{id}/{role}",
            web::get().to(
                |session: SessionContext, path: web::Path<(i64, String)>| async move {
                    let (id, role) = path.into_inner();
                    let role: Role = role.parse().expect("fixture role");
                    let principal = Principal::new(UserId::new(id).expect("fixture id"), role);
                    session.persist_principal(&principal)?;
                    Ok::<_, Error>(HttpResponse::Ok().finish())
                },
            ),
        )
        .service(web::scope("/api").configure(configure))
}

async fn login_as(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    id: i64,
    role: &str,
) -> Cookie<'static> {
    let res = actix_test::call_service(
        app,
        actix_test::TestRequest::get()
            .uri(&format!("/as/{id}/{role}"))
            .to_request(),
    )
    .await;
    assert!(res.status().is_success());
    session_cookie(&res).expect("session cookie")
}

async fn body_json(response: actix_web::dev::ServiceResponse) -> Value {
    let body = actix_test::read_body(response).await;
    serde_json::from_slice(&body).expect("JSON payload")
}

fn create_body() -> CreateMatchRequestBody {
    CreateMatchRequestBody {
        mentor_id: Some(MENTOR),
        mentee_id: Some(MENTEE),
        message: Some("Please mentor me".into()),
    }
}

#[actix_web::test]
async fn create_returns_the_new_record() {
    let mut command = MockMatchRequestCommand::new();
    command
        .expect_submit()
        .withf(|actor, submission| {
            actor.user_id().get() == MENTEE
                && submission.mentor_id.get() == MENTOR
                && submission.message.as_ref() == "Please mentor me"
        })
        .times(1)
        .returning(|_, _| Ok(record(1, MatchRequestStatus::Pending)));
    let app =
        actix_test::init_service(test_app(state(command, MockMatchRequestQuery::new()))).await;
    let cookie = login_as(&app, MENTEE, "mentee").await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/match-requests")
            .cookie(cookie)
            .set_json(create_body())
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let value = body_json(response).await;
    assert_eq!(
        value,
        serde_json::json!({
            "id": 1,
            "mentorId": MENTOR,
            "menteeId": MENTEE,
            "message": "Please mentor me",
            "status": "pending",
        })
    );
}

#[actix_web::test]
async fn create_requires_a_session() {
    let app = actix_test::init_service(test_app(state(
        MockMatchRequestCommand::new(),
        MockMatchRequestQuery::new(),
    )))
    .await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/match-requests")
            .set_json(create_body())
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let value = body_json(response).await;
    assert_eq!(value["code"], "unauthorized");
    assert_eq!(value["message"], "login required");
}

#[rstest]
#[case(CreateMatchRequestBody { mentor_id: None, ..create_body() }, "mentorId", "missing_field")]
#[case(CreateMatchRequestBody { mentee_id: None, ..create_body() }, "menteeId", "missing_field")]
#[case(CreateMatchRequestBody { message: None, ..create_body() }, "message", "missing_field")]
#[case(CreateMatchRequestBody { mentor_id: Some(0), ..create_body() }, "mentorId", "invalid_id")]
#[case(
    CreateMatchRequestBody { message: Some("   ".into()), ..create_body() },
    "message",
    "empty_message"
)]
#[actix_web::test]
async fn create_validates_the_body(
    #[case] body: CreateMatchRequestBody,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = actix_test::init_service(test_app(state(
        MockMatchRequestCommand::new(),
        MockMatchRequestQuery::new(),
    )))
    .await;
    let cookie = login_as(&app, MENTEE, "mentee").await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/match-requests")
            .cookie(cookie)
            .set_json(body)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value = body_json(response).await;
    assert_eq!(value["code"], "invalid_request");
    assert_eq!(value["details"]["field"], field);
    assert_eq!(value["details"]["code"], code);
}

#[actix_web::test]
async fn create_passes_domain_errors_through() {
    let mut command = MockMatchRequestCommand::new();
    command
        .expect_submit()
        .returning(|_, _| Err(Error::forbidden("Only mentees can send match requests")));
    let app =
        actix_test::init_service(test_app(state(command, MockMatchRequestQuery::new()))).await;
    let cookie = login_as(&app, MENTOR, "mentor").await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/match-requests")
            .cookie(cookie)
            .set_json(create_body())
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let value = body_json(response).await;
    assert_eq!(value["message"], "Only mentees can send match requests");
}

#[actix_web::test]
async fn incoming_lists_full_records() {
    let mut query = MockMatchRequestQuery::new();
    query
        .expect_list_incoming()
        .withf(|actor| actor.role() == Role::Mentor)
        .returning(|_| {
            Ok(vec![
                record(1, MatchRequestStatus::Pending),
                record(2, MatchRequestStatus::Rejected),
            ])
        });
    let app =
        actix_test::init_service(test_app(state(MockMatchRequestCommand::new(), query))).await;
    let cookie = login_as(&app, MENTOR, "mentor").await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/match-requests/incoming")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let value = body_json(response).await;
    let items = value.as_array().expect("array");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["message"], "Please mentor me");
    assert_eq!(items[1]["status"], "rejected");
}

#[actix_web::test]
async fn outgoing_omits_messages() {
    let mut query = MockMatchRequestQuery::new();
    query
        .expect_list_outgoing()
        .returning(|_| Ok(vec![record(4, MatchRequestStatus::Cancelled)]));
    let app =
        actix_test::init_service(test_app(state(MockMatchRequestCommand::new(), query))).await;
    let cookie = login_as(&app, MENTEE, "mentee").await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/match-requests/outgoing")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let value = body_json(response).await;
    assert_eq!(
        value,
        serde_json::json!([{
            "id": 4,
            "mentorId": MENTOR,
            "menteeId": MENTEE,
            "status": "cancelled",
        }])
    );
}

#[rstest]
#[case("accept", Decision::Accept, MatchRequestStatus::Accepted, "accepted")]
#[case("reject", Decision::Reject, MatchRequestStatus::Rejected, "rejected")]
#[actix_web::test]
async fn respond_routes_the_decision(
    #[case] action: &str,
    #[case] decision: Decision,
    #[case] resulting: MatchRequestStatus,
    #[case] rendered: &str,
) {
    let mut command = MockMatchRequestCommand::new();
    command
        .expect_respond()
        .withf(move |_, id, got| id.get() == 5 && *got == decision)
        .times(1)
        .returning(move |_, _, _| Ok(record(5, resulting)));
    let app =
        actix_test::init_service(test_app(state(command, MockMatchRequestQuery::new()))).await;
    let cookie = login_as(&app, MENTOR, "mentor").await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/match-requests/5/{action}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let value = body_json(response).await;
    assert_eq!(value["status"], rendered);
}

#[rstest]
#[case("abc")]
#[case("0")]
#[case("-1")]
#[actix_web::test]
async fn respond_rejects_bad_ids(#[case] raw: &str) {
    let app = actix_test::init_service(test_app(state(
        MockMatchRequestCommand::new(),
        MockMatchRequestQuery::new(),
    )))
    .await;
    let cookie = login_as(&app, MENTOR, "mentor").await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/match-requests/{raw}/accept"))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value = body_json(response).await;
    assert_eq!(value["details"]["code"], "invalid_id");
}

#[actix_web::test]
async fn respond_maps_missing_requests_to_not_found() {
    let mut command = MockMatchRequestCommand::new();
    command
        .expect_respond()
        .returning(|_, _, _| Err(Error::not_found("Match request not found")));
    let app =
        actix_test::init_service(test_app(state(command, MockMatchRequestQuery::new()))).await;
    let cookie = login_as(&app, MENTOR, "mentor").await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/match-requests/77/reject")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn cancel_returns_the_cancelled_record() {
    let mut command = MockMatchRequestCommand::new();
    command
        .expect_cancel()
        .withf(|actor, id| actor.user_id().get() == MENTEE && id.get() == 8)
        .times(1)
        .returning(|_, _| Ok(record(8, MatchRequestStatus::Cancelled)));
    let app =
        actix_test::init_service(test_app(state(command, MockMatchRequestQuery::new()))).await;
    let cookie = login_as(&app, MENTEE, "mentee").await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri("/api/match-requests/8")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let value = body_json(response).await;
    assert_eq!(value["id"], 8);
    assert_eq!(value["status"], "cancelled");
}
