//! Match request HTTP handlers.
//!
//! ```text
//! POST   /api/match-requests              {"mentorId":1,"menteeId":2,"message":"Hi"}
//! GET    /api/match-requests/incoming
//! GET    /api/match-requests/outgoing
//! PUT    /api/match-requests/{id}/accept
//! PUT    /api/match-requests/{id}/reject
//! DELETE /api/match-requests/{id}
//! ```

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::SubmitMatchRequest;
use crate::domain::{
    Decision, Error, MatchRequest, MatchRequestStatus, MatchRequestValidationError, RequestMessage,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_match_request_id, parse_user_id, require};

/// Request body for creating a match request.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMatchRequestBody {
    pub mentor_id: Option<i64>,
    pub mentee_id: Option<i64>,
    pub message: Option<String>,
}

/// Full match request record.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequestResponse {
    pub id: i64,
    pub mentor_id: i64,
    pub mentee_id: i64,
    pub message: String,
    pub status: MatchRequestStatus,
}

impl From<MatchRequest> for MatchRequestResponse {
    fn from(value: MatchRequest) -> Self {
        Self {
            id: value.id.get(),
            mentor_id: value.mentor_id.get(),
            mentee_id: value.mentee_id.get(),
            message: value.message.into(),
            status: value.status,
        }
    }
}

/// Match request as listed to its sender; the message is omitted.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingMatchRequestResponse {
    pub id: i64,
    pub mentor_id: i64,
    pub mentee_id: i64,
    pub status: MatchRequestStatus,
}

impl From<MatchRequest> for OutgoingMatchRequestResponse {
    fn from(value: MatchRequest) -> Self {
        Self {
            id: value.id.get(),
            mentor_id: value.mentor_id.get(),
            mentee_id: value.mentee_id.get(),
            status: value.status,
        }
    }
}

fn map_message_error(err: MatchRequestValidationError) -> Error {
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": "message", "code": "empty_message" }))
}

fn parse_create_body(body: CreateMatchRequestBody) -> Result<SubmitMatchRequest, Error> {
    let mentor_id = require(body.mentor_id, "mentorId")?;
    let mentee_id = require(body.mentee_id, "menteeId")?;
    let message = require(body.message, "message")?;
    Ok(SubmitMatchRequest {
        mentor_id: parse_user_id(mentor_id, "mentorId")?,
        mentee_id: parse_user_id(mentee_id, "menteeId")?,
        message: RequestMessage::new(message).map_err(map_message_error)?,
    })
}

/// Send a match request from the logged-in mentee.
#[utoipa::path(
    post,
    path = "/api/match-requests",
    request_body = CreateMatchRequestBody,
    responses(
        (status = 200, description = "Request created", body = MatchRequestResponse),
        (status = 400, description = "Invalid mentor or pending request exists", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Caller is not the sending mentee", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["match-requests"],
    operation_id = "createMatchRequest"
)]
#[post("/match-requests")]
pub async fn create_match_request(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateMatchRequestBody>,
) -> ApiResult<web::Json<MatchRequestResponse>> {
    let principal = session.require_principal()?;
    let submission = parse_create_body(payload.into_inner())?;
    let created = state.match_requests.submit(&principal, submission).await?;
    Ok(web::Json(created.into()))
}

/// List requests addressed to the logged-in mentor.
#[utoipa::path(
    get,
    path = "/api/match-requests/incoming",
    responses(
        (status = 200, description = "Incoming requests", body = [MatchRequestResponse]),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Caller is not a mentor", body = Error)
    ),
    tags = ["match-requests"],
    operation_id = "listIncomingMatchRequests"
)]
#[get("/match-requests/incoming")]
pub async fn list_incoming(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<MatchRequestResponse>>> {
    let principal = session.require_principal()?;
    let requests = state.match_request_queries.list_incoming(&principal).await?;
    Ok(web::Json(requests.into_iter().map(Into::into).collect()))
}

/// List requests sent by the logged-in mentee.
#[utoipa::path(
    get,
    path = "/api/match-requests/outgoing",
    responses(
        (status = 200, description = "Outgoing requests", body = [OutgoingMatchRequestResponse]),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Caller is not a mentee", body = Error)
    ),
    tags = ["match-requests"],
    operation_id = "listOutgoingMatchRequests"
)]
#[get("/match-requests/outgoing")]
pub async fn list_outgoing(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<OutgoingMatchRequestResponse>>> {
    let principal = session.require_principal()?;
    let requests = state.match_request_queries.list_outgoing(&principal).await?;
    Ok(web::Json(requests.into_iter().map(Into::into).collect()))
}

async fn respond(
    state: &HttpState,
    session: &SessionContext,
    raw_id: &str,
    decision: Decision,
) -> ApiResult<web::Json<MatchRequestResponse>> {
    let principal = session.require_principal()?;
    let id = parse_match_request_id(raw_id)?;
    let updated = state
        .match_requests
        .respond(&principal, id, decision)
        .await?;
    Ok(web::Json(updated.into()))
}

/// Accept a pending request; the mentor's other pending requests are rejected.
#[utoipa::path(
    put,
    path = "/api/match-requests/{id}/accept",
    params(("id" = i64, Path, description = "Match request id")),
    responses(
        (status = 200, description = "Request accepted", body = MatchRequestResponse),
        (status = 400, description = "Invalid id or request no longer pending", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Caller is not a mentor", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["match-requests"],
    operation_id = "acceptMatchRequest"
)]
#[put("/match-requests/{id}/accept")]
pub async fn accept_match_request(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<MatchRequestResponse>> {
    respond(&state, &session, &path, Decision::Accept).await
}

/// Reject a pending request.
#[utoipa::path(
    put,
    path = "/api/match-requests/{id}/reject",
    params(("id" = i64, Path, description = "Match request id")),
    responses(
        (status = 200, description = "Request rejected", body = MatchRequestResponse),
        (status = 400, description = "Invalid id or request no longer pending", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Caller is not a mentor", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["match-requests"],
    operation_id = "rejectMatchRequest"
)]
#[put("/match-requests/{id}/reject")]
pub async fn reject_match_request(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<MatchRequestResponse>> {
    respond(&state, &session, &path, Decision::Reject).await
}

/// Withdraw a pending request sent by the logged-in mentee.
#[utoipa::path(
    delete,
    path = "/api/match-requests/{id}",
    params(("id" = i64, Path, description = "Match request id")),
    responses(
        (status = 200, description = "Request cancelled", body = MatchRequestResponse),
        (status = 400, description = "Invalid id or request no longer pending", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Caller is not a mentee", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["match-requests"],
    operation_id = "cancelMatchRequest"
)]
#[delete("/match-requests/{id}")]
pub async fn cancel_match_request(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<MatchRequestResponse>> {
    let principal = session.require_principal()?;
    let id = parse_match_request_id(&path)?;
    let cancelled = state.match_requests.cancel(&principal, id).await?;
    Ok(web::Json(cancelled.into()))
}

/// Register the match request routes on a scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_match_request)
        .service(list_incoming)
        .service(list_outgoing)
        .service(accept_match_request)
        .service(reject_match_request)
        .service(cancel_match_request);
}

#[cfg(test)]
#[path = "match_requests_tests.rs"]
mod tests;
