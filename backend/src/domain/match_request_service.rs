//! Match request domain service.
//!
//! Implements the lifecycle driving ports on top of the repository ports.
//! Authorization happens here, before any store access, through the
//! [`Principal`] guards. Repository outcomes are turned into specific,
//! user-facing errors.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    MatchRequestCommand, MatchRequestQuery, MatchRequestRepository, MatchRequestRepositoryError,
    SubmitMatchRequest, UserPersistenceError, UserRepository,
};
use crate::domain::{
    Decision, Error, MatchRequest, MatchRequestId, MatchRequestStatus, NewMatchRequest, Principal,
    UserId,
};

pub(crate) const ONLY_MENTEES_SEND: &str = "Only mentees can send match requests";
pub(crate) const ONLY_FOR_YOURSELF: &str = "Can only send requests for yourself";
pub(crate) const MENTOR_NOT_FOUND: &str = "Mentor not found";
pub(crate) const PENDING_REQUEST_EXISTS: &str = "You already have a pending request. Please wait for a response or cancel it before sending a new request.";
pub(crate) const MENTOR_REQUEST_PENDING: &str = "You have already sent a request to this mentor.";
pub(crate) const ONLY_MENTORS_INCOMING: &str = "Only mentors can view incoming requests";
pub(crate) const ONLY_MENTEES_OUTGOING: &str = "Only mentees can view outgoing requests";
pub(crate) const ONLY_MENTORS_ACCEPT: &str = "Only mentors can accept requests";
pub(crate) const ONLY_MENTORS_REJECT: &str = "Only mentors can reject requests";
pub(crate) const ONLY_MENTEES_CANCEL: &str = "Only mentees can cancel requests";
pub(crate) const REQUEST_NOT_FOUND: &str = "Match request not found";
pub(crate) const REQUEST_NOT_PENDING: &str = "Match request is no longer pending";
pub(crate) const MENTOR_ALREADY_MATCHED: &str = "You have already accepted a match request";

/// Match request service implementing the lifecycle driving ports.
#[derive(Clone)]
pub struct MatchRequestService<R, U> {
    requests: Arc<R>,
    users: Arc<U>,
}

impl<R, U> MatchRequestService<R, U> {
    /// Create a new service over the request store and user directory.
    pub fn new(requests: Arc<R>, users: Arc<U>) -> Self {
        Self { requests, users }
    }
}

fn map_request_error(error: MatchRequestRepositoryError) -> Error {
    match error {
        MatchRequestRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("match request repository unavailable: {message}"))
        }
        MatchRequestRepositoryError::Query { message } => {
            Error::internal(format!("match request repository error: {message}"))
        }
        MatchRequestRepositoryError::DuplicatePending => {
            Error::invalid_request(PENDING_REQUEST_EXISTS)
                .with_details(json!({ "code": "pending_request_exists" }))
        }
        MatchRequestRepositoryError::MentorAlreadyMatched => {
            Error::invalid_request(MENTOR_ALREADY_MATCHED)
                .with_details(json!({ "code": "mentor_already_matched" }))
        }
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail => {
            Error::internal("unexpected duplicate email during directory lookup")
        }
    }
}

fn duplicate_error(same_mentor: bool) -> Error {
    if same_mentor {
        Error::invalid_request(MENTOR_REQUEST_PENDING)
            .with_details(json!({ "code": "mentor_request_pending" }))
    } else {
        Error::invalid_request(PENDING_REQUEST_EXISTS)
            .with_details(json!({ "code": "pending_request_exists" }))
    }
}

/// Resolve a transition result: `None` means the caller does not own the
/// request, and a status other than `expected` means it was already final.
fn transition_outcome(
    found: Option<MatchRequest>,
    expected: MatchRequestStatus,
) -> Result<MatchRequest, Error> {
    match found {
        None => Err(Error::not_found(REQUEST_NOT_FOUND)),
        Some(request) if request.status == expected => Ok(request),
        Some(request) => {
            debug!(
                request_id = %request.id,
                status = %request.status,
                wanted = %expected,
                "transition refused on terminal request"
            );
            Err(Error::invalid_request(REQUEST_NOT_PENDING).with_details(json!({
                "code": "not_pending",
                "status": request.status.as_str(),
            })))
        }
    }
}

impl<R, U> MatchRequestService<R, U>
where
    R: MatchRequestRepository,
    U: UserRepository,
{
    async fn ensure_mentor(&self, mentor_id: UserId) -> Result<(), Error> {
        let target = self
            .users
            .find_by_id(mentor_id)
            .await
            .map_err(map_user_error)?;
        match target {
            Some(user) if user.is_mentor() => Ok(()),
            _ => {
                debug!(mentor_id = %mentor_id, "submission target is not a mentor");
                Err(Error::invalid_request(MENTOR_NOT_FOUND)
                    .with_details(json!({ "field": "mentorId", "code": "invalid_mentor" })))
            }
        }
    }

    /// Explain a rejected insert. The re-query races with other writers, so
    /// it only picks the message; the store already decided the outcome.
    async fn explain_duplicate(&self, mentee_id: UserId, mentor_id: UserId) -> Error {
        match self.requests.find_outgoing(mentee_id).await {
            Ok(outgoing) => {
                let same_mentor = outgoing
                    .iter()
                    .any(|request| request.is_pending() && request.mentor_id == mentor_id);
                debug!(
                    mentee_id = %mentee_id,
                    mentor_id = %mentor_id,
                    same_mentor,
                    "duplicate pending match request"
                );
                duplicate_error(same_mentor)
            }
            Err(error) => {
                warn!(error = %error, "duplicate diagnosis lookup failed");
                duplicate_error(false)
            }
        }
    }
}

#[async_trait]
impl<R, U> MatchRequestCommand for MatchRequestService<R, U>
where
    R: MatchRequestRepository,
    U: UserRepository,
{
    async fn submit(
        &self,
        actor: &Principal,
        request: SubmitMatchRequest,
    ) -> Result<MatchRequest, Error> {
        let mentee_id = actor.require_mentee(ONLY_MENTEES_SEND)?;
        if mentee_id != request.mentee_id {
            debug!(actor = %mentee_id, claimed = %request.mentee_id, "mentee id mismatch");
            return Err(Error::forbidden(ONLY_FOR_YOURSELF));
        }
        self.ensure_mentor(request.mentor_id).await?;

        let new_request = NewMatchRequest {
            mentor_id: request.mentor_id,
            mentee_id,
            message: request.message,
        };
        match self.requests.create(&new_request).await {
            Ok(created) => {
                info!(
                    request_id = %created.id,
                    mentor_id = %created.mentor_id,
                    mentee_id = %created.mentee_id,
                    "match request submitted"
                );
                Ok(created)
            }
            Err(MatchRequestRepositoryError::DuplicatePending) => {
                Err(self.explain_duplicate(mentee_id, new_request.mentor_id).await)
            }
            Err(error) => Err(map_request_error(error)),
        }
    }

    async fn respond(
        &self,
        actor: &Principal,
        id: MatchRequestId,
        decision: Decision,
    ) -> Result<MatchRequest, Error> {
        let found = match decision {
            Decision::Accept => {
                let mentor_id = actor.require_mentor(ONLY_MENTORS_ACCEPT)?;
                self.requests.accept(id, mentor_id).await
            }
            Decision::Reject => {
                let mentor_id = actor.require_mentor(ONLY_MENTORS_REJECT)?;
                self.requests.reject(id, mentor_id).await
            }
        }
        .map_err(map_request_error)?;

        let resolved = transition_outcome(found, decision.resulting_status())?;
        info!(
            request_id = %resolved.id,
            mentor_id = %resolved.mentor_id,
            status = %resolved.status,
            "match request resolved"
        );
        Ok(resolved)
    }

    async fn cancel(&self, actor: &Principal, id: MatchRequestId) -> Result<MatchRequest, Error> {
        let mentee_id = actor.require_mentee(ONLY_MENTEES_CANCEL)?;
        let found = self
            .requests
            .cancel(id, mentee_id)
            .await
            .map_err(map_request_error)?;
        let cancelled = transition_outcome(found, MatchRequestStatus::Cancelled)?;
        info!(request_id = %cancelled.id, mentee_id = %mentee_id, "match request cancelled");
        Ok(cancelled)
    }
}

#[async_trait]
impl<R, U> MatchRequestQuery for MatchRequestService<R, U>
where
    R: MatchRequestRepository,
    U: UserRepository,
{
    async fn list_incoming(&self, actor: &Principal) -> Result<Vec<MatchRequest>, Error> {
        let mentor_id = actor.require_mentor(ONLY_MENTORS_INCOMING)?;
        self.requests
            .find_incoming(mentor_id)
            .await
            .map_err(map_request_error)
    }

    async fn list_outgoing(&self, actor: &Principal) -> Result<Vec<MatchRequest>, Error> {
        let mentee_id = actor.require_mentee(ONLY_MENTEES_OUTGOING)?;
        self.requests
            .find_outgoing(mentee_id)
            .await
            .map_err(map_request_error)
    }
}

#[cfg(test)]
#[path = "match_request_service_tests.rs"]
mod tests;
