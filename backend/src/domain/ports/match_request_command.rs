//! Driving port for match request lifecycle commands.

use async_trait::async_trait;

use crate::domain::{
    Decision, Error, MatchRequest, MatchRequestId, Principal, RequestMessage, UserId,
};

/// Submission payload after transport-level parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitMatchRequest {
    pub mentor_id: UserId,
    pub mentee_id: UserId,
    pub message: RequestMessage,
}

/// Use-case port for creating and resolving match requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MatchRequestCommand: Send + Sync {
    /// Send a request from the acting mentee to a mentor.
    async fn submit(
        &self,
        actor: &Principal,
        request: SubmitMatchRequest,
    ) -> Result<MatchRequest, Error>;

    /// Accept or reject a request addressed to the acting mentor.
    async fn respond(
        &self,
        actor: &Principal,
        id: MatchRequestId,
        decision: Decision,
    ) -> Result<MatchRequest, Error>;

    /// Withdraw a request sent by the acting mentee.
    async fn cancel(&self, actor: &Principal, id: MatchRequestId) -> Result<MatchRequest, Error>;
}
