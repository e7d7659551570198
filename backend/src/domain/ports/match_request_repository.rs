//! Port for match request persistence.
//!
//! Each mutating operation is one atomic unit in the adapter. Ownership is
//! part of the lookup: `accept`, `reject`, and `cancel` only see requests
//! addressed to (or sent by) the given user, and report `None` otherwise, so
//! callers cannot tell a foreign request from a missing one.
//!
//! Transitions only apply to `pending` rows. A terminal request is returned
//! unchanged so callers can see its current status.

use async_trait::async_trait;

use crate::domain::{MatchRequest, MatchRequestId, NewMatchRequest, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by match request repository adapters.
    pub enum MatchRequestRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "match request repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "match request repository query failed: {message}",
        /// The mentee already has a pending request.
        DuplicatePending => "mentee already has a pending match request",
        /// The mentor already holds an accepted request.
        MentorAlreadyMatched => "mentor already has an accepted match request",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MatchRequestRepository: Send + Sync {
    /// Store a new `pending` request.
    ///
    /// Fails with [`MatchRequestRepositoryError::DuplicatePending`] when the
    /// mentee already has a pending request to any mentor. Neither user id
    /// is checked for existence here.
    async fn create(
        &self,
        request: &NewMatchRequest,
    ) -> Result<MatchRequest, MatchRequestRepositoryError>;

    /// All requests addressed to `mentor_id`, any status, in id order.
    async fn find_incoming(
        &self,
        mentor_id: UserId,
    ) -> Result<Vec<MatchRequest>, MatchRequestRepositoryError>;

    /// All requests sent by `mentee_id`, any status, in id order.
    async fn find_outgoing(
        &self,
        mentee_id: UserId,
    ) -> Result<Vec<MatchRequest>, MatchRequestRepositoryError>;

    /// Accept request `id` addressed to `mentor_id`.
    ///
    /// When the target is pending, atomically rejects the mentor's other
    /// pending requests and then marks the target accepted. Fails with
    /// [`MatchRequestRepositoryError::MentorAlreadyMatched`] when a different
    /// request to the mentor is already accepted; nothing changes then.
    async fn accept(
        &self,
        id: MatchRequestId,
        mentor_id: UserId,
    ) -> Result<Option<MatchRequest>, MatchRequestRepositoryError>;

    /// Reject request `id` addressed to `mentor_id`.
    async fn reject(
        &self,
        id: MatchRequestId,
        mentor_id: UserId,
    ) -> Result<Option<MatchRequest>, MatchRequestRepositoryError>;

    /// Cancel request `id` sent by `mentee_id`.
    async fn cancel(
        &self,
        id: MatchRequestId,
        mentee_id: UserId,
    ) -> Result<Option<MatchRequest>, MatchRequestRepositoryError>;
}
