//! Match request aggregate: a mentee's proposal to a specific mentor.
//!
//! `Pending` is the only non-terminal status. Once a request is accepted,
//! rejected, or cancelled it never changes again.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::UserId;

/// Validation errors for match request primitives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchRequestValidationError {
    #[error("match request id must be a positive integer")]
    NonPositiveId,
    #[error("message must not be empty")]
    EmptyMessage,
    #[error("unknown match request status: {0}")]
    UnknownStatus(String),
}

/// Identifier of a stored match request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct MatchRequestId(i64);

impl MatchRequestId {
    /// Validate and construct an identifier.
    pub fn new(id: i64) -> Result<Self, MatchRequestValidationError> {
        if id <= 0 {
            return Err(MatchRequestValidationError::NonPositiveId);
        }
        Ok(Self(id))
    }

    /// Raw integer value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for MatchRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<MatchRequestId> for i64 {
    fn from(value: MatchRequestId) -> Self {
        value.0
    }
}

impl TryFrom<i64> for MatchRequestId {
    type Error = MatchRequestValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Lifecycle status of a match request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MatchRequestStatus {
    Pending,
    Accepted,
    Rejected,
    Cancelled,
}

impl MatchRequestStatus {
    /// Storage and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        }
    }

    /// True for every status except `Pending`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for MatchRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchRequestStatus {
    type Err = MatchRequestValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(MatchRequestValidationError::UnknownStatus(other.to_owned())),
        }
    }
}

/// Introductory message sent with a request. Never blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "Hello! I'd love your help with Rust.")]
pub struct RequestMessage(String);

impl RequestMessage {
    /// Validate a message; surrounding whitespace is dropped.
    pub fn new(message: impl AsRef<str>) -> Result<Self, MatchRequestValidationError> {
        let trimmed = message.as_ref().trim();
        if trimmed.is_empty() {
            return Err(MatchRequestValidationError::EmptyMessage);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for RequestMessage {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<RequestMessage> for String {
    fn from(value: RequestMessage) -> Self {
        value.0
    }
}

impl TryFrom<String> for RequestMessage {
    type Error = MatchRequestValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A mentor's answer to a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject,
}

impl Decision {
    /// Status the addressed request ends in.
    #[must_use]
    pub const fn resulting_status(self) -> MatchRequestStatus {
        match self {
            Self::Accept => MatchRequestStatus::Accepted,
            Self::Reject => MatchRequestStatus::Rejected,
        }
    }
}

/// Input for creating a request; the service validates it before storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMatchRequest {
    pub mentor_id: UserId,
    pub mentee_id: UserId,
    pub message: RequestMessage,
}

/// Stored match request.
///
/// # Examples
/// ```
/// use mentor_match::domain::{
///     MatchRequest, MatchRequestId, MatchRequestStatus, RequestMessage, UserId,
/// };
///
/// let request = MatchRequest {
///     id: MatchRequestId::new(1).unwrap(),
///     mentor_id: UserId::new(2).unwrap(),
///     mentee_id: UserId::new(3).unwrap(),
///     message: RequestMessage::new("hello").unwrap(),
///     status: MatchRequestStatus::Pending,
/// };
/// assert!(request.is_pending());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRequest {
    pub id: MatchRequestId,
    pub mentor_id: UserId,
    pub mentee_id: UserId,
    pub message: RequestMessage,
    pub status: MatchRequestStatus,
}

impl MatchRequest {
    /// Whether the request still awaits a decision.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == MatchRequestStatus::Pending
    }
}
