//! Driving port for reading a user's match requests.

use async_trait::async_trait;

use crate::domain::{Error, MatchRequest, Principal};

/// Use-case port for listing match requests from either side.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MatchRequestQuery: Send + Sync {
    /// Requests addressed to the acting mentor.
    async fn list_incoming(&self, actor: &Principal) -> Result<Vec<MatchRequest>, Error>;

    /// Requests sent by the acting mentee.
    async fn list_outgoing(&self, actor: &Principal) -> Result<Vec<MatchRequest>, Error>;
}
