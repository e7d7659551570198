//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LoginService, MatchRequestCommand, MatchRequestQuery, SignupService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub signup: Arc<dyn SignupService>,
    pub match_requests: Arc<dyn MatchRequestCommand>,
    pub match_request_queries: Arc<dyn MatchRequestQuery>,
}

impl HttpState {
    /// Bundle the driving ports used by the handlers.
    ///
    /// A single service usually implements several ports; pass the same
    /// `Arc` for each.
    pub fn new(
        login: Arc<dyn LoginService>,
        signup: Arc<dyn SignupService>,
        match_requests: Arc<dyn MatchRequestCommand>,
        match_request_queries: Arc<dyn MatchRequestQuery>,
    ) -> Self {
        Self {
            login,
            signup,
            match_requests,
            match_request_queries,
        }
    }
}
