//! Wiring of Diesel repositories and domain services into HTTP state.

use std::sync::Arc;

use actix_web::web;

use mentor_match::domain::{AccountService, MatchRequestService};
use mentor_match::inbound::http::state::HttpState;
use mentor_match::outbound::persistence::{
    DbPool, DieselMatchRequestRepository, DieselUserRepository,
};
use mentor_match::outbound::security::Argon2PasswordHasher;

/// Build the handler state over a shared connection pool.
pub(crate) fn build_http_state(pool: &DbPool) -> web::Data<HttpState> {
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let requests = Arc::new(DieselMatchRequestRepository::new(pool.clone()));

    let accounts = Arc::new(AccountService::new(
        Arc::clone(&users),
        Arc::new(Argon2PasswordHasher::new()),
    ));
    let lifecycle = Arc::new(MatchRequestService::new(requests, users));

    web::Data::new(HttpState::new(
        accounts.clone(),
        accounts,
        lifecycle.clone(),
        lifecycle,
    ))
}
