//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (repositories, hashing) are implemented by outbound adapters.
//! Driving ports (login, signup, match request command/query) are implemented
//! by domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod match_request_command;
mod match_request_query;
mod match_request_repository;
mod password_hasher;
mod user_repository;

#[cfg(test)]
pub use login_service::{MockLoginService, MockSignupService};
pub use login_service::{LoginService, SignupService};
#[cfg(test)]
pub use match_request_command::MockMatchRequestCommand;
pub use match_request_command::{MatchRequestCommand, SubmitMatchRequest};
#[cfg(test)]
pub use match_request_query::MockMatchRequestQuery;
pub use match_request_query::MatchRequestQuery;
#[cfg(test)]
pub use match_request_repository::MockMatchRequestRepository;
pub use match_request_repository::{MatchRequestRepository, MatchRequestRepositoryError};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{NewUserRecord, StoredCredentials, UserPersistenceError, UserRepository};
