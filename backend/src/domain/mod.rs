//! Domain primitives, aggregates, and services.
//!
//! Purpose: define strongly typed entities for the mentor/mentee matching
//! workflow and the services that enforce its rules. Types are transport
//! agnostic; adapters translate them to HTTP and SQL.
//!
//! Public surface:
//! - Error / ErrorCode: failure payload with a stable machine-readable code.
//! - User, UserId, Email, DisplayName, Role: account identity.
//! - LoginCredentials, NewAccount, Principal: authentication inputs and the
//!   authenticated caller with role guards.
//! - MatchRequest and friends: the request lifecycle aggregate.
//! - AccountService, MatchRequestService: driving-port implementations.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod match_request;
pub mod match_request_service;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{CredentialsValidationError, LoginCredentials, NewAccount, Principal};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::match_request::{
    Decision, MatchRequest, MatchRequestId, MatchRequestStatus, MatchRequestValidationError,
    NewMatchRequest, RequestMessage,
};
pub use self::match_request_service::MatchRequestService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{DisplayName, Email, Role, User, UserId, UserValidationError};
