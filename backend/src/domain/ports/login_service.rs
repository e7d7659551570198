//! Driving ports for account use-cases: signup and login.
//!
//! Inbound adapters call these to register accounts and authenticate
//! credentials without importing the backing infrastructure, so handler tests
//! can substitute a double instead of wiring persistence.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, NewAccount, Principal, User};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated principal.
    ///
    /// Unknown accounts and wrong passwords fail identically with
    /// `Unauthorized`.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Principal, Error>;
}

/// Domain use-case port for account registration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignupService: Send + Sync {
    /// Register a new account with a hashed password.
    async fn register(&self, account: &NewAccount) -> Result<User, Error>;
}
