//! Account domain service: signup and credential checks.
//!
//! Password hashing runs on the blocking pool so Argon2 work never stalls
//! the async executor.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    LoginService, NewUserRecord, PasswordHashError, PasswordHasher, SignupService,
    UserPersistenceError, UserRepository,
};
use crate::domain::{Error, LoginCredentials, NewAccount, Principal, User};

pub(crate) const EMAIL_TAKEN: &str = "Email already registered";
pub(crate) const INVALID_LOGIN: &str = "Invalid email or password";

/// Account service implementing the signup and login driving ports.
#[derive(Clone)]
pub struct AccountService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> AccountService<U, H> {
    /// Create a new service with the given repository and hasher.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
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
        UserPersistenceError::DuplicateEmail => Error::invalid_request(EMAIL_TAKEN)
            .with_details(json!({ "field": "email", "code": "email_taken" })),
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

impl<U, H> AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
{
    async fn with_hasher<T, F>(&self, op: F) -> Result<T, Error>
    where
        T: Send + 'static,
        F: FnOnce(&H) -> Result<T, PasswordHashError> + Send + 'static,
    {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || op(hasher.as_ref()))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
            .map_err(map_hash_error)
    }
}

#[async_trait]
impl<U, H> SignupService for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
{
    async fn register(&self, account: &NewAccount) -> Result<User, Error> {
        let password = zeroize::Zeroizing::new(account.password().to_owned());
        let password_hash = self
            .with_hasher(move |hasher| hasher.hash(password.as_str()))
            .await?;

        let record = NewUserRecord {
            email: account.email().clone(),
            password_hash,
            name: account.name().clone(),
            role: account.role(),
        };
        let user = self.users.create(&record).await.map_err(map_user_error)?;
        info!(user_id = %user.id(), role = %user.role(), "account registered");
        Ok(user)
    }
}

#[async_trait]
impl<U, H> LoginService for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Principal, Error> {
        let stored = self
            .users
            .find_credentials_by_email(credentials.email())
            .await
            .map_err(map_user_error)?;
        let Some(stored) = stored else {
            debug!("login for unknown email");
            return Err(Error::unauthorized(INVALID_LOGIN));
        };

        let password = zeroize::Zeroizing::new(credentials.password().to_owned());
        let hash = stored.password_hash;
        let matches = self
            .with_hasher(move |hasher| hasher.verify(password.as_str(), &hash))
            .await?;
        if !matches {
            debug!(user_id = %stored.user.id(), "login with wrong password");
            return Err(Error::unauthorized(INVALID_LOGIN));
        }

        Ok(Principal::new(stored.user.id(), stored.user.role()))
    }
}
