//! Authentication primitives: login credentials, signup input, and the
//! authenticated principal with its role guards.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{DisplayName, Email, Role, UserId, UserValidationError};
use super::Error;

/// Domain error returned when login or signup payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Email was missing, blank, or malformed.
    Email(UserValidationError),
    /// Password was blank.
    EmptyPassword,
    /// Display name was blank or too long.
    Name(UserValidationError),
    /// Role was not `mentor` or `mentee`.
    Role,
}

impl CredentialsValidationError {
    /// Payload field the error refers to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::Email(_) => "email",
            Self::EmptyPassword => "password",
            Self::Name(_) => "name",
            Self::Role => "role",
        }
    }

    /// Stable machine-readable code for clients.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Email(UserValidationError::EmptyEmail) => "empty_email",
            Self::Email(_) => "invalid_email",
            Self::EmptyPassword => "empty_password",
            Self::Name(UserValidationError::DisplayNameTooLong { .. }) => "name_too_long",
            Self::Name(_) => "empty_name",
            Self::Role => "invalid_role",
        }
    }
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email(inner) | Self::Name(inner) => write!(f, "{inner}"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::Role => write!(f, "role must be mentor or mentee"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

fn password_from(raw: &str) -> Result<Zeroizing<String>, CredentialsValidationError> {
    if raw.is_empty() {
        return Err(CredentialsValidationError::EmptyPassword);
    }
    Ok(Zeroizing::new(raw.to_owned()))
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is normalised (see [`Email`]).
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use mentor_match::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("Ada@Example.com", "secret").unwrap();
/// assert_eq!(creds.email().as_ref(), "ada@example.com");
/// assert_eq!(creds.password(), "secret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: Email,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let email = Email::new(email).map_err(CredentialsValidationError::Email)?;
        let password = password_from(password)?;
        Ok(Self { email, password })
    }

    /// Email used for the account lookup.
    #[must_use]
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Password string provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated signup input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    email: Email,
    password: Zeroizing<String>,
    name: DisplayName,
    role: Role,
}

impl NewAccount {
    /// Validate raw signup fields in payload order.
    ///
    /// # Examples
    /// ```
    /// use mentor_match::domain::{NewAccount, Role};
    ///
    /// let account = NewAccount::try_from_parts("m@example.com", "pw", "Mo", "mentor").unwrap();
    /// assert_eq!(account.role(), Role::Mentor);
    /// ```
    pub fn try_from_parts(
        email: &str,
        password: &str,
        name: &str,
        role: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let email = Email::new(email).map_err(CredentialsValidationError::Email)?;
        let password = password_from(password)?;
        let name = DisplayName::new(name).map_err(CredentialsValidationError::Name)?;
        let role = role
            .parse::<Role>()
            .map_err(|_| CredentialsValidationError::Role)?;
        Ok(Self {
            email,
            password,
            name,
            role,
        })
    }

    /// Account email.
    #[must_use]
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Plain-text password awaiting hashing.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Requested role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }
}

/// Authenticated caller identity carried by the session.
///
/// Authorization decisions in the services go through the guard methods so
/// role checks live in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    user_id: UserId,
    role: Role,
}

impl Principal {
    /// Pair an authenticated user id with its role.
    #[must_use]
    pub const fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Authenticated user id.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Authenticated role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Require the mentor role or fail with `Forbidden` carrying `message`.
    pub fn require_mentor(&self, message: &str) -> Result<UserId, Error> {
        self.require(Role::Mentor, message)
    }

    /// Require the mentee role or fail with `Forbidden` carrying `message`.
    pub fn require_mentee(&self, message: &str) -> Result<UserId, Error> {
        self.require(Role::Mentee, message)
    }

    fn require(&self, role: Role, message: &str) -> Result<UserId, Error> {
        if self.role == role {
            Ok(self.user_id)
        } else {
            tracing::debug!(
                user_id = %self.user_id,
                role = %self.role,
                required = %role,
                "role guard refused caller"
            );
            Err(Error::forbidden(message))
        }
    }
}
