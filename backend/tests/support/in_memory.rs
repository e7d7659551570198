//! In-memory implementations of the driven ports.
//!
//! They honour the same invariants as the PostgreSQL adapters so HTTP
//! lifecycle tests can run the real services without a database.

use std::sync::Mutex;

use async_trait::async_trait;
use mentor_match::domain::ports::{
    MatchRequestRepository, MatchRequestRepositoryError, NewUserRecord, PasswordHashError,
    PasswordHasher, StoredCredentials, UserPersistenceError, UserRepository,
};
use mentor_match::domain::{
    Email, MatchRequest, MatchRequestId, MatchRequestStatus, NewMatchRequest, User, UserId,
};

fn next_id(len: usize) -> i64 {
    i64::try_from(len).expect("id fits i64") + 1
}

/// User directory backed by a vector.
#[derive(Default)]
pub struct InMemoryUsers {
    rows: Mutex<Vec<StoredCredentials>>,
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn create(&self, record: &NewUserRecord) -> Result<User, UserPersistenceError> {
        let mut rows = self.rows.lock().expect("users lock");
        if rows.iter().any(|row| row.user.email() == &record.email) {
            return Err(UserPersistenceError::duplicate_email());
        }
        let user = User::new(
            UserId::new(next_id(rows.len())).expect("positive id"),
            record.email.clone(),
            record.name.clone(),
            record.role,
        );
        rows.push(StoredCredentials {
            user: user.clone(),
            password_hash: record.password_hash.clone(),
        });
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let rows = self.rows.lock().expect("users lock");
        Ok(rows
            .iter()
            .find(|row| row.user.id() == id)
            .map(|row| row.user.clone()))
    }

    async fn find_credentials_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        let rows = self.rows.lock().expect("users lock");
        Ok(rows.iter().find(|row| row.user.email() == email).cloned())
    }
}

/// Match request store backed by a vector.
#[derive(Default)]
pub struct InMemoryMatchRequests {
    rows: Mutex<Vec<MatchRequest>>,
}

impl InMemoryMatchRequests {
    fn transition(
        &self,
        id: MatchRequestId,
        owner: impl Fn(&MatchRequest) -> bool,
        status: MatchRequestStatus,
    ) -> Option<MatchRequest> {
        let mut rows = self.rows.lock().expect("requests lock");
        let row = rows.iter_mut().find(|row| row.id == id && owner(row))?;
        if row.is_pending() {
            row.status = status;
        }
        Some(row.clone())
    }
}

#[async_trait]
impl MatchRequestRepository for InMemoryMatchRequests {
    async fn create(
        &self,
        request: &NewMatchRequest,
    ) -> Result<MatchRequest, MatchRequestRepositoryError> {
        let mut rows = self.rows.lock().expect("requests lock");
        if rows
            .iter()
            .any(|row| row.mentee_id == request.mentee_id && row.is_pending())
        {
            return Err(MatchRequestRepositoryError::duplicate_pending());
        }
        let created = MatchRequest {
            id: MatchRequestId::new(next_id(rows.len())).expect("positive id"),
            mentor_id: request.mentor_id,
            mentee_id: request.mentee_id,
            message: request.message.clone(),
            status: MatchRequestStatus::Pending,
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn find_incoming(
        &self,
        mentor_id: UserId,
    ) -> Result<Vec<MatchRequest>, MatchRequestRepositoryError> {
        let rows = self.rows.lock().expect("requests lock");
        Ok(rows
            .iter()
            .filter(|row| row.mentor_id == mentor_id)
            .cloned()
            .collect())
    }

    async fn find_outgoing(
        &self,
        mentee_id: UserId,
    ) -> Result<Vec<MatchRequest>, MatchRequestRepositoryError> {
        let rows = self.rows.lock().expect("requests lock");
        Ok(rows
            .iter()
            .filter(|row| row.mentee_id == mentee_id)
            .cloned()
            .collect())
    }

    async fn accept(
        &self,
        id: MatchRequestId,
        mentor_id: UserId,
    ) -> Result<Option<MatchRequest>, MatchRequestRepositoryError> {
        let mut rows = self.rows.lock().expect("requests lock");
        let Some(target) = rows
            .iter()
            .find(|row| row.id == id && row.mentor_id == mentor_id)
            .cloned()
        else {
            return Ok(None);
        };
        if !target.is_pending() {
            return Ok(Some(target));
        }
        if rows
            .iter()
            .any(|row| row.mentor_id == mentor_id && row.status == MatchRequestStatus::Accepted)
        {
            return Err(MatchRequestRepositoryError::MentorAlreadyMatched);
        }
        for row in rows.iter_mut() {
            if row.mentor_id == mentor_id && row.is_pending() {
                row.status = if row.id == id {
                    MatchRequestStatus::Accepted
                } else {
                    MatchRequestStatus::Rejected
                };
            }
        }
        Ok(rows.iter().find(|row| row.id == id).cloned())
    }

    async fn reject(
        &self,
        id: MatchRequestId,
        mentor_id: UserId,
    ) -> Result<Option<MatchRequest>, MatchRequestRepositoryError> {
        Ok(self.transition(
            id,
            |row| row.mentor_id == mentor_id,
            MatchRequestStatus::Rejected,
        ))
    }

    async fn cancel(
        &self,
        id: MatchRequestId,
        mentee_id: UserId,
    ) -> Result<Option<MatchRequest>, MatchRequestRepositoryError> {
        Ok(self.transition(
            id,
            |row| row.mentee_id == mentee_id,
            MatchRequestStatus::Cancelled,
        ))
    }
}

/// Reversible stand-in for Argon2 so tests stay fast.
pub struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        Ok(format!("plain${password}"))
    }

    fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordHashError> {
        stored_hash
            .strip_prefix("plain$")
            .map(|expected| expected == password)
            .ok_or_else(|| PasswordHashError::malformed_hash("missing plain$ prefix"))
    }
}
