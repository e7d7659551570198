//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain types are
//! fallible because a row is only as trustworthy as the constraints behind it.

use diesel::prelude::*;

use crate::domain::{
    DisplayName, Email, MatchRequest, MatchRequestId, MatchRequestStatus, RequestMessage, Role,
    User, UserId,
};

use super::schema::{match_requests, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: String,
}

impl UserRow {
    /// Convert into the domain user, dropping the password hash.
    pub(crate) fn to_user(&self) -> Result<User, String> {
        let id = UserId::new(self.id).map_err(|err| err.to_string())?;
        let email = Email::new(&self.email).map_err(|err| err.to_string())?;
        let name = DisplayName::new(&self.name).map_err(|err| err.to_string())?;
        let role = self.role.parse::<Role>().map_err(|err| err.to_string())?;
        Ok(User::new(id, email, name, role))
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub name: &'a str,
    pub role: &'a str,
}

/// Row struct for reading from the match_requests table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = match_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MatchRequestRow {
    pub id: i64,
    pub mentor_id: i64,
    pub mentee_id: i64,
    pub message: String,
    pub status: String,
}

impl TryFrom<MatchRequestRow> for MatchRequest {
    type Error = String;

    fn try_from(row: MatchRequestRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: MatchRequestId::new(row.id).map_err(|err| err.to_string())?,
            mentor_id: UserId::new(row.mentor_id).map_err(|err| err.to_string())?,
            mentee_id: UserId::new(row.mentee_id).map_err(|err| err.to_string())?,
            message: RequestMessage::new(row.message).map_err(|err| err.to_string())?,
            status: row
                .status
                .parse::<MatchRequestStatus>()
                .map_err(|err| err.to_string())?,
        })
    }
}

/// Insertable struct for creating new match requests.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = match_requests)]
pub(crate) struct NewMatchRequestRow<'a> {
    pub mentor_id: i64,
    pub mentee_id: i64,
    pub message: &'a str,
    pub status: &'a str,
}
