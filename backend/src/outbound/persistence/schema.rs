//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    ///
    /// `email` is unique and stored lower-cased. `role` is `mentor` or
    /// `mentee` and never changes after signup.
    users (id) {
        /// Primary key (bigserial).
        id -> Int8,
        /// Normalised login email.
        email -> Varchar,
        /// Argon2id PHC string.
        password_hash -> Text,
        /// Display name.
        name -> Varchar,
        /// `mentor` | `mentee`.
        role -> Varchar,
        /// Free-form profile text; unused by the matching workflow.
        bio -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (maintained by trigger).
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Mentee-to-mentor match requests.
    ///
    /// A partial unique index allows at most one `pending` row per mentee.
    match_requests (id) {
        /// Primary key (bigserial).
        id -> Int8,
        /// Addressed mentor (`users.id`).
        mentor_id -> Int8,
        /// Sending mentee (`users.id`).
        mentee_id -> Int8,
        /// Non-blank introduction text.
        message -> Text,
        /// `pending` | `accepted` | `rejected` | `cancelled`.
        status -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (maintained by trigger).
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, match_requests);
