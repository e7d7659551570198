//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM.
//! - **security**: Argon2id password hashing.
//!
//! Adapters translate between domain types and infrastructure
//! representations and contain no business rules.

pub mod persistence;
pub mod security;
