//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL through `diesel-async` and a `bb8` pool.
//!
//! - **Thin adapters**: repositories translate between Diesel rows and domain
//!   types. Business rules stay in the domain services.
//! - **Internal models**: row structs (`models.rs`) and the schema
//!   (`schema.rs`) never leave this module.
//! - **Typed errors**: Diesel and pool failures map onto the port error enums;
//!   only named constraints carry domain meaning.
//!
//! ```ignore
//! use mentor_match::outbound::persistence::{DbPool, DieselMatchRequestRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/mentor_match")).await?;
//! let repo = DieselMatchRequestRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_match_request_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_match_request_repository::DieselMatchRequestRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations, run_migrations_blocking};
pub use pool::{DbPool, PoolConfig, PoolError};
