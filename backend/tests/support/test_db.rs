//! PostgreSQL access for repository integration tests.
//!
//! Tests read `TEST_DATABASE_URL`. When it is unset they print a
//! `SKIP-TEST-DB` marker and return early so local runs without a database
//! stay green.

use std::sync::OnceLock;

use mentor_match::domain::ports::{NewUserRecord, UserRepository};
use mentor_match::domain::{DisplayName, Email, Role, User};
use mentor_match::outbound::persistence::{
    DbPool, DieselUserRepository, PoolConfig, run_migrations_blocking,
};

static MIGRATED: OnceLock<Result<(), String>> = OnceLock::new();

/// Connect to the test database, applying migrations once per process.
pub async fn test_pool(test_name: &str) -> Option<DbPool> {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("SKIP-TEST-DB: {test_name} skipped; TEST_DATABASE_URL is unset");
        return None;
    };
    MIGRATED
        .get_or_init(|| {
            run_migrations_blocking(&url)
                .map(|_| ())
                .map_err(|err| err.to_string())
        })
        .as_ref()
        .unwrap_or_else(|err| panic!("migrations failed: {err}"));

    let config = PoolConfig::new(url).with_max_size(8);
    Some(DbPool::new(config).await.expect("test pool"))
}

/// Insert a user with a unique email.
pub async fn seed_user(users: &DieselUserRepository, role: Role) -> User {
    let email = format!("{}@example.test", uuid::Uuid::new_v4().simple());
    users
        .create(&NewUserRecord {
            email: Email::new(email).expect("generated email"),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_owned(),
            name: DisplayName::new("Seeded").expect("display name"),
            role,
        })
        .await
        .expect("seed user")
}
