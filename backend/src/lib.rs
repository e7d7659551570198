//! Mentor matching backend library.
//!
//! Hexagonal layout: [`domain`] holds the match request lifecycle rules and
//! ports, [`inbound`] adapts HTTP onto the driving ports, and [`outbound`]
//! implements the driven ports over PostgreSQL and Argon2.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
