//! TeachTeam backend: tutor and lab-assistant recruitment.
//!
//! Hexagonal layout: [`domain`] holds the entities, ports, and role services;
//! [`inbound`] adapts REST and GraphQL requests onto the driving ports;
//! [`outbound`] implements the driven ports over PostgreSQL, memory, Argon2,
//! and a broadcast channel.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
