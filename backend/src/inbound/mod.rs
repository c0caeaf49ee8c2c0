//! Inbound adapters that translate external requests into domain service calls
//! while keeping framework details at the edge.
//!
//! The REST API lives under [`http`]; the admin GraphQL API, including its
//! WebSocket subscription, lives under [`graphql`].

pub mod graphql;
pub mod http;
pub(crate) mod validation;
