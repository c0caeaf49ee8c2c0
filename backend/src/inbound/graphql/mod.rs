//! GraphQL admin API: reports, course management, and candidate blocking.
//!
//! Queries and mutations go to `POST /graphql`; the `candidateUnavailable`
//! subscription runs over `GET /graphql/ws`. The caller is taken from the same
//! session cookie as the REST API and attached to each request as [`Caller`].

use std::sync::Arc;

use async_graphql::{Context, ErrorExtensions, Schema};
use tracing::debug;

use crate::domain::ports::{AccountCommand, AdminConsole, CourseQuery};
use crate::domain::{Error, ErrorCode, UserId};

pub mod handlers;
mod mutation;
mod query;
mod subscription;
pub mod types;

pub use mutation::MutationRoot;
pub use query::QueryRoot;
pub use subscription::SubscriptionRoot;

/// Schema served at `/graphql`.
pub type AdminSchema = Schema<QueryRoot, MutationRoot, SubscriptionRoot>;

/// Driving ports reachable from resolvers.
#[derive(Clone)]
pub struct GraphQlPorts {
    pub accounts: Arc<dyn AccountCommand>,
    pub courses: Arc<dyn CourseQuery>,
    pub admin: Arc<dyn AdminConsole>,
}

/// Signed-in user for the current request or subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller(pub UserId);

/// Build the schema over `ports`.
pub fn build_schema(ports: GraphQlPorts) -> AdminSchema {
    Schema::build(QueryRoot, MutationRoot, SubscriptionRoot)
        .data(ports)
        .finish()
}

/// Render a domain error with `extensions.code` (plus trace id and details).
pub(crate) fn to_gql(error: Error) -> async_graphql::Error {
    let message = if matches!(error.code(), ErrorCode::InternalError) {
        tracing::error!(message = error.message(), "internal error redacted");
        "Internal server error".to_owned()
    } else {
        error.message().to_owned()
    };
    async_graphql::Error::new(message).extend_with(|_, extensions| {
        extensions.set("code", error.code().as_str());
        if let Some(trace_id) = error.trace_id() {
            extensions.set("traceId", trace_id);
        }
        if let Some(details) = error
            .details()
            .filter(|_| !matches!(error.code(), ErrorCode::InternalError))
            .and_then(|details| async_graphql::Value::from_json(details.clone()).ok())
        {
            extensions.set("details", details);
        }
    })
}

fn ports<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a GraphQlPorts> {
    ctx.data::<GraphQlPorts>()
}

fn caller(ctx: &Context<'_>) -> async_graphql::Result<UserId> {
    match ctx.data_opt::<Caller>() {
        Some(Caller(id)) => Ok(*id),
        None => {
            debug!("graphql request without a session");
            Err(to_gql(Error::unauthorized("login required")))
        }
    }
}
