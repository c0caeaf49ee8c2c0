//! Actix handlers mounting the GraphQL schema.

use actix_web::{HttpRequest, HttpResponse, Result, get, post, web};
use async_graphql::Data;
use async_graphql::http::GraphiQLSource;
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse, GraphQLSubscription};

use super::{AdminSchema, Caller};
use crate::inbound::http::session::SessionContext;

fn session_caller(session: &SessionContext) -> Option<Caller> {
    session.user_id().ok().flatten().map(Caller)
}

/// Execute a query or mutation as the session user.
#[post("/graphql")]
pub async fn graphql(
    schema: web::Data<AdminSchema>,
    session: SessionContext,
    request: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = request.into_inner();
    if let Some(caller) = session_caller(&session) {
        request = request.data(caller);
    }
    schema.execute(request).await.into()
}

/// GraphiQL explorer.
#[get("/graphql")]
pub async fn graphiql() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(
            GraphiQLSource::build()
                .endpoint("/graphql")
                .subscription_endpoint("/graphql/ws")
                .finish(),
        )
}

/// WebSocket transport for subscriptions, authenticated by the upgrade's cookie.
#[get("/graphql/ws")]
pub async fn subscriptions(
    schema: web::Data<AdminSchema>,
    session: SessionContext,
    req: HttpRequest,
    payload: web::Payload,
) -> Result<HttpResponse> {
    let mut data = Data::default();
    if let Some(caller) = session_caller(&session) {
        data.insert(caller);
    }
    GraphQLSubscription::new(AdminSchema::clone(&schema))
        .with_data(data)
        .start(&req, payload)
}

/// Register the GraphQL routes; GraphiQL is only mounted when `explorer` is set.
pub fn configure(cfg: &mut web::ServiceConfig, explorer: bool) {
    cfg.service(graphql).service(subscriptions);
    if explorer {
        cfg.service(graphiql);
    }
}
