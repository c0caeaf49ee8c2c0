//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{AppSettings, ServerConfig};

use state_builders::{AppPorts, build_ports, build_repositories};

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use teachteam::Trace;
#[cfg(debug_assertions)]
use teachteam::doc::ApiDoc;
use teachteam::inbound::graphql::{self, AdminSchema, build_schema};
use teachteam::inbound::http::health::{HealthState, live, ready};
use teachteam::inbound::http::{self as rest, state::HttpState};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    schema: web::Data<AdminSchema>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        schema,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(schema)
        .configure(rest::extractor_config)
        .wrap(session)
        .wrap(Trace)
        .service(web::scope("/api").configure(rest::configure))
        .configure(|config| graphql::handlers::configure(config, cfg!(debug_assertions)))
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// Builds the repositories (Diesel when a pool is configured, in-memory
/// otherwise), creates the configured administrator, and binds the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when the admin bootstrap fails or when
/// binding the socket fails.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        db_pool,
        admin,
    } = config;
    let AppPorts {
        accounts,
        http,
        graphql: graphql_ports,
    } = build_ports(build_repositories(db_pool.as_ref()));

    if let Some(admin) = admin {
        let user = accounts
            .ensure_admin(admin)
            .await
            .map_err(|err| std::io::Error::other(format!("admin bootstrap failed: {err}")))?;
        info!(user_id = %user.id, "administrator account ready");
    }

    let schema = web::Data::new(build_schema(graphql_ports));
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http.clone(),
            schema: schema.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "listening");
    health_state.mark_ready();
    Ok(server)
}
