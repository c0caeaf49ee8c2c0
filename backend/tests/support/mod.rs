//! Shared wiring for the integration suites.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so the
//! application assembly used by every suite lives here: the role services over
//! a fresh in-memory store, the session middleware, and the REST and GraphQL
//! routes.

use std::sync::Arc;

use actix_session::SessionMiddleware;
use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Cookie, Key, SameSite, time::Duration as CookieDuration};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use mockable::DefaultClock;
use serde_json::{Value, json};

use teachteam::Trace;
use teachteam::domain::{
    AccountService, AdminBootstrap, AdminService, CandidateService, CourseCatalogueService,
    EmailAddress, LecturerService, Password, PersonName, RepositorySet, User,
};
use teachteam::inbound::graphql::{self, AdminSchema, GraphQlPorts, build_schema};
use teachteam::inbound::http::{self as rest, state::HttpState};
use teachteam::outbound::memory::InMemoryStore;
use teachteam::outbound::notifications::BroadcastAvailabilityNotifier;
use teachteam::outbound::security::Argon2PasswordHasher;

pub const ADMIN_EMAIL: &str = "admin@teachteam.test";
pub const ADMIN_PASSWORD: &str = "Admin#2025";
pub const PASSWORD: &str = "Secret#123";

/// Services over one in-memory store, shared by every app built from it.
#[derive(Clone)]
pub struct Stack {
    pub accounts: Arc<AccountService>,
    pub notifier: Arc<BroadcastAvailabilityNotifier>,
    pub http: web::Data<HttpState>,
    pub schema: web::Data<AdminSchema>,
    pub key: Key,
}

impl Stack {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let repos = RepositorySet {
            users: store.clone(),
            courses: store.clone(),
            profiles: store.clone(),
            applications: store,
        };
        let clock = Arc::new(DefaultClock);
        let notifier = Arc::new(BroadcastAvailabilityNotifier::new());
        let accounts = Arc::new(AccountService::new(
            repos.users.clone(),
            Arc::new(Argon2PasswordHasher::default()),
            clock.clone(),
        ));
        let courses = Arc::new(CourseCatalogueService::new(repos.courses.clone()));
        let http = web::Data::new(HttpState::new(
            accounts.clone(),
            courses.clone(),
            Arc::new(CandidateService::new(repos.clone(), clock.clone())),
            Arc::new(LecturerService::new(repos.clone(), clock.clone())),
        ));
        let schema = web::Data::new(build_schema(GraphQlPorts {
            accounts: accounts.clone(),
            courses,
            admin: Arc::new(AdminService::new(repos, notifier.clone(), clock)),
        }));

        Self {
            accounts,
            notifier,
            http,
            schema,
            key: Key::generate(),
        }
    }

    /// Create the administrator account used by GraphQL steps.
    pub async fn seed_admin(&self) -> User {
        self.accounts
            .ensure_admin(AdminBootstrap {
                first_name: PersonName::new("Site").expect("first name"),
                last_name: PersonName::new("Admin").expect("last name"),
                email: EmailAddress::new(ADMIN_EMAIL).expect("admin email"),
                password: Password::new(ADMIN_PASSWORD).expect("admin password"),
            })
            .await
            .expect("bootstrap admin")
    }

    /// The application as served in production, minus Swagger UI.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .app_data(self.http.clone())
            .app_data(self.schema.clone())
            .configure(rest::extractor_config)
            .wrap(session_middleware(self.key.clone()))
            .wrap(Trace)
            .service(web::scope("/api").configure(rest::configure))
            .configure(|config| graphql::handlers::configure(config, false))
    }
}

fn session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(false)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(PersistentSession::default().session_ttl(CookieDuration::hours(2)))
        .build()
}

/// Sign-up body for `role`.
pub fn signup_body(first_name: &str, email: &str, role: &str) -> Value {
    json!({
        "firstName": first_name,
        "lastName": "Tester",
        "email": email,
        "password": PASSWORD,
        "role": role,
    })
}

/// `name=value` pair from a `Set-Cookie` header value.
pub fn cookie_pair(set_cookie: &str) -> String {
    Cookie::parse(set_cookie.to_owned())
        .map(|cookie| format!("{}={}", cookie.name(), cookie.value()))
        .expect("well-formed set-cookie header")
}
