//! Builders for the repository set and the driving ports shared by REST and
//! GraphQL.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use teachteam::domain::ports::AvailabilityNotifier;
use teachteam::domain::{
    AccountService, AdminService, CandidateService, CourseCatalogueService, LecturerService,
    RepositorySet,
};
use teachteam::inbound::graphql::GraphQlPorts;
use teachteam::inbound::http::state::HttpState;
use teachteam::outbound::memory::InMemoryStore;
use teachteam::outbound::notifications::BroadcastAvailabilityNotifier;
use teachteam::outbound::persistence::{
    DbPool, DieselApplicationRepository, DieselCandidateProfileRepository,
    DieselCourseRepository, DieselUserRepository,
};
use teachteam::outbound::security::Argon2PasswordHasher;

/// Everything the request handlers need, built once per process.
#[derive(Clone)]
pub(super) struct AppPorts {
    pub(super) accounts: Arc<AccountService>,
    pub(super) http: web::Data<HttpState>,
    pub(super) graphql: GraphQlPorts,
}

/// Diesel repositories when a pool is configured, otherwise one shared
/// in-memory store behind every port.
pub(super) fn build_repositories(pool: Option<&DbPool>) -> RepositorySet {
    match pool {
        Some(pool) => RepositorySet {
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            courses: Arc::new(DieselCourseRepository::new(pool.clone())),
            profiles: Arc::new(DieselCandidateProfileRepository::new(pool.clone())),
            applications: Arc::new(DieselApplicationRepository::new(pool.clone())),
        },
        None => {
            info!("no database configured; using the in-memory store");
            let store = Arc::new(InMemoryStore::new());
            RepositorySet {
                users: store.clone(),
                courses: store.clone(),
                profiles: store.clone(),
                applications: store,
            }
        }
    }
}

/// Wire the role services over `repos`.
pub(super) fn build_ports(repos: RepositorySet) -> AppPorts {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let notifier: Arc<dyn AvailabilityNotifier> = Arc::new(BroadcastAvailabilityNotifier::new());

    let accounts = Arc::new(AccountService::new(
        repos.users.clone(),
        Arc::new(Argon2PasswordHasher::default()),
        clock.clone(),
    ));
    let courses = Arc::new(CourseCatalogueService::new(repos.courses.clone()));
    let candidates = Arc::new(CandidateService::new(repos.clone(), clock.clone()));
    let lecturers = Arc::new(LecturerService::new(repos.clone(), clock.clone()));
    let admin = Arc::new(AdminService::new(repos, notifier, clock));

    AppPorts {
        accounts: accounts.clone(),
        http: web::Data::new(HttpState::new(
            accounts.clone(),
            courses.clone(),
            candidates,
            lecturers,
        )),
        graphql: GraphQlPorts {
            accounts,
            courses,
            admin,
        },
    }
}
