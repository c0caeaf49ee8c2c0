//! In-process implementation of every repository port.
//!
//! Used when no database URL is configured and by the integration suite. All
//! tables live behind one mutex, so each port call observes a consistent
//! snapshot. Uniqueness rules mirror the SQL constraints in
//! `backend/migrations` and are reported with the same port error variants.

mod applications;
mod courses;
mod profiles;
mod users;

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::domain::{
    AcademicCredential, ApplicationDetails, ApplicationId, CandidateApplication, CandidateSummary,
    Course, CourseId, CourseSummary, PreviousRole, ProfileSettings, UserAccount, UserId,
};

#[derive(Debug, Default)]
struct StoreState {
    users: BTreeMap<UserId, UserAccount>,
    courses: BTreeMap<CourseId, Course>,
    /// Insertion-ordered `(lecturer, course)` links.
    assignments: Vec<(UserId, CourseId)>,
    profiles: HashMap<UserId, (ProfileSettings, DateTime<Utc>)>,
    credentials: Vec<(UserId, AcademicCredential)>,
    previous_roles: Vec<(UserId, PreviousRole)>,
    applications: BTreeMap<ApplicationId, CandidateApplication>,
}

impl StoreState {
    fn details(&self, application: &CandidateApplication) -> Option<ApplicationDetails> {
        let account = self.users.get(&application.candidate_id)?;
        let course = self.courses.get(&application.course_id)?;
        Some(ApplicationDetails {
            application: application.clone(),
            candidate: CandidateSummary {
                id: account.user.id,
                first_name: account.user.first_name.to_string(),
                last_name: account.user.last_name.to_string(),
                email: account.user.email.clone(),
            },
            course: CourseSummary {
                id: course.id,
                code: course.code.clone(),
                name: course.name.clone(),
            },
        })
    }

    fn is_assigned(&self, lecturer_id: &UserId, course_id: &CourseId) -> bool {
        self.assignments
            .iter()
            .any(|(lecturer, course)| lecturer == lecturer_id && course == course_id)
    }
}

/// Thread-safe in-memory store implementing the user, course, profile, and
/// application repository ports.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use teachteam::domain::ports::CourseRepository;
/// use teachteam::outbound::memory::InMemoryStore;
///
/// let store = InMemoryStore::new();
/// let courses: Arc<dyn CourseRepository> = Arc::new(store.clone());
/// # let _ = courses;
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the tables, reporting a poisoned lock through `query`.
    fn lock<E>(&self, query: impl FnOnce(String) -> E) -> Result<MutexGuard<'_, StoreState>, E> {
        self.state
            .lock()
            .map_err(|_| query("in-memory store lock poisoned".to_owned()))
    }
}
