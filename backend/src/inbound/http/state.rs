//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountCommand, CandidateWorkspace, CourseQuery, LecturerReview};

/// Driving ports used by the REST handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountCommand>,
    pub courses: Arc<dyn CourseQuery>,
    pub candidates: Arc<dyn CandidateWorkspace>,
    pub lecturers: Arc<dyn LecturerReview>,
}

impl HttpState {
    /// Bundle the role services behind their ports.
    pub fn new(
        accounts: Arc<dyn AccountCommand>,
        courses: Arc<dyn CourseQuery>,
        candidates: Arc<dyn CandidateWorkspace>,
        lecturers: Arc<dyn LecturerReview>,
    ) -> Self {
        Self {
            accounts,
            courses,
            candidates,
            lecturers,
        }
    }
}
