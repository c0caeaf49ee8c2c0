//! Driving port for administrator use-cases: course management, lecturer
//! assignment, candidate blocking, and reports.
//!
//! Every operation takes the acting user's id and refuses non-admins.

use async_trait::async_trait;
use futures_util::stream::BoxStream;

use crate::domain::{
    ApplicationDetails, ApplicationSearch, CandidateSummary, CandidateTally, CandidateUnavailable,
    Course, CourseDraft, CourseId, CourseSelection, Error, Role, User, UserId,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminConsole: Send + Sync {
    /// Users, optionally filtered by role.
    async fn list_users(&self, admin_id: &UserId, role: Option<Role>) -> Result<Vec<User>, Error>;

    /// Lecturers assigned to a course.
    async fn course_lecturers(
        &self,
        admin_id: &UserId,
        course_id: &CourseId,
    ) -> Result<Vec<User>, Error>;

    /// Create a course. Duplicate codes are refused with `conflict`.
    async fn create_course(&self, admin_id: &UserId, draft: CourseDraft) -> Result<Course, Error>;

    /// Replace a course's editable fields.
    async fn update_course(
        &self,
        admin_id: &UserId,
        course_id: &CourseId,
        draft: CourseDraft,
    ) -> Result<Course, Error>;

    /// Delete a course along with its applications and assignments.
    async fn delete_course(&self, admin_id: &UserId, course_id: &CourseId) -> Result<(), Error>;

    /// Assign a lecturer to a course.
    async fn assign_lecturer(
        &self,
        admin_id: &UserId,
        lecturer_id: &UserId,
        course_id: &CourseId,
    ) -> Result<(), Error>;

    /// Remove a lecturer from a course.
    async fn unassign_lecturer(
        &self,
        admin_id: &UserId,
        lecturer_id: &UserId,
        course_id: &CourseId,
    ) -> Result<(), Error>;

    /// Block a candidate and announce that they are unavailable.
    async fn block_candidate(&self, admin_id: &UserId, candidate_id: &UserId)
    -> Result<User, Error>;

    /// Lift a block.
    async fn unblock_candidate(
        &self,
        admin_id: &UserId,
        candidate_id: &UserId,
    ) -> Result<User, Error>;

    /// Applications across every course.
    async fn list_applications(
        &self,
        admin_id: &UserId,
        search: ApplicationSearch,
    ) -> Result<Vec<ApplicationDetails>, Error>;

    /// Each course with the candidates accepted for it.
    async fn chosen_candidates_by_course(
        &self,
        admin_id: &UserId,
    ) -> Result<Vec<CourseSelection>, Error>;

    /// Candidates accepted for more than `threshold` courses.
    async fn candidates_chosen_for_more_than(
        &self,
        admin_id: &UserId,
        threshold: u32,
    ) -> Result<Vec<CandidateTally>, Error>;

    /// Candidates with no accepted application.
    async fn unchosen_candidates(&self, admin_id: &UserId) -> Result<Vec<CandidateSummary>, Error>;

    /// Live feed of candidates becoming unavailable.
    async fn candidate_unavailable_events(
        &self,
        admin_id: &UserId,
    ) -> Result<BoxStream<'static, CandidateUnavailable>, Error>;
}
