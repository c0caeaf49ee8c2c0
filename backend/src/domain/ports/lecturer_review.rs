//! Driving port for lecturers reviewing applications to their courses.
//!
//! Every operation is scoped to the courses assigned to the acting lecturer.

use async_trait::async_trait;

use crate::domain::{
    ApplicationDetails, ApplicationId, ApplicationSearch, ApplicationStatus, CandidateApplication,
    CandidateProfile, Course, CourseId, Error, LecturerComment, Ranking, SelectionStatistics,
    UserId,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LecturerReview: Send + Sync {
    /// Courses the lecturer is assigned to.
    async fn assigned_courses(&self, lecturer_id: &UserId) -> Result<Vec<Course>, Error>;

    /// Filtered applications across the lecturer's courses.
    async fn search_applications(
        &self,
        lecturer_id: &UserId,
        search: ApplicationSearch,
    ) -> Result<Vec<ApplicationDetails>, Error>;

    /// Profile of a candidate who applied to one of the lecturer's courses.
    async fn candidate_profile(
        &self,
        lecturer_id: &UserId,
        candidate_id: &UserId,
    ) -> Result<CandidateProfile, Error>;

    /// Accept, reject, or reset an application.
    async fn set_status(
        &self,
        lecturer_id: &UserId,
        application_id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<CandidateApplication, Error>;

    /// Rank an accepted application, or clear the rank with `None`.
    async fn set_ranking(
        &self,
        lecturer_id: &UserId,
        application_id: &ApplicationId,
        ranking: Option<Ranking>,
    ) -> Result<CandidateApplication, Error>;

    /// Record a comment on an application.
    async fn set_comment(
        &self,
        lecturer_id: &UserId,
        application_id: &ApplicationId,
        comment: LecturerComment,
    ) -> Result<CandidateApplication, Error>;

    /// Most, least, and not chosen applicants, optionally for one course.
    async fn statistics(
        &self,
        lecturer_id: &UserId,
        course_id: Option<CourseId>,
    ) -> Result<SelectionStatistics, Error>;
}
