//! Port abstraction for candidate applications.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    ApplicationDetails, ApplicationId, ApplicationSearch, ApplicationStatus,
    CandidateApplication, LecturerComment, Ranking, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by application repository adapters.
    pub enum ApplicationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "application repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "application repository query failed: {message}",
        /// The candidate already applied for this course and session type.
        Duplicate => "an application for this course and session type already exists",
        /// Another application in the same course and session type holds the rank.
        RankingTaken { ranking: u32 } => "ranking {ranking} is already assigned",
        /// The application left the accepted status before the rank was written.
        NotAccepted => "only accepted applications can be ranked",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Insert a new application.
    async fn insert(
        &self,
        application: &CandidateApplication,
    ) -> Result<(), ApplicationRepositoryError>;

    /// Fetch one application with its candidate and course.
    async fn find_details(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<ApplicationDetails>, ApplicationRepositoryError>;

    /// Applications submitted by a candidate, newest first.
    async fn list_for_candidate(
        &self,
        candidate_id: &UserId,
    ) -> Result<Vec<ApplicationDetails>, ApplicationRepositoryError>;

    /// Filtered and sorted applications.
    async fn search(
        &self,
        search: &ApplicationSearch,
    ) -> Result<Vec<ApplicationDetails>, ApplicationRepositoryError>;

    /// Set the status. Any status other than accepted clears the ranking.
    async fn update_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<CandidateApplication>, ApplicationRepositoryError>;

    /// Set or clear the ranking.
    async fn set_ranking(
        &self,
        id: &ApplicationId,
        ranking: Option<Ranking>,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<CandidateApplication>, ApplicationRepositoryError>;

    /// Replace the lecturer comment.
    async fn set_comment(
        &self,
        id: &ApplicationId,
        comment: &LecturerComment,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<CandidateApplication>, ApplicationRepositoryError>;
}
