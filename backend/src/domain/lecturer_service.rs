//! Lecturer review of applications to assigned courses.
//!
//! Every read and mutation is scoped to courses the acting lecturer is
//! assigned to; anything else is refused with `forbidden`.
use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::access::{RepositorySet, require_actor};
use crate::domain::ports::LecturerReview;
use crate::domain::{
    ApplicationDetails, ApplicationId, ApplicationSearch, ApplicationStatus, CandidateApplication,
    CandidateProfile, Course, CourseId, Error, LecturerComment, Ranking, Role,
    SelectionStatistics, UserId, selection_statistics,
};

/// Lecturer service implementing [`LecturerReview`].
#[derive(Clone)]
pub struct LecturerService {
    repos: RepositorySet,
    clock: Arc<dyn Clock>,
}

impl LecturerService {
    /// Create a service over the shared repositories.
    pub fn new(repos: RepositorySet, clock: Arc<dyn Clock>) -> Self {
        Self { repos, clock }
    }

    async fn require_lecturer(&self, lecturer_id: &UserId) -> Result<(), Error> {
        require_actor(self.repos.users.as_ref(), lecturer_id, Role::Lecturer).await?;
        Ok(())
    }

    async fn require_assignment(
        &self,
        lecturer_id: &UserId,
        course_id: &CourseId,
    ) -> Result<(), Error> {
        if self
            .repos
            .courses
            .is_assigned(lecturer_id, course_id)
            .await?
        {
            Ok(())
        } else {
            Err(Error::forbidden("you are not assigned to this course"))
        }
    }

    /// Load an application whose course the lecturer is assigned to.
    async fn reviewable(
        &self,
        lecturer_id: &UserId,
        application_id: &ApplicationId,
    ) -> Result<ApplicationDetails, Error> {
        self.require_lecturer(lecturer_id).await?;
        let details = self
            .repos
            .applications
            .find_details(application_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("application {application_id} not found")))?;
        self.require_assignment(lecturer_id, &details.application.course_id)
            .await?;
        Ok(details)
    }
}

fn updated(
    application_id: &ApplicationId,
    result: Option<CandidateApplication>,
) -> Result<CandidateApplication, Error> {
    result.ok_or_else(|| Error::not_found(format!("application {application_id} not found")))
}

#[async_trait]
impl LecturerReview for LecturerService {
    async fn assigned_courses(&self, lecturer_id: &UserId) -> Result<Vec<Course>, Error> {
        self.require_lecturer(lecturer_id).await?;
        Ok(self.repos.courses.courses_for_lecturer(lecturer_id).await?)
    }

    async fn search_applications(
        &self,
        lecturer_id: &UserId,
        search: ApplicationSearch,
    ) -> Result<Vec<ApplicationDetails>, Error> {
        self.require_lecturer(lecturer_id).await?;
        if let Some(course_id) = search.course_id.as_ref() {
            self.require_assignment(lecturer_id, course_id).await?;
        }
        let search = ApplicationSearch {
            restrict_to_lecturer: Some(*lecturer_id),
            ..search.normalised()
        };
        Ok(self.repos.applications.search(&search).await?)
    }

    async fn candidate_profile(
        &self,
        lecturer_id: &UserId,
        candidate_id: &UserId,
    ) -> Result<CandidateProfile, Error> {
        self.require_lecturer(lecturer_id).await?;
        let courses: HashSet<CourseId> = self
            .repos
            .courses
            .courses_for_lecturer(lecturer_id)
            .await?
            .into_iter()
            .map(|course| course.id)
            .collect();
        let applied_to_lecturer = self
            .repos
            .applications
            .list_for_candidate(candidate_id)
            .await?
            .iter()
            .any(|details| courses.contains(&details.application.course_id));
        if !applied_to_lecturer {
            return Err(Error::not_found(format!(
                "no applicant {candidate_id} on your courses"
            )));
        }
        Ok(self.repos.profiles.load(candidate_id).await?)
    }

    async fn set_status(
        &self,
        lecturer_id: &UserId,
        application_id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<CandidateApplication, Error> {
        self.reviewable(lecturer_id, application_id).await?;
        let result = self
            .repos
            .applications
            .update_status(application_id, status, self.clock.utc())
            .await?;
        info!(%lecturer_id, %application_id, %status, "set application status");
        updated(application_id, result)
    }

    async fn set_ranking(
        &self,
        lecturer_id: &UserId,
        application_id: &ApplicationId,
        ranking: Option<Ranking>,
    ) -> Result<CandidateApplication, Error> {
        let details = self.reviewable(lecturer_id, application_id).await?;
        if ranking.is_some() && details.application.status != ApplicationStatus::Accepted {
            return Err(Error::conflict("only accepted applications can be ranked"));
        }
        let result = self
            .repos
            .applications
            .set_ranking(application_id, ranking, self.clock.utc())
            .await?;
        info!(
            %lecturer_id,
            %application_id,
            ranking = ranking.map(Ranking::get),
            "set application ranking"
        );
        updated(application_id, result)
    }

    async fn set_comment(
        &self,
        lecturer_id: &UserId,
        application_id: &ApplicationId,
        comment: LecturerComment,
    ) -> Result<CandidateApplication, Error> {
        self.reviewable(lecturer_id, application_id).await?;
        let result = self
            .repos
            .applications
            .set_comment(application_id, &comment, self.clock.utc())
            .await?;
        updated(application_id, result)
    }

    async fn statistics(
        &self,
        lecturer_id: &UserId,
        course_id: Option<CourseId>,
    ) -> Result<SelectionStatistics, Error> {
        self.require_lecturer(lecturer_id).await?;
        if let Some(course_id) = course_id.as_ref() {
            self.require_assignment(lecturer_id, course_id).await?;
        }
        let applications = self
            .repos
            .applications
            .search(&ApplicationSearch {
                course_id,
                restrict_to_lecturer: Some(*lecturer_id),
                ..ApplicationSearch::default()
            })
            .await?;
        Ok(selection_statistics(&applications))
    }
}

#[cfg(test)]
#[path = "lecturer_service_tests.rs"]
mod tests;
