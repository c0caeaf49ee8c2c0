//! Administrator use-cases: courses, lecturer assignment, blocking, reports.
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::stream::BoxStream;
use mockable::Clock;
use tracing::info;

use crate::domain::access::{RepositorySet, require_actor};
use crate::domain::ports::{AdminConsole, AvailabilityNotifier};
use crate::domain::{
    ApplicationDetails, ApplicationSearch, CandidateSummary, CandidateTally, CandidateUnavailable,
    Course, CourseDraft, CourseId, CourseSelection, Error, Role, User, UserId,
    candidates_chosen_for_more_than, chosen_candidates_by_course, unchosen_candidates,
};

/// Admin service implementing [`AdminConsole`].
#[derive(Clone)]
pub struct AdminService {
    repos: RepositorySet,
    notifier: Arc<dyn AvailabilityNotifier>,
    clock: Arc<dyn Clock>,
}

impl AdminService {
    /// Create a service over the shared repositories and event notifier.
    pub fn new(
        repos: RepositorySet,
        notifier: Arc<dyn AvailabilityNotifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repos,
            notifier,
            clock,
        }
    }

    async fn require_admin(&self, admin_id: &UserId) -> Result<(), Error> {
        require_actor(self.repos.users.as_ref(), admin_id, Role::Admin).await?;
        Ok(())
    }

    async fn user_with_role(&self, user_id: &UserId, role: Role) -> Result<User, Error> {
        let user = self
            .repos
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("user {user_id} not found")))?;
        if user.role != role {
            return Err(Error::invalid_request(format!(
                "user {user_id} is a {}, not a {role}",
                user.role
            )));
        }
        Ok(user)
    }

    async fn existing_course(&self, course_id: &CourseId) -> Result<Course, Error> {
        self.repos
            .courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("course {course_id} not found")))
    }

    async fn set_blocked(
        &self,
        admin_id: &UserId,
        candidate_id: &UserId,
        blocked: bool,
    ) -> Result<(User, bool), Error> {
        self.require_admin(admin_id).await?;
        let before = self.user_with_role(candidate_id, Role::Candidate).await?;
        let after = self
            .repos
            .users
            .set_blocked(candidate_id, blocked)
            .await?
            .ok_or_else(|| Error::not_found(format!("user {candidate_id} not found")))?;
        info!(%admin_id, %candidate_id, blocked, "changed candidate block");
        Ok((after, before.is_blocked != blocked))
    }

    async fn all_applications(&self) -> Result<Vec<ApplicationDetails>, Error> {
        Ok(self
            .repos
            .applications
            .search(&ApplicationSearch::default())
            .await?)
    }
}

#[async_trait]
impl AdminConsole for AdminService {
    async fn list_users(&self, admin_id: &UserId, role: Option<Role>) -> Result<Vec<User>, Error> {
        self.require_admin(admin_id).await?;
        Ok(self.repos.users.list(role).await?)
    }

    async fn course_lecturers(
        &self,
        admin_id: &UserId,
        course_id: &CourseId,
    ) -> Result<Vec<User>, Error> {
        self.require_admin(admin_id).await?;
        self.existing_course(course_id).await?;
        let ids = self.repos.courses.lecturer_ids(course_id).await?;
        let mut lecturers = Vec::with_capacity(ids.len());
        for id in &ids {
            if let Some(user) = self.repos.users.find_by_id(id).await? {
                lecturers.push(user);
            }
        }
        Ok(lecturers)
    }

    async fn create_course(&self, admin_id: &UserId, draft: CourseDraft) -> Result<Course, Error> {
        self.require_admin(admin_id).await?;
        let now = self.clock.utc();
        let course = Course {
            id: CourseId::random(),
            code: draft.code,
            name: draft.name,
            semester: draft.semester,
            description: draft.description,
            created_at: now,
            updated_at: now,
        };
        self.repos.courses.insert(&course).await?;
        info!(%admin_id, course_id = %course.id, code = %course.code, "created course");
        Ok(course)
    }

    async fn update_course(
        &self,
        admin_id: &UserId,
        course_id: &CourseId,
        draft: CourseDraft,
    ) -> Result<Course, Error> {
        self.require_admin(admin_id).await?;
        let course = self
            .repos
            .courses
            .update(course_id, &draft, self.clock.utc())
            .await?
            .ok_or_else(|| Error::not_found(format!("course {course_id} not found")))?;
        info!(%admin_id, %course_id, "updated course");
        Ok(course)
    }

    async fn delete_course(&self, admin_id: &UserId, course_id: &CourseId) -> Result<(), Error> {
        self.require_admin(admin_id).await?;
        if !self.repos.courses.delete(course_id).await? {
            return Err(Error::not_found(format!("course {course_id} not found")));
        }
        info!(%admin_id, %course_id, "deleted course");
        Ok(())
    }

    async fn assign_lecturer(
        &self,
        admin_id: &UserId,
        lecturer_id: &UserId,
        course_id: &CourseId,
    ) -> Result<(), Error> {
        self.require_admin(admin_id).await?;
        self.user_with_role(lecturer_id, Role::Lecturer).await?;
        self.existing_course(course_id).await?;
        self.repos
            .courses
            .assign_lecturer(lecturer_id, course_id)
            .await?;
        info!(%admin_id, %lecturer_id, %course_id, "assigned lecturer");
        Ok(())
    }

    async fn unassign_lecturer(
        &self,
        admin_id: &UserId,
        lecturer_id: &UserId,
        course_id: &CourseId,
    ) -> Result<(), Error> {
        self.require_admin(admin_id).await?;
        if !self
            .repos
            .courses
            .unassign_lecturer(lecturer_id, course_id)
            .await?
        {
            return Err(Error::not_found("lecturer is not assigned to this course"));
        }
        info!(%admin_id, %lecturer_id, %course_id, "unassigned lecturer");
        Ok(())
    }

    async fn block_candidate(
        &self,
        admin_id: &UserId,
        candidate_id: &UserId,
    ) -> Result<User, Error> {
        let (user, changed) = self.set_blocked(admin_id, candidate_id, true).await?;
        if changed {
            self.notifier
                .publish(CandidateUnavailable::for_user(&user, self.clock.utc()));
        }
        Ok(user)
    }

    async fn unblock_candidate(
        &self,
        admin_id: &UserId,
        candidate_id: &UserId,
    ) -> Result<User, Error> {
        let (user, _) = self.set_blocked(admin_id, candidate_id, false).await?;
        Ok(user)
    }

    async fn list_applications(
        &self,
        admin_id: &UserId,
        search: ApplicationSearch,
    ) -> Result<Vec<ApplicationDetails>, Error> {
        self.require_admin(admin_id).await?;
        let search = ApplicationSearch {
            restrict_to_lecturer: None,
            ..search.normalised()
        };
        Ok(self.repos.applications.search(&search).await?)
    }

    async fn chosen_candidates_by_course(
        &self,
        admin_id: &UserId,
    ) -> Result<Vec<CourseSelection>, Error> {
        self.require_admin(admin_id).await?;
        let courses = self.repos.courses.list().await?;
        let applications = self.all_applications().await?;
        Ok(chosen_candidates_by_course(&courses, &applications))
    }

    async fn candidates_chosen_for_more_than(
        &self,
        admin_id: &UserId,
        threshold: u32,
    ) -> Result<Vec<CandidateTally>, Error> {
        self.require_admin(admin_id).await?;
        let applications = self.all_applications().await?;
        Ok(candidates_chosen_for_more_than(&applications, threshold))
    }

    async fn unchosen_candidates(&self, admin_id: &UserId) -> Result<Vec<CandidateSummary>, Error> {
        self.require_admin(admin_id).await?;
        let candidates = self.repos.users.list(Some(Role::Candidate)).await?;
        let applications = self.all_applications().await?;
        Ok(unchosen_candidates(&candidates, &applications))
    }

    async fn candidate_unavailable_events(
        &self,
        admin_id: &UserId,
    ) -> Result<BoxStream<'static, CandidateUnavailable>, Error> {
        self.require_admin(admin_id).await?;
        Ok(self.notifier.subscribe())
    }
}

#[cfg(test)]
#[path = "admin_service_tests.rs"]
mod tests;
