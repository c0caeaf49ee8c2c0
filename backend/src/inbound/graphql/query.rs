//! Read-only GraphQL fields.

use async_graphql::{Context, ID, Object, Result};

use super::types::{
    Application, Candidate, CandidateTally, Course, CourseSelection, RoleKind, StatusKind, User,
};
use super::{caller, ports, to_gql};
use crate::domain::{ApplicationSearch, CourseId, DEFAULT_SELECTION_THRESHOLD, UserId};
use crate::inbound::validation::parse_id;

pub(super) fn course_id(raw: &ID, field: &'static str) -> Result<CourseId> {
    parse_id(raw.as_str(), field, |raw| CourseId::new(raw)).map_err(to_gql)
}

pub(super) fn user_id(raw: &ID, field: &'static str) -> Result<UserId> {
    parse_id(raw.as_str(), field, |raw| UserId::new(raw)).map_err(to_gql)
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// The signed-in user.
    async fn me(&self, ctx: &Context<'_>) -> Result<User> {
        let caller = caller(ctx)?;
        let user = ports(ctx)?
            .accounts
            .current_user(&caller)
            .await
            .map_err(to_gql)?;
        Ok(User(user))
    }

    /// Every course, ordered by code.
    async fn courses(&self, ctx: &Context<'_>) -> Result<Vec<Course>> {
        let courses = ports(ctx)?.courses.list_courses().await.map_err(to_gql)?;
        Ok(courses.into_iter().map(Course).collect())
    }

    async fn course(&self, ctx: &Context<'_>, id: ID) -> Result<Course> {
        let id = course_id(&id, "id")?;
        let course = ports(ctx)?.courses.get_course(&id).await.map_err(to_gql)?;
        Ok(Course(course))
    }

    /// Accounts, optionally filtered by role. Admin only.
    async fn users(&self, ctx: &Context<'_>, role: Option<RoleKind>) -> Result<Vec<User>> {
        let caller = caller(ctx)?;
        let users = ports(ctx)?
            .admin
            .list_users(&caller, role.map(Into::into))
            .await
            .map_err(to_gql)?;
        Ok(users.into_iter().map(User).collect())
    }

    /// Lecturers assigned to a course. Admin only.
    async fn course_lecturers(&self, ctx: &Context<'_>, course_id: ID) -> Result<Vec<User>> {
        let caller = caller(ctx)?;
        let course_id = self::course_id(&course_id, "courseId")?;
        let lecturers = ports(ctx)?
            .admin
            .course_lecturers(&caller, &course_id)
            .await
            .map_err(to_gql)?;
        Ok(lecturers.into_iter().map(User).collect())
    }

    /// Applications across every course. Admin only.
    async fn applications(
        &self,
        ctx: &Context<'_>,
        course_id: Option<ID>,
        status: Option<StatusKind>,
    ) -> Result<Vec<Application>> {
        let caller = caller(ctx)?;
        let search = ApplicationSearch {
            course_id: course_id
                .as_ref()
                .map(|raw| self::course_id(raw, "courseId"))
                .transpose()?,
            status: status.map(Into::into),
            ..ApplicationSearch::default()
        };
        let applications = ports(ctx)?
            .admin
            .list_applications(&caller, search)
            .await
            .map_err(to_gql)?;
        Ok(applications.into_iter().map(Application).collect())
    }

    /// Accepted candidates grouped by course. Admin only.
    async fn chosen_candidates_by_course(&self, ctx: &Context<'_>) -> Result<Vec<CourseSelection>> {
        let caller = caller(ctx)?;
        let report = ports(ctx)?
            .admin
            .chosen_candidates_by_course(&caller)
            .await
            .map_err(to_gql)?;
        Ok(report.into_iter().map(CourseSelection).collect())
    }

    /// Candidates accepted for more than `threshold` applications. Admin only.
    async fn candidates_chosen_for_more_than(
        &self,
        ctx: &Context<'_>,
        #[graphql(default_with = "DEFAULT_SELECTION_THRESHOLD")] threshold: u32,
    ) -> Result<Vec<CandidateTally>> {
        let caller = caller(ctx)?;
        let report = ports(ctx)?
            .admin
            .candidates_chosen_for_more_than(&caller, threshold)
            .await
            .map_err(to_gql)?;
        Ok(report.into_iter().map(CandidateTally).collect())
    }

    /// Applicants with no accepted application. Admin only.
    async fn unchosen_candidates(&self, ctx: &Context<'_>) -> Result<Vec<Candidate>> {
        let caller = caller(ctx)?;
        let report = ports(ctx)?
            .admin
            .unchosen_candidates(&caller)
            .await
            .map_err(to_gql)?;
        Ok(report.into_iter().map(Candidate).collect())
    }
}
