//! Admin mutations: course management, lecturer assignment, and blocking.

use async_graphql::{Context, ID, Object, Result};

use super::query::{course_id, user_id};
use super::types::{Course, CourseInput, User};
use super::{caller, ports, to_gql};
use crate::domain::CourseDraft;
use crate::inbound::validation::invalid;

fn draft(input: &CourseInput) -> Result<CourseDraft> {
    CourseDraft::try_from_parts(
        &input.code,
        &input.name,
        &input.semester,
        input.description.as_deref(),
    )
    .map_err(|err| to_gql(invalid(err)))
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_course(&self, ctx: &Context<'_>, input: CourseInput) -> Result<Course> {
        let caller = caller(ctx)?;
        let course = ports(ctx)?
            .admin
            .create_course(&caller, draft(&input)?)
            .await
            .map_err(to_gql)?;
        Ok(Course(course))
    }

    async fn update_course(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: CourseInput,
    ) -> Result<Course> {
        let caller = caller(ctx)?;
        let id = course_id(&id, "id")?;
        let course = ports(ctx)?
            .admin
            .update_course(&caller, &id, draft(&input)?)
            .await
            .map_err(to_gql)?;
        Ok(Course(course))
    }

    /// Deletes the course with its assignments and applications.
    async fn delete_course(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        let caller = caller(ctx)?;
        let id = course_id(&id, "id")?;
        ports(ctx)?
            .admin
            .delete_course(&caller, &id)
            .await
            .map_err(to_gql)?;
        Ok(true)
    }

    async fn assign_lecturer(
        &self,
        ctx: &Context<'_>,
        lecturer_id: ID,
        course_id: ID,
    ) -> Result<bool> {
        let caller = caller(ctx)?;
        let lecturer = user_id(&lecturer_id, "lecturerId")?;
        let course = super::query::course_id(&course_id, "courseId")?;
        ports(ctx)?
            .admin
            .assign_lecturer(&caller, &lecturer, &course)
            .await
            .map_err(to_gql)?;
        Ok(true)
    }

    async fn unassign_lecturer(
        &self,
        ctx: &Context<'_>,
        lecturer_id: ID,
        course_id: ID,
    ) -> Result<bool> {
        let caller = caller(ctx)?;
        let lecturer = user_id(&lecturer_id, "lecturerId")?;
        let course = super::query::course_id(&course_id, "courseId")?;
        ports(ctx)?
            .admin
            .unassign_lecturer(&caller, &lecturer, &course)
            .await
            .map_err(to_gql)?;
        Ok(true)
    }

    /// Blocks a candidate and notifies `candidateUnavailable` subscribers.
    async fn block_candidate(&self, ctx: &Context<'_>, candidate_id: ID) -> Result<User> {
        let caller = caller(ctx)?;
        let candidate = user_id(&candidate_id, "candidateId")?;
        let user = ports(ctx)?
            .admin
            .block_candidate(&caller, &candidate)
            .await
            .map_err(to_gql)?;
        Ok(User(user))
    }

    async fn unblock_candidate(&self, ctx: &Context<'_>, candidate_id: ID) -> Result<User> {
        let caller = caller(ctx)?;
        let candidate = user_id(&candidate_id, "candidateId")?;
        let user = ports(ctx)?
            .admin
            .unblock_candidate(&caller, &candidate)
            .await
            .map_err(to_gql)?;
        Ok(User(user))
    }
}
