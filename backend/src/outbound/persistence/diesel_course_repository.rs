//! PostgreSQL-backed `CourseRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CourseRepository, CourseRepositoryError};
use crate::domain::{Course, CourseDraft, CourseId, UserId};

use super::diesel_error_mapping::{DbFailure, map_db_failure};
use super::models::{CourseRow, CourseUpdate, LecturerCourseRow};
use super::pool::DbPool;
use super::schema::{courses, lecturer_courses};

map_db_failure!(CourseRepositoryError);

const CODE_CONSTRAINT: &str = "courses_code_key";

/// Diesel-backed implementation of the `CourseRepository` port.
#[derive(Clone)]
pub struct DieselCourseRepository {
    pool: DbPool,
}

impl DieselCourseRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_course(row: CourseRow) -> Result<Course, CourseRepositoryError> {
    Course::try_from(row).map_err(CourseRepositoryError::query)
}

fn map_write_error(error: diesel::result::Error, code: &str) -> CourseRepositoryError {
    let failure = DbFailure::from(error);
    if failure.violates(CODE_CONSTRAINT) {
        CourseRepositoryError::duplicate_code(code)
    } else {
        failure.into()
    }
}

#[async_trait]
impl CourseRepository for DieselCourseRepository {
    async fn list(&self) -> Result<Vec<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(DbFailure::from)?;
        let rows: Vec<CourseRow> = courses::table
            .select(CourseRow::as_select())
            .order(courses::code.asc())
            .load(&mut conn)
            .await
            .map_err(DbFailure::from)?;
        rows.into_iter().map(to_course).collect()
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(DbFailure::from)?;
        let row: Option<CourseRow> = courses::table
            .find(id.as_uuid())
            .select(CourseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(DbFailure::from)?;
        row.map(to_course).transpose()
    }

    async fn insert(&self, course: &Course) -> Result<(), CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(DbFailure::from)?;
        diesel::insert_into(courses::table)
            .values(&CourseRow::from(course))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_write_error(err, course.code.as_ref()))
    }

    async fn update(
        &self,
        id: &CourseId,
        draft: &CourseDraft,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(DbFailure::from)?;
        let changes = CourseUpdate {
            code: draft.code.as_ref(),
            name: &draft.name,
            semester: &draft.semester,
            description: draft.description.as_deref(),
            updated_at,
        };
        let row: Option<CourseRow> = diesel::update(courses::table.find(id.as_uuid()))
            .set(&changes)
            .returning(CourseRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_write_error(err, draft.code.as_ref()))?;
        row.map(to_course).transpose()
    }

    async fn delete(&self, id: &CourseId) -> Result<bool, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(DbFailure::from)?;
        let deleted = diesel::delete(courses::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(DbFailure::from)?;
        Ok(deleted > 0)
    }

    async fn assign_lecturer(
        &self,
        lecturer_id: &UserId,
        course_id: &CourseId,
    ) -> Result<(), CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(DbFailure::from)?;
        diesel::insert_into(lecturer_courses::table)
            .values(&LecturerCourseRow {
                lecturer_id: *lecturer_id.as_uuid(),
                course_id: *course_id.as_uuid(),
            })
            .on_conflict_do_nothing()
            .execute(&mut conn)
            .await
            .map_err(DbFailure::from)?;
        Ok(())
    }

    async fn unassign_lecturer(
        &self,
        lecturer_id: &UserId,
        course_id: &CourseId,
    ) -> Result<bool, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(DbFailure::from)?;
        let deleted = diesel::delete(
            lecturer_courses::table
                .filter(lecturer_courses::lecturer_id.eq(lecturer_id.as_uuid()))
                .filter(lecturer_courses::course_id.eq(course_id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(DbFailure::from)?;
        Ok(deleted > 0)
    }

    async fn courses_for_lecturer(
        &self,
        lecturer_id: &UserId,
    ) -> Result<Vec<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(DbFailure::from)?;
        let rows: Vec<CourseRow> = courses::table
            .inner_join(lecturer_courses::table)
            .filter(lecturer_courses::lecturer_id.eq(lecturer_id.as_uuid()))
            .select(CourseRow::as_select())
            .order(courses::code.asc())
            .load(&mut conn)
            .await
            .map_err(DbFailure::from)?;
        rows.into_iter().map(to_course).collect()
    }

    async fn lecturer_ids(&self, course_id: &CourseId) -> Result<Vec<UserId>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(DbFailure::from)?;
        let ids: Vec<uuid::Uuid> = lecturer_courses::table
            .filter(lecturer_courses::course_id.eq(course_id.as_uuid()))
            .select(lecturer_courses::lecturer_id)
            .order(lecturer_courses::created_at.asc())
            .load(&mut conn)
            .await
            .map_err(DbFailure::from)?;
        Ok(ids.into_iter().map(UserId::from_uuid).collect())
    }

    async fn is_assigned(
        &self,
        lecturer_id: &UserId,
        course_id: &CourseId,
    ) -> Result<bool, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(DbFailure::from)?;
        let assigned = diesel::select(diesel::dsl::exists(
            lecturer_courses::table
                .filter(lecturer_courses::lecturer_id.eq(lecturer_id.as_uuid()))
                .filter(lecturer_courses::course_id.eq(course_id.as_uuid())),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(DbFailure::from)?;
        Ok(assigned)
    }
}
