//! Port abstraction for courses and lecturer assignments.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Course, CourseDraft, CourseId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by course repository adapters.
    pub enum CourseRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "course repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "course repository query failed: {message}",
        /// Another course already uses the code.
        DuplicateCode { code: String } => "course code {code} already exists",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// All courses ordered by code.
    async fn list(&self) -> Result<Vec<Course>, CourseRepositoryError>;

    /// Fetch a course by identifier.
    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError>;

    /// Insert a new course.
    async fn insert(&self, course: &Course) -> Result<(), CourseRepositoryError>;

    /// Replace the editable fields; `None` when the course does not exist.
    async fn update(
        &self,
        id: &CourseId,
        draft: &CourseDraft,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Course>, CourseRepositoryError>;

    /// Delete a course and, by cascade, its applications and assignments.
    async fn delete(&self, id: &CourseId) -> Result<bool, CourseRepositoryError>;

    /// Link a lecturer to a course. Repeated assignment is a no-op.
    async fn assign_lecturer(
        &self,
        lecturer_id: &UserId,
        course_id: &CourseId,
    ) -> Result<(), CourseRepositoryError>;

    /// Remove a lecturer link, reporting whether one existed.
    async fn unassign_lecturer(
        &self,
        lecturer_id: &UserId,
        course_id: &CourseId,
    ) -> Result<bool, CourseRepositoryError>;

    /// Courses assigned to a lecturer, ordered by code.
    async fn courses_for_lecturer(
        &self,
        lecturer_id: &UserId,
    ) -> Result<Vec<Course>, CourseRepositoryError>;

    /// Lecturers assigned to a course.
    async fn lecturer_ids(&self, course_id: &CourseId) -> Result<Vec<UserId>, CourseRepositoryError>;

    /// Whether the lecturer is assigned to the course.
    async fn is_assigned(
        &self,
        lecturer_id: &UserId,
        course_id: &CourseId,
    ) -> Result<bool, CourseRepositoryError>;
}
