//! Driving port for the public course catalogue.

use async_trait::async_trait;

use crate::domain::{Course, CourseId, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseQuery: Send + Sync {
    /// Every course ordered by code.
    async fn list_courses(&self) -> Result<Vec<Course>, Error>;

    /// One course, or `not_found`.
    async fn get_course(&self, id: &CourseId) -> Result<Course, Error>;
}
