//! Public course catalogue.
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{CourseQuery, CourseRepository};
use crate::domain::{Course, CourseId, Error};

/// Catalogue service implementing [`CourseQuery`].
#[derive(Clone)]
pub struct CourseCatalogueService {
    courses: Arc<dyn CourseRepository>,
}

impl CourseCatalogueService {
    /// Create a service over the course store.
    pub fn new(courses: Arc<dyn CourseRepository>) -> Self {
        Self { courses }
    }
}

#[async_trait]
impl CourseQuery for CourseCatalogueService {
    async fn list_courses(&self) -> Result<Vec<Course>, Error> {
        Ok(self.courses.list().await?)
    }

    async fn get_course(&self, id: &CourseId) -> Result<Course, Error> {
        self.courses
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("course {id} not found")))
    }
}
