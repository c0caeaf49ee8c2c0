//! `CourseRepository` over the in-memory tables.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{CourseRepository, CourseRepositoryError};
use crate::domain::{Course, CourseDraft, CourseId, UserId};

use super::InMemoryStore;

fn sorted_by_code(mut courses: Vec<Course>) -> Vec<Course> {
    courses.sort_by(|left, right| left.code.cmp(&right.code));
    courses
}

#[async_trait]
impl CourseRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Course>, CourseRepositoryError> {
        let state = self.lock(CourseRepositoryError::query)?;
        Ok(sorted_by_code(state.courses.values().cloned().collect()))
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        let state = self.lock(CourseRepositoryError::query)?;
        Ok(state.courses.get(id).cloned())
    }

    async fn insert(&self, course: &Course) -> Result<(), CourseRepositoryError> {
        let mut state = self.lock(CourseRepositoryError::query)?;
        if state.courses.values().any(|existing| existing.code == course.code) {
            return Err(CourseRepositoryError::duplicate_code(course.code.to_string()));
        }
        state.courses.insert(course.id, course.clone());
        Ok(())
    }

    async fn update(
        &self,
        id: &CourseId,
        draft: &CourseDraft,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Course>, CourseRepositoryError> {
        let mut state = self.lock(CourseRepositoryError::query)?;
        if state
            .courses
            .values()
            .any(|existing| existing.id != *id && existing.code == draft.code)
        {
            return Err(CourseRepositoryError::duplicate_code(draft.code.to_string()));
        }
        Ok(state.courses.get_mut(id).map(|course| {
            course.code = draft.code.clone();
            course.name = draft.name.clone();
            course.semester = draft.semester.clone();
            course.description = draft.description.clone();
            course.updated_at = updated_at;
            course.clone()
        }))
    }

    async fn delete(&self, id: &CourseId) -> Result<bool, CourseRepositoryError> {
        let mut state = self.lock(CourseRepositoryError::query)?;
        if state.courses.remove(id).is_none() {
            return Ok(false);
        }
        state.assignments.retain(|(_, course)| course != id);
        state
            .applications
            .retain(|_, application| application.course_id != *id);
        Ok(true)
    }

    async fn assign_lecturer(
        &self,
        lecturer_id: &UserId,
        course_id: &CourseId,
    ) -> Result<(), CourseRepositoryError> {
        let mut state = self.lock(CourseRepositoryError::query)?;
        if !state.is_assigned(lecturer_id, course_id) {
            state.assignments.push((*lecturer_id, *course_id));
        }
        Ok(())
    }

    async fn unassign_lecturer(
        &self,
        lecturer_id: &UserId,
        course_id: &CourseId,
    ) -> Result<bool, CourseRepositoryError> {
        let mut state = self.lock(CourseRepositoryError::query)?;
        let before = state.assignments.len();
        state
            .assignments
            .retain(|(lecturer, course)| !(lecturer == lecturer_id && course == course_id));
        Ok(state.assignments.len() < before)
    }

    async fn courses_for_lecturer(
        &self,
        lecturer_id: &UserId,
    ) -> Result<Vec<Course>, CourseRepositoryError> {
        let state = self.lock(CourseRepositoryError::query)?;
        let courses = state
            .assignments
            .iter()
            .filter(|(lecturer, _)| lecturer == lecturer_id)
            .filter_map(|(_, course_id)| state.courses.get(course_id).cloned())
            .collect();
        Ok(sorted_by_code(courses))
    }

    async fn lecturer_ids(&self, course_id: &CourseId) -> Result<Vec<UserId>, CourseRepositoryError> {
        let state = self.lock(CourseRepositoryError::query)?;
        Ok(state
            .assignments
            .iter()
            .filter(|(_, course)| course == course_id)
            .map(|(lecturer, _)| *lecturer)
            .collect())
    }

    async fn is_assigned(
        &self,
        lecturer_id: &UserId,
        course_id: &CourseId,
    ) -> Result<bool, CourseRepositoryError> {
        let state = self.lock(CourseRepositoryError::query)?;
        Ok(state.is_assigned(lecturer_id, course_id))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::test_fixtures::course_fixture;

    #[tokio::test]
    async fn duplicate_code_is_rejected() {
        let store = InMemoryStore::new();
        store
            .insert(&course_fixture("COSC2758", "Full Stack"))
            .await
            .expect("first insert");

        let err = store
            .insert(&course_fixture("COSC2758", "Another"))
            .await
            .expect_err("duplicate code");

        assert!(matches!(err, CourseRepositoryError::DuplicateCode { .. }));
    }

    #[tokio::test]
    async fn assignment_is_idempotent_and_removable() {
        let store = InMemoryStore::new();
        let course = course_fixture("COSC2758", "Full Stack");
        let course_id = course.id;
        store.insert(&course).await.expect("insert");
        let lecturer = UserId::random();

        store
            .assign_lecturer(&lecturer, &course_id)
            .await
            .expect("assign");
        store
            .assign_lecturer(&lecturer, &course_id)
            .await
            .expect("assign again");

        assert_eq!(
            store.lecturer_ids(&course_id).await.expect("ids"),
            vec![lecturer]
        );
        assert!(
            store
                .unassign_lecturer(&lecturer, &course_id)
                .await
                .expect("unassign")
        );
        assert!(
            !store
                .is_assigned(&lecturer, &course_id)
                .await
                .expect("lookup")
        );
    }

    #[tokio::test]
    async fn delete_cascades_assignments() {
        let store = InMemoryStore::new();
        let course = course_fixture("COSC2758", "Full Stack");
        let course_id = course.id;
        store.insert(&course).await.expect("insert");
        let lecturer = UserId::random();
        store
            .assign_lecturer(&lecturer, &course_id)
            .await
            .expect("assign");

        assert!(store.delete(&course_id).await.expect("delete"));
        assert!(
            store
                .courses_for_lecturer(&lecturer)
                .await
                .expect("courses")
                .is_empty()
        );
    }
}
