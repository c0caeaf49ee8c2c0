//! `ApplicationRepository` over the in-memory tables.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{ApplicationRepository, ApplicationRepositoryError};
use crate::domain::{
    ApplicationDetails, ApplicationId, ApplicationSearch, ApplicationStatus, CandidateApplication,
    LecturerComment, Ranking, UserId,
};

use super::{InMemoryStore, StoreState};

impl StoreState {
    fn ranking_taken(&self, target: &CandidateApplication, ranking: Ranking) -> bool {
        self.applications.values().any(|other| {
            other.id != target.id
                && other.course_id == target.course_id
                && other.session_type == target.session_type
                && other.ranking == Some(ranking)
        })
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryStore {
    async fn insert(
        &self,
        application: &CandidateApplication,
    ) -> Result<(), ApplicationRepositoryError> {
        let mut state = self.lock(ApplicationRepositoryError::query)?;
        if state.applications.values().any(|existing| {
            existing.candidate_id == application.candidate_id
                && existing.course_id == application.course_id
                && existing.session_type == application.session_type
        }) {
            return Err(ApplicationRepositoryError::duplicate());
        }
        if !state.users.contains_key(&application.candidate_id)
            || !state.courses.contains_key(&application.course_id)
        {
            return Err(ApplicationRepositoryError::query(
                "application references a missing candidate or course",
            ));
        }
        state
            .applications
            .insert(application.id, application.clone());
        Ok(())
    }

    async fn find_details(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<ApplicationDetails>, ApplicationRepositoryError> {
        let state = self.lock(ApplicationRepositoryError::query)?;
        Ok(state
            .applications
            .get(id)
            .and_then(|application| state.details(application)))
    }

    async fn list_for_candidate(
        &self,
        candidate_id: &UserId,
    ) -> Result<Vec<ApplicationDetails>, ApplicationRepositoryError> {
        let state = self.lock(ApplicationRepositoryError::query)?;
        let mut results: Vec<ApplicationDetails> = state
            .applications
            .values()
            .filter(|application| application.candidate_id == *candidate_id)
            .filter_map(|application| state.details(application))
            .collect();
        results.sort_by(|left, right| {
            right
                .application
                .created_at
                .cmp(&left.application.created_at)
                .then_with(|| left.application.id.cmp(&right.application.id))
        });
        Ok(results)
    }

    async fn search(
        &self,
        search: &ApplicationSearch,
    ) -> Result<Vec<ApplicationDetails>, ApplicationRepositoryError> {
        let state = self.lock(ApplicationRepositoryError::query)?;
        let mut results: Vec<ApplicationDetails> = state
            .applications
            .values()
            .filter(|application| {
                search
                    .restrict_to_lecturer
                    .is_none_or(|lecturer| state.is_assigned(&lecturer, &application.course_id))
            })
            .filter_map(|application| state.details(application))
            .filter(|details| search.matches(details))
            .collect();
        results.sort_by(|left, right| search.sort.compare(left, right));
        Ok(results)
    }

    async fn update_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<CandidateApplication>, ApplicationRepositoryError> {
        let mut state = self.lock(ApplicationRepositoryError::query)?;
        Ok(state.applications.get_mut(id).map(|application| {
            application.status = status;
            if status != ApplicationStatus::Accepted {
                application.ranking = None;
            }
            application.updated_at = updated_at;
            application.clone()
        }))
    }

    async fn set_ranking(
        &self,
        id: &ApplicationId,
        ranking: Option<Ranking>,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<CandidateApplication>, ApplicationRepositoryError> {
        let mut state = self.lock(ApplicationRepositoryError::query)?;
        let Some(current) = state.applications.get(id) else {
            return Ok(None);
        };
        if let Some(rank) = ranking {
            if current.status != ApplicationStatus::Accepted {
                return Err(ApplicationRepositoryError::not_accepted());
            }
            if state.ranking_taken(current, rank) {
                return Err(ApplicationRepositoryError::ranking_taken(rank.get()));
            }
        }
        Ok(state.applications.get_mut(id).map(|application| {
            application.ranking = ranking;
            application.updated_at = updated_at;
            application.clone()
        }))
    }

    async fn set_comment(
        &self,
        id: &ApplicationId,
        comment: &LecturerComment,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<CandidateApplication>, ApplicationRepositoryError> {
        let mut state = self.lock(ApplicationRepositoryError::query)?;
        Ok(state.applications.get_mut(id).map(|application| {
            application.comment = Some(comment.clone());
            application.updated_at = updated_at;
            application.clone()
        }))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use chrono::Duration;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ports::{CourseRepository, UserRepository};
    use crate::domain::test_fixtures::{course_fixture, fixture_timestamp};
    use crate::domain::{
        ApplicationSort, Availability, CourseId, EmailAddress, Error, ErrorCode, NewUserAccount,
        PersonName, Role, SessionType, Skills,
    };

    struct Seeded {
        store: InMemoryStore,
        candidates: Vec<UserId>,
        course_id: CourseId,
    }

    async fn add_candidate(store: &InMemoryStore, first: &str) -> UserId {
        let account = NewUserAccount {
            id: UserId::random(),
            first_name: PersonName::new(first).expect("first name"),
            last_name: PersonName::new("Tester").expect("last name"),
            email: EmailAddress::new(format!("{}@example.com", first.to_lowercase()))
                .expect("email"),
            role: Role::Candidate,
            password_hash: "hash".to_owned(),
            created_at: fixture_timestamp(),
        };
        UserRepository::insert(store, &account)
            .await
            .expect("insert candidate");
        account.id
    }

    fn application(
        candidate_id: UserId,
        course_id: CourseId,
        minutes: i64,
    ) -> CandidateApplication {
        let created_at = fixture_timestamp() + Duration::minutes(minutes);
        CandidateApplication {
            id: ApplicationId::random(),
            candidate_id,
            course_id,
            session_type: SessionType::Tutor,
            status: ApplicationStatus::Pending,
            ranking: None,
            comment: None,
            availability: Availability::PartTime,
            skills: Skills::new(["Rust"]).expect("skills"),
            created_at,
            updated_at: created_at,
        }
    }

    #[fixture]
    async fn seeded() -> Seeded {
        let store = InMemoryStore::new();
        let course = course_fixture("COSC2758", "Full Stack");
        let course_id = course.id;
        CourseRepository::insert(&store, &course)
            .await
            .expect("insert course");
        let mut candidates = Vec::new();
        for name in ["Ada", "Grace"] {
            candidates.push(add_candidate(&store, name).await);
        }
        Seeded {
            store,
            candidates,
            course_id,
        }
    }

    async fn accepted(seeded: &Seeded, candidate: usize) -> ApplicationId {
        let submitted = application(seeded.candidates[candidate], seeded.course_id, 0);
        ApplicationRepository::insert(&seeded.store, &submitted)
            .await
            .expect("insert application");
        seeded
            .store
            .update_status(&submitted.id, ApplicationStatus::Accepted, fixture_timestamp())
            .await
            .expect("accept");
        submitted.id
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_session_application_is_rejected(#[future] seeded: Seeded) {
        let seeded = seeded.await;
        let candidate = seeded.candidates[0];
        ApplicationRepository::insert(&seeded.store, &application(candidate, seeded.course_id, 0))
            .await
            .expect("first application");

        let err = ApplicationRepository::insert(
            &seeded.store,
            &application(candidate, seeded.course_id, 5),
        )
        .await
        .expect_err("duplicate");

        assert_eq!(err, ApplicationRepositoryError::duplicate());
    }

    #[rstest]
    #[tokio::test]
    async fn ranking_is_unique_per_course_and_session(#[future] seeded: Seeded) {
        let seeded = seeded.await;
        let first = accepted(&seeded, 0).await;
        let second = accepted(&seeded, 1).await;
        let rank = Ranking::new(1).expect("rank");
        seeded
            .store
            .set_ranking(&first, Some(rank), fixture_timestamp())
            .await
            .expect("rank first");

        let err = seeded
            .store
            .set_ranking(&second, Some(rank), fixture_timestamp())
            .await
            .expect_err("rank taken");

        assert_eq!(err, ApplicationRepositoryError::ranking_taken(1_u32));
    }

    #[rstest]
    #[tokio::test]
    async fn ranking_a_pending_application_is_refused(#[future] seeded: Seeded) {
        let seeded = seeded.await;
        let pending = application(seeded.candidates[0], seeded.course_id, 0);
        ApplicationRepository::insert(&seeded.store, &pending)
            .await
            .expect("insert");

        let err = seeded
            .store
            .set_ranking(&pending.id, Some(Ranking::new(1).expect("rank")), fixture_timestamp())
            .await
            .expect_err("pending");

        assert_eq!(err, ApplicationRepositoryError::not_accepted());
        assert_eq!(Error::from(err).code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[tokio::test]
    async fn leaving_accepted_clears_the_ranking(#[future] seeded: Seeded) {
        let seeded = seeded.await;
        let id = accepted(&seeded, 0).await;
        seeded
            .store
            .set_ranking(&id, Some(Ranking::new(2).expect("rank")), fixture_timestamp())
            .await
            .expect("rank");

        let updated = seeded
            .store
            .update_status(&id, ApplicationStatus::Rejected, fixture_timestamp())
            .await
            .expect("reject")
            .expect("exists");

        assert_eq!(updated.ranking, None);
    }

    #[rstest]
    #[tokio::test]
    async fn search_honours_lecturer_scope_and_sort(#[future] seeded: Seeded) {
        let seeded = seeded.await;
        let other_course = course_fixture("ISYS1101", "Databases");
        CourseRepository::insert(&seeded.store, &other_course)
            .await
            .expect("insert course");
        for (minutes, (candidate, course)) in [
            (seeded.candidates[1], seeded.course_id),
            (seeded.candidates[0], seeded.course_id),
            (seeded.candidates[0], other_course.id),
        ]
        .into_iter()
        .enumerate()
        {
            let minutes = i64::try_from(minutes).expect("small index");
            ApplicationRepository::insert(&seeded.store, &application(candidate, course, minutes))
                .await
                .expect("insert");
        }
        let lecturer = UserId::random();
        seeded
            .store
            .assign_lecturer(&lecturer, &seeded.course_id)
            .await
            .expect("assign");

        let results = seeded
            .store
            .search(&ApplicationSearch {
                restrict_to_lecturer: Some(lecturer),
                sort: ApplicationSort::CandidateName,
                ..ApplicationSearch::default()
            })
            .await
            .expect("search");

        let names: Vec<String> = results
            .iter()
            .map(|details| details.candidate.full_name())
            .collect();
        assert_eq!(names, ["Ada Tester", "Grace Tester"]);
        assert!(
            results
                .iter()
                .all(|details| details.course.id == seeded.course_id)
        );
    }

    #[rstest]
    #[tokio::test]
    async fn candidate_listing_is_newest_first(#[future] seeded: Seeded) {
        let seeded = seeded.await;
        let candidate = seeded.candidates[0];
        let other_course = course_fixture("ISYS1101", "Databases");
        CourseRepository::insert(&seeded.store, &other_course)
            .await
            .expect("insert course");
        ApplicationRepository::insert(&seeded.store, &application(candidate, seeded.course_id, 0))
            .await
            .expect("older");
        ApplicationRepository::insert(&seeded.store, &application(candidate, other_course.id, 10))
            .await
            .expect("newer");

        let listed = seeded
            .store
            .list_for_candidate(&candidate)
            .await
            .expect("list");

        assert_eq!(listed[0].course.id, other_course.id);
        assert_eq!(listed.len(), 2);
    }
}
