//! Builders for domain values shared by unit tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use super::access::RepositorySet;
use super::ports::{
    MockApplicationRepository, MockCandidateProfileRepository, MockCourseRepository,
    MockUserRepository,
};

use super::{
    ApplicationDetails, ApplicationId, ApplicationStatus, Availability, CandidateApplication,
    CandidateSummary, Course, CourseCode, CourseId, CourseSummary, EmailAddress, PersonName, Role,
    SessionType, Skills, User, UserId,
};

pub(crate) fn user_fixture(first_name: &str, role: Role) -> User {
    User {
        id: UserId::random(),
        first_name: PersonName::new(first_name).expect("fixture first name"),
        last_name: PersonName::new("Tester").expect("fixture last name"),
        email: EmailAddress::new(format!("{}@example.com", first_name.to_lowercase()))
            .expect("fixture email"),
        role,
        is_blocked: false,
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
    }
}

pub(crate) fn course_fixture(code: &str, name: &str) -> Course {
    let timestamp = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    Course {
        id: CourseId::random(),
        code: CourseCode::new(code).expect("fixture course code"),
        name: name.to_owned(),
        semester: "2025 S1".to_owned(),
        description: None,
        created_at: timestamp,
        updated_at: timestamp,
    }
}

pub(crate) fn details_fixture(first_name: &str, last_name: &str, course: &str) -> ApplicationDetails {
    let candidate_id = UserId::random();
    let course_id = CourseId::random();
    let timestamp = Utc.with_ymd_and_hms(2025, 2, 1, 9, 0, 0).unwrap();
    ApplicationDetails {
        application: CandidateApplication {
            id: ApplicationId::random(),
            candidate_id,
            course_id,
            session_type: SessionType::Tutor,
            status: ApplicationStatus::Pending,
            ranking: None,
            comment: None,
            availability: Availability::PartTime,
            skills: Skills::default(),
            created_at: timestamp,
            updated_at: timestamp,
        },
        candidate: CandidateSummary {
            id: candidate_id,
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            email: EmailAddress::new(format!("{}@example.com", first_name.to_lowercase()))
                .expect("fixture email"),
        },
        course: CourseSummary {
            id: course_id,
            code: CourseCode::new("COSC2758").expect("fixture course code"),
            name: course.to_owned(),
        },
    }
}

pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

/// Repository mocks assembled into a [`RepositorySet`] once expectations are set.
#[derive(Default)]
pub(crate) struct MockRepos {
    pub users: MockUserRepository,
    pub courses: MockCourseRepository,
    pub profiles: MockCandidateProfileRepository,
    pub applications: MockApplicationRepository,
}

impl MockRepos {
    /// Mocks whose user lookup resolves any of `users` by id.
    pub(crate) fn with_users(users: Vec<User>) -> Self {
        let mut repos = Self::default();
        repos
            .users
            .expect_find_by_id()
            .returning(move |id| Ok(users.iter().find(|user| user.id == *id).cloned()));
        repos
    }

    pub(crate) fn into_set(self) -> RepositorySet {
        RepositorySet {
            users: Arc::new(self.users),
            courses: Arc::new(self.courses),
            profiles: Arc::new(self.profiles),
            applications: Arc::new(self.applications),
        }
    }
}
