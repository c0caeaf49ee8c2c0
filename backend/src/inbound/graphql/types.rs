//! GraphQL object wrappers over domain aggregates.

use async_graphql::{Enum, ID, InputObject, Object, SimpleObject};
use chrono::{DateTime, Utc};

use crate::domain;

/// Account role.
#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
#[graphql(name = "Role", remote = "crate::domain::Role")]
pub enum RoleKind {
    Candidate,
    Lecturer,
    Admin,
}

/// Application review status.
#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
#[graphql(name = "ApplicationStatus", remote = "crate::domain::ApplicationStatus")]
pub enum StatusKind {
    Pending,
    Accepted,
    Rejected,
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
#[graphql(name = "SessionType", remote = "crate::domain::SessionType")]
pub enum SessionKind {
    Tutor,
    LabAssistant,
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
#[graphql(name = "Availability", remote = "crate::domain::Availability")]
pub enum AvailabilityKind {
    FullTime,
    PartTime,
}

pub struct User(pub domain::User);

#[Object]
impl User {
    async fn id(&self) -> ID {
        ID(self.0.id.to_string())
    }

    async fn first_name(&self) -> &str {
        self.0.first_name.as_ref()
    }

    async fn last_name(&self) -> &str {
        self.0.last_name.as_ref()
    }

    async fn email(&self) -> &str {
        self.0.email.as_ref()
    }

    async fn role(&self) -> RoleKind {
        self.0.role.into()
    }

    /// Blocked users cannot sign in or be selected.
    async fn is_blocked(&self) -> bool {
        self.0.is_blocked
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.0.created_at
    }
}

pub struct Course(pub domain::Course);

#[Object]
impl Course {
    async fn id(&self) -> ID {
        ID(self.0.id.to_string())
    }

    /// Course code such as `COSC2758`.
    async fn code(&self) -> &str {
        self.0.code.as_ref()
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn semester(&self) -> &str {
        &self.0.semester
    }

    async fn description(&self) -> Option<&str> {
        self.0.description.as_deref()
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        self.0.updated_at
    }
}

/// Name and contact details of an applicant.
pub struct Candidate(pub domain::CandidateSummary);

#[Object]
impl Candidate {
    async fn id(&self) -> ID {
        ID(self.0.id.to_string())
    }

    async fn first_name(&self) -> &str {
        &self.0.first_name
    }

    async fn last_name(&self) -> &str {
        &self.0.last_name
    }

    async fn email(&self) -> &str {
        self.0.email.as_ref()
    }
}

/// Application joined with its candidate and course.
pub struct Application(pub domain::ApplicationDetails);

#[Object]
impl Application {
    async fn id(&self) -> ID {
        ID(self.0.application.id.to_string())
    }

    async fn candidate(&self) -> Candidate {
        Candidate(self.0.candidate.clone())
    }

    async fn course_id(&self) -> ID {
        ID(self.0.course.id.to_string())
    }

    async fn course_code(&self) -> &str {
        self.0.course.code.as_ref()
    }

    async fn course_name(&self) -> &str {
        &self.0.course.name
    }

    async fn session_type(&self) -> SessionKind {
        self.0.application.session_type.into()
    }

    async fn status(&self) -> StatusKind {
        self.0.application.status.into()
    }

    async fn ranking(&self) -> Option<u32> {
        self.0.application.ranking.map(domain::Ranking::get)
    }

    async fn comment(&self) -> Option<&str> {
        self.0
            .application
            .comment
            .as_ref()
            .map(domain::LecturerComment::as_str)
    }

    async fn availability(&self) -> AvailabilityKind {
        self.0.application.availability.into()
    }

    async fn skills(&self) -> Vec<String> {
        self.0.application.skills.as_slice().to_vec()
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.0.application.created_at
    }
}

pub struct CourseSelection(pub domain::CourseSelection);

#[Object]
impl CourseSelection {
    async fn course_id(&self) -> ID {
        ID(self.0.course.id.to_string())
    }

    async fn course_code(&self) -> &str {
        self.0.course.code.as_ref()
    }

    async fn course_name(&self) -> &str {
        &self.0.course.name
    }

    /// Candidates with an accepted application to this course.
    async fn candidates(&self) -> Vec<Candidate> {
        self.0.candidates.iter().cloned().map(Candidate).collect()
    }
}

pub struct CandidateTally(pub domain::CandidateTally);

#[Object]
impl CandidateTally {
    async fn candidate(&self) -> Candidate {
        Candidate(self.0.candidate.clone())
    }

    async fn accepted_count(&self) -> u32 {
        self.0.accepted_count
    }
}

/// Pushed to subscribers when an admin blocks a candidate.
#[derive(SimpleObject, Clone, Debug)]
#[graphql(name = "CandidateUnavailable")]
pub struct CandidateUnavailableEvent {
    pub candidate_id: ID,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub occurred_at: DateTime<Utc>,
}

impl From<domain::CandidateUnavailable> for CandidateUnavailableEvent {
    fn from(event: domain::CandidateUnavailable) -> Self {
        Self {
            candidate_id: ID(event.candidate_id.to_string()),
            first_name: event.first_name,
            last_name: event.last_name,
            email: event.email.to_string(),
            occurred_at: event.occurred_at,
        }
    }
}

/// Fields for creating or replacing a course.
#[derive(InputObject, Clone, Debug)]
pub struct CourseInput {
    pub code: String,
    pub name: String,
    pub semester: String,
    pub description: Option<String>,
}
