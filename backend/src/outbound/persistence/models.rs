//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions back into domain types
//! re-validate stored values and report corrupt rows as plain messages that
//! the repositories wrap in their query error variant.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    AcademicCredential, ApplicationId, CandidateApplication, CandidateSummary, Course, CourseCode,
    CourseId, CourseSummary, CredentialId, EmailAddress, LecturerComment, PersonName,
    PreviousRole, PreviousRoleId, Ranking, Skills, User, UserAccount, UserId,
};

use super::schema::{
    academic_credentials, candidate_applications, candidate_profiles, courses, lecturer_courses,
    previous_roles, users,
};

fn corrupt(column: &str, value: impl std::fmt::Display) -> String {
    format!("stored {column} is invalid: {value}")
}

fn parsed<T: std::str::FromStr>(column: &str, raw: &str) -> Result<T, String> {
    raw.parse().map_err(|_| corrupt(column, raw))
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub is_blocked: bool,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    pub(crate) fn into_account(self) -> Result<UserAccount, String> {
        let user = User {
            id: UserId::from_uuid(self.id),
            first_name: PersonName::new(&self.first_name)
                .map_err(|_| corrupt("first_name", &self.first_name))?,
            last_name: PersonName::new(&self.last_name)
                .map_err(|_| corrupt("last_name", &self.last_name))?,
            email: EmailAddress::new(&self.email).map_err(|_| corrupt("email", &self.email))?,
            role: parsed("role", &self.role)?,
            is_blocked: self.is_blocked,
            created_at: self.created_at,
        };
        Ok(UserAccount {
            user,
            password_hash: self.password_hash,
        })
    }

    pub(crate) fn into_user(self) -> Result<User, String> {
        self.into_account().map(|account| account.user)
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CandidateSummaryRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl TryFrom<CandidateSummaryRow> for CandidateSummary {
    type Error = String;

    fn try_from(row: CandidateSummaryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::from_uuid(row.id),
            email: EmailAddress::new(&row.email).map_err(|_| corrupt("email", &row.email))?,
            first_name: row.first_name,
            last_name: row.last_name,
        })
    }
}

// ---------------------------------------------------------------------------
// Courses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CourseRow {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub semester: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Course> for CourseRow {
    fn from(course: &Course) -> Self {
        Self {
            id: *course.id.as_uuid(),
            code: course.code.to_string(),
            name: course.name.clone(),
            semester: course.semester.clone(),
            description: course.description.clone(),
            created_at: course.created_at,
            updated_at: course.updated_at,
        }
    }
}

impl TryFrom<CourseRow> for Course {
    type Error = String;

    fn try_from(row: CourseRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CourseId::from_uuid(row.id),
            code: CourseCode::new(&row.code).map_err(|_| corrupt("code", &row.code))?,
            name: row.name,
            semester: row.semester,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = courses)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CourseUpdate<'a> {
    pub code: &'a str,
    pub name: &'a str,
    pub semester: &'a str,
    pub description: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CourseSummaryRow {
    pub id: Uuid,
    pub code: String,
    pub name: String,
}

impl TryFrom<CourseSummaryRow> for CourseSummary {
    type Error = String;

    fn try_from(row: CourseSummaryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CourseId::from_uuid(row.id),
            code: CourseCode::new(&row.code).map_err(|_| corrupt("code", &row.code))?,
            name: row.name,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = lecturer_courses)]
pub(crate) struct LecturerCourseRow {
    pub lecturer_id: Uuid,
    pub course_id: Uuid,
}

// ---------------------------------------------------------------------------
// Candidate profiles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = candidate_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProfileRow {
    pub user_id: Uuid,
    pub availability: Option<String>,
    pub skills: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = academic_credentials)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CredentialRow {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub qualification: String,
    pub institution: String,
    pub year: i32,
}

impl From<CredentialRow> for AcademicCredential {
    fn from(row: CredentialRow) -> Self {
        Self {
            id: CredentialId::from_uuid(row.id),
            qualification: row.qualification,
            institution: row.institution,
            year: row.year,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = previous_roles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PreviousRoleRow {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub position: String,
    pub organisation: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
}

impl From<PreviousRoleRow> for PreviousRole {
    fn from(row: PreviousRoleRow) -> Self {
        Self {
            id: PreviousRoleId::from_uuid(row.id),
            position: row.position,
            organisation: row.organisation,
            start_date: row.start_date,
            end_date: row.end_date,
            description: row.description,
        }
    }
}

// ---------------------------------------------------------------------------
// Applications
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = candidate_applications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ApplicationRow {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub course_id: Uuid,
    pub session_type: String,
    pub status: String,
    pub ranking: Option<i32>,
    pub comment: Option<String>,
    pub availability: String,
    pub skills: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&CandidateApplication> for ApplicationRow {
    fn from(application: &CandidateApplication) -> Self {
        Self {
            id: *application.id.as_uuid(),
            candidate_id: *application.candidate_id.as_uuid(),
            course_id: *application.course_id.as_uuid(),
            session_type: application.session_type.as_str().to_owned(),
            status: application.status.as_str().to_owned(),
            ranking: application.ranking.map(ranking_to_db),
            comment: application
                .comment
                .as_ref()
                .map(|comment| comment.as_str().to_owned()),
            availability: application.availability.as_str().to_owned(),
            skills: application.skills.as_slice().to_vec(),
            created_at: application.created_at,
            updated_at: application.updated_at,
        }
    }
}

impl TryFrom<ApplicationRow> for CandidateApplication {
    type Error = String;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ApplicationId::from_uuid(row.id),
            candidate_id: UserId::from_uuid(row.candidate_id),
            course_id: CourseId::from_uuid(row.course_id),
            session_type: parsed("session_type", &row.session_type)?,
            status: parsed("status", &row.status)?,
            ranking: row
                .ranking
                .map(|value| Ranking::new(i64::from(value)).map_err(|_| corrupt("ranking", value)))
                .transpose()?,
            comment: row
                .comment
                .map(|text| LecturerComment::new(&text).map_err(|_| corrupt("comment", "too long")))
                .transpose()?,
            availability: parsed("availability", &row.availability)?,
            skills: Skills::from_stored(row.skills),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub(crate) fn ranking_to_db(ranking: Ranking) -> i32 {
    ranking.as_i32()
}
