//! Candidate applications and the lecturer-controlled review fields.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ApplicationId, Availability, CourseCode, CourseId, EmailAddress, Skills, UserId};

/// Validation errors for application fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationValidationError {
    UnknownSessionType,
    UnknownStatus,
    RankingOutOfRange,
    EmptyComment,
    CommentTooLong { max: usize },
}

impl fmt::Display for ApplicationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSessionType => {
                write!(f, "session type must be one of tutor or lab_assistant")
            }
            Self::UnknownStatus => {
                write!(f, "status must be one of pending, accepted, or rejected")
            }
            Self::RankingOutOfRange => {
                write!(f, "ranking must be an integer between 1 and {}", i32::MAX)
            }
            Self::EmptyComment => write!(f, "comment must not be empty"),
            Self::CommentTooLong { max } => write!(f, "comment must be at most {max} characters"),
        }
    }
}

impl std::error::Error for ApplicationValidationError {}

/// Maximum lecturer comment length.
pub const COMMENT_MAX: usize = 1000;

/// Kind of teaching session applied for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    Tutor,
    LabAssistant,
}

impl SessionType {
    /// Lower-case storage form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tutor => "tutor",
            Self::LabAssistant => "lab_assistant",
        }
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionType {
    type Err = ApplicationValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "tutor" => Ok(Self::Tutor),
            "lab_assistant" | "labassistant" | "lab" => Ok(Self::LabAssistant),
            _ => Err(ApplicationValidationError::UnknownSessionType),
        }
    }
}

/// Review outcome, always stored lower-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    /// Lower-case storage form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = ApplicationValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ApplicationValidationError::UnknownStatus),
        }
    }
}

/// Preference rank given by a lecturer to an accepted application; 1 is best.
///
/// Bounded by the `INTEGER` ranking column: `1..=i32::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, ToSchema)]
#[serde(transparent)]
pub struct Ranking(i32);

impl Ranking {
    /// Validate a rank.
    pub fn new(value: i64) -> Result<Self, ApplicationValidationError> {
        i32::try_from(value)
            .ok()
            .filter(|rank| *rank >= 1)
            .map(Self)
            .ok_or(ApplicationValidationError::RankingOutOfRange)
    }

    /// Numeric value.
    pub const fn get(self) -> u32 {
        self.0.unsigned_abs()
    }

    /// Value as stored in the ranking column.
    pub const fn as_i32(self) -> i32 {
        self.0
    }
}

/// Lecturer's note on an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct LecturerComment(String);

impl LecturerComment {
    /// Validate a comment.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ApplicationValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ApplicationValidationError::EmptyComment);
        }
        if trimmed.chars().count() > COMMENT_MAX {
            return Err(ApplicationValidationError::CommentTooLong { max: COMMENT_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Stored application.
///
/// ## Invariants
/// - one application per (candidate, course, session type).
/// - `ranking` is only set while `status` is [`ApplicationStatus::Accepted`],
///   and is unique per (course, session type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidateApplication {
    #[schema(value_type = String)]
    pub id: ApplicationId,
    #[schema(value_type = String)]
    pub candidate_id: UserId,
    #[schema(value_type = String)]
    pub course_id: CourseId,
    pub session_type: SessionType,
    pub status: ApplicationStatus,
    #[schema(value_type = Option<u32>)]
    pub ranking: Option<Ranking>,
    #[schema(value_type = Option<String>)]
    pub comment: Option<LecturerComment>,
    pub availability: Availability,
    pub skills: Skills,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields a candidate submits when applying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationDraft {
    pub course_id: CourseId,
    pub session_type: SessionType,
    /// Falls back to the profile availability when `None`.
    pub availability: Option<Availability>,
    /// Falls back to the profile skills when `None`.
    pub skills: Option<Skills>,
}

/// Candidate columns joined onto an application for review screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSummary {
    #[schema(value_type = String)]
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    #[schema(value_type = String)]
    pub email: EmailAddress,
}

impl CandidateSummary {
    /// "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Course columns joined onto an application for review screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    #[schema(value_type = String)]
    pub id: CourseId,
    #[schema(value_type = String)]
    pub code: CourseCode,
    pub name: String,
}

/// Application joined with its candidate and course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDetails {
    pub application: CandidateApplication,
    pub candidate: CandidateSummary,
    pub course: CourseSummary,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("tutor", SessionType::Tutor)]
    #[case("lab_assistant", SessionType::LabAssistant)]
    #[case("Lab-Assistant", SessionType::LabAssistant)]
    fn session_types_parse(#[case] raw: &str, #[case] expected: SessionType) {
        assert_eq!(raw.parse::<SessionType>(), Ok(expected));
    }

    #[rstest]
    #[case("Accepted", ApplicationStatus::Accepted)]
    #[case("REJECTED", ApplicationStatus::Rejected)]
    #[case(" pending ", ApplicationStatus::Pending)]
    fn statuses_normalise_casing(#[case] raw: &str, #[case] expected: ApplicationStatus) {
        let status = raw.parse::<ApplicationStatus>().expect("known status");
        assert_eq!(status, expected);
        assert_eq!(status.as_str(), status.as_str().to_lowercase());
    }

    #[rstest]
    #[case(0)]
    #[case(-3)]
    #[case(2_147_483_648)]
    #[case(i64::from(u32::MAX) + 1)]
    fn rankings_must_fit_the_column(#[case] raw: i64) {
        assert_eq!(Ranking::new(raw), Err(ApplicationValidationError::RankingOutOfRange));
    }

    #[test]
    fn largest_ranking_is_stored_unchanged() {
        let rank = Ranking::new(i64::from(i32::MAX)).expect("in range");
        assert_eq!(rank.as_i32(), i32::MAX);
        assert_eq!(rank.get(), 2_147_483_647);
    }

    #[test]
    fn comments_are_trimmed_and_bounded() {
        assert_eq!(
            LecturerComment::new("  strong lab skills ").map(|c| c.as_str().to_owned()),
            Ok("strong lab skills".to_owned())
        );
        assert_eq!(
            LecturerComment::new("x".repeat(COMMENT_MAX + 1)),
            Err(ApplicationValidationError::CommentTooLong { max: COMMENT_MAX })
        );
        assert_eq!(LecturerComment::new(" "), Err(ApplicationValidationError::EmptyComment));
    }
}
