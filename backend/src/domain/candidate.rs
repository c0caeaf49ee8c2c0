//! Candidate profile: availability, skills, academic credentials, and
//! previous roles.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{CredentialId, PreviousRoleId, UserId};

/// Validation errors for candidate profile fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateValidationError {
    UnknownAvailability,
    EmptySkill { index: usize },
    SkillTooLong { index: usize, max: usize },
    TooManySkills { max: usize },
    EmptyField { field: &'static str },
    FieldTooLong { field: &'static str, max: usize },
    YearOutOfRange { min: i32, max: i32 },
    EndBeforeStart,
}

impl fmt::Display for CandidateValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAvailability => {
                write!(f, "availability must be one of full_time or part_time")
            }
            Self::EmptySkill { index } => write!(f, "skill at index {index} must not be empty"),
            Self::SkillTooLong { index, max } => {
                write!(f, "skill at index {index} must be at most {max} characters")
            }
            Self::TooManySkills { max } => write!(f, "at most {max} skills may be listed"),
            Self::EmptyField { field } => write!(f, "{field} must not be empty"),
            Self::FieldTooLong { field, max } => {
                write!(f, "{field} must be at most {max} characters")
            }
            Self::YearOutOfRange { min, max } => write!(f, "year must be between {min} and {max}"),
            Self::EndBeforeStart => write!(f, "end date must not be before start date"),
        }
    }
}

impl std::error::Error for CandidateValidationError {}

/// Maximum skill label length.
pub const SKILL_MAX: usize = 64;
/// Maximum number of skills on a profile or application.
pub const SKILLS_LIMIT: usize = 20;
/// Maximum length of free-text profile fields.
pub const PROFILE_TEXT_MAX: usize = 200;
/// Earliest accepted credential year.
pub const CREDENTIAL_YEAR_MIN: i32 = 1900;
/// Latest accepted credential year.
pub const CREDENTIAL_YEAR_MAX: i32 = 2100;

/// Working availability offered by a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    FullTime,
    PartTime,
}

impl Availability {
    /// Lower-case storage form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullTime => "full_time",
            Self::PartTime => "part_time",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Availability {
    type Err = CandidateValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "full_time" | "fulltime" => Ok(Self::FullTime),
            "part_time" | "parttime" => Ok(Self::PartTime),
            _ => Err(CandidateValidationError::UnknownAvailability),
        }
    }
}

/// De-duplicated list of skill labels.
///
/// ## Invariants
/// - every label is trimmed, non-empty, and at most [`SKILL_MAX`] characters.
/// - labels are unique ignoring case; the first spelling wins.
/// - at most [`SKILLS_LIMIT`] entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct Skills(Vec<String>);

impl Skills {
    /// Validate a list of skill labels.
    ///
    /// # Examples
    /// ```
    /// use teachteam::domain::Skills;
    ///
    /// let skills = Skills::new(["Rust", " rust ", "SQL"]).unwrap();
    /// assert_eq!(skills.as_slice(), ["Rust", "SQL"]);
    /// ```
    pub fn new<I, S>(raw: I) -> Result<Self, CandidateValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut skills = Vec::new();
        for (index, value) in raw.into_iter().enumerate() {
            let trimmed = value.as_ref().trim();
            if trimmed.is_empty() {
                return Err(CandidateValidationError::EmptySkill { index });
            }
            if trimmed.chars().count() > SKILL_MAX {
                return Err(CandidateValidationError::SkillTooLong {
                    index,
                    max: SKILL_MAX,
                });
            }
            if seen.insert(trimmed.to_lowercase()) {
                if skills.len() == SKILLS_LIMIT {
                    return Err(CandidateValidationError::TooManySkills { max: SKILLS_LIMIT });
                }
                skills.push(trimmed.to_owned());
            }
        }
        Ok(Self(skills))
    }

    /// Rebuild from trusted storage without re-validating.
    pub(crate) fn from_stored(skills: Vec<String>) -> Self {
        Self(skills)
    }

    /// Borrow the labels.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Whether any label equals `needle`, ignoring case.
    pub fn contains_ignore_case(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        self.0.iter().any(|skill| skill.to_lowercase() == needle)
    }

    /// Consume into the raw labels.
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

fn required_text(
    raw: &str,
    field: &'static str,
    max: usize,
) -> Result<String, CandidateValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CandidateValidationError::EmptyField { field });
    }
    if trimmed.chars().count() > max {
        return Err(CandidateValidationError::FieldTooLong { field, max });
    }
    Ok(trimmed.to_owned())
}

fn optional_text(
    raw: Option<&str>,
    field: &'static str,
    max: usize,
) -> Result<Option<String>, CandidateValidationError> {
    match raw.map(str::trim).filter(|text| !text.is_empty()) {
        Some(text) => required_text(text, field, max).map(Some),
        None => Ok(None),
    }
}

/// Degree or certificate held by a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AcademicCredential {
    #[schema(value_type = String)]
    pub id: CredentialId,
    pub qualification: String,
    pub institution: String,
    pub year: i32,
}

/// Validated fields for a new credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialDraft {
    pub qualification: String,
    pub institution: String,
    pub year: i32,
}

impl CredentialDraft {
    /// Validate raw credential fields.
    pub fn try_from_parts(
        qualification: &str,
        institution: &str,
        year: i32,
    ) -> Result<Self, CandidateValidationError> {
        if !(CREDENTIAL_YEAR_MIN..=CREDENTIAL_YEAR_MAX).contains(&year) {
            return Err(CandidateValidationError::YearOutOfRange {
                min: CREDENTIAL_YEAR_MIN,
                max: CREDENTIAL_YEAR_MAX,
            });
        }
        Ok(Self {
            qualification: required_text(qualification, "qualification", PROFILE_TEXT_MAX)?,
            institution: required_text(institution, "institution", PROFILE_TEXT_MAX)?,
            year,
        })
    }

    /// Attach an identifier.
    pub fn into_credential(self, id: CredentialId) -> AcademicCredential {
        AcademicCredential {
            id,
            qualification: self.qualification,
            institution: self.institution,
            year: self.year,
        }
    }
}

/// Prior employment relevant to tutoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreviousRole {
    #[schema(value_type = String)]
    pub id: PreviousRoleId,
    pub position: String,
    pub organisation: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
}

/// Validated fields for a new previous role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviousRoleDraft {
    pub position: String,
    pub organisation: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
}

impl PreviousRoleDraft {
    /// Validate raw previous role fields.
    pub fn try_from_parts(
        position: &str,
        organisation: &str,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        description: Option<&str>,
    ) -> Result<Self, CandidateValidationError> {
        if end_date.is_some_and(|end| end < start_date) {
            return Err(CandidateValidationError::EndBeforeStart);
        }
        Ok(Self {
            position: required_text(position, "position", PROFILE_TEXT_MAX)?,
            organisation: required_text(organisation, "organisation", PROFILE_TEXT_MAX)?,
            start_date,
            end_date,
            description: optional_text(description, "description", PROFILE_TEXT_MAX * 5)?,
        })
    }

    /// Attach an identifier.
    pub fn into_role(self, id: PreviousRoleId) -> PreviousRole {
        PreviousRole {
            id,
            position: self.position,
            organisation: self.organisation,
            start_date: self.start_date,
            end_date: self.end_date,
            description: self.description,
        }
    }
}

/// Availability and skills a candidate advertises.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileSettings {
    pub availability: Option<Availability>,
    pub skills: Skills,
}

/// Full candidate profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProfile {
    #[schema(value_type = String)]
    pub candidate_id: UserId,
    pub availability: Option<Availability>,
    pub skills: Skills,
    pub credentials: Vec<AcademicCredential>,
    pub previous_roles: Vec<PreviousRole>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl CandidateProfile {
    /// Profile for a candidate who has not saved anything yet.
    pub fn empty(candidate_id: UserId) -> Self {
        Self {
            candidate_id,
            availability: None,
            skills: Skills::default(),
            credentials: Vec::new(),
            previous_roles: Vec::new(),
            updated_at: None,
        }
    }
}
