//! Course catalogue primitives.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::CourseId;

/// Validation errors for course fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseValidationError {
    InvalidCode,
    EmptyName,
    NameTooLong { max: usize },
    EmptySemester,
    SemesterTooLong { max: usize },
    DescriptionTooLong { max: usize },
}

impl fmt::Display for CourseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCode => write!(
                f,
                "course code must be four letters followed by four digits, e.g. COSC2758"
            ),
            Self::EmptyName => write!(f, "course name must not be empty"),
            Self::NameTooLong { max } => write!(f, "course name must be at most {max} characters"),
            Self::EmptySemester => write!(f, "semester must not be empty"),
            Self::SemesterTooLong { max } => {
                write!(f, "semester must be at most {max} characters")
            }
            Self::DescriptionTooLong { max } => {
                write!(f, "description must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for CourseValidationError {}

/// Maximum course name length.
pub const COURSE_NAME_MAX: usize = 128;
/// Maximum semester label length.
pub const SEMESTER_MAX: usize = 32;
/// Maximum description length.
pub const DESCRIPTION_MAX: usize = 2000;

static COURSE_CODE_RE: OnceLock<Regex> = OnceLock::new();

fn course_code_regex() -> &'static Regex {
    COURSE_CODE_RE.get_or_init(|| {
        Regex::new("^[A-Z]{4}[0-9]{4}$")
            .unwrap_or_else(|error| panic!("course code regex failed to compile: {error}"))
    })
}

/// Upper-cased course code such as `COSC2758`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CourseCode(String);

impl CourseCode {
    /// Validate and normalise a course code.
    ///
    /// # Examples
    /// ```
    /// use teachteam::domain::CourseCode;
    ///
    /// assert_eq!(CourseCode::new(" cosc2758 ").unwrap().as_ref(), "COSC2758");
    /// assert!(CourseCode::new("CS101").is_err());
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, CourseValidationError> {
        let normalised = raw.as_ref().trim().to_ascii_uppercase();
        if !course_code_regex().is_match(&normalised) {
            return Err(CourseValidationError::InvalidCode);
        }
        Ok(Self(normalised))
    }
}

impl AsRef<str> for CourseCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<CourseCode> for String {
    fn from(value: CourseCode) -> Self {
        value.0
    }
}

impl TryFrom<String> for CourseCode {
    type Error = CourseValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Course offering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: CourseId,
    #[schema(value_type = String, example = "COSC2758")]
    pub code: CourseCode,
    #[schema(example = "Full Stack Development")]
    pub name: String,
    #[schema(example = "2025 S1")]
    pub semester: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated fields for creating or replacing a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDraft {
    pub code: CourseCode,
    pub name: String,
    pub semester: String,
    pub description: Option<String>,
}

impl CourseDraft {
    /// Validate raw course fields. Blank descriptions are stored as `None`.
    pub fn try_from_parts(
        code: &str,
        name: &str,
        semester: &str,
        description: Option<&str>,
    ) -> Result<Self, CourseValidationError> {
        let code = CourseCode::new(code)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(CourseValidationError::EmptyName);
        }
        if name.chars().count() > COURSE_NAME_MAX {
            return Err(CourseValidationError::NameTooLong {
                max: COURSE_NAME_MAX,
            });
        }
        let semester = semester.trim();
        if semester.is_empty() {
            return Err(CourseValidationError::EmptySemester);
        }
        if semester.chars().count() > SEMESTER_MAX {
            return Err(CourseValidationError::SemesterTooLong { max: SEMESTER_MAX });
        }
        let description = description
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_owned);
        if description
            .as_deref()
            .is_some_and(|text| text.chars().count() > DESCRIPTION_MAX)
        {
            return Err(CourseValidationError::DescriptionTooLong {
                max: DESCRIPTION_MAX,
            });
        }
        Ok(Self {
            code,
            name: name.to_owned(),
            semester: semester.to_owned(),
            description,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("COSC275")]
    #[case("COS12758")]
    #[case("")]
    #[case("COSC 2758")]
    fn invalid_codes(#[case] raw: &str) {
        assert_eq!(CourseCode::new(raw), Err(CourseValidationError::InvalidCode));
    }

    #[test]
    fn draft_trims_and_drops_blank_description() {
        let draft = CourseDraft::try_from_parts("isys1101", "  Databases ", "2025 S2", Some("  "))
            .expect("valid draft");
        assert_eq!(draft.code.as_ref(), "ISYS1101");
        assert_eq!(draft.name, "Databases");
        assert_eq!(draft.description, None);
    }

    #[rstest]
    #[case("COSC2758", "", "2025 S1", CourseValidationError::EmptyName)]
    #[case("COSC2758", "Web", " ", CourseValidationError::EmptySemester)]
    fn draft_rejects_blank_fields(
        #[case] code: &str,
        #[case] name: &str,
        #[case] semester: &str,
        #[case] expected: CourseValidationError,
    ) {
        let err = CourseDraft::try_from_parts(code, name, semester, None).expect_err("invalid");
        assert_eq!(err, expected);
    }
}
