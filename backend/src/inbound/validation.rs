//! Translation of domain validation failures into `invalid_request` errors.
//!
//! Both transports report malformed input the same way: the domain message,
//! plus `details { field, code }` and, for list entries, an `index`.

use chrono::NaiveDate;
use serde_json::json;

use crate::domain::{
    ApplicationValidationError, AuthValidationError, CandidateValidationError,
    CourseValidationError, Error, InvalidIdError, UnknownSortError, UserValidationError,
};

/// A validation failure that knows which request field it belongs to.
pub(crate) trait ValidationFailure: std::fmt::Display {
    /// Request field name, in camelCase.
    fn field(&self) -> &'static str;

    /// Stable snake_case failure code.
    fn code(&self) -> &'static str;

    /// Position within a list field.
    fn index(&self) -> Option<usize> {
        None
    }
}

/// Build an `invalid_request` error for the failure's own field.
pub(crate) fn invalid(failure: impl ValidationFailure) -> Error {
    let field = failure.field();
    invalid_at(field, failure)
}

/// Build an `invalid_request` error, overriding the field name.
pub(crate) fn invalid_at(field: &str, failure: impl ValidationFailure) -> Error {
    let mut details = json!({ "field": field, "code": failure.code() });
    if let Some(index) = failure.index() {
        details["index"] = json!(index);
    }
    Error::invalid_request(failure.to_string()).with_details(details)
}

/// Parse an identifier carried in a path segment, query string, or body.
pub(crate) fn parse_id<T>(
    raw: &str,
    field: &'static str,
    parse: impl FnOnce(&str) -> Result<T, InvalidIdError>,
) -> Result<T, Error> {
    parse(raw).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": field,
            "value": raw,
            "code": "invalid_uuid",
        }))
    })
}

/// Parse an ISO 8601 calendar date (`YYYY-MM-DD`).
pub(crate) fn parse_date(raw: &str, field: &'static str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        Error::invalid_request(format!("{field} must be a date in YYYY-MM-DD form")).with_details(
            json!({ "field": field, "value": raw, "code": "invalid_date" }),
        )
    })
}

impl ValidationFailure for UserValidationError {
    fn field(&self) -> &'static str {
        match self {
            Self::EmptyEmail | Self::EmailTooLong { .. } | Self::InvalidEmail => "email",
            Self::EmptyName | Self::NameTooLong { .. } => "name",
            Self::UnknownRole => "role",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::EmptyEmail => "empty_email",
            Self::EmailTooLong { .. } => "email_too_long",
            Self::InvalidEmail => "invalid_email",
            Self::EmptyName => "empty_name",
            Self::NameTooLong { .. } => "name_too_long",
            Self::UnknownRole => "unknown_role",
        }
    }
}

impl ValidationFailure for AuthValidationError {
    fn field(&self) -> &'static str {
        match self {
            Self::User(inner) => inner.field(),
            Self::EmptyPassword | Self::PasswordLength { .. } | Self::WeakPassword => "password",
            Self::AdminRegistration => "role",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::User(inner) => inner.code(),
            Self::EmptyPassword => "empty_password",
            Self::PasswordLength { .. } => "password_length",
            Self::WeakPassword => "weak_password",
            Self::AdminRegistration => "admin_registration",
        }
    }
}

impl ValidationFailure for CourseValidationError {
    fn field(&self) -> &'static str {
        match self {
            Self::InvalidCode => "code",
            Self::EmptyName | Self::NameTooLong { .. } => "name",
            Self::EmptySemester | Self::SemesterTooLong { .. } => "semester",
            Self::DescriptionTooLong { .. } => "description",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::InvalidCode => "invalid_code",
            Self::EmptyName => "empty_name",
            Self::NameTooLong { .. } => "name_too_long",
            Self::EmptySemester => "empty_semester",
            Self::SemesterTooLong { .. } => "semester_too_long",
            Self::DescriptionTooLong { .. } => "description_too_long",
        }
    }
}

impl ValidationFailure for CandidateValidationError {
    fn field(&self) -> &'static str {
        match self {
            Self::UnknownAvailability => "availability",
            Self::EmptySkill { .. } | Self::SkillTooLong { .. } | Self::TooManySkills { .. } => {
                "skills"
            }
            Self::EmptyField { field } | Self::FieldTooLong { field, .. } => *field,
            Self::YearOutOfRange { .. } => "year",
            Self::EndBeforeStart => "endDate",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::UnknownAvailability => "unknown_availability",
            Self::EmptySkill { .. } => "empty_skill",
            Self::SkillTooLong { .. } => "skill_too_long",
            Self::TooManySkills { .. } => "too_many_skills",
            Self::EmptyField { .. } => "empty_field",
            Self::FieldTooLong { .. } => "field_too_long",
            Self::YearOutOfRange { .. } => "year_out_of_range",
            Self::EndBeforeStart => "end_before_start",
        }
    }

    fn index(&self) -> Option<usize> {
        match self {
            Self::EmptySkill { index } | Self::SkillTooLong { index, .. } => Some(*index),
            _ => None,
        }
    }
}

impl ValidationFailure for ApplicationValidationError {
    fn field(&self) -> &'static str {
        match self {
            Self::UnknownSessionType => "sessionType",
            Self::UnknownStatus => "status",
            Self::RankingOutOfRange => "ranking",
            Self::EmptyComment | Self::CommentTooLong { .. } => "comment",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::UnknownSessionType => "unknown_session_type",
            Self::UnknownStatus => "unknown_status",
            Self::RankingOutOfRange => "ranking_out_of_range",
            Self::EmptyComment => "empty_comment",
            Self::CommentTooLong { .. } => "comment_too_long",
        }
    }
}

impl ValidationFailure for UnknownSortError {
    fn field(&self) -> &'static str {
        "sortBy"
    }

    fn code(&self) -> &'static str {
        "unknown_sort"
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::domain::{ErrorCode, UserId};

    #[rstest]
    fn skill_errors_carry_their_index() {
        let error = invalid(CandidateValidationError::EmptySkill { index: 2 });

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            error.details(),
            Some(&json!({ "field": "skills", "code": "empty_skill", "index": 2 }))
        );
    }

    #[rstest]
    #[case(AuthValidationError::WeakPassword, "password", "weak_password")]
    #[case(
        AuthValidationError::User(UserValidationError::InvalidEmail),
        "email",
        "invalid_email"
    )]
    fn auth_errors_name_the_field(
        #[case] failure: AuthValidationError,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let error = invalid(failure);
        let details = error.details().expect("details");

        assert_eq!(details.get("field").and_then(Value::as_str), Some(field));
        assert_eq!(details.get("code").and_then(Value::as_str), Some(code));
    }

    #[rstest]
    fn field_can_be_overridden() {
        let error = invalid_at("firstName", UserValidationError::EmptyName);

        assert_eq!(
            error.details().and_then(|d| d.get("field")).and_then(Value::as_str),
            Some("firstName")
        );
    }

    #[rstest]
    fn malformed_ids_report_the_value() {
        let error = parse_id("nope", "courseId", |raw| UserId::new(raw)).expect_err("invalid id");

        assert_eq!(
            error.details(),
            Some(&json!({ "field": "courseId", "value": "nope", "code": "invalid_uuid" }))
        );
    }

    #[rstest]
    #[case("2024-02-30")]
    #[case("01/02/2024")]
    fn malformed_dates_are_rejected(#[case] raw: &str) {
        let error = parse_date(raw, "startDate").expect_err("invalid date");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }
}
