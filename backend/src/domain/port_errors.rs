//! Mapping from driven-port failures to transport-agnostic domain errors.
//!
//! Connection failures surface as `service_unavailable`, uniqueness clashes as
//! `conflict`, and everything else as an internal error whose message is
//! redacted by the inbound adapters.

use tracing::warn;

use super::Error;
use super::ports::{
    ApplicationRepositoryError, CandidateProfileRepositoryError, CourseRepositoryError,
    PasswordHashError, UserPersistenceError,
};

impl From<UserPersistenceError> for Error {
    fn from(error: UserPersistenceError) -> Self {
        match error {
            UserPersistenceError::Connection { message } => {
                warn!(%message, "user repository unavailable");
                Self::service_unavailable("user store is unavailable")
            }
            UserPersistenceError::Query { message } => Self::internal(message),
            UserPersistenceError::DuplicateEmail { .. } => {
                Self::conflict("an account with this email already exists")
            }
        }
    }
}

impl From<CourseRepositoryError> for Error {
    fn from(error: CourseRepositoryError) -> Self {
        match error {
            CourseRepositoryError::Connection { message } => {
                warn!(%message, "course repository unavailable");
                Self::service_unavailable("course store is unavailable")
            }
            CourseRepositoryError::Query { message } => Self::internal(message),
            CourseRepositoryError::DuplicateCode { code } => {
                Self::conflict(format!("course code {code} already exists"))
            }
        }
    }
}

impl From<CandidateProfileRepositoryError> for Error {
    fn from(error: CandidateProfileRepositoryError) -> Self {
        match error {
            CandidateProfileRepositoryError::Connection { message } => {
                warn!(%message, "profile repository unavailable");
                Self::service_unavailable("profile store is unavailable")
            }
            CandidateProfileRepositoryError::Query { message } => Self::internal(message),
        }
    }
}

impl From<ApplicationRepositoryError> for Error {
    fn from(error: ApplicationRepositoryError) -> Self {
        match error {
            ApplicationRepositoryError::Connection { message } => {
                warn!(%message, "application repository unavailable");
                Self::service_unavailable("application store is unavailable")
            }
            ApplicationRepositoryError::Query { message } => Self::internal(message),
            ApplicationRepositoryError::Duplicate => {
                Self::conflict("you have already applied for this course and session type")
            }
            ApplicationRepositoryError::RankingTaken { ranking } => Self::conflict(format!(
                "ranking {ranking} is already used for this course and session type"
            )),
            ApplicationRepositoryError::NotAccepted => {
                Self::conflict("only accepted applications can be ranked")
            }
        }
    }
}

impl From<PasswordHashError> for Error {
    fn from(error: PasswordHashError) -> Self {
        Self::internal(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(Error::from(UserPersistenceError::connection("refused")), ErrorCode::ServiceUnavailable)]
    #[case(Error::from(UserPersistenceError::duplicate_email("a@b.io")), ErrorCode::Conflict)]
    #[case(Error::from(CourseRepositoryError::duplicate_code("COSC2758")), ErrorCode::Conflict)]
    #[case(Error::from(ApplicationRepositoryError::duplicate()), ErrorCode::Conflict)]
    #[case(Error::from(ApplicationRepositoryError::ranking_taken(1_u32)), ErrorCode::Conflict)]
    #[case(Error::from(ApplicationRepositoryError::not_accepted()), ErrorCode::Conflict)]
    #[case(Error::from(CandidateProfileRepositoryError::query("boom")), ErrorCode::InternalError)]
    #[case(Error::from(PasswordHashError::hash("bad salt")), ErrorCode::InternalError)]
    fn port_errors_map_to_codes(#[case] error: Error, #[case] expected: ErrorCode) {
        assert_eq!(error.code(), expected);
    }
}
