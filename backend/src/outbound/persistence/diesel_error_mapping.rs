//! Shared Diesel error mapping for the repository adapters.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Classified Diesel failure, ready for a repository-specific error enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DbFailure {
    /// Connection dropped or could not be checked out.
    Connection(String),
    /// A unique constraint rejected the write.
    UniqueViolation { constraint: Option<String> },
    /// A check constraint rejected the write.
    CheckViolation { constraint: Option<String> },
    /// Any other failure.
    Query(String),
}

impl From<PoolError> for DbFailure {
    fn from(error: PoolError) -> Self {
        match error {
            PoolError::Checkout { message } | PoolError::Build { message } => {
                Self::Connection(message)
            }
        }
    }
}

impl From<DieselError> for DbFailure {
    fn from(error: DieselError) -> Self {
        match &error {
            DieselError::DatabaseError(kind, info) => {
                debug!(?kind, message = info.message(), "diesel operation failed");
            }
            _ => debug!(
                error_type = %std::any::type_name_of_val(&error),
                "diesel operation failed"
            ),
        }

        match error {
            DieselError::NotFound => Self::Query("record not found".to_owned()),
            DieselError::QueryBuilderError(_) => Self::Query("database query error".to_owned()),
            DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
                Self::Connection("database connection error".to_owned())
            }
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::UniqueViolation {
                    constraint: info.constraint_name().map(str::to_owned),
                }
            }
            DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, info) => {
                Self::CheckViolation {
                    constraint: info.constraint_name().map(str::to_owned),
                }
            }
            _ => Self::Query("database error".to_owned()),
        }
    }
}

impl DbFailure {
    /// Whether a unique or check constraint with this name rejected the write.
    pub(crate) fn violates(&self, name: &str) -> bool {
        matches!(
            self,
            Self::UniqueViolation { constraint: Some(c) } | Self::CheckViolation { constraint: Some(c) }
                if c == name
        )
    }
}

/// Generate a `From<DbFailure>` impl for a port error with `Connection` and
/// `Query` variants. Constraint violations fall back to `Query` unless the
/// repository intercepts them first.
macro_rules! map_db_failure {
    ($error:ty) => {
        impl From<$crate::outbound::persistence::diesel_error_mapping::DbFailure> for $error {
            fn from(failure: $crate::outbound::persistence::diesel_error_mapping::DbFailure) -> Self {
                use $crate::outbound::persistence::diesel_error_mapping::DbFailure;
                match failure {
                    DbFailure::Connection(message) => Self::connection(message),
                    DbFailure::UniqueViolation { constraint } => Self::query(format!(
                        "unique constraint violated: {}",
                        constraint.as_deref().unwrap_or("unknown")
                    )),
                    DbFailure::CheckViolation { constraint } => Self::query(format!(
                        "check constraint violated: {}",
                        constraint.as_deref().unwrap_or("unknown")
                    )),
                    DbFailure::Query(message) => Self::query(message),
                }
            }
        }
    };
}

pub(crate) use map_db_failure;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn pool_errors_are_connection_failures() {
        let failure = DbFailure::from(PoolError::checkout("timed out"));
        assert_eq!(failure, DbFailure::Connection("timed out".to_owned()));
    }

    #[test]
    fn not_found_is_a_query_failure() {
        assert!(matches!(
            DbFailure::from(DieselError::NotFound),
            DbFailure::Query(_)
        ));
    }

    #[test]
    fn violates_matches_constraint_name() {
        let failure = DbFailure::UniqueViolation {
            constraint: Some("users_email_key".to_owned()),
        };
        assert!(failure.violates("users_email_key"));
        assert!(!failure.violates("courses_code_key"));
    }

    #[test]
    fn violates_matches_check_constraints() {
        let failure = DbFailure::CheckViolation {
            constraint: Some("candidate_applications_ranked_when_accepted".to_owned()),
        };
        assert!(failure.violates("candidate_applications_ranked_when_accepted"));
        assert!(!failure.violates("candidate_applications_unique_ranking"));
    }
}
