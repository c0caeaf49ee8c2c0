//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`AccountCommand`, `CourseQuery`, `CandidateWorkspace`,
//! `LecturerReview`, `AdminConsole`) are called by inbound adapters. Driven
//! ports (repositories, `PasswordHasher`, `AvailabilityNotifier`) are
//! implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod admin_console;
mod application_repository;
mod availability_notifier;
mod candidate_profile_repository;
mod candidate_workspace;
mod course_query;
mod course_repository;
mod lecturer_review;
mod password_hasher;
mod user_repository;

#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_command::AccountCommand;
#[cfg(test)]
pub use admin_console::MockAdminConsole;
pub use admin_console::AdminConsole;
#[cfg(test)]
pub use application_repository::MockApplicationRepository;
pub use application_repository::{ApplicationRepository, ApplicationRepositoryError};
pub use availability_notifier::AvailabilityNotifier;
#[cfg(test)]
pub use candidate_profile_repository::MockCandidateProfileRepository;
pub use candidate_profile_repository::{
    CandidateProfileRepository, CandidateProfileRepositoryError,
};
#[cfg(test)]
pub use candidate_workspace::MockCandidateWorkspace;
pub use candidate_workspace::CandidateWorkspace;
#[cfg(test)]
pub use course_query::MockCourseQuery;
pub use course_query::CourseQuery;
#[cfg(test)]
pub use course_repository::MockCourseRepository;
pub use course_repository::{CourseRepository, CourseRepositoryError};
#[cfg(test)]
pub use lecturer_review::MockLecturerReview;
pub use lecturer_review::LecturerReview;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
