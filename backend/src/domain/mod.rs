//! Domain primitives, aggregates, ports, and services.
//!
//! Purpose: define strongly typed entities shared by the REST, GraphQL, and
//! persistence layers, plus one service per role that implements the driving
//! ports. Types validate on construction and document their serialisation
//! contracts in Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, Course, CandidateProfile, CandidateApplication: core aggregates.
//! - AccountService, CourseCatalogueService, CandidateService,
//!   LecturerService, AdminService: driving port implementations.

pub mod error;
pub mod ports;

mod access;
mod account_service;
mod admin_service;
mod application;
mod auth;
mod candidate;
mod candidate_service;
mod course;
mod course_catalogue_service;
mod ids;
mod lecturer_service;
mod notification;
mod port_errors;
mod search;
mod statistics;
mod trace_id;
mod user;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use self::access::RepositorySet;
pub use self::account_service::{AccountService, AdminBootstrap};
pub use self::admin_service::AdminService;
pub use self::application::{
    ApplicationDetails, ApplicationDraft, ApplicationStatus, ApplicationValidationError,
    COMMENT_MAX, CandidateApplication, CandidateSummary, CourseSummary, LecturerComment, Ranking,
    SessionType,
};
pub use self::auth::{
    AuthValidationError, PASSWORD_MAX, PASSWORD_MIN, Password, Registration, SignInCredentials,
};
pub use self::candidate::{
    AcademicCredential, Availability, CandidateProfile, CandidateValidationError,
    CredentialDraft, PreviousRole, PreviousRoleDraft, ProfileSettings, SKILL_MAX, SKILLS_LIMIT,
    Skills,
};
pub use self::candidate_service::CandidateService;
pub use self::course::{Course, CourseCode, CourseDraft, CourseValidationError};
pub use self::course_catalogue_service::CourseCatalogueService;
pub use self::error::{Error, ErrorCode};
pub use self::ids::{ApplicationId, CourseId, CredentialId, InvalidIdError, PreviousRoleId, UserId};
pub use self::lecturer_service::LecturerService;
pub use self::notification::CandidateUnavailable;
pub use self::search::{ApplicationSearch, ApplicationSort, UnknownSortError};
pub use self::statistics::{
    CandidateTally, CourseSelection, DEFAULT_SELECTION_THRESHOLD, SelectionStatistics,
    candidates_chosen_for_more_than, chosen_candidates_by_course, selection_statistics,
    unchosen_candidates,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, NewUserAccount, PersonName, Role, User, UserAccount, UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use teachteam::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
