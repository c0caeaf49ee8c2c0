//! Port abstraction for candidate profiles, credentials, and previous roles.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    AcademicCredential, CandidateProfile, CredentialId, PreviousRole, PreviousRoleId,
    ProfileSettings, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by candidate profile adapters.
    pub enum CandidateProfileRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "profile repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "profile repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CandidateProfileRepository: Send + Sync {
    /// Assemble the profile; an empty profile when nothing was saved yet.
    async fn load(&self, candidate_id: &UserId)
    -> Result<CandidateProfile, CandidateProfileRepositoryError>;

    /// Upsert availability and skills.
    async fn save_settings(
        &self,
        candidate_id: &UserId,
        settings: &ProfileSettings,
        updated_at: DateTime<Utc>,
    ) -> Result<(), CandidateProfileRepositoryError>;

    /// Append a credential.
    async fn add_credential(
        &self,
        candidate_id: &UserId,
        credential: &AcademicCredential,
    ) -> Result<(), CandidateProfileRepositoryError>;

    /// Delete a credential owned by the candidate.
    async fn delete_credential(
        &self,
        candidate_id: &UserId,
        credential_id: &CredentialId,
    ) -> Result<bool, CandidateProfileRepositoryError>;

    /// Append a previous role.
    async fn add_previous_role(
        &self,
        candidate_id: &UserId,
        role: &PreviousRole,
    ) -> Result<(), CandidateProfileRepositoryError>;

    /// Delete a previous role owned by the candidate.
    async fn delete_previous_role(
        &self,
        candidate_id: &UserId,
        role_id: &PreviousRoleId,
    ) -> Result<bool, CandidateProfileRepositoryError>;
}
