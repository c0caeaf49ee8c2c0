//! Driving port for candidate self-service: profile upkeep and applications.
//!
//! Every operation takes the acting user's id and refuses anyone who is not an
//! unblocked candidate.

use async_trait::async_trait;

use crate::domain::{
    AcademicCredential, ApplicationDetails, ApplicationDraft, CandidateApplication,
    CandidateProfile, CredentialDraft, CredentialId, Error, PreviousRole, PreviousRoleDraft,
    PreviousRoleId, ProfileSettings, UserId,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CandidateWorkspace: Send + Sync {
    /// The candidate's own profile.
    async fn profile(&self, candidate_id: &UserId) -> Result<CandidateProfile, Error>;

    /// Replace availability and skills.
    async fn update_profile(
        &self,
        candidate_id: &UserId,
        settings: ProfileSettings,
    ) -> Result<CandidateProfile, Error>;

    /// Add an academic credential.
    async fn add_credential(
        &self,
        candidate_id: &UserId,
        draft: CredentialDraft,
    ) -> Result<AcademicCredential, Error>;

    /// Remove one of the candidate's credentials.
    async fn remove_credential(
        &self,
        candidate_id: &UserId,
        credential_id: &CredentialId,
    ) -> Result<(), Error>;

    /// Add a previous role.
    async fn add_previous_role(
        &self,
        candidate_id: &UserId,
        draft: PreviousRoleDraft,
    ) -> Result<PreviousRole, Error>;

    /// Remove one of the candidate's previous roles.
    async fn remove_previous_role(
        &self,
        candidate_id: &UserId,
        role_id: &PreviousRoleId,
    ) -> Result<(), Error>;

    /// Apply for a course session. Duplicates are refused with `conflict`.
    async fn apply(
        &self,
        candidate_id: &UserId,
        draft: ApplicationDraft,
    ) -> Result<CandidateApplication, Error>;

    /// The candidate's applications, newest first.
    async fn list_applications(&self, candidate_id: &UserId)
    -> Result<Vec<ApplicationDetails>, Error>;
}
