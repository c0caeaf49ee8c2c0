//! Candidate self-service: profile upkeep and course applications.
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::access::{RepositorySet, require_actor};
use crate::domain::ports::CandidateWorkspace;
use crate::domain::{
    AcademicCredential, ApplicationDetails, ApplicationDraft, ApplicationId, ApplicationStatus,
    CandidateApplication, CandidateProfile, CredentialDraft, CredentialId, Error, PreviousRole,
    PreviousRoleDraft, PreviousRoleId, ProfileSettings, Role, UserId,
};

/// Candidate service implementing [`CandidateWorkspace`].
#[derive(Clone)]
pub struct CandidateService {
    repos: RepositorySet,
    clock: Arc<dyn Clock>,
}

impl CandidateService {
    /// Create a service over the shared repositories.
    pub fn new(repos: RepositorySet, clock: Arc<dyn Clock>) -> Self {
        Self { repos, clock }
    }

    async fn require_candidate(&self, candidate_id: &UserId) -> Result<(), Error> {
        require_actor(self.repos.users.as_ref(), candidate_id, Role::Candidate).await?;
        Ok(())
    }
}

#[async_trait]
impl CandidateWorkspace for CandidateService {
    async fn profile(&self, candidate_id: &UserId) -> Result<CandidateProfile, Error> {
        self.require_candidate(candidate_id).await?;
        Ok(self.repos.profiles.load(candidate_id).await?)
    }

    async fn update_profile(
        &self,
        candidate_id: &UserId,
        settings: ProfileSettings,
    ) -> Result<CandidateProfile, Error> {
        self.require_candidate(candidate_id).await?;
        self.repos
            .profiles
            .save_settings(candidate_id, &settings, self.clock.utc())
            .await?;
        info!(%candidate_id, "updated candidate profile");
        Ok(self.repos.profiles.load(candidate_id).await?)
    }

    async fn add_credential(
        &self,
        candidate_id: &UserId,
        draft: CredentialDraft,
    ) -> Result<AcademicCredential, Error> {
        self.require_candidate(candidate_id).await?;
        let credential = draft.into_credential(CredentialId::random());
        self.repos
            .profiles
            .add_credential(candidate_id, &credential)
            .await?;
        Ok(credential)
    }

    async fn remove_credential(
        &self,
        candidate_id: &UserId,
        credential_id: &CredentialId,
    ) -> Result<(), Error> {
        self.require_candidate(candidate_id).await?;
        if self
            .repos
            .profiles
            .delete_credential(candidate_id, credential_id)
            .await?
        {
            Ok(())
        } else {
            Err(Error::not_found(format!(
                "credential {credential_id} not found"
            )))
        }
    }

    async fn add_previous_role(
        &self,
        candidate_id: &UserId,
        draft: PreviousRoleDraft,
    ) -> Result<PreviousRole, Error> {
        self.require_candidate(candidate_id).await?;
        let role = draft.into_role(PreviousRoleId::random());
        self.repos
            .profiles
            .add_previous_role(candidate_id, &role)
            .await?;
        Ok(role)
    }

    async fn remove_previous_role(
        &self,
        candidate_id: &UserId,
        role_id: &PreviousRoleId,
    ) -> Result<(), Error> {
        self.require_candidate(candidate_id).await?;
        if self
            .repos
            .profiles
            .delete_previous_role(candidate_id, role_id)
            .await?
        {
            Ok(())
        } else {
            Err(Error::not_found(format!("previous role {role_id} not found")))
        }
    }

    async fn apply(
        &self,
        candidate_id: &UserId,
        draft: ApplicationDraft,
    ) -> Result<CandidateApplication, Error> {
        self.require_candidate(candidate_id).await?;
        if self.repos.courses.find_by_id(&draft.course_id).await?.is_none() {
            return Err(Error::not_found(format!(
                "course {} not found",
                draft.course_id
            )));
        }

        let profile = self.repos.profiles.load(candidate_id).await?;
        let availability = draft.availability.or(profile.availability).ok_or_else(|| {
            Error::invalid_request("availability is required on the application or profile")
        })?;
        let now = self.clock.utc();
        let application = CandidateApplication {
            id: ApplicationId::random(),
            candidate_id: *candidate_id,
            course_id: draft.course_id,
            session_type: draft.session_type,
            status: ApplicationStatus::Pending,
            ranking: None,
            comment: None,
            availability,
            skills: draft.skills.unwrap_or(profile.skills),
            created_at: now,
            updated_at: now,
        };
        self.repos.applications.insert(&application).await?;
        info!(
            %candidate_id,
            application_id = %application.id,
            course_id = %application.course_id,
            session_type = %application.session_type,
            "submitted application"
        );
        Ok(application)
    }

    async fn list_applications(
        &self,
        candidate_id: &UserId,
    ) -> Result<Vec<ApplicationDetails>, Error> {
        self.require_candidate(candidate_id).await?;
        Ok(self
            .repos
            .applications
            .list_for_candidate(candidate_id)
            .await?)
    }
}

#[cfg(test)]
#[path = "candidate_service_tests.rs"]
mod tests;
