//! `CandidateProfileRepository` over the in-memory tables.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{CandidateProfileRepository, CandidateProfileRepositoryError};
use crate::domain::{
    AcademicCredential, CandidateProfile, CredentialId, PreviousRole, PreviousRoleId,
    ProfileSettings, UserId,
};

use super::InMemoryStore;

#[async_trait]
impl CandidateProfileRepository for InMemoryStore {
    async fn load(
        &self,
        candidate_id: &UserId,
    ) -> Result<CandidateProfile, CandidateProfileRepositoryError> {
        let state = self.lock(CandidateProfileRepositoryError::query)?;
        let mut profile = CandidateProfile::empty(*candidate_id);
        if let Some((settings, updated_at)) = state.profiles.get(candidate_id) {
            profile.availability = settings.availability;
            profile.skills = settings.skills.clone();
            profile.updated_at = Some(*updated_at);
        }

        // Stable sorts keep insertion order among ties.
        profile.credentials = state
            .credentials
            .iter()
            .filter(|(owner, _)| owner == candidate_id)
            .map(|(_, credential)| credential.clone())
            .collect();
        profile
            .credentials
            .sort_by(|left, right| right.year.cmp(&left.year));
        profile.previous_roles = state
            .previous_roles
            .iter()
            .filter(|(owner, _)| owner == candidate_id)
            .map(|(_, role)| role.clone())
            .collect();
        profile
            .previous_roles
            .sort_by(|left, right| right.start_date.cmp(&left.start_date));
        Ok(profile)
    }

    async fn save_settings(
        &self,
        candidate_id: &UserId,
        settings: &ProfileSettings,
        updated_at: DateTime<Utc>,
    ) -> Result<(), CandidateProfileRepositoryError> {
        let mut state = self.lock(CandidateProfileRepositoryError::query)?;
        state
            .profiles
            .insert(*candidate_id, (settings.clone(), updated_at));
        Ok(())
    }

    async fn add_credential(
        &self,
        candidate_id: &UserId,
        credential: &AcademicCredential,
    ) -> Result<(), CandidateProfileRepositoryError> {
        let mut state = self.lock(CandidateProfileRepositoryError::query)?;
        state.credentials.push((*candidate_id, credential.clone()));
        Ok(())
    }

    async fn delete_credential(
        &self,
        candidate_id: &UserId,
        credential_id: &CredentialId,
    ) -> Result<bool, CandidateProfileRepositoryError> {
        let mut state = self.lock(CandidateProfileRepositoryError::query)?;
        let before = state.credentials.len();
        state
            .credentials
            .retain(|(owner, credential)| !(owner == candidate_id && credential.id == *credential_id));
        Ok(state.credentials.len() < before)
    }

    async fn add_previous_role(
        &self,
        candidate_id: &UserId,
        role: &PreviousRole,
    ) -> Result<(), CandidateProfileRepositoryError> {
        let mut state = self.lock(CandidateProfileRepositoryError::query)?;
        state.previous_roles.push((*candidate_id, role.clone()));
        Ok(())
    }

    async fn delete_previous_role(
        &self,
        candidate_id: &UserId,
        role_id: &PreviousRoleId,
    ) -> Result<bool, CandidateProfileRepositoryError> {
        let mut state = self.lock(CandidateProfileRepositoryError::query)?;
        let before = state.previous_roles.len();
        state
            .previous_roles
            .retain(|(owner, role)| !(owner == candidate_id && role.id == *role_id));
        Ok(state.previous_roles.len() < before)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::test_fixtures::fixture_timestamp;
    use crate::domain::{Availability, CredentialDraft, PreviousRoleDraft, Skills};

    fn credential(year: i32) -> AcademicCredential {
        CredentialDraft::try_from_parts("BSc", "RMIT", year)
            .expect("credential")
            .into_credential(CredentialId::random())
    }

    #[tokio::test]
    async fn load_without_saved_settings_is_empty() {
        let store = InMemoryStore::new();
        let candidate = UserId::random();

        let profile = store.load(&candidate).await.expect("load");

        assert_eq!(profile, CandidateProfile::empty(candidate));
    }

    #[tokio::test]
    async fn settings_are_upserted() {
        let store = InMemoryStore::new();
        let candidate = UserId::random();
        let settings = ProfileSettings {
            availability: Some(Availability::FullTime),
            skills: Skills::new(["Rust"]).expect("skills"),
        };

        store
            .save_settings(&candidate, &ProfileSettings::default(), fixture_timestamp())
            .await
            .expect("first save");
        store
            .save_settings(&candidate, &settings, fixture_timestamp())
            .await
            .expect("second save");

        let profile = store.load(&candidate).await.expect("load");
        assert_eq!(profile.availability, Some(Availability::FullTime));
        assert_eq!(profile.skills.as_slice(), ["Rust"]);
        assert_eq!(profile.updated_at, Some(fixture_timestamp()));
    }

    #[tokio::test]
    async fn credentials_are_listed_newest_year_first() {
        let store = InMemoryStore::new();
        let candidate = UserId::random();
        for year in [2019, 2023, 2021] {
            store
                .add_credential(&candidate, &credential(year))
                .await
                .expect("add");
        }

        let years: Vec<i32> = store
            .load(&candidate)
            .await
            .expect("load")
            .credentials
            .iter()
            .map(|credential| credential.year)
            .collect();

        assert_eq!(years, [2023, 2021, 2019]);
    }

    #[tokio::test]
    async fn deleting_another_candidates_entry_is_a_miss() {
        let store = InMemoryStore::new();
        let owner = UserId::random();
        let role = PreviousRoleDraft::try_from_parts(
            "Tutor",
            "RMIT",
            NaiveDate::from_ymd_opt(2022, 2, 1).expect("date"),
            None,
            None,
        )
        .expect("role")
        .into_role(PreviousRoleId::random());
        store
            .add_previous_role(&owner, &role)
            .await
            .expect("add");

        let removed = store
            .delete_previous_role(&UserId::random(), &role.id)
            .await
            .expect("delete");

        assert!(!removed);
        assert_eq!(store.load(&owner).await.expect("load").previous_roles.len(), 1);
    }
}
