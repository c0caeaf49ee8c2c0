//! PostgreSQL-backed `CandidateProfileRepository` implementation.
//!
//! The profile is assembled from three tables: `candidate_profiles` for
//! availability and skills, plus `academic_credentials` and `previous_roles`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CandidateProfileRepository, CandidateProfileRepositoryError};
use crate::domain::{
    AcademicCredential, CandidateProfile, CredentialId, PreviousRole, PreviousRoleId,
    ProfileSettings, Skills, UserId,
};

use super::diesel_error_mapping::{DbFailure, map_db_failure};
use super::models::{CredentialRow, PreviousRoleRow, ProfileRow};
use super::pool::DbPool;
use super::schema::{academic_credentials, candidate_profiles, previous_roles};

map_db_failure!(CandidateProfileRepositoryError);

/// Diesel-backed implementation of the `CandidateProfileRepository` port.
#[derive(Clone)]
pub struct DieselCandidateProfileRepository {
    pool: DbPool,
}

impl DieselCandidateProfileRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CandidateProfileRepository for DieselCandidateProfileRepository {
    async fn load(
        &self,
        candidate_id: &UserId,
    ) -> Result<CandidateProfile, CandidateProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(DbFailure::from)?;
        let settings: Option<ProfileRow> = candidate_profiles::table
            .find(candidate_id.as_uuid())
            .select(ProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(DbFailure::from)?;
        let credentials: Vec<CredentialRow> = academic_credentials::table
            .filter(academic_credentials::candidate_id.eq(candidate_id.as_uuid()))
            .select(CredentialRow::as_select())
            .order((academic_credentials::year.desc(), academic_credentials::created_at.asc()))
            .load(&mut conn)
            .await
            .map_err(DbFailure::from)?;
        let roles: Vec<PreviousRoleRow> = previous_roles::table
            .filter(previous_roles::candidate_id.eq(candidate_id.as_uuid()))
            .select(PreviousRoleRow::as_select())
            .order(previous_roles::start_date.desc())
            .load(&mut conn)
            .await
            .map_err(DbFailure::from)?;

        let mut profile = CandidateProfile::empty(*candidate_id);
        if let Some(row) = settings {
            profile.availability = row
                .availability
                .as_deref()
                .map(|raw| {
                    raw.parse().map_err(|_| {
                        CandidateProfileRepositoryError::query(format!(
                            "stored availability is invalid: {raw}"
                        ))
                    })
                })
                .transpose()?;
            profile.skills = Skills::from_stored(row.skills);
            profile.updated_at = Some(row.updated_at);
        }
        profile.credentials = credentials.into_iter().map(Into::into).collect();
        profile.previous_roles = roles.into_iter().map(Into::into).collect();
        Ok(profile)
    }

    async fn save_settings(
        &self,
        candidate_id: &UserId,
        settings: &ProfileSettings,
        updated_at: DateTime<Utc>,
    ) -> Result<(), CandidateProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(DbFailure::from)?;
        let row = ProfileRow {
            user_id: *candidate_id.as_uuid(),
            availability: settings
                .availability
                .map(|availability| availability.as_str().to_owned()),
            skills: settings.skills.as_slice().to_vec(),
            updated_at,
        };
        diesel::insert_into(candidate_profiles::table)
            .values(&row)
            .on_conflict(candidate_profiles::user_id)
            .do_update()
            .set((
                candidate_profiles::availability.eq(excluded(candidate_profiles::availability)),
                candidate_profiles::skills.eq(excluded(candidate_profiles::skills)),
                candidate_profiles::updated_at.eq(excluded(candidate_profiles::updated_at)),
            ))
            .execute(&mut conn)
            .await
            .map_err(DbFailure::from)?;
        Ok(())
    }

    async fn add_credential(
        &self,
        candidate_id: &UserId,
        credential: &AcademicCredential,
    ) -> Result<(), CandidateProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(DbFailure::from)?;
        let row = CredentialRow {
            id: *credential.id.as_uuid(),
            candidate_id: *candidate_id.as_uuid(),
            qualification: credential.qualification.clone(),
            institution: credential.institution.clone(),
            year: credential.year,
        };
        diesel::insert_into(academic_credentials::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(DbFailure::from)?;
        Ok(())
    }

    async fn delete_credential(
        &self,
        candidate_id: &UserId,
        credential_id: &CredentialId,
    ) -> Result<bool, CandidateProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(DbFailure::from)?;
        let deleted = diesel::delete(
            academic_credentials::table
                .filter(academic_credentials::id.eq(credential_id.as_uuid()))
                .filter(academic_credentials::candidate_id.eq(candidate_id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(DbFailure::from)?;
        Ok(deleted > 0)
    }

    async fn add_previous_role(
        &self,
        candidate_id: &UserId,
        role: &PreviousRole,
    ) -> Result<(), CandidateProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(DbFailure::from)?;
        let row = PreviousRoleRow {
            id: *role.id.as_uuid(),
            candidate_id: *candidate_id.as_uuid(),
            position: role.position.clone(),
            organisation: role.organisation.clone(),
            start_date: role.start_date,
            end_date: role.end_date,
            description: role.description.clone(),
        };
        diesel::insert_into(previous_roles::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(DbFailure::from)?;
        Ok(())
    }

    async fn delete_previous_role(
        &self,
        candidate_id: &UserId,
        role_id: &PreviousRoleId,
    ) -> Result<bool, CandidateProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(DbFailure::from)?;
        let deleted = diesel::delete(
            previous_roles::table
                .filter(previous_roles::id.eq(role_id.as_uuid()))
                .filter(previous_roles::candidate_id.eq(candidate_id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(DbFailure::from)?;
        Ok(deleted > 0)
    }
}
