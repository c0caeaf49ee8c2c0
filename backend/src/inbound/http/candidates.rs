//! Candidate self-service: profile settings, credentials, and previous roles.
//!
//! ```text
//! GET    /api/candidates/me/profile
//! PUT    /api/candidates/me/profile      {"availability":"part_time","skills":["Rust","SQL"]}
//! POST   /api/candidates/me/credentials  {"qualification":"BSc","institution":"RMIT","year":2023}
//! DELETE /api/candidates/me/credentials/{id}
//! POST   /api/candidates/me/roles        {"position":"Tutor","organisation":"RMIT","startDate":"2023-02-01"}
//! DELETE /api/candidates/me/roles/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    AcademicCredential, ApiResult, Availability, CandidateProfile, CredentialDraft, CredentialId,
    Error, PreviousRole, PreviousRoleDraft, PreviousRoleId, ProfileSettings, Skills,
};
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::response::ApiResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::validation::{invalid, parse_date, parse_id};

/// Availability and skills shown on the profile.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    /// `full_time` or `part_time`; omit to clear.
    #[schema(example = "part_time")]
    pub availability: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl TryFrom<ProfileRequest> for ProfileSettings {
    type Error = Error;

    fn try_from(value: ProfileRequest) -> Result<Self, Self::Error> {
        let availability = value
            .availability
            .as_deref()
            .map(str::parse::<Availability>)
            .transpose()
            .map_err(invalid)?;
        Ok(Self {
            availability,
            skills: Skills::new(value.skills).map_err(invalid)?,
        })
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRequest {
    pub qualification: String,
    pub institution: String,
    pub year: i32,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreviousRoleRequest {
    pub position: String,
    pub organisation: String,
    /// `YYYY-MM-DD`.
    pub start_date: String,
    /// `YYYY-MM-DD`; omit for a current role.
    pub end_date: Option<String>,
    pub description: Option<String>,
}

impl TryFrom<PreviousRoleRequest> for PreviousRoleDraft {
    type Error = Error;

    fn try_from(value: PreviousRoleRequest) -> Result<Self, Self::Error> {
        let start_date = parse_date(&value.start_date, "startDate")?;
        let end_date = value
            .end_date
            .as_deref()
            .map(|raw| parse_date(raw, "endDate"))
            .transpose()?;
        Self::try_from_parts(
            &value.position,
            &value.organisation,
            start_date,
            end_date,
            value.description.as_deref(),
        )
        .map_err(invalid)
    }
}

/// The signed-in candidate's profile.
#[utoipa::path(
    get,
    path = "/api/candidates/me/profile",
    responses(
        (status = 200, description = "Profile", body = ApiResponse<CandidateProfile>),
        (status = 401, description = "No session", body = ErrorEnvelope),
        (status = 403, description = "Not a candidate or blocked", body = ErrorEnvelope)
    ),
    tags = ["candidates"],
    operation_id = "getOwnProfile"
)]
#[get("/candidates/me/profile")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let candidate_id = session.require_user_id()?;
    let profile = state.candidates.profile(&candidate_id).await?;
    Ok(ApiResponse::data(profile).ok())
}

/// Replace availability and skills.
#[utoipa::path(
    put,
    path = "/api/candidates/me/profile",
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = ApiResponse<CandidateProfile>),
        (status = 400, description = "Invalid request", body = ErrorEnvelope),
        (status = 403, description = "Not a candidate or blocked", body = ErrorEnvelope)
    ),
    tags = ["candidates"],
    operation_id = "updateOwnProfile"
)]
#[put("/candidates/me/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProfileRequest>,
) -> ApiResult<HttpResponse> {
    let candidate_id = session.require_user_id()?;
    let settings = ProfileSettings::try_from(payload.into_inner())?;
    let profile = state
        .candidates
        .update_profile(&candidate_id, settings)
        .await?;
    Ok(ApiResponse::data(profile)
        .with_message("Profile updated")
        .ok())
}

/// Add an academic credential.
#[utoipa::path(
    post,
    path = "/api/candidates/me/credentials",
    request_body = CredentialRequest,
    responses(
        (status = 201, description = "Credential added", body = ApiResponse<AcademicCredential>),
        (status = 400, description = "Invalid request", body = ErrorEnvelope),
        (status = 403, description = "Not a candidate or blocked", body = ErrorEnvelope)
    ),
    tags = ["candidates"],
    operation_id = "addCredential"
)]
#[post("/candidates/me/credentials")]
pub async fn add_credential(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CredentialRequest>,
) -> ApiResult<HttpResponse> {
    let candidate_id = session.require_user_id()?;
    let draft =
        CredentialDraft::try_from_parts(&payload.qualification, &payload.institution, payload.year)
            .map_err(invalid)?;
    let credential = state.candidates.add_credential(&candidate_id, draft).await?;
    Ok(ApiResponse::data(credential).created())
}

/// Remove one of the candidate's credentials.
#[utoipa::path(
    delete,
    path = "/api/candidates/me/credentials/{id}",
    params(("id" = String, Path, description = "Credential id")),
    responses(
        (status = 200, description = "Credential removed"),
        (status = 404, description = "Not found or not owned", body = ErrorEnvelope)
    ),
    tags = ["candidates"],
    operation_id = "removeCredential"
)]
#[delete("/candidates/me/credentials/{id}")]
pub async fn remove_credential(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let candidate_id = session.require_user_id()?;
    let credential_id = parse_id(&path, "id", |raw| CredentialId::new(raw))?;
    state
        .candidates
        .remove_credential(&candidate_id, &credential_id)
        .await?;
    Ok(ApiResponse::message("Credential removed").ok())
}

/// Add a previous role.
#[utoipa::path(
    post,
    path = "/api/candidates/me/roles",
    request_body = PreviousRoleRequest,
    responses(
        (status = 201, description = "Role added", body = ApiResponse<PreviousRole>),
        (status = 400, description = "Invalid request", body = ErrorEnvelope),
        (status = 403, description = "Not a candidate or blocked", body = ErrorEnvelope)
    ),
    tags = ["candidates"],
    operation_id = "addPreviousRole"
)]
#[post("/candidates/me/roles")]
pub async fn add_previous_role(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<PreviousRoleRequest>,
) -> ApiResult<HttpResponse> {
    let candidate_id = session.require_user_id()?;
    let draft = PreviousRoleDraft::try_from(payload.into_inner())?;
    let role = state
        .candidates
        .add_previous_role(&candidate_id, draft)
        .await?;
    Ok(ApiResponse::data(role).created())
}

/// Remove one of the candidate's previous roles.
#[utoipa::path(
    delete,
    path = "/api/candidates/me/roles/{id}",
    params(("id" = String, Path, description = "Previous role id")),
    responses(
        (status = 200, description = "Role removed"),
        (status = 404, description = "Not found or not owned", body = ErrorEnvelope)
    ),
    tags = ["candidates"],
    operation_id = "removePreviousRole"
)]
#[delete("/candidates/me/roles/{id}")]
pub async fn remove_previous_role(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let candidate_id = session.require_user_id()?;
    let role_id = parse_id(&path, "id", |raw| PreviousRoleId::new(raw))?;
    state
        .candidates
        .remove_previous_role(&candidate_id, &role_id)
        .await?;
    Ok(ApiResponse::message("Role removed").ok())
}

#[cfg(test)]
#[path = "candidates_tests.rs"]
mod tests;
