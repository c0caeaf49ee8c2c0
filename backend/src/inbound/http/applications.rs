//! Candidate applications to tutor and lab-assistant sessions.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    ApiResult, ApplicationDetails, ApplicationDraft, Availability, CandidateApplication, CourseId,
    Error, SessionType, Skills,
};
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::response::ApiResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::validation::{invalid, parse_id};

/// Application request body.
///
/// Availability and skills default to the candidate's saved profile.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRequest {
    pub course_id: String,
    /// `tutor` or `lab_assistant`.
    #[schema(example = "tutor")]
    pub session_type: String,
    pub availability: Option<String>,
    pub skills: Option<Vec<String>>,
}

impl TryFrom<ApplicationRequest> for ApplicationDraft {
    type Error = Error;

    fn try_from(value: ApplicationRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            course_id: parse_id(&value.course_id, "courseId", |raw| CourseId::new(raw))?,
            session_type: value.session_type.parse::<SessionType>().map_err(invalid)?,
            availability: value
                .availability
                .as_deref()
                .map(str::parse::<Availability>)
                .transpose()
                .map_err(invalid)?,
            skills: value.skills.map(Skills::new).transpose().map_err(invalid)?,
        })
    }
}

/// Apply for a session of a course.
#[utoipa::path(
    post,
    path = "/api/applications",
    request_body = ApplicationRequest,
    responses(
        (status = 201, description = "Application submitted", body = ApiResponse<CandidateApplication>),
        (status = 400, description = "Invalid request", body = ErrorEnvelope),
        (status = 403, description = "Not a candidate or blocked", body = ErrorEnvelope),
        (status = 404, description = "Unknown course", body = ErrorEnvelope),
        (status = 409, description = "Already applied for this session", body = ErrorEnvelope)
    ),
    tags = ["applications"],
    operation_id = "apply"
)]
#[post("/applications")]
pub async fn apply(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ApplicationRequest>,
) -> ApiResult<HttpResponse> {
    let candidate_id = session.require_user_id()?;
    let draft = ApplicationDraft::try_from(payload.into_inner())?;
    let application = state.candidates.apply(&candidate_id, draft).await?;
    Ok(ApiResponse::data(application)
        .with_message("Application submitted")
        .created())
}

/// The candidate's own applications, newest first.
#[utoipa::path(
    get,
    path = "/api/applications/me",
    responses(
        (status = 200, description = "Applications", body = ApiResponse<Vec<ApplicationDetails>>),
        (status = 401, description = "No session", body = ErrorEnvelope),
        (status = 403, description = "Not a candidate or blocked", body = ErrorEnvelope)
    ),
    tags = ["applications"],
    operation_id = "myApplications"
)]
#[get("/applications/me")]
pub async fn my_applications(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let candidate_id = session.require_user_id()?;
    let applications = state.candidates.list_applications(&candidate_id).await?;
    Ok(ApiResponse::data(applications).ok())
}
