//! Lecturer review of applications to their assigned courses.
//!
//! ```text
//! GET   /api/lecturer/courses
//! GET   /api/lecturer/applications?courseId=..&sessionType=tutor&skill=rust&sortBy=candidate_name
//! GET   /api/lecturer/candidates/{id}/profile
//! PATCH /api/lecturer/applications/{id}/status   {"status":"accepted"}
//! PATCH /api/lecturer/applications/{id}/ranking  {"ranking":1}
//! PATCH /api/lecturer/applications/{id}/comment  {"comment":"Strong SQL background"}
//! GET   /api/lecturer/statistics?courseId=..
//! ```

use actix_web::{HttpResponse, get, patch, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    ApiResult, ApplicationDetails, ApplicationId, ApplicationSearch, ApplicationSort,
    ApplicationStatus, Availability, CandidateApplication, CandidateProfile, Course, CourseId,
    Error, LecturerComment, Ranking, SelectionStatistics, SessionType, UserId,
};
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::response::ApiResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::validation::{invalid, parse_id};

/// Filters and ordering for the lecturer's application list.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ApplicationQuery {
    pub course_id: Option<String>,
    /// `tutor` or `lab_assistant`.
    pub session_type: Option<String>,
    /// `pending`, `accepted`, or `rejected`.
    pub status: Option<String>,
    /// `full_time` or `part_time`.
    pub availability: Option<String>,
    /// Case-insensitive skill the application must list.
    pub skill: Option<String>,
    /// Case-insensitive substring of the candidate's full name.
    pub candidate_name: Option<String>,
    /// `created_at` (default), `course_name`, `availability`, `ranking`, or `candidate_name`.
    pub sort_by: Option<String>,
}

fn parse_optional<T, E>(
    raw: Option<&str>,
    parse: impl FnOnce(&str) -> Result<T, E>,
) -> Result<Option<T>, E> {
    raw.map(parse).transpose()
}

impl TryFrom<ApplicationQuery> for ApplicationSearch {
    type Error = Error;

    fn try_from(query: ApplicationQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            course_id: parse_optional(query.course_id.as_deref(), |raw| {
                parse_id(raw, "courseId", |raw| CourseId::new(raw))
            })?,
            session_type: parse_optional(query.session_type.as_deref(), str::parse::<SessionType>)
                .map_err(invalid)?,
            status: parse_optional(query.status.as_deref(), str::parse::<ApplicationStatus>)
                .map_err(invalid)?,
            availability: parse_optional(query.availability.as_deref(), str::parse::<Availability>)
                .map_err(invalid)?,
            skill: query.skill,
            candidate_name: query.candidate_name,
            restrict_to_lecturer: None,
            sort: parse_optional(query.sort_by.as_deref(), str::parse::<ApplicationSort>)
                .map_err(invalid)?
                .unwrap_or_default(),
        })
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct StatisticsQuery {
    /// Restrict the report to one assigned course.
    pub course_id: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct StatusRequest {
    #[schema(example = "accepted")]
    pub status: String,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RankingRequest {
    /// Positive rank, or `null` to clear.
    #[schema(example = 1)]
    pub ranking: Option<i64>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CommentRequest {
    pub comment: String,
}

fn application_id(path: &str) -> Result<ApplicationId, Error> {
    parse_id(path, "id", |raw| ApplicationId::new(raw))
}

/// Courses assigned to the signed-in lecturer.
#[utoipa::path(
    get,
    path = "/api/lecturer/courses",
    responses(
        (status = 200, description = "Assigned courses", body = ApiResponse<Vec<Course>>),
        (status = 403, description = "Not a lecturer or blocked", body = ErrorEnvelope)
    ),
    tags = ["lecturer"],
    operation_id = "assignedCourses"
)]
#[get("/lecturer/courses")]
pub async fn assigned_courses(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let lecturer_id = session.require_user_id()?;
    let courses = state.lecturers.assigned_courses(&lecturer_id).await?;
    Ok(ApiResponse::data(courses).ok())
}

/// Search applications to the lecturer's courses.
#[utoipa::path(
    get,
    path = "/api/lecturer/applications",
    params(ApplicationQuery),
    responses(
        (status = 200, description = "Matching applications", body = ApiResponse<Vec<ApplicationDetails>>),
        (status = 400, description = "Invalid filter", body = ErrorEnvelope),
        (status = 403, description = "Not a lecturer, or course not assigned", body = ErrorEnvelope)
    ),
    tags = ["lecturer"],
    operation_id = "searchApplications"
)]
#[get("/lecturer/applications")]
pub async fn search_applications(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<ApplicationQuery>,
) -> ApiResult<HttpResponse> {
    let lecturer_id = session.require_user_id()?;
    let search = ApplicationSearch::try_from(query.into_inner())?;
    let results = state
        .lecturers
        .search_applications(&lecturer_id, search)
        .await?;
    Ok(ApiResponse::data(results).ok())
}

/// Profile of a candidate who applied to one of the lecturer's courses.
#[utoipa::path(
    get,
    path = "/api/lecturer/candidates/{id}/profile",
    params(("id" = String, Path, description = "Candidate user id")),
    responses(
        (status = 200, description = "Candidate profile", body = ApiResponse<CandidateProfile>),
        (status = 404, description = "No application from this candidate to an assigned course", body = ErrorEnvelope)
    ),
    tags = ["lecturer"],
    operation_id = "lecturerCandidateProfile"
)]
#[get("/lecturer/candidates/{id}/profile")]
pub async fn candidate_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let lecturer_id = session.require_user_id()?;
    let candidate_id = parse_id(&path, "id", |raw| UserId::new(raw))?;
    let profile = state
        .lecturers
        .candidate_profile(&lecturer_id, &candidate_id)
        .await?;
    Ok(ApiResponse::data(profile).ok())
}

/// Accept, reject, or reset an application.
#[utoipa::path(
    patch,
    path = "/api/lecturer/applications/{id}/status",
    params(("id" = String, Path, description = "Application id")),
    request_body = StatusRequest,
    responses(
        (status = 200, description = "Updated application", body = ApiResponse<CandidateApplication>),
        (status = 400, description = "Unknown status", body = ErrorEnvelope),
        (status = 403, description = "Course not assigned", body = ErrorEnvelope),
        (status = 404, description = "Unknown application", body = ErrorEnvelope)
    ),
    tags = ["lecturer"],
    operation_id = "setApplicationStatus"
)]
#[patch("/lecturer/applications/{id}/status")]
pub async fn set_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<StatusRequest>,
) -> ApiResult<HttpResponse> {
    let lecturer_id = session.require_user_id()?;
    let id = application_id(&path)?;
    let status = payload.status.parse::<ApplicationStatus>().map_err(invalid)?;
    let application = state.lecturers.set_status(&lecturer_id, &id, status).await?;
    Ok(ApiResponse::data(application)
        .with_message(format!("Application {status}"))
        .ok())
}

/// Rank an accepted application, or clear its rank.
#[utoipa::path(
    patch,
    path = "/api/lecturer/applications/{id}/ranking",
    params(("id" = String, Path, description = "Application id")),
    request_body = RankingRequest,
    responses(
        (status = 200, description = "Updated application", body = ApiResponse<CandidateApplication>),
        (status = 400, description = "Rank out of range", body = ErrorEnvelope),
        (status = 403, description = "Course not assigned", body = ErrorEnvelope),
        (status = 409, description = "Not accepted, or rank already used", body = ErrorEnvelope)
    ),
    tags = ["lecturer"],
    operation_id = "setApplicationRanking"
)]
#[patch("/lecturer/applications/{id}/ranking")]
pub async fn set_ranking(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<RankingRequest>,
) -> ApiResult<HttpResponse> {
    let lecturer_id = session.require_user_id()?;
    let id = application_id(&path)?;
    let ranking = payload.ranking.map(Ranking::new).transpose().map_err(invalid)?;
    let application = state.lecturers.set_ranking(&lecturer_id, &id, ranking).await?;
    Ok(ApiResponse::data(application).ok())
}

/// Record the lecturer's comment on an application.
#[utoipa::path(
    patch,
    path = "/api/lecturer/applications/{id}/comment",
    params(("id" = String, Path, description = "Application id")),
    request_body = CommentRequest,
    responses(
        (status = 200, description = "Updated application", body = ApiResponse<CandidateApplication>),
        (status = 400, description = "Empty or oversized comment", body = ErrorEnvelope),
        (status = 403, description = "Course not assigned", body = ErrorEnvelope)
    ),
    tags = ["lecturer"],
    operation_id = "setApplicationComment"
)]
#[patch("/lecturer/applications/{id}/comment")]
pub async fn set_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<CommentRequest>,
) -> ApiResult<HttpResponse> {
    let lecturer_id = session.require_user_id()?;
    let id = application_id(&path)?;
    let comment = LecturerComment::new(&payload.comment).map_err(invalid)?;
    let application = state.lecturers.set_comment(&lecturer_id, &id, comment).await?;
    Ok(ApiResponse::data(application).ok())
}

/// Most, least, and not chosen candidates across the lecturer's courses.
#[utoipa::path(
    get,
    path = "/api/lecturer/statistics",
    params(StatisticsQuery),
    responses(
        (status = 200, description = "Selection statistics", body = ApiResponse<SelectionStatistics>),
        (status = 403, description = "Not a lecturer, or course not assigned", body = ErrorEnvelope)
    ),
    tags = ["lecturer"],
    operation_id = "selectionStatistics"
)]
#[get("/lecturer/statistics")]
pub async fn statistics(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<StatisticsQuery>,
) -> ApiResult<HttpResponse> {
    let lecturer_id = session.require_user_id()?;
    let course_id = parse_optional(query.course_id.as_deref(), |raw| {
        parse_id(raw, "courseId", |raw| CourseId::new(raw))
    })?;
    let report = state.lecturers.statistics(&lecturer_id, course_id).await?;
    Ok(ApiResponse::data(report).ok())
}

#[cfg(test)]
#[path = "lecturer_tests.rs"]
mod tests;
