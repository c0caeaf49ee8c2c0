//! Public course catalogue.

use actix_web::{HttpResponse, get, web};

use crate::domain::{ApiResult, Course, CourseId};
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::response::ApiResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::validation::parse_id;

/// List every course ordered by code.
#[utoipa::path(
    get,
    path = "/api/courses",
    responses((status = 200, description = "Courses", body = ApiResponse<Vec<Course>>)),
    tags = ["courses"],
    operation_id = "listCourses",
    security([])
)]
#[get("/courses")]
pub async fn list_courses(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let courses = state.courses.list_courses().await?;
    Ok(ApiResponse::data(courses).ok())
}

/// Fetch one course.
#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(("id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course", body = ApiResponse<Course>),
        (status = 400, description = "Malformed id", body = ErrorEnvelope),
        (status = 404, description = "Unknown course", body = ErrorEnvelope)
    ),
    tags = ["courses"],
    operation_id = "getCourse",
    security([])
)]
#[get("/courses/{id}")]
pub async fn get_course(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path, "id", |raw| CourseId::new(raw))?;
    let course = state.courses.get_course(&id).await?;
    Ok(ApiResponse::data(course).ok())
}
