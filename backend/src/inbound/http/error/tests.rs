//! Status mapping, envelope shape, and redaction of REST errors.

use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, ResponseError, test, web};
use rstest::rstest;
use serde::Deserialize;
use serde_json::{Value, json};

use super::*;

const TRACE_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

async fn envelope(error: &Error) -> (StatusCode, Option<String>, Value) {
    let response = error.error_response();
    let status = response.status();
    let trace = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body()).await.expect("body");
    (status, trace, serde_json::from_slice(&bytes).expect("json"))
}

#[rstest]
#[case(Error::invalid_request("weak password"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("sign in required"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("account blocked"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("course not found"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("already applied"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("database down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
#[::core::prelude::v1::test]
fn each_code_has_one_status(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(error.status_code(), status);
}

#[rstest]
#[actix_web::test]
async fn failures_use_the_envelope_and_echo_the_trace_id() {
    let error = Error::conflict("You have already applied for this course and session type")
        .with_trace_id(TRACE_ID)
        .with_details(json!({ "field": "courseId" }));

    let (status, trace, body) = envelope(&error).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(trace.as_deref(), Some(TRACE_ID));
    assert_eq!(
        body,
        json!({
            "success": false,
            "code": "conflict",
            "message": "You have already applied for this course and session type",
            "traceId": TRACE_ID,
            "details": { "field": "courseId" },
        })
    );
}

#[rstest]
#[actix_web::test]
async fn missing_trace_id_omits_the_header() {
    let (_, trace, body) = envelope(&Error::unauthorized("sign in required")).await;

    assert!(trace.is_none());
    assert!(body.get("traceId").is_none());
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted() {
    let error = Error::internal("connection refused at 10.0.0.4")
        .with_trace_id(TRACE_ID)
        .with_details(json!({ "query": "select 1" }));

    let (status, trace, body) = envelope(&error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(trace.as_deref(), Some(TRACE_ID));
    assert_eq!(body["message"], json!("Internal server error"));
    assert_eq!(body["traceId"], json!(TRACE_ID));
    assert!(body.get("details").is_none());
}

#[rstest]
#[::core::prelude::v1::test]
fn client_errors_pass_through_redaction() {
    let error = Error::forbidden("you are not assigned to this course");

    assert_eq!(redact_if_internal(&error), error);
}

#[rstest]
#[::core::prelude::v1::test]
fn actix_errors_become_generic_internal_errors() {
    let error: Error = actix_web::error::ErrorBadRequest("boom").into();

    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(error.message(), "Internal server error");
}

#[derive(Deserialize)]
struct SignIn {
    #[expect(dead_code, reason = "only the shape matters")]
    email: String,
}

#[rstest]
#[case(r#"{"email": "#, "application/json", "invalid_json")]
#[case("[]", "application/json", "invalid_json")]
#[case(r#"{"email":"a@b.co"}"#, "text/plain", "unsupported_content_type")]
#[actix_web::test]
async fn malformed_bodies_use_the_envelope(
    #[case] body: &str,
    #[case] content_type: &str,
    #[case] code: &str,
) {
    let app = test::init_service(
        App::new()
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route(
                "/",
                web::post().to(|_: web::Json<SignIn>| async { HttpResponse::Ok().finish() }),
            ),
    )
    .await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/")
            .insert_header(("content-type", content_type))
            .set_payload(body.to_owned())
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload: Value = test::read_body_json(response).await;
    assert_eq!(payload["success"], json!(false));
    assert_eq!(payload["details"], json!({ "field": "body", "code": code }));
}

#[derive(Deserialize)]
struct Page {
    #[expect(dead_code, reason = "only the shape matters")]
    limit: u32,
}

#[rstest]
#[actix_web::test]
async fn malformed_queries_use_the_envelope() {
    let app = test::init_service(
        App::new()
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .route(
                "/",
                web::get().to(|_: web::Query<Page>| async { HttpResponse::Ok().finish() }),
            ),
    )
    .await;

    let response = test::call_service(
        &app,
        test::TestRequest::get().uri("/?limit=many").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload: Value = test::read_body_json(response).await;
    assert_eq!(payload["code"], json!("invalid_request"));
    assert_eq!(payload["details"]["field"], json!("query"));
}
