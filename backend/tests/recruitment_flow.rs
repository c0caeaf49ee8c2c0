//! End-to-end flows over the REST and GraphQL APIs against the in-memory store.
//!
//! Each test builds a fresh stack, drives it in-process with
//! `actix_web::test`, and checks one recruitment rule from the outside.

// Helpers are shared with the behaviour suite; not every crate uses all of them.
#[allow(dead_code)]
mod support;

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header;
use actix_web::test::{self, TestRequest};
use futures_util::{FutureExt, StreamExt};
use rstest::rstest;
use serde_json::{Value, json};

use teachteam::domain::ports::AvailabilityNotifier;

use support::{ADMIN_EMAIL, ADMIN_PASSWORD, PASSWORD, Stack, signup_body};

struct Reply {
    status: u16,
    body: Value,
    cookie: Option<String>,
}

async fn call<S>(app: &S, request: TestRequest, session: Option<&str>) -> Reply
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = match session {
        Some(cookie) => request.insert_header((header::COOKIE, cookie.to_owned())),
        None => request,
    };
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status().as_u16();
    let cookie = response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(|cookie| format!("{}={}", cookie.name(), cookie.value()));
    let bytes = test::read_body(response).await;
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    Reply {
        status,
        body,
        cookie,
    }
}

async fn sign_up<S>(app: &S, first_name: &str, email: &str, role: &str) -> String
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let reply = call(
        app,
        TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(signup_body(first_name, email, role)),
        None,
    )
    .await;
    assert_eq!(reply.status, 201, "sign up {email}: {}", reply.body);
    reply.body["data"]["id"]
        .as_str()
        .expect("new user id")
        .to_owned()
}

async fn sign_in<S>(app: &S, email: &str, password: &str) -> Reply
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    call(
        app,
        TestRequest::post()
            .uri("/api/auth/signin")
            .set_json(json!({ "email": email, "password": password })),
        None,
    )
    .await
}

async fn session_for<S>(app: &S, email: &str, password: &str) -> String
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let reply = sign_in(app, email, password).await;
    assert_eq!(reply.status, 200, "sign in {email}: {}", reply.body);
    reply.cookie.expect("session cookie")
}

async fn graphql<S>(app: &S, session: &str, query: &str, variables: Value) -> Value
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let reply = call(
        app,
        TestRequest::post()
            .uri("/graphql")
            .set_json(json!({ "query": query, "variables": variables })),
        Some(session),
    )
    .await;
    assert_eq!(reply.status, 200);
    reply.body
}

async fn create_course<S>(app: &S, admin: &str, code: &str, name: &str) -> String
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let body = graphql(
        app,
        admin,
        "mutation($input: CourseInput!) { createCourse(input: $input) { id } }",
        json!({ "input": { "code": code, "name": name, "semester": "2025 S1" } }),
    )
    .await;
    body["data"]["createCourse"]["id"]
        .as_str()
        .unwrap_or_else(|| panic!("course id in {body}"))
        .to_owned()
}

async fn assign<S>(app: &S, admin: &str, lecturer_id: &str, course_id: &str)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let body = graphql(
        app,
        admin,
        "mutation($l: ID!, $c: ID!) { assignLecturer(lecturerId: $l, courseId: $c) }",
        json!({ "l": lecturer_id, "c": course_id }),
    )
    .await;
    assert_eq!(body["data"]["assignLecturer"], json!(true), "{body}");
}

async fn apply<S>(app: &S, candidate: &str, course_id: &str, session_type: &str) -> Reply
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    call(
        app,
        TestRequest::post().uri("/api/applications").set_json(json!({
            "courseId": course_id,
            "sessionType": session_type,
            "availability": "part_time",
            "skills": ["Rust", "SQL"],
        })),
        Some(candidate),
    )
    .await
}

async fn set_status<S>(app: &S, lecturer: &str, application_id: &str, status: &str) -> Reply
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    call(
        app,
        TestRequest::patch()
            .uri(&format!("/api/lecturer/applications/{application_id}/status"))
            .set_json(json!({ "status": status })),
        Some(lecturer),
    )
    .await
}

async fn set_ranking<S>(app: &S, lecturer: &str, application_id: &str, ranking: Value) -> Reply
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    call(
        app,
        TestRequest::patch()
            .uri(&format!("/api/lecturer/applications/{application_id}/ranking"))
            .set_json(json!({ "ranking": ranking })),
        Some(lecturer),
    )
    .await
}

fn application_id(reply: &Reply) -> String {
    reply.body["data"]["id"]
        .as_str()
        .expect("application id")
        .to_owned()
}

#[rstest]
#[actix_rt::test]
async fn duplicate_email_is_a_conflict() {
    let stack = Stack::new();
    let app = test::init_service(stack.app()).await;
    sign_up(&app, "Ada", "ada@example.com", "candidate").await;

    let reply = call(
        &app,
        TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(signup_body("Ada", "ADA@example.com", "lecturer")),
        None,
    )
    .await;

    assert_eq!(reply.status, 409);
    assert_eq!(reply.body["success"], json!(false));
    assert_eq!(reply.body["code"], json!("conflict"));
}

#[rstest]
#[case("password")]
#[case("Short#1")]
#[case("NoDigitsHere!")]
#[actix_rt::test]
async fn weak_password_is_a_bad_request(#[case] password: &str) {
    let stack = Stack::new();
    let app = test::init_service(stack.app()).await;
    let mut body = signup_body("Ada", "ada@example.com", "candidate");
    body["password"] = json!(password);

    let reply = call(
        &app,
        TestRequest::post().uri("/api/auth/signup").set_json(body),
        None,
    )
    .await;

    assert_eq!(reply.status, 400);
    assert_eq!(reply.body["code"], json!("invalid_request"));
    assert_eq!(reply.body["details"]["field"], json!("password"));
}

#[rstest]
#[actix_rt::test]
async fn administrators_cannot_self_register() {
    let stack = Stack::new();
    let app = test::init_service(stack.app()).await;

    let reply = call(
        &app,
        TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(signup_body("Eve", "eve@example.com", "admin")),
        None,
    )
    .await;

    assert_eq!(reply.status, 400);
    assert_eq!(reply.body["details"]["field"], json!("role"));
}

#[rstest]
#[actix_rt::test]
async fn duplicate_application_is_a_conflict() {
    let stack = Stack::new();
    stack.seed_admin().await;
    let app = test::init_service(stack.app()).await;
    let admin = session_for(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let course = create_course(&app, &admin, "COSC2758", "Full Stack").await;
    sign_up(&app, "Grace", "grace@example.com", "candidate").await;
    let candidate = session_for(&app, "grace@example.com", PASSWORD).await;

    assert_eq!(apply(&app, &candidate, &course, "tutor").await.status, 201);
    let duplicate = apply(&app, &candidate, &course, "tutor").await;
    let other_session = apply(&app, &candidate, &course, "lab_assistant").await;

    assert_eq!(duplicate.status, 409);
    assert_eq!(duplicate.body["code"], json!("conflict"));
    assert_eq!(other_session.status, 201);
}

#[rstest]
#[actix_rt::test]
async fn blocking_refuses_sign_in_and_existing_sessions() {
    let stack = Stack::new();
    stack.seed_admin().await;
    let app = test::init_service(stack.app()).await;
    let admin = session_for(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let candidate_id = sign_up(&app, "Grace", "grace@example.com", "candidate").await;
    let candidate = session_for(&app, "grace@example.com", PASSWORD).await;
    let mut events = stack.notifier.subscribe();

    let body = graphql(
        &app,
        &admin,
        "mutation($id: ID!) { blockCandidate(candidateId: $id) { isBlocked } }",
        json!({ "id": candidate_id }),
    )
    .await;
    assert_eq!(body["data"]["blockCandidate"]["isBlocked"], json!(true));

    let me = call(&app, TestRequest::get().uri("/api/auth/me"), Some(&candidate)).await;
    assert_eq!(me.status, 403);
    let again = sign_in(&app, "grace@example.com", PASSWORD).await;
    assert_eq!(again.status, 403);
    assert!(again.cookie.is_none(), "blocked sign-in must not start a session");

    let event = events
        .next()
        .now_or_never()
        .flatten()
        .expect("candidate unavailable event");
    assert_eq!(event.candidate_id.to_string(), candidate_id);
}

#[rstest]
#[actix_rt::test]
async fn lecturers_only_see_assigned_courses() {
    let stack = Stack::new();
    stack.seed_admin().await;
    let app = test::init_service(stack.app()).await;
    let admin = session_for(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let assigned = create_course(&app, &admin, "COSC2758", "Full Stack").await;
    let other = create_course(&app, &admin, "ISYS1101", "Databases").await;
    let lecturer_id = sign_up(&app, "Alan", "alan@example.com", "lecturer").await;
    assign(&app, &admin, &lecturer_id, &assigned).await;
    sign_up(&app, "Grace", "grace@example.com", "candidate").await;
    let candidate = session_for(&app, "grace@example.com", PASSWORD).await;
    apply(&app, &candidate, &assigned, "tutor").await;
    let foreign = application_id(&apply(&app, &candidate, &other, "tutor").await);
    let lecturer = session_for(&app, "alan@example.com", PASSWORD).await;

    let listed = call(
        &app,
        TestRequest::get().uri("/api/lecturer/applications"),
        Some(&lecturer),
    )
    .await;
    let filtered = call(
        &app,
        TestRequest::get().uri(&format!("/api/lecturer/applications?courseId={other}")),
        Some(&lecturer),
    )
    .await;
    let review = set_status(&app, &lecturer, &foreign, "accepted").await;

    assert_eq!(listed.status, 200);
    let courses: Vec<&str> = listed.body["data"]
        .as_array()
        .expect("applications")
        .iter()
        .filter_map(|details| details["course"]["id"].as_str())
        .collect();
    assert_eq!(courses, [assigned.as_str()]);
    assert_eq!(filtered.status, 403);
    assert_eq!(review.status, 403);
}

#[rstest]
#[actix_rt::test]
async fn rankings_follow_acceptance_and_stay_unique() {
    let stack = Stack::new();
    stack.seed_admin().await;
    let app = test::init_service(stack.app()).await;
    let admin = session_for(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let course = create_course(&app, &admin, "COSC2758", "Full Stack").await;
    let lecturer_id = sign_up(&app, "Alan", "alan@example.com", "lecturer").await;
    assign(&app, &admin, &lecturer_id, &course).await;
    let mut applications = Vec::new();
    for (name, email) in [("Ada", "ada@example.com"), ("Grace", "grace@example.com")] {
        sign_up(&app, name, email, "candidate").await;
        let candidate = session_for(&app, email, PASSWORD).await;
        applications.push(application_id(&apply(&app, &candidate, &course, "tutor").await));
    }
    let lecturer = session_for(&app, "alan@example.com", PASSWORD).await;
    let (first, second) = (&applications[0], &applications[1]);

    let pending = set_ranking(&app, &lecturer, first, json!(1)).await;
    assert_eq!(pending.status, 409, "pending applications cannot be ranked");

    for id in [first, second] {
        assert_eq!(set_status(&app, &lecturer, id, "accepted").await.status, 200);
    }
    assert_eq!(set_ranking(&app, &lecturer, first, json!(1)).await.status, 200);
    let taken = set_ranking(&app, &lecturer, second, json!(1)).await;
    assert_eq!(taken.status, 409);
    let zero = set_ranking(&app, &lecturer, second, json!(0)).await;
    assert_eq!(zero.status, 400);
    let oversized = set_ranking(&app, &lecturer, second, json!(3_000_000_000_u64)).await;
    assert_eq!(oversized.status, 400);
    assert_eq!(oversized.body["code"], json!("invalid_request"));

    let rejected = set_status(&app, &lecturer, first, "rejected").await;
    assert_eq!(rejected.status, 200);
    assert_eq!(rejected.body["data"]["ranking"], Value::Null);
    assert_eq!(set_ranking(&app, &lecturer, second, json!(1)).await.status, 200);
}

#[rstest]
#[actix_rt::test]
async fn admin_reports_reflect_acceptances() {
    let stack = Stack::new();
    stack.seed_admin().await;
    let app = test::init_service(stack.app()).await;
    let admin = session_for(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let course = create_course(&app, &admin, "COSC2758", "Full Stack").await;
    let lecturer_id = sign_up(&app, "Alan", "alan@example.com", "lecturer").await;
    assign(&app, &admin, &lecturer_id, &course).await;
    sign_up(&app, "Ada", "ada@example.com", "candidate").await;
    let ada = session_for(&app, "ada@example.com", PASSWORD).await;
    let accepted = application_id(&apply(&app, &ada, &course, "tutor").await);
    sign_up(&app, "Grace", "grace@example.com", "candidate").await;
    let lecturer = session_for(&app, "alan@example.com", PASSWORD).await;
    set_status(&app, &lecturer, &accepted, "accepted").await;

    let body = graphql(
        &app,
        &admin,
        "{ chosenCandidatesByCourse { courseCode candidates { firstName } } \
           unchosenCandidates { firstName } }",
        Value::Null,
    )
    .await;

    assert_eq!(
        body["data"]["chosenCandidatesByCourse"],
        json!([{ "courseCode": "COSC2758", "candidates": [{ "firstName": "Ada" }] }])
    );
    assert_eq!(
        body["data"]["unchosenCandidates"],
        json!([{ "firstName": "Grace" }])
    );
}

#[rstest]
#[actix_rt::test]
async fn admin_api_refuses_other_roles() {
    let stack = Stack::new();
    let app = test::init_service(stack.app()).await;
    sign_up(&app, "Grace", "grace@example.com", "candidate").await;
    let candidate = session_for(&app, "grace@example.com", PASSWORD).await;

    let body = graphql(&app, &candidate, "{ users { id } }", Value::Null).await;

    assert_eq!(body["errors"][0]["extensions"]["code"], json!("forbidden"));
}
