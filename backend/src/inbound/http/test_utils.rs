//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::{HttpResponse, web};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::session::SessionContext;
use crate::domain::{Error, UserId};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set by a response, if any.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

/// Test-only route that signs the path's user id into the session.
///
/// Mount with `.route("/test/login/{id}", web::get().to(test_login))`.
pub async fn test_login(
    session: SessionContext,
    path: web::Path<String>,
) -> Result<HttpResponse, Error> {
    let id = UserId::new(path.into_inner()).map_err(|err| Error::invalid_request(err.to_string()))?;
    session.sign_in(&id)?;
    Ok(HttpResponse::NoContent().finish())
}

/// Deserialize the `data` member of a success envelope.
pub fn envelope_data<T: DeserializeOwned>(body: &Value) -> T {
    assert_eq!(body["success"], Value::Bool(true), "expected success envelope: {body}");
    serde_json::from_value(body["data"].clone()).expect("envelope data")
}

/// REST app over `state` with the test session middleware and login route.
pub fn rest_app(
    state: super::state::HttpState,
) -> actix_web::App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    actix_web::App::new()
        .wrap(test_session_middleware())
        .app_data(web::Data::new(state))
        .configure(super::extractor_config)
        .route("/test/login/{id}", web::get().to(test_login))
        .service(web::scope("/api").configure(super::configure))
}

/// Sign `$id` in through the test login route and return the session cookie.
macro_rules! login_as {
    ($app:expr, $id:expr) => {{
        let response = actix_web::test::call_service(
            &$app,
            actix_web::test::TestRequest::get()
                .uri(&format!("/test/login/{}", $id))
                .to_request(),
        )
        .await;
        $crate::inbound::http::test_utils::session_cookie(&response).expect("login cookie")
    }};
}
pub(crate) use login_as;
