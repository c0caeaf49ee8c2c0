//! Account handlers: sign-up, sign-in, sign-out, and the session user.
//!
//! ```text
//! POST /api/auth/signup  {"firstName":"Ada","lastName":"Lovelace","email":"ada@example.com","password":"Str0ng!pass","role":"candidate"}
//! POST /api/auth/signin  {"email":"ada@example.com","password":"Str0ng!pass"}
//! POST /api/auth/signout
//! GET  /api/auth/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    ApiResult, EmailAddress, Password, PersonName, Registration, Role, SignInCredentials, User,
};
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::response::ApiResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::validation::{invalid, invalid_at};

/// Sign-up request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    /// `candidate` or `lecturer`.
    #[schema(example = "candidate")]
    pub role: String,
}

impl TryFrom<SignUpRequest> for Registration {
    type Error = crate::domain::Error;

    fn try_from(value: SignUpRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            first_name: PersonName::new(&value.first_name)
                .map_err(|err| invalid_at("firstName", err))?,
            last_name: PersonName::new(&value.last_name)
                .map_err(|err| invalid_at("lastName", err))?,
            email: EmailAddress::new(&value.email).map_err(invalid)?,
            password: Password::new(&value.password).map_err(invalid)?,
            role: value.role.parse::<Role>().map_err(invalid)?,
        })
    }
}

/// Sign-in request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Register a candidate or lecturer account.
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account created", body = ApiResponse<User>),
        (status = 400, description = "Invalid request, including `role: admin`", body = ErrorEnvelope),
        (status = 409, description = "Email already registered", body = ErrorEnvelope)
    ),
    tags = ["auth"],
    operation_id = "signUp",
    security([])
)]
#[post("/auth/signup")]
pub async fn sign_up(
    state: web::Data<HttpState>,
    payload: web::Json<SignUpRequest>,
) -> ApiResult<HttpResponse> {
    let registration = Registration::try_from(payload.into_inner())?;
    let user = state.accounts.sign_up(registration).await?;
    Ok(ApiResponse::data(user)
        .with_message("Account created")
        .created())
}

/// Authenticate and establish a session cookie.
#[utoipa::path(
    post,
    path = "/api/auth/signin",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = ApiResponse<User>,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorEnvelope),
        (status = 401, description = "Invalid credentials", body = ErrorEnvelope),
        (status = 403, description = "Account blocked", body = ErrorEnvelope)
    ),
    tags = ["auth"],
    operation_id = "signIn",
    security([])
)]
#[post("/auth/signin")]
pub async fn sign_in(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignInRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        SignInCredentials::try_from_parts(&payload.email, &payload.password).map_err(invalid)?;
    let user = state.accounts.sign_in(&credentials).await?;
    session.sign_in(&user.id)?;
    Ok(ApiResponse::data(user).with_message("Signed in").ok())
}

/// Drop the session cookie.
#[utoipa::path(
    post,
    path = "/api/auth/signout",
    responses((status = 200, description = "Signed out")),
    tags = ["auth"],
    operation_id = "signOut"
)]
#[post("/auth/signout")]
pub async fn sign_out(session: SessionContext) -> HttpResponse {
    session.sign_out();
    ApiResponse::message("Signed out").ok()
}

/// The signed-in user.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = ApiResponse<User>),
        (status = 401, description = "No session", body = ErrorEnvelope),
        (status = 403, description = "Account blocked", body = ErrorEnvelope)
    ),
    tags = ["auth"],
    operation_id = "currentUser"
)]
#[get("/auth/me")]
pub async fn me(state: web::Data<HttpState>, session: SessionContext) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let user = state.accounts.current_user(&user_id).await?;
    Ok(ApiResponse::data(user).ok())
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
