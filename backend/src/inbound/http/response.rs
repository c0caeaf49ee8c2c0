//! Success envelope shared by every REST endpoint.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;
use utoipa::ToSchema;

/// `{ "success": true, "message"?, "data"? }`.
///
/// # Examples
/// ```
/// use teachteam::inbound::http::response::ApiResponse;
///
/// let body = serde_json::to_value(ApiResponse::data(3).with_message("counted")).unwrap();
/// assert_eq!(body, serde_json::json!({ "success": true, "message": "counted", "data": 3 }));
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Always `true`.
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap a payload.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// Attach a human-readable message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// `200 OK` response carrying the envelope.
    pub fn ok(self) -> HttpResponse {
        self.respond(StatusCode::OK)
    }

    /// `201 Created` response carrying the envelope.
    pub fn created(self) -> HttpResponse {
        self.respond(StatusCode::CREATED)
    }

    fn respond(self, status: StatusCode) -> HttpResponse {
        HttpResponse::build(status).json(self)
    }
}

impl ApiResponse<()> {
    /// Envelope with a message and no payload.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}
