use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use service::pagination::Meta;
use service::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

/// Body shared by every endpoint. `status` always equals the HTTP status code.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

/// Successful response carrying `data` and, for lists, `meta`.
pub struct ApiResponse<T: Serialize>(pub Envelope<T>);

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self(Envelope { status: StatusCode::OK.as_u16(), data: Some(data), error: None, meta: None })
    }

    pub fn page(data: T, meta: Meta) -> Self {
        Self(Envelope { status: StatusCode::OK.as_u16(), data: Some(data), error: None, meta: Some(meta) })
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status).unwrap_or(StatusCode::OK);
        (status, Json(self.0)).into_response()
    }
}

/// Error response in the shared envelope.
#[derive(Debug)]
pub struct JsonApiError {
    status: StatusCode,
    message: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn status(&self) -> StatusCode { self.status }

    pub fn message(&self) -> &str { &self.message }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body: Envelope<()> = Envelope { status: self.status.as_u16(), data: None, error: Some(self.message), meta: None };
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        if !e.is_client_error() {
            error!(error = %e, code = e.code(), "store_error");
            return Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error");
        }
        let status = match &e {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        };
        match e {
            ServiceError::Validation(msg) | ServiceError::NotFound(msg) | ServiceError::InvalidPagination(msg) => Self::new(status, msg),
            other => Self::new(status, other.to_string()),
        }
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(reason = %rejection.body_text(), "invalid_request_body");
        Self::new(StatusCode::BAD_REQUEST, "invalid request format")
    }
}

impl From<QueryRejection> for JsonApiError {
    fn from(rejection: QueryRejection) -> Self {
        warn!(reason = %rejection.body_text(), "invalid_query_string");
        Self::new(StatusCode::BAD_REQUEST, "invalid query parameters")
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::Validation("name is required".into()), StatusCode::BAD_REQUEST, "name is required"),
            (ServiceError::not_found("user"), StatusCode::NOT_FOUND, "user not found"),
            (ServiceError::reference("course"), StatusCode::BAD_REQUEST, "course id doesn't exist"),
            (ServiceError::InvalidPagination("limit must be positive, got 0".into()), StatusCode::BAD_REQUEST, "limit must be positive, got 0"),
            (ServiceError::Store("relation \"users\" does not exist".into()), StatusCode::INTERNAL_SERVER_ERROR, "internal server error"),
        ];
        for (err, status, message) in cases {
            let api = JsonApiError::from(err);
            assert_eq!(api.status(), status);
            assert_eq!(api.message(), message);
        }
    }

    #[test]
    fn envelope_omits_absent_parts() {
        let body: Envelope<()> = Envelope { status: 404, data: None, error: Some("user not found".into()), meta: None };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"status": 404, "error": "user not found"}));
    }
}
