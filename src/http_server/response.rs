//! Response envelopes and request helpers shared by the route modules.
//!
//! Success bodies are `{"data": ...}`; failures are `{"error": ..., "code": ...}`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::access::Access;
use crate::observability::{log_event, Event};
use crate::service::ServiceError;

use super::SharedJournal;

#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub type ApiResult<T> = Result<Json<DataResponse<T>>, ApiError>;

pub fn data<T>(data: T) -> Json<DataResponse<T>> {
    Json(DataResponse { data })
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
            code: status.as_u16(),
        }),
    )
}

pub fn validation_error(message: impl Into<String>) -> ApiError {
    error_response(StatusCode::UNPROCESSABLE_ENTITY, message)
}

/// Map a service error onto its status code
pub fn service_error(err: ServiceError) -> ApiError {
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        log_event(Event::StorageFailure, &[("error", &err.to_string())]);
    }
    error_response(status, err.to_string())
}

/// Parse a path id. A malformed id is a validation failure, not a 404.
pub fn parse_id(raw: &str, what: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| validation_error(format!("Invalid {} format", what)))
}

/// Unwrap a JSON body. A malformed body is a validation failure.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| validation_error(rejection.body_text()))
}

/// Pass `input` through when it is valid. Invalid input is reported only
/// after the gate admits the caller; a gate refusal takes precedence.
pub fn gated<T>(
    journal: &SharedJournal,
    board_id: Uuid,
    access: Access,
    secret: Option<&str>,
    input: Result<T, ApiError>,
) -> Result<T, ApiError> {
    input.or_else(|invalid| {
        journal.admit(board_id, access, secret).map_err(service_error)?;
        Err(invalid)
    })
}

/// Capability secrets presented as query parameters
#[derive(Debug, Default, Deserialize)]
pub struct TokenQuery {
    #[serde(default)]
    pub edit_token: Option<String>,
    #[serde(default)]
    pub public_token: Option<String>,
}

impl TokenQuery {
    /// The presented secret. `edit_token` wins when both are given.
    pub fn secret(&self) -> Option<&str> {
        fn non_empty(value: &Option<String>) -> Option<&str> {
            value.as_deref().filter(|v| !v.trim().is_empty())
        }
        non_empty(&self.edit_token).or_else(|| non_empty(&self.public_token))
    }
}
