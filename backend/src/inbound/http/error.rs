//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error type HTTP-agnostic while giving every failure the
//! same JSON body: `{"errorMessage": "..."}`.

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode};
use crate::middleware::TraceId;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Human-readable failure description.
    #[schema(example = "User with id = 7 not found")]
    pub error_message: String,
}

impl From<&Error> for ErrorResponse {
    fn from(error: &Error) -> Self {
        Self {
            error_message: error.message().to_owned(),
        }
    }
}

/// Status dispatch table.
///
/// Duplicate users surface as a generic server error rather than 409.
fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::AlreadyExists | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            let trace_id = TraceId::current().map(|id| id.to_string());
            error!(code = %self.code(), trace_id = trace_id.as_deref(), "{}", self.message());
        }
        HttpResponse::build(status).json(ErrorResponse::from(self))
    }
}

/// `web::JsonConfig` error handler.
///
/// Unreadable bodies are not validation failures: only a missing name is a
/// client error, so everything the extractor rejects becomes a 500.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!(error = %err, "rejected request body");
    Error::internal(err.to_string()).into()
}

/// `web::PathConfig` error handler: unparsable or out-of-range ids become 500s.
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    warn!(error = %err, "rejected path parameters");
    Error::internal(err.to_string()).into()
}

#[cfg(test)]
mod tests;
