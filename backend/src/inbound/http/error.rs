//! HTTP adapter mapping for domain errors.
//!
//! Validation failures render as the bare issue array. Every other error
//! renders as `{"error": message}`, with internal errors redacted.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};
use utoipa::ToSchema;

pub use crate::domain::ApiResult;
use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Message returned when a request body is not parseable JSON.
pub const INVALID_JSON_MESSAGE: &str = "request body must be valid JSON";

const REDACTED_MESSAGE: &str = "Internal server error";

/// Non-validation error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "Product already exists.")]
    pub error: String,
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        // Duplicates are reported as 400 to match existing clients.
        ErrorCode::InvalidRequest | ErrorCode::ValidationFailed | ErrorCode::Conflict => {
            StatusCode::BAD_REQUEST
        }
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn client_message(error: &Error) -> &str {
    if matches!(error.code(), ErrorCode::InternalError) {
        REDACTED_MESSAGE
    } else {
        error.message()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        match self.code() {
            ErrorCode::InternalError => {
                error!(trace_id = ?self.trace_id(), message = self.message(), "request failed");
            }
            ErrorCode::ServiceUnavailable => {
                warn!(trace_id = ?self.trace_id(), message = self.message(), "dependency unavailable");
            }
            _ => {}
        }

        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        match self.issues() {
            Some(issues) => builder.json(issues),
            None => builder.json(ErrorBody {
                error: client_message(self).to_owned(),
            }),
        }
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(REDACTED_MESSAGE)
    }
}

/// `JsonConfig` error handler turning extractor failures into domain errors.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected request body");
    let message = match err {
        JsonPayloadError::ContentType => "request body must be sent as application/json",
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            "request body is too large"
        }
        _ => INVALID_JSON_MESSAGE,
    };
    Error::invalid_request(message).into()
}

/// `QueryConfig` error handler for malformed query strings.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected query string");
    Error::invalid_request(format!("invalid query string: {err}")).into()
}

#[cfg(test)]
mod tests;
