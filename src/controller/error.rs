use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};

use thiserror::Error;

use crate::error::Error;

pub type RestResult<T> = Result<T, RestError>;

/// Errors surfaced to HTTP clients.
/// Bodies only ever carry the status phrase, causes stay in the logs.
#[derive(Debug, Error)]
pub enum RestError {
    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found")]
    NotFound,

    #[error("Internal Server Error: {0}")]
    InternalError(String),
}

impl From<Error> for RestError {
    fn from(e: Error) -> Self {
        match e {
            Error::ValidationError(msg) => Self::BadRequest(msg),
            Error::RecordNotFound => Self::NotFound,
            Error::DatabaseError(e) => {
                tracing::error!(error.cause_chain = ?e, "Database operation failed");
                Self::InternalError("Database error".into())
            }
            Error::SerializationError(e) => {
                tracing::error!(error.cause_chain = ?e, "Failed to serialize response body");
                Self::InternalError("Serialization error".into())
            }
        }
    }
}

impl ResponseError for RestError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status)
            .content_type(ContentType::plaintext())
            .body(status.canonical_reason().unwrap_or_default())
    }
}

/// Route malformed JSON bodies through `RestError`
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!("Rejected request body: {}", err);
    RestError::BadRequest(err.to_string()).into()
}

/// Route malformed query strings through `RestError`
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!("Rejected query string: {}", err);
    RestError::BadRequest(err.to_string()).into()
}
