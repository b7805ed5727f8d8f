//! Mapping from domain errors to HTTP responses.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use crate::domain::{Error, ErrorCode};

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self.code {
            ErrorCode::InvalidRequest
            | ErrorCode::DuplicateEmail
            | ErrorCode::WrongCurrentPassword => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthenticated
            | ErrorCode::InvalidCredentials
            | ErrorCode::InvalidApiKey => StatusCode::UNAUTHORIZED,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut payload = self.clone();
        if payload.code == ErrorCode::InternalError {
            // Whatever went wrong stays in the logs; the trace id is enough
            // for the caller to report.
            payload.message = "Internal server error".to_owned();
            payload.details = None;
        }
        HttpResponse::build(self.status_code()).json(payload)
    }
}
