//! HTTP mapping for domain errors.
//!
//! Keeps the domain error type transport-agnostic while letting Actix
//! handlers return it directly: each error becomes a consistent JSON body,
//! the matching status code, and a `trace-id` header for correlation.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};
use crate::middleware::TraceId;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Attach the request-scoped trace id when the error carries none.
fn with_current_trace(error: &Error) -> Error {
    if error.trace_id().is_some() {
        return error.clone();
    }
    match TraceId::current() {
        Some(id) => error.clone().with_trace_id(id.to_string()),
        None => error.clone(),
    }
}

/// Internal errors keep their trace id but never leak their message.
fn redact_if_internal(error: Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal("Internal server error");
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let error = with_current_trace(self);
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = error.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact_if_internal(error))
    }
}

/// Map JSON body rejections (malformed JSON, missing fields, unknown enum
/// values) into the standard error envelope instead of Actix's plain-text
/// default. Registered through [`actix_web::web::JsonConfig::error_handler`].
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid request body: {err}")).into()
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak framework details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    #[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
    #[case(Error::unauthorized("nope"), StatusCode::UNAUTHORIZED)]
    #[case(Error::forbidden("still no"), StatusCode::FORBIDDEN)]
    #[case(Error::not_found("gone"), StatusCode::NOT_FOUND)]
    #[case(Error::conflict("clash"), StatusCode::CONFLICT)]
    #[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
    #[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn status_codes_follow_error_codes(#[case] error: Error, #[case] expected: StatusCode) {
        assert_eq!(error.status_code(), expected);
    }

    #[actix_web::test]
    async fn internal_errors_are_redacted() {
        let response = Error::internal("connection string leaked").error_response();
        let body = to_bytes(response.into_body()).await.expect("body");
        let value: Value = serde_json::from_slice(&body).expect("error payload");
        assert_eq!(value["message"], "Internal server error");
        assert_eq!(value["code"], "internal_error");
    }

    #[actix_web::test]
    async fn client_errors_keep_their_message() {
        let response = Error::conflict("users are already connected").error_response();
        let body = to_bytes(response.into_body()).await.expect("body");
        let value: Value = serde_json::from_slice(&body).expect("error payload");
        assert_eq!(value["message"], "users are already connected");
    }

    #[actix_web::test]
    async fn json_rejections_use_the_error_envelope() {
        let req = actix_web::test::TestRequest::default().to_http_request();
        let response = json_error_handler(JsonPayloadError::ContentType, &req).error_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body()).await.expect("body");
        let value: Value = serde_json::from_slice(&body).expect("error payload");
        assert_eq!(value["code"], "invalid_request");
    }

    #[actix_web::test]
    async fn explicit_trace_id_reaches_the_header() {
        let response = Error::not_found("gone")
            .with_trace_id("abc-123")
            .error_response();
        let header = response
            .headers()
            .get(TRACE_ID_HEADER)
            .expect("trace id header");
        assert_eq!(header, "abc-123");
    }
}
