//! Gatehouse error types.
//!
//! Every error maps to a fixed JSON body via the `IntoResponse` impl. The
//! body shape `{"statusCode": ..., "message": ...}` is part of the wire
//! contract existing consumers parse. Underlying causes (provider outages,
//! parse failures, panics) are logged server-side and never leak to the
//! client.

use crate::models::ApiErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Gatehouse error type.
///
/// Maps to HTTP status codes:
/// - Unauthorized: 401 (the bearer challenge)
/// - Forbidden: 403
/// - BadRequest: 400
/// - Internal: 500
#[derive(Debug, Error)]
pub enum GateError {
    /// No valid credential was presented.
    #[error("Unauthorized - Invalid Access Token")]
    Unauthorized,

    /// Authenticated, but not allowed to reach this resource.
    #[error("Forbidden - You do not have access to this resource")]
    Forbidden,

    /// Malformed request input.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Anything unexpected; answered with the generic 500 body.
    #[error("Unhandled exception")]
    Internal,
}

impl GateError {
    /// HTTP status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            GateError::Unauthorized => StatusCode::UNAUTHORIZED,
            GateError::Forbidden => StatusCode::FORBIDDEN,
            GateError::BadRequest(_) => StatusCode::BAD_REQUEST,
            GateError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Fixed JSON body for this error.
    ///
    /// The forbidden body carries `statusCode: 401` even though the HTTP
    /// status is 403. Existing consumers key off the field value, so it
    /// stays wire-compatible rather than corrected.
    pub fn body(&self) -> ApiErrorResponse {
        match self {
            GateError::Unauthorized => ApiErrorResponse {
                status_code: 401,
                message: "Unauthorized - Invalid Access Token".to_string(),
            },
            GateError::Forbidden => ApiErrorResponse {
                status_code: 401,
                message: "Forbidden - You do not have access to this resource".to_string(),
            },
            GateError::BadRequest(message) => ApiErrorResponse {
                status_code: 400,
                message: message.clone(),
            },
            GateError::Internal => ApiErrorResponse {
                status_code: 500,
                message: "Unhandled exception".to_string(),
            },
        }
    }
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = self.body();

        let mut response = (status, Json(body)).into_response();

        // Add WWW-Authenticate header for 401 responses
        if status == StatusCode::UNAUTHORIZED {
            if let Ok(header_value) = "Bearer realm=\"gatehouse\", error=\"invalid_token\"".parse()
            {
                response
                    .headers_mut()
                    .insert("WWW-Authenticate", header_value);
            }
        }

        response
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http_body_util::BodyExt;

    // Helper function to read the response body as JSON
    async fn read_body_json(body: Body) -> serde_json::Value {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_display_unauthorized() {
        let error = GateError::Unauthorized;
        assert_eq!(format!("{}", error), "Unauthorized - Invalid Access Token");
    }

    #[test]
    fn test_display_forbidden() {
        let error = GateError::Forbidden;
        assert_eq!(
            format!("{}", error),
            "Forbidden - You do not have access to this resource"
        );
    }

    #[test]
    fn test_display_bad_request() {
        let error = GateError::BadRequest("Message was missing".to_string());
        assert_eq!(format!("{}", error), "Bad request: Message was missing");
    }

    #[test]
    fn test_display_internal() {
        let error = GateError::Internal;
        assert_eq!(format!("{}", error), "Unhandled exception");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(GateError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(GateError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            GateError::BadRequest("x".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GateError::Internal.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_into_response_unauthorized() {
        let response = GateError::Unauthorized.into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // Check WWW-Authenticate header
        let www_auth = response.headers().get("WWW-Authenticate");
        assert!(www_auth.is_some());
        let www_auth_str = www_auth.unwrap().to_str().unwrap();
        assert!(www_auth_str.contains("Bearer realm=\"gatehouse\""));

        let body_json = read_body_json(response.into_body()).await;
        assert_eq!(body_json["statusCode"], 401);
        assert_eq!(body_json["message"], "Unauthorized - Invalid Access Token");
    }

    #[tokio::test]
    async fn test_forbidden_body_keeps_legacy_status_code() {
        // HTTP status is 403 while the body field stays 401; deployed
        // consumers key off the field value.
        let response = GateError::Forbidden.into_response();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body_json = read_body_json(response.into_body()).await;
        assert_eq!(body_json["statusCode"], 401);
        assert_eq!(
            body_json["message"],
            "Forbidden - You do not have access to this resource"
        );
    }

    #[tokio::test]
    async fn test_into_response_bad_request() {
        let response = GateError::BadRequest("Message was missing".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body_json = read_body_json(response.into_body()).await;
        assert_eq!(body_json["statusCode"], 400);
        assert_eq!(body_json["message"], "Message was missing");
    }

    #[tokio::test]
    async fn test_into_response_internal() {
        let response = GateError::Internal.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body_json = read_body_json(response.into_body()).await;
        assert_eq!(body_json["statusCode"], 500);
        assert_eq!(body_json["message"], "Unhandled exception");
    }

    #[tokio::test]
    async fn test_non_401_responses_have_no_challenge_header() {
        let response = GateError::Forbidden.into_response();
        assert!(response.headers().get("WWW-Authenticate").is_none());
    }
}
