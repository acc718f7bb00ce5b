//! Shared-secret authentication middleware.
//!
//! Requests authenticate with either an `X-API-Key` header or an
//! `Authorization: Bearer <token>` header, each checked against its own
//! statically configured secret. When no secret is configured at all the
//! middleware lets everything through.

use axum::{
    Json,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::config::AuthConfig;
use crate::error::ErrorResponse;
use crate::state::AppState;

/// Name of the API key header.
const API_KEY_HEADER: &str = "x-api-key";

/// Authentication middleware function.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if authorized(&state.config.auth, request.headers()) {
        next.run(request).await
    } else {
        unauthorized_response("Invalid or missing credentials")
    }
}

/// Checks a request's headers against the configured secrets.
fn authorized(auth: &AuthConfig, headers: &HeaderMap) -> bool {
    if auth.is_open() {
        return true;
    }

    if let Some(expected) = &auth.api_key {
        let presented = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok());
        if presented == Some(expected.as_str()) {
            return true;
        }
    }

    if let Some(expected) = &auth.token {
        let presented = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(extract_bearer_token);
        if presented == Some(expected.as_str()) {
            return true;
        }
    }

    false
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header.strip_prefix("Bearer ")
}

/// Creates an unauthorized response.
fn unauthorized_response(message: &str) -> Response {
    let body = ErrorResponse {
        status: "error",
        code: "UNAUTHORIZED",
        message: message.to_string(),
    };

    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(
                axum::http::HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[test]
    fn test_open_config_accepts_everything() {
        let auth = AuthConfig::default();
        assert!(authorized(&auth, &HeaderMap::new()));
    }

    #[test]
    fn test_api_key_match() {
        let auth = AuthConfig {
            api_key: Some("secret".to_string()),
            token: None,
        };

        assert!(authorized(&auth, &headers(&[("x-api-key", "secret")])));
        assert!(!authorized(&auth, &headers(&[("x-api-key", "wrong")])));
        assert!(!authorized(&auth, &HeaderMap::new()));
    }

    #[test]
    fn test_bearer_token_match() {
        let auth = AuthConfig {
            api_key: None,
            token: Some("tok".to_string()),
        };

        assert!(authorized(
            &auth,
            &headers(&[("authorization", "Bearer tok")])
        ));
        assert!(!authorized(
            &auth,
            &headers(&[("authorization", "Bearer nope")])
        ));
        // A bare token without the Bearer prefix is not accepted.
        assert!(!authorized(&auth, &headers(&[("authorization", "tok")])));
    }

    #[test]
    fn test_either_secret_suffices() {
        let auth = AuthConfig {
            api_key: Some("key".to_string()),
            token: Some("tok".to_string()),
        };

        assert!(authorized(&auth, &headers(&[("x-api-key", "key")])));
        assert!(authorized(
            &auth,
            &headers(&[("authorization", "Bearer tok")])
        ));
        assert!(!authorized(&auth, &headers(&[("x-api-key", "tok")])));
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(extract_bearer_token("bearer abc"), None);
        assert_eq!(extract_bearer_token("abc"), None);
    }
}
