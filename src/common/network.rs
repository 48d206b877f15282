use std::env;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;

use crate::error::GistError;
use crate::util::load_config;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const PROBE_TIMEOUT_SECS: u64 = 10;

const DEFAULT_API_BASE: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("gist-manager/", env!("CARGO_PKG_VERSION"));
const ACCEPT: &str = "application/vnd.github+json";

pub fn default_client(timeout_secs: u64) -> Result<Client, GistError> {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(reqwest::header::ACCEPT, ACCEPT.parse().expect("static header"));
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .build()
        .map_err(GistError::Network)
}

/// API base resolution: GITHUB_API_URL env, then stored config, then the
/// public endpoint.
pub fn api_base() -> String {
    env::var("GITHUB_API_URL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .or_else(|| load_config().ok().and_then(|c| c.api_url))
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Map a non-success API response to a typed failure.
pub fn api_error(id: Option<&str>, status: StatusCode, body: &str) -> GistError {
    let message = extract_message(body);
    match status.as_u16() {
        401 => GistError::AuthFailed,
        403 if message.to_lowercase().contains("rate limit") => GistError::RateLimited,
        403 => GistError::Forbidden(message),
        404 => GistError::NotFound(id.unwrap_or("gist").to_string()),
        422 => GistError::ValidationFailed(message),
        code => GistError::Api {
            status: code,
            message,
        },
    }
}

/// Pull the `message` field out of an API error body, falling back to the
/// raw text.
fn extract_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "unknown error".to_string()
            } else {
                trimmed.to_string()
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unauthorized_maps_to_auth_failed() {
        let err = api_error(None, StatusCode::UNAUTHORIZED, r#"{"message":"Bad credentials"}"#);
        assert!(matches!(err, GistError::AuthFailed));
    }

    #[test]
    fn forbidden_with_rate_limit_message_maps_to_rate_limited() {
        let err = api_error(
            None,
            StatusCode::FORBIDDEN,
            r#"{"message":"API rate limit exceeded for user"}"#,
        );
        assert!(matches!(err, GistError::RateLimited));
    }

    #[test]
    fn forbidden_without_rate_limit_message_stays_forbidden() {
        let err = api_error(
            None,
            StatusCode::FORBIDDEN,
            r#"{"message":"Resource protected by organization SAML"}"#,
        );
        match err {
            GistError::Forbidden(msg) => {
                assert_eq!(msg, "Resource protected by organization SAML");
            }
            other => panic!("expected Forbidden, got {other:?}"),
        }
    }

    #[test]
    fn not_found_carries_the_gist_id() {
        let err = api_error(
            Some("aa5a315d61ae9438b18d"),
            StatusCode::NOT_FOUND,
            r#"{"message":"Not Found"}"#,
        );
        match err {
            GistError::NotFound(id) => assert_eq!(id, "aa5a315d61ae9438b18d"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn unprocessable_maps_to_validation_failed() {
        let err = api_error(
            None,
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"message":"Validation Failed"}"#,
        );
        assert!(matches!(err, GistError::ValidationFailed(_)));
    }

    #[test]
    fn unexpected_status_keeps_code_and_message() {
        let err = api_error(None, StatusCode::INTERNAL_SERVER_ERROR, "boom");
        match err {
            GistError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[test]
    fn empty_body_gets_a_placeholder_message() {
        let err = api_error(None, StatusCode::BAD_GATEWAY, "");
        match err {
            GistError::Api { message, .. } => assert_eq!(message, "unknown error"),
            other => panic!("expected Api, got {other:?}"),
        }
    }
}
