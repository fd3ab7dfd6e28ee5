//! Face API error types.
//!
//! The service reports failures in two JSON body shapes:
//! - `{"error": {"code": ..., "message": ...}}`
//! - `{"statusCode": ..., "message": ...}`
//!
//! `classify` extracts whichever is present, then lets the HTTP status
//! pick the variant so flow-relevant statuses (404, 409, 429, 5xx) stay
//! typed while the service's own wording is preserved in the message.

use thiserror::Error;

/// Result type for Face API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors that can occur during Face API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unauthorized: subscription key rejected")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Rate limited, retry after {0}ms")]
    RateLimited(u64),

    #[error("Server error {0}: {1}")]
    ServerError(u16, String),

    #[error("{}", service_display(.code, .message))]
    Service { code: String, message: String },

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::RequestFailed(msg.into())
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Map a bare HTTP status to a variant, without body inspection.
    pub fn from_http_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => Self::Unauthorized,
            404 => Self::NotFound(message),
            409 => Self::AlreadyExists(message),
            429 => Self::RateLimited(1000),
            s if s >= 500 => Self::ServerError(s, message),
            _ => Self::RequestFailed(message),
        }
    }

    /// Classify a non-success response from its status, URL, parsed
    /// `Retry-After` value and body text.
    pub fn classify(status: u16, url: &str, retry_after_ms: Option<u64>, body: &str) -> Self {
        let service = service_error_parts(body);

        match status {
            401 | 403 => Self::Unauthorized,
            404 => Self::NotFound(
                service
                    .map(|(code, message)| service_display(&code, &message))
                    .unwrap_or_else(|| url.to_string()),
            ),
            409 => Self::AlreadyExists(
                service
                    .map(|(code, message)| service_display(&code, &message))
                    .unwrap_or_else(|| url.to_string()),
            ),
            429 => Self::RateLimited(retry_after_ms.unwrap_or(1000)),
            s if s >= 500 => Self::ServerError(
                s,
                service
                    .map(|(code, message)| service_display(&code, &message))
                    .unwrap_or_else(|| body_prefix(body)),
            ),
            s => match service {
                Some((code, message)) => Self::Service { code, message },
                None => Self::RequestFailed(format!(
                    "Error {}: {}; Url: {}",
                    s,
                    status_reason(s),
                    url
                )),
            },
        }
    }

    /// Check if error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApiError::Network(_) | ApiError::RateLimited(_) | ApiError::ServerError(_, _)
        )
    }

    /// HTTP status associated with this error, if any.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::NotFound(_) => Some(404),
            ApiError::AlreadyExists(_) => Some(409),
            ApiError::RateLimited(_) => Some(429),
            ApiError::ServerError(status, _) => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Server-requested retry delay in milliseconds, for 429s.
    pub fn retry_after_ms(&self) -> Option<u64> {
        match self {
            ApiError::RateLimited(ms) => Some(*ms),
            _ => None,
        }
    }
}

/// Extract `(code, message)` from either service error body shape.
///
/// Shape 1 wins whenever its `code` key is present, even when empty;
/// shape 2's `statusCode` may be a string or a number on the wire.
fn service_error_parts(body: &str) -> Option<(String, String)> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;

    if let Some(detail) = value.get("error") {
        if let Some(code) = detail.get("code").and_then(|c| c.as_str()) {
            let message = detail
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or_default();
            return Some((code.to_string(), message.to_string()));
        }
    }

    if let Some(code) = value.get("statusCode") {
        let code = match code {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let message = value
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or_default();
        return Some((code, message.to_string()));
    }

    None
}

/// `"{code} - {message}"`, with an empty or `Unspecified` code shown
/// as the bare message.
fn service_display(code: &str, message: &str) -> String {
    if code.is_empty() || code == "Unspecified" {
        message.to_string()
    } else {
        format!("{} - {}", code, message)
    }
}

fn status_reason(status: u16) -> &'static str {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown")
}

fn body_prefix(body: &str) -> String {
    if body.is_empty() {
        return "empty body".to_string();
    }
    body.chars().take(200).collect()
}

/// Parse a `Retry-After` header value into milliseconds.
///
/// Small values are delay-seconds per the HTTP spec; values of 1000 or
/// more are taken as milliseconds. Date forms are ignored.
pub(crate) fn parse_retry_after(value: &str) -> Option<u64> {
    let n: u64 = value.trim().parse().ok()?;
    if n < 1000 {
        Some(n * 1000)
    } else {
        Some(n)
    }
}
