//! Face API client configuration.

use std::time::Duration;

use url::Url;

use crate::error::{ApiError, ApiResult};
use crate::retry::RetryConfig;

/// Default face endpoint.
pub const DEFAULT_FACE_ENDPOINT: &str = "https://api.projectoxford.ai/face/v1.0";

/// Default emotion endpoint.
pub const DEFAULT_EMOTION_ENDPOINT: &str = "https://api.projectoxford.ai/emotion/v1.0";

/// Face API client configuration.
#[derive(Debug, Clone)]
pub struct FaceApiConfig {
    /// Subscription key for the face endpoint
    pub face_key: String,
    /// Base URL of the face endpoint
    pub face_endpoint: Url,
    /// Subscription key for the emotion endpoint
    pub emotion_key: String,
    /// Base URL of the emotion endpoint
    pub emotion_endpoint: Url,
    /// Request timeout
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
    /// Retry configuration
    pub retry: RetryConfig,
}

impl FaceApiConfig {
    /// Create a config with the default endpoints. The same key is
    /// used for both face and emotion calls.
    pub fn new(key: impl Into<String>) -> ApiResult<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(ApiError::config_error("subscription key cannot be empty"));
        }

        Ok(Self {
            face_key: key.clone(),
            face_endpoint: parse_endpoint(DEFAULT_FACE_ENDPOINT)?,
            emotion_key: key,
            emotion_endpoint: parse_endpoint(DEFAULT_EMOTION_ENDPOINT)?,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            retry: RetryConfig::default(),
        })
    }

    /// Create config from environment variables.
    ///
    /// `FACE_API_KEY` is required. `EMOTION_API_KEY` falls back to the
    /// face key when unset; endpoints and timeouts have defaults.
    pub fn from_env() -> ApiResult<Self> {
        let face_key = std::env::var("FACE_API_KEY")
            .map_err(|_| ApiError::config_error("FACE_API_KEY must be set"))?;
        if face_key.is_empty() {
            return Err(ApiError::config_error("FACE_API_KEY cannot be empty"));
        }

        let face_endpoint = std::env::var("FACE_API_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_FACE_ENDPOINT.to_string());
        let emotion_endpoint = std::env::var("EMOTION_API_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_EMOTION_ENDPOINT.to_string());
        let emotion_key = std::env::var("EMOTION_API_KEY").unwrap_or_else(|_| face_key.clone());

        let timeout_secs: u64 = std::env::var("FACE_API_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);
        let connect_timeout_secs: u64 = std::env::var("FACE_API_CONNECT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        Ok(Self {
            face_key,
            face_endpoint: parse_endpoint(&face_endpoint)?,
            emotion_key,
            emotion_endpoint: parse_endpoint(&emotion_endpoint)?,
            timeout: Duration::from_secs(timeout_secs),
            connect_timeout: Duration::from_secs(connect_timeout_secs),
            retry: RetryConfig::from_env(),
        })
    }

    /// Override the face endpoint.
    pub fn with_face_endpoint(mut self, endpoint: impl AsRef<str>) -> ApiResult<Self> {
        self.face_endpoint = parse_endpoint(endpoint.as_ref())?;
        Ok(self)
    }

    /// Override the emotion endpoint.
    pub fn with_emotion_endpoint(mut self, endpoint: impl AsRef<str>) -> ApiResult<Self> {
        self.emotion_endpoint = parse_endpoint(endpoint.as_ref())?;
        Ok(self)
    }

    /// Use a separate subscription key for emotion calls.
    pub fn with_emotion_key(mut self, key: impl Into<String>) -> Self {
        self.emotion_key = key.into();
        self
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the retry configuration.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}

/// Parse and normalize an endpoint URL (trailing slashes stripped).
fn parse_endpoint(raw: &str) -> ApiResult<Url> {
    let trimmed = raw.trim_end_matches('/');
    let url = Url::parse(trimmed)
        .map_err(|e| ApiError::config_error(format!("invalid endpoint '{}': {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(ApiError::config_error(format!(
            "invalid endpoint '{}': not a base URL",
            raw
        )));
    }
    Ok(url)
}
