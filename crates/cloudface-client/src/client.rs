//! Face API HTTP client core.
//!
//! One `reqwest::Client` serves both the face and emotion endpoints:
//! - HTTP tuning (pooling, timeouts) in one place
//! - Subscription key header attached per endpoint
//! - Observability (tracing spans, metrics) around every request
//!
//! The operations live in `faces`, `groups` and `persons`; this module
//! holds the shared plumbing they build on.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info_span, Instrument};

use crate::config::FaceApiConfig;
use crate::error::{parse_retry_after, ApiError, ApiResult};
use crate::metrics::record_request;
use crate::retry;

/// Auth header expected by both endpoints.
pub(crate) const SUBSCRIPTION_KEY_HEADER: &str = "ocp-apim-subscription-key";

pub(crate) const OCTET_STREAM: &str = "application/octet-stream";

/// Face API client. Cheap to clone; clones share the HTTP pool.
#[derive(Clone, Debug)]
pub struct FaceClient {
    http: Client,
    config: Arc<FaceApiConfig>,
}

impl FaceClient {
    /// Create a new client from a config.
    pub fn new(config: FaceApiConfig) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(10)
            .user_agent(concat!("cloudface/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Network)?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> ApiResult<Self> {
        Self::new(FaceApiConfig::from_env()?)
    }

    /// The active configuration.
    pub fn config(&self) -> &FaceApiConfig {
        &self.config
    }

    /// Execute with retry, using the configured policy.
    pub async fn with_retry<T, F, Fut>(&self, operation: &str, op: F) -> ApiResult<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = ApiResult<T>>,
    {
        retry::with_retry(&self.config.retry, operation, op).await
    }

    // =========================================================================
    // URL and Request Builders
    // =========================================================================

    /// Build a URL under the face endpoint.
    pub(crate) fn face_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.face_endpoint.as_str().trim_end_matches('/'),
            path
        )
    }

    /// Build a URL under the emotion endpoint.
    pub(crate) fn emotion_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.emotion_endpoint.as_str().trim_end_matches('/'),
            path
        )
    }

    /// GET against the face endpoint.
    pub(crate) fn get(&self, url: &str) -> RequestBuilder {
        self.http
            .get(url)
            .header(SUBSCRIPTION_KEY_HEADER, &self.config.face_key)
    }

    /// POST against the face endpoint.
    pub(crate) fn post(&self, url: &str) -> RequestBuilder {
        self.http
            .post(url)
            .header(SUBSCRIPTION_KEY_HEADER, &self.config.face_key)
    }

    /// PUT against the face endpoint.
    pub(crate) fn put(&self, url: &str) -> RequestBuilder {
        self.http
            .put(url)
            .header(SUBSCRIPTION_KEY_HEADER, &self.config.face_key)
    }

    /// PATCH against the face endpoint.
    pub(crate) fn patch(&self, url: &str) -> RequestBuilder {
        self.http
            .patch(url)
            .header(SUBSCRIPTION_KEY_HEADER, &self.config.face_key)
    }

    /// DELETE against the face endpoint.
    pub(crate) fn delete(&self, url: &str) -> RequestBuilder {
        self.http
            .delete(url)
            .header(SUBSCRIPTION_KEY_HEADER, &self.config.face_key)
    }

    /// POST against the emotion endpoint, with its own key.
    pub(crate) fn post_emotion(&self, url: &str) -> RequestBuilder {
        self.http
            .post(url)
            .header(SUBSCRIPTION_KEY_HEADER, &self.config.emotion_key)
    }

    /// Attach raw image bytes as an octet-stream body.
    pub(crate) fn image_body(request: RequestBuilder, image: &[u8]) -> RequestBuilder {
        request
            .header(CONTENT_TYPE, OCTET_STREAM)
            .body(image.to_vec())
    }

    // =========================================================================
    // Response Handling
    // =========================================================================

    /// Read a success response as JSON; classify everything else.
    pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            ApiError::invalid_response(format!(
                "{} (body prefix: {})",
                e,
                body.chars().take(200).collect::<String>()
            ))
        })
    }

    /// Expect an empty-ish success response (200/202/204).
    pub(crate) async fn read_empty(response: Response) -> ApiResult<()> {
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        Ok(())
    }

    /// Turn a non-success response into the error taxonomy.
    pub(crate) async fn error_from_response(response: Response) -> ApiError {
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(parse_retry_after);
        let body = response.text().await.unwrap_or_default();

        debug!(
            status,
            url = %url,
            body = %body.chars().take(200).collect::<String>(),
            "Face API error response"
        );

        ApiError::classify(status, &url, retry_after, &body)
    }

    /// Execute a request future with tracing and metrics.
    pub(crate) async fn execute<T, F>(&self, operation: &str, url: &str, fut: F) -> ApiResult<T>
    where
        F: std::future::Future<Output = ApiResult<T>>,
    {
        let span = info_span!("face_api_request", operation = %operation, url = %url);

        let start = Instant::now();
        let result = fut.instrument(span).await;
        let latency_ms = start.elapsed().as_millis() as f64;

        let status = match &result {
            Ok(_) => 200,
            Err(e) => e.http_status().unwrap_or(500),
        };
        record_request(operation, status, latency_ms);

        result
    }
}
