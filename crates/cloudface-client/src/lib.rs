//! REST client for the CloudFace face and emotion endpoints.
//!
//! This crate provides:
//! - `FaceClient`: detect, emotion recognition and identify calls
//! - Person group lifecycle including training and training-status polling
//! - Person CRUD and persisted-face management
//! - Error taxonomy over the service's two error body shapes
//! - Retry with exponential backoff and jitter

pub mod client;
pub mod config;
pub mod error;
pub mod faces;
pub mod groups;
pub mod metrics;
pub mod persons;
pub mod retry;

pub use client::FaceClient;
pub use config::FaceApiConfig;
pub use error::{ApiError, ApiResult};
pub use faces::{DetectOptions, FaceAttributeKind};
pub use groups::{TrainingWait, TrainingWaitOptions};
pub use retry::{with_retry, RetryConfig};
