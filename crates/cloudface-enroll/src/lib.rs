//! Person-group enrollment and face-login orchestration.
//!
//! This crate provides:
//! - `UserManager`: get-or-create group lifecycle, user enrollment and
//!   the identify ("login by face") flow
//! - Detection enriched with emotion scores for demo-style callers
//! - Background variants of the slow flows via `cloudface-task`

pub mod config;
pub mod detect;
pub mod error;
pub mod manager;
pub mod outcome;

pub use config::EnrollConfig;
pub use detect::detect_with_emotions;
pub use error::{EnrollError, EnrollResult};
pub use manager::UserManager;
pub use outcome::{IdentifyOutcome, PersonMatch, RecognizedFace, TrainingDisposition};
