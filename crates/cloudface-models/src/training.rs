//! Person group training status.
//!
//! Training runs asynchronously server-side after a train request;
//! callers poll the training endpoint until a terminal state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// State of the server-side training job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TrainingState {
    /// Training has never been requested for this group
    #[default]
    NotStarted,
    /// Training is in progress
    Running,
    /// Training completed; the group can be identified against
    Succeeded,
    /// Training failed (an empty group always fails)
    Failed,
}

impl TrainingState {
    /// Get string representation of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            TrainingState::NotStarted => "notstarted",
            TrainingState::Running => "running",
            TrainingState::Succeeded => "succeeded",
            TrainingState::Failed => "failed",
        }
    }

    /// Check if this is a terminal state (no more polling needed).
    pub fn is_terminal(&self) -> bool {
        matches!(self, TrainingState::Succeeded | TrainingState::Failed)
    }
}

impl std::fmt::Display for TrainingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Snapshot returned by the training-status endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingStatus {
    pub status: TrainingState,
    pub created_date_time: Option<DateTime<Utc>>,
    pub last_action_date_time: Option<DateTime<Utc>>,
    /// Failure reason when `status` is failed.
    pub message: Option<String>,
}
