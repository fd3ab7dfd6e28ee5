//! Person group lifecycle: create, train, poll training status.

use std::time::{Duration, Instant};

use cloudface_models::{PersonGroup, TrainingState, TrainingStatus};
use serde::Serialize;
use tracing::{info, warn};

use crate::client::FaceClient;
use crate::error::ApiResult;
use crate::metrics::record_training_poll;

/// How a bounded training wait ended.
#[derive(Debug, Clone, PartialEq)]
pub enum TrainingWait {
    /// Training reached the succeeded state.
    Succeeded,
    /// Training reached the failed state; payload is the service message.
    Failed(Option<String>),
    /// The deadline passed while training was still in the given state.
    /// A soft outcome: callers may proceed and let the service answer.
    TimedOut(TrainingState),
}

/// Options for `wait_for_training`.
#[derive(Debug, Clone)]
pub struct TrainingWaitOptions {
    /// Total time to wait before giving up.
    pub timeout: Duration,
    /// Delay between status polls.
    pub poll_interval: Duration,
}

impl Default for TrainingWaitOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            poll_interval: Duration::from_secs(1),
        }
    }
}

impl TrainingWaitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GroupBody<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_data: Option<&'a str>,
}

impl FaceClient {
    /// Create a person group.
    ///
    /// PUT `{face}/persongroups/{id}`. Creating an existing group is
    /// `AlreadyExists`.
    pub async fn create_person_group(
        &self,
        group_id: &str,
        name: &str,
        user_data: Option<&str>,
    ) -> ApiResult<()> {
        let url = self.face_url(&format!("persongroups/{}", group_id));
        let body = GroupBody { name, user_data };

        self.with_retry("create_person_group", || async {
            self.execute("create_person_group", &url, async {
                let response = self.put(&url).json(&body).send().await?;
                FaceClient::read_empty(response).await
            })
            .await
        })
        .await
    }

    /// Fetch a person group.
    pub async fn get_person_group(&self, group_id: &str) -> ApiResult<PersonGroup> {
        let url = self.face_url(&format!("persongroups/{}", group_id));

        self.with_retry("get_person_group", || async {
            self.execute("get_person_group", &url, async {
                let response = self.get(&url).send().await?;
                FaceClient::read_json(response).await
            })
            .await
        })
        .await
    }

    /// Delete a person group and everything enrolled in it.
    pub async fn delete_person_group(&self, group_id: &str) -> ApiResult<()> {
        let url = self.face_url(&format!("persongroups/{}", group_id));

        self.with_retry("delete_person_group", || async {
            self.execute("delete_person_group", &url, async {
                let response = self.delete(&url).send().await?;
                FaceClient::read_empty(response).await
            })
            .await
        })
        .await
    }

    /// Kick off server-side training for a group.
    ///
    /// POST `{face}/persongroups/{id}/train`; the service answers 202
    /// and trains asynchronously. Poll `get_training_status` for the
    /// result.
    pub async fn train_person_group(&self, group_id: &str) -> ApiResult<()> {
        let url = self.face_url(&format!("persongroups/{}/train", group_id));

        self.with_retry("train_person_group", || async {
            self.execute("train_person_group", &url, async {
                let response = self.post(&url).send().await?;
                FaceClient::read_empty(response).await
            })
            .await
        })
        .await
    }

    /// Fetch the current training status of a group.
    pub async fn get_training_status(&self, group_id: &str) -> ApiResult<TrainingStatus> {
        let url = self.face_url(&format!("persongroups/{}/training", group_id));

        let status: TrainingStatus = self
            .with_retry("get_training_status", || async {
                self.execute("get_training_status", &url, async {
                    let response = self.get(&url).send().await?;
                    FaceClient::read_json(response).await
                })
                .await
            })
            .await?;

        record_training_poll(status.status.as_str());
        Ok(status)
    }

    /// Poll training status until terminal or the deadline passes.
    ///
    /// The timeout is soft: `TimedOut` is an outcome, not an error, and
    /// carries the last state seen.
    pub async fn wait_for_training(
        &self,
        group_id: &str,
        opts: &TrainingWaitOptions,
    ) -> ApiResult<TrainingWait> {
        let deadline = Instant::now() + opts.timeout;

        loop {
            let status = self.get_training_status(group_id).await?;

            match status.status {
                TrainingState::Succeeded => {
                    info!(group_id, "training succeeded");
                    return Ok(TrainingWait::Succeeded);
                }
                TrainingState::Failed => {
                    warn!(group_id, message = ?status.message, "training failed");
                    return Ok(TrainingWait::Failed(status.message));
                }
                _ => {}
            }

            if Instant::now() + opts.poll_interval > deadline {
                warn!(group_id, state = %status.status, "training wait timed out");
                return Ok(TrainingWait::TimedOut(status.status));
            }
            tokio::time::sleep(opts.poll_interval).await;
        }
    }
}
