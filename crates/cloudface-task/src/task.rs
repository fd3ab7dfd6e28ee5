//! Background task with a three-state observable lifecycle.
//!
//! A `Task` wraps a spawned job so UI-style callers can poll it on a
//! fixed cadence while async callers simply await `join`. The outcome
//! is written before the state flips, so any observer that sees a
//! terminal state can immediately take the result.

use std::fmt::Display;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::watch;
use tracing::debug;

use crate::error::TaskError;

/// Poll cadence used by `wait_default`, in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 200;

/// Lifecycle state of a background task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskState {
    /// The job is still executing
    Running,
    /// The job completed and its value is available
    Succeeded,
    /// The job returned an error or panicked
    Failed,
}

impl TaskState {
    /// Get string representation of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskState::Running => "running",
            TaskState::Succeeded => "succeeded",
            TaskState::Failed => "failed",
        }
    }

    /// Check if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Succeeded | TaskState::Failed)
    }
}

impl Display for TaskState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Handle to a spawned background job.
pub struct Task<T> {
    state_rx: watch::Receiver<TaskState>,
    outcome: Arc<Mutex<Option<Result<T, TaskError>>>>,
    error: Arc<Mutex<Option<String>>>,
}

impl<T: Send + 'static> Task<T> {
    /// Spawn a fallible job on the tokio runtime and return its handle.
    pub fn spawn<F, E>(future: F) -> Self
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        let (state_tx, state_rx) = watch::channel(TaskState::Running);
        let outcome = Arc::new(Mutex::new(None));
        let error = Arc::new(Mutex::new(None));

        let outcome_slot = Arc::clone(&outcome);
        let error_slot = Arc::clone(&error);
        let handle = tokio::spawn(future);

        tokio::spawn(async move {
            let result = match handle.await {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(e)) => Err(TaskError::Failed(e.to_string())),
                Err(join_err) => Err(panic_error(join_err)),
            };

            let state = if result.is_ok() {
                TaskState::Succeeded
            } else {
                TaskState::Failed
            };
            if let Err(e) = &result {
                *lock(&error_slot) = Some(e.message().to_string());
            }
            // Outcome lands before the state flips
            *lock(&outcome_slot) = Some(result);
            debug!(state = %state, "background task finished");
            let _ = state_tx.send(state);
        });

        Self { state_rx, outcome, error }
    }

    /// Current state, without blocking.
    pub fn state(&self) -> TaskState {
        *self.state_rx.borrow()
    }

    /// Whether the task reached a terminal state.
    pub fn is_finished(&self) -> bool {
        self.state().is_terminal()
    }

    /// Failure message once the task has failed, `None` otherwise.
    /// Stays readable after the result has been taken.
    pub fn error_message(&self) -> Option<String> {
        lock(&self.error).clone()
    }

    /// Take the outcome if the task is finished, without blocking.
    ///
    /// Returns `None` while the task is running, and again after the
    /// outcome has already been taken.
    pub fn try_result(&self) -> Option<Result<T, TaskError>> {
        if !self.is_finished() {
            return None;
        }
        lock(&self.outcome).take()
    }

    /// Await completion and take the outcome.
    pub async fn join(mut self) -> Result<T, TaskError> {
        loop {
            if self.state_rx.borrow_and_update().is_terminal() {
                break;
            }
            if self.state_rx.changed().await.is_err() {
                break;
            }
        }
        self.take_outcome()
    }

    /// Poll on a fixed cadence until the task finishes, then take the
    /// outcome. `on_poll` runs once per tick while still running.
    pub async fn wait_with_interval(
        self,
        interval: Duration,
        mut on_poll: impl FnMut(TaskState),
    ) -> Result<T, TaskError> {
        loop {
            let state = self.state();
            if state.is_terminal() {
                return self.take_outcome();
            }
            on_poll(state);
            tokio::time::sleep(interval).await;
        }
    }

    /// `wait_with_interval` at the default 200ms cadence.
    pub async fn wait_default(self) -> Result<T, TaskError> {
        self.wait_with_interval(Duration::from_millis(DEFAULT_POLL_INTERVAL_MS), |_| {})
            .await
    }

    fn take_outcome(&self) -> Result<T, TaskError> {
        lock(&self.outcome)
            .take()
            .unwrap_or_else(|| Err(TaskError::Failed("task result already taken".into())))
    }
}

fn panic_error(join_err: tokio::task::JoinError) -> TaskError {
    if join_err.is_panic() {
        let msg = match join_err.try_into_panic() {
            Ok(payload) => payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string()),
            Err(_) => "unknown panic".to_string(),
        };
        TaskError::Panicked(msg)
    } else {
        TaskError::Panicked("task was cancelled".to_string())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    // Error type for test jobs
    #[derive(Debug)]
    struct Boom;

    impl Display for Boom {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "boom")
        }
    }

    #[tokio::test]
    async fn test_task_runs_then_succeeds() {
        let (tx, rx) = oneshot::channel::<()>();
        let task = Task::spawn(async move {
            rx.await.ok();
            Ok::<_, Boom>(42u32)
        });

        assert_eq!(task.state(), TaskState::Running);
        assert!(!task.is_finished());
        assert!(task.try_result().is_none());
        assert!(task.error_message().is_none());

        tx.send(()).ok();
        let value = task.join().await.expect("task succeeds");
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn test_task_failure_exposes_error_message() {
        let task = Task::spawn(async move { Err::<u32, _>(Boom) });

        let err = task.join().await.expect_err("task fails");
        match err {
            TaskError::Failed(msg) => assert_eq!(msg, "boom"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_message_readable_after_take() {
        let task = Task::spawn(async move { Err::<u32, _>(Boom) });

        // Wait for the terminal state by polling
        while !task.is_finished() {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        assert_eq!(task.state(), TaskState::Failed);
        assert!(task.try_result().expect("outcome available").is_err());
        // The outcome is gone but the message stays
        assert!(task.try_result().is_none());
        assert_eq!(task.error_message().as_deref(), Some("boom"));
    }

    async fn exploding_job() -> Result<u32, Boom> {
        panic!("exploded")
    }

    #[tokio::test]
    async fn test_panic_surfaces_as_failed() {
        let task = Task::spawn(exploding_job());

        let err = task.join().await.expect_err("panic becomes error");
        match err {
            TaskError::Panicked(msg) => assert!(msg.contains("exploded")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_wait_with_interval_polls_until_done() {
        let (tx, rx) = oneshot::channel::<()>();
        let task = Task::spawn(async move {
            rx.await.ok();
            Ok::<_, Boom>("done")
        });

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            tx.send(()).ok();
        });

        let mut polls = 0;
        let value = task
            .wait_with_interval(Duration::from_millis(1), |state| {
                assert_eq!(state, TaskState::Running);
                polls += 1;
            })
            .await
            .expect("task succeeds");
        assert_eq!(value, "done");
        assert!(polls >= 1);
    }

    #[tokio::test]
    async fn test_state_stays_terminal() {
        let task = Task::spawn(async move { Ok::<_, Boom>(1u8) });
        while !task.is_finished() {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        assert_eq!(task.state(), TaskState::Succeeded);
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert_eq!(task.state(), TaskState::Succeeded);
    }
}
