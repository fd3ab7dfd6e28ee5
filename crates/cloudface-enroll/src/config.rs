//! Enrollment flow configuration.

use std::time::Duration;

/// Tuning knobs for the enrollment and identification flows.
#[derive(Debug, Clone)]
pub struct EnrollConfig {
    /// Total time identification waits for group training to settle.
    pub training_timeout: Duration,
    /// Delay between training-status polls during that wait.
    pub training_poll: Duration,
    /// Candidates requested per face from the identify endpoint.
    pub max_candidates: u8,
    /// Display name for a group created on connect; the group ID is
    /// used when unset.
    pub group_name: Option<String>,
}

impl Default for EnrollConfig {
    fn default() -> Self {
        Self {
            training_timeout: Duration::from_secs(5),
            training_poll: Duration::from_secs(1),
            max_candidates: 1,
            group_name: None,
        }
    }
}

impl EnrollConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_training_timeout(mut self, timeout: Duration) -> Self {
        self.training_timeout = timeout;
        self
    }

    pub fn with_training_poll(mut self, poll: Duration) -> Self {
        self.training_poll = poll;
        self
    }

    pub fn with_max_candidates(mut self, max_candidates: u8) -> Self {
        self.max_candidates = max_candidates;
        self
    }

    pub fn with_group_name(mut self, name: impl Into<String>) -> Self {
        self.group_name = Some(name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EnrollConfig::default();
        assert_eq!(config.training_timeout, Duration::from_secs(5));
        assert_eq!(config.training_poll, Duration::from_secs(1));
        assert_eq!(config.max_candidates, 1);
        assert!(config.group_name.is_none());
    }

    #[test]
    fn test_builders() {
        let config = EnrollConfig::new()
            .with_training_timeout(Duration::from_secs(10))
            .with_max_candidates(3)
            .with_group_name("Home users");
        assert_eq!(config.training_timeout, Duration::from_secs(10));
        assert_eq!(config.max_candidates, 3);
        assert_eq!(config.group_name.as_deref(), Some("Home users"));
    }
}
