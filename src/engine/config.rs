//! Recognizer configuration.

use serde::{Deserialize, Serialize};

/// Settings for a recognition run.
///
/// # Example
///
/// ```rust
/// use adaptive_automata::engine::RecognizerConfig;
///
/// let config = RecognizerConfig::new()
///     .stop_at_first_result(true)
///     .tick_limit(10_000);
/// assert!(config.stop_at_first_result);
///
/// let parsed = RecognizerConfig::from_json(r#"{"tick_limit": 500}"#).unwrap();
/// assert_eq!(parsed.tick_limit, Some(500));
/// assert!(!parsed.stop_at_first_result);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizerConfig {
    /// Stop scheduling once any path has a verdict. The tick in progress
    /// still completes for every branch.
    pub stop_at_first_result: bool,

    /// Abort with an error after this many scheduler ticks. Unbounded when
    /// `None`, which lets epsilon or call cycles run forever.
    pub tick_limit: Option<usize>,
}

impl RecognizerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop_at_first_result(mut self, stop: bool) -> Self {
        self.stop_at_first_result = stop;
        self
    }

    pub fn tick_limit(mut self, limit: usize) -> Self {
        self.tick_limit = Some(limit);
        self
    }

    /// Parse a configuration from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
