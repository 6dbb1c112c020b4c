//! Recognition path tracking.
//!
//! Every branch of a recognition run owns one path: the ordered log of the
//! moves it selected and, once it terminates, where it ended and with what
//! outcome.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Identifier of a recognition path, unique within one run.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathId(pub u64);

impl fmt::Display for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "path-{}", self.0)
    }
}

/// Verdict of a recognition path.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Outcome {
    Pending,
    Accepted,
    Rejected,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Pending)
    }
}

/// One logged move of a path.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PathEntry {
    /// Human-readable description of the move
    pub description: String,
    /// When the move was selected
    pub timestamp: DateTime<Utc>,
}

/// Ordered log of one branch's moves plus its final position and verdict.
///
/// # Example
///
/// ```rust
/// use adaptive_automata::core::{Outcome, PathId, RecognitionPath};
///
/// let mut path: RecognitionPath<String> = RecognitionPath::new(PathId(0));
/// path.record("ε -> q0");
/// path.record("q0 -a-> q1");
///
/// let mut child = path.fork(PathId(1));
/// child.record("q1 -b-> q2");
/// child.finish(Outcome::Accepted, Some("q2".to_string()), 2, 0);
///
/// assert_eq!(path.entries().len(), 2);
/// assert_eq!(child.entries().len(), 3);
/// assert!(child.is_terminal());
/// assert!(!path.is_terminal());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct RecognitionPath<S: State> {
    pub id: PathId,
    entries: Vec<PathEntry>,
    /// Input position when the path ended
    pub cursor: usize,
    /// State the path ended in
    pub state: Option<S>,
    pub outcome: Outcome,
    /// Call stack depth when the path ended
    pub stack_depth: usize,
}

impl<S: State> RecognitionPath<S> {
    pub fn new(id: PathId) -> Self {
        Self {
            id,
            entries: Vec::new(),
            cursor: 0,
            state: None,
            outcome: Outcome::Pending,
            stack_depth: 0,
        }
    }

    /// Append a move description to the log.
    pub fn record(&mut self, description: impl Into<String>) {
        self.entries.push(PathEntry {
            description: description.into(),
            timestamp: Utc::now(),
        });
    }

    /// Copy the log under a new identifier. The copy is always Pending.
    pub fn fork(&self, id: PathId) -> Self {
        Self {
            id,
            entries: self.entries.clone(),
            cursor: self.cursor,
            state: self.state.clone(),
            outcome: Outcome::Pending,
            stack_depth: self.stack_depth,
        }
    }

    /// Record the terminal verdict and where the branch stopped.
    pub fn finish(&mut self, outcome: Outcome, state: Option<S>, cursor: usize, stack_depth: usize) {
        self.outcome = outcome;
        self.state = state;
        self.cursor = cursor;
        self.stack_depth = stack_depth;
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    pub fn is_accepted(&self) -> bool {
        self.outcome == Outcome::Accepted
    }

    pub fn entries(&self) -> &[PathEntry] {
        &self.entries
    }

    /// Move descriptions in order.
    pub fn descriptions(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.description.as_str()).collect()
    }

    /// Time from the first to the last logged move.
    ///
    /// Returns `None` for an empty log.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.entries.first(), self.entries.last()) {
            last.timestamp
                .signed_duration_since(first.timestamp)
                .to_std()
                .ok()
        } else {
            None
        }
    }
}
