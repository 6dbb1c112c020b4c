//! Builder for constructing transitions.

use crate::builder::error::BuildError;
use crate::core::{ActionCall, Arg, NewTransition, State, Symbol, TransitionKind};

/// Builder for constructing transitions with a fluent API.
#[derive(Clone, Debug)]
pub struct TransitionBuilder<S: State, Y: Symbol> {
    source: Option<S>,
    kind: Option<TransitionKind<Y>>,
    target: Option<S>,
    prior: Option<ActionCall<S, Y>>,
    post: Option<ActionCall<S, Y>>,
}

impl<S: State, Y: Symbol> TransitionBuilder<S, Y> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            source: None,
            kind: None,
            target: None,
            prior: None,
            post: None,
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, state: S) -> Self {
        self.source = Some(state);
        self
    }

    /// Set the target state (required).
    ///
    /// For a call transition this is the state the caller resumes in after
    /// the called submachine returns.
    pub fn to(mut self, state: S) -> Self {
        self.target = Some(state);
        self
    }

    /// Consume `symbol`.
    pub fn on(mut self, symbol: Y) -> Self {
        self.kind = Some(TransitionKind::Symbol(symbol));
        self
    }

    /// Move without consuming input.
    pub fn epsilon(mut self) -> Self {
        self.kind = Some(TransitionKind::Epsilon);
        self
    }

    /// Call the named submachine.
    pub fn call(mut self, submachine: impl Into<String>) -> Self {
        self.kind = Some(TransitionKind::Call(submachine.into()));
        self
    }

    /// Run the named action before the move is committed (optional).
    pub fn prior(mut self, name: impl Into<String>, args: Vec<Arg<S, Y>>) -> Self {
        self.prior = Some(ActionCall::new(name, args));
        self
    }

    /// Run the named action after the move is committed (optional).
    pub fn post(mut self, name: impl Into<String>, args: Vec<Arg<S, Y>>) -> Self {
        self.post = Some(ActionCall::new(name, args));
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<NewTransition<S, Y>, BuildError> {
        let source = self.source.ok_or(BuildError::MissingSource)?;
        let kind = self.kind.ok_or(BuildError::MissingLabel)?;
        let target = self.target.ok_or(BuildError::MissingTarget)?;

        Ok(NewTransition {
            source,
            kind,
            target,
            prior: self.prior,
            post: self.post,
        })
    }
}

impl<S: State, Y: Symbol> Default for TransitionBuilder<S, Y> {
    fn default() -> Self {
        Self::new()
    }
}
