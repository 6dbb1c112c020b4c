//! Transition rules stored in the transition table.

use super::state::{State, Symbol};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a transition, unique for the lifetime of its table.
///
/// Identifiers are handed out in increasing order, so sorting by id gives
/// insertion order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransitionId(pub u64);

impl fmt::Display for TransitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Argument passed to an adaptive action.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub enum Arg<S: State, Y: Symbol> {
    State(S),
    Symbol(Y),
    Int(i64),
    Text(String),
}

impl<S: State, Y: Symbol> fmt::Display for Arg<S, Y> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::State(state) => write!(f, "{state:?}"),
            Arg::Symbol(symbol) => write!(f, "{symbol:?}"),
            Arg::Int(value) => write!(f, "{value}"),
            Arg::Text(text) => write!(f, "{text:?}"),
        }
    }
}

/// A reference to a registered action together with its arguments.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct ActionCall<S: State, Y: Symbol> {
    pub name: String,
    pub args: Vec<Arg<S, Y>>,
}

impl<S: State, Y: Symbol> ActionCall<S, Y> {
    pub fn new(name: impl Into<String>, args: Vec<Arg<S, Y>>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// An action call without arguments.
    pub fn bare(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }
}

impl<S: State, Y: Symbol> fmt::Display for ActionCall<S, Y> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{arg}")?;
        }
        write!(f, ")")
    }
}

/// What a transition does with the input.
///
/// Exactly one of the three is chosen per transition. Returns from
/// submachines are synthesized by the engine and never stored in a table.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub enum TransitionKind<Y: Symbol> {
    /// Moves without consuming input.
    Epsilon,
    /// Consumes one matching input symbol.
    Symbol(Y),
    /// Calls the named submachine; the target is the return address.
    Call(String),
}

impl<Y: Symbol> TransitionKind<Y> {
    pub fn symbol(&self) -> Option<&Y> {
        match self {
            TransitionKind::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    pub fn called(&self) -> Option<&str> {
        match self {
            TransitionKind::Call(name) => Some(name),
            _ => None,
        }
    }
}

/// A transition that has not been inserted into a table yet.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct NewTransition<S: State, Y: Symbol> {
    pub source: S,
    pub kind: TransitionKind<Y>,
    pub target: S,
    pub prior: Option<ActionCall<S, Y>>,
    pub post: Option<ActionCall<S, Y>>,
}

impl<S: State, Y: Symbol> NewTransition<S, Y> {
    pub fn epsilon(source: S, target: S) -> Self {
        Self::with_kind(source, TransitionKind::Epsilon, target)
    }

    pub fn symbol(source: S, symbol: Y, target: S) -> Self {
        Self::with_kind(source, TransitionKind::Symbol(symbol), target)
    }

    pub fn call(source: S, submachine: impl Into<String>, target: S) -> Self {
        Self::with_kind(source, TransitionKind::Call(submachine.into()), target)
    }

    fn with_kind(source: S, kind: TransitionKind<Y>, target: S) -> Self {
        Self {
            source,
            kind,
            target,
            prior: None,
            post: None,
        }
    }

    pub fn with_prior(mut self, action: ActionCall<S, Y>) -> Self {
        self.prior = Some(action);
        self
    }

    pub fn with_post(mut self, action: ActionCall<S, Y>) -> Self {
        self.post = Some(action);
        self
    }

    pub(crate) fn into_transition(self, id: TransitionId) -> Transition<S, Y> {
        Transition {
            id,
            source: self.source,
            kind: self.kind,
            target: self.target,
            prior: self.prior,
            post: self.post,
        }
    }
}

/// A transition stored in a [`TransitionTable`](super::TransitionTable).
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Transition<S: State, Y: Symbol> {
    pub id: TransitionId,
    pub source: S,
    pub kind: TransitionKind<Y>,
    pub target: S,
    pub prior: Option<ActionCall<S, Y>>,
    pub post: Option<ActionCall<S, Y>>,
}

impl<S: State, Y: Symbol> Transition<S, Y> {
    /// Whether this transition may be taken when `next` is the lookahead.
    ///
    /// Epsilon and call transitions never look at the input.
    pub fn accepts_lookahead(&self, next: Option<&Y>) -> bool {
        match &self.kind {
            TransitionKind::Epsilon | TransitionKind::Call(_) => true,
            TransitionKind::Symbol(symbol) => next == Some(symbol),
        }
    }
}

impl<S: State, Y: Symbol> fmt::Display for Transition<S, Y> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} ", self.id, self.source)?;
        match &self.kind {
            TransitionKind::Epsilon => write!(f, "-ε->")?,
            TransitionKind::Symbol(symbol) => write!(f, "-{symbol:?}->")?,
            TransitionKind::Call(name) => write!(f, "-[call {name}]->")?,
        }
        write!(f, " {:?}", self.target)?;
        if let Some(prior) = &self.prior {
            write!(f, " prior {prior}")?;
        }
        if let Some(post) = &self.post {
            write!(f, " post {post}")?;
        }
        Ok(())
    }
}
