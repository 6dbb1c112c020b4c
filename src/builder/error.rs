//! Build errors for automaton and transition builders.

use thiserror::Error;

/// Errors that can occur when building automata and transitions.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("Transition source state not specified. Call .from(state)")]
    MissingSource,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingTarget,

    #[error("Transition label not specified. Call .on(symbol), .epsilon() or .call(submachine)")]
    MissingLabel,

    #[error("Invalid automaton definition ({} violation(s)): {}", .0.len(), summary(.0))]
    Invalid(Vec<DefinitionError>),
}

impl BuildError {
    /// Every violation carried by an `Invalid` error; empty otherwise.
    pub fn violations(&self) -> &[DefinitionError] {
        match self {
            BuildError::Invalid(violations) => violations,
            _ => &[],
        }
    }
}

fn summary(violations: &[DefinitionError]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A single problem found while validating a definition.
///
/// States are rendered with their `Debug` form so that the error type does
/// not depend on the state type.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DefinitionError {
    #[error("Main submachine not specified. Call .main(name)")]
    MissingMain,

    #[error("Main submachine '{name}' is not registered")]
    UnknownMain { name: String },

    #[error("Submachine '{name}' is registered more than once")]
    DuplicateSubmachine { name: String },

    #[error("Initial state {state} of submachine '{submachine}' is not one of its states")]
    InitialNotInStates { submachine: String, state: String },

    #[error("Accepting state {state} of submachine '{submachine}' is not one of its states")]
    AcceptingNotInStates { submachine: String, state: String },

    #[error("State {state} belongs to both '{first}' and '{second}'")]
    OverlappingStates {
        state: String,
        first: String,
        second: String,
    },

    #[error("Transition {index} refers to unregistered action '{name}'")]
    UnknownAction { index: usize, name: String },

    #[error("Transition {index} calls unregistered submachine '{name}'")]
    UnknownSubmachine { index: usize, name: String },

    #[error("Transition {index} is incomplete: {reason}")]
    IncompleteTransition { index: usize, reason: BuildError },
}
