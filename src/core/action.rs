//! Adaptive actions and the registry that resolves them by name.

use super::state::{State, Symbol};
use super::table::TransitionTable;
use super::transition::{Arg, Transition};
use crate::error::{ActionError, RecognitionError};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Callback run before or after a transition is committed.
///
/// Receives the shared transition table, the transition that triggered it
/// and the arguments stored on that transition. Actions rewrite the table
/// through the pattern query operations (`query`, `remove`, `add`).
pub type ActionFn<S, Y> = Arc<
    dyn Fn(&mut TransitionTable<S, Y>, &Transition<S, Y>, &[Arg<S, Y>]) -> Result<(), ActionError>
        + Send
        + Sync,
>;

/// Name-to-callback map, shared by every branch of a run.
pub struct ActionRegistry<S: State, Y: Symbol> {
    actions: BTreeMap<String, ActionFn<S, Y>>,
}

impl<S: State, Y: Symbol> Default for ActionRegistry<S, Y> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, Y: Symbol> Clone for ActionRegistry<S, Y> {
    fn clone(&self) -> Self {
        Self {
            actions: self.actions.clone(),
        }
    }
}

impl<S: State, Y: Symbol> fmt::Debug for ActionRegistry<S, Y> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("actions", &self.actions.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<S: State, Y: Symbol> ActionRegistry<S, Y> {
    pub fn new() -> Self {
        Self {
            actions: BTreeMap::new(),
        }
    }

    /// Register an action, replacing any previous one with the same name.
    pub fn register<F>(&mut self, name: impl Into<String>, action: F)
    where
        F: Fn(&mut TransitionTable<S, Y>, &Transition<S, Y>, &[Arg<S, Y>]) -> Result<(), ActionError>
            + Send
            + Sync
            + 'static,
    {
        self.actions.insert(name.into(), Arc::new(action));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Run the named action against `table`.
    ///
    /// Fails with [`RecognitionError::UnknownAction`] when nothing is
    /// registered under `name`, and wraps any error the action returns.
    pub fn invoke(
        &self,
        name: &str,
        table: &mut TransitionTable<S, Y>,
        trigger: &Transition<S, Y>,
        args: &[Arg<S, Y>],
    ) -> Result<(), RecognitionError> {
        let action = self
            .actions
            .get(name)
            .ok_or_else(|| RecognitionError::UnknownAction {
                name: name.to_string(),
            })?;

        tracing::trace!(action = name, trigger = %trigger, "running action");
        action(table, trigger, args).map_err(|source| RecognitionError::Action {
            name: name.to_string(),
            source,
        })
    }
}
