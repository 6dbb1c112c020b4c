//! Submachines and the registry that indexes them.

use super::state::State;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// A named region of states with its own initial and accepting states.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Submachine<S: State> {
    pub name: String,
    pub initial: S,
    pub states: HashSet<S>,
    pub accepting: HashSet<S>,
}

impl<S: State> Submachine<S> {
    pub fn new(
        name: impl Into<String>,
        initial: S,
        states: impl IntoIterator<Item = S>,
        accepting: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            name: name.into(),
            initial,
            states: states.into_iter().collect(),
            accepting: accepting.into_iter().collect(),
        }
    }

    pub fn contains(&self, state: &S) -> bool {
        self.states.contains(state)
    }

    pub fn is_accepting(&self, state: &S) -> bool {
        self.accepting.contains(state)
    }
}

/// Submachines keyed by name, with a reverse index from state to owner.
///
/// State sets are pairwise disjoint, so every registered state has exactly
/// one owner. The definition builder enforces this before a registry is
/// handed to the engine.
#[derive(Clone, Debug)]
pub struct SubmachineRegistry<S: State> {
    submachines: BTreeMap<String, Submachine<S>>,
    owners: HashMap<S, String>,
}

impl<S: State> Default for SubmachineRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> SubmachineRegistry<S> {
    pub fn new() -> Self {
        Self {
            submachines: BTreeMap::new(),
            owners: HashMap::new(),
        }
    }

    /// Register a submachine, replacing any previous one with the same name.
    pub fn register(&mut self, submachine: Submachine<S>) {
        if let Some(previous) = self.submachines.remove(&submachine.name) {
            self.owners.retain(|_, owner| *owner != previous.name);
        }
        for state in &submachine.states {
            self.owners.insert(state.clone(), submachine.name.clone());
        }
        self.submachines.insert(submachine.name.clone(), submachine);
    }

    pub fn get(&self, name: &str) -> Option<&Submachine<S>> {
        self.submachines.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.submachines.contains_key(name)
    }

    /// Name of the submachine owning `state`, if it is registered.
    pub fn owner_of(&self, state: &S) -> Option<&str> {
        self.owners.get(state).map(String::as_str)
    }

    /// Whether `state` is accepting in the submachine called `name`.
    pub fn is_accepting(&self, name: &str, state: &S) -> bool {
        self.get(name).is_some_and(|m| m.is_accepting(state))
    }

    /// Submachines in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Submachine<S>> {
        self.submachines.values()
    }

    pub fn len(&self) -> usize {
        self.submachines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.submachines.is_empty()
    }
}
