//! The mutable set of transitions shared by every branch of a run.

use super::state::{State, Symbol};
use super::transition::{NewTransition, Transition, TransitionId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Set of transitions keyed by identifier.
///
/// The table is only mutated through [`insert`](Self::insert) and
/// [`delete`](Self::delete). Duplicate rules (same source, kind and target)
/// are allowed; they differ by identifier. Iteration is id-ascending, which
/// is the canonical order used for candidate selection.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionTable<S: State, Y: Symbol> {
    transitions: BTreeMap<TransitionId, Transition<S, Y>>,
    next_id: u64,
}

impl<S: State, Y: Symbol> Default for TransitionTable<S, Y> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, Y: Symbol> TransitionTable<S, Y> {
    pub fn new() -> Self {
        Self {
            transitions: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Insert one transition and return its freshly assigned identifier.
    pub fn insert(&mut self, transition: NewTransition<S, Y>) -> TransitionId {
        let id = TransitionId(self.next_id);
        self.next_id += 1;
        self.transitions.insert(id, transition.into_transition(id));
        id
    }

    /// Delete a transition by identifier, returning it if it was present.
    pub fn delete(&mut self, id: TransitionId) -> Option<Transition<S, Y>> {
        self.transitions.remove(&id)
    }

    pub fn get(&self, id: TransitionId) -> Option<&Transition<S, Y>> {
        self.transitions.get(&id)
    }

    pub fn contains(&self, id: TransitionId) -> bool {
        self.transitions.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// All transitions in id-ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &Transition<S, Y>> {
        self.transitions.values()
    }

    /// Transitions matching `predicate`, in id-ascending order.
    pub fn select<'a, P>(&'a self, predicate: P) -> impl Iterator<Item = &'a Transition<S, Y>>
    where
        P: Fn(&Transition<S, Y>) -> bool + 'a,
    {
        self.transitions.values().filter(move |t| predicate(t))
    }

    /// Transitions leaving `state`, in id-ascending order.
    pub fn outgoing<'a>(&'a self, state: &'a S) -> impl Iterator<Item = &'a Transition<S, Y>> {
        self.select(move |t| &t.source == state)
    }
}
