//! Find, delete and insert over a transition table with patterns.
//!
//! These three operations are relational: `query` is a selection followed
//! by a projection onto the free roles, `remove` deletes the selection, and
//! `add` inserts the cartesian product of the role sets. Nothing is
//! normalized or deduplicated beyond what the role sets themselves imply.

use super::pattern::Pattern;
use crate::core::{State, Symbol, Transition, TransitionId, TransitionTable};
use crate::error::QueryError;

impl<S: State, Y: Symbol> TransitionTable<S, Y> {
    /// Select the transitions matching `pattern` and fill its free roles.
    ///
    /// Each free role is replaced by the deduplicated projection of the
    /// selection onto that role; bound roles are left untouched. Returns the
    /// identifiers of the selected transitions in id-ascending order. The
    /// table is never modified.
    pub fn query(&self, pattern: &mut Pattern<S, Y>) -> Vec<TransitionId> {
        let selected: Vec<&Transition<S, Y>> = self.iter().filter(|t| pattern.matches(t)).collect();
        pattern.fill(&selected);

        tracing::trace!(matched = selected.len(), "pattern query");
        selected.into_iter().map(|t| t.id).collect()
    }

    /// Delete every transition matching a fully bound `pattern`.
    ///
    /// Fails with [`QueryError::FreeVariable`] if any role is still free.
    /// A role bound to an empty set matches nothing, so nothing is removed.
    /// Returns the number of deleted transitions.
    pub fn remove(&mut self, pattern: &Pattern<S, Y>) -> Result<usize, QueryError> {
        if let Some(role) = pattern.first_free() {
            return Err(QueryError::FreeVariable { role });
        }
        if pattern.any_empty() {
            return Ok(0);
        }

        let doomed: Vec<TransitionId> = self.select(|t| pattern.matches(t)).map(|t| t.id).collect();
        for id in &doomed {
            self.delete(*id);
        }

        tracing::trace!(removed = doomed.len(), "pattern remove");
        Ok(doomed.len())
    }

    /// Insert one transition per tuple of the cartesian product of the
    /// pattern's role sets.
    ///
    /// Fails with [`QueryError::FreeVariable`] if any role is still free.
    /// Any empty role set yields an empty product. Returns the identifiers
    /// of the inserted transitions.
    pub fn add(&mut self, pattern: &Pattern<S, Y>) -> Result<Vec<TransitionId>, QueryError> {
        if let Some(role) = pattern.first_free() {
            return Err(QueryError::FreeVariable { role });
        }
        if pattern.any_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<TransitionId> = pattern
            .expand()
            .into_iter()
            .map(|transition| self.insert(transition))
            .collect();

        tracing::trace!(added = ids.len(), "pattern add");
        Ok(ids)
    }
}
