//! Role variables for pattern queries.

use serde::{Deserialize, Serialize};

/// A role binding in a pattern.
///
/// A `Bound` variable restricts matches to its candidate values. A `Free`
/// variable matches anything and is replaced by the projection of the
/// matched transitions once a query runs.
///
/// # Example
///
/// ```rust
/// use adaptive_automata::query::Variable;
///
/// let free: Variable<u32> = Variable::Free;
/// assert!(free.matches(&7));
/// assert!(free.values().is_none());
///
/// let bound = Variable::bound([1u32, 2, 2, 3]);
/// assert_eq!(bound.values(), Some(&[1, 2, 3][..]));
/// assert!(bound.matches(&2));
/// assert!(!bound.matches(&4));
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Variable<T> {
    Free,
    Bound(Vec<T>),
}

impl<T> Default for Variable<T> {
    fn default() -> Self {
        Variable::Free
    }
}

impl<T: PartialEq> Variable<T> {
    /// Bind to a set of values; duplicates are dropped, first occurrence wins.
    pub fn bound(values: impl IntoIterator<Item = T>) -> Self {
        let mut set = Vec::new();
        for value in values {
            if !set.contains(&value) {
                set.push(value);
            }
        }
        Variable::Bound(set)
    }

    /// Bind to exactly one value.
    pub fn one(value: T) -> Self {
        Variable::Bound(vec![value])
    }

    pub fn is_free(&self) -> bool {
        matches!(self, Variable::Free)
    }

    /// Candidate values, or `None` while the variable is free.
    pub fn values(&self) -> Option<&[T]> {
        match self {
            Variable::Free => None,
            Variable::Bound(values) => Some(values),
        }
    }

    /// The only candidate value, if the variable is bound to exactly one.
    pub fn single(&self) -> Option<&T> {
        match self.values() {
            Some([value]) => Some(value),
            _ => None,
        }
    }

    /// Whether the variable is bound to an empty set.
    pub fn is_empty(&self) -> bool {
        matches!(self, Variable::Bound(values) if values.is_empty())
    }

    /// Match predicate: free matches everything, bound is an OR over its values.
    pub fn matches(&self, candidate: &T) -> bool {
        match self {
            Variable::Free => true,
            Variable::Bound(values) => values.contains(candidate),
        }
    }

    /// Replace a free variable with the given projection. Bound variables
    /// are left untouched.
    pub(crate) fn fill(&mut self, projection: impl IntoIterator<Item = T>) {
        if self.is_free() {
            *self = Variable::bound(projection);
        }
    }
}
