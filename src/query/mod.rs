//! Pattern queries over the transition table.
//!
//! Adaptive actions read and rewrite the automaton through three operations
//! implemented on [`TransitionTable`](crate::core::TransitionTable):
//!
//! - **query**: select the transitions matching a pattern and bind every free
//!   role to the values found
//! - **remove**: delete the transitions matching a fully bound pattern
//! - **add**: insert the cartesian product of a fully bound pattern's roles
//!
//! A pattern has one [`Variable`] per role: source, label (symbol or called
//! submachine), target, and optionally the prior and post actions with their
//! arguments.

mod engine;
mod pattern;
mod variable;

pub use pattern::{ActionQuery, LabelRole, Pattern, Role};
pub use variable::Variable;
