//! Core automaton data model.
//!
//! This module contains the types a definition is made of and the
//! bookkeeping a recognition run keeps per branch:
//! - States and symbols via the `State` and `Symbol` traits
//! - Transitions and the id-ordered `TransitionTable` that holds them
//! - Submachines, the call stack and adaptive actions
//! - Recognition paths with timestamped move logs
//!
//! Nothing here schedules or steps; see [`crate::engine`] for that.

mod action;
mod path;
mod stack;
mod state;
mod submachine;
mod table;
mod transition;

pub use action::{ActionFn, ActionRegistry};
pub use path::{Outcome, PathEntry, PathId, RecognitionPath};
pub use stack::{CallStack, Frame};
pub use state::{State, Symbol};
pub use submachine::{Submachine, SubmachineRegistry};
pub use table::TransitionTable;
pub use transition::{ActionCall, Arg, NewTransition, Transition, TransitionId, TransitionKind};
