//! Recognition engine.
//!
//! A run starts from one branch sitting on a synthetic move into the main
//! submachine's initial state. The [`Scheduler`] steps every live branch
//! once per tick. A step runs the pending transition's prior action,
//! commits the move, runs the post action and then derives what comes
//! next: a single move, a fork into one child per candidate, or a verdict.
//!
//! All branches of a run share one transition table, so an adaptive action
//! fired on one branch changes what every other branch sees from its next
//! derivation on.

mod automaton;
mod branch;
mod config;
mod scheduler;

pub use automaton::AdaptiveAutomaton;
pub use branch::{Branch, Move};
pub use config::RecognizerConfig;
pub use scheduler::Scheduler;
