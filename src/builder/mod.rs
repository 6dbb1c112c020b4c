//! Builder API for assembling automaton definitions.
//!
//! This module provides fluent builders for submachines, transitions and
//! actions. The definition is checked as a whole when it is built, and every
//! problem found is reported together.

pub mod error;
pub mod machine;
pub mod transition;
mod validation;

pub use error::{BuildError, DefinitionError};
pub use machine::AutomatonBuilder;
pub use transition::TransitionBuilder;
pub use validation::DefinitionCheck;
