//! Adaptive Automata: a recognizer for self-modifying automata
//!
//! An adaptive automaton is a finite automaton extended with named
//! submachines that call each other through a stack, and with actions that
//! rewrite the transition relation while the input is being read. That is
//! enough to recognize context-sensitive languages such as `aⁿbⁿcⁿ`.
//!
//! # Core Concepts
//!
//! - **Transitions**: epsilon, symbol-consuming or submachine-calling
//!   moves, each optionally carrying a prior and a post action
//! - **Submachines**: named state regions with their own initial and
//!   accepting states; the main submachine decides acceptance
//! - **Actions**: callbacks that read and rewrite the shared transition
//!   table through pattern queries
//! - **Paths**: one timestamped move log per branch of non-deterministic
//!   recognition, ending Accepted or Rejected
//!
//! # Example
//!
//! ```rust
//! use adaptive_automata::builder::{AutomatonBuilder, TransitionBuilder};
//!
//! let mut automaton = AutomatonBuilder::<u32, char>::new()
//!     .submachine("Main", 0, [0, 1, 2], [2])
//!     .main("Main")
//!     .transition(TransitionBuilder::new().from(0).on('a').to(1))
//!     .transition(TransitionBuilder::new().from(1).on('b').to(2))
//!     .build()
//!     .unwrap();
//!
//! assert!(automaton.recognize(&['a', 'b']).unwrap());
//! assert!(!automaton.recognize(&['a']).unwrap());
//!
//! let paths = automaton.recognition_paths();
//! assert_eq!(paths.len(), 1);
//! assert_eq!(paths[0].cursor, 1);
//! ```

pub mod builder;
pub mod core;
pub mod engine;
pub mod error;
pub mod query;

// Re-export commonly used types
pub use builder::{AutomatonBuilder, BuildError, DefinitionError, TransitionBuilder};
pub use core::{
    ActionCall, ActionRegistry, Arg, NewTransition, Outcome, RecognitionPath, State, Submachine,
    Symbol, Transition, TransitionId, TransitionKind, TransitionTable,
};
pub use engine::{AdaptiveAutomaton, RecognizerConfig, Scheduler};
pub use error::{ActionError, QueryError, RecognitionError};
pub use query::{ActionQuery, Pattern, Role, Variable};
