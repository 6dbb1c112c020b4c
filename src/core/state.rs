//! Identity traits for automaton states and input symbols.
//!
//! The recognizer never looks inside a state or a symbol. It only compares,
//! hashes, clones and prints them, so any value type with those capabilities
//! can play either role.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for automaton states.
///
/// Implemented automatically for every type meeting the bounds, so `String`,
/// integers and plain enums can be used directly.
///
/// # Required Traits
///
/// - `Clone`: states are copied into call stacks and recognition paths
/// - `Eq` + `Hash`: states are matched by the query engine and indexed by
///   the submachine registry
/// - `Debug`: states appear in recognition path descriptions
/// - `Serialize` + `DeserializeOwned`: recognition paths are serializable
///
/// # Example
///
/// ```rust
/// use adaptive_automata::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Node {
///     Start,
///     Middle,
///     End,
/// }
///
/// fn accepts_state<S: State>(_state: S) {}
///
/// accepts_state(Node::Start);
/// accepts_state("q0".to_string());
/// accepts_state(7u32);
/// ```
pub trait State: Clone + Eq + Hash + Debug + Serialize + DeserializeOwned + 'static {}

impl<T> State for T where T: Clone + Eq + Hash + Debug + Serialize + DeserializeOwned + 'static {}

/// Trait for input symbols.
///
/// Same capabilities as [`State`]; kept as a separate trait so signatures
/// read `S: State, Y: Symbol`.
pub trait Symbol: Clone + Eq + Hash + Debug + Serialize + DeserializeOwned + 'static {}

impl<T> Symbol for T where T: Clone + Eq + Hash + Debug + Serialize + DeserializeOwned + 'static {}
