//! Builder for constructing adaptive automata.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::builder::validation::{Definition, DefinitionCheck};
use crate::core::{
    ActionRegistry, Arg, NewTransition, State, Submachine, SubmachineRegistry, Symbol,
    Transition, TransitionTable,
};
use crate::engine::{AdaptiveAutomaton, RecognizerConfig};
use crate::error::ActionError;
use stillwater::validation::Validation;

/// Builder for constructing adaptive automata with a fluent API.
///
/// Problems are not reported as they are added. [`build`](Self::build)
/// validates the whole definition and reports every violation at once.
pub struct AutomatonBuilder<S: State, Y: Symbol> {
    submachines: Vec<Submachine<S>>,
    main: Option<String>,
    transitions: Vec<Result<NewTransition<S, Y>, BuildError>>,
    actions: ActionRegistry<S, Y>,
    config: RecognizerConfig,
}

impl<S: State, Y: Symbol> AutomatonBuilder<S, Y> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            submachines: Vec::new(),
            main: None,
            transitions: Vec::new(),
            actions: ActionRegistry::new(),
            config: RecognizerConfig::default(),
        }
    }

    /// Declare a submachine by name, initial state, states and accepting
    /// states.
    pub fn submachine(
        mut self,
        name: impl Into<String>,
        initial: S,
        states: impl IntoIterator<Item = S>,
        accepting: impl IntoIterator<Item = S>,
    ) -> Self {
        self.submachines
            .push(Submachine::new(name, initial, states, accepting));
        self
    }

    /// Add a pre-built submachine.
    pub fn add_submachine(mut self, submachine: Submachine<S>) -> Self {
        self.submachines.push(submachine);
        self
    }

    /// Name the main submachine (required).
    pub fn main(mut self, name: impl Into<String>) -> Self {
        self.main = Some(name.into());
        self
    }

    /// Add a transition using a builder.
    pub fn transition(mut self, builder: TransitionBuilder<S, Y>) -> Self {
        self.transitions.push(builder.build());
        self
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: NewTransition<S, Y>) -> Self {
        self.transitions.push(Ok(transition));
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(mut self, transitions: Vec<NewTransition<S, Y>>) -> Self {
        self.transitions.extend(transitions.into_iter().map(Ok));
        self
    }

    /// Register an adaptive action under `name`.
    pub fn action<F>(mut self, name: impl Into<String>, action: F) -> Self
    where
        F: Fn(&mut TransitionTable<S, Y>, &Transition<S, Y>, &[Arg<S, Y>]) -> Result<(), ActionError>
            + Send
            + Sync
            + 'static,
    {
        self.actions.register(name, action);
        self
    }

    pub fn config(mut self, config: RecognizerConfig) -> Self {
        self.config = config;
        self
    }

    /// Check the definition without building it.
    pub fn validate(&self) -> DefinitionCheck {
        Definition {
            submachines: &self.submachines,
            main: self.main.as_deref(),
            transitions: &self.transitions,
            actions: &self.actions,
        }
        .validate()
    }

    /// Build the automaton.
    /// Returns `BuildError::Invalid` with every violation if the definition
    /// does not validate.
    pub fn build(self) -> Result<AdaptiveAutomaton<S, Y>, BuildError> {
        if let Validation::Failure(errors) = self.validate() {
            return Err(BuildError::Invalid(errors.iter().cloned().collect()));
        }

        let mut registry = SubmachineRegistry::new();
        for submachine in self.submachines {
            registry.register(submachine);
        }

        let mut table = TransitionTable::new();
        for transition in self.transitions.into_iter().flatten() {
            table.insert(transition);
        }

        let main = self.main.unwrap_or_default();
        tracing::debug!(
            main = %main,
            submachines = registry.len(),
            transitions = table.len(),
            actions = self.actions.len(),
            "automaton built"
        );

        Ok(AdaptiveAutomaton::new(table, registry, self.actions, main).with_config(self.config))
    }
}

impl<S: State, Y: Symbol> Default for AutomatonBuilder<S, Y> {
    fn default() -> Self {
        Self::new()
    }
}
