//! The recognizer front end.

use super::config::RecognizerConfig;
use super::scheduler::Scheduler;
use crate::core::{
    ActionRegistry, RecognitionPath, State, SubmachineRegistry, Symbol, TransitionTable,
};
use crate::error::RecognitionError;
use std::sync::Arc;

/// An adaptive automaton definition plus the paths of its last run.
///
/// The definition is never mutated by recognition. Every call to
/// [`recognize`](Self::recognize) runs over a fresh copy of the transition
/// table, so rewrites made by actions in one run do not leak into the next.
///
/// Use [`AutomatonBuilder`](crate::builder::AutomatonBuilder) to construct
/// one; it validates the definition first.
///
/// The definition is `Send + Sync` whenever its state and symbol types
/// are, so it can be shared across threads. A run itself, driven by a
/// [`Scheduler`], stays on the thread that started it.
pub struct AdaptiveAutomaton<S: State, Y: Symbol> {
    table: TransitionTable<S, Y>,
    submachines: SubmachineRegistry<S>,
    actions: Arc<ActionRegistry<S, Y>>,
    main: String,
    config: RecognizerConfig,
    paths: Vec<RecognitionPath<S>>,
}

impl<S: State, Y: Symbol> AdaptiveAutomaton<S, Y> {
    pub(crate) fn new(
        table: TransitionTable<S, Y>,
        submachines: SubmachineRegistry<S>,
        actions: ActionRegistry<S, Y>,
        main: impl Into<String>,
    ) -> Self {
        Self {
            table,
            submachines,
            actions: Arc::new(actions),
            main: main.into(),
            config: RecognizerConfig::default(),
            paths: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: RecognizerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    pub fn set_stop_at_first_result(&mut self, stop: bool) {
        self.config.stop_at_first_result = stop;
    }

    /// Definition-time transition table.
    pub fn table(&self) -> &TransitionTable<S, Y> {
        &self.table
    }

    pub fn submachines(&self) -> &SubmachineRegistry<S> {
        &self.submachines
    }

    pub fn main_submachine(&self) -> &str {
        &self.main
    }

    /// A scheduler seeded over a fresh copy of the definition, for driving
    /// a run tick by tick.
    pub fn scheduler(&self, input: &[Y]) -> Result<Scheduler<S, Y>, RecognitionError> {
        Scheduler::new(
            self.table.clone(),
            Arc::clone(&self.actions),
            self.submachines.clone(),
            &self.main,
            self.config.clone(),
            input,
        )
    }

    /// Decide whether `input` belongs to the language.
    ///
    /// Returns `Ok(true)` iff at least one path ends accepted. A fatal
    /// error aborts the run; the paths gathered up to that point remain
    /// available through [`recognition_paths`](Self::recognition_paths).
    pub fn recognize(&mut self, input: &[Y]) -> Result<bool, RecognitionError> {
        let mut scheduler = self.scheduler(input)?;
        let result = scheduler.run();
        self.paths = scheduler.into_paths();
        result
    }

    /// Paths of the last run: terminal ones in termination order, then any
    /// left pending by early stop.
    pub fn recognition_paths(&self) -> &[RecognitionPath<S>] {
        &self.paths
    }
}
