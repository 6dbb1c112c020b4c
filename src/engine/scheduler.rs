//! Single-threaded driver for the population of recognition branches.

use super::branch::{Branch, IdSource, Shared, StepOutcome};
use super::config::RecognizerConfig;
use crate::core::{
    ActionRegistry, RecognitionPath, State, SubmachineRegistry, Symbol, TransitionTable,
};
use crate::error::RecognitionError;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

/// Runs one step of every live branch per tick until none remain.
///
/// Branches are stepped in id-ascending order. Children spawned during a
/// tick get fresh, larger ids and are appended behind the surviving
/// branches, so the order holds from tick to tick. Paths are collected in
/// the order their branches terminated.
///
/// # Example
///
/// ```rust
/// use adaptive_automata::builder::{AutomatonBuilder, TransitionBuilder};
///
/// let automaton = AutomatonBuilder::<u32, char>::new()
///     .submachine("Main", 0, [0, 1, 2], [1, 2])
///     .main("Main")
///     .transition(TransitionBuilder::new().from(0).epsilon().to(1))
///     .transition(TransitionBuilder::new().from(0).epsilon().to(2))
///     .build()
///     .unwrap();
///
/// let mut scheduler = automaton.scheduler(&[]).unwrap();
/// scheduler.tick().unwrap();
/// assert_eq!(scheduler.live_branches().len(), 2);
///
/// scheduler.run().unwrap();
/// assert_eq!(scheduler.finished_paths().len(), 2);
/// assert!(scheduler.accepted());
/// ```
pub struct Scheduler<S: State, Y: Symbol> {
    input: Vec<Y>,
    live: Vec<Branch<S, Y>>,
    finished: Vec<RecognitionPath<S>>,
    ids: IdSource,
    config: RecognizerConfig,
    ticks: usize,
}

impl<S: State, Y: Symbol> Scheduler<S, Y> {
    /// Seed a run over a private copy of `table`.
    pub(crate) fn new(
        table: TransitionTable<S, Y>,
        actions: Arc<ActionRegistry<S, Y>>,
        submachines: SubmachineRegistry<S>,
        main: &str,
        config: RecognizerConfig,
        input: &[Y],
    ) -> Result<Self, RecognitionError> {
        let shared = Shared {
            table: Rc::new(RefCell::new(table)),
            actions,
        };
        let mut ids = IdSource::default();
        let seed = Branch::seed(ids.next(), shared, submachines, main)?;

        Ok(Self {
            input: input.to_vec(),
            live: vec![seed],
            finished: Vec::new(),
            ids,
            config,
            ticks: 0,
        })
    }

    /// Step every live branch once.
    ///
    /// Terminated branches leave the live set and their paths are kept;
    /// branches superseded by a fork are dropped. Any fatal error aborts the
    /// tick and the run. The branches still pending at that point, the
    /// failing one included, stay in the live set.
    pub fn tick(&mut self) -> Result<(), RecognitionError> {
        if let Some(limit) = self.config.tick_limit {
            if self.ticks >= limit {
                return Err(RecognitionError::TickLimitExceeded { limit });
            }
        }
        self.ticks += 1;

        let mut current = std::mem::take(&mut self.live).into_iter();
        let mut survivors = Vec::with_capacity(current.len());
        let mut spawned = Vec::new();

        while let Some(mut branch) = current.next() {
            let outcome = match branch.step(&self.input, &mut self.ids) {
                Ok(outcome) => outcome,
                Err(error) => {
                    tracing::debug!(branch = %branch.id(), error = %error, "step failed");
                    survivors.push(branch);
                    survivors.extend(current.by_ref());
                    survivors.extend(spawned);
                    self.live = survivors;
                    return Err(error);
                }
            };
            match outcome {
                StepOutcome::Continue => survivors.push(branch),
                StepOutcome::Terminated => self.finished.push(branch.into_path()),
                StepOutcome::Forked {
                    children,
                    parent_terminated,
                } => {
                    if parent_terminated {
                        self.finished.push(branch.into_path());
                    }
                    spawned.extend(children);
                }
            }
        }

        survivors.extend(spawned);
        self.live = survivors;
        Ok(())
    }

    /// Whether scheduling is over: no live branches, or early stop is on
    /// and some path already has a verdict.
    pub fn is_done(&self) -> bool {
        self.live.is_empty() || (self.config.stop_at_first_result && !self.finished.is_empty())
    }

    /// Tick until done. Returns whether any path was accepted.
    pub fn run(&mut self) -> Result<bool, RecognitionError> {
        let span = tracing::debug_span!("recognize", input_len = self.input.len());
        let _enter = span.enter();

        tracing::debug!(
            stop_at_first_result = self.config.stop_at_first_result,
            "recognition started"
        );
        while !self.is_done() {
            self.tick()?;
        }

        let accepted = self.accepted();
        tracing::debug!(
            ticks = self.ticks,
            paths = self.finished.len(),
            pending = self.live.len(),
            accepted,
            "recognition finished"
        );
        Ok(accepted)
    }

    pub fn live_branches(&self) -> &[Branch<S, Y>] {
        &self.live
    }

    /// Terminal paths in termination order.
    pub fn finished_paths(&self) -> &[RecognitionPath<S>] {
        &self.finished
    }

    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// True iff some terminal path was accepted.
    pub fn accepted(&self) -> bool {
        self.finished.iter().any(RecognitionPath::is_accepted)
    }

    /// Terminal paths followed by the paths of branches still live.
    pub fn into_paths(self) -> Vec<RecognitionPath<S>> {
        let mut paths = self.finished;
        paths.extend(self.live.into_iter().map(Branch::into_path));
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ActionCall, NewTransition, Outcome, PathId, Submachine};

    fn scheduler(
        table: TransitionTable<u32, char>,
        config: RecognizerConfig,
        input: &[char],
    ) -> Scheduler<u32, char> {
        let mut submachines = SubmachineRegistry::new();
        submachines.register(Submachine::new("Main", 0, [0, 1, 2, 3], [2]));
        Scheduler::new(
            table,
            Arc::new(ActionRegistry::new()),
            submachines,
            "Main",
            config,
            input,
        )
        .unwrap()
    }

    #[test]
    fn unknown_main_fails_at_seed() {
        let result = Scheduler::<u32, char>::new(
            TransitionTable::new(),
            Arc::new(ActionRegistry::new()),
            SubmachineRegistry::new(),
            "Main",
            RecognizerConfig::default(),
            &[],
        );
        assert!(matches!(
            result,
            Err(RecognitionError::UnknownSubmachine { .. })
        ));
    }

    #[test]
    fn live_branches_stay_id_ascending() {
        let mut table = TransitionTable::new();
        table.insert(NewTransition::epsilon(0, 1));
        table.insert(NewTransition::epsilon(0, 3));
        table.insert(NewTransition::epsilon(1, 2));
        table.insert(NewTransition::epsilon(1, 3));
        let mut sched = scheduler(table, RecognizerConfig::default(), &[]);

        sched.tick().unwrap();
        sched.tick().unwrap();

        let ids: Vec<PathId> = sched.live_branches().iter().map(Branch::id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
        assert_eq!(ids, vec![PathId(3), PathId(4)]);
    }

    #[test]
    fn rejected_branches_are_kept_superseded_are_dropped() {
        let mut table = TransitionTable::new();
        table.insert(NewTransition::epsilon(0, 1));
        table.insert(NewTransition::epsilon(0, 2));
        let mut sched = scheduler(table, RecognizerConfig::default(), &[]);

        assert!(sched.run().unwrap());

        let outcomes: Vec<_> = sched.finished_paths().iter().map(|p| (p.id, p.outcome)).collect();
        assert_eq!(
            outcomes,
            vec![(PathId(1), Outcome::Rejected), (PathId(2), Outcome::Accepted)]
        );
    }

    #[test]
    fn early_stop_finishes_the_tick() {
        let mut table = TransitionTable::new();
        table.insert(NewTransition::epsilon(0, 1));
        table.insert(NewTransition::epsilon(0, 3));
        table.insert(NewTransition::epsilon(3, 2));
        let config = RecognizerConfig::new().stop_at_first_result(true);
        let mut sched = scheduler(table, config, &[]);

        assert!(!sched.run().unwrap());
        assert_eq!(sched.ticks(), 2);
        assert_eq!(sched.finished_paths().len(), 1);
        assert_eq!(sched.live_branches().len(), 1);

        let paths = sched.into_paths();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[1].outcome, Outcome::Pending);
    }

    #[test]
    fn tick_limit_aborts_cycles() {
        let mut table = TransitionTable::new();
        table.insert(NewTransition::epsilon(0, 1));
        table.insert(NewTransition::epsilon(1, 0));
        let config = RecognizerConfig::new().tick_limit(50);
        let mut sched = scheduler(table, config, &[]);

        let result = sched.run();
        assert!(matches!(
            result,
            Err(RecognitionError::TickLimitExceeded { limit: 50 })
        ));
        assert_eq!(sched.ticks(), 50);
    }

    #[test]
    fn fatal_error_leaves_pending_branches_live() {
        let mut table = TransitionTable::new();
        table.insert(NewTransition::epsilon(0, 1));
        table.insert(NewTransition::epsilon(0, 3).with_post(ActionCall::bare("ghost")));
        table.insert(NewTransition::epsilon(1, 2));
        let mut sched = scheduler(table, RecognizerConfig::default(), &[]);

        sched.tick().unwrap();
        let result = sched.tick();

        assert!(matches!(result, Err(RecognitionError::UnknownAction { .. })));
        let ids: Vec<PathId> = sched.live_branches().iter().map(Branch::id).collect();
        assert_eq!(ids, vec![PathId(1), PathId(2)]);

        let paths = sched.into_paths();
        assert_eq!(paths.len(), 2);
        assert!(paths.iter().all(|p| p.outcome == Outcome::Pending));
    }
}
