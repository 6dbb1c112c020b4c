//! One line of non-deterministic recognition and the step that advances it.

use crate::core::{
    ActionCall, ActionRegistry, CallStack, Outcome, PathId, RecognitionPath, State,
    SubmachineRegistry, Symbol, Transition, TransitionKind, TransitionTable,
};
use crate::error::RecognitionError;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// Handles shared by every branch of one recognition run.
///
/// Adaptation is global: a rewrite made by one branch's action is seen by
/// all of them. Stepping is strictly sequential, so the run-local table
/// sits in an `Rc<RefCell<_>>` and a run never leaves its thread. The
/// action registry belongs to the definition instead. It is an `Arc` of
/// `Send + Sync` callbacks so that an [`AdaptiveAutomaton`] stays `Send +
/// Sync` and can be handed to other threads, each starting its own runs.
///
/// [`AdaptiveAutomaton`]: super::AdaptiveAutomaton
#[derive(Clone)]
pub(crate) struct Shared<S: State, Y: Symbol> {
    pub(crate) table: Rc<RefCell<TransitionTable<S, Y>>>,
    pub(crate) actions: Arc<ActionRegistry<S, Y>>,
}

/// Hands out branch and path identifiers in increasing order.
#[derive(Debug, Default)]
pub(crate) struct IdSource {
    next: u64,
}

impl IdSource {
    pub(crate) fn next(&mut self) -> PathId {
        let id = PathId(self.next);
        self.next += 1;
        id
    }
}

/// The move a branch commits on its next step.
#[derive(Clone, Debug)]
pub enum Move<S: State, Y: Symbol> {
    /// Synthetic epsilon move into the main submachine's initial state.
    Start { target: S },
    /// A transition taken from the table.
    Take(Transition<S, Y>),
    /// Synthetic return from an accepting state of a called submachine.
    Return { from: S, to: S },
}

impl<S: State, Y: Symbol> fmt::Display for Move<S, Y> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Start { target } => write!(f, "start -ε-> {target:?}"),
            Move::Take(transition) => write!(f, "{transition}"),
            Move::Return { from, to } => write!(f, "{from:?} -[return]-> {to:?}"),
        }
    }
}

/// What a step did to its branch.
#[derive(Debug)]
pub(crate) enum StepOutcome<S: State, Y: Symbol> {
    /// A single move is pending; step again next tick.
    Continue,
    /// The branch reached a verdict recorded on its path.
    Terminated,
    /// Several moves were possible. One child per move was spawned; the
    /// parent either holds a verdict of its own or is superseded.
    Forked {
        children: Vec<Branch<S, Y>>,
        parent_terminated: bool,
    },
}

enum Finish<S: State, Y: Symbol> {
    Verdict(Outcome),
    Return(Move<S, Y>),
}

/// State of one recognition branch.
///
/// The call stack, submachine registry snapshot, input cursor and control
/// flags are private to the branch and copied on fork. The transition table
/// and action registry are shared.
#[derive(Clone)]
pub struct Branch<S: State, Y: Symbol> {
    path: RecognitionPath<S>,
    shared: Shared<S, Y>,
    submachines: SubmachineRegistry<S>,
    stack: CallStack<S>,
    cursor: usize,
    current_submachine: String,
    main_submachine: String,
    state: Option<S>,
    pending: Move<S, Y>,
    prior_enabled: bool,
}

impl<S: State, Y: Symbol> fmt::Debug for Branch<S, Y> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Branch")
            .field("id", &self.path.id)
            .field("state", &self.state)
            .field("cursor", &self.cursor)
            .field("submachine", &self.current_submachine)
            .field("stack_depth", &self.stack.depth())
            .field("pending", &self.pending.to_string())
            .finish()
    }
}

impl<S: State, Y: Symbol> Branch<S, Y> {
    /// The seed branch: a synthetic move into the main submachine's
    /// initial state, empty stack, cursor at zero.
    pub(crate) fn seed(
        id: PathId,
        shared: Shared<S, Y>,
        submachines: SubmachineRegistry<S>,
        main: &str,
    ) -> Result<Self, RecognitionError> {
        let initial = submachines
            .get(main)
            .ok_or_else(|| RecognitionError::UnknownSubmachine {
                name: main.to_string(),
            })?
            .initial
            .clone();

        let pending = Move::Start { target: initial };
        let mut path = RecognitionPath::new(id);
        path.record(pending.to_string());

        Ok(Self {
            path,
            shared,
            submachines,
            stack: CallStack::new(),
            cursor: 0,
            current_submachine: main.to_string(),
            main_submachine: main.to_string(),
            state: None,
            pending,
            prior_enabled: true,
        })
    }

    pub fn id(&self) -> PathId {
        self.path.id
    }

    /// Current state; `None` before the start move is committed.
    pub fn state(&self) -> Option<&S> {
        self.state.as_ref()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn current_submachine(&self) -> &str {
        &self.current_submachine
    }

    pub fn pending(&self) -> &Move<S, Y> {
        &self.pending
    }

    pub fn path(&self) -> &RecognitionPath<S> {
        &self.path
    }

    pub(crate) fn into_path(self) -> RecognitionPath<S> {
        self.path
    }

    /// Advance this branch by one computational step.
    pub(crate) fn step(
        &mut self,
        input: &[Y],
        ids: &mut IdSource,
    ) -> Result<StepOutcome<S, Y>, RecognitionError> {
        if let Move::Take(transition) = &self.pending {
            let transition = transition.clone();
            if self.prior_enabled {
                if let Some(prior) = &transition.prior {
                    self.run_action(prior, &transition)?;
                }
                self.prior_enabled = false;
            }

            let still_there = self.shared.table.borrow().contains(transition.id);
            if !still_there {
                tracing::warn!(
                    branch = %self.path.id,
                    transition = %transition,
                    "pending transition left the table; re-deriving"
                );
                self.prior_enabled = true;
                return self.derive(transition.source, input, ids);
            }
        }

        let state = self.commit()?;
        self.prior_enabled = true;
        self.derive(state, input, ids)
    }

    /// Apply the pending move and run its post action. Returns the state
    /// the branch arrived at.
    fn commit(&mut self) -> Result<S, RecognitionError> {
        let pending = self.pending.clone();
        tracing::trace!(branch = %self.path.id, step = %pending, "commit");

        let arrived = match &pending {
            Move::Start { target } => target.clone(),
            Move::Return { from, .. } => {
                let frame = self
                    .stack
                    .pop()
                    .ok_or_else(|| RecognitionError::EmptyCallStack {
                        state: format!("{from:?}"),
                    })?;
                self.current_submachine = self
                    .submachines
                    .owner_of(&frame.return_to)
                    .map(str::to_string)
                    .unwrap_or(frame.caller);
                frame.return_to
            }
            Move::Take(transition) => {
                let arrived = match &transition.kind {
                    TransitionKind::Epsilon => transition.target.clone(),
                    TransitionKind::Symbol(_) => {
                        self.cursor += 1;
                        transition.target.clone()
                    }
                    TransitionKind::Call(name) => {
                        let initial = self
                            .submachines
                            .get(name)
                            .ok_or_else(|| RecognitionError::UnknownSubmachine {
                                name: name.clone(),
                            })?
                            .initial
                            .clone();
                        self.stack
                            .push(transition.target.clone(), self.current_submachine.clone());
                        self.current_submachine = name.clone();
                        initial
                    }
                };
                self.state = Some(arrived.clone());
                if let Some(post) = &transition.post {
                    self.run_action(post, transition)?;
                }
                arrived
            }
        };

        self.state = Some(arrived.clone());
        Ok(arrived)
    }

    /// Work out what happens next from `state` and resolve it: terminate,
    /// continue with a single move, or fork.
    fn derive(
        &mut self,
        state: S,
        input: &[Y],
        ids: &mut IdSource,
    ) -> Result<StepOutcome<S, Y>, RecognitionError> {
        let lookahead = input.get(self.cursor);
        let mut moves: Vec<Move<S, Y>> = self
            .shared
            .table
            .borrow()
            .outgoing(&state)
            .filter(|t| t.accepts_lookahead(lookahead))
            .cloned()
            .map(Move::Take)
            .collect();

        let verdict = match self.finish_option(&state, lookahead.is_some()) {
            Some(Finish::Return(ret)) => {
                moves.push(ret);
                None
            }
            Some(Finish::Verdict(outcome)) => Some(outcome),
            None => None,
        };

        tracing::trace!(
            branch = %self.path.id,
            state = ?state,
            candidates = moves.len(),
            verdict = ?verdict,
            "derive"
        );

        match (moves.len(), verdict) {
            (0, verdict) => {
                self.terminate(state, verdict.unwrap_or(Outcome::Rejected));
                Ok(StepOutcome::Terminated)
            }
            (1, None) => {
                if let Some(only) = moves.pop() {
                    self.path.record(only.to_string());
                    self.pending = only;
                }
                Ok(StepOutcome::Continue)
            }
            (_, verdict) => {
                let children: Vec<_> = moves.into_iter().map(|m| self.spawn(ids.next(), m)).collect();
                tracing::debug!(
                    branch = %self.path.id,
                    children = children.len(),
                    parent_verdict = ?verdict,
                    "fork"
                );
                let parent_terminated = match verdict {
                    Some(outcome) => {
                        self.terminate(state, outcome);
                        true
                    }
                    None => false,
                };
                Ok(StepOutcome::Forked {
                    children,
                    parent_terminated,
                })
            }
        }
    }

    /// The implicit finish option of an accepting state.
    fn finish_option(&self, state: &S, more_input: bool) -> Option<Finish<S, Y>> {
        if !self
            .submachines
            .is_accepting(&self.current_submachine, state)
        {
            return None;
        }

        if let Some(frame) = self.stack.peek() {
            return Some(Finish::Return(Move::Return {
                from: state.clone(),
                to: frame.return_to.clone(),
            }));
        }

        let accepted = self.current_submachine == self.main_submachine && !more_input;
        Some(Finish::Verdict(if accepted {
            Outcome::Accepted
        } else {
            Outcome::Rejected
        }))
    }

    fn spawn(&self, id: PathId, pending: Move<S, Y>) -> Self {
        let mut child = self.clone();
        child.path = self.path.fork(id);
        child.path.record(pending.to_string());
        child.pending = pending;
        child
    }

    fn terminate(&mut self, state: S, outcome: Outcome) {
        tracing::trace!(branch = %self.path.id, outcome = ?outcome, "terminate");
        self.state = Some(state.clone());
        self.path
            .finish(outcome, Some(state), self.cursor, self.stack.depth());
    }

    fn run_action(
        &self,
        call: &ActionCall<S, Y>,
        trigger: &Transition<S, Y>,
    ) -> Result<(), RecognitionError> {
        let mut table = self.shared.table.borrow_mut();
        self.shared
            .actions
            .invoke(&call.name, &mut table, trigger, &call.args)
    }
}
