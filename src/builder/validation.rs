//! Definition checks using Validation.
//!
//! Every check runs, and every violation is reported; nothing stops at the
//! first problem.

use crate::builder::error::{BuildError, DefinitionError};
use crate::core::{ActionRegistry, NewTransition, State, Submachine, Symbol};
use std::collections::{HashMap, HashSet};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Result of a definition check.
pub type DefinitionCheck = Validation<(), NonEmptyVec<DefinitionError>>;

/// Everything an automaton definition is made of, borrowed for checking.
pub(crate) struct Definition<'a, S: State, Y: Symbol> {
    pub(crate) submachines: &'a [Submachine<S>],
    pub(crate) main: Option<&'a str>,
    pub(crate) transitions: &'a [Result<NewTransition<S, Y>, BuildError>],
    pub(crate) actions: &'a ActionRegistry<S, Y>,
}

impl<S: State, Y: Symbol> Definition<'_, S, Y> {
    /// Run all checks, accumulating ALL violations.
    pub(crate) fn validate(&self) -> DefinitionCheck {
        let mut checks: Vec<DefinitionCheck> = Vec::new();

        checks.push(self.check_main());
        checks.extend(self.check_submachines());
        checks.extend(self.check_transitions());

        Validation::all_vec(checks).map(|_| ())
    }

    fn check_main(&self) -> DefinitionCheck {
        match self.main {
            None => Validation::fail(DefinitionError::MissingMain),
            Some(name) if !self.submachines.iter().any(|m| m.name == name) => {
                Validation::fail(DefinitionError::UnknownMain {
                    name: name.to_string(),
                })
            }
            Some(_) => Validation::success(()),
        }
    }

    fn check_submachines(&self) -> Vec<DefinitionCheck> {
        let mut checks = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut owners: HashMap<&S, &str> = HashMap::new();

        for submachine in self.submachines {
            if !seen.insert(submachine.name.as_str()) {
                checks.push(Validation::fail(DefinitionError::DuplicateSubmachine {
                    name: submachine.name.clone(),
                }));
                continue;
            }

            if !submachine.contains(&submachine.initial) {
                checks.push(Validation::fail(DefinitionError::InitialNotInStates {
                    submachine: submachine.name.clone(),
                    state: format!("{:?}", submachine.initial),
                }));
            }

            for state in submachine.accepting.difference(&submachine.states) {
                checks.push(Validation::fail(DefinitionError::AcceptingNotInStates {
                    submachine: submachine.name.clone(),
                    state: format!("{state:?}"),
                }));
            }

            for state in &submachine.states {
                if let Some(first) = owners.insert(state, submachine.name.as_str()) {
                    checks.push(Validation::fail(DefinitionError::OverlappingStates {
                        state: format!("{state:?}"),
                        first: first.to_string(),
                        second: submachine.name.clone(),
                    }));
                }
            }
        }

        checks
    }

    fn check_transitions(&self) -> Vec<DefinitionCheck> {
        let mut checks = Vec::new();

        for (index, transition) in self.transitions.iter().enumerate() {
            let transition = match transition {
                Ok(transition) => transition,
                Err(reason) => {
                    checks.push(Validation::fail(DefinitionError::IncompleteTransition {
                        index,
                        reason: reason.clone(),
                    }));
                    continue;
                }
            };

            for action in [&transition.prior, &transition.post].into_iter().flatten() {
                if !self.actions.contains(&action.name) {
                    checks.push(Validation::fail(DefinitionError::UnknownAction {
                        index,
                        name: action.name.clone(),
                    }));
                }
            }

            if let Some(called) = transition.kind.called() {
                if !self.submachines.iter().any(|m| m.name == called) {
                    checks.push(Validation::fail(DefinitionError::UnknownSubmachine {
                        index,
                        name: called.to_string(),
                    }));
                }
            }
        }

        checks
    }
}
