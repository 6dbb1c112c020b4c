//! Partially bound transition patterns.

use super::variable::Variable;
use crate::core::{ActionCall, Arg, NewTransition, State, Symbol, Transition, TransitionKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Names a role of a pattern, used to report unbound variables.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Role {
    Source,
    Label,
    Target,
    PriorName,
    PriorArg(usize),
    PostName,
    PostArg(usize),
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Source => write!(f, "source"),
            Role::Label => write!(f, "label"),
            Role::Target => write!(f, "target"),
            Role::PriorName => write!(f, "prior action name"),
            Role::PriorArg(i) => write!(f, "prior action argument {i}"),
            Role::PostName => write!(f, "post action name"),
            Role::PostArg(i) => write!(f, "post action argument {i}"),
        }
    }
}

/// The middle role of a transition pattern.
///
/// The symbol family covers epsilon and symbol-consuming transitions, with
/// `None` standing for epsilon. The call family covers submachine calls and
/// binds the called submachine's name.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub enum LabelRole<Y: Symbol> {
    Symbol(Variable<Option<Y>>),
    Call(Variable<String>),
}

impl<Y: Symbol> LabelRole<Y> {
    /// Bound symbols of the symbol family (`None` is epsilon).
    pub fn symbols(&self) -> Option<&[Option<Y>]> {
        match self {
            LabelRole::Symbol(var) => var.values(),
            LabelRole::Call(_) => None,
        }
    }

    /// Bound submachine names of the call family.
    pub fn submachines(&self) -> Option<&[String]> {
        match self {
            LabelRole::Call(var) => var.values(),
            LabelRole::Symbol(_) => None,
        }
    }

    fn matches(&self, kind: &TransitionKind<Y>) -> bool {
        match (self, kind) {
            (LabelRole::Symbol(var), TransitionKind::Epsilon) => var.matches(&None),
            (LabelRole::Symbol(var), TransitionKind::Symbol(symbol)) => {
                var.matches(&Some(symbol.clone()))
            }
            (LabelRole::Call(var), TransitionKind::Call(name)) => var.matches(name),
            _ => false,
        }
    }

    fn fill<S: State>(&mut self, selected: &[&Transition<S, Y>]) {
        match self {
            LabelRole::Symbol(var) => var.fill(selected.iter().filter_map(|t| match &t.kind {
                TransitionKind::Epsilon => Some(None),
                TransitionKind::Symbol(symbol) => Some(Some(symbol.clone())),
                TransitionKind::Call(_) => None,
            })),
            LabelRole::Call(var) => var.fill(
                selected
                    .iter()
                    .filter_map(|t| t.kind.called().map(str::to_string)),
            ),
        }
    }

    fn is_free(&self) -> bool {
        match self {
            LabelRole::Symbol(var) => var.is_free(),
            LabelRole::Call(var) => var.is_free(),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            LabelRole::Symbol(var) => var.is_empty(),
            LabelRole::Call(var) => var.is_empty(),
        }
    }

    fn kinds(&self) -> Vec<TransitionKind<Y>> {
        match self {
            LabelRole::Symbol(var) => var
                .values()
                .unwrap_or_default()
                .iter()
                .map(|symbol| match symbol {
                    Some(symbol) => TransitionKind::Symbol(symbol.clone()),
                    None => TransitionKind::Epsilon,
                })
                .collect(),
            LabelRole::Call(var) => var
                .values()
                .unwrap_or_default()
                .iter()
                .map(|name| TransitionKind::Call(name.clone()))
                .collect(),
        }
    }
}

/// Pattern over an action role: its name plus positional arguments.
///
/// With a non-empty argument list a stored action only matches when its
/// argument count is the same; with no arguments the count is not checked.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct ActionQuery<S: State, Y: Symbol> {
    pub name: Variable<String>,
    pub args: Vec<Variable<Arg<S, Y>>>,
}

impl<S: State, Y: Symbol> ActionQuery<S, Y> {
    pub fn new(name: Variable<String>, args: Vec<Variable<Arg<S, Y>>>) -> Self {
        Self { name, args }
    }

    /// Any action, whatever its name and arguments.
    pub fn any() -> Self {
        Self::new(Variable::Free, Vec::new())
    }

    /// The named action, whatever its arguments.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(Variable::one(name.into()), Vec::new())
    }

    fn matches(&self, call: &ActionCall<S, Y>) -> bool {
        if !self.name.matches(&call.name) {
            return false;
        }
        if self.args.is_empty() {
            return true;
        }
        call.args.len() == self.args.len()
            && self
                .args
                .iter()
                .zip(&call.args)
                .all(|(var, arg)| var.matches(arg))
    }

    fn fill(&mut self, calls: &[&ActionCall<S, Y>]) {
        self.name.fill(calls.iter().map(|c| c.name.clone()));
        for (i, var) in self.args.iter_mut().enumerate() {
            var.fill(calls.iter().filter_map(|c| c.args.get(i).cloned()));
        }
    }

    fn first_free(&self, name_role: Role, arg_role: fn(usize) -> Role) -> Option<Role> {
        if self.name.is_free() {
            return Some(name_role);
        }
        self.args.iter().position(Variable::is_free).map(arg_role)
    }

    fn any_empty(&self) -> bool {
        self.name.is_empty() || self.args.iter().any(Variable::is_empty)
    }

    /// Every action call in the cartesian product of name and argument sets.
    fn calls(&self) -> Vec<ActionCall<S, Y>> {
        let names = self.name.values().unwrap_or_default();
        let mut tuples: Vec<Vec<Arg<S, Y>>> = vec![Vec::new()];
        for var in &self.args {
            let values = var.values().unwrap_or_default();
            tuples = tuples
                .into_iter()
                .flat_map(|prefix| {
                    values.iter().map(move |value| {
                        let mut tuple = prefix.clone();
                        tuple.push(value.clone());
                        tuple
                    })
                })
                .collect();
        }
        names
            .iter()
            .flat_map(|name| {
                tuples
                    .iter()
                    .map(move |args| ActionCall::new(name.clone(), args.clone()))
            })
            .collect()
    }
}

/// A transition pattern: one variable per role.
///
/// An absent action role (`prior`/`post` set to `None`) matches only
/// transitions without that action, and `add` creates transitions without
/// it. Use [`ActionQuery::any`] to accept any action.
///
/// # Example
///
/// ```rust
/// use adaptive_automata::core::{NewTransition, TransitionTable};
/// use adaptive_automata::query::{Pattern, Variable};
///
/// let mut table: TransitionTable<String, char> = TransitionTable::new();
/// table.insert(NewTransition::symbol("q0".into(), 'a', "q1".into()));
/// table.insert(NewTransition::symbol("q0".into(), 'b', "q2".into()));
///
/// // Which states does q0 reach on 'a'?
/// let mut pattern = Pattern::symbol(
///     Variable::one("q0".to_string()),
///     Variable::one(Some('a')),
///     Variable::Free,
/// );
/// table.query(&mut pattern);
///
/// assert_eq!(pattern.target.values(), Some(&["q1".to_string()][..]));
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Pattern<S: State, Y: Symbol> {
    pub source: Variable<S>,
    pub label: LabelRole<Y>,
    pub target: Variable<S>,
    pub prior: Option<ActionQuery<S, Y>>,
    pub post: Option<ActionQuery<S, Y>>,
}

impl<S: State, Y: Symbol> Pattern<S, Y> {
    /// Pattern over epsilon and symbol transitions.
    pub fn symbol(source: Variable<S>, symbol: Variable<Option<Y>>, target: Variable<S>) -> Self {
        Self {
            source,
            label: LabelRole::Symbol(symbol),
            target,
            prior: None,
            post: None,
        }
    }

    /// Pattern over submachine call transitions.
    pub fn call(source: Variable<S>, submachine: Variable<String>, target: Variable<S>) -> Self {
        Self {
            source,
            label: LabelRole::Call(submachine),
            target,
            prior: None,
            post: None,
        }
    }

    pub fn with_prior(mut self, action: ActionQuery<S, Y>) -> Self {
        self.prior = Some(action);
        self
    }

    pub fn with_post(mut self, action: ActionQuery<S, Y>) -> Self {
        self.post = Some(action);
        self
    }

    /// Conjunction of every role predicate.
    pub fn matches(&self, transition: &Transition<S, Y>) -> bool {
        self.source.matches(&transition.source)
            && self.label.matches(&transition.kind)
            && self.target.matches(&transition.target)
            && action_matches(self.prior.as_ref(), transition.prior.as_ref())
            && action_matches(self.post.as_ref(), transition.post.as_ref())
    }

    /// Replace every free role with its projection over `selected`.
    pub(crate) fn fill(&mut self, selected: &[&Transition<S, Y>]) {
        self.source
            .fill(selected.iter().map(|t| t.source.clone()));
        self.label.fill(selected);
        self.target
            .fill(selected.iter().map(|t| t.target.clone()));
        if let Some(prior) = &mut self.prior {
            let calls: Vec<_> = selected.iter().filter_map(|t| t.prior.as_ref()).collect();
            prior.fill(&calls);
        }
        if let Some(post) = &mut self.post {
            let calls: Vec<_> = selected.iter().filter_map(|t| t.post.as_ref()).collect();
            post.fill(&calls);
        }
    }

    /// The first role, in role order, that is still free.
    pub fn first_free(&self) -> Option<Role> {
        if self.source.is_free() {
            return Some(Role::Source);
        }
        if self.label.is_free() {
            return Some(Role::Label);
        }
        if self.target.is_free() {
            return Some(Role::Target);
        }
        if let Some(role) = self
            .prior
            .as_ref()
            .and_then(|p| p.first_free(Role::PriorName, Role::PriorArg))
        {
            return Some(role);
        }
        self.post
            .as_ref()
            .and_then(|p| p.first_free(Role::PostName, Role::PostArg))
    }

    /// Whether some role is bound to an empty set.
    pub fn any_empty(&self) -> bool {
        self.source.is_empty()
            || self.label.is_empty()
            || self.target.is_empty()
            || self.prior.as_ref().is_some_and(ActionQuery::any_empty)
            || self.post.as_ref().is_some_and(ActionQuery::any_empty)
    }

    /// The cartesian product of all role sets as new transitions.
    ///
    /// Expects every role to be bound; free roles contribute no values.
    /// Repeated tuples are emitted once, even when a variable was built
    /// from a list with duplicates.
    pub(crate) fn expand(&self) -> Vec<NewTransition<S, Y>> {
        let sources = self.source.values().unwrap_or_default();
        let kinds = self.label.kinds();
        let targets = self.target.values().unwrap_or_default();
        let priors = optional_calls(self.prior.as_ref());
        let posts = optional_calls(self.post.as_ref());

        let mut expanded = Vec::new();
        for source in sources {
            for kind in &kinds {
                for target in targets {
                    for prior in &priors {
                        for post in &posts {
                            let candidate = NewTransition {
                                source: source.clone(),
                                kind: kind.clone(),
                                target: target.clone(),
                                prior: prior.clone(),
                                post: post.clone(),
                            };
                            if !expanded.contains(&candidate) {
                                expanded.push(candidate);
                            }
                        }
                    }
                }
            }
        }
        expanded
    }
}

fn action_matches<S: State, Y: Symbol>(
    query: Option<&ActionQuery<S, Y>>,
    call: Option<&ActionCall<S, Y>>,
) -> bool {
    match (query, call) {
        (None, None) => true,
        (Some(query), Some(call)) => query.matches(call),
        _ => false,
    }
}

fn optional_calls<S: State, Y: Symbol>(
    query: Option<&ActionQuery<S, Y>>,
) -> Vec<Option<ActionCall<S, Y>>> {
    match query {
        None => vec![None],
        Some(query) => query.calls().into_iter().map(Some).collect(),
    }
}
