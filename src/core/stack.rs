//! Call stack of return addresses for submachine calls.

use super::state::State;
use serde::{Deserialize, Serialize};

/// One pending submachine call.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Frame<S: State> {
    /// State to resume at when the callee returns.
    pub return_to: S,
    /// Submachine that was active when the call was made.
    pub caller: String,
}

/// LIFO of return frames, private to one branch.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct CallStack<S: State> {
    frames: Vec<Frame<S>>,
}

impl<S: State> Default for CallStack<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> CallStack<S> {
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    pub fn push(&mut self, return_to: S, caller: impl Into<String>) {
        self.frames.push(Frame {
            return_to,
            caller: caller.into(),
        });
    }

    pub fn pop(&mut self) -> Option<Frame<S>> {
        self.frames.pop()
    }

    pub fn peek(&self) -> Option<&Frame<S>> {
        self.frames.last()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_reverse_order() {
        let mut stack = CallStack::new();
        stack.push("r1".to_string(), "Main");
        stack.push("r2".to_string(), "Sub");

        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.peek().map(|f| f.return_to.as_str()), Some("r2"));

        let top = stack.pop().unwrap();
        assert_eq!(top.return_to, "r2");
        assert_eq!(top.caller, "Sub");
        assert_eq!(stack.pop().unwrap().return_to, "r1");
        assert!(stack.pop().is_none());
        assert!(stack.is_empty());
    }

    #[test]
    fn clones_do_not_alias() {
        let mut stack = CallStack::new();
        stack.push(1u32, "Main");
        let mut copy = stack.clone();
        copy.pop();

        assert_eq!(stack.depth(), 1);
        assert_eq!(copy.depth(), 0);
    }
}
