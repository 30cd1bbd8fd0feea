//! Call stack snapshots for recursive algorithms
//!
//! Recursive algorithms (quicksort, merge sort, heapsort's sift-down) keep
//! a [`CallStack`] while they run: entering a call pushes the caller's live
//! variables, returning pops them back. Each emitted step embeds a
//! [`FrozenCallStack`], an immutable snapshot that renderers walk without
//! touching the live builder.

use std::rc::Rc;

use super::errors::StepError;
use super::variable::{VarValue, Variable};

/// One saved activation record: a function name plus the caller's variables
/// captured at call time.
#[derive(Debug, Clone, PartialEq)]
pub struct CallFrame {
    pub function: &'static str,
    pub saved: Vec<Variable>,
}

impl CallFrame {
    /// Looks up a saved variable by name.
    pub fn get(&self, name: &str) -> Option<VarValue> {
        self.saved.iter().find(|v| v.name == name).map(|v| v.value)
    }

    /// Looks up a saved variable, failing if the frame does not carry it.
    pub fn restore(&self, name: &'static str) -> Result<VarValue, StepError> {
        self.get(name).ok_or(StepError::MissingSavedVariable {
            function: self.function,
            name,
        })
    }

    /// Restores an integer variable, failing if it is absent or not an
    /// integer.
    pub fn restore_int(&self, name: &'static str) -> Result<i64, StepError> {
        match self.restore(name)? {
            VarValue::Int(n) => Ok(n),
            VarValue::Bool(_) => Err(StepError::MissingSavedVariable {
                function: self.function,
                name,
            }),
        }
    }
}

/// Mutable call-stack builder used while generating steps.
#[derive(Debug, Clone, Default)]
pub struct CallStack {
    frames: Vec<CallFrame>,
}

impl CallStack {
    pub fn new() -> Self {
        CallStack { frames: Vec::new() }
    }

    /// Pushes an activation record carrying the caller's live variables.
    pub fn push(&mut self, function: &'static str, saved: Vec<Variable>) {
        self.frames.push(CallFrame { function, saved });
    }

    /// Pops the top activation record so its saved variables can be
    /// restored.
    pub fn pop(&mut self, function: &'static str) -> Result<CallFrame, StepError> {
        self.frames
            .pop()
            .ok_or(StepError::CallStackUnderflow { function })
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Name of the function on top of the stack, if any.
    pub fn current_function(&self) -> Option<&'static str> {
        self.frames.last().map(|f| f.function)
    }

    /// Immutable snapshot of the stack as it stands right now.
    pub fn freeze(&self) -> FrozenCallStack {
        FrozenCallStack {
            frames: Rc::new(self.frames.clone()),
        }
    }
}

/// Immutable snapshot of the call stack at one recorded step.
///
/// Equality is structural, so two snapshots taken around a step that did
/// not touch the stack compare equal even when allocated separately.
#[derive(Debug, Clone)]
pub struct FrozenCallStack {
    frames: Rc<Vec<CallFrame>>,
}

impl FrozenCallStack {
    /// Frames from the outermost call to the innermost.
    pub fn frames(&self) -> &[CallFrame] {
        &self.frames
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The innermost frame, if any.
    pub fn top(&self) -> Option<&CallFrame> {
        self.frames.last()
    }

    /// Shares the other snapshot's allocation when the two are equal.
    /// Re-applying with the same argument is a no-op.
    pub(crate) fn adopt(&mut self, other: &FrozenCallStack) {
        if Rc::ptr_eq(&self.frames, &other.frames) {
            return;
        }
        if self.frames == other.frames {
            self.frames = Rc::clone(&other.frames);
        }
    }

    /// Whether this snapshot shares its allocation with the other one.
    pub fn shares_with(&self, other: &FrozenCallStack) -> bool {
        Rc::ptr_eq(&self.frames, &other.frames)
    }
}

impl PartialEq for FrozenCallStack {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.frames, &other.frames) || self.frames == other.frames
    }
}
