//! Call stack tracking for the evaluator.
//!
//! Each user-function call pushes a [`CallFrame`]; the depth check that
//! turns runaway recursion into a `StackOverflow` error is part of
//! [`CallStack::push`]. When an error escapes a call, the stack is
//! snapshotted into an [`EvalBacktrace`].

use bpl_ir::{Name, Position, StringInterner};

use crate::errors::{recursion_limit_exceeded, BacktraceFrame, EvalBacktrace, EvalError};

/// A single frame in the live call stack.
#[derive(Clone, Copy, Debug)]
pub struct CallFrame {
    /// Interned function name.
    pub name: Name,
    /// Position of the call site.
    pub call_pos: Position,
}

/// Live call stack for the interpreter.
#[derive(Clone, Debug)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: usize,
}

impl CallStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a call frame, checking the depth limit.
    ///
    /// The frame is not pushed on overflow.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if self.frames.len() >= self.max_depth {
            return Err(recursion_limit_exceeded(self.max_depth));
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) {
        debug_assert!(
            !self.frames.is_empty(),
            "CallStack::pop() called on empty stack"
        );
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Snapshot the stack, most recent call first.
    pub fn capture(&self, interner: &StringInterner) -> EvalBacktrace {
        let frames = self
            .frames
            .iter()
            .rev()
            .map(|frame| BacktraceFrame {
                name: interner.lookup(frame.name).to_owned(),
                call_pos: Some(frame.call_pos),
            })
            .collect();
        EvalBacktrace::new(frames)
    }
}
