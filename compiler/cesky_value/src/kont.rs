//! Continuation frames.
//!
//! A continuation is either [`Kont::Terminal`] or a frame describing the
//! work that remains once the current expression has a value, linked to the
//! continuation after it. Frames are never mutated after construction, so
//! capturing a continuation is a reference-count bump and a captured chain
//! can be resumed any number of times.

use crate::{Env, Value};
use cesky_ir::Symbol;
use std::rc::Rc;

#[derive(Clone, Default)]
pub enum Kont {
    /// Nothing left to do in this (sub)computation.
    #[default]
    Terminal,
    Frame(Rc<Frame>),
}

pub struct Frame {
    pub kind: FrameKind,
    /// Environment the frame's pending expressions evaluate in.
    pub env: Env,
    pub next: Kont,
}

pub enum FrameKind {
    /// Evaluating an application left to right. `collected` holds the values
    /// produced so far, most recent first; `remaining` the expressions still
    /// to evaluate.
    Apply { collected: Value, remaining: Value },
    If { then: Value, otherwise: Value },
    /// Expressions after the one being evaluated; never empty.
    Begin { remaining: Value },
    Let { name: Symbol, body: Value },
    /// Bind the produced value at top level.
    Define { name: Symbol },
}

impl Kont {
    /// Push a frame on top of `next`.
    pub fn push(kind: FrameKind, env: Env, next: Kont) -> Kont {
        Kont::Frame(Rc::new(Frame { kind, env, next }))
    }

    /// Same frame chain.
    pub fn ptr_eq(&self, other: &Kont) -> bool {
        match (self, other) {
            (Kont::Terminal, Kont::Terminal) => true,
            (Kont::Frame(a), Kont::Frame(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Number of frames before `Terminal`.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut cursor = self;
        while let Kont::Frame(frame) = cursor {
            depth += 1;
            cursor = &frame.next;
        }
        depth
    }
}

impl Drop for Frame {
    // Deep non-tail recursion builds long chains; release them iteratively.
    fn drop(&mut self) {
        let mut next = std::mem::take(&mut self.next);
        while let Kont::Frame(rc) = next {
            match Rc::try_unwrap(rc) {
                Ok(mut frame) => next = std::mem::take(&mut frame.next),
                Err(_) => break,
            }
        }
    }
}
