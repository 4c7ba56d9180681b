//! Value transitions: deliver a value to the top continuation frame.

use super::{Control, Machine};
use cesky_value::{EvalError, FrameKind, Kont, Value};
use smallvec::SmallVec;
use tracing::trace;

/// Operator and operands of a saturated application.
pub(super) type Args = SmallVec<[Value; 4]>;

impl Machine {
    /// Returns the final value once both the continuation and the meta
    /// stack are exhausted.
    pub(super) fn resume(&mut self, value: Value) -> Result<Option<Value>, EvalError> {
        let frame = match std::mem::take(&mut self.state.k) {
            Kont::Frame(frame) => frame,
            Kont::Terminal => {
                let Some(meta) = self.state.meta.pop() else {
                    return Ok(Some(value));
                };
                trace!(
                    tag = ?meta.tag,
                    depth = self.state.meta.len(),
                    "meta pop"
                );
                self.state.k = meta.k;
                self.state.control = Control::Return(value);
                return Ok(None);
            }
        };

        match &frame.kind {
            FrameKind::Apply {
                collected,
                remaining,
            } => {
                let collected = Value::cons(value, collected.clone());
                if let Value::Pair(next) = remaining {
                    self.state.env = frame.env.clone();
                    self.state.k = Kont::push(
                        FrameKind::Apply {
                            collected,
                            remaining: next.cdr(),
                        },
                        frame.env.clone(),
                        frame.next.clone(),
                    );
                    self.state.control = Control::Eval(next.car());
                } else {
                    self.state.k = frame.next.clone();
                    let mut args: Args = collected.iter_list().collect();
                    args.reverse();
                    let operator = args.remove(0);
                    self.apply(operator, args)?;
                }
            }
            FrameKind::If { then, otherwise } => {
                let branch = if value.is_truthy() { then } else { otherwise };
                self.state.env = frame.env.clone();
                self.state.k = frame.next.clone();
                self.state.control = Control::Eval(branch.clone());
            }
            FrameKind::Begin { remaining } => {
                self.state.env = frame.env.clone();
                let (head, rest) = match remaining {
                    Value::Pair(pair) => (pair.car(), pair.cdr()),
                    other => (other.clone(), Value::Null),
                };
                self.state.k = if rest.is_null() {
                    frame.next.clone()
                } else {
                    Kont::push(
                        FrameKind::Begin { remaining: rest },
                        frame.env.clone(),
                        frame.next.clone(),
                    )
                };
                self.state.control = Control::Eval(head);
            }
            FrameKind::Let { name, body } => {
                self.state.env = frame.env.extend(*name, value);
                self.state.k = frame.next.clone();
                self.state.control = Control::Eval(body.clone());
            }
            FrameKind::Define { name } => {
                self.top_level.insert(*name, value);
                self.state.k = frame.next.clone();
                self.state.control = Control::Return(Value::Void);
            }
        }
        Ok(None)
    }
}
