//! Expression transitions: variable lookup, special forms, applications.
//!
//! The reserved heads are `quote`, `if`, `lambda`, `begin`, `let` and
//! `define`. They are recognized by symbol identity, so they cannot be
//! shadowed. Any other pair is an application. Everything that is neither a
//! symbol nor a pair, `()` included, evaluates to itself.

use super::{Control, Machine};
use cesky_ir::{keywords, Symbol};
use cesky_value::errors::{malformed, unbound_variable};
use cesky_value::{EvalError, FrameKind, Kont, Value};
use std::rc::Rc;

impl Machine {
    pub(super) fn step(&mut self, expr: Value) -> Result<(), EvalError> {
        let value = match &expr {
            Value::Symbol(name) => self.lookup(*name)?,
            Value::Pair(pair) => {
                let head = pair.car();
                if let Value::Symbol(keyword) = &head {
                    match *keyword {
                        keywords::QUOTE => return self.step_quote(&expr),
                        keywords::IF => return self.step_if(&expr),
                        keywords::LAMBDA => return self.step_lambda(&expr),
                        keywords::BEGIN => return self.step_begin(&expr),
                        keywords::LET => return self.step_let(&expr),
                        keywords::DEFINE => return self.step_define(&expr),
                        _ => {}
                    }
                }
                return self.step_application(&expr, head, pair.cdr());
            }
            _ => expr.clone(),
        };
        self.state.control = Control::Return(value);
        Ok(())
    }

    /// Innermost environment first, then the top-level table.
    fn lookup(&self, name: Symbol) -> Result<Value, EvalError> {
        if let Some(value) = self.state.env.lookup(name) {
            return Ok(value.clone());
        }
        self.top_level
            .get(&name)
            .cloned()
            .ok_or_else(|| unbound_variable(name))
    }

    fn push(&mut self, kind: FrameKind) {
        let next = std::mem::take(&mut self.state.k);
        self.state.k = Kont::push(kind, self.state.env.clone(), next);
    }

    /// `(quote datum)`
    fn step_quote(&mut self, expr: &Value) -> Result<(), EvalError> {
        let parts = form_parts("quote", expr)?;
        let [_, datum] = parts.as_slice() else {
            return Err(malformed("quote", expr));
        };
        self.state.control = Control::Return(datum.clone());
        Ok(())
    }

    /// `(if test then else)`; the alternative is mandatory.
    fn step_if(&mut self, expr: &Value) -> Result<(), EvalError> {
        let parts = form_parts("if", expr)?;
        let [_, test, then, otherwise] = parts.as_slice() else {
            return Err(malformed("if", expr));
        };
        self.push(FrameKind::If {
            then: then.clone(),
            otherwise: otherwise.clone(),
        });
        self.state.control = Control::Eval(test.clone());
        Ok(())
    }

    /// `(lambda formals [name] body ...)`. A string directly after the
    /// formals names the closure when more body forms follow it.
    fn step_lambda(&mut self, expr: &Value) -> Result<(), EvalError> {
        let parts = form_parts("lambda", expr)?;
        let Some((formals, rest)) = parts.get(1..).and_then(<[Value]>::split_first) else {
            return Err(malformed("lambda", expr));
        };
        check_formals(formals).ok_or_else(|| malformed("lambda", expr))?;
        let (name, body) = match rest {
            [Value::Str(name), body @ ..] if !body.is_empty() => (Some(Rc::clone(name)), body),
            body => (None, body),
        };
        let body = body_expr(body).ok_or_else(|| malformed("lambda", expr))?;
        self.state.control = Control::Return(Value::closure(
            formals.clone(),
            body,
            name,
            self.state.env.clone(),
        ));
        Ok(())
    }

    /// `(begin expr ...+)`; the last expression is in tail position.
    fn step_begin(&mut self, expr: &Value) -> Result<(), EvalError> {
        if !expr.is_list() {
            return Err(malformed("begin", expr));
        }
        let body = expr.cdr().unwrap_or(Value::Null);
        let Value::Pair(first) = &body else {
            return Err(malformed("begin", expr));
        };
        let remaining = first.cdr();
        if !remaining.is_null() {
            self.push(FrameKind::Begin { remaining });
        }
        self.state.control = Control::Eval(first.car());
        Ok(())
    }

    /// `(let ([name rhs]) body ...+)` with exactly one binding.
    fn step_let(&mut self, expr: &Value) -> Result<(), EvalError> {
        let parts = form_parts("let", expr)?;
        let Some((bindings, body)) = parts.get(1..).and_then(<[Value]>::split_first) else {
            return Err(malformed("let", expr));
        };
        let (name, rhs) = single_binding(bindings).ok_or_else(|| malformed("let", expr))?;
        let body = body_expr(body).ok_or_else(|| malformed("let", expr))?;
        self.push(FrameKind::Let { name, body });
        self.state.control = Control::Eval(rhs);
        Ok(())
    }

    /// `(define name expr)` or `(define (name . formals) body ...+)`.
    fn step_define(&mut self, expr: &Value) -> Result<(), EvalError> {
        let parts = form_parts("define", expr)?;
        match parts.as_slice() {
            [_, Value::Symbol(name), rhs] => {
                self.push(FrameKind::Define { name: *name });
                self.state.control = Control::Eval(rhs.clone());
                Ok(())
            }
            [_, Value::Pair(header), body @ ..] if !body.is_empty() => {
                let Value::Symbol(name) = header.car() else {
                    return Err(malformed("define", expr));
                };
                let formals = header.cdr();
                check_formals(&formals).ok_or_else(|| malformed("define", expr))?;
                let body = body_expr(body).ok_or_else(|| malformed("define", expr))?;
                let closure = Value::closure(
                    formals,
                    body,
                    Some(Rc::from(name.name())),
                    self.state.env.clone(),
                );
                self.top_level.insert(name, closure);
                self.state.control = Control::Return(Value::Void);
                Ok(())
            }
            _ => Err(malformed("define", expr)),
        }
    }

    /// Evaluate the operator, then the operands left to right.
    fn step_application(
        &mut self,
        expr: &Value,
        head: Value,
        operands: Value,
    ) -> Result<(), EvalError> {
        if !operands.is_list() {
            return Err(malformed("application", expr));
        }
        self.push(FrameKind::Apply {
            collected: Value::Null,
            remaining: operands,
        });
        self.state.control = Control::Eval(head);
        Ok(())
    }
}

fn form_parts(form: &str, expr: &Value) -> Result<Vec<Value>, EvalError> {
    expr.list_to_vec().ok_or_else(|| malformed(form, expr))
}

/// Formals are a proper list of distinct symbols, optionally ending in a
/// rest symbol, or a single symbol collecting every argument.
fn check_formals(formals: &Value) -> Option<()> {
    let mut seen: Vec<Symbol> = Vec::new();
    let mut iter = formals.iter_list();
    for formal in iter.by_ref() {
        let name = formal.as_symbol()?;
        if seen.contains(&name) {
            return None;
        }
        seen.push(name);
    }
    match iter.rest() {
        Value::Null => Some(()),
        Value::Symbol(rest) if !seen.contains(rest) => Some(()),
        _ => None,
    }
}

/// A single body expression, wrapping several in `begin`.
fn body_expr(forms: &[Value]) -> Option<Value> {
    match forms {
        [] => None,
        [only] => Some(only.clone()),
        _ => Some(Value::cons(
            Value::Symbol(keywords::BEGIN),
            Value::list(forms.iter().cloned()),
        )),
    }
}

/// `([name rhs])`
fn single_binding(bindings: &Value) -> Option<(Symbol, Value)> {
    let list = bindings.list_to_vec()?;
    let [binding] = list.as_slice() else {
        return None;
    };
    let pair = binding.list_to_vec()?;
    match pair.as_slice() {
        [Value::Symbol(name), rhs] => Some((*name, rhs.clone())),
        _ => None,
    }
}

