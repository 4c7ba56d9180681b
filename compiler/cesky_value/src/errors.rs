//! Error types for evaluation.
//!
//! `EvalErrorKind` categorizes what went wrong; `EvalError` adds the
//! reporting context: the procedure or form that complained (`who`) and the
//! printed offending value (`given`). Errors are fatal to the current
//! top-level evaluation.
//!
//! Construct errors through the factory functions below rather than by hand
//! so that kind, message and context stay consistent.

use crate::Value;
use cesky_ir::Symbol;
use std::fmt;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    UnboundVariable {
        name: String,
    },
    NotAProcedure,
    /// Wrong number of arguments for a closure, primitive or continuation.
    /// `expected` is a description such as `"2"` or `"at least 1"`.
    ArityMismatch {
        expected: String,
        got: usize,
    },
    /// A primitive received a value of the wrong variant.
    TypeError {
        expected: String,
    },
    KeyNotFound,
    /// A special form with the wrong shape, e.g. `if` with two subforms.
    MalformedSpecialForm,
    /// Misuse of the control operators, e.g. a non-symbol prompt tag.
    CycleOrProtocolError,
    DivisionByZero,
    /// Raised by the `error` and `arg-error` primitives.
    User,
    /// Text could not be parsed.
    Read,
    /// The machine ran past its configured step budget.
    StepLimitExceeded {
        limit: u64,
    },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnboundVariable { name } => write!(f, "unbound variable {name}"),
            Self::NotAProcedure => f.write_str("not a procedure"),
            Self::ArityMismatch { expected, got } => {
                write!(f, "arity mismatch: expected {expected}, given {got}")
            }
            Self::TypeError { expected } => write!(f, "expected {expected}"),
            Self::KeyNotFound => f.write_str("key not found"),
            Self::MalformedSpecialForm => f.write_str("bad syntax"),
            Self::CycleOrProtocolError => f.write_str("protocol error"),
            Self::DivisionByZero => f.write_str("division by zero"),
            Self::User => f.write_str("error"),
            Self::Read => f.write_str("read error"),
            Self::StepLimitExceeded { limit } => write!(f, "step limit of {limit} exceeded"),
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Procedure, form or variable the error is reported against. May be
    /// empty for errors raised by user code.
    pub who: String,
    /// Human-readable description.
    pub message: String,
    /// The offending value, already printed.
    pub given: Option<String>,
}

impl EvalError {
    /// Create an error with a specific kind and message.
    pub fn new(kind: EvalErrorKind, who: impl Into<String>, message: impl Into<String>) -> Self {
        EvalError {
            kind,
            who: who.into(),
            message: message.into(),
            given: None,
        }
    }

    /// Attach the offending value.
    #[must_use]
    pub fn with_given(mut self, value: &Value) -> Self {
        self.given = Some(value.to_string());
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.who.is_empty() {
            f.write_str(&self.message)?;
        } else {
            write!(f, "{}: {}", self.who, self.message)?;
        }
        if let Some(given) = &self.given {
            write!(f, "\n  given: {given}")?;
        }
        Ok(())
    }
}

impl std::error::Error for EvalError {}

// Factory functions

#[cold]
pub fn unbound_variable(name: Symbol) -> EvalError {
    EvalError::new(
        EvalErrorKind::UnboundVariable {
            name: name.name().to_string(),
        },
        name.name(),
        "undefined",
    )
}

/// A `variable` read before it was set.
#[cold]
pub fn unset_variable(who: &str, variable: &Value) -> EvalError {
    let name = match variable {
        Value::Variable(var) => crate::printer::display_string(&var.name),
        other => crate::printer::display_string(other),
    };
    EvalError::new(EvalErrorKind::UnboundVariable { name }, who, "variable has no value")
        .with_given(variable)
}

#[cold]
pub fn not_a_procedure(value: &Value) -> EvalError {
    EvalError::new(EvalErrorKind::NotAProcedure, "apply", "not a procedure").with_given(value)
}

/// Wrong argument count. `args` is reported as the offending value.
#[cold]
pub fn arity_mismatch(who: &str, expected: impl fmt::Display, args: &[Value]) -> EvalError {
    let kind = EvalErrorKind::ArityMismatch {
        expected: expected.to_string(),
        got: args.len(),
    };
    let message = kind.to_string();
    EvalError::new(kind, who, message).with_given(&Value::list(args.iter().cloned()))
}

/// `who` expected `expected` (e.g. `"a pair"`) but got `given`.
#[cold]
pub fn type_error(who: &str, expected: &str, given: &Value) -> EvalError {
    EvalError::new(
        EvalErrorKind::TypeError {
            expected: expected.to_string(),
        },
        who,
        format!("not {expected}"),
    )
    .with_given(given)
}

#[cold]
pub fn key_not_found(who: &str, key: &Value) -> EvalError {
    EvalError::new(EvalErrorKind::KeyNotFound, who, "key is not present").with_given(key)
}

#[cold]
pub fn malformed(form: &str, expr: &Value) -> EvalError {
    EvalError::new(EvalErrorKind::MalformedSpecialForm, form, "bad syntax").with_given(expr)
}

#[cold]
pub fn protocol_error(who: &str, message: impl Into<String>, given: &Value) -> EvalError {
    EvalError::new(EvalErrorKind::CycleOrProtocolError, who, message).with_given(given)
}

#[cold]
pub fn division_by_zero(who: &str) -> EvalError {
    EvalError::new(EvalErrorKind::DivisionByZero, who, "division by zero")
}

#[cold]
pub fn index_out_of_range(who: &str, index: &Value) -> EvalError {
    EvalError::new(
        EvalErrorKind::TypeError {
            expected: "an index in range".to_string(),
        },
        who,
        "index out of range",
    )
    .with_given(index)
}

/// Error raised from user code with a preformatted message.
#[cold]
pub fn user_error(message: impl Into<String>) -> EvalError {
    EvalError::new(EvalErrorKind::User, "", message)
}

/// Contract violation reported by `arg-error` on behalf of `who`.
#[cold]
pub fn arg_error(who: &str, what: &str, given: &Value) -> EvalError {
    EvalError::new(EvalErrorKind::User, who, format!("contract violation; expected {what}"))
        .with_given(given)
}

#[cold]
pub fn read_error(who: &str, message: impl Into<String>) -> EvalError {
    EvalError::new(EvalErrorKind::Read, who, message)
}

#[cold]
pub fn step_limit_exceeded(limit: u64) -> EvalError {
    let kind = EvalErrorKind::StepLimitExceeded { limit };
    let message = kind.to_string();
    EvalError::new(kind, "machine", message)
}
