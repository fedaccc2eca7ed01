//! Evaluation results.

use crate::error::{EvalError, EvalResult};
use crate::Environment;
use lambda_types::Node;
use serde::{Serialize, Serializer};
use std::fmt;
use std::rc::Rc;

/// A one-parameter function: the parameter name, the body to evaluate, and
/// the environment that was active where the lambda node was evaluated.
#[derive(Debug)]
pub struct Closure {
    pub param: String,
    pub body: Rc<Node>,
    pub env: Environment,
}

/// An intermediate value during evaluation.
#[derive(Debug, Clone)]
pub enum Value {
    Number(f64),
    Callable(Rc<Closure>),
}

impl Value {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Callable(_) => None,
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Self::Callable(_))
    }

    /// The number this value holds, or [`EvalError::NotANumber`].
    pub fn into_number(self) -> EvalResult<f64> {
        match self {
            Self::Number(n) => Ok(n),
            Self::Callable(closure) => Err(EvalError::NotANumber(closure.param.clone())),
        }
    }
}

/// Numbers compare by value, callables by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Callable(a), Self::Callable(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Outcome
// ══════════════════════════════════════════════════════════════════════════════

/// The result of a top-level evaluation: a number or the sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Number(f64),
    NotANumber,
}

impl Outcome {
    /// NaN produced by arithmetic is the sentinel too.
    pub fn from_f64(n: f64) -> Self {
        if n.is_nan() {
            Self::NotANumber
        } else {
            Self::Number(n)
        }
    }

    /// The sentinel maps to `f64::NAN`.
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Number(n) => n,
            Self::NotANumber => f64::NAN,
        }
    }

    pub fn is_nan(self) -> bool {
        matches!(self, Self::NotANumber)
    }
}

/// Formats the way the number is shown to the user: `5`, `2.5`,
/// `Infinity`, `NaN`.
impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Number(n) if n == f64::INFINITY => f.write_str("Infinity"),
            Self::Number(n) if n == f64::NEG_INFINITY => f.write_str("-Infinity"),
            Self::Number(n) => write!(f, "{n}"),
            Self::NotANumber => f.write_str("NaN"),
        }
    }
}

/// Numbers serialize as JSON numbers; anything JSON cannot carry (the
/// sentinel and infinities) serializes as `null`.
impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Self::Number(n) if n.is_finite() => serializer.serialize_f64(n),
            _ => serializer.serialize_none(),
        }
    }
}

/// Parse number literal text.
///
/// Surrounding whitespace is ignored. Only decimal text with an optional
/// sign, fraction and exponent is accepted, so spellings such as `inf` or
/// `nan` stay free for use as names.
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let decimal = trimmed
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'+' | b'-' | b'e' | b'E'));
    if trimmed.is_empty() || !decimal {
        return None;
    }
    trimmed.parse().ok()
}
