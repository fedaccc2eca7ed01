//! Evaluation error taxonomy.
//!
//! These never leave [`Evaluator::evaluate`](crate::Evaluator::evaluate):
//! every variant collapses into the not-a-number sentinel there. They are
//! kept distinct for logging and for [`Evaluator::eval`](crate::Evaluator::eval).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Primitive name not in the registry.
    #[error("unknown primitive '{0}'")]
    UnknownPrimitive(String),

    /// Expression name not in the expression table.
    #[error("unknown expression '{0}'")]
    UnknownExpression(String),

    /// Number literal text that does not parse.
    #[error("invalid number literal '{0}'")]
    InvalidNumber(String),

    #[error("unbound variable '{0}'")]
    UnboundVariable(String),

    /// A number was applied to an argument.
    #[error("{0} is not callable")]
    NotCallable(f64),

    /// A function was used where a number was required.
    #[error("expected a number, found a function of '{0}'")]
    NotANumber(String),

    /// Lambda node without a body child.
    #[error("lambda '{0}' has no body")]
    MissingBody(String),

    #[error("gas exhausted after {0} steps")]
    GasExhausted(u64),

    #[error("evaluation nested deeper than {0}")]
    DepthExceeded(usize),
}

/// Result alias for evaluator operations.
pub type EvalResult<T> = Result<T, EvalError>;
