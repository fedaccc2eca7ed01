//! Lambda tree-walking evaluator.
//!
//! Evaluates expression trees built from number literals, primitive folds,
//! references to named expressions, single-parameter lambdas and variables.
//! Every evaluation is total: it produces a number or the not-a-number
//! sentinel ([`Outcome::NotANumber`]), never a panic or an error value.

mod config;
mod env;
mod error;
mod evaluator;
mod registry;
mod value;

pub use config::EvalConfig;
pub use env::Environment;
pub use error::{EvalError, EvalResult};
pub use evaluator::Evaluator;
pub use registry::{ExpressionTable, Fold, Primitive, Registry, SpecialForm};
pub use value::{Closure, Outcome, Value};

use lambda_types::Tree;

/// Evaluate a tree under an empty environment with the builtin registry and
/// default limits.
pub fn evaluate(tree: &Tree, expressions: &ExpressionTable) -> Outcome {
    Evaluator::new(Registry::builtin(), expressions).evaluate(tree.root(), &Environment::new())
}
