//! Core expression evaluator.

use crate::env::Environment;
use crate::error::{EvalError, EvalResult};
use crate::registry::{ExpressionTable, Registry};
use crate::value::{parse_number, Closure, Outcome, Value};
use crate::EvalConfig;
use lambda_types::{Node, NodeKind};
use log::debug;
use std::rc::Rc;

/// Walks expression trees and produces values.
///
/// Scoping follows two rules that are kept deliberately separate:
/// - a `Lambda` node closes over the environment active where the node is
///   evaluated (lexical capture);
/// - an `ExpressionRef` evaluates the referenced tree under the *caller's*
///   environment, so free variables of a named expression resolve at the
///   reference site.
pub struct Evaluator<'a> {
    registry: &'a Registry,
    expressions: &'a ExpressionTable,
    config: EvalConfig,
    /// Steps consumed by the current evaluation.
    gas: u64,
}

impl<'a> Evaluator<'a> {
    /// Create an evaluator with default limits.
    pub fn new(registry: &'a Registry, expressions: &'a ExpressionTable) -> Self {
        Self::with_config(registry, expressions, EvalConfig::default())
    }

    pub fn with_config(
        registry: &'a Registry,
        expressions: &'a ExpressionTable,
        config: EvalConfig,
    ) -> Self {
        Self {
            registry,
            expressions,
            config,
            gas: 0,
        }
    }

    /// Steps consumed by the most recent evaluation.
    pub fn gas_used(&self) -> u64 {
        self.gas
    }

    /// Evaluate `node` to a number or the sentinel. Never fails.
    ///
    /// A function-valued result is not a number and also yields the sentinel.
    pub fn evaluate(&mut self, node: &Node, env: &Environment) -> Outcome {
        match self.eval(node, env).and_then(Value::into_number) {
            Ok(n) => Outcome::from_f64(n),
            Err(err) => {
                debug!("evaluation of {node} yields NaN: {err}");
                Outcome::NotANumber
            }
        }
    }

    /// Evaluate `node` to a value, keeping the reason for any failure.
    pub fn eval(&mut self, node: &Node, env: &Environment) -> EvalResult<Value> {
        self.gas = 0;
        self.eval_at(node, env, 0)
    }

    /// Call a function value with one argument.
    pub fn apply(&mut self, function: Value, argument: Value) -> EvalResult<Value> {
        self.gas = 0;
        self.apply_at(function, argument, 0)
    }

    /// Consume one unit of gas. Returns error if exhausted.
    ///
    /// `depth` counts calls in progress (expression references entered and
    /// function bodies applied), not plain nesting of primitive arguments.
    fn tick(&mut self, depth: usize) -> EvalResult<()> {
        self.gas += 1;
        if self.gas > self.config.gas_limit {
            return Err(EvalError::GasExhausted(self.config.gas_limit));
        }
        if depth > self.config.max_depth {
            return Err(EvalError::DepthExceeded(self.config.max_depth));
        }
        Ok(())
    }

    fn eval_at(&mut self, node: &Node, env: &Environment, depth: usize) -> EvalResult<Value> {
        self.tick(depth)?;
        match node.kind {
            NodeKind::NumberLiteral => eval_number(&node.value),
            NodeKind::PrimitiveRef => self.eval_primitive(node, env, depth),
            NodeKind::ExpressionRef => self.eval_expression_ref(node, env, depth),
            NodeKind::Lambda => self.eval_lambda(node, env, depth),
            NodeKind::Variable => env
                .lookup(&node.value)
                .cloned()
                .ok_or_else(|| EvalError::UnboundVariable(node.value.clone())),
        }
    }

    // ── Primitives ───────────────────────────────────────────────────────

    /// Evaluate every child under `env`, left to right, then fold.
    fn eval_primitive(&mut self, node: &Node, env: &Environment, depth: usize) -> EvalResult<Value> {
        let registry = self.registry;
        let primitive = registry
            .primitive(&node.value)
            .ok_or_else(|| EvalError::UnknownPrimitive(node.value.clone()))?;
        let mut args = Vec::with_capacity(node.children.len());
        for child in &node.children {
            args.push(self.eval_at(child, env, depth)?.into_number()?);
        }
        Ok(Value::Number(primitive.fold.apply(&args)))
    }

    // ── Named expressions ────────────────────────────────────────────────

    fn eval_expression_ref(
        &mut self,
        node: &Node,
        env: &Environment,
        depth: usize,
    ) -> EvalResult<Value> {
        let expressions = self.expressions;
        let callee = expressions
            .get(&node.value)
            .ok_or_else(|| EvalError::UnknownExpression(node.value.clone()))?;
        // Caller's environment, not an empty one.
        let head = self.eval_at(callee.root(), env, depth + 1)?;
        self.apply_children(head, &node.children, env, depth)
    }

    // ── Lambdas & application ────────────────────────────────────────────

    fn eval_lambda(&mut self, node: &Node, env: &Environment, depth: usize) -> EvalResult<Value> {
        let (body, args) = node
            .children
            .split_first()
            .ok_or_else(|| EvalError::MissingBody(node.value.clone()))?;
        let function = Value::Callable(Rc::new(Closure {
            param: node.value.clone(),
            body: Rc::clone(body),
            env: env.clone(),
        }));
        self.apply_children(function, args, env, depth)
    }

    /// Left-fold application: evaluate each argument under `env` and call
    /// the accumulated value with it.
    fn apply_children(
        &mut self,
        head: Value,
        args: &[Rc<Node>],
        env: &Environment,
        depth: usize,
    ) -> EvalResult<Value> {
        let mut acc = head;
        for arg in args {
            let argument = self.eval_at(arg, env, depth)?;
            acc = self.apply_at(acc, argument, depth)?;
        }
        Ok(acc)
    }

    fn apply_at(&mut self, function: Value, argument: Value, depth: usize) -> EvalResult<Value> {
        self.tick(depth)?;
        match function {
            Value::Callable(closure) => {
                let env = closure.env.extend(&closure.param, argument);
                self.eval_at(&closure.body, &env, depth + 1)
            }
            Value::Number(n) => Err(EvalError::NotCallable(n)),
        }
    }
}

fn eval_number(text: &str) -> EvalResult<Value> {
    parse_number(text)
        .map(Value::Number)
        .ok_or_else(|| EvalError::InvalidNumber(text.to_string()))
}
