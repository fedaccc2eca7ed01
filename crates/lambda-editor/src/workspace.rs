//! The list of expressions being edited.

use crate::ExpressionSession;
use lambda_eval::{EvalConfig, Evaluator, ExpressionTable, Outcome, Registry};
use lambda_types::{load_seed, SeedError, SeedExpression};
use log::{debug, warn};

/// Every expression in the session, in creation order.
///
/// The present tree of each named expression doubles as the expression
/// table that `ExpressionRef` nodes resolve against, so editing one
/// expression changes the value of every expression that refers to it.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    expressions: Vec<ExpressionSession>,
    config: EvalConfig,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: Vec<SeedExpression>) -> Self {
        let expressions: Vec<ExpressionSession> =
            seed.into_iter().map(ExpressionSession::from_seed).collect();
        debug!("workspace loaded {} expression(s)", expressions.len());
        Self {
            expressions,
            config: EvalConfig::default(),
        }
    }

    /// Parse seed JSON and load it.
    pub fn from_seed_json(json: &str) -> Result<Self, SeedError> {
        Ok(Self::from_seed(load_seed(json)?))
    }

    pub fn with_config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> EvalConfig {
        self.config
    }

    /// Append a blank, unnamed expression and return its index.
    pub fn add_expression(&mut self) -> usize {
        self.expressions.push(ExpressionSession::new());
        self.expressions.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&ExpressionSession> {
        self.expressions.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ExpressionSession> {
        self.expressions.get_mut(index)
    }

    /// Index of the first expression called `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.expressions.iter().position(|e| e.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExpressionSession> {
        self.expressions.iter()
    }

    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    /// Name → present tree for every named expression. Unnamed expressions
    /// cannot be referenced; for duplicate names the last one wins.
    pub fn expression_table(&self) -> ExpressionTable {
        let mut table = ExpressionTable::new();
        for expression in self.expressions.iter().filter(|e| !e.name().is_empty()) {
            if table
                .insert(expression.name(), expression.present().clone())
                .is_some()
            {
                warn!("duplicate expression name '{}' shadows an earlier one", expression.name());
            }
        }
        table
    }

    /// Evaluate the expression at `index` against the current table.
    pub fn evaluate(&self, index: usize) -> Option<Outcome> {
        let expression = self.get(index)?;
        let table = self.expression_table();
        let mut evaluator = Evaluator::with_config(Registry::builtin(), &table, self.config);
        Some(expression.evaluate(&mut evaluator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = r#"[
        { "name": "double", "treeData": { "type": "lambda", "value": "x", "children": [
            { "type": "primitive", "value": "*", "children": [
                { "type": "number", "value": "2" },
                { "type": "variable", "value": "x" }
            ] }
        ] } },
        { "name": "main", "treeData": { "type": "expression", "value": "double", "children": [
            { "type": "number", "value": "21" }
        ] } }
    ]"#;

    #[test]
    fn loads_seed() {
        let ws = Workspace::from_seed_json(SEED).unwrap();
        assert_eq!(ws.len(), 2);
        assert_eq!(ws.get(0).unwrap().name(), "double");
        assert_eq!(ws.position("main"), Some(1));
        assert!(!ws.get(1).unwrap().can_undo());
    }

    #[test]
    fn bad_seed_is_an_error() {
        assert!(Workspace::from_seed_json("{").is_err());
    }

    #[test]
    fn evaluates_through_references() {
        let ws = Workspace::from_seed_json(SEED).unwrap();
        assert_eq!(ws.evaluate(1), Some(Outcome::Number(42.0)));
        assert_eq!(ws.evaluate(0), Some(Outcome::NotANumber));
        assert_eq!(ws.evaluate(2), None);
    }

    #[test]
    fn add_expression_is_blank() {
        let mut ws = Workspace::from_seed_json(SEED).unwrap();
        let index = ws.add_expression();
        assert_eq!(index, 2);
        let added = ws.get(index).unwrap();
        assert_eq!(added.display_name(), "unnamed");
        assert!(added.present().is_empty());
        assert_eq!(ws.evaluate(index), Some(Outcome::NotANumber));
    }

    #[test]
    fn table_skips_unnamed_and_last_duplicate_wins() {
        let mut ws = Workspace::from_seed_json(SEED).unwrap();
        ws.add_expression();
        let dup = ws.add_expression();
        ws.get_mut(dup).unwrap().rename("double");
        let table = ws.expression_table();
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["double", "main"]);
        assert!(table.get("double").unwrap().is_empty());
    }

    #[test]
    fn config_limits_evaluation() {
        let ws = Workspace::from_seed_json(SEED)
            .unwrap()
            .with_config(EvalConfig::default().with_gas_limit(3));
        assert_eq!(ws.evaluate(1), Some(Outcome::NotANumber));
    }
}
