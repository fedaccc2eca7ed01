//! Registry tables consulted by the evaluator.
//!
//! [`Registry`] holds the primitive folds and the special-form descriptions;
//! [`ExpressionTable`] holds the named top-level expressions that
//! `ExpressionRef` nodes point at. The evaluator only reads them.

use crate::value::parse_number;
use lambda_types::{NodeKind, SeedExpression, Tree};
use std::collections::BTreeMap;
use std::sync::OnceLock;

// ══════════════════════════════════════════════════════════════════════════════
// Primitives
// ══════════════════════════════════════════════════════════════════════════════

/// How a primitive combines its evaluated arguments.
#[derive(Debug, Clone, Copy)]
pub struct Fold {
    /// Result for zero arguments.
    pub identity: f64,
    pub combine: fn(f64, f64) -> f64,
}

impl Fold {
    /// Left-fold `args` starting from the identity.
    pub fn apply(&self, args: &[f64]) -> f64 {
        args.iter().fold(self.identity, |acc, &n| (self.combine)(acc, n))
    }
}

/// A builtin variadic fold over numbers.
#[derive(Debug, Clone)]
pub struct Primitive {
    pub name: String,
    pub description: String,
    pub fold: Fold,
}

/// A node kind with fixed evaluation rules, listed for documentation.
#[derive(Debug, Clone)]
pub struct SpecialForm {
    pub name: String,
    pub description: String,
    pub kind: NodeKind,
    /// Parameters bound by one node of this form.
    pub params: usize,
}

/// Name → primitive and name → special form tables.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    primitives: BTreeMap<String, Primitive>,
    special_forms: BTreeMap<String, SpecialForm>,
}

impl Registry {
    /// An empty registry. Most callers want [`Registry::builtin`].
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the builtin primitives and special forms.
    pub fn with_builtins() -> Self {
        let mut reg = Self::new();
        reg.register_arithmetic();
        reg.register_special_forms();
        reg
    }

    /// Shared instance of [`Registry::with_builtins`].
    pub fn builtin() -> &'static Registry {
        static BUILTIN: OnceLock<Registry> = OnceLock::new();
        BUILTIN.get_or_init(Registry::with_builtins)
    }

    pub fn add_primitive(
        &mut self,
        name: &str,
        description: &str,
        identity: f64,
        combine: fn(f64, f64) -> f64,
    ) {
        self.primitives.insert(
            name.to_string(),
            Primitive {
                name: name.to_string(),
                description: description.to_string(),
                fold: Fold { identity, combine },
            },
        );
    }

    pub fn add_special_form(&mut self, name: &str, description: &str, kind: NodeKind, params: usize) {
        self.special_forms.insert(
            name.to_string(),
            SpecialForm {
                name: name.to_string(),
                description: description.to_string(),
                kind,
                params,
            },
        );
    }

    pub fn primitive(&self, name: &str) -> Option<&Primitive> {
        self.primitives.get(name)
    }

    pub fn special_form(&self, name: &str) -> Option<&SpecialForm> {
        self.special_forms.get(name)
    }

    /// Primitive names in stable (sorted) order.
    pub fn primitive_names(&self) -> impl Iterator<Item = &str> {
        self.primitives.keys().map(String::as_str)
    }

    pub fn special_form_names(&self) -> impl Iterator<Item = &str> {
        self.special_forms.keys().map(String::as_str)
    }

    /// Description of a primitive or special form. Primitives win on a
    /// name clash.
    pub fn describe(&self, name: &str) -> Option<&str> {
        self.primitive(name)
            .map(|p| p.description.as_str())
            .or_else(|| self.special_form(name).map(|s| s.description.as_str()))
    }

    /// Guess the kind a user meant by typing `text`.
    ///
    /// Numeric text is a literal, a registered primitive is a primitive
    /// reference, a known expression name is an expression reference, and
    /// anything else is taken as a variable.
    pub fn classify(&self, text: &str, expressions: &ExpressionTable) -> NodeKind {
        if parse_number(text).is_some() {
            NodeKind::NumberLiteral
        } else if self.primitives.contains_key(text) {
            NodeKind::PrimitiveRef
        } else if expressions.contains(text) {
            NodeKind::ExpressionRef
        } else {
            NodeKind::Variable
        }
    }

    // ── Builtin tables ───────────────────────────────────────────────────

    fn register_arithmetic(&mut self) {
        self.add_primitive(
            "+",
            "Primitive function that returns the sum of numbers",
            0.0,
            |a, b| a + b,
        );
        self.add_primitive(
            "*",
            "Primitive function that returns the product of numbers",
            1.0,
            |a, b| a * b,
        );
    }

    fn register_special_forms(&mut self) {
        self.add_special_form(
            "lambda",
            "Special form that binds one parameter. The first child is the body; \
             each further child is evaluated and applied to the result in turn",
            NodeKind::Lambda,
            1,
        );
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Expression table
// ══════════════════════════════════════════════════════════════════════════════

/// Named top-level expressions, resolved by `ExpressionRef` nodes.
#[derive(Debug, Clone, Default)]
pub struct ExpressionTable {
    entries: BTreeMap<String, Tree>,
}

impl ExpressionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from seed records. Later records replace earlier ones with the
    /// same name.
    pub fn from_seed(seed: &[SeedExpression]) -> Self {
        seed.iter()
            .map(|s| (s.name.clone(), s.tree_data.clone()))
            .collect()
    }

    /// Returns the tree previously stored under `name`, if any.
    pub fn insert(&mut self, name: impl Into<String>, tree: Tree) -> Option<Tree> {
        self.entries.insert(name.into(), tree)
    }

    pub fn get(&self, name: &str) -> Option<&Tree> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Tree)> for ExpressionTable {
    fn from_iter<I: IntoIterator<Item = (String, Tree)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_types::Node;

    #[test]
    fn builtin_primitives() {
        let reg = Registry::builtin();
        assert_eq!(reg.primitive_names().collect::<Vec<_>>(), vec!["*", "+"]);
        assert_eq!(reg.primitive("+").unwrap().fold.apply(&[2.0, 3.0]), 5.0);
        assert_eq!(reg.primitive("*").unwrap().fold.apply(&[2.0, 3.0, 4.0]), 24.0);
        assert!(reg.primitive("-").is_none());
    }

    #[test]
    fn empty_fold_is_identity() {
        let reg = Registry::builtin();
        assert_eq!(reg.primitive("+").unwrap().fold.apply(&[]), 0.0);
        assert_eq!(reg.primitive("*").unwrap().fold.apply(&[]), 1.0);
    }

    #[test]
    fn describe_covers_both_tables() {
        let reg = Registry::builtin();
        assert_eq!(
            reg.describe("+"),
            Some("Primitive function that returns the sum of numbers")
        );
        assert!(reg.describe("lambda").unwrap().starts_with("Special form"));
        assert_eq!(reg.special_form("lambda").unwrap().params, 1);
        assert_eq!(reg.describe("nope"), None);
    }

    #[test]
    fn custom_primitive() {
        let mut reg = Registry::new();
        reg.add_primitive("max", "Largest of the numbers", f64::NEG_INFINITY, f64::max);
        assert_eq!(reg.primitive("max").unwrap().fold.apply(&[3.0, 9.0, 1.0]), 9.0);
    }

    #[test]
    fn classify_typed_text() {
        let reg = Registry::builtin();
        let mut table = ExpressionTable::new();
        table.insert("double", Tree::new(Node::number("0")));
        assert_eq!(reg.classify("42", &table), NodeKind::NumberLiteral);
        assert_eq!(reg.classify(" 2.5 ", &table), NodeKind::NumberLiteral);
        assert_eq!(reg.classify("+", &table), NodeKind::PrimitiveRef);
        assert_eq!(reg.classify("double", &table), NodeKind::ExpressionRef);
        assert_eq!(reg.classify("x", &table), NodeKind::Variable);
        assert_eq!(reg.classify("", &table), NodeKind::Variable);
        assert_eq!(reg.classify("nan", &table), NodeKind::Variable);
        assert_eq!(reg.classify("inf", &table), NodeKind::Variable);
        assert_eq!(reg.classify("Infinity", &table), NodeKind::Variable);
    }

    #[test]
    fn table_from_seed_last_wins() {
        let seed = vec![
            SeedExpression::new("a", Tree::new(Node::number("1"))),
            SeedExpression::new("a", Tree::new(Node::number("2"))),
        ];
        let table = ExpressionTable::from_seed(&seed);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("a").unwrap().root().value, "2");
    }
}
