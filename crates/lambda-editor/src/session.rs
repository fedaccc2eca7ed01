//! One editable named expression.

use crate::edit::{self, AddedNode};
use crate::History;
use lambda_eval::{Environment, Evaluator, Outcome};
use lambda_types::{EditError, Node, NodeKind, Path, SeedExpression, Tree};
use log::debug;

/// A named expression with its own undo/redo history.
///
/// The edit actions here are what a presentation layer calls. Each one
/// computes a candidate tree with the pure operations in [`edit`] and
/// records it, except where noted.
#[derive(Debug, Clone, Default)]
pub struct ExpressionSession {
    name: String,
    history: History,
}

impl ExpressionSession {
    /// An unnamed expression whose present is the canonical empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tree(name: impl Into<String>, tree: Tree) -> Self {
        Self {
            name: name.into(),
            history: History::with_present(tree),
        }
    }

    pub fn from_seed(seed: SeedExpression) -> Self {
        Self::with_tree(seed.name, seed.tree_data)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name, or `unnamed` when it is blank.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "unnamed"
        } else {
            &self.name
        }
    }

    /// Renaming is not an edit of the tree and is not undoable.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn present(&self) -> &Tree {
        self.history.present()
    }

    /// Record a tree computed elsewhere, e.g. by a drag-and-drop move.
    pub fn record(&mut self, tree: Tree) {
        self.history.record(tree);
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ── Edit actions ─────────────────────────────────────────────────────

    /// Set the kind and value of the node at `path`, keeping its children.
    ///
    /// Returns `Ok(false)` and records nothing when both are unchanged.
    pub fn edit_node(&mut self, path: &Path, kind: NodeKind, value: &str) -> Result<bool, EditError> {
        let present = self.present();
        let node = present
            .node_at(path)
            .ok_or_else(|| EditError::PathNotFound { path: path.clone() })?;
        if node.kind == kind && node.value == value {
            return Ok(false);
        }
        let tree = edit::change_node_at_path(present, path, node.relabel(kind, value))?;
        debug!("{}: edit {path} to {kind} '{value}'", self.display_name());
        self.history.record(tree);
        Ok(true)
    }

    /// Delete the subtree at `path`. Deleting the root records the
    /// canonical empty tree.
    pub fn remove_node(&mut self, path: &Path) -> Result<(), EditError> {
        let forest = edit::remove_node_at_path(self.present(), path)?;
        debug!("{}: remove {path}", self.display_name());
        self.history.record(forest.into_tree_or_empty());
        Ok(())
    }

    /// Append a new leaf under the node with preorder index `parent_key`.
    ///
    /// Returns `Ok(None)` and records nothing when `value` is empty.
    pub fn add_child(
        &mut self,
        parent_key: usize,
        kind: NodeKind,
        value: &str,
    ) -> Result<Option<AddedNode>, EditError> {
        if value.is_empty() {
            return Ok(None);
        }
        let added = edit::add_node_under_parent(
            self.present(),
            parent_key,
            Node::leaf(kind, value),
            true,
        )?;
        debug!(
            "{}: add {kind} '{value}' at {}",
            self.display_name(),
            added.path
        );
        self.history.record(added.tree.clone());
        Ok(Some(added))
    }

    /// Evaluate the present tree under an empty environment.
    pub fn evaluate(&self, evaluator: &mut Evaluator<'_>) -> Outcome {
        evaluator.evaluate(self.present().root(), &Environment::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_eval::{ExpressionTable, Registry};

    fn session() -> ExpressionSession {
        ExpressionSession::with_tree(
            "sum",
            Tree::new(Node::primitive(
                "+",
                vec![Node::number("2"), Node::number("3")],
            )),
        )
    }

    #[test]
    fn new_session_is_blank_and_unnamed() {
        let s = ExpressionSession::new();
        assert!(s.present().is_empty());
        assert_eq!(s.display_name(), "unnamed");
        assert!(!s.can_undo());
    }

    #[test]
    fn rename_does_not_touch_history() {
        let mut s = session();
        s.rename("total");
        assert_eq!(s.name(), "total");
        assert!(!s.can_undo());
    }

    #[test]
    fn edit_keeps_children() {
        let mut s = session();
        assert_eq!(s.edit_node(&Path::root(), NodeKind::PrimitiveRef, "*"), Ok(true));
        assert_eq!(s.present().to_string(), "(* 2 3)");
        assert!(s.can_undo());
    }

    #[test]
    fn unchanged_edit_records_nothing() {
        let mut s = session();
        assert_eq!(s.edit_node(&Path::root(), NodeKind::PrimitiveRef, "+"), Ok(false));
        assert!(!s.can_undo());
    }

    #[test]
    fn kind_change_alone_is_an_edit() {
        let mut s = session();
        let path = Path::new(vec![0]);
        assert_eq!(s.edit_node(&path, NodeKind::Variable, "2"), Ok(true));
        assert_eq!(s.present().node_at(&path).unwrap().kind, NodeKind::Variable);
    }

    #[test]
    fn edit_bad_path() {
        let mut s = session();
        let path = Path::new(vec![9]);
        assert_eq!(
            s.edit_node(&path, NodeKind::NumberLiteral, "1"),
            Err(EditError::PathNotFound { path })
        );
        assert!(!s.can_undo());
    }

    #[test]
    fn removing_root_records_empty_tree() {
        let mut s = session();
        s.remove_node(&Path::root()).unwrap();
        assert!(s.present().is_empty());
        assert!(s.undo());
        assert_eq!(s.present().to_string(), "(+ 2 3)");
    }

    #[test]
    fn remove_child() {
        let mut s = session();
        s.remove_node(&Path::new(vec![0])).unwrap();
        assert_eq!(s.present().to_string(), "(+ 3)");
    }

    #[test]
    fn add_child_with_empty_value_is_ignored() {
        let mut s = session();
        assert_eq!(s.add_child(0, NodeKind::NumberLiteral, ""), Ok(None));
        assert!(!s.can_undo());
    }

    #[test]
    fn add_child_records() {
        let mut s = session();
        let added = s.add_child(0, NodeKind::NumberLiteral, "4").unwrap().unwrap();
        assert_eq!(added.tree_index, 3);
        assert!(added.expand_parent);
        assert_eq!(s.present().to_string(), "(+ 2 3 4)");
        assert!(Tree::same_snapshot(s.present(), &added.tree));
    }

    #[test]
    fn add_child_bad_key() {
        let mut s = session();
        assert_eq!(
            s.add_child(7, NodeKind::NumberLiteral, "4"),
            Err(EditError::KeyNotFound { key: 7 })
        );
    }

    #[test]
    fn evaluate_follows_history() {
        let table = ExpressionTable::new();
        let mut ev = Evaluator::new(Registry::builtin(), &table);
        let mut s = session();
        assert_eq!(s.evaluate(&mut ev), Outcome::Number(5.0));
        s.add_child(0, NodeKind::NumberLiteral, "5").unwrap();
        assert_eq!(s.evaluate(&mut ev), Outcome::Number(10.0));
        s.undo();
        assert_eq!(s.evaluate(&mut ev), Outcome::Number(5.0));
    }
}
