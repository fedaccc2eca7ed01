//! Expression tree nodes.
//!
//! A [`Node`] is a kind tag, a string payload and an ordered list of
//! children. Children are held behind [`Rc`] so that an edit can rebuild the
//! spine of the tree it touches while sharing every untouched subtree with
//! the previous snapshot. Nodes are never mutated once they are shared.

use crate::error::ParseKindError;
use crate::Path;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

// ══════════════════════════════════════════════════════════════════════════════
// Kinds
// ══════════════════════════════════════════════════════════════════════════════

/// What a node's `value` means.
///
/// The serialized names match the seed data format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NodeKind {
    /// Numeric text. Also the kind of the blank placeholder node.
    #[default]
    #[serde(rename = "number")]
    NumberLiteral,
    /// Name of a registered primitive fold (`+`, `*`).
    #[serde(rename = "primitive")]
    PrimitiveRef,
    /// Name of a top-level expression in the expression table.
    #[serde(rename = "expression")]
    ExpressionRef,
    /// Single-parameter binder; first child is the body, the rest are arguments.
    #[serde(rename = "lambda")]
    Lambda,
    /// Name of a lambda parameter in scope.
    #[serde(rename = "variable")]
    Variable,
}

impl NodeKind {
    pub const ALL: [NodeKind; 5] = [
        NodeKind::NumberLiteral,
        NodeKind::PrimitiveRef,
        NodeKind::ExpressionRef,
        NodeKind::Lambda,
        NodeKind::Variable,
    ];

    /// The seed-format name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NumberLiteral => "number",
            Self::PrimitiveRef => "primitive",
            Self::ExpressionRef => "expression",
            Self::Lambda => "lambda",
            Self::Variable => "variable",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseKindError(s.to_string()))
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Node
// ══════════════════════════════════════════════════════════════════════════════

/// One element of an expression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "type", default)]
    pub kind: NodeKind,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Rc<Node>>,
}

impl Node {
    /// Create a node, taking ownership of its children.
    pub fn new(kind: NodeKind, value: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            kind,
            value: value.into(),
            children: children.into_iter().map(Rc::new).collect(),
        }
    }

    /// Create a childless node.
    pub fn leaf(kind: NodeKind, value: impl Into<String>) -> Self {
        Self::new(kind, value, Vec::new())
    }

    /// The canonical empty node: blank value, no children.
    pub fn blank() -> Self {
        Self::leaf(NodeKind::default(), "")
    }

    pub fn number(text: impl Into<String>) -> Self {
        Self::leaf(NodeKind::NumberLiteral, text)
    }

    pub fn primitive(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self::new(NodeKind::PrimitiveRef, name, children)
    }

    pub fn expression(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self::new(NodeKind::ExpressionRef, name, children)
    }

    /// `children[0]` is the body; any further children are applied arguments.
    pub fn lambda(param: impl Into<String>, children: Vec<Node>) -> Self {
        Self::new(NodeKind::Lambda, param, children)
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self::leaf(NodeKind::Variable, name)
    }

    /// True for the canonical empty node.
    pub fn is_blank(&self) -> bool {
        self.value.is_empty() && self.children.is_empty()
    }

    /// A copy of this node's kind and value over a different child list.
    pub fn with_children(&self, children: Vec<Rc<Node>>) -> Self {
        Self {
            kind: self.kind,
            value: self.value.clone(),
            children,
        }
    }

    /// A relabelled copy of this node that shares its children.
    pub fn relabel(&self, kind: NodeKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            children: self.children.clone(),
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(|c| c.size()).sum::<usize>()
    }

    /// Resolve a path relative to this node.
    pub fn get(&self, path: &Path) -> Option<&Node> {
        path.indices()
            .iter()
            .try_fold(self, |node, &i| node.children.get(i).map(Rc::as_ref))
    }

    /// Convert a preorder traversal index (self = 0) into a path.
    pub fn path_of_index(&self, index: usize) -> Option<Path> {
        let mut indices = Vec::new();
        let mut node = self;
        let mut remaining = index;
        'descend: loop {
            if remaining == 0 {
                return Some(Path::new(indices));
            }
            remaining -= 1;
            for (i, child) in node.children.iter().enumerate() {
                let size = child.size();
                if remaining < size {
                    indices.push(i);
                    node = child.as_ref();
                    continue 'descend;
                }
                remaining -= size;
            }
            return None;
        }
    }

    /// Convert a path into its preorder traversal index (self = 0).
    pub fn index_of_path(&self, path: &Path) -> Option<usize> {
        let mut index = 0;
        let mut node = self;
        for &i in path.indices() {
            let child = node.children.get(i)?;
            index += 1 + node.children[..i].iter().map(|c| c.size()).sum::<usize>();
            node = child.as_ref();
        }
        Some(index)
    }
}

/// Renders as a compact s-expression, e.g. `(+ 2 (* 3 4))`.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match (self.kind, self.value.as_str()) {
            (_, "") => "_".to_string(),
            (NodeKind::Lambda, param) => format!("λ{param}"),
            (_, value) => value.to_string(),
        };
        if self.children.is_empty() {
            return f.write_str(&label);
        }
        write!(f, "({label}")?;
        for child in &self.children {
            write!(f, " {child}")?;
        }
        f.write_str(")")
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Tree & Forest
// ══════════════════════════════════════════════════════════════════════════════

/// An immutable snapshot of one expression: exactly one root node.
///
/// Cloning a `Tree` clones a pointer; [`Tree::same_snapshot`] tells two
/// clones of the same snapshot apart from structurally equal rebuilds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tree(Rc<Node>);

impl Tree {
    pub fn new(root: Node) -> Self {
        Self(Rc::new(root))
    }

    /// The canonical empty tree: a single blank root.
    pub fn empty() -> Self {
        Self::new(Node::blank())
    }

    pub fn root(&self) -> &Node {
        &self.0
    }

    pub fn root_rc(&self) -> &Rc<Node> {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_blank()
    }

    /// Snapshot identity, not structural equality.
    pub fn same_snapshot(a: &Tree, b: &Tree) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    pub fn node_at(&self, path: &Path) -> Option<&Node> {
        self.0.get(path)
    }

    pub fn node_count(&self) -> usize {
        self.0.size()
    }
}

impl From<Rc<Node>> for Tree {
    fn from(root: Rc<Node>) -> Self {
        Self(root)
    }
}

impl From<Node> for Tree {
    fn from(root: Node) -> Self {
        Self::new(root)
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Zero or more root nodes, as left behind by a removal.
///
/// Removing the root leaves an empty forest. Turning that back into a
/// [`Tree`] is the caller's decision (see [`Forest::into_tree_or_empty`]).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Forest {
    roots: Vec<Rc<Node>>,
}

impl Forest {
    pub fn single(root: Rc<Node>) -> Self {
        Self { roots: vec![root] }
    }

    pub fn roots(&self) -> &[Rc<Node>] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// The first root as a tree, if any.
    pub fn into_tree(self) -> Option<Tree> {
        self.roots.into_iter().next().map(Tree::from)
    }

    /// The first root, or the canonical empty tree when nothing is left.
    pub fn into_tree_or_empty(self) -> Tree {
        self.into_tree().unwrap_or_else(Tree::empty)
    }
}
