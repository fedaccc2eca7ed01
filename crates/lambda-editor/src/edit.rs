//! Path-addressed tree edits.
//!
//! Each operation takes the current tree and returns a new one; the input is
//! never modified. Only the nodes on the way from the root to the edit site
//! are rebuilt, everything else is shared with the input by pointer. An
//! address that does not resolve is reported as an [`EditError`].

use lambda_types::{EditError, Forest, Node, Path, Tree};
use std::rc::Rc;

/// The result of [`add_node_under_parent`].
#[derive(Debug, Clone, PartialEq)]
pub struct AddedNode {
    pub tree: Tree,
    /// Where the new node ended up.
    pub path: Path,
    /// Preorder index of the new node in `tree`.
    pub tree_index: usize,
    /// Display hint passed through from the caller.
    pub expand_parent: bool,
}

/// Replace the node at `path` with `new_node`.
pub fn change_node_at_path(tree: &Tree, path: &Path, new_node: Node) -> Result<Tree, EditError> {
    let new_node = Rc::new(new_node);
    rebuild(tree.root_rc(), path.indices(), |_| Some(new_node))
        .flatten()
        .map(Tree::from)
        .ok_or_else(|| EditError::PathNotFound { path: path.clone() })
}

/// Delete the subtree at `path`, closing the gap among its siblings.
///
/// Removing the root leaves an empty forest. Substituting the canonical
/// empty tree for it is up to the caller.
pub fn remove_node_at_path(tree: &Tree, path: &Path) -> Result<Forest, EditError> {
    let root = rebuild(tree.root_rc(), path.indices(), |_| None)
        .ok_or_else(|| EditError::PathNotFound { path: path.clone() })?;
    Ok(root.map(Forest::single).unwrap_or_default())
}

/// Append `new_node` as the last child of the node with preorder index
/// `parent_key` (the root is 0).
pub fn add_node_under_parent(
    tree: &Tree,
    parent_key: usize,
    new_node: Node,
    expand_parent: bool,
) -> Result<AddedNode, EditError> {
    let not_found = || EditError::KeyNotFound { key: parent_key };
    let parent_path = tree.root().path_of_index(parent_key).ok_or_else(not_found)?;
    let parent = tree.node_at(&parent_path).ok_or_else(not_found)?;
    let path = parent_path.child(parent.children.len());
    // The parent's subtree occupies `parent_key..parent_key + size`; a new
    // last child lands right after it.
    let tree_index = parent_key + parent.size();

    let new_node = Rc::new(new_node);
    let root = rebuild(tree.root_rc(), parent_path.indices(), |parent| {
        let mut children = parent.children.clone();
        children.push(new_node);
        Some(Rc::new(parent.with_children(children)))
    })
    .flatten()
    .ok_or_else(not_found)?;

    Ok(AddedNode {
        tree: Tree::from(root),
        path,
        tree_index,
        expand_parent,
    })
}

/// Rebuild the spine from `node` down to the node addressed by `indices`,
/// replacing that node with whatever `edit` returns (`None` deletes it).
///
/// Returns `None` when `indices` does not resolve, otherwise the new
/// subtree root (itself `None` when the addressed node was `node` and was
/// deleted).
fn rebuild<F>(node: &Rc<Node>, indices: &[usize], edit: F) -> Option<Option<Rc<Node>>>
where
    F: FnOnce(&Rc<Node>) -> Option<Rc<Node>>,
{
    let Some((&first, rest)) = indices.split_first() else {
        return Some(edit(node));
    };
    let child = node.children.get(first)?;
    let replacement = rebuild(child, rest, edit)?;
    let mut children = node.children.clone();
    match replacement {
        Some(new_child) => children[first] = new_child,
        None => {
            children.remove(first);
        }
    }
    Some(Some(Rc::new(node.with_children(children))))
}
