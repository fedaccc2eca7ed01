//! Structural editor for lambda expression trees.
//!
//! - [`edit`]: pure, path-addressed operations that build a new tree from an
//!   old one, sharing every untouched subtree.
//! - [`History`]: the past/present/future snapshot stack behind undo/redo.
//! - [`ExpressionSession`]: one named expression and its history, with the
//!   edit actions a presentation layer invokes.
//! - [`Workspace`]: the list of expressions, loaded from seed data, that also
//!   serves as the expression table for evaluation.

pub mod edit;
mod history;
mod session;
mod workspace;

pub use edit::{add_node_under_parent, change_node_at_path, remove_node_at_path, AddedNode};
pub use history::History;
pub use session::ExpressionSession;
pub use workspace::Workspace;
