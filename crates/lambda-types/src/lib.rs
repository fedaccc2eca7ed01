//! Shared types for the lambda expression editor.
//!
//! This crate defines the expression tree ([`Node`], [`Tree`]), positional
//! addressing ([`Path`] and preorder tree indices), the seed record format,
//! and the error types shared by the evaluator and editor crates.

mod error;
mod path;
mod seed;
pub mod node;

pub use error::{EditError, ParseKindError, SeedError};
pub use node::{Forest, Node, NodeKind, Tree};
pub use path::Path;
pub use seed::{load_seed, SeedExpression};

/// Result type used by the tree editing operations.
pub type Result<T> = std::result::Result<T, EditError>;
