use crate::Path;
use thiserror::Error;

/// A structural edit addressed a node that is not in the tree.
///
/// Reported rather than ignored, so the caller's view of the tree cannot
/// drift away from the model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("no node at path {path}")]
    PathNotFound { path: Path },

    #[error("no node with tree index {key}")]
    KeyNotFound { key: usize },
}

/// Seed data could not be loaded.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("malformed seed data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Text that does not name a [`NodeKind`](crate::NodeKind).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown node kind '{0}'")]
pub struct ParseKindError(pub String);
