//! Load-time seed data: the initial list of named expressions.

use crate::{SeedError, Tree};
use serde::{Deserialize, Serialize};

/// One named expression as it appears in seed data.
///
/// ```json
/// { "name": "double", "treeData": { "type": "lambda", "value": "x", "children": [ ... ] } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedExpression {
    #[serde(default)]
    pub name: String,
    pub tree_data: Tree,
}

impl SeedExpression {
    pub fn new(name: impl Into<String>, tree_data: Tree) -> Self {
        Self {
            name: name.into(),
            tree_data,
        }
    }
}

/// Parse a JSON array of seed records.
pub fn load_seed(json: &str) -> Result<Vec<SeedExpression>, SeedError> {
    Ok(serde_json::from_str(json)?)
}
