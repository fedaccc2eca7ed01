//! Lambda expression editor core as a WASM module for browser environments.
//!
//! This crate exposes the evaluator, the tree edits and undo/redo via
//! `wasm-bindgen`. The presentation layer keeps one [`Session`] and calls it
//! in response to user actions; everything it needs back is returned as a
//! JSON string.
//!
//! # Usage (JavaScript)
//!
//! ```js
//! import init, { Session } from 'lambda-wasm';
//!
//! await init();
//!
//! const session = new Session();
//! session.load_seed(JSON.stringify(initialExpressions));
//! // [{ name: "double", ... }, { name: "main", treeData: (double 8) }]
//! session.edit_node(1, "[0]", "number", "21");
//! console.log(JSON.parse(session.evaluate(1)));
//! // { ok: true, value: 42, display: "42" }
//! ```
//!
//! Every JSON response carries `ok`. On failure `ok` is `false` and `error`
//! holds a message; the session is left unchanged.

use lambda_editor::{ExpressionSession, Workspace};
use lambda_eval::Registry;
use lambda_types::{NodeKind, ParseKindError, Path};
use log::debug;
use serde_json::{json, Value as Json};
use wasm_bindgen::prelude::*;

type Response = Result<Json, String>;

/// The editing state of one browser tab: every expression and its history.
#[wasm_bindgen]
#[derive(Debug, Default)]
pub struct Session {
    workspace: Workspace,
}

#[wasm_bindgen]
impl Session {
    /// Start with no expressions.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Session {
        Session::default()
    }

    /// Replace all expressions with the seed records in `seed_json`.
    ///
    /// ```json
    /// { "ok": true, "count": 2 }
    /// ```
    pub fn load_seed(&mut self, seed_json: &str) -> String {
        respond(
            Workspace::from_seed_json(seed_json)
                .map(|workspace| {
                    self.workspace = workspace.with_config(self.workspace.config());
                    json!({ "count": self.workspace.len() })
                })
                .map_err(|e| e.to_string()),
        )
    }

    /// List expressions for the home screen.
    ///
    /// ```json
    /// { "ok": true, "expressions": [{ "index": 0, "name": "", "displayName": "unnamed", "canUndo": false, "canRedo": false }] }
    /// ```
    pub fn expressions(&self) -> String {
        let list: Vec<Json> = self
            .workspace
            .iter()
            .enumerate()
            .map(|(index, e)| {
                json!({
                    "index": index,
                    "name": e.name(),
                    "displayName": e.display_name(),
                    "canUndo": e.can_undo(),
                    "canRedo": e.can_redo(),
                })
            })
            .collect();
        respond(Ok(json!({ "expressions": list })))
    }

    /// Append a blank, unnamed expression and return its index.
    pub fn add_expression(&mut self) -> usize {
        self.workspace.add_expression()
    }

    /// Returns `false` when there is no expression at `index`.
    pub fn rename(&mut self, index: usize, name: &str) -> bool {
        match self.workspace.get_mut(index) {
            Some(expression) => {
                expression.rename(name);
                true
            }
            None => false,
        }
    }

    /// The present tree of an expression in seed format.
    ///
    /// ```json
    /// { "ok": true, "tree": { "type": "primitive", "value": "+", "children": [...] } }
    /// ```
    pub fn tree_json(&self, index: usize) -> String {
        respond(self.expression(index).and_then(|e| {
            serde_json::to_value(e.present())
                .map(|tree| json!({ "tree": tree }))
                .map_err(|err| format!("serialization error: {err}"))
        }))
    }

    /// Evaluate an expression. `value` is `null` for NaN.
    ///
    /// ```json
    /// { "ok": true, "value": 5.0, "display": "5" }
    /// ```
    pub fn evaluate(&self, index: usize) -> String {
        respond(
            self.workspace
                .evaluate(index)
                .map(|outcome| json!({ "value": outcome, "display": outcome.to_string() }))
                .ok_or_else(|| no_expression(index)),
        )
    }

    /// Set the kind and value of the node at `path_json` (a JSON array of
    /// child indices), keeping its children. An empty `kind` is inferred
    /// from `value`.
    ///
    /// ```json
    /// { "ok": true, "changed": true }
    /// ```
    pub fn edit_node(&mut self, index: usize, path_json: &str, kind: &str, value: &str) -> String {
        let result = parse_path(path_json).and_then(|path| {
            let kind = self.kind_for(kind, value)?;
            let changed = self
                .expression_mut(index)?
                .edit_node(&path, kind, value)
                .map_err(|e| e.to_string())?;
            Ok(json!({ "changed": changed }))
        });
        respond(result)
    }

    /// Delete the subtree at `path_json`.
    pub fn remove_node(&mut self, index: usize, path_json: &str) -> String {
        let result = parse_path(path_json).and_then(|path| {
            self.expression_mut(index)?
                .remove_node(&path)
                .map_err(|e| e.to_string())?;
            Ok(json!({}))
        });
        respond(result)
    }

    /// Append a child under the node with preorder index `parent_key`. An
    /// empty `kind` is inferred from `value`; an empty `value` adds nothing.
    ///
    /// ```json
    /// { "ok": true, "added": true, "treeIndex": 3, "path": [2], "expandParent": true }
    /// ```
    pub fn add_child(&mut self, index: usize, parent_key: usize, kind: &str, value: &str) -> String {
        let result = self.kind_for(kind, value).and_then(|kind| {
            let added = self
                .expression_mut(index)?
                .add_child(parent_key, kind, value)
                .map_err(|e| e.to_string())?;
            Ok(match added {
                Some(added) => json!({
                    "added": true,
                    "treeIndex": added.tree_index,
                    "path": added.path,
                    "expandParent": added.expand_parent,
                }),
                None => json!({ "added": false }),
            })
        });
        respond(result)
    }

    /// Returns `false` when nothing was undone.
    pub fn undo(&mut self, index: usize) -> bool {
        self.workspace.get_mut(index).is_some_and(|e| e.undo())
    }

    /// Returns `false` when nothing was redone.
    pub fn redo(&mut self, index: usize) -> bool {
        self.workspace.get_mut(index).is_some_and(|e| e.redo())
    }
}

impl Session {
    fn expression(&self, index: usize) -> Result<&ExpressionSession, String> {
        self.workspace.get(index).ok_or_else(|| no_expression(index))
    }

    fn expression_mut(&mut self, index: usize) -> Result<&mut ExpressionSession, String> {
        self.workspace.get_mut(index).ok_or_else(|| no_expression(index))
    }

    fn kind_for(&self, kind: &str, value: &str) -> Result<NodeKind, String> {
        if kind.is_empty() {
            let inferred = Registry::builtin().classify(value, &self.workspace.expression_table());
            debug!("inferred {inferred} for '{value}'");
            return Ok(inferred);
        }
        kind.parse().map_err(|e: ParseKindError| e.to_string())
    }
}

/// Description of a primitive or special form, for "go to definition".
#[wasm_bindgen]
pub fn describe(name: &str) -> Option<String> {
    Registry::builtin().describe(name).map(str::to_string)
}

/// JSON array of primitive names, for the edit menu.
#[wasm_bindgen]
pub fn primitive_names() -> String {
    let names: Vec<&str> = Registry::builtin().primitive_names().collect();
    json!(names).to_string()
}

/// Return the crate version string.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn parse_path(path_json: &str) -> Result<Path, String> {
    serde_json::from_str(path_json).map_err(|e| format!("invalid path '{path_json}': {e}"))
}

fn no_expression(index: usize) -> String {
    format!("no expression at index {index}")
}

/// Tag a response object with `ok`.
fn respond(result: Response) -> String {
    let body = match result {
        Ok(Json::Object(mut fields)) => {
            fields.insert("ok".to_string(), Json::Bool(true));
            Json::Object(fields)
        }
        Ok(other) => json!({ "ok": true, "result": other }),
        Err(error) => json!({ "ok": false, "error": error }),
    };
    body.to_string()
}
