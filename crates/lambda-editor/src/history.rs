use lambda_types::Tree;
use log::debug;
use std::collections::VecDeque;

/// Linear undo/redo over tree snapshots.
///
/// `present` is the tree on display. Recording a new tree pushes the old
/// present onto `past` and drops the redo branch. Undo and redo only move
/// existing snapshots between the three lists, so an undo followed by a redo
/// hands back the very same snapshot.
#[derive(Debug, Clone, Default)]
pub struct History {
    past: Vec<Tree>,
    present: Tree,
    /// Front is the next snapshot to redo.
    future: VecDeque<Tree>,
}

impl History {
    /// A history whose present is the canonical empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// A history with nothing to undo or redo.
    pub fn with_present(present: Tree) -> Self {
        Self {
            past: Vec::new(),
            present,
            future: VecDeque::new(),
        }
    }

    pub fn present(&self) -> &Tree {
        &self.present
    }

    /// Oldest first.
    pub fn past(&self) -> &[Tree] {
        &self.past
    }

    /// Next redo first.
    pub fn future(&self) -> impl Iterator<Item = &Tree> {
        self.future.iter()
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Make `tree` the present. Discards anything that could be redone.
    pub fn record(&mut self, tree: Tree) {
        let previous = std::mem::replace(&mut self.present, tree);
        self.past.push(previous);
        if !self.future.is_empty() {
            debug!("record drops {} redo snapshot(s)", self.future.len());
            self.future.clear();
        }
        debug!("recorded {} (past: {})", self.present, self.past.len());
    }

    /// Step back one snapshot. Returns `false` (and does nothing) when there
    /// is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push_front(current);
        debug!("undo to {} (past: {}, future: {})", self.present, self.past.len(), self.future.len());
        true
    }

    /// Step forward one snapshot. Returns `false` (and does nothing) when
    /// there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, next);
        self.past.push(current);
        debug!("redo to {} (past: {}, future: {})", self.present, self.past.len(), self.future.len());
        true
    }
}
