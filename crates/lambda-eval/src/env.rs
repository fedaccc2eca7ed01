//! Immutable variable environment.

use crate::Value;
use std::rc::Rc;

#[derive(Debug)]
struct Frame {
    name: String,
    value: Value,
    parent: Option<Rc<Frame>>,
}

/// A persistent chain of bindings.
///
/// Extending an environment returns a new one that shares every existing
/// binding with its parent, so closures can capture an environment by
/// cloning a pointer. Lookup searches from the newest binding outward.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    head: Option<Rc<Frame>>,
}

impl Environment {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// A new environment with `name` bound to `value`, shadowing any outer
    /// binding of the same name. `self` is left untouched.
    pub fn extend(&self, name: &str, value: Value) -> Self {
        Self {
            head: Some(Rc::new(Frame {
                name: name.to_string(),
                value,
                parent: self.head.clone(),
            })),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Value> {
        let mut frame = self.head.as_deref();
        while let Some(f) = frame {
            if f.name == name {
                return Some(&f.value);
            }
            frame = f.parent.as_deref();
        }
        None
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Bound names, newest first. Shadowed names appear more than once.
    pub fn names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut frame = self.head.as_deref();
        while let Some(f) = frame {
            names.push(f.name.as_str());
            frame = f.parent.as_deref();
        }
        names
    }
}
