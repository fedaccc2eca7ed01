use serde::{Deserialize, Serialize};
use std::fmt;

/// Positional address of a node: child indices from the root.
///
/// The empty path addresses the root. Paths are not stable identities; an
/// insertion or removal among earlier siblings makes them point elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<usize>);

impl Path {
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// The path of the root node.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// The path of this node's `index`-th child.
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// Split into the parent's path and this node's index among its siblings.
    pub fn split_last(&self) -> Option<(Path, usize)> {
        let (&last, parent) = self.0.split_last()?;
        Some((Self(parent.to_vec()), last))
    }
}

impl From<Vec<usize>> for Path {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

/// `/` for the root, `/1/0` for the first child of the second child.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for index in &self.0 {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_empty() {
        assert!(Path::root().is_root());
        assert_eq!(Path::root().depth(), 0);
        assert_eq!(Path::root().split_last(), None);
    }

    #[test]
    fn child_and_split_last_are_inverse() {
        let path = Path::new(vec![1, 0]).child(3);
        assert_eq!(path.indices(), &[1, 0, 3]);
        assert_eq!(path.split_last(), Some((Path::new(vec![1, 0]), 3)));
    }

    #[test]
    fn display() {
        assert_eq!(Path::root().to_string(), "/");
        assert_eq!(Path::new(vec![1, 0]).to_string(), "/1/0");
    }

    #[test]
    fn json_is_a_plain_index_array() {
        let path: Path = serde_json::from_str("[2,0]").unwrap();
        assert_eq!(path, Path::new(vec![2, 0]));
        assert_eq!(serde_json::to_string(&Path::root()).unwrap(), "[]");
    }
}
