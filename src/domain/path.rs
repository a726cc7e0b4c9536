//! Tree path to a node within a parsed document
//!
//! Paths are carried by records and failures so that a consumer can locate
//! the exact node a result came from without holding a reference to the tree.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Path from the document root to a node, as child indices
///
/// The root node has the empty path. A path of `[2, 0]` identifies the first
/// child of the root's third child. Paths render as `/2/0`; the root renders
/// as `/`.
///
/// # Examples
///
/// ```
/// use meridian::domain::path::NodePath;
///
/// let root = NodePath::root();
/// let entry = root.child(2).child(0);
/// assert_eq!(entry.to_string(), "/2/0");
/// assert_eq!(root.to_string(), "/");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// Returns the path of the document root
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Returns the path of the child at `index` under this node
    pub fn child(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(index);
        Self(segments)
    }

    /// Returns the child indices from the root
    pub fn segments(&self) -> &[usize] {
        &self.0
    }

    /// Returns the depth of the node (0 for the root)
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Returns true if this is the root path
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "/");
        }
        for segment in &self.0 {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path() {
        let path = NodePath::root();
        assert!(path.is_root());
        assert_eq!(path.depth(), 0);
        assert_eq!(path.to_string(), "/");
    }

    #[test]
    fn test_child_path() {
        let path = NodePath::root().child(1).child(3);
        assert!(!path.is_root());
        assert_eq!(path.depth(), 2);
        assert_eq!(path.segments(), &[1, 3]);
        assert_eq!(path.to_string(), "/1/3");
    }

    #[test]
    fn test_child_does_not_mutate_parent() {
        let parent = NodePath::root().child(0);
        let _child = parent.child(5);
        assert_eq!(parent.segments(), &[0]);
    }

    #[test]
    fn test_path_equality() {
        assert_eq!(NodePath::root().child(2), NodePath::root().child(2));
        assert_ne!(NodePath::root().child(2), NodePath::root().child(3));
    }

    #[test]
    fn test_path_serialization() {
        let path = NodePath::root().child(0).child(4);
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "[0,4]");
        let deserialized: NodePath = serde_json::from_str(&json).unwrap();
        assert_eq!(path, deserialized);
    }
}
