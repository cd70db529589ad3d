//! Content-query edges

use serde::{Deserialize, Serialize};

use super::Frontmatter;

/// One result of a content query, wrapping the queried node
///
/// Query metadata other than `node` is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentEdge {
    pub node: Node,
}

/// The content record behind an edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub frontmatter: Frontmatter,
}

impl ContentEdge {
    pub fn new(frontmatter: Frontmatter) -> Self {
        Self {
            node: Node { frontmatter },
        }
    }

    /// Shortcut to `node.frontmatter`
    pub fn frontmatter(&self) -> &Frontmatter {
        &self.node.frontmatter
    }
}

impl From<Frontmatter> for ContentEdge {
    fn from(frontmatter: Frontmatter) -> Self {
        Self::new(frontmatter)
    }
}
