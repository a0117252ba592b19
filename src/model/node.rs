//! The engine's hierarchical result node.

use serde::Deserialize;

/// One node of the engine's JSON result tree.
///
/// The engine describes each page's content as a tree: containers such as
/// pages and text blocks carry `kids`, leaves carry `content`. Nodes may
/// additionally carry bounding boxes and style attributes which this loader
/// does not consume; unknown fields are ignored during deserialization.
///
/// The node is owned transiently by the flattener and discarded once its
/// records have been emitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResultNode {
    /// Structural type tag reported by the engine (paragraph, table cell, ...).
    #[serde(rename = "type", default)]
    pub node_type: Option<String>,

    /// 1-indexed page the node belongs to, when the engine reports one.
    #[serde(rename = "page number", default)]
    pub page: Option<u32>,

    /// Leaf text payload, when present.
    #[serde(default)]
    pub content: Option<String>,

    /// Child nodes in the engine's reading order.
    #[serde(default)]
    pub kids: Vec<ResultNode>,
}

impl ResultNode {
    /// Check whether the node carries non-empty text of its own.
    pub fn has_content(&self) -> bool {
        self.content.as_deref().is_some_and(|c| !c.is_empty())
    }

    /// Check whether the node has child nodes.
    pub fn has_kids(&self) -> bool {
        !self.kids.is_empty()
    }

    /// Total number of nodes in this subtree, the node itself included.
    pub fn node_count(&self) -> usize {
        1 + self.kids.iter().map(ResultNode::node_count).sum::<usize>()
    }
}
