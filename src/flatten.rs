//! Lazy flattening of the engine's result tree into output records.
//!
//! The flattener walks the hierarchical result depth-first in pre-order,
//! visiting children exactly in the order the engine reports them. The
//! engine has already computed reading order; this walk must never reorder
//! anything. A node that carries non-empty text emits one record before its
//! children are visited; pure containers emit nothing themselves.
//!
//! Records are produced one at a time as the walk proceeds, so a caller can
//! consume the first record before the last one is computed.
//!
//! # Example
//!
//! ```
//! use opendataloader_pdf::flatten::flatten_str;
//!
//! let json = r#"{"kids": [
//!     {"type": "page", "page number": 1, "kids": [
//!         {"type": "paragraph", "content": "Hello"},
//!         {"type": "paragraph", "content": "World"}
//!     ]}
//! ]}"#;
//!
//! let records: Vec<_> = flatten_str(json, "doc.pdf")?.collect();
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[0].text, "Hello");
//! assert_eq!(records[0].metadata.page, Some(1));
//! # Ok::<(), opendataloader_pdf::Error>(())
//! ```

use crate::error::Result;
use crate::model::{Record, ResultNode};

/// A pending subtree paired with the page number inherited from its
/// nearest paged ancestor.
struct PendingNode {
    node: ResultNode,
    inherited_page: Option<u32>,
}

/// Lazy pre-order iterator over a result tree's text-bearing nodes.
///
/// Single-pass and finite; the tree is consumed by value and discarded as
/// records are emitted.
pub struct FlattenIter {
    source: String,
    stack: Vec<PendingNode>,
}

impl FlattenIter {
    /// Create an iterator over the given result tree.
    ///
    /// The root is walked uniformly: the engine's top-level document object
    /// usually carries only `kids`, but a root with its own content emits a
    /// record too.
    pub fn new(root: ResultNode, source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            stack: vec![PendingNode {
                node: root,
                inherited_page: None,
            }],
        }
    }

    /// Number of subtrees still awaiting a visit.
    pub fn pending(&self) -> usize {
        self.stack.len()
    }
}

impl Iterator for FlattenIter {
    type Item = Record;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(PendingNode {
            node,
            inherited_page,
        }) = self.stack.pop()
        {
            // A node without its own page attribute inherits the nearest
            // ancestor's page.
            let page = node.page.or(inherited_page);

            let emit = node.has_content();
            let text = node.content;
            let node_type = node.node_type;

            // Push kids in reverse so the leftmost child is visited next.
            for kid in node.kids.into_iter().rev() {
                self.stack.push(PendingNode {
                    node: kid,
                    inherited_page: page,
                });
            }

            if emit {
                return Some(Record::from_node(
                    text.unwrap_or_default(),
                    &self.source,
                    page,
                    node_type,
                ));
            }
        }
        None
    }
}

/// Flatten an already-deserialized result tree.
pub fn flatten(root: ResultNode, source: impl Into<String>) -> FlattenIter {
    FlattenIter::new(root, source)
}

/// Deserialize an engine JSON payload and flatten it.
///
/// Fails fast with [`crate::Error::MalformedResult`] when the payload does
/// not decode into the expected node shape; a partially valid tree is never
/// silently truncated.
pub fn flatten_str(json: &str, source: impl Into<String>) -> Result<FlattenIter> {
    let root: ResultNode = serde_json::from_str(json)?;
    Ok(FlattenIter::new(root, source))
}
