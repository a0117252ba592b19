//! The flat output record consumed by downstream retrieval pipelines.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Output format requested from the extraction engine.
///
/// `Json` is the structured mode: the engine's result tree is flattened
/// into one record per text-bearing node. The remaining formats are flat
/// modes producing a single whole-payload record per input file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Structured JSON result tree (default)
    #[default]
    Json,
    /// Markdown rendition of the whole document
    Markdown,
    /// Plain text rendition
    Text,
    /// HTML rendition
    Html,
}

impl OutputFormat {
    /// The format name as the engine's `--format` flag expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Text => "text",
            OutputFormat::Html => "html",
        }
    }

    /// File extension of the output file the engine writes for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "md",
            OutputFormat::Text => "txt",
            OutputFormat::Html => "html",
        }
    }

    /// Whether this format yields a result tree to flatten.
    pub fn is_structured(&self) -> bool {
        matches!(self, OutputFormat::Json)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata attached to every output record.
///
/// Invariant: each record traces to exactly one source file and, in
/// structured mode, at most one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMetadata {
    /// Path of the source PDF file.
    pub source: String,

    /// 1-indexed page number; `None` in flat modes or when no ancestor
    /// in the result tree carries a page attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Output format the record was produced from.
    pub format: OutputFormat,

    /// Structural type of the originating result node (paragraph, heading,
    /// table cell, ...); `None` in flat modes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
}

/// A flat unit of extracted text plus its provenance metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Extracted text content.
    pub text: String,

    /// Provenance metadata.
    pub metadata: RecordMetadata,
}

impl Record {
    /// Create a record for a structured result node.
    pub fn from_node(
        text: impl Into<String>,
        source: &str,
        page: Option<u32>,
        node_type: Option<String>,
    ) -> Self {
        Self {
            text: text.into(),
            metadata: RecordMetadata {
                source: source.to_string(),
                page,
                format: OutputFormat::Json,
                node_type,
            },
        }
    }

    /// Create a whole-payload record for a flat output mode.
    pub fn whole_file(text: impl Into<String>, source: &Path, format: OutputFormat) -> Self {
        Self {
            text: text.into(),
            metadata: RecordMetadata {
                source: source.to_string_lossy().into_owned(),
                page: None,
                format,
                node_type: None,
            },
        }
    }

    /// Length of the record's text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the record carries no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
