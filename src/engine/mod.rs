//! The external extraction engine boundary.
//!
//! All of the hard work (layout analysis, reading order, table detection,
//! content filtering) happens in the OpenDataLoader engine, a separately
//! maintained Java program. This module marshals options into the engine's
//! command line and reads back the output it writes; it never interprets
//! the engine's extraction behavior.

mod java;
mod options;

pub use java::JavaEngine;
pub use options::EngineOptions;

use std::path::Path;

use crate::error::Result;

/// Function-style seam for invoking the extraction engine on one file.
///
/// The production implementation is [`JavaEngine`]; tests substitute mock
/// engines returning canned payloads.
pub trait Engine: Send + Sync {
    /// Run the engine on a single PDF file and return its raw output
    /// payload (a JSON result tree, or the whole rendition in flat modes).
    fn run(&self, file: &Path, options: &EngineOptions) -> Result<String>;
}
