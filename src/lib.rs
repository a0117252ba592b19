//! # opendataloader-pdf
//!
//! Document loader for the OpenDataLoader PDF extraction engine.
//!
//! This library does not parse PDFs itself. It invokes the external
//! OpenDataLoader engine (a Java program) on each input file, walks the
//! hierarchical JSON result the engine produces, and flattens it into an
//! ordered, lazy sequence of text records with source, page, format, and
//! node-type metadata — the shape retrieval pipelines consume.
//!
//! ## Quick Start
//!
//! ```no_run
//! use opendataloader_pdf::Loader;
//!
//! fn main() -> opendataloader_pdf::Result<()> {
//!     // Requires the OPENDATALOADER_JAR environment variable and Java 11+.
//!     let records = Loader::new(["document.pdf"]).load()?;
//!     for record in &records {
//!         println!("page {:?}: {}", record.metadata.page, record.text);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Lazy loading
//!
//! ```no_run
//! use opendataloader_pdf::Loader;
//!
//! # fn main() -> opendataloader_pdf::Result<()> {
//! // Records become available as each file's result tree is walked.
//! for item in Loader::new(["reports/"]).recursive(true).lazy_load()? {
//!     let record = item?;
//!     println!("{}", record.text);
//! }
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod error;
pub mod flatten;
pub mod input;
pub mod model;
pub mod stream;

// Re-export commonly used types
pub use engine::{Engine, EngineOptions, JavaEngine};
pub use error::{Error, Result};
pub use flatten::{flatten, flatten_str, FlattenIter};
pub use input::{is_pdf_path, resolve_inputs};
pub use model::{OutputFormat, Record, RecordMetadata, ResultNode};
pub use stream::{collect_report, ErrorMode, LoadReport, RecordStream};

use std::path::{Path, PathBuf};

/// Builder for loading PDF files through the extraction engine.
///
/// Accepts files and directories, expands them into a deterministic batch,
/// and produces records either eagerly ([`Loader::load`]) or lazily
/// ([`Loader::lazy_load`]).
///
/// # Example
///
/// ```no_run
/// use opendataloader_pdf::{ErrorMode, Loader, OutputFormat};
///
/// let report = Loader::new(["docs/", "extra.pdf"])
///     .recursive(true)
///     .with_format(OutputFormat::Json)
///     .with_password("secret")
///     .with_error_mode(ErrorMode::Lenient)
///     .load_with_report()?;
///
/// println!("{} records, {} failed files", report.records.len(), report.failures.len());
/// # Ok::<(), opendataloader_pdf::Error>(())
/// ```
pub struct Loader {
    paths: Vec<PathBuf>,
    recursive: bool,
    error_mode: ErrorMode,
    options: EngineOptions,
    engine: Option<Box<dyn Engine>>,
}

impl Loader {
    /// Create a loader for the given file or directory paths.
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            recursive: false,
            error_mode: ErrorMode::default(),
            options: EngineOptions::default(),
            engine: None,
        }
    }

    /// Add another input path.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.push(path.into());
        self
    }

    /// Descend into subdirectories when expanding directory inputs.
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Set how a failing file affects the rest of the batch.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// End the whole batch at the first failing file.
    pub fn fail_fast(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Replace the engine options wholesale.
    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the engine output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.options.format = format;
        self
    }

    /// Set the document password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.options.password = Some(password.into());
        self
    }

    /// Use a custom engine implementation instead of [`JavaEngine`].
    pub fn with_engine<E: Engine + 'static>(mut self, engine: E) -> Self {
        self.engine = Some(Box::new(engine));
        self
    }

    /// Resolve inputs and return the lazy record stream.
    ///
    /// Input resolution and engine discovery failures surface here; per-file
    /// engine failures surface as `Err` items of the stream.
    pub fn lazy_load(self) -> Result<RecordStream> {
        let files = resolve_inputs(&self.paths, self.recursive)?;
        let engine = match self.engine {
            Some(engine) => engine,
            None => Box::new(JavaEngine::from_env()?),
        };
        Ok(RecordStream::new(
            engine,
            self.options,
            files,
            self.error_mode,
        ))
    }

    /// Load the whole batch eagerly, stopping at the first error.
    pub fn load(self) -> Result<Vec<Record>> {
        self.lazy_load()?.collect()
    }

    /// Load the whole batch, reporting partial success per file.
    pub fn load_with_report(self) -> Result<LoadReport> {
        Ok(collect_report(self.lazy_load()?))
    }
}

/// Load a single PDF file into records with default options.
///
/// # Example
///
/// ```no_run
/// let records = opendataloader_pdf::load_file("document.pdf")?;
/// # Ok::<(), opendataloader_pdf::Error>(())
/// ```
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    Loader::new([path.as_ref()]).load()
}

/// Load multiple PDF files into records with default options.
pub fn load_files<I, P>(paths: I) -> Result<Vec<Record>>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    Loader::new(paths).load()
}

/// Load every PDF file in a directory (non-recursively).
pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Vec<Record>> {
    Loader::new([dir.as_ref()]).load()
}

/// Extract the whole plain-text rendition of a single PDF file.
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let records = Loader::new([path.as_ref()])
        .with_format(OutputFormat::Text)
        .load()?;
    Ok(records.into_iter().map(|r| r.text).collect())
}
