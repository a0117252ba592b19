//! Error types for the opendataloader-pdf loader.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for loader operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while resolving inputs, invoking the
/// extraction engine, or interpreting its output.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input resolution produced zero PDF files.
    #[error("No PDF input files found in: {0}")]
    NoInput(String),

    /// An input path does not exist.
    #[error("Invalid input path: {}", .0.display())]
    InvalidInput(PathBuf),

    /// The Java runtime or the engine jar could not be located.
    #[error("Extraction engine not available: {0}")]
    EngineNotFound(String),

    /// The engine process ran but failed for a file.
    #[error("Engine failed for {}: {}", .file.display(), .message)]
    Engine {
        /// Source file the engine was processing.
        file: PathBuf,
        /// Captured engine stderr or exit status description.
        message: String,
    },

    /// The engine exited successfully but did not write the expected output file.
    #[error("Engine produced no output file at {}", .0.display())]
    MissingOutput(PathBuf),

    /// The engine's output does not match the expected result-tree shape.
    #[error("Malformed engine result: {0}")]
    MalformedResult(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedResult(err.to_string())
    }
}
