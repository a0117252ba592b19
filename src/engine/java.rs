//! Subprocess invocation of the OpenDataLoader Java engine.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::{Engine, EngineOptions};
use crate::error::{Error, Result};

/// Environment variable pointing at the engine jar.
pub const JAR_ENV_VAR: &str = "OPENDATALOADER_JAR";

/// The production engine: runs the OpenDataLoader jar with `java -jar`.
///
/// The engine writes its output into a folder; each invocation stages a
/// fresh temporary folder, reads the single output file back, and discards
/// the folder. Requires Java 11 or later on the PATH.
///
/// # Example
///
/// ```no_run
/// use opendataloader_pdf::{Engine, EngineOptions, JavaEngine};
/// use std::path::Path;
///
/// let engine = JavaEngine::from_env()?;
/// let payload = engine.run(Path::new("document.pdf"), &EngineOptions::new())?;
/// # Ok::<(), opendataloader_pdf::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct JavaEngine {
    jar: PathBuf,
    java_bin: PathBuf,
}

impl JavaEngine {
    /// Create an engine using the given jar path.
    pub fn new(jar: impl Into<PathBuf>) -> Self {
        Self {
            jar: jar.into(),
            java_bin: PathBuf::from("java"),
        }
    }

    /// Create an engine from the `OPENDATALOADER_JAR` environment variable.
    pub fn from_env() -> Result<Self> {
        let jar = env::var_os(JAR_ENV_VAR).ok_or_else(|| {
            Error::EngineNotFound(format!(
                "set {} to the path of the OpenDataLoader jar",
                JAR_ENV_VAR
            ))
        })?;
        let jar = PathBuf::from(jar);
        if !jar.is_file() {
            return Err(Error::EngineNotFound(format!(
                "engine jar not found at {}",
                jar.display()
            )));
        }
        Ok(Self::new(jar))
    }

    /// Use a specific `java` binary instead of the one on the PATH.
    pub fn with_java_bin(mut self, bin: impl Into<PathBuf>) -> Self {
        self.java_bin = bin.into();
        self
    }

    /// Path of the engine jar.
    pub fn jar(&self) -> &Path {
        &self.jar
    }

    /// The output file the engine writes for `file` under `out_dir`.
    fn output_path(&self, file: &Path, out_dir: &Path, options: &EngineOptions) -> PathBuf {
        let stem = file.file_stem().unwrap_or_default();
        out_dir
            .join(stem)
            .with_extension(options.format.extension())
    }
}

impl Engine for JavaEngine {
    fn run(&self, file: &Path, options: &EngineOptions) -> Result<String> {
        let out_dir = tempfile::tempdir()?;

        let mut command = Command::new(&self.java_bin);
        command
            .arg("-jar")
            .arg(&self.jar)
            .arg(file)
            .arg("--output-folder")
            .arg(out_dir.path())
            .args(options.to_args());

        log::debug!("Invoking engine: {:?}", command);

        let output = command.output().map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                Error::EngineNotFound(format!(
                    "{} not found; install Java 11 or later",
                    self.java_bin.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = match stderr.trim() {
                "" => format!("engine exited with {}", output.status),
                detail => detail.to_string(),
            };
            return Err(Error::Engine {
                file: file.to_path_buf(),
                message,
            });
        }

        let output_file = self.output_path(file, out_dir.path(), options);
        match fs::read_to_string(&output_file) {
            Ok(payload) => Ok(payload),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(Error::MissingOutput(output_file))
            }
            Err(e) => Err(Error::Io(e)),
        }
    }
}
