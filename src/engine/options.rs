//! Engine invocation options.

use crate::model::OutputFormat;

/// Options passed through to the extraction engine.
///
/// Apart from the output format, which selects between structured and flat
/// loading, every option here is an opaque pass-through value: the loader
/// marshals it onto the engine's command line without interpreting it.
///
/// # Example
///
/// ```
/// use opendataloader_pdf::{EngineOptions, OutputFormat};
///
/// let options = EngineOptions::new()
///     .with_format(OutputFormat::Json)
///     .with_password("secret")
///     .with_table_method("structure")
///     .quiet();
/// ```
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    /// Output format requested from the engine.
    pub format: OutputFormat,

    /// Password for encrypted documents.
    pub password: Option<String>,

    /// Table detection method.
    pub table_method: Option<String>,

    /// Reading-order reconstruction mode.
    pub reading_order: Option<String>,

    /// Embed extracted images into the output.
    pub embed_images: bool,

    /// Content-safety filters to switch off.
    pub content_safety_off: Vec<String>,

    /// Separator inserted between pages in flat output modes.
    pub page_separator: Option<String>,

    /// Suppress the engine's own console logging.
    pub quiet: bool,

    /// Raw extra arguments appended verbatim.
    pub extra_args: Vec<String>,
}

impl EngineOptions {
    /// Create new engine options with defaults (JSON format, nothing else).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the document password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set the table detection method.
    pub fn with_table_method(mut self, method: impl Into<String>) -> Self {
        self.table_method = Some(method.into());
        self
    }

    /// Set the reading-order mode.
    pub fn with_reading_order(mut self, mode: impl Into<String>) -> Self {
        self.reading_order = Some(mode.into());
        self
    }

    /// Embed images into the output.
    pub fn with_embedded_images(mut self, embed: bool) -> Self {
        self.embed_images = embed;
        self
    }

    /// Switch off a content-safety filter. May be called repeatedly.
    pub fn with_content_safety_off(mut self, filter: impl Into<String>) -> Self {
        self.content_safety_off.push(filter.into());
        self
    }

    /// Set the page separator for flat output modes.
    pub fn with_page_separator(mut self, separator: impl Into<String>) -> Self {
        self.page_separator = Some(separator.into());
        self
    }

    /// Suppress the engine's console logging.
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    /// Append a raw argument passed to the engine verbatim.
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.extra_args.push(arg.into());
        self
    }

    /// Marshal the options into engine command-line flags.
    ///
    /// Unset options contribute no flags.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec!["--format".to_string(), self.format.as_str().to_string()];

        if let Some(ref password) = self.password {
            args.push("--password".to_string());
            args.push(password.clone());
        }
        if let Some(ref method) = self.table_method {
            args.push("--table-method".to_string());
            args.push(method.clone());
        }
        if let Some(ref mode) = self.reading_order {
            args.push("--reading-order".to_string());
            args.push(mode.clone());
        }
        if self.embed_images {
            args.push("--embed-images".to_string());
        }
        for filter in &self.content_safety_off {
            args.push("--content-safety-off".to_string());
            args.push(filter.clone());
        }
        if let Some(ref separator) = self.page_separator {
            args.push("--page-separator".to_string());
            args.push(separator.clone());
        }
        if self.quiet {
            args.push("--quiet".to_string());
        }
        args.extend(self.extra_args.iter().cloned());

        args
    }
}
